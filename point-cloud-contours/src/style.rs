/// Per-class contour styling: labels and colours
use crate::error::{ContourError, Result};
use constants::class::{UNKNOWN_CLASS_COLOUR, get_class_info, named_colour};
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_array(rgb: [u8; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }

    /// Parse `#rrggbb`, `#rgb` or a CSS colour name.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if let Some(hex) = text.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| {
                ContourError::invalid(format!("invalid hex colour '{}'", text))
            });
        }

        named_colour(text)
            .map(Self::from_array)
            .ok_or_else(|| ContourError::invalid(format!("unknown colour name '{}'", text)))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Rgb::new(
            channel(hex.get(0..2)?)?,
            channel(hex.get(2..4)?)?,
            channel(hex.get(4..6)?)?,
        )),
        3 => {
            let expand = |s: &str| channel(s).map(|v| v * 17);
            Some(Rgb::new(
                expand(hex.get(0..1)?)?,
                expand(hex.get(1..2)?)?,
                expand(hex.get(2..3)?)?,
            ))
        }
        _ => None,
    }
}

impl FromStr for Rgb {
    type Err = ContourError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Convert a CSS colour name to `#rrggbb`; hex input is normalised.
pub fn colour_name_to_hex(name: &str) -> Option<String> {
    Rgb::parse(name).ok().map(|c| c.to_hex())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassStyle {
    pub label: String,
    pub colour: Rgb,
}

/// Total mapping from classification code to style.
/// User overrides win, then the default table, then the unknown-class entry.
#[derive(Debug, Clone, Default)]
pub struct StyleMap {
    overrides: HashMap<u8, Rgb>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_colour(mut self, code: u8, colour: Rgb) -> Self {
        self.set_colour(code, colour);
        self
    }

    pub fn set_colour(&mut self, code: u8, colour: Rgb) {
        self.overrides.insert(code, colour);
    }

    pub fn style(&self, code: u8) -> ClassStyle {
        let (label, default_colour) = get_class_info(code);
        let colour = self
            .overrides
            .get(&code)
            .copied()
            .unwrap_or_else(|| default_rgb(default_colour));

        ClassStyle {
            label: label.to_string(),
            colour,
        }
    }
}

fn default_rgb(name: &str) -> Rgb {
    named_colour(name)
        .or_else(|| named_colour(UNKNOWN_CLASS_COLOUR))
        .map_or(Rgb::new(255, 255, 0), Rgb::from_array)
}
