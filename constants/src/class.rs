/// Classification labels and default contour colours (ASPRS LAS codes)
pub struct ClassInfo {
    pub id: u8,
    pub name: &'static str,
    pub colour: &'static str,
}

/// Style applied to any code missing from `CLASS_MAP`
pub const UNKNOWN_CLASS_NAME: &str = "Unknown";
pub const UNKNOWN_CLASS_COLOUR: &str = "yellow";

pub const CLASS_MAP: &[ClassInfo] = &[
    ClassInfo {
        id: 0,
        name: "Created, never classified",
        colour: "lightgray",
    },
    ClassInfo {
        id: 1,
        name: "Unclassified",
        colour: "gray",
    },
    ClassInfo {
        id: 2,
        name: "Ground",
        colour: "white",
    },
    ClassInfo {
        id: 3,
        name: "Low Vegetation",
        colour: "lightgreen",
    },
    ClassInfo {
        id: 4,
        name: "Medium Vegetation",
        colour: "green",
    },
    ClassInfo {
        id: 5,
        name: "High Vegetation",
        colour: "darkgreen",
    },
    ClassInfo {
        id: 6,
        name: "Building",
        colour: "slategray",
    },
    ClassInfo {
        id: 7,
        name: "Low Point (noise)",
        colour: "red",
    },
    ClassInfo {
        id: 8,
        name: "Model Key-point (mass point)",
        colour: "orange",
    },
    ClassInfo {
        id: 9,
        name: "Water",
        colour: "blue",
    },
    ClassInfo {
        id: 10,
        name: "Rail",
        colour: "purple",
    },
    ClassInfo {
        id: 11,
        name: "Road Surface",
        colour: "brown",
    },
    ClassInfo {
        id: 12,
        name: "Reserved",
        colour: "pink",
    },
    ClassInfo {
        id: 13,
        name: "Wire Guard",
        colour: "cyan",
    },
    ClassInfo {
        id: 14,
        name: "Wire Conductor",
        colour: "deepskyblue",
    },
    ClassInfo {
        id: 15,
        name: "Transmission Tower",
        colour: "gold",
    },
    ClassInfo {
        id: 16,
        name: "Wire Structure Connector",
        colour: "coral",
    },
    ClassInfo {
        id: 17,
        name: "Bridge Deck",
        colour: "sienna",
    },
    ClassInfo {
        id: 18,
        name: "High Noise",
        colour: "crimson",
    },
];

/// CSS colour names understood by the styling layer, as sRGB bytes
pub const NAMED_COLOURS: &[(&str, [u8; 3])] = &[
    ("black", [0x00, 0x00, 0x00]),
    ("blue", [0x00, 0x00, 0xff]),
    ("brown", [0xa5, 0x2a, 0x2a]),
    ("coral", [0xff, 0x7f, 0x50]),
    ("crimson", [0xdc, 0x14, 0x3c]),
    ("cyan", [0x00, 0xff, 0xff]),
    ("darkgreen", [0x00, 0x64, 0x00]),
    ("deepskyblue", [0x00, 0xbf, 0xff]),
    ("gold", [0xff, 0xd7, 0x00]),
    ("gray", [0x80, 0x80, 0x80]),
    ("green", [0x00, 0x80, 0x00]),
    ("grey", [0x80, 0x80, 0x80]),
    ("lightgray", [0xd3, 0xd3, 0xd3]),
    ("lightgreen", [0x90, 0xee, 0x90]),
    ("lightgrey", [0xd3, 0xd3, 0xd3]),
    ("orange", [0xff, 0xa5, 0x00]),
    ("pink", [0xff, 0xc0, 0xcb]),
    ("purple", [0x80, 0x00, 0x80]),
    ("red", [0xff, 0x00, 0x00]),
    ("sienna", [0xa0, 0x52, 0x2d]),
    ("slategray", [0x70, 0x80, 0x90]),
    ("white", [0xff, 0xff, 0xff]),
    ("yellow", [0xff, 0xff, 0x00]),
];

/// Label and default colour name for a classification code.
/// Falls back to the unknown style for codes outside the table.
pub fn get_class_info(id: u8) -> (&'static str, &'static str) {
    CLASS_MAP
        .iter()
        .find(|c| c.id == id)
        .map_or((UNKNOWN_CLASS_NAME, UNKNOWN_CLASS_COLOUR), |c| {
            (c.name, c.colour)
        })
}

/// Look up a CSS colour name, ignoring case
pub fn named_colour(name: &str) -> Option<[u8; 3]> {
    let name = name.trim().to_ascii_lowercase();
    NAMED_COLOURS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, rgb)| *rgb)
}
