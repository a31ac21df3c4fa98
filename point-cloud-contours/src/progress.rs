/// Terminal progress bar bound to the compositor's progress sink
use crate::compositor::ProgressSink;
use indicatif::{ProgressBar, ProgressStyle};

const STEPS: u64 = 1000;

pub struct TerminalProgress {
    bar: ProgressBar,
}

impl TerminalProgress {
    pub fn new(message: &'static str) -> Self {
        let bar = ProgressBar::new(STEPS);
        if let Ok(style) =
            ProgressStyle::default_bar().template("[{bar:40.green/blue}] {percent}% {msg}")
        {
            bar.set_style(style.progress_chars("▉▊▋▌▍▎▏ "));
        }
        bar.set_message(message);
        Self { bar }
    }

    pub fn finish(&self, message: &'static str) {
        self.bar.finish_with_message(message);
    }
}

impl ProgressSink for TerminalProgress {
    fn report(&mut self, fraction: f32) {
        let position = (fraction.clamp(0.0, 1.0) * STEPS as f32).round() as u64;
        self.bar.set_position(position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractions_map_onto_bar_steps() {
        let mut progress = TerminalProgress::new("Compositing");
        progress.report(0.25);
        assert_eq!(progress.bar.position(), 250);
        progress.report(1.0);
        assert_eq!(progress.bar.position(), STEPS);
    }
}
