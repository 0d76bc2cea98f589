//! The run log: a plain text buffer written next to the generated files,
//! collecting every skip and degrade notice of one run.

use crate::models::color::SectorColor;
use chrono::Local;

/// Accumulates log lines for one run.
///
/// The header line is written at construction, so an empty log still
/// records when the run happened.
#[derive(Debug, Clone)]
pub struct RunLog {
    buffer: String,
}

impl RunLog {
    /// Creates a log opened with the start-of-run header.
    #[must_use]
    pub fn new() -> Self {
        let started = Local::now().format("%Y-%m-%d, %H:%M:%S");
        Self {
            buffer: format!("Started Logging at {started} at logging level Standard\n"),
        }
    }

    /// Appends one log line.
    pub fn entry(&mut self, line: &str) {
        self.buffer.push_str(line);
        self.buffer.push('\n');
    }

    /// Closes the log with the colors-used listing and returns the full
    /// text.
    #[must_use]
    pub fn finish(self, colors_used: &[SectorColor]) -> String {
        let mut text = self.buffer;
        text.push_str("\nFollowing color codes were used in the generation of this sectorfile:\n");
        for color in colors_used {
            let form = color.log_form();
            if !form.is_empty() {
                text.push_str("    ");
                text.push_str(&form);
                text.push('\n');
            }
        }
        text
    }
}

impl Default for RunLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_entries() {
        let mut log = RunLog::new();
        log.entry("first notice");
        log.entry("second notice");

        let text = log.finish(&[]);
        assert!(text.starts_with("Started Logging at "));
        assert!(text.contains("at logging level Standard\n"));
        assert!(text.contains("first notice\nsecond notice\n"));
    }

    #[test]
    fn test_colors_used_listing() {
        let log = RunLog::new();
        let colors = [
            SectorColor::Decimal(33023),
            SectorColor::Named("white".to_string()),
            SectorColor::Named(String::new()),
        ];
        let text = log.finish(&colors);
        assert!(text.contains(
            "Following color codes were used in the generation of this sectorfile:\n    #FF8000\n    white\n"
        ));
        // Empty names are not listed.
        assert!(!text.contains("\n    \n"));
    }
}
