//! Where the widget writes its text.
//!
//! The widget owns no display of its own; it is handed an [`Output`] and
//! replaces that output's text on every state change.

use std::io::Write;
use std::sync::Mutex;

/// A text display the widget overwrites.
pub trait Output: Send + Sync {
    /// Replace the displayed text.
    fn set_text(&self, text: &str);
}

/// In-memory display holding only the latest text.
#[derive(Debug, Default)]
pub struct TextArea {
    text: Mutex<String>,
}

impl TextArea {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents.
    pub fn text(&self) -> String {
        self.text.lock().unwrap().clone()
    }
}

impl Output for TextArea {
    fn set_text(&self, text: &str) {
        *self.text.lock().unwrap() = text.to_string();
    }
}

/// Prints every write as its own line on stdout.
#[derive(Debug, Default)]
pub struct Terminal;

impl Output for Terminal {
    fn set_text(&self, text: &str) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{text}");
        let _ = out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_area_starts_empty() {
        assert_eq!(TextArea::new().text(), "");
    }

    #[test]
    fn text_area_keeps_latest_write() {
        let area = TextArea::new();
        area.set_text("Running...");
        area.set_text("Result: 42");
        assert_eq!(area.text(), "Result: 42");
    }

    #[test]
    fn terminal_write_does_not_panic() {
        Terminal.set_text("Result: 42");
    }
}
