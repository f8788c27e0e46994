//! Transient status messages shown under the header.

use std::time::Duration;

/// How long a status message stays visible.
pub const DISMISS_AFTER: Duration = Duration::from_secs(8);

/// Severity of a status message, mapped to a color in the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub level: StatusLevel,
}

/// The single status slot. A new `show` replaces whatever is visible and
/// restarts the clock; the dismiss timer of an older message is recognized
/// by its stale sequence number and ignored, so the last call wins.
#[derive(Debug, Default)]
pub struct StatusBar {
    current: Option<Status>,
    seq: u64,
}

impl StatusBar {
    /// Show a message and return the sequence number the caller's dismiss
    /// timer must present.
    pub fn show(&mut self, text: impl Into<String>, level: StatusLevel) -> u64 {
        self.seq += 1;
        self.current = Some(Status {
            text: text.into(),
            level,
        });
        self.seq
    }

    /// Hide the message, but only if `seq` still names the one on display.
    /// Idempotent.
    pub fn dismiss(&mut self, seq: u64) {
        if seq == self.seq {
            self.current = None;
        }
    }

    pub fn current(&self) -> Option<&Status> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_then_dismiss() {
        let mut bar = StatusBar::default();
        let seq = bar.show("Lead vorbereitet!", StatusLevel::Success);
        assert!(bar.current().is_some());
        bar.dismiss(seq);
        assert!(bar.current().is_none());
    }

    #[test]
    fn test_stale_dismiss_keeps_newer_message() {
        let mut bar = StatusBar::default();
        let old = bar.show("first", StatusLevel::Warning);
        bar.show("second", StatusLevel::Error);

        // The first message's timer fires after the second one appeared.
        bar.dismiss(old);
        assert_eq!(bar.current().map(|s| s.text.as_str()), Some("second"));
    }

    #[test]
    fn test_dismiss_is_idempotent() {
        let mut bar = StatusBar::default();
        let seq = bar.show("msg", StatusLevel::Success);
        bar.dismiss(seq);
        bar.dismiss(seq);
        assert!(bar.current().is_none());
    }
}
