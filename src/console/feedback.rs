//! Transient notification attached to a panel.
//!
//! A notification is shown, then hidden again either by the user or by the
//! auto-dismiss timer. Each show hands out a [`Ticket`]; a timer only hides
//! the notification if its ticket is still the current one, so a newer
//! notification or an explicit dismissal invalidates older timers.

use std::fmt;
use std::time::Duration;

/// How long a notification stays up unless dismissed.
pub const AUTO_DISMISS: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Identifies one showing of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    message: String,
    severity: Severity,
    visible: bool,
    generation: u64,
}

impl Default for Feedback {
    fn default() -> Self {
        Self {
            message: String::new(),
            severity: Severity::Error,
            visible: false,
            generation: 0,
        }
    }
}

impl Feedback {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Replaces whatever is showing. The caller arms a timer for the ticket.
    pub fn show(&mut self, message: impl Into<String>, severity: Severity) -> Ticket {
        self.message = message.into();
        self.severity = severity;
        self.visible = true;
        self.generation += 1;
        Ticket(self.generation)
    }

    pub fn dismiss(&mut self) {
        self.visible = false;
        self.generation += 1;
    }

    /// Timer callback. Returns `true` if this hid the notification.
    pub fn expire(&mut self, ticket: Ticket) -> bool {
        if !self.visible || ticket.0 != self.generation {
            return false;
        }
        self.visible = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_hidden() {
        let feedback = Feedback::default();
        assert!(!feedback.is_visible());
        assert_eq!(feedback.message(), "");
    }

    #[test]
    fn test_show_then_expire() {
        let mut feedback = Feedback::default();
        let ticket = feedback.show("User created", Severity::Success);
        assert!(feedback.is_visible());
        assert_eq!(feedback.severity(), Severity::Success);

        assert!(feedback.expire(ticket));
        assert!(!feedback.is_visible());
        assert!(!feedback.expire(ticket));
    }

    #[test]
    fn test_new_show_overwrites_and_outlives_old_timer() {
        let mut feedback = Feedback::default();
        let first = feedback.show("first", Severity::Error);
        let second = feedback.show("second", Severity::Success);

        assert!(!feedback.expire(first));
        assert!(feedback.is_visible());
        assert_eq!(feedback.message(), "second");

        assert!(feedback.expire(second));
    }

    #[test]
    fn test_dismiss_invalidates_timer() {
        let mut feedback = Feedback::default();
        let ticket = feedback.show("oops", Severity::Error);
        feedback.dismiss();
        assert!(!feedback.is_visible());
        assert!(!feedback.expire(ticket));
    }
}
