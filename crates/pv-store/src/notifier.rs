use crate::AuditEvent;

use log::warn;

/// Sink for messages meant for the person using the application.
pub trait Notifier: Send + Sync {
    /// A report to show the user, such as a corruption notice.
    fn notify(&self, title: &str, message: &str);

    /// Audit events are always written to the log; override to also surface them.
    fn audit(&self, _event: &AuditEvent) {}
}

/// Notifier that only logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, title: &str, message: &str) {
        warn!("{title}: {message}");
    }
}
