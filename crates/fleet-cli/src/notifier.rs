//! Terminal notifications for the interactive session

use fleet_domain::gateway::Notifier;

/// Prints notifications to stderr so stdout stays machine-readable
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn info(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn alert(&self, message: &str) {
        eprintln!("Alert: {}", message);
    }
}
