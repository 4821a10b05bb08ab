//! Traits for the outbound collaborators the domain talks to

use async_trait::async_trait;
use fleet_types::Result;
use serde::Serialize;

/// Parameters handed to the transactional email template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailMessage {
    pub to_email: String,
    pub subject: String,
    pub message: String,
}

/// Transactional email delivery
#[async_trait]
pub trait EmailGateway: Send + Sync {
    /// Send one message; no retries
    async fn send(&self, message: &EmailMessage) -> Result<()>;
}

/// Blocking-style user notifications
pub trait Notifier {
    fn info(&self, message: &str);

    fn alert(&self, message: &str);
}
