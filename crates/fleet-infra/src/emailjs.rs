//! EmailJS transactional email gateway

use std::time::Duration;

use async_trait::async_trait;
use fleet_domain::gateway::{EmailGateway, EmailMessage};
use fleet_types::{ConfigError, Error, Result};
use serde::Serialize;
use tracing::{error, info};

pub const DEFAULT_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Identifiers of the EmailJS service and template to send through
#[derive(Debug, Clone, PartialEq)]
pub struct EmailJsSettings {
    pub endpoint: String,
    pub service_id: String,
    pub template_id: String,
    /// EmailJS account public key (sent as `user_id`)
    pub public_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a EmailMessage,
}

#[derive(Debug, Clone)]
pub struct EmailJsGateway {
    client: reqwest::Client,
    settings: EmailJsSettings,
}

impl EmailJsGateway {
    pub fn new(settings: EmailJsSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::EmailFailed(e.to_string()))?;
        Ok(Self { client, settings })
    }
}

#[async_trait]
impl EmailGateway for EmailJsGateway {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        let public_key = self
            .settings
            .public_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ConfigError::Missing("email_public_key".to_string()))?;

        let body = SendRequest {
            service_id: &self.settings.service_id,
            template_id: &self.settings.template_id,
            user_id: public_key,
            template_params: message,
        };

        let response = self
            .client
            .post(&self.settings.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "email request failed");
                Error::EmailFailed(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!(%status, body = %text, "email service rejected request");
            return Err(Error::EmailFailed(format!("{}: {}", status, text)));
        }

        info!(to = %message.to_email, "email sent");
        Ok(())
    }
}
