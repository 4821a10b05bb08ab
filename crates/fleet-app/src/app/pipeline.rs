//! Notification-free building blocks shared by the one-shot commands and
//! the interactive session

use std::path::Path;

use fleet_domain::gateway::EmailGateway;
use fleet_domain::model::Fleet;
use fleet_domain::service::report::analysis_email;
use fleet_domain::service::{parse_rows, summarize, ParseMode};
use fleet_infra::workbook_loader::load_rows;
use fleet_types::{Error, Result};
use tracing::info;

/// Read an uploaded file and parse it into a brand-new fleet
pub async fn load_fleet(path: &Path, mode: ParseMode) -> Result<Fleet> {
    let rows = load_rows(path).await?;
    let fleet = parse_rows(&rows, mode)?;
    info!(path = %path.display(), vehicles = fleet.len(), "loaded fleet");
    Ok(fleet)
}

/// Email the best/worst vehicle summary to `to_email`
pub async fn email_summary<G: EmailGateway + ?Sized>(gateway: &G, fleet: &Fleet, to_email: &str) -> Result<()> {
    let to_email = to_email.trim();
    if to_email.is_empty() {
        return Err(Error::MissingEmailAddress);
    }
    let summary = summarize(fleet)?;
    gateway.send(&analysis_email(to_email, &summary)).await
}
