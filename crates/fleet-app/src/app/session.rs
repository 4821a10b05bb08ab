//! Interactive analysis session
//!
//! Holds the fleet from the most recent upload and reacts to the user's
//! actions. Each action either completes or fails as a whole; a failure is
//! reported through the notifier and never ends the session.

use std::path::{Path, PathBuf};

use fleet_domain::gateway::{EmailGateway, Notifier};
use fleet_domain::model::Fleet;
use fleet_domain::service::{summarize, FleetSummary, ParseMode};
use fleet_infra::chart_renderer::{render_charts, ChartPaths};
use fleet_infra::csv_export::export_csv;
use fleet_infra::excel_export::export_to_excel;
use fleet_types::{Error, Result};
use tracing::{debug, error, info};

use super::pipeline::{email_summary, load_fleet};

pub const EMAIL_SENT_MESSAGE: &str = "Email sent successfully!";
pub const EMAIL_FAILED_MESSAGE: &str = "Failed to send email. Please try again later.";

/// Outcome of a successful finalize action
#[derive(Debug, Clone, PartialEq)]
pub struct Finalized {
    pub summary: FleetSummary,
    pub charts: Option<ChartPaths>,
}

pub struct Session<G: EmailGateway, N: Notifier> {
    fleet: Fleet,
    parse_mode: ParseMode,
    gateway: G,
    notifier: N,
}

impl<G: EmailGateway, N: Notifier> Session<G, N> {
    pub fn new(gateway: G, notifier: N, parse_mode: ParseMode) -> Self {
        Self {
            fleet: Fleet::new(),
            parse_mode,
            gateway,
            notifier,
        }
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Replace the fleet with the contents of `path`
    ///
    /// No path means nothing was selected and the call is a no-op. On
    /// failure the previous fleet stays in place.
    pub async fn upload(&mut self, path: Option<&Path>) -> Result<usize> {
        let Some(path) = path else {
            debug!("upload without a file; ignoring");
            return Ok(0);
        };
        let fleet = self.report(load_fleet(path, self.parse_mode).await)?;
        self.fleet = fleet;
        Ok(self.fleet.len())
    }

    /// Compute the aggregates and, when `chart_dir` is given, draw the charts
    pub fn finalize(&self, chart_dir: Option<&Path>) -> Result<Finalized> {
        if self.fleet.is_empty() {
            self.notifier.alert(&Error::NoVehicles.to_string());
            return Err(Error::NoVehicles);
        }
        let summary = self.report(summarize(&self.fleet))?;
        let charts = self.report(
            chart_dir
                .map(|dir| render_charts(&self.fleet, dir))
                .transpose(),
        )?;
        Ok(Finalized { summary, charts })
    }

    pub async fn send_email(&self, to_email: &str) -> Result<()> {
        match email_summary(&self.gateway, &self.fleet, to_email).await {
            Ok(()) => {
                self.notifier.info(EMAIL_SENT_MESSAGE);
                Ok(())
            }
            Err(e @ (Error::MissingEmailAddress | Error::NoVehicles)) => {
                self.notifier.alert(&e.to_string());
                Err(e)
            }
            Err(e) => {
                error!(error = %e, "email sending failed");
                self.notifier.alert(EMAIL_FAILED_MESSAGE);
                Err(e)
            }
        }
    }

    pub fn download_csv(&self, output_dir: &Path) -> Result<PathBuf> {
        let path = self.report(export_csv(&self.fleet, output_dir))?;
        self.notifier.info(&format!("Saved {}", path.display()));
        Ok(path)
    }

    pub fn download_excel(&self, output_dir: &Path) -> Result<PathBuf> {
        let path = self.report(export_to_excel(&self.fleet, output_dir))?;
        self.notifier.info(&format!("Saved {}", path.display()));
        Ok(path)
    }

    fn report<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            info!(error = %e, "session action failed");
            self.notifier.alert(&e.to_string());
        }
        result
    }
}
