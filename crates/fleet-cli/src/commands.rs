//! Command handlers

use std::path::{Path, PathBuf};

use fleet_app::app::{email_summary, load_fleet, Session, EMAIL_SENT_MESSAGE};
use fleet_app::config::Config;
use fleet_domain::service::{summarize, ParseMode};
use fleet_infra::chart_renderer::render_charts;
use fleet_infra::csv_export::export_csv;
use fleet_infra::emailjs::EmailJsGateway;
use fleet_infra::excel_export::export_to_excel;
use fleet_types::{Error, Result};

use crate::cli::{Cli, Commands, OutputFormat};
use crate::interactive::run_session;
use crate::notifier::TerminalNotifier;
use crate::output::{output_analysis, print_charts};

pub async fn execute(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let output_format = cli.format.unwrap_or(config.output_format);

    match cli.command {
        Commands::Analyze {
            file,
            charts,
            no_charts,
            strict,
        } => {
            let chart_dir = if no_charts {
                None
            } else {
                Some(charts.unwrap_or_else(|| config.output_dir()))
            };
            cmd_analyze(file, chart_dir, parse_mode(&config, strict), output_format).await
        }

        Commands::Export {
            file,
            output,
            excel,
            strict,
        } => {
            let output_dir = output.unwrap_or_else(|| config.output_dir());
            cmd_export(file, output_dir, excel, parse_mode(&config, strict)).await
        }

        Commands::Email {
            file,
            to,
            public_key,
            strict,
        } => {
            let mut config = config;
            if public_key.is_some() {
                config.email_public_key = public_key;
            }
            let mode = parse_mode(&config, strict);
            cmd_email(&config, file, to, mode).await
        }

        Commands::Session { output } => {
            let output_dir = output.unwrap_or_else(|| config.output_dir());
            cmd_session(&config, output_dir).await
        }

        Commands::Config {
            show,
            set_service_id,
            set_template_id,
            set_public_key,
            set_endpoint,
            set_output_dir,
            set_output,
            set_strict,
            reset,
        } => cmd_config(
            show,
            set_service_id,
            set_template_id,
            set_public_key,
            set_endpoint,
            set_output_dir,
            set_output,
            set_strict,
            reset,
        ),
    }
}

fn parse_mode(config: &Config, strict: bool) -> ParseMode {
    if strict {
        ParseMode::Strict
    } else {
        config.parse_mode()
    }
}

fn check_exists(file: &Path) -> Result<()> {
    if !file.exists() {
        return Err(Error::FileNotFound(format!(
            "Input file not found: {}",
            file.display()
        )));
    }
    Ok(())
}

async fn cmd_analyze(
    file: PathBuf,
    chart_dir: Option<PathBuf>,
    mode: ParseMode,
    output_format: OutputFormat,
) -> Result<()> {
    check_exists(&file)?;
    let fleet = load_fleet(&file, mode).await?;
    if fleet.is_empty() {
        return Err(Error::NoVehicles);
    }

    let summary = summarize(&fleet)?;
    output_analysis(output_format, &fleet, &summary)?;

    if let Some(dir) = chart_dir {
        let charts = render_charts(&fleet, &dir)?;
        if output_format == OutputFormat::Table {
            print_charts(&charts);
        }
    }
    Ok(())
}

async fn cmd_export(file: PathBuf, output_dir: PathBuf, excel: bool, mode: ParseMode) -> Result<()> {
    check_exists(&file)?;
    let fleet = load_fleet(&file, mode).await?;

    let csv_path = export_csv(&fleet, &output_dir)?;
    println!("Exported {} vehicles to {}", fleet.len(), csv_path.display());

    if excel {
        let xlsx_path = export_to_excel(&fleet, &output_dir)?;
        println!("Exported Excel workbook to {}", xlsx_path.display());
    }
    Ok(())
}

async fn cmd_email(config: &Config, file: PathBuf, to: String, mode: ParseMode) -> Result<()> {
    if to.trim().is_empty() {
        return Err(Error::MissingEmailAddress);
    }
    check_exists(&file)?;
    let fleet = load_fleet(&file, mode).await?;

    let gateway = EmailJsGateway::new(config.email_settings())?;
    email_summary(&gateway, &fleet, &to).await?;
    println!("{}", EMAIL_SENT_MESSAGE);
    Ok(())
}

async fn cmd_session(config: &Config, output_dir: PathBuf) -> Result<()> {
    let gateway = EmailJsGateway::new(config.email_settings())?;
    let mut session = Session::new(gateway, TerminalNotifier, config.parse_mode());
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    run_session(&mut session, stdin, &output_dir).await
}

#[allow(clippy::too_many_arguments)]
fn cmd_config(
    show: bool,
    set_service_id: Option<String>,
    set_template_id: Option<String>,
    set_public_key: Option<String>,
    set_endpoint: Option<String>,
    set_output_dir: Option<PathBuf>,
    set_output: Option<OutputFormat>,
    set_strict: Option<bool>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(service_id) = set_service_id {
        config.email_service_id = service_id;
        modified = true;
    }

    if let Some(template_id) = set_template_id {
        config.email_template_id = template_id;
        modified = true;
    }

    if let Some(public_key) = set_public_key {
        config.email_public_key = Some(public_key).filter(|k| !k.is_empty());
        modified = true;
    }

    if let Some(endpoint) = set_endpoint {
        config.email_endpoint = endpoint;
        modified = true;
    }

    if let Some(dir) = set_output_dir {
        config.output_dir = Some(dir);
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(strict) = set_strict {
        config.strict_numbers = strict;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
