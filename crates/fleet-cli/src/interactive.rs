//! Line-oriented interactive session
//!
//! Every input line is one user action against the same session.

use std::io::Write;
use std::path::{Path, PathBuf};

use fleet_app::app::Session;
use fleet_domain::gateway::{EmailGateway, Notifier};
use fleet_types::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::output::{print_charts, print_summary, print_vehicles};

const HELP: &str = "\
Commands:
  upload <file>   load a workbook, replacing the current vehicles
  list            show the loaded vehicles
  finalize        show the fleet summary and draw charts
  email <address> email the best/worst vehicle summary
  download        write vehicle_analysis.csv
  download-excel  write vehicle_analysis.xlsx
  help            show this help
  quit            leave the session";

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Upload(Option<PathBuf>),
    List,
    Finalize,
    Email(String),
    Download,
    DownloadExcel,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub fn parse_command(line: &str) -> SessionCommand {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    match verb.to_ascii_lowercase().as_str() {
        "" => SessionCommand::Empty,
        "upload" => SessionCommand::Upload(if rest.is_empty() {
            None
        } else {
            Some(PathBuf::from(rest))
        }),
        "list" => SessionCommand::List,
        "finalize" => SessionCommand::Finalize,
        "email" => SessionCommand::Email(rest.to_string()),
        "download" => SessionCommand::Download,
        "download-excel" => SessionCommand::DownloadExcel,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        other => SessionCommand::Unknown(other.to_string()),
    }
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

pub async fn run_session<G, N, R>(session: &mut Session<G, N>, input: R, output_dir: &Path) -> Result<()>
where
    G: EmailGateway,
    N: Notifier,
    R: AsyncBufRead + Unpin,
{
    println!("{}", HELP);
    let mut lines = input.lines();
    prompt();
    while let Some(line) = lines.next_line().await? {
        let command = parse_command(&line);
        debug!(?command, "session command");
        // failures were already reported by the session notifier
        match command {
            SessionCommand::Upload(path) => {
                if let Ok(count) = session.upload(path.as_deref()).await {
                    if path.is_some() {
                        println!("Loaded {} vehicles", count);
                        print_vehicles(session.fleet());
                    }
                }
            }
            SessionCommand::List => print_vehicles(session.fleet()),
            SessionCommand::Finalize => {
                if let Ok(finalized) = session.finalize(Some(output_dir)) {
                    print_summary(&finalized.summary);
                    if let Some(charts) = &finalized.charts {
                        print_charts(charts);
                    }
                }
            }
            SessionCommand::Email(address) => {
                let _ = session.send_email(&address).await;
            }
            SessionCommand::Download => {
                let _ = session.download_csv(output_dir);
            }
            SessionCommand::DownloadExcel => {
                let _ = session.download_excel(output_dir);
            }
            SessionCommand::Help => println!("{}", HELP),
            SessionCommand::Quit => break,
            SessionCommand::Empty => {}
            SessionCommand::Unknown(verb) => {
                session
                    .notifier()
                    .alert(&format!("Unknown command: {} (type 'help')", verb));
            }
        }
        prompt();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert_eq!(
            parse_command("upload data/fleet march.xlsx"),
            SessionCommand::Upload(Some(PathBuf::from("data/fleet march.xlsx")))
        );
        assert_eq!(parse_command("upload"), SessionCommand::Upload(None));
        assert_eq!(parse_command("  FINALIZE "), SessionCommand::Finalize);
        assert_eq!(
            parse_command("email ops@example.com"),
            SessionCommand::Email("ops@example.com".to_string())
        );
        assert_eq!(parse_command("email"), SessionCommand::Email(String::new()));
        assert_eq!(parse_command("download-excel"), SessionCommand::DownloadExcel);
        assert_eq!(parse_command(""), SessionCommand::Empty);
        assert_eq!(parse_command("exit"), SessionCommand::Quit);
        assert_eq!(parse_command("plot"), SessionCommand::Unknown("plot".to_string()));
    }
}
