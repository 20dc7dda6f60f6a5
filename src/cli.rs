//! Command-line interface definitions.
//!
//! Uses clap derive API for argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::Format;

/// Upcoming volunteer events on a map, from your terminal.
#[derive(Parser, Debug)]
#[command(name = "eventmap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Command,

    /// Settings file (TOML)
    #[arg(long, short = 'c', global = true, env = "EVENTMAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    pub quiet: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load upcoming events and show the map
    Show(ShowArgs),

    /// Load the map and tap the marker of one event
    Tap(TapArgs),

    /// Tap the log-out button
    Logout(LogoutArgs),

    /// Tap the create-event button (not available yet)
    Create,

    /// Serve an events file as a development backend
    Serve(ServeArgs),
}

/// Where the event list comes from.
#[derive(Parser, Debug)]
pub struct EndpointArgs {
    /// Event list URL (overrides the settings file)
    #[arg(long, env = "EVENTMAP_ENDPOINT")]
    pub endpoint: Option<String>,
}

/// Arguments for the `show` command.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub source: EndpointArgs,

    /// Output format
    #[arg(long, short = 'f', default_value = "human", value_parser = parse_format)]
    pub format: Format,
}

/// Arguments for the `tap` command.
#[derive(Parser, Debug)]
pub struct TapArgs {
    /// ID of the event whose marker is tapped
    pub event_id: String,

    #[command(flatten)]
    pub source: EndpointArgs,

    /// Output format
    #[arg(long, short = 'f', default_value = "human", value_parser = parse_format)]
    pub format: Format,
}

/// Arguments for the `logout` command.
#[derive(Parser, Debug)]
pub struct LogoutArgs {
    /// Directory holding the persisted session (overrides the settings file)
    #[arg(long, env = "EVENTMAP_SESSION_DIR")]
    pub session_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', default_value = "human", value_parser = parse_format)]
    pub format: Format,
}

/// Arguments for the `serve` command.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// JSON file with the event array
    #[arg(long, short = 'e')]
    pub events: PathBuf,

    /// Port to listen on
    #[arg(long, short = 'p', default_value = "3333")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,
}

/// Parse an output format from string.
fn parse_format(s: &str) -> Result<Format, String> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_tap_args() {
        let cli = Cli::try_parse_from([
            "eventmap",
            "tap",
            "7",
            "--endpoint",
            "http://h:1/events",
            "-f",
            "json",
        ])
        .unwrap();
        let Command::Tap(args) = cli.command else {
            panic!("expected tap");
        };
        assert_eq!(args.event_id, "7");
        assert_eq!(args.source.endpoint.as_deref(), Some("http://h:1/events"));
        assert_eq!(args.format, Format::Json);
    }
}
