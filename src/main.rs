//! eventmap - upcoming volunteer events on a map, from your terminal.
//!
//! Loads the event list once, keeps the events that have not started yet,
//! fits the map around them and reacts to marker and button taps.

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error, info};

use eventmap::cli::{self, Cli, Command};
use eventmap::client::EventsClient;
use eventmap::config::Settings;
use eventmap::dispatcher::{Action, ActionDispatcher};
use eventmap::navigation::NavigationStack;
use eventmap::screen::{EventsMap, LoadOutcome};
use eventmap::session::{AuthContext, FileSessionStore};
use eventmap::{loader, output, server};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    init_tracing(cli.verbose, cli.quiet);

    let settings = Settings::load(cli.config.as_deref()).context("failed to load settings")?;

    let runtime = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;

    match cli.command {
        Command::Show(args) => runtime.block_on(cmd_show(args, settings)),
        Command::Tap(args) => runtime.block_on(cmd_tap(args, settings)),
        Command::Logout(args) => runtime.block_on(cmd_logout(args, settings)),
        Command::Create => runtime.block_on(cmd_create(settings)),
        Command::Serve(args) => runtime.block_on(cmd_serve(args)),
    }
}

/// Initialize tracing subscriber.
fn init_tracing(verbose: bool, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Mount the map screen and run its load.
async fn open_map(source: cli::EndpointArgs, settings: Settings) -> Result<EventsMap> {
    let endpoint = source.endpoint.unwrap_or(settings.endpoint);
    let client = EventsClient::new(endpoint).context("failed to create events client")?;
    debug!("loading events from {}", client.endpoint());

    let mut screen = EventsMap::new(settings.map);
    if let LoadOutcome::Applied { shown } = loader::mount_and_load(&mut screen, client).await {
        debug!("map populated with {shown} events");
    }
    Ok(screen)
}

/// Execute the `show` command - load and render the map once.
async fn cmd_show(args: cli::ShowArgs, settings: Settings) -> Result<()> {
    let screen = open_map(args.source, settings).await?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    output::write_scene(&mut handle, &screen.scene(), args.format)?;

    Ok(())
}

/// Execute the `tap` command - tap one marker on the loaded map.
async fn cmd_tap(args: cli::TapArgs, settings: Settings) -> Result<()> {
    let session_dir = settings.session_dir()?;
    let mut screen = open_map(args.source, settings).await?;

    let store = FileSessionStore::new(&session_dir);
    let auth = AuthContext::restore(&store).await?;
    let mut dispatcher = ActionDispatcher::new(store, auth, NavigationStack::new());

    // Taps on markers that are not on the map do nothing
    if screen.is_rendered(&args.event_id) {
        dispatcher
            .dispatch(Action::MarkerTapped(args.event_id))
            .await?;
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match dispatcher.navigator().current() {
        Some(route) => output::write_route(&mut handle, route, args.format)?,
        None => output::write_scene(&mut handle, &screen.scene(), args.format)?,
    }

    screen.unmount();
    Ok(())
}

/// Execute the `logout` command - tap the log-out button.
async fn cmd_logout(args: cli::LogoutArgs, settings: Settings) -> Result<()> {
    let session_dir = match args.session_dir {
        Some(dir) => dir,
        None => settings.session_dir()?,
    };

    let store = FileSessionStore::new(&session_dir);
    let auth = AuthContext::restore(&store)
        .await
        .context("failed to read session")?;
    if !auth.is_signed_in() {
        info!("no active session in {}", store.path().display());
    }

    let mut dispatcher = ActionDispatcher::new(store, auth, NavigationStack::new());
    dispatcher
        .dispatch(Action::LogOutTapped)
        .await
        .context("failed to log out")?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Some(route) = dispatcher.navigator().current() {
        output::write_route(&mut handle, route, args.format)?;
    }

    Ok(())
}

/// Execute the `create` command - tap the create-event button.
async fn cmd_create(settings: Settings) -> Result<()> {
    let store = FileSessionStore::new(&settings.session_dir()?);
    let auth = AuthContext::restore(&store).await?;
    let mut dispatcher = ActionDispatcher::new(store, auth, NavigationStack::new());
    dispatcher.dispatch(Action::CreateEventTapped).await?;

    if dispatcher.navigator().current().is_none() {
        eprintln!("Creating events is not available yet");
    }
    Ok(())
}

/// Execute the `serve` command - run the development backend.
async fn cmd_serve(args: cli::ServeArgs) -> Result<()> {
    let config = server::ServerConfig {
        port: args.port,
        host: args.host,
        events_file: args.events,
    };

    server::run_server(config).await
}
