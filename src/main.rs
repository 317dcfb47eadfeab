//! Deckbench - Terminal-based input-deck simulator
//!
//! This application simulates a hardware input deck (key grid, encoders,
//! round keys, touchscreens) from a declarative descriptor, captures
//! pointer gestures on the simulated surface, and relays each completed
//! gesture to a companion backend.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use deckbench::config::Config;
use deckbench::constants::APP_BINARY_NAME;
use deckbench::export::export_deck;
use deckbench::models::Deck;
use deckbench::parser::load_descriptor;
use deckbench::router::{EventRouter, LogTransport, Transport, UdpTransport};
use deckbench::services::{build_deck, resolve_background_path, BackgroundLoad};

/// Deckbench - Terminal-based input-deck simulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to deck descriptor file (YAML or JSON)
    #[arg(value_name = "FILE")]
    descriptor: PathBuf,

    /// Print the exported geometry record as JSON and exit
    #[arg(long)]
    export: bool,

    /// Route events as UDP datagrams to this backend address
    #[arg(long, value_name = "ADDR")]
    udp: Option<String>,

    /// Assets directory overriding the configured one
    #[arg(long, value_name = "PATH")]
    assets: Option<PathBuf>,

    /// Run the relay API on this address instead of the terminal surface
    #[cfg(feature = "web")]
    #[arg(long, value_name = "ADDR")]
    listen: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !cli.descriptor.exists() {
        eprintln!("Error: Descriptor not found: {}", cli.descriptor.display());
        eprintln!();
        eprintln!("Please provide a valid path to a deck descriptor.");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  {} virtual-live.yaml", APP_BINARY_NAME);
        eprintln!("  {} decks/xtouch-mini.json --export", APP_BINARY_NAME);
        std::process::exit(1);
    }

    // Load or create default config
    let config = Config::load().unwrap_or_else(|_| Config::default());

    let descriptor = load_descriptor(&cli.descriptor)?;
    let deck = build_deck(&descriptor)?;

    if cli.export {
        let record = export_deck(&deck);
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    #[cfg(feature = "web")]
    if let Some(listen) = cli.listen.as_deref() {
        return run_relay(deck, listen);
    }

    // Select the event transport: explicit UDP target, configured one, or
    // tracing as the fallback reporter.
    let transport: Box<dyn Transport> = match cli
        .udp
        .as_deref()
        .or(config.relay.udp_target.as_deref())
    {
        Some(target) => Box::new(UdpTransport::connect(target)?),
        None => Box::new(LogTransport),
    };
    let router = EventRouter::new(deck.name.clone(), transport);

    // Kick off the background image load; the surface never waits for it.
    let assets_dir = cli.assets.clone().unwrap_or_else(|| config.assets_dir());
    let background = BackgroundLoad::start(resolve_background_path(
        &assets_dir,
        &descriptor.background.image,
    ));

    run_surface(deck, router, background, &config)
}

/// Runs the interactive terminal surface.
#[cfg(feature = "ratatui")]
fn run_surface(
    deck: Deck,
    router: EventRouter,
    background: BackgroundLoad,
    config: &Config,
) -> Result<()> {
    let mut terminal = deckbench::tui::setup_terminal()?;
    let mut app_state = deckbench::tui::AppState::new(deck, router, background, config);

    let result = deckbench::tui::run_tui(&mut app_state, &mut terminal);

    deckbench::tui::restore_terminal(terminal)?;
    result
}

/// Placeholder when the terminal surface is compiled out.
#[cfg(not(feature = "ratatui"))]
fn run_surface(
    _deck: Deck,
    _router: EventRouter,
    _background: BackgroundLoad,
    _config: &Config,
) -> Result<()> {
    anyhow::bail!("built without the ratatui feature; use --export or --listen")
}

/// Runs the relay API instead of the terminal surface.
#[cfg(feature = "web")]
fn run_relay(deck: Deck, listen: &str) -> Result<()> {
    use anyhow::Context;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let addr: std::net::SocketAddr = listen
        .parse()
        .with_context(|| format!("Invalid listen address '{listen}'"))?;

    tokio::runtime::Runtime::new()
        .context("Failed to start async runtime")?
        .block_on(deckbench::web::run_server(deck, addr))
}
