use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use store_creator::app::App;
use store_creator::config::Config;
use store_creator::{logging, ui};

/// Provision mock Shopify Hydrogen storefronts from the terminal
#[derive(Parser, Debug)]
#[command(name = "store-creator", version, about)]
struct Args {
    /// Config file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Multiplier for simulated backend latency; 0 makes calls instant
    #[arg(long)]
    latency_scale: Option<f64>,

    /// Do not write a log file
    #[arg(long)]
    no_log: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

const TICK: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(scale) = args.latency_scale {
        config.latency_scale = scale.max(0.0);
    }

    if args.dump_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let _log_guard = if args.no_log {
        None
    } else {
        Some(logging::init(&config.log_dir)?)
    };
    tracing::info!(version = store_creator::VERSION, "store-creator starting");

    let mut app = App::new(config)?;

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Background tasks run on the runtime's workers while this loop blocks on input
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "exited with error");
    }
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        app.poll_background();
        terminal.draw(|frame| ui::render(app, frame))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    ui::handle_key(app, key)?;
                }
            }
        }

        if app.should_quit {
            tracing::info!("store-creator exiting");
            return Ok(());
        }
    }
}
