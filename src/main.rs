//! A terminal portfolio: scroll-driven marquee dividers between sections,
//! project cards that expand into a modal, a staged landing intro and a
//! spinning impossible cube.
//!
//! Run the binary to open the page.  Run with `--print-config` to dump the
//! effective configuration.

mod app;
mod config;
mod core;
mod ui;

use std::fs::File;
use std::io::{self, stdout, Stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tokio::time::MissedTickBehavior;
use tracing_subscriber::EnvFilter;

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
};
use crate::config::AppConfig;
use crate::core::clock::SystemClock;
use crate::core::content::{self, PROJECTS};

type Tui = Terminal<CrosstermBackend<Stdout>>;

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), version, about = "Terminal portfolio")]
struct Cli {
    /// Config file (defaults to `$XDG_CONFIG_HOME/folio/config.toml`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Go straight to the page.
    #[arg(long = "no-intro")]
    no_intro: bool,

    /// Shorten every animation.
    #[arg(long = "reduced-motion")]
    reduced_motion: bool,

    /// Frames per second.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(10..=240))]
    fps: u32,

    /// Write logs here instead of stderr.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Print the effective configuration and exit.
    #[arg(long = "print-config")]
    print_config: bool,
}

// ───────────────────────────────────────── tracing ───────────

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            let filter = EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("folio=debug"));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            // The UI owns stdout; logs only show up when RUST_LOG asks.
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .with_writer(io::stderr)
                .init();
        }
    }
    Ok(())
}

// ───────────────────────────────────────── terminal ──────────

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode().context("enabling raw mode")?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen, EnableMouseCapture)?;
    Ok(Terminal::new(CrosstermBackend::new(out))?)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

// ───────────────────────────────────────── event loop ────────

async fn run(terminal: &mut Tui, state: &mut AppState, fps: u32) -> Result<()> {
    let size = terminal.size()?;
    state.set_viewport(Rect::new(0, 0, size.width, size.height));

    let mut events = spawn_event_reader(Duration::from_millis(50));
    let mut frames = tokio::time::interval(Duration::from_secs_f64(1.0 / f64::from(fps)));
    // A slow frame drops ticks instead of replaying them back to back.
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;

            event = events.recv() => match event {
                Some(AppEvent::Key(key)) => handler::handle_key(state, key),
                Some(AppEvent::Mouse(mouse)) => handler::handle_mouse(state, mouse),
                Some(AppEvent::Resize(width, height)) => {
                    state.set_viewport(Rect::new(0, 0, width, height));
                }
                None => {
                    tracing::warn!("event reader gone, exiting");
                    state.should_quit = true;
                }
            },

            _ = frames.tick() => {
                state.on_frame();
                terminal.draw(|frame| ui::draw(frame, state))?;
            }
        }

        if state.should_quit {
            break;
        }
    }
    Ok(())
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let mut config = AppConfig::load(cli.config.as_deref());
    if cli.print_config {
        print!("{}", config.serialise());
        return Ok(());
    }
    content::validate(PROJECTS).context("invalid project data")?;

    // Flags win over the file for this run.
    config.skip_intro |= cli.no_intro;
    config.reduced_motion |= cli.reduced_motion;

    let mut state = AppState::new(config, SystemClock::shared());
    tracing::info!(fps = cli.fps, "starting");

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &mut state, cli.fps).await;

    // ── teardown ──────────────────────────────────────────────
    state.transition.teardown();
    tracing::debug!(
        acquired = state.scroll_lock.acquire_count(),
        released = state.scroll_lock.release_count(),
        "scroll lock balance at exit"
    );
    restore_terminal(&mut terminal)?;
    result
}
