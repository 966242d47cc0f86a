use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use dsa_visualizer::{Category, Config, Controller, TimerSet};

mod app;
mod handler;
mod tui;
mod ui;

use app::App;
use tui::EventHandler;

#[derive(Parser)]
#[command(name = "dsa-visualizer")]
#[command(version, about = "Landing page for learning data structures and algorithms")]
struct Cli {
    /// Go straight to the catalog without the robot intro
    #[arg(long)]
    skip_intro: bool,
    /// Config file (defaults to <config dir>/dsa-visualizer/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Start with the catalog filtered to a category (sorting, searching, trees, graphs)
    #[arg(long)]
    category: Option<String>,
    /// Log file (defaults to <config dir>/dsa-visualizer/dsa-visualizer.log)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Log to a file; the terminal belongs to the UI. Filter via `DSA_LOG`.
fn init_logging(path: Option<&Path>) {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match Config::config_dir() {
            Ok(dir) => dir.join("dsa-visualizer.log"),
            Err(_) => return,
        },
    };

    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("DSA_LOG").unwrap_or_else(|_| "dsa_visualizer=info".into()),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn load_config(path: Option<&Path>) -> Config {
    let loaded = match path {
        Some(p) => Config::load_from(p),
        None => Config::load(),
    };
    loaded.unwrap_or_else(|e| {
        warn!(error = %e, "falling back to default config");
        Config::new()
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_file.as_deref());
    let config = load_config(cli.config.as_deref());
    info!(skip_intro = cli.skip_intro || config.skip_intro, "starting");

    let (timers, timer_rx) = TimerSet::channel();
    let mut controller = Controller::new(&config);
    if let Some(name) = cli.category.as_deref() {
        match Category::from_str(name) {
            Some(category) => controller.set_category(category),
            None => warn!(name, "unknown category, showing all"),
        }
    }
    let mut app = App::new(controller, timers);
    let mut events = EventHandler::new(timer_rx);

    tui::install_panic_hook();
    let mut terminal = tui::init().context("setting up terminal")?;

    app.start(cli.skip_intro || config.skip_intro);
    let result = run(&mut app, &mut terminal, &mut events).await;

    tui::restore()?;
    result?;

    if let Some(target) = app.navigation {
        println!("Taking you to {} ... Happy learning! 🚀", target);
    }
    Ok(())
}

async fn run(app: &mut App, terminal: &mut tui::Tui, events: &mut EventHandler) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event),
            None => break,
        }
    }
    Ok(())
}
