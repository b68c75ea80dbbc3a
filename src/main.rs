use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use grid_connect::config::AppConfig;
use grid_connect::engine::Engine;
use grid_connect::persistence::FileStore;
use grid_connect::ui::App;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

/// Play four-in-a-row on a grid in the terminal.
#[derive(Parser)]
#[command(name = "grid-connect", about = "Two-player four-in-a-row on a grid")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the snapshot file
    #[arg(long)]
    save_file: Option<PathBuf>,

    /// Resume from the saved snapshot at startup
    #[arg(long)]
    load: bool,

    /// Where log output goes (the terminal is taken by the UI)
    #[arg(long, default_value = "grid_connect.log")]
    log_file: PathBuf,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    init_logging(&cli.log_file)?;

    // Load configuration
    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(save_file) = cli.save_file {
        app_config.persistence.save_file = save_file;
    }

    let store = FileStore::new(&app_config.persistence.save_file);
    let mut engine = Engine::new(app_config.game.clone(), store);
    if cli.load {
        engine.load().with_context(|| {
            format!(
                "loading saved game from {}",
                app_config.persistence.save_file.display()
            )
        })?;
    }

    run(App::new(engine)).context("running terminal UI")
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn run(mut app: App<FileStore>) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal even if the app failed
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
