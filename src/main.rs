//! user-manager binary entry point.
//!
//! Parses the command line, sets up file logging, opens the store, and runs
//! the TUI event loop, restoring the terminal state on exit.
//!
use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use user_manager::Result;
use user_manager::app::{self, AppState, Theme, keymap::Keymap, update::CrosstermEvents};
use user_manager::config::{self, Cli};
use user_manager::data::UserService;
use user_manager::store::{SqliteStore, UserStore};

fn init_logging(cli: &Cli) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&cli.log_file)
        .with_context(|| format!("open log file {}", cli.log_file.display()))?;
    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .init();
    Ok(())
}

fn open_store(cli: &Cli) -> Result<Box<dyn UserStore>> {
    let store = if cli.in_memory {
        SqliteStore::open_in_memory().context("open in-memory database")?
    } else {
        SqliteStore::open(&cli.db).with_context(|| format!("open database {}", cli.db.display()))?
    };
    Ok(Box::new(store))
}

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config_dir = cli.resolved_config_dir();
    if let Err(e) = fs::create_dir_all(&config_dir) {
        error!(dir = %config_dir.display(), error = %e, "could not create config directory");
    }
    let theme = Theme::load_or_init(&config::theme_path(&config_dir));
    let keymap = Keymap::load_or_init(&config::keybinds_path(&config_dir));

    let service = UserService::new(open_store(&cli)?);
    let mut state = AppState::new(service, theme, keymap);
    info!("starting user-manager");

    let mut terminal = init_terminal().context("init terminal")?;
    let res = app::run(&mut terminal, &mut state, &mut CrosstermEvents);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        error!(error = %err, "application error");
        eprintln!("application error: {err:#}");
    }
    Ok(())
}
