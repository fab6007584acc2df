//! Passbook - Local Credential Book
//!
//! A vim-style TUI for website credentials with a built-in password
//! generator.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::task::LocalSet;

mod app;
mod input;
mod logging;
mod ui;

use passbook::{db, dialog, generator, store};

use app::{App, AppConfig};
use db::{Database, DatabaseConfig, KeyValueStore, MemoryStore};
use generator::GeneratorOptions;
use logging::LogConfig;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Store file path
    #[arg(short, long)]
    store: Option<PathBuf>,

    /// Keep entries in memory only
    #[arg(long, conflicts_with = "store")]
    ephemeral: bool,

    /// Log file path
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Default generated password length
    #[arg(short, long)]
    length: Option<String>,
}

impl Args {
    fn into_config(self) -> AppConfig {
        let mut config = AppConfig::default();
        if let Some(path) = self.store {
            config.store_path = path;
        }
        if let Some(path) = self.log_file {
            config.log_file = path;
        }
        if let Some(raw) = self.length {
            config.generator.set_length(GeneratorOptions::parse_length(&raw) as i64);
        }
        config.ephemeral = self.ephemeral;
        config
    }
}

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let debug = args.debug;
    let config = args.into_config();

    let log_config = if debug {
        LogConfig::debug(config.log_file.clone())
    } else {
        LogConfig::from_env(config.log_file.clone())
    };
    logging::init(&log_config)
        .with_context(|| format!("Failed to open log file {}", config.log_file.display()))?;

    let backend = open_backend(&config)?;
    let mut app = App::new(config, backend);

    let mut terminal = setup_terminal()?;
    let result = LocalSet::new().run_until(run_app(&mut terminal, &mut app)).await;
    restore_terminal(&mut terminal)?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "event loop failed");
    }
    result
}

fn open_backend(config: &AppConfig) -> Result<Box<dyn KeyValueStore>> {
    if config.ephemeral {
        return Ok(Box::new(MemoryStore::new()));
    }

    let db = Database::open(DatabaseConfig::with_path(&config.store_path))
        .with_context(|| format!("Failed to open store {}", config.store_path.display()))?;
    tracing::info!(path = %db.path().display(), "store opened");
    Ok(Box::new(db))
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        app.tick();
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key_event(key);
            }
        }

        // Let workflows waiting on the dialog observe the key
        tokio::task::yield_now().await;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_into_config() {
        let args = Args::parse_from(["passbook", "--store", "/tmp/book.db", "--length", "200"]);
        let config = args.into_config();

        assert_eq!(config.store_path, PathBuf::from("/tmp/book.db"));
        assert_eq!(config.generator.length(), generator::MAX_LENGTH);
        assert!(!config.ephemeral);
    }

    #[test]
    fn test_ephemeral_conflicts_with_store() {
        assert!(Args::try_parse_from(["passbook", "--ephemeral", "--store", "x.db"]).is_err());
        assert!(Args::parse_from(["passbook", "--ephemeral"]).into_config().ephemeral);
    }
}
