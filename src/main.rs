//! quicklang - system language picker
//!
//! Runs the language menu in the terminal, or manages favorites and the
//! system language from the command line.

use std::fs::OpenOptions;
use std::io::stdout;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use crossterm::{
    event::{self, Event},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::{Backend, CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use quicklang::app::{App, Flow};
use quicklang::catalog::Catalog;
use quicklang::favorites::{FavoritesStore, Toggle};
use quicklang::input::ButtonSet;
use quicklang::platform::{Platform, RebootMode, SystemPlatform};
use quicklang::settings::Settings;

/// Input sampling period
const TICK: Duration = Duration::from_millis(50);

#[derive(Parser)]
#[command(name = "quicklang")]
#[command(version = "0.1.0")]
#[command(about = "Switch the system language, with favorites", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Settings file (default: <config dir>/quicklang/settings.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding quicklang/config.json
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Rows visible in the menu
    #[arg(long, global = true)]
    window: Option<usize>,

    /// What happens when a reboot is confirmed
    #[arg(long, value_enum, global = true)]
    reboot: Option<RebootMode>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the language menu (default)
    Run,

    /// List languages with favorite and current markers
    #[command(visible_alias = "ls")]
    List,

    /// Add or remove a favorite by language id
    Toggle {
        /// Language id
        #[arg(allow_hyphen_values = true)]
        id: i32,
    },

    /// Show the current system language
    Current,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = load_settings(&cli)?;
    let command = cli.command.unwrap_or(Commands::Run);
    let tui = matches!(command, Commands::Run);

    init_logging(cli.verbose, tui, &settings)?;

    if let Err(e) = settings.validate() {
        warn!("{}; using defaults for invalid values", e);
        settings = settings.with_defaults_for_invalid();
    }

    let catalog = Catalog::default();
    let store = FavoritesStore::new(&settings.data_dir);
    let platform = SystemPlatform::new(&settings.data_dir, settings.reboot);

    match command {
        Commands::Run => run_menu(App::new(catalog, store, settings.window_size, platform)),
        Commands::List => list(&catalog, &store, &platform),
        Commands::Toggle { id } => toggle(&catalog, &store, id),
        Commands::Current => current(&catalog, &platform),
    }
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let path = cli.config.clone().unwrap_or_else(Settings::default_path);
    let mut settings = Settings::load(&path)
        .with_context(|| format!("Failed to load settings from {}", path.display()))?;

    if let Some(dir) = &cli.data_dir {
        settings.data_dir = dir.clone();
    }
    if let Some(window) = cli.window {
        settings.window_size = window;
    }
    if let Some(reboot) = cli.reboot {
        settings.reboot = reboot;
    }
    Ok(settings)
}

fn init_logging(verbose: bool, tui: bool, settings: &Settings) -> Result<()> {
    let default = if verbose { "quicklang=debug" } else { "quicklang=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    if !tui {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return Ok(());
    }

    // The menu owns the terminal; logs go to a file or nowhere
    match &settings.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::sink)
                .init();
        }
    }
    Ok(())
}

fn run_menu<P: Platform>(mut app: App<P>) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = menu_loop(&mut terminal, &mut app);

    // Restore the terminal even when the loop failed
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    info!("Menu closed");
    result
}

fn menu_loop<B: Backend, P: Platform>(terminal: &mut Terminal<B>, app: &mut App<P>) -> Result<()> {
    loop {
        terminal.draw(|f| quicklang::ui::draw(f, app))?;

        // Terminal key events are presses, not held state
        let mut keys = Vec::new();
        if event::poll(TICK)? {
            loop {
                if let Event::Key(key) = event::read()? {
                    keys.push(key);
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        if app.handle_pressed(ButtonSet::from_key_presses(keys)) == Flow::Exit {
            return Ok(());
        }
    }
}

fn list(catalog: &Catalog, store: &FavoritesStore, platform: &impl Platform) -> Result<()> {
    let favorites = store.load();
    let current = platform.current_language()?;

    for (i, lang) in catalog.iter().enumerate() {
        let star = if favorites.contains(lang.id) {
            "*".yellow().bold()
        } else {
            " ".normal()
        };
        let line = format!("{:>2}  {:>3}  {}", i, lang.id, lang.name);
        if lang.id == current {
            println!("{} {} {}", star, line.green().bold(), "(current)".dimmed());
        } else {
            println!("{} {}", star, line);
        }
    }

    let unknown: Vec<String> = favorites
        .iter()
        .filter(|&id| catalog.index_of(id).is_none())
        .map(|id| id.to_string())
        .collect();
    if !unknown.is_empty() {
        println!("{} {}", "Favorites not in catalog:".dimmed(), unknown.join(", "));
    }
    Ok(())
}

fn toggle(catalog: &Catalog, store: &FavoritesStore, id: i32) -> Result<()> {
    let name = catalog.name_of(id).unwrap_or("unknown language");
    if catalog.index_of(id).is_none() {
        warn!("Language id {} is not in the catalog", id);
    }

    let mut favorites = store.load();
    match store.toggle(&mut favorites, id) {
        Toggle::Added => println!("{} {} ({})", "Added".green().bold(), name, id),
        Toggle::Removed => println!("{} {} ({})", "Removed".yellow().bold(), name, id),
        Toggle::Unchanged => println!(
            "{} favorites are full, {} ({}) not added",
            "Skipped:".red().bold(),
            name,
            id
        ),
    }
    Ok(())
}

fn current(catalog: &Catalog, platform: &impl Platform) -> Result<()> {
    let id = platform.current_language()?;
    match catalog.name_of(id) {
        Some(name) => println!("{} ({})", name.bold(), id),
        None => println!("{} ({})", "unknown".dimmed(), id),
    }
    Ok(())
}
