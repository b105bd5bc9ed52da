use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use settings_tree::config::{self, Config};
use settings_tree::loader::{self, ScreenDescription};
use settings_tree::node::outline;
use settings_tree::settings::Settings;
use settings_tree::storage::{shared, TomlFileStorage};
use settings_tree::tui;

// Default Configuration Constants
/// Default log level when not specified
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log file path (no logging to file)
const DEFAULT_LOG_FILE: &str = "/dev/null";

#[derive(Parser)]
#[command(name = "settings-tree")]
#[command(
    about = "Declarative settings browser",
    long_about = "Declarative settings browser\n\nIf no command is specified, the program starts in interactive mode."
)]
struct Cli {
    /// Set log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, global = true, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Log file path (default: /dev/null for no logging)
    #[arg(short = 'F', long, global = true, default_value = DEFAULT_LOG_FILE)]
    log_file: String,

    /// Tree description file (default: the bundled demo tree)
    #[arg(short = 't', long, global = true)]
    tree: Option<PathBuf>,

    /// Values file (default: values.toml under the XDG data home)
    #[arg(short = 's', long, global = true)]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the settings tree with current values
    Show,
    /// Print every stored value
    Values,
    /// Display current configuration
    Config,
}

fn init_logging(log_level: &str, log_file: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", log_file, e);
            return;
        }
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Resolve log configuration from CLI args and config file
/// CLI arguments take precedence over config file
fn resolve_log_config<'a>(cli: &'a Cli, config: &'a Config) -> (&'a str, &'a str) {
    let log_level = if cli.log_level != DEFAULT_LOG_LEVEL {
        cli.log_level.as_str()
    } else {
        config.log_level.as_str()
    };

    let log_file = if cli.log_file != DEFAULT_LOG_FILE {
        cli.log_file.as_str()
    } else {
        config.log_file.as_str()
    };

    (log_level, log_file)
}

/// Tree description from the CLI, the config file, or the bundled demo
fn load_tree(cli: &Cli, config: &Config) -> Result<ScreenDescription> {
    let path = cli
        .tree
        .clone()
        .or_else(|| config.tree_file.as_ref().map(PathBuf::from));
    match path {
        Some(path) => loader::read_tree(&path),
        None => loader::parse_tree(loader::DEMO_TREE).context("Failed to parse the demo tree"),
    }
}

fn storage_path(cli: &Cli, config: &Config) -> Result<PathBuf> {
    cli.storage
        .clone()
        .or_else(|| config.storage_path())
        .context("Unable to determine the values file location")
}

fn open_storage(path: &Path) -> Result<TomlFileStorage> {
    TomlFileStorage::open(path).with_context(|| format!("Failed to open values file {}", path.display()))
}

/// Handle the config command - display current configuration
fn handle_config_command(config: &Config) {
    let (path_str, exists) = match config::get_config_path() {
        Some(path) => {
            let exists = path.exists();
            (path.display().to_string(), exists)
        }
        None => ("Unable to determine config path".to_string(), false),
    };

    println!("Configuration File: {} (Exists: {})", path_str, if exists { "yes" } else { "no" });
    println!();
    println!("Current Configuration:");
    println!("=====================");
    println!("log_level: {}", config.log_level);
    println!("log_file: {}", config.log_file);
    println!("tree_file: {}", config.tree_file.as_deref().unwrap_or("(bundled demo)"));
    println!(
        "storage_file: {}",
        config
            .storage_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(unavailable)".to_string())
    );
    println!();
    println!("[theme]");
    println!("selection_fg: {:?}", config.theme.selection_fg);
    println!(
        "header_fg: {:?}{}",
        config.theme.header_fg(),
        if config.theme.header_fg.is_none() { " (auto: 30% darker)" } else { "" }
    );
    println!("use_unicode: {}", config.theme.use_unicode);
}

fn handle_show_command(cli: &Cli, config: &Config) -> Result<()> {
    let tree = load_tree(cli, config)?;
    let storage = open_storage(&storage_path(cli, config)?)?;
    let settings = Settings::from_screen(shared(storage), tree.build(None)?);
    for line in outline(settings.main()) {
        println!("{}", line);
    }
    Ok(())
}

fn handle_values_command(cli: &Cli, config: &Config) -> Result<()> {
    let storage = open_storage(&storage_path(cli, config)?)?;
    println!("Values File: {}", storage.path().display());
    println!();
    if storage.values().is_empty() {
        println!("(no stored values)");
    }
    for (key, value) in storage.values() {
        println!("{} = {}", key, value);
    }
    Ok(())
}

async fn run_tui_mode(cli: &Cli, config: Config) -> Result<()> {
    let tree = load_tree(cli, &config)?;
    let storage = open_storage(&storage_path(cli, &config)?)?;
    tracing::info!("STORAGE: Using {}", storage.path().display());
    tui::run(config, tree, shared(storage)).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = config::read();
    let cli = Cli::parse();

    // Resolve and initialize logging
    let (log_level, log_file) = resolve_log_config(&cli, &config);
    if log_file != DEFAULT_LOG_FILE {
        init_logging(log_level, log_file);
    }

    let result = match &cli.command {
        None => run_tui_mode(&cli, config.clone()).await,
        Some(Commands::Config) => {
            handle_config_command(&config);
            Ok(())
        }
        Some(Commands::Show) => handle_show_command(&cli, &config),
        Some(Commands::Values) => handle_values_command(&cli, &config),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        tracing::error!("Command failed: {:#}", e);
        std::process::exit(1);
    }
}
