//! myterm - run the terminal widget in a real terminal
//!
//! Hosts a [`myterm::Widget`] with crossterm: raw-mode input is mapped to
//! widget key events, the transcript is redrawn after every event, and the
//! widget's scheduler is driven from a tokio interval.

mod app;
mod demos;

use std::env;
use std::fs::File;
use std::path::PathBuf;
use std::process;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};

use myterm::{Config, ConfigLoader};

use app::App;
use demos::Demo;

/// Application configuration
#[derive(Debug, Default)]
struct AppArgs {
    /// Configuration file path
    config_path: Option<PathBuf>,
    /// Enable debug logging
    debug: bool,
    /// Log file path
    log_path: Option<PathBuf>,
    /// Demo to load
    demo: Demo,
}

impl AppArgs {
    /// Parse command line arguments
    fn parse() -> Result<Self> {
        Self::parse_from(env::args().skip(1))
    }

    fn parse_from(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let args: Vec<String> = args.into_iter().collect();
        let mut app_args = AppArgs::default();

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--config" | "-c" => {
                    let path = args.get(i + 1).context("Missing config file path")?;
                    app_args.config_path = Some(PathBuf::from(path));
                    i += 1;
                }
                "--log" | "-l" => {
                    let path = args.get(i + 1).context("Missing log file path")?;
                    app_args.log_path = Some(PathBuf::from(path));
                    i += 1;
                }
                "--demo" => {
                    let name = args.get(i + 1).context("Missing demo name")?;
                    app_args.demo = name.parse()?;
                    i += 1;
                }
                "--debug" | "-d" => {
                    app_args.debug = true;
                }
                "--help" | "-h" => {
                    print_help();
                    process::exit(0);
                }
                "--version" | "-v" => {
                    println!("{} v{}", myterm::NAME, myterm::VERSION);
                    process::exit(0);
                }
                arg if arg.starts_with('-') => {
                    anyhow::bail!("Unknown option: {}", arg);
                }
                other => {
                    warn!("Ignoring positional argument: {}", other);
                }
            }
            i += 1;
        }

        Ok(app_args)
    }
}

/// Print help information
fn print_help() {
    println!("myterm - an embeddable terminal-style widget");
    println!();
    println!("USAGE:");
    println!("    myterm [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --demo <NAME>          Demo to run (basic, game)");
    println!("    -c, --config <PATH>    Path to configuration file");
    println!("    -l, --log <PATH>       Write logs to PATH (default: myterm.log)");
    println!("    -d, --debug            Enable debug logging");
    println!("    -h, --help             Print this help message");
    println!("    -v, --version          Print version information");
    println!();
    println!("CONFIGURATION:");
    println!("    myterm looks for configuration files in the following order:");
    println!("    1. Path specified with --config");
    println!("    2. $MYTERM_CONFIG");
    println!("    3. <config dir>/myterm/config.toml");
    println!("    4. ~/.myterm/config.toml");
    println!("    5. ./.myterm.toml");
    println!("    6. Built-in defaults");
    println!();
    println!("KEYS:");
    println!("    Enter submits, Shift+Enter or Alt+Enter inserts a newline,");
    println!("    Up/Down browse history, Tab completes, PageUp/PageDown scroll,");
    println!("    Ctrl+C or Ctrl+D quits.");
}

/// Install the log subscriber
///
/// Logs go to a file so they never draw over the raw-mode screen.
fn init_logging(args: &AppArgs) -> Result<()> {
    let log_level = if args.debug { "debug" } else { "info" };
    let env_filter = env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string());

    let path = args
        .log_path
        .clone()
        .unwrap_or_else(|| PathBuf::from("myterm.log"));
    let file = File::create(&path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .compact()
        .init();

    Ok(())
}

/// Load configuration from file or use defaults
fn load_configuration(args: &AppArgs) -> Config {
    let mut loader = ConfigLoader::new();

    let loaded = match &args.config_path {
        Some(path) => {
            debug!("Loading config from: {}", path.display());
            loader.load_from_path(path).and_then(|config| {
                config.validate()?;
                Ok(config)
            })
        }
        None => loader.load_with_options(Default::default()),
    };

    match loaded {
        Ok(config) => {
            if let Some(path) = loader.current_path() {
                info!("Configuration loaded from: {}", path.display());
            }
            config
        }
        Err(e) => {
            warn!("{}", myterm::handle_startup_error(&e));
            info!("Falling back to default configuration");
            Config::default()
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = AppArgs::parse().unwrap_or_else(|e| {
        eprintln!("Failed to parse arguments: {}", e);
        print_help();
        process::exit(1);
    });

    if let Err(e) = init_logging(&args) {
        eprintln!("{:#}", e);
        process::exit(1);
    }

    info!("Starting {} v{}", myterm::NAME, myterm::VERSION);
    debug!("Arguments: {:?}", args);

    let config = load_configuration(&args);
    let app = match App::new(&config, args.demo) {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to set up demo: {:#}", e);
            eprintln!("{:#}", e);
            process::exit(1);
        }
    };

    if let Err(e) = app::run(app).await {
        error!("Application failed: {:#}", e);
        eprintln!("{:#}", e);
        process::exit(1);
    }

    info!("{} shutdown complete", myterm::NAME);
}
