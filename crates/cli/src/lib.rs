pub mod commands;
pub mod snapshot;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use storefront_core::config::{AppConfig, LoadOptions, LogFormat, LoggingConfig};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "storefront",
    about = "Storefront catalog and recommendation CLI",
    long_about = "Inspect a catalog snapshot, rank cart recommendations, and summarize sales from order history.",
    after_help = "Examples:\n  storefront recommend --cart 1,13\n  storefront recommend --cart 2 --orders data/orders.json\n  storefront sales --orders data/orders.json\n  storefront config"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a storefront.toml config file")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Rank products to suggest for the given cart")]
    Recommend(RecommendArgs),
    #[command(about = "List catalog products ranked by popularity")]
    Catalog(SnapshotArgs),
    #[command(about = "Summarize total sales and per-product revenue")]
    Sales(SnapshotArgs),
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

#[derive(Debug, Clone, Default, Args)]
pub struct SnapshotArgs {
    #[arg(long, help = "JSON array of products (defaults to the built-in inventory)")]
    pub catalog: Option<PathBuf>,
    #[arg(long, help = "JSON array of orders (defaults to no history)")]
    pub orders: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct RecommendArgs {
    #[arg(long, value_delimiter = ',', help = "Comma-separated product ids in the cart")]
    pub cart: Vec<u64>,
    #[arg(long, help = "Maximum number of recommendations")]
    pub limit: Option<usize>,
    #[command(flatten)]
    pub snapshot: SnapshotArgs,
}

/// Unparseable directives fall back to `info`.
fn log_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

pub fn init_logging(logging: &LoggingConfig) {
    // stdout carries command payloads; logs go to stderr.
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(log_filter(&logging.level))
        .with_writer(std::io::stderr);

    let _ = match logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let options = LoadOptions { config_path: cli.config, ..LoadOptions::default() };

    // Commands report config failures themselves; logging just keeps defaults.
    let logging = AppConfig::load(options.clone())
        .map(|config| config.logging)
        .unwrap_or_else(|_| AppConfig::default().logging);
    init_logging(&logging);

    let result = match cli.command {
        Command::Recommend(args) => commands::recommend::run(&options, &args),
        Command::Catalog(args) => commands::catalog::run(&options, &args),
        Command::Sales(args) => commands::sales::run(&options, &args),
        Command::Config => commands::config::run(&options),
    };

    tracing::debug!(
        event_name = "cli.command.finished",
        exit_code = result.exit_code,
        "command finished"
    );

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
