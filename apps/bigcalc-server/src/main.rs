use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use axum::Router;
use calc_bootstrap::AppConfig;
use calculator::CalculatorModule;
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// bigcalc server - arbitrary-precision web calculator
#[derive(Parser)]
#[command(name = "bigcalc-server")]
#[command(about = "bigcalc server - arbitrary-precision web calculator")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(ref path) = cli.config
        && !Path::new(path).is_file()
    {
        anyhow::bail!("config file does not exist: {}", path.display());
    }

    // Layered config:
    // 1) defaults -> 2) YAML (if provided) -> 3) env (APP__*) -> 4) CLI overrides
    let mut config = AppConfig::load_layered(cli.config.as_deref())?;
    config.apply_cli_overrides(cli.port);

    // Held until exit so buffered file logs are flushed
    let _log_guard = calc_bootstrap::init_logging(&config.logging, cli.verbose)?;

    if cli.print_config {
        println!("Effective configuration:\n{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config),
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    CalculatorModule::init(config)?;
    println!("Configuration is valid");
    println!("{}", config.to_yaml()?);
    Ok(())
}

async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!("bigcalc server starting");

    let calculator = CalculatorModule::init(&config)?;
    let routes = calculator.register_rest(Router::new());
    let router = api_gateway::build_router(routes, &config.server);

    let cancel = calc_bootstrap::shutdown_token();
    api_gateway::serve(router, &config.server, cancel)
        .await
        .context("HTTP server failed")?;

    tracing::info!("bigcalc server stopped");
    Ok(())
}
