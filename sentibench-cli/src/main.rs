use anyhow::{bail, Context, Result};
use clap::Parser;
use sentibench_client::{AnalyzeSession, HttpSentimentService};
use sentibench_config::{ConfigLoader, SentibenchConfig};
use sentibench_load::LoadRunner;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod cli;
mod console;

use cli::{Cli, Commands, ConfigCommands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first so logging can honor the configured level
    let config = load_config(cli.config.as_ref())?;
    init_tracing(cli.log_level.as_ref(), &config.logging);

    debug!("Sentibench CLI starting");

    match cli.command {
        Commands::Analyze { text, json } => run_analyze(&config, &text, json).await,
        Commands::Console => run_console(&config).await,
        Commands::Run { target } => run_load(config, target).await,
        Commands::Config { config_cmd } => handle_config_command(&config, config_cmd),
    }
}

/// Load configuration from the given path, or environment/defaults
fn load_config(path: Option<&PathBuf>) -> Result<SentibenchConfig> {
    ConfigLoader::new()
        .load(path)
        .context("Failed to load configuration")
}

/// Initialize tracing; the command-line flag wins over the config file
fn init_tracing(cli_level: Option<&String>, config: &sentibench_config::LoggingConfig) {
    let env_filter = match cli_level {
        Some(level) => EnvFilter::try_new(level).unwrap_or_else(|_| {
            eprintln!("Invalid log level '{}', falling back to 'info'", level);
            EnvFilter::new("info")
        }),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.level.to_string())),
    };

    use sentibench_config::domains::logging::LogFormat;
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);
    match config.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Text => builder.init(),
    }
}

/// One-shot analysis of a single text
async fn run_analyze(config: &SentibenchConfig, text: &str, json: bool) -> Result<()> {
    let service = HttpSentimentService::from_config(&config.http, &config.service)
        .context("Failed to build the service client")?;
    let mut session = AnalyzeSession::new(service);

    let result = session
        .submit(text)
        .await
        .context("Nothing to analyze")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if result.is_failure() {
        println!("Analysis failed; the service returned no usable result");
    } else {
        println!(
            "Sentiment: {} (confidence: {:.1}%)",
            result.label,
            result.confidence * 100.0
        );
    }

    // A failed analysis is a displayed outcome, not a process error
    Ok(())
}

/// Interactive console over one session
async fn run_console(config: &SentibenchConfig) -> Result<()> {
    let service = HttpSentimentService::from_config(&config.http, &config.service)
        .context("Failed to build the service client")?;
    info!("Console connected to {}", service.analyze_url());

    console::run(AnalyzeSession::new(service)).await
}

/// Execute the load profile and gate the exit status on the thresholds
async fn run_load(mut config: SentibenchConfig, target: Option<String>) -> Result<()> {
    if let Some(target) = target {
        config.service.base_url = target;
        use sentibench_config::validation::Validatable;
        config.service.validate().context("Invalid target URL")?;
    }

    let runner = LoadRunner::from_config(&config).context("Failed to set up the load run")?;
    let report = runner.run().await;

    println!("{}", report);

    if !report.passed() {
        bail!(
            "run failed: {} threshold(s) breached",
            report.thresholds.breached()
        );
    }

    Ok(())
}

/// Configuration management subcommands
fn handle_config_command(config: &SentibenchConfig, command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Validate { config_file } => {
            ConfigLoader::new()
                .from_file(&config_file)
                .with_context(|| format!("Invalid configuration: {}", config_file.display()))?;
            println!("Configuration is valid: {}", config_file.display());
            Ok(())
        }
        ConfigCommands::Generate { output, force } => {
            if output.exists() && !force {
                bail!(
                    "Refusing to overwrite {} (use --force to override)",
                    output.display()
                );
            }
            std::fs::write(&output, SentibenchConfig::generate_sample())
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Sample configuration written to {}", output.display());
            Ok(())
        }
        ConfigCommands::Show { format } => {
            let rendered = match format.as_str() {
                "yaml" => serde_yaml::to_string(config)?,
                "json" => serde_json::to_string_pretty(config)?,
                other => bail!("Unknown format '{}' (expected yaml or json)", other),
            };
            println!("{}", rendered);
            Ok(())
        }
    }
}
