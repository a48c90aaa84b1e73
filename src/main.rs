//! SmartLocate - vision-assisted element locator
//!
//! Main entry point for the SmartLocate CLI.

mod cli;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use smartlocate_config::{
    Config, ConfigLoader, ConfigValidator, EnvOverrides, LoggingConfig, ValidationResult,
};
use smartlocate_core::{LocatorSession, SmartLocator, SystemReviewLauncher};
use smartlocate_driver_cdp::CdpDriver;
use smartlocate_protocols::{BoundingBox, DriverError, ElementHandle, ElementRef};
use smartlocate_service_devtools::DevToolsClient;

use cli::{Cli, Commands};

fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(&logging.dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("smartlocate")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&logging.dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keep the writer alive for the program duration
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    tracing_subscriber::registry()
        .with(env_filter)
        // Console layer on stderr; stdout carries command output
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(true),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

/// File config, then environment, then command-line flags.
fn effective_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = ConfigLoader::load_or_default(&cli.config)?;
    EnvOverrides::from_env().apply(&mut config);

    if let Some(ref endpoint) = cli.endpoint {
        config.browser.endpoint = endpoint.clone();
    }
    if cli.interactive {
        config.locator.interactive = true;
    }
    if let Commands::Find {
        timeout: Some(secs),
        ..
    } = cli.command
    {
        config.polling.timeout_seconds = Some(secs);
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = effective_config(&cli)?;
    init_tracing(&config.logging)?;

    let validation = ConfigValidator::validate(&config)?;

    match cli.command {
        Commands::Config => print_config(&config, &validation),
        Commands::Find { name, .. } => {
            let locator = connect(&config, validation).await?;

            let cancel = CancellationToken::new();
            let on_interrupt = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("Interrupted, abandoning lookup");
                    on_interrupt.cancel();
                }
            });

            let element = locator.find_by_description_with(&name, &cancel).await?;
            report(&name, element).await
        }
        Commands::Query { selector, name } => {
            let locator = connect(&config, validation).await?;
            let element = locator.query_selector(&selector, name.as_deref()).await?;
            report(name.as_deref().unwrap_or(&selector), element).await
        }
    }
}

async fn connect(
    config: &Config,
    validation: ValidationResult,
) -> Result<SmartLocator, Box<dyn std::error::Error>> {
    for warning in &validation.warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }
    validation.ensure_valid()?;

    let api_key = config.service.require_api_key()?.to_string();
    let service = DevToolsClient::with_url(api_key, config.service.base_url.clone())
        .with_timeout(Duration::from_secs(config.service.request_timeout_seconds))?;

    info!("Connecting to browser at {}", config.browser.endpoint);
    let driver = CdpDriver::connect(&config.browser.endpoint).await?;

    let session = LocatorSession::from_config(&config.locator, &config.polling);
    let locator = SmartLocator::register(
        session,
        Arc::new(driver),
        Arc::new(service),
        Arc::new(SystemReviewLauncher),
    )
    .await?;
    Ok(locator)
}

async fn describe(name: &str, element: &ElementRef) -> Result<Value, DriverError> {
    let (location, size, tag_name) =
        futures::try_join!(element.location(), element.size(), element.tag_name())?;
    Ok(json!({
        "name": name,
        "tag_name": tag_name,
        "bbox": BoundingBox::from_parts(location, size),
    }))
}

async fn report(
    name: &str,
    element: Option<ElementRef>,
) -> Result<(), Box<dyn std::error::Error>> {
    match element {
        Some(element) => {
            let value = describe(name, &element).await?;
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        None => {
            eprintln!("No element found for '{}'", name);
            std::process::exit(1);
        }
    }
}

fn print_config(
    config: &Config,
    validation: &ValidationResult,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", toml::to_string_pretty(&redacted(config))?);

    for error in &validation.errors {
        println!("# error: {}: {}", error.path, error.message);
    }
    for warning in &validation.warnings {
        println!("# warning: {}: {}", warning.path, warning.message);
    }
    Ok(())
}

/// Copy of `config` safe to print.
fn redacted(config: &Config) -> Config {
    let mut config = config.clone();
    if let Some(ref key) = config.service.api_key {
        let visible: String = key.chars().take(4).collect();
        config.service.api_key = Some(format!("{}...", visible));
    }
    config
}
