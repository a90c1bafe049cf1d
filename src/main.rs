use anyhow::{anyhow, Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use tracing::{debug, info};

use simlab_dash::app::App;
use simlab_dash::cli::{Cli, Commands, ConfigCommands};
use simlab_dash::core::commands::{fetch_log_lines, fetch_report, format_metrics_table};
use simlab_dash::core::SimulatorApi;
use simlab_dash::utils::logging::{init_logging, LogTarget};
use simlab_dash::utils::{app_config::parse_interval, parse_bool, AppConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // .env in the working directory may carry SIMLAB_API_URL
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let target = if cli.command.is_none() { LogTarget::File } else { LogTarget::Stderr };
    init_logging(target, cli.verbose)?;

    let config = AppConfig::load()?;
    let api_url = config.resolve_api_url(cli.api_url.as_deref());
    debug!(api_url = %api_url, "resolved service URL");

    match cli.command {
        None => {
            // No command - run interactive TUI
            let mut app = if cli.live || config.live {
                let interval = match cli.refresh.as_deref() {
                    Some(raw) => parse_interval(raw)?,
                    None => config.refresh_interval()?,
                };
                info!(api_url = %api_url, ?interval, "starting dashboard in live mode");
                App::live(SimulatorApi::new(&api_url)?, interval)
            } else {
                App::unwired()
            };
            app.run().await?;
        }
        Some(Commands::Start) => {
            handle_start(&api_url).await?;
        }
        Some(Commands::Stop) => {
            handle_stop(&api_url).await?;
        }
        Some(Commands::Metrics { json }) => {
            handle_metrics(&api_url, json).await?;
        }
        Some(Commands::Report { output }) => {
            handle_report(&api_url, output).await?;
        }
        Some(Commands::Logs { tail }) => {
            handle_logs(&api_url, tail).await?;
        }
        Some(Commands::Config { command }) => {
            handle_config(command, config, &api_url)?;
        }
    }

    Ok(())
}

fn client(api_url: &str) -> Result<SimulatorApi> {
    SimulatorApi::new(api_url).context("Cannot create simulation service client")
}

async fn handle_start(api_url: &str) -> Result<()> {
    let api = client(api_url)?;
    println!("Starting simulation via {}...", api.base_url());

    let response = api.start_simulation().await
        .context("Failed to start simulation")?;

    println!("{} Simulation started", "✓".green());
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

async fn handle_stop(api_url: &str) -> Result<()> {
    let api = client(api_url)?;
    println!("Stopping simulation via {}...", api.base_url());

    let response = api.stop_simulation().await
        .context("Failed to stop simulation")?;

    println!("{} Simulation stopped", "✓".green());
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

async fn handle_metrics(api_url: &str, json: bool) -> Result<()> {
    let api = client(api_url)?;
    let metrics = api.get_metrics().await
        .context("Failed to fetch metrics")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
        return Ok(());
    }

    print!("{}", format_metrics_table(&metrics));
    Ok(())
}

async fn handle_report(api_url: &str, output: Option<PathBuf>) -> Result<()> {
    let api = client(api_url)?;
    let pretty = fetch_report(&api, output.as_deref()).await?;
    println!("{}", pretty);

    if let Some(path) = output {
        println!("\n{} Report saved to {}", "✓".green(), path.display());
    }

    Ok(())
}

async fn handle_logs(api_url: &str, n: Option<usize>) -> Result<()> {
    let api = client(api_url)?;
    let lines = fetch_log_lines(&api, n).await?;

    if lines.is_empty() {
        println!("{}", "No log lines".dimmed());
        return Ok(());
    }

    for line in lines {
        println!("{}", line);
    }

    Ok(())
}

fn handle_config(command: ConfigCommands, mut config: AppConfig, api_url: &str) -> Result<()> {
    match command {
        ConfigCommands::View => {
            println!("Configuration ({})\n", AppConfig::config_path()?.display());
            println!("{:<18} {}", "api_url", config.api_url.as_deref().unwrap_or("<not set>"));
            println!("{:<18} {}", "refresh_interval", config.refresh_interval.as_deref().unwrap_or("<not set>"));
            println!("{:<18} {}", "live", config.live);
            println!();
            println!("{:<18} {}", "Resolved URL", api_url.cyan());
            println!("{:<18} {}", "Refresh every", humantime::format_duration(config.refresh_interval()?));
        }
        ConfigCommands::Path => {
            println!("{}", AppConfig::config_path()?.display());
        }
        ConfigCommands::SetUrl { url } => {
            SimulatorApi::new(&url)?;
            config.api_url = Some(url.clone());
            config.save()?;
            println!("{} api_url set to {}", "✓".green(), url);
        }
        ConfigCommands::SetRefresh { interval } => {
            config.set_refresh_interval(&interval)?;
            config.save()?;
            println!("{} refresh_interval set to {}", "✓".green(), interval);
        }
        ConfigCommands::SetLive { enabled } => {
            let enabled = parse_bool(&enabled)
                .ok_or_else(|| anyhow!("Expected true/false, got '{}'", enabled))?;
            config.live = enabled;
            config.save()?;
            println!("{} live set to {}", "✓".green(), enabled);
        }
    }

    Ok(())
}
