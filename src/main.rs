use models::{CliApp, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod contacts;
mod delivery;
mod generator;
mod models;
mod scraper;

use config::{load_config, Config, SenderIdentity};
use tokio::signal;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Setup logging
    std::env::set_var("RUST_LOG", "outreach_scraper=info,hyper=warn,thirtyfour=warn");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("outreach_scraper=info".parse().unwrap()),
        )
        .with_max_level(tracing::Level::INFO)
        .init();

    // Load configuration
    let config = match load_config("config.yml").await {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load config.yml: {}. Using defaults.", e);
            Config::default()
        }
    };

    // Create output directory
    tokio::fs::create_dir_all(&config.output.directory).await?;

    let sender = SenderIdentity::from_env();
    let single_offset = config.delivery.single_offset_minutes;
    let app = CliApp::new(config, sender)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => {
            // Interactive menu with graceful shutdown
            tokio::select! {
                result = app.run() => {
                    result?;
                }
                _ = signal::ctrl_c() => {
                    info!("Received Ctrl+C, shutting down gracefully...");
                }
            }
        }
        [command] if command == "preview" => {
            app.run_preview().await?;
        }
        [to_email, linkedin_url] => {
            app.run_single_send(to_email, linkedin_url, single_offset)
                .await?;
        }
        [to_email, linkedin_url, minutes] => {
            let minutes = minutes.parse()?;
            app.run_single_send(to_email, linkedin_url, minutes).await?;
        }
        _ => show_usage(),
    }

    Ok(())
}

fn show_usage() {
    println!("🤖 AI-Powered Outreach Scraper");
    println!("========================================");
    println!("Usage:");
    println!("  outreach-scraper                                  # interactive menu");
    println!("  outreach-scraper preview                          # preview the last batch report");
    println!("  outreach-scraper <email> <linkedin_url>           # send one AI email now-ish");
    println!("  outreach-scraper <email> <linkedin_url> <minutes> # schedule N minutes out");
}
