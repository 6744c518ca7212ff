use dialoguer::{theme::ColorfulTheme, Input, Select};
use tracing::error;

use crate::{
    cli::cli::MenuAction,
    models::{CliApp, Result},
};

impl CliApp {
    pub async fn run(&self) -> Result<()> {
        println!("\n🚀 Welcome to Outreach Scraper!");
        println!("═══════════════════════════════════════");

        loop {
            let actions = vec![
                MenuAction::GenerateLinkedinBatch,
                MenuAction::SendReportCampaign,
                MenuAction::WebsiteCampaign,
                MenuAction::SingleSend,
                MenuAction::PreviewReport,
                MenuAction::CheckEnvironment,
                MenuAction::Exit,
            ];

            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("\nSelect an action")
                .default(0)
                .items(&actions)
                .interact()?;

            match &actions[selection] {
                MenuAction::GenerateLinkedinBatch => {
                    if let Err(e) = self.run_generate_batch().await {
                        error!("Generation batch failed: {}", e);
                    }
                }
                MenuAction::SendReportCampaign => {
                    if let Err(e) = self.run_send_batch().await {
                        error!("Campaign send failed: {}", e);
                    }
                }
                MenuAction::WebsiteCampaign => {
                    if let Err(e) = self.run_website_batch().await {
                        error!("Website campaign failed: {}", e);
                    }
                }
                MenuAction::SingleSend => {
                    let email: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt("Recipient email")
                        .interact_text()?;
                    let url: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt("LinkedIn profile URL")
                        .interact_text()?;
                    let minutes: i64 = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt("Schedule offset (minutes)")
                        .default(self.config.delivery.single_offset_minutes)
                        .interact_text()?;

                    if let Err(e) = self.run_single_send(&email, &url, minutes).await {
                        error!("Single send failed: {}", e);
                    }
                }
                MenuAction::PreviewReport => {
                    if let Err(e) = self.run_preview().await {
                        error!("Preview failed: {}", e);
                    }
                }
                MenuAction::CheckEnvironment => {
                    if let Err(e) = self.check_environment() {
                        error!("Environment check failed: {}", e);
                    }
                }
                MenuAction::Exit => {
                    println!("\n👋 Thanks for using Outreach Scraper!");
                    break;
                }
            }
        }

        Ok(())
    }
}
