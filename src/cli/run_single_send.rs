// src/cli/run_single_send.rs - One contact: scrape, draft, schedule
use tracing::warn;

use crate::delivery::{Recipient, Schedule};
use crate::generator::format_profile_context;
use crate::models::{CliApp, Result};
use crate::scraper::{BrowserSession, ProfileScraper};

impl CliApp {
    pub async fn run_single_send(
        &self,
        to_email: &str,
        linkedin_url: &str,
        schedule_minutes: i64,
    ) -> Result<()> {
        println!("📧 Sending AI-personalized email to: {}", to_email);
        println!("🔗 LinkedIn: {}", linkedin_url);
        println!("⏰ Scheduled for: {} minutes from now", schedule_minutes);
        println!("------------------------------------------------------------");

        let client = self.delivery()?;

        let session = BrowserSession::start(&self.config.scraping).await?;
        let scraper = ProfileScraper::new(&self.config.scraping);

        println!("🔍 Scraping LinkedIn profile and recent posts...");
        let profile = scraper.scrape(&session, linkedin_url).await;
        if let Err(e) = session.quit().await {
            warn!("Failed to close browser session: {}", e);
        }

        println!("🧠 Formatting profile data for AI...");
        let prompt_text = format_profile_context(&profile, None);

        let first_name = profile
            .name
            .split_whitespace()
            .next()
            .map(str::to_string)
            .unwrap_or_else(|| Recipient::from_email(to_email).first_name);

        println!("🤖 Generating AI-personalized email...");
        let email = self
            .generator
            .generate_profile_email(&profile, &prompt_text, &first_name)
            .await;
        println!("📝 Subject: {}", email.subject);

        let recipient = Recipient::from_email(to_email);
        let title = format!("Single Email - {}", recipient.first_name);

        println!("📧 Sending AI-personalized email...");
        let result = client
            .send_campaign(
                &recipient,
                &email.subject,
                &email.body,
                &title,
                Schedule::OffsetMinutes(schedule_minutes),
            )
            .await;

        if result.success {
            println!("✅ AI-personalized email sent successfully!");
            println!(
                "📅 Scheduled for: {}",
                result.scheduled_time.as_deref().unwrap_or("Unknown time")
            );
        } else {
            let detail = result
                .error
                .unwrap_or_else(|| format!("status {:?}", result.status_code));
            println!("❌ Email failed: {}", detail);
        }

        Ok(())
    }
}
