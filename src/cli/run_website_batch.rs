// src/cli/run_website_batch.rs - Website-based campaign: scrape each
// contact's company site, draft an email and schedule it right away
use std::time::Duration;

use crate::contacts::{discover_contact_csv, read_contacts};
use crate::delivery::{Recipient, Schedule};
use crate::models::{CliApp, Result};
use crate::scraper::WebsiteScraper;

impl CliApp {
    pub async fn run_website_batch(&self) -> Result<()> {
        println!("\n🌐 AI Website Email Automation");
        println!("══════════════════════════════════════════════════");

        let client = self.delivery()?;

        let csv_path = discover_contact_csv(&self.sender.company)?;
        println!("📁 Processing: {}", csv_path.display());

        let contacts = read_contacts(&csv_path)?;
        println!("📋 Found {} contacts", contacts.len());

        let scraper = WebsiteScraper::new();
        let limit = self.config.scraping.batch_limit;
        let selected: Vec<_> = contacts.into_iter().take(limit).collect();

        let mut successful = 0usize;
        for (i, contact) in selected.iter().enumerate() {
            println!("\n📤 Processing contact {}/{}", i + 1, selected.len());
            println!("👤 Name: {}", contact.full_name());
            println!("📧 Email: {}", contact.email);

            let Some(website_url) = contact.website_url.as_deref().filter(|u| !u.is_empty())
            else {
                println!("⚠️ No website found, skipping...");
                continue;
            };
            if contact.email.trim().is_empty() {
                println!("⚠️ No email address, skipping...");
                continue;
            }

            println!("🌐 Scraping website: {}", website_url);
            let snapshot = scraper.scrape(website_url, &contact.company).await;

            println!("🤖 Generating AI-powered email...");
            let email = self
                .generator
                .generate_website_email(&snapshot, &contact.full_name())
                .await;
            println!("📝 Generated email with subject: {}", email.subject);

            let recipient = Recipient {
                first_name: contact.first_name.clone(),
                last_name: contact.last_name.clone(),
                email: contact.email.clone(),
            };
            let title = format!("Website Email - {}", contact.email);

            let result = client
                .send_campaign(
                    &recipient,
                    &email.subject,
                    &email.body,
                    &title,
                    Schedule::OffsetMinutes(1),
                )
                .await;

            if result.success {
                println!("✅ Email sent successfully to {}", contact.email);
                successful += 1;
            } else {
                let detail = result
                    .error
                    .unwrap_or_else(|| format!("status {:?}", result.status_code));
                println!("❌ Failed to send email: {}", detail);
            }

            if i < selected.len() - 1 {
                tokio::time::sleep(Duration::from_millis(self.config.scraping.contact_delay_ms))
                    .await;
            }
        }

        println!("\n🎉 Completed! Successfully sent {} emails", successful);
        Ok(())
    }
}
