// src/cli/run_generate_batch.rs - CSV batch: scrape profiles, draft emails,
// write the batch report consumed by the send pass
use std::time::Duration;
use tracing::warn;

use crate::contacts::{discover_contact_csv, filter_processable, read_contacts, sample_contacts};
use crate::generator::format_profile_context;
use crate::models::{BatchReport, CliApp, ReportEntry, Result};
use crate::scraper::{BrowserSession, ProfileCache, ProfileScraper, ScrapedProfile};

impl CliApp {
    pub async fn run_generate_batch(&self) -> Result<()> {
        println!("\n🤖 AI LinkedIn Outreach Generator");
        println!("══════════════════════════════════════════════════");

        let csv_path = discover_contact_csv(&self.sender.company)?;
        println!("📁 Processing: {}", csv_path.display());

        let all_contacts = read_contacts(&csv_path)?;
        let valid = filter_processable(all_contacts);
        let valid_count = valid.len();
        let selected = sample_contacts(valid, self.config.scraping.batch_limit);
        println!(
            "📊 Found {} valid contacts, selecting {}",
            valid_count,
            selected.len()
        );

        if selected.is_empty() {
            println!("❌ No processable contacts found");
            return Ok(());
        }

        let session = BrowserSession::start(&self.config.scraping).await?;
        let scraper = ProfileScraper::new(&self.config.scraping);
        let cache = ProfileCache::new(&self.config.scraping.cache_directory);

        let mut entries = Vec::new();
        for (i, contact) in selected.iter().enumerate() {
            let row_number = i + 1;
            println!(
                "\n👤 Contact {}: {} at {}",
                row_number,
                contact.full_name(),
                contact.company
            );

            let profile = match contact.linkedin_url.as_deref() {
                Some(url) if !url.is_empty() => match cache.load(url).await {
                    Some(profile) => {
                        println!("📋 Using cached profile...");
                        profile
                    }
                    None => {
                        println!("🔍 Scraping LinkedIn profile...");
                        let profile = scraper.scrape(&session, url).await;
                        cache.store(url, &profile).await;
                        profile
                    }
                },
                _ => ScrapedProfile::fallback_named(&contact.full_name()),
            };

            println!("🧠 Formatting profile for AI generation...");
            let prompt_text = format_profile_context(&profile, Some(contact));

            let first_name = if contact.first_name.is_empty() {
                profile
                    .name
                    .split_whitespace()
                    .next()
                    .unwrap_or("there")
                    .to_string()
            } else {
                contact.first_name.clone()
            };

            println!("🤖 Generating AI-powered email...");
            let email = self
                .generator
                .generate_profile_email(&profile, &prompt_text, &first_name)
                .await;
            println!("✅ Email generated: {}", email.subject);

            entries.push(ReportEntry {
                row_number,
                contact: contact.clone(),
                profile,
                prompt_text,
                email,
            });

            if i < selected.len() - 1 {
                tokio::time::sleep(Duration::from_millis(self.config.scraping.contact_delay_ms))
                    .await;
            }
        }

        if let Err(e) = session.quit().await {
            warn!("Failed to close browser session: {}", e);
        }

        let report = BatchReport::new(entries);
        tokio::fs::create_dir_all(&self.config.output.directory).await?;
        let report_path = self.report_path();
        report
            .save(&report_path, self.config.output.pretty_json)
            .await?;

        println!("\n🎉 Outreach generation complete!");
        println!("📊 Generated {} emails", report.entries.len());
        println!("💾 Results saved to: {}", report_path.display());

        for entry in report.entries.iter().take(2) {
            println!("\n📧 Email for {}:", entry.contact.full_name());
            println!("{}", "=".repeat(60));
            println!("Subject: {}", entry.email.subject);
            println!("{}", entry.email.body);
            println!("{}", "=".repeat(60));
        }

        Ok(())
    }
}
