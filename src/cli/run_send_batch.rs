// src/cli/run_send_batch.rs - Deliver a previously generated batch report
use std::time::Duration;

use crate::delivery::{Recipient, Schedule};
use crate::models::{BatchReport, CliApp, Result};

impl CliApp {
    pub async fn run_send_batch(&self) -> Result<()> {
        println!("\n📧 AI Campaign Sender");
        println!("══════════════════════════════════════════════════");

        let client = self.delivery()?;

        let report_path = self.report_path();
        if !report_path.exists() {
            println!("❌ Results file not found: {}", report_path.display());
            println!("Run the LinkedIn generation batch first to create it");
            return Ok(());
        }

        let report = BatchReport::load(&report_path).await?;
        if report.entries.is_empty() {
            println!("❌ No contacts found in results file");
            return Ok(());
        }

        println!("📧 Sending {} generated emails...", report.entries.len());

        let mut sent = 0usize;
        let mut errors: Vec<String> = Vec::new();

        for (i, entry) in report.entries.iter().enumerate() {
            println!(
                "\n📤 Sending to {} ({}/{})",
                entry.contact.full_name(),
                i + 1,
                report.entries.len()
            );

            let first_name = if entry.contact.first_name.is_empty() {
                "Friend".to_string()
            } else {
                entry.contact.first_name.clone()
            };
            let recipient = Recipient {
                first_name: first_name.clone(),
                last_name: entry.contact.last_name.clone(),
                email: entry.contact.email.clone(),
            };
            let title = format!("AI Outbound - {}", first_name);

            let result = client
                .send_campaign(
                    &recipient,
                    &entry.email.subject,
                    &entry.email.body,
                    &title,
                    Schedule::NextDayAt {
                        hour: self.config.delivery.batch_send_hour,
                    },
                )
                .await;

            if result.success {
                println!(
                    "✅ Campaign scheduled (status {})",
                    result.status_code.unwrap_or_default()
                );
                sent += 1;
            } else {
                let detail = result
                    .error
                    .unwrap_or_else(|| format!("status {:?}", result.status_code));
                println!("❌ Email failed: {}", detail);
                errors.push(format!("Email to {}: {}", entry.contact.full_name(), detail));
            }

            if i < report.entries.len() - 1 {
                tokio::time::sleep(Duration::from_millis(self.config.delivery.email_delay_ms))
                    .await;
            }
        }

        println!("\n🎉 Campaign completed!");
        println!("📧 Emails sent: {}/{}", sent, report.entries.len());

        if !errors.is_empty() {
            println!("⚠️  Errors: {}", errors.len());
            for error in errors.iter().take(3) {
                println!("   {}", error);
            }
        }

        Ok(())
    }
}
