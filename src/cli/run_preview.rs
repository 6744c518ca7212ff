// src/cli/run_preview.rs - Print the generated emails without sending
use crate::models::{BatchReport, CliApp, Result};

impl CliApp {
    pub async fn run_preview(&self) -> Result<()> {
        let report_path = self.report_path();
        if !report_path.exists() {
            println!("❌ Results file not found: {}", report_path.display());
            return Ok(());
        }

        let report = BatchReport::load(&report_path).await?;
        println!("📧 Preview of {} generated emails:", report.entries.len());
        println!("{}", "=".repeat(80));

        for entry in &report.entries {
            println!(
                "\n📤 Email {} - To: {} ({})",
                entry.row_number,
                entry.contact.full_name(),
                entry.contact.email
            );
            println!(
                "🏢 Company: {} | Title: {}",
                entry.contact.company, entry.contact.title
            );
            println!("{}", "-".repeat(60));
            println!("Subject: {}", entry.email.subject);
            println!("{}", entry.email.body);
            println!("{}", "-".repeat(60));
        }

        Ok(())
    }
}
