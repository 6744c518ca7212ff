// src/cli/check_environment.rs - Show which credentials are configured
use crate::models::{CliApp, Result};

const CHECKED_VARS: &[&str] = &[
    "SENDER_NAME",
    "SENDER_EMAIL",
    "SENDER_COMPANY",
    "GENERATION_API_URL",
    "GENERATION_API_KEY",
    "CCAI_API_KEY",
    "CCAI_CLIENT_ID",
    "CCAI_EMAIL_URL",
    "LINKEDIN_SESSION_COOKIE",
];

impl CliApp {
    pub fn check_environment(&self) -> Result<()> {
        println!("\n🔍 Environment Check");
        println!("━━━━━━━━━━━━━━━━━━━━━");

        for var in CHECKED_VARS {
            match std::env::var(var) {
                Ok(value) if !value.is_empty() => println!("   ✅ {} is set", var),
                _ => println!("   ❌ {} is not set", var),
            }
        }

        println!("\n📡 WebDriver endpoint: {}", self.config.scraping.webdriver_url);
        println!("📁 Output directory: {}", self.config.output.directory);
        println!("🗂  Profile cache: {}", self.config.scraping.cache_directory);

        Ok(())
    }
}
