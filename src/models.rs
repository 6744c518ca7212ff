use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::{Config, SenderIdentity},
    delivery::CampaignClient,
    generator::EmailGenerator,
    scraper::ScrapedProfile,
};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// A row from the contact spreadsheet (or a synthesized single-send target).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: String,
    pub title: String,
    pub linkedin_url: Option<String>,
    pub website_url: Option<String>,
    pub industry: Option<String>,
    pub aws_usage: Option<String>,
}

impl Contact {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn has_scrape_target(&self) -> bool {
        self.linkedin_url.as_deref().is_some_and(|u| !u.is_empty())
            || self.website_url.as_deref().is_some_and(|u| !u.is_empty())
    }

    /// A contact with neither a scrapeable URL nor a delivery address is
    /// dropped before processing and never enters the report.
    pub fn is_processable(&self) -> bool {
        !self.email.trim().is_empty() || self.has_scrape_target()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedEmail {
    pub subject: String,
    pub body: String,
}

/// One processed contact inside a batch report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    pub row_number: usize,
    pub contact: Contact,
    pub profile: ScrapedProfile,
    pub prompt_text: String,
    pub email: GeneratedEmail,
}

/// The JSON artifact joining the generation pass to the later send pass.
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchReport {
    pub run_id: String,
    pub generated_at: String,
    pub entries: Vec<ReportEntry>,
}

impl BatchReport {
    pub fn new(entries: Vec<ReportEntry>) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            generated_at: Utc::now().to_rfc3339(),
            entries,
        }
    }

    pub async fn save(&self, path: &std::path::Path, pretty: bool) -> Result<()> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    pub async fn load(path: &std::path::Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let report: BatchReport = serde_json::from_str(&content)?;
        Ok(report)
    }
}

pub struct CliApp {
    pub config: Config,
    pub sender: SenderIdentity,
    pub generator: EmailGenerator,
    pub delivery: Option<CampaignClient>,
}
