use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::{Config, GenerationConfig, SenderIdentity};
use crate::delivery::{CampaignClient, DeliveryConfig};
use crate::generator::EmailGenerator;
use crate::models::CliApp;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Debug, Clone)]
pub enum MenuAction {
    GenerateLinkedinBatch,
    SendReportCampaign,
    WebsiteCampaign,
    SingleSend,
    PreviewReport,
    CheckEnvironment,
    Exit,
}

impl std::fmt::Display for MenuAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MenuAction::GenerateLinkedinBatch => {
                write!(f, "🤖 Generate AI emails from LinkedIn profiles (CSV batch)")
            }
            MenuAction::SendReportCampaign => {
                write!(f, "📧 Send the generated batch report as a campaign")
            }
            MenuAction::WebsiteCampaign => {
                write!(f, "🌐 Website campaign: scrape, generate and send")
            }
            MenuAction::SingleSend => {
                write!(f, "📤 Send a single AI email (recipient + profile URL)")
            }
            MenuAction::PreviewReport => write!(f, "👀 Preview generated emails"),
            MenuAction::CheckEnvironment => write!(f, "🔍 Debug Environment Check"),
            MenuAction::Exit => write!(f, "🚪 Exit"),
        }
    }
}

impl CliApp {
    pub fn new(config: Config, sender: SenderIdentity) -> Result<Self> {
        let generation = match GenerationConfig::from_env() {
            Ok(generation) => {
                info!("Generation endpoint configured, model: {}", generation.model_id);
                Some(generation)
            }
            Err(e) => {
                warn!("{}. AI generation disabled, using template emails.", e);
                None
            }
        };
        let generator =
            EmailGenerator::new(generation, sender.clone(), config.generation.clone());

        let delivery = match DeliveryConfig::from_env() {
            Ok(delivery) => Some(CampaignClient::new(delivery, sender.clone())),
            Err(e) => {
                warn!("{}. Email delivery disabled for this run.", e);
                None
            }
        };

        Ok(Self {
            config,
            sender,
            generator,
            delivery,
        })
    }

    /// Delivery is optional at startup but required by send actions.
    pub fn delivery(&self) -> Result<&CampaignClient> {
        self.delivery
            .as_ref()
            .ok_or_else(|| "CCAI_API_KEY and CCAI_CLIENT_ID must be set to send emails".into())
    }

    pub fn report_path(&self) -> PathBuf {
        PathBuf::from(&self.config.output.directory).join(&self.config.output.report_filename)
    }
}
