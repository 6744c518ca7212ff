use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub scraping: ScrapingConfig,
    pub generation: GenerationSettings,
    pub delivery: DeliverySettings,
    pub logging: LoggingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScrapingConfig {
    pub webdriver_url: String,
    pub headless: bool,
    pub settle_wait_seconds: u64,
    pub activity_wait_seconds: u64,
    pub contact_delay_ms: u64,
    pub batch_limit: usize,
    pub cache_directory: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationSettings {
    pub profile_max_tokens: u32,
    pub website_max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeliverySettings {
    pub email_delay_ms: u64,
    pub single_offset_minutes: i64,
    pub batch_send_hour: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub directory: String,
    pub pretty_json: bool,
    pub report_filename: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scraping: ScrapingConfig {
                webdriver_url: "http://localhost:9515".to_string(),
                headless: true,
                settle_wait_seconds: 5,
                activity_wait_seconds: 3,
                contact_delay_ms: 2000,
                batch_limit: 5,
                cache_directory: "cache".to_string(),
            },
            generation: GenerationSettings {
                profile_max_tokens: 400,
                website_max_tokens: 1000,
                temperature: 0.7,
            },
            delivery: DeliverySettings {
                email_delay_ms: 3000,
                single_offset_minutes: 2,
                batch_send_hour: 17,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            output: OutputConfig {
                directory: "out".to_string(),
                pretty_json: true,
                report_filename: "outreach_results.json".to_string(),
            },
        }
    }
}

pub async fn load_config(
    path: &str,
) -> std::result::Result<Config, Box<dyn std::error::Error + Send + Sync>> {
    let content = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Sender identity used in prompts, fallback templates and campaign payloads.
/// Loaded once from the environment and passed by reference everywhere.
#[derive(Debug, Clone)]
pub struct SenderIdentity {
    pub name: String,
    pub title: String,
    pub email: String,
    pub company: String,
    pub company_url: String,
    pub linkedin: String,
    pub phone: String,
    pub address: String,
}

impl SenderIdentity {
    pub fn from_env() -> Self {
        Self {
            name: std::env::var("SENDER_NAME").unwrap_or_else(|_| "Your Name".to_string()),
            title: std::env::var("SENDER_TITLE").unwrap_or_else(|_| "Your Title".to_string()),
            email: std::env::var("SENDER_EMAIL")
                .unwrap_or_else(|_| "you@yourcompany.com".to_string()),
            company: std::env::var("SENDER_COMPANY").unwrap_or_else(|_| "Your Company".to_string()),
            company_url: std::env::var("SENDER_COMPANY_URL")
                .unwrap_or_else(|_| "https://yourcompany.com".to_string()),
            linkedin: std::env::var("SENDER_LINKEDIN").unwrap_or_default(),
            phone: std::env::var("SENDER_PHONE").unwrap_or_default(),
            address: std::env::var("SENDER_ADDRESS").unwrap_or_default(),
        }
    }
}

/// Credentials for the hosted text-generation endpoint. Absence is not fatal:
/// the generator degrades to template emails when these are missing.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub api_url: String,
    pub api_key: String,
    pub model_id: String,
}

impl GenerationConfig {
    pub fn from_env() -> std::result::Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Self {
            api_url: std::env::var("GENERATION_API_URL")
                .map_err(|_| "GENERATION_API_URL environment variable required")?,
            api_key: std::env::var("GENERATION_API_KEY")
                .map_err(|_| "GENERATION_API_KEY environment variable required")?,
            model_id: std::env::var("GENERATION_MODEL")
                .unwrap_or_else(|_| "us.amazon.nova-pro-v1:0".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sane_limits() {
        let config = Config::default();
        assert!(config.scraping.batch_limit > 0);
        assert!(config.scraping.settle_wait_seconds > 0);
        assert_eq!(config.delivery.batch_send_hour, 17);
        assert!(config.output.report_filename.ends_with(".json"));
    }

    #[test]
    fn config_yaml_round_trip() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.scraping.webdriver_url, config.scraping.webdriver_url);
        assert_eq!(
            parsed.delivery.email_delay_ms,
            config.delivery.email_delay_ms
        );
    }
}
