// src/delivery/mod.rs - Campaign submission to the email delivery API
use chrono::{DateTime, Duration, FixedOffset, Utc};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, error};

use crate::config::SenderIdentity;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

const SCHEDULED_TIMEZONE: &str = "America/Los_Angeles";
const PACIFIC_OFFSET_HOURS: i32 = 7;

#[derive(Debug, Clone)]
pub struct DeliveryConfig {
    pub api_key: String,
    pub client_id: String,
    pub email_url: String,
    pub account_id: String,
}

impl DeliveryConfig {
    pub fn from_env() -> Result<Self> {
        Ok(DeliveryConfig {
            api_key: std::env::var("CCAI_API_KEY")
                .map_err(|_| "CCAI_API_KEY environment variable required")?,
            client_id: std::env::var("CCAI_CLIENT_ID")
                .map_err(|_| "CCAI_CLIENT_ID environment variable required")?,
            email_url: std::env::var("CCAI_EMAIL_URL")
                .map_err(|_| "CCAI_EMAIL_URL environment variable required")?,
            account_id: std::env::var("CCAI_ACCOUNT_ID").unwrap_or_else(|_| "1223".to_string()),
        })
    }
}

#[derive(Debug, Clone)]
pub struct Recipient {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Recipient {
    /// Synthesizes a recipient from a bare address: the local part with dots
    /// and underscores spaced out, each word capitalized.
    pub fn from_email(email: &str) -> Self {
        let local = email.split('@').next().unwrap_or("");
        let first_name = local
            .replace(['.', '_'], " ")
            .split_whitespace()
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => {
                        first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                    }
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            first_name,
            last_name: String::new(),
            email: email.to_string(),
        }
    }
}

/// When the campaign should go out.
#[derive(Debug, Clone, Copy)]
pub enum Schedule {
    /// Minutes from now, used for single sends and tests.
    OffsetMinutes(i64),
    /// The next calendar day at a fixed hour, used for batch campaigns.
    NextDayAt { hour: u32 },
}

/// Outcome of one delivery attempt. Always returned, never raised.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryResult {
    pub success: bool,
    pub status_code: Option<u16>,
    pub response: Option<Value>,
    pub error: Option<String>,
    pub scheduled_time: Option<String>,
}

pub struct CampaignClient {
    config: DeliveryConfig,
    sender: SenderIdentity,
    http: reqwest::Client,
}

impl CampaignClient {
    pub fn new(config: DeliveryConfig, sender: SenderIdentity) -> Self {
        debug!("Created campaign client for {}", config.email_url);
        Self {
            config,
            sender,
            http: reqwest::Client::new(),
        }
    }

    /// Submits one scheduled campaign. A single attempt: any non-2xx status
    /// or transport error is reported in the result, never propagated.
    pub async fn send_campaign(
        &self,
        recipient: &Recipient,
        subject: &str,
        message: &str,
        title: &str,
        schedule: Schedule,
    ) -> DeliveryResult {
        let scheduled = schedule_timestamp(schedule, Utc::now());
        let payload = build_campaign_payload(
            recipient,
            subject,
            message,
            title,
            &self.sender,
            &scheduled,
        );

        match self.post_campaign(&payload).await {
            Ok((status, body)) => DeliveryResult {
                success: is_delivered_status(status),
                status_code: Some(status),
                response: Some(body),
                error: None,
                scheduled_time: Some(format!("{} PT", scheduled.format("%I:%M %p"))),
            },
            Err(e) => {
                error!("Campaign submission failed: {}", e);
                DeliveryResult {
                    success: false,
                    status_code: None,
                    response: None,
                    error: Some(e.to_string()),
                    scheduled_time: None,
                }
            }
        }
    }

    async fn post_campaign(&self, payload: &Value) -> Result<(u16, Value)> {
        let url = format!(
            "{}/api/v1/campaigns",
            self.config.email_url.trim_end_matches('/')
        );

        debug!("Sending POST request to: {}", url);

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.config.api_key))
            .header(ACCEPT, "*/*")
            .header("clientId", &self.config.client_id)
            .header("accountId", &self.config.account_id)
            .json(payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.json().await.unwrap_or(Value::Null);
        Ok((status, body))
    }
}

pub fn is_delivered_status(status: u16) -> bool {
    matches!(status, 200 | 201)
}

/// Resolves a schedule to a concrete Pacific-time timestamp.
pub fn schedule_timestamp(schedule: Schedule, now_utc: DateTime<Utc>) -> DateTime<FixedOffset> {
    let pacific = FixedOffset::west_opt(PACIFIC_OFFSET_HOURS * 3600).unwrap();
    let now = now_utc.with_timezone(&pacific);

    match schedule {
        Schedule::OffsetMinutes(minutes) => now + Duration::minutes(minutes),
        Schedule::NextDayAt { hour } => {
            let tomorrow = now + Duration::days(1);
            tomorrow
                .date_naive()
                .and_hms_opt(hour, 0, 0)
                .and_then(|dt| dt.and_local_timezone(pacific).single())
                .unwrap_or(tomorrow)
        }
    }
}

pub fn build_campaign_payload(
    recipient: &Recipient,
    subject: &str,
    message: &str,
    title: &str,
    sender: &SenderIdentity,
    scheduled: &DateTime<FixedOffset>,
) -> Value {
    json!({
        "subject": subject,
        "title": title,
        "message": message,
        "senderEmail": sender.email,
        "replyEmail": sender.email,
        "senderName": sender.name,
        "scheduledTimestamp": scheduled.to_rfc3339(),
        "scheduledTimezone": SCHEDULED_TIMEZONE,
        "accounts": [{
            "firstName": recipient.first_name,
            "lastName": recipient.last_name,
            "email": recipient.email,
            "phone": ""
        }],
        "campaignType": "EMAIL",
        "addToList": "noList",
        "contactInput": "accounts",
        "fromType": "single",
        "senders": []
    })
}
