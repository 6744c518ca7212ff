pub mod client;
pub mod fallback;
pub mod prompt;

// Re-export the main entry points for easy importing
pub use prompt::{format_profile_context, format_website_context};

use tracing::warn;

use crate::config::{GenerationConfig, GenerationSettings, SenderIdentity};
use crate::models::GeneratedEmail;
use crate::scraper::{ScrapedProfile, WebsiteSnapshot};
use client::GenerationClient;
use fallback::{profile_fallback_email, signature_html, website_fallback_email};

const TONES: &[&str] = &["professional", "consultative", "friendly"];

/// Drafts outreach emails via the hosted generation endpoint, falling back to
/// deterministic templates whenever credentials are missing, the endpoint is
/// unreachable, or the reply cannot be parsed.
pub struct EmailGenerator {
    client: Option<GenerationClient>,
    sender: SenderIdentity,
    settings: GenerationSettings,
    goals: Vec<String>,
}

impl EmailGenerator {
    pub fn new(
        config: Option<GenerationConfig>,
        sender: SenderIdentity,
        settings: GenerationSettings,
    ) -> Self {
        let client = config.as_ref().map(GenerationClient::new);
        let goals = vec![
            "book a 15-minute discovery call to discuss cloud optimization opportunities"
                .to_string(),
            format!("introduce {}'s cloud infrastructure services", sender.company),
            "offer a collaboration on cloud security solutions".to_string(),
            "schedule a brief consultation about scaling their infrastructure".to_string(),
        ];

        Self {
            client,
            sender,
            settings,
            goals,
        }
    }

    pub async fn generate_profile_email(
        &self,
        profile: &ScrapedProfile,
        context: &str,
        first_name: &str,
    ) -> GeneratedEmail {
        let Some(client) = &self.client else {
            return profile_fallback_email(profile, first_name, &self.sender);
        };

        let prompt = self.profile_prompt(context, first_name);
        match client
            .complete(
                &prompt,
                self.settings.profile_max_tokens,
                self.settings.temperature,
            )
            .await
        {
            Ok(raw) => parse_generated(&raw).unwrap_or_else(|| {
                warn!("Unparseable generation output, using template email");
                profile_fallback_email(profile, first_name, &self.sender)
            }),
            Err(e) => {
                warn!("Generation failed: {}", e);
                profile_fallback_email(profile, first_name, &self.sender)
            }
        }
    }

    pub async fn generate_website_email(
        &self,
        site: &WebsiteSnapshot,
        contact_name: &str,
    ) -> GeneratedEmail {
        let Some(client) = &self.client else {
            return website_fallback_email(site, contact_name, &self.sender);
        };

        let context = format_website_context(site, contact_name);
        let first_name = contact_name.split_whitespace().next().unwrap_or("there");
        let prompt = self.website_prompt(&context, first_name);
        match client
            .complete(
                &prompt,
                self.settings.website_max_tokens,
                self.settings.temperature,
            )
            .await
        {
            Ok(raw) => parse_generated(&raw).unwrap_or_else(|| {
                warn!("Unparseable generation output, using template email");
                website_fallback_email(site, contact_name, &self.sender)
            }),
            Err(e) => {
                warn!("Generation failed: {}", e);
                website_fallback_email(site, contact_name, &self.sender)
            }
        }
    }

    fn profile_prompt(&self, context: &str, first_name: &str) -> String {
        let goal = &self.goals[fastrand::usize(..self.goals.len())];
        let tone = TONES[fastrand::usize(..TONES.len())];

        format!(
            "Write a personalized cold outreach email to {first_name} based on their LinkedIn profile:\n\n\
             {context}\n\n\
             IMPORTANT REQUIREMENTS:\n\
             1. If they have recent LinkedIn posts, reference their most recent post naturally in the email\n\
             2. Connect their post content to their business/role\n\
             3. The goal is to {goal}\n\
             4. Keep it under 150 words, {tone} tone\n\
             5. The body must be HTML with <p> tags for paragraphs\n\
             6. End the body with this exact signature:\n{signature}\n\n\
             Reply with a single JSON object and nothing else:\n\
             {{\"subject\": \"compelling subject line, no HTML tags\", \"body\": \"email body in HTML with <p> tags\"}}",
            first_name = first_name,
            context = context,
            goal = goal,
            tone = tone,
            signature = signature_html(&self.sender),
        )
    }

    fn website_prompt(&self, context: &str, first_name: &str) -> String {
        let goal = &self.goals[fastrand::usize(..self.goals.len())];
        let tone = TONES[fastrand::usize(..TONES.len())];

        format!(
            "Write a personalized cold outreach email to {first_name} based on their company website:\n\n\
             {context}\n\n\
             IMPORTANT REQUIREMENTS:\n\
             1. Reference specific details from their website (services, technologies, recent news)\n\
             2. Connect their business to relevant technology solutions\n\
             3. The goal is to {goal}\n\
             4. Keep it under 150 words, {tone} tone\n\
             5. The body must be HTML with <p> tags for paragraphs\n\
             6. End the body with this exact signature:\n{signature}\n\n\
             Reply with a single JSON object and nothing else:\n\
             {{\"subject\": \"compelling subject line, no HTML tags\", \"body\": \"email body in HTML with <p> tags\"}}",
            first_name = first_name,
            context = context,
            goal = goal,
            tone = tone,
            signature = signature_html(&self.sender),
        )
    }
}

/// Parses the model reply at the generation boundary. The structured
/// {subject, body} contract is tried first; a literal "Subject:" marker split
/// remains as a lenient secondary path for free-text replies.
pub fn parse_generated(raw: &str) -> Option<GeneratedEmail> {
    parse_structured(raw).or_else(|| parse_subject_marker(raw))
}

fn parse_structured(raw: &str) -> Option<GeneratedEmail> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }

    let email: GeneratedEmail = serde_json::from_str(&raw[start..=end]).ok()?;
    if email.subject.trim().is_empty() || email.body.trim().is_empty() {
        return None;
    }
    Some(GeneratedEmail {
        subject: email.subject.trim().to_string(),
        body: email.body.trim().to_string(),
    })
}

fn parse_subject_marker(raw: &str) -> Option<GeneratedEmail> {
    let mut lines = raw.lines();

    let subject = loop {
        let line = lines.next()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        break line.strip_prefix("Subject:")?.trim().to_string();
    };

    let body = lines
        .skip_while(|line| line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string();

    if subject.is_empty() || body.is_empty() {
        return None;
    }
    Some(GeneratedEmail { subject, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_reply_is_parsed() {
        let raw = r#"{"subject": "Quick question", "body": "<p>Hi Jane,</p><p>Hello.</p>"}"#;
        let email = parse_generated(raw).unwrap();
        assert_eq!(email.subject, "Quick question");
        assert_eq!(email.body, "<p>Hi Jane,</p><p>Hello.</p>");
    }

    #[test]
    fn structured_reply_inside_code_fence_is_parsed() {
        let raw = "```json\n{\"subject\": \"Hi\", \"body\": \"<p>Hello</p>\"}\n```";
        let email = parse_generated(raw).unwrap();
        assert_eq!(email.subject, "Hi");
        assert_eq!(email.body, "<p>Hello</p>");
    }

    #[test]
    fn subject_marker_reply_is_parsed() {
        let raw = "Subject: Your work at Acme\n\n<p>Hi Jane,</p>\n<p>Impressive work.</p>";
        let email = parse_generated(raw).unwrap();
        assert_eq!(email.subject, "Your work at Acme");
        assert_eq!(email.body, "<p>Hi Jane,</p>\n<p>Impressive work.</p>");
    }

    #[test]
    fn leading_blank_lines_before_subject_are_tolerated() {
        let raw = "\n\nSubject: Hello\n\n<p>Body</p>";
        let email = parse_generated(raw).unwrap();
        assert_eq!(email.subject, "Hello");
        assert_eq!(email.body, "<p>Body</p>");
    }

    #[test]
    fn garbage_replies_are_rejected() {
        assert!(parse_generated("").is_none());
        assert!(parse_generated("I can't help with that.").is_none());
        assert!(parse_generated("Subject: only a subject").is_none());
        assert!(parse_generated(r#"{"subject": "", "body": ""}"#).is_none());
    }

    #[tokio::test]
    async fn missing_credentials_mean_template_emails() {
        let generator = EmailGenerator::new(
            None,
            crate::config::SenderIdentity {
                name: "Alex".to_string(),
                title: "AE".to_string(),
                email: "a@e.com".to_string(),
                company: "Example Co".to_string(),
                company_url: "https://example.com".to_string(),
                linkedin: String::new(),
                phone: String::new(),
                address: String::new(),
            },
            crate::config::GenerationSettings {
                profile_max_tokens: 400,
                website_max_tokens: 1000,
                temperature: 0.7,
            },
        );

        let profile = ScrapedProfile::fallback_named("Jane Doe");
        let email = generator.generate_profile_email(&profile, "", "Jane").await;
        assert!(!email.subject.is_empty());
        assert!(email.body.contains("<p>Hi Jane,</p>"));
        assert!(email.body.contains("Example Co"));
    }
}
