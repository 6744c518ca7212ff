// src/generator/fallback.rs - Deterministic template emails used when AI
// generation is unavailable or fails
use crate::config::SenderIdentity;
use crate::models::GeneratedEmail;
use crate::scraper::{ScrapedProfile, WebsiteSnapshot};

/// Template email built from whatever profile fields were extracted. Always
/// yields a non-empty subject and a body made of well-formed paragraph tags,
/// even for a completely empty profile.
pub fn profile_fallback_email(
    profile: &ScrapedProfile,
    first_name: &str,
    sender: &SenderIdentity,
) -> GeneratedEmail {
    let first_name = if first_name.is_empty() { "there" } else { first_name };
    let role = &profile.job_title;
    let company = &profile.company;

    let mut paragraphs = vec![format!("<p>Hi {},</p>", first_name)];

    if let Some(post) = profile.recent_posts.first() {
        let teaser: String = post.text.chars().take(50).collect();
        paragraphs.push(format!(
            "<p>I saw your recent LinkedIn post about {}... and it really resonated with me.</p>",
            teaser
        ));
    }

    paragraphs.push(format!(
        "<p>Your role as {} at {} caught my attention, especially given your insights on LinkedIn.</p>",
        role, company
    ));
    paragraphs.push(format!(
        "<p>At {}, we help companies optimize their cloud infrastructure and would love to discuss how we might support {}'s growth.</p>",
        sender.company, company
    ));
    paragraphs.push("<p>Would you have 15 minutes for a quick call?</p>".to_string());
    paragraphs.push("<p>Thanks,</p>".to_string());
    paragraphs.push(signature_html(sender));

    GeneratedEmail {
        subject: "Your recent LinkedIn post caught my attention".to_string(),
        body: paragraphs.join("\n\n"),
    }
}

/// Template email built from a website snapshot.
pub fn website_fallback_email(
    site: &WebsiteSnapshot,
    contact_name: &str,
    sender: &SenderIdentity,
) -> GeneratedEmail {
    let first_name = contact_name
        .split_whitespace()
        .next()
        .unwrap_or("there")
        .to_string();

    let impressed_by = if site.description.is_empty() {
        "business approach".to_string()
    } else {
        site.description.chars().take(100).collect()
    };

    let tech_mention = site
        .technologies
        .first()
        .map(|tech| {
            format!(
                " I noticed you're using {} - we have extensive experience optimizing similar technology stacks.",
                tech
            )
        })
        .unwrap_or_default();

    let body = format!(
        "<p>Hi {},</p>\n\n\
         <p>I came across {}'s website and was impressed by your {}.{}</p>\n\n\
         <p>At {}, we help companies optimize their technology infrastructure and accelerate digital transformation. Would you have 15 minutes to discuss potential opportunities?</p>\n\n\
         <p>Thanks,</p>\n\n{}",
        first_name,
        site.title,
        impressed_by,
        tech_mention,
        sender.company,
        signature_html(sender)
    );

    GeneratedEmail {
        subject: format!("Technology optimization opportunity for {}", site.title),
        body,
    }
}

/// HTML signature block shared by templates and generation prompts. Optional
/// identity fields are omitted rather than rendered empty.
pub fn signature_html(sender: &SenderIdentity) -> String {
    let mut lines = vec![
        sender.name.clone(),
        sender.title.clone(),
        format!(
            "{}: <a href=\"{}\">{}</a>",
            sender.company, sender.company_url, sender.company_url
        ),
    ];
    if !sender.linkedin.is_empty() {
        lines.push(format!(
            "LinkedIn Profile: <a href=\"{}\">{}</a>",
            sender.linkedin, sender.linkedin
        ));
    }
    if !sender.phone.is_empty() {
        lines.push(sender.phone.clone());
    }
    if !sender.address.is_empty() {
        lines.push(sender.address.clone());
    }
    format!("<p>{}</p>", lines.join("<br>\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::RecentPost;

    fn sender() -> SenderIdentity {
        SenderIdentity {
            name: "Alex Doe".to_string(),
            title: "Account Executive".to_string(),
            email: "alex@example.com".to_string(),
            company: "Example Co".to_string(),
            company_url: "https://example.com".to_string(),
            linkedin: String::new(),
            phone: "(415) 555-0100".to_string(),
            address: String::new(),
        }
    }

    fn empty_profile() -> ScrapedProfile {
        ScrapedProfile {
            name: String::new(),
            company: String::new(),
            job_title: String::new(),
            about: String::new(),
            recent_posts: Vec::new(),
            experiences: Vec::new(),
            location: String::new(),
        }
    }

    #[test]
    fn empty_profile_still_yields_well_formed_email() {
        let email = profile_fallback_email(&empty_profile(), "", &sender());
        assert!(!email.subject.is_empty());
        assert!(email.body.starts_with("<p>Hi there,</p>"));
        assert!(email.body.contains("<p>Thanks,</p>"));
        assert_eq!(email.body.matches("<p>").count(), email.body.matches("</p>").count());
    }

    #[test]
    fn recent_post_teaser_is_included_when_present() {
        let mut profile = empty_profile();
        profile.recent_posts.push(RecentPost {
            text: "Scaling our data pipeline to a billion events".to_string(),
            date: String::new(),
        });
        let email = profile_fallback_email(&profile, "Jane", &sender());
        assert!(email.body.contains("I saw your recent LinkedIn post about Scaling"));
    }

    #[test]
    fn website_fallback_mentions_first_detected_technology() {
        let mut site = WebsiteSnapshot::fallback("https://acme.com", "Acme");
        site.technologies = vec!["AWS".to_string(), "Kubernetes".to_string()];
        let email = website_fallback_email(&site, "Jane Doe", &sender());
        assert_eq!(email.subject, "Technology optimization opportunity for Acme Website");
        assert!(email.body.contains("I noticed you're using AWS"));
        assert!(email.body.starts_with("<p>Hi Jane,</p>"));
    }

    #[test]
    fn signature_omits_empty_identity_fields() {
        let html = signature_html(&sender());
        assert!(html.contains("Alex Doe"));
        assert!(html.contains("(415) 555-0100"));
        assert!(!html.contains("LinkedIn Profile"));
    }
}
