// src/generator/prompt.rs - Pure context formatting for the generation prompt
use crate::models::Contact;
use crate::scraper::{ScrapedProfile, WebsiteSnapshot};

/// Formats a scraped profile (plus optional spreadsheet context) into the
/// flat text block used as the prompt's context section. Field order is
/// fixed; empty or absent fields never produce a line.
pub fn format_profile_context(profile: &ScrapedProfile, contact: Option<&Contact>) -> String {
    let mut lines: Vec<String> = Vec::new();

    let name = pick(&profile.name, contact.map(|c| c.first_name.as_str()));
    let title = pick(&profile.job_title, contact.map(|c| c.title.as_str()));
    let company = pick(&profile.company, contact.map(|c| c.company.as_str()));

    if !name.is_empty() {
        lines.push(format!("Name: {}", name));
    }
    if !title.is_empty() || !company.is_empty() {
        if company.is_empty() {
            lines.push(format!("Role: {}", title));
        } else if title.is_empty() {
            lines.push(format!("Role: at {}", company));
        } else {
            lines.push(format!("Role: {} at {}", title, company));
        }
    }

    if !profile.about.is_empty() {
        lines.push(format!("About: {}", truncate_chars(&profile.about, 300)));
    }

    if !profile.recent_posts.is_empty() {
        lines.push("Recent LinkedIn Posts:".to_string());
        for (i, post) in profile.recent_posts.iter().enumerate() {
            lines.push(format!("Post {}: {}", i + 1, post.text));
        }
    }

    let experiences: Vec<&crate::scraper::Experience> = profile
        .experiences
        .iter()
        .filter(|exp| !exp.position_title.is_empty() && !exp.institution_name.is_empty())
        .take(2)
        .collect();
    if !experiences.is_empty() {
        lines.push("Recent Experience:".to_string());
        for exp in experiences {
            lines.push(format!("- {} at {}", exp.position_title, exp.institution_name));
        }
    }

    if let Some(contact) = contact {
        if let Some(industry) = contact.industry.as_deref().filter(|s| !s.is_empty()) {
            lines.push(format!("Industry: {}", industry));
        }
        if let Some(aws) = contact
            .aws_usage
            .as_deref()
            .filter(|s| s.to_lowercase().contains("confirmed"))
        {
            lines.push(format!("AWS Usage: {}", aws));
        }
    }

    lines.join("\n")
}

/// Formats a website snapshot into the prompt's context section.
pub fn format_website_context(site: &WebsiteSnapshot, contact_name: &str) -> String {
    let mut lines: Vec<String> = Vec::new();

    if !contact_name.is_empty() {
        lines.push(format!("Contact: {}", contact_name));
    }
    lines.push(format!("Website: {}", site.url));
    if !site.title.is_empty() {
        lines.push(format!("Company: {}", site.title));
    }
    if !site.description.is_empty() {
        lines.push(format!("Description: {}", site.description));
    }
    if !site.services.is_empty() {
        lines.push(format!("Services: {}", site.services.join(", ")));
    }
    if !site.about.is_empty() {
        lines.push(format!("About: {}...", truncate_chars(&site.about, 200)));
    }
    if !site.technologies.is_empty() {
        lines.push(format!("Technologies: {}", site.technologies.join(", ")));
    }
    if !site.industry_keywords.is_empty() {
        lines.push(format!("Industry: {}", site.industry_keywords.join(", ")));
    }
    if !site.recent_news.is_empty() {
        lines.push(format!("Recent News: {}", site.recent_news.join("; ")));
    }

    lines.join("\n")
}

/// Profile field first, spreadsheet value as backup, empty string otherwise.
fn pick(profile_value: &str, contact_value: Option<&str>) -> String {
    if !profile_value.is_empty() {
        profile_value.to_string()
    } else {
        contact_value.unwrap_or_default().to_string()
    }
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::{Experience, RecentPost};

    fn profile() -> ScrapedProfile {
        ScrapedProfile {
            name: "Jane Doe".to_string(),
            company: "Acme".to_string(),
            job_title: "CTO".to_string(),
            about: "Builds robots.".to_string(),
            recent_posts: vec![
                RecentPost {
                    text: "We shipped v2".to_string(),
                    date: String::new(),
                },
                RecentPost {
                    text: "Hiring SREs".to_string(),
                    date: String::new(),
                },
            ],
            experiences: vec![Experience {
                position_title: "CTO".to_string(),
                institution_name: "Acme".to_string(),
                duration: "3 yrs".to_string(),
            }],
            location: "SF, CA".to_string(),
        }
    }

    fn contact() -> Contact {
        Contact {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@acme.com".to_string(),
            company: "Acme Inc".to_string(),
            title: "Chief Technology Officer".to_string(),
            linkedin_url: None,
            website_url: None,
            industry: Some("Robotics".to_string()),
            aws_usage: Some("Confirmed via case study".to_string()),
        }
    }

    #[test]
    fn field_order_is_deterministic() {
        let text = format_profile_context(&profile(), Some(&contact()));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Name: Jane Doe");
        assert_eq!(lines[1], "Role: CTO at Acme");
        assert_eq!(lines[2], "About: Builds robots.");
        assert_eq!(lines[3], "Recent LinkedIn Posts:");
        assert_eq!(lines[4], "Post 1: We shipped v2");
        assert_eq!(lines[5], "Post 2: Hiring SREs");
        assert_eq!(lines[6], "Recent Experience:");
        assert_eq!(lines[7], "- CTO at Acme");
        assert_eq!(lines[8], "Industry: Robotics");
        assert_eq!(lines[9], "AWS Usage: Confirmed via case study");
    }

    #[test]
    fn empty_fields_never_emit_lines() {
        let empty = ScrapedProfile {
            name: String::new(),
            company: String::new(),
            job_title: String::new(),
            about: String::new(),
            recent_posts: Vec::new(),
            experiences: Vec::new(),
            location: String::new(),
        };
        let text = format_profile_context(&empty, None);
        assert!(text.is_empty());
        assert!(!text.contains('\n'));
    }

    #[test]
    fn spreadsheet_values_fill_missing_profile_fields() {
        let mut p = profile();
        p.name = String::new();
        p.job_title = String::new();
        p.company = String::new();
        let text = format_profile_context(&p, Some(&contact()));
        assert!(text.starts_with("Name: Jane\n"));
        assert!(text.contains("Role: Chief Technology Officer at Acme Inc"));
    }

    #[test]
    fn unconfirmed_aws_usage_is_omitted() {
        let mut c = contact();
        c.aws_usage = Some("Unknown".to_string());
        let text = format_profile_context(&profile(), Some(&c));
        assert!(!text.contains("AWS Usage"));
    }

    #[test]
    fn experience_entries_without_both_parts_are_skipped() {
        let mut p = profile();
        p.experiences = vec![Experience {
            position_title: "CTO".to_string(),
            institution_name: String::new(),
            duration: String::new(),
        }];
        let text = format_profile_context(&p, None);
        assert!(!text.contains("Recent Experience"));
    }

    #[test]
    fn website_context_orders_and_omits_fields() {
        let site = WebsiteSnapshot {
            url: "https://acme.com".to_string(),
            title: "Acme".to_string(),
            description: String::new(),
            services: vec!["Robots".to_string(), "Support".to_string()],
            about: String::new(),
            recent_news: vec!["Series B".to_string()],
            technologies: vec!["AWS".to_string()],
            industry_keywords: Vec::new(),
            contact_email: None,
            contact_phone: None,
        };
        let text = format_website_context(&site, "Jane Doe");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Contact: Jane Doe",
                "Website: https://acme.com",
                "Company: Acme",
                "Services: Robots, Support",
                "Technologies: AWS",
                "Recent News: Series B",
            ]
        );
    }
}
