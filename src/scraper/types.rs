use serde::{Deserialize, Serialize};

pub const NAME_NOT_FOUND: &str = "Name not found";
pub const HEADLINE_NOT_FOUND: &str = "Headline not found";
pub const LOCATION_NOT_FOUND: &str = "Location not found";
pub const COMPANY_NOT_FOUND: &str = "Company not found";
pub const COMPANY_NOT_AVAILABLE: &str = "Company not available";
pub const LOCATION_NOT_AVAILABLE: &str = "Location not available";
pub const ABOUT_NOT_AVAILABLE: &str =
    "LinkedIn profile information not available due to access restrictions.";

/// Best-effort snapshot of a contact's public profile page. Every field
/// degrades to a non-empty placeholder string when extraction fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedProfile {
    pub name: String,
    pub company: String,
    pub job_title: String,
    pub about: String,
    #[serde(default)]
    pub recent_posts: Vec<RecentPost>,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentPost {
    pub text: String,
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    pub position_title: String,
    pub institution_name: String,
    pub duration: String,
}

impl ScrapedProfile {
    /// Placeholder profile used when there is nothing to scrape or the page
    /// is blocked. All fields hold non-empty strings.
    pub fn fallback_named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            company: COMPANY_NOT_AVAILABLE.to_string(),
            job_title: "Professional".to_string(),
            about: ABOUT_NOT_AVAILABLE.to_string(),
            recent_posts: Vec::new(),
            experiences: Vec::new(),
            location: LOCATION_NOT_AVAILABLE.to_string(),
        }
    }
}

/// Best-effort snapshot of a company website.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebsiteSnapshot {
    pub url: String,
    pub title: String,
    pub description: String,
    pub services: Vec<String>,
    pub about: String,
    pub recent_news: Vec<String>,
    pub technologies: Vec<String>,
    pub industry_keywords: Vec<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

impl WebsiteSnapshot {
    pub fn fallback(url: &str, company_name: &str) -> Self {
        let title = if company_name.is_empty() {
            "Company Website".to_string()
        } else {
            format!("{} Website", company_name)
        };
        Self {
            url: url.to_string(),
            title,
            description: "Website information not available due to access restrictions."
                .to_string(),
            services: Vec::new(),
            about: String::new(),
            recent_news: Vec::new(),
            technologies: Vec::new(),
            industry_keywords: Vec::new(),
            contact_email: None,
            contact_phone: None,
        }
    }
}
