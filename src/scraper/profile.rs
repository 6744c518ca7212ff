// src/scraper/profile.rs - LinkedIn profile extraction with graceful degradation
use std::time::Duration;
use thirtyfour::{By, WebDriver};
use tracing::{debug, warn};

use super::session::BrowserSession;
use super::types::{
    Experience, RecentPost, ScrapedProfile, COMPANY_NOT_FOUND, HEADLINE_NOT_FOUND, LOCATION_NOT_FOUND,
    NAME_NOT_FOUND,
};
use crate::config::ScrapingConfig;

const NAME_SELECTORS: &[&str] = &[
    "h1.text-heading-xlarge",
    "h1.break-words",
    "h1",
    "[data-generated-suggestion-target]",
    ".pv-text-details__left-panel h1",
];

const HEADLINE_SELECTORS: &[&str] = &[
    ".text-body-medium.break-words",
    ".text-body-medium",
    ".pv-text-details__left-panel .text-body-medium",
];

const LOCATION_SELECTORS: &[&str] = &[
    ".text-body-small.inline.t-black--light.break-words",
    ".text-body-small",
    ".pv-text-details__left-panel .text-body-small",
];

const ABOUT_SELECTORS: &[&str] = &[
    "#about ~ div .inline-show-more-text",
    "section.pv-about-section",
    ".pv-shared-text-with-see-more",
];

pub struct ProfileScraper {
    settle_wait: Duration,
    activity_wait: Duration,
}

impl ProfileScraper {
    pub fn new(config: &ScrapingConfig) -> Self {
        Self {
            settle_wait: Duration::from_secs(config.settle_wait_seconds),
            activity_wait: Duration::from_secs(config.activity_wait_seconds),
        }
    }

    /// Scrapes a profile page, degrading to a placeholder profile on any
    /// failure. Never returns an error.
    pub async fn scrape(&self, session: &BrowserSession, profile_url: &str) -> ScrapedProfile {
        match self.try_scrape(session, profile_url).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!("LinkedIn scraping failed for {}: {}", profile_url, e);
                fallback_profile(profile_url)
            }
        }
    }

    async fn try_scrape(
        &self,
        session: &BrowserSession,
        profile_url: &str,
    ) -> Result<ScrapedProfile, Box<dyn std::error::Error + Send + Sync>> {
        let driver = session.driver();

        driver.goto(profile_url).await?;
        tokio::time::sleep(self.settle_wait).await;

        let page_title = driver.title().await.unwrap_or_default().to_lowercase();
        let current_url = driver
            .current_url()
            .await
            .map(|u| u.to_string())
            .unwrap_or_default()
            .to_lowercase();

        if looks_blocked(&page_title, &current_url) {
            warn!("LinkedIn access blocked or session expired for {}", profile_url);
            return Ok(fallback_profile(profile_url));
        }

        let name = first_matching_text(driver, NAME_SELECTORS, |_| true)
            .await
            .unwrap_or_else(|| NAME_NOT_FOUND.to_string());

        let headline = first_matching_text(driver, HEADLINE_SELECTORS, |text| {
            text.len() > 5 && !text.to_lowercase().contains("connections")
        })
        .await
        .unwrap_or_else(|| HEADLINE_NOT_FOUND.to_string());

        let location = first_matching_text(driver, LOCATION_SELECTORS, |text| text.contains(','))
            .await
            .unwrap_or_else(|| LOCATION_NOT_FOUND.to_string());

        if name == NAME_NOT_FOUND && headline == HEADLINE_NOT_FOUND {
            warn!("Could not extract profile information, using fallback");
            return Ok(fallback_profile(profile_url));
        }

        let about = first_matching_text(driver, ABOUT_SELECTORS, |text| text.len() > 20)
            .await
            .map(|text| truncate_chars(&text, 400))
            .unwrap_or_default();

        let experiences = capture_experiences(driver).await;
        let recent_posts = self.capture_recent_activity(driver, profile_url).await;

        debug!("Scraped profile fields for {}", name);

        Ok(ScrapedProfile {
            company: company_from_headline(&headline),
            job_title: headline,
            name,
            about,
            recent_posts,
            experiences,
            location,
        })
    }

    /// Visits the profile's activity feed and captures the most recent post
    /// text. Fully guarded: any failure yields an empty list.
    async fn capture_recent_activity(&self, driver: &WebDriver, profile_url: &str) -> Vec<RecentPost> {
        let activity_url = format!("{}/recent-activity/all/", profile_url.trim_end_matches('/'));

        if driver.goto(&activity_url).await.is_err() {
            return Vec::new();
        }
        tokio::time::sleep(self.activity_wait).await;

        let Ok(activities) = driver.find_all(By::Css("[data-id*='urn:li:activity']")).await else {
            return Vec::new();
        };

        let Some(first) = activities.into_iter().next() else {
            return Vec::new();
        };

        let Ok(text_elem) = first.find(By::Css(".feed-shared-text")).await else {
            return Vec::new();
        };

        match text_elem.text().await {
            Ok(text) if !text.trim().is_empty() => vec![RecentPost {
                text: truncate_chars(text.trim(), 250),
                date: String::new(),
            }],
            _ => Vec::new(),
        }
    }
}

/// Returns the first non-empty, accepted element text across an ordered list
/// of selector candidates. Lookup failures on one selector never abort the
/// remaining candidates.
async fn first_matching_text(
    driver: &WebDriver,
    selectors: &[&str],
    accept: impl Fn(&str) -> bool,
) -> Option<String> {
    for &selector in selectors {
        let Ok(elements) = driver.find_all(By::Css(selector)).await else {
            continue;
        };
        for element in elements {
            let Ok(text) = element.text().await else {
                continue;
            };
            let text = text.trim();
            if !text.is_empty() && accept(text) {
                return Some(text.to_string());
            }
        }
    }
    None
}

async fn capture_experiences(driver: &WebDriver) -> Vec<Experience> {
    let mut experiences = Vec::new();

    let Ok(items) = driver
        .find_all(By::Css("#experience ~ div li.artdeco-list__item"))
        .await
    else {
        return experiences;
    };

    for item in items.into_iter().take(2) {
        let Ok(spans) = item.find_all(By::Css("span[aria-hidden='true']")).await else {
            continue;
        };
        let mut texts = Vec::new();
        for span in spans.into_iter().take(3) {
            if let Ok(text) = span.text().await {
                let text = text.trim().to_string();
                if !text.is_empty() {
                    texts.push(text);
                }
            }
        }
        if texts.len() >= 2 {
            experiences.push(Experience {
                position_title: texts[0].clone(),
                institution_name: texts[1].clone(),
                duration: texts.get(2).cloned().unwrap_or_default(),
            });
        }
    }

    experiences
}

pub fn looks_blocked(page_title: &str, current_url: &str) -> bool {
    page_title.contains("this page isn't working")
        || current_url.contains("login")
        || current_url.contains("authwall")
        || current_url.contains("challenge")
}

pub fn fallback_profile(profile_url: &str) -> ScrapedProfile {
    ScrapedProfile::fallback_named(&display_name_from_url(profile_url))
}

/// Last non-empty path segment of the profile URL.
pub fn profile_slug(profile_url: &str) -> String {
    if let Ok(parsed) = url::Url::parse(profile_url) {
        if let Some(last) = parsed
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        {
            return last.to_string();
        }
    }
    profile_url
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or("")
        .to_string()
}

/// Derives a display name from the profile URL's last path segment, splitting
/// on case boundaries, dashes and underscores.
pub fn display_name_from_url(profile_url: &str) -> String {
    let slug = profile_slug(profile_url);

    let mut parts: Vec<String> = Vec::new();
    let mut current = String::new();
    for ch in slug.chars() {
        if ch.is_uppercase() && !current.is_empty() {
            parts.push(capitalize(&current));
            current = ch.to_string();
        } else if ch.is_alphabetic() {
            current.push(ch);
        } else if (ch == '-' || ch == '_') && !current.is_empty() {
            parts.push(capitalize(&current));
            current.clear();
        }
    }
    if !current.is_empty() {
        parts.push(capitalize(&current));
    }

    if parts.is_empty() {
        "LinkedIn User".to_string()
    } else {
        parts.join(" ")
    }
}

pub fn company_from_headline(headline: &str) -> String {
    if let Some(idx) = headline.rfind(" at ") {
        headline[idx + 4..].trim().to_string()
    } else if let Some(idx) = headline.rfind(" @ ") {
        headline[idx + 3..].trim().to_string()
    } else {
        COMPANY_NOT_FOUND.to_string()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_splits_hyphenated_slug() {
        assert_eq!(
            display_name_from_url("https://www.linkedin.com/in/joel-garcia/"),
            "Joel Garcia"
        );
    }

    #[test]
    fn display_name_splits_case_boundaries_and_underscores() {
        assert_eq!(
            display_name_from_url("https://linkedin.com/in/janeSmith"),
            "Jane Smith"
        );
        assert_eq!(
            display_name_from_url("https://linkedin.com/in/jane_smith_dev"),
            "Jane Smith Dev"
        );
    }

    #[test]
    fn display_name_skips_digits_and_lowercases_tails() {
        assert_eq!(
            display_name_from_url("https://linkedin.com/in/joel-garcia-0a7963139/"),
            "Joel Garcia A"
        );
        assert_eq!(
            display_name_from_url("https://linkedin.com/in/joelgarcia"),
            "Joelgarcia"
        );
    }

    #[test]
    fn display_name_defaults_when_slug_is_unusable() {
        assert_eq!(display_name_from_url(""), "LinkedIn User");
        assert_eq!(display_name_from_url("https://linkedin.com/in/12345/"), "LinkedIn User");
    }

    #[test]
    fn company_extracted_after_last_at_marker() {
        assert_eq!(company_from_headline("CTO at Acme"), "Acme");
        assert_eq!(company_from_headline("Engineer @ Initech"), "Initech");
        assert_eq!(
            company_from_headline("Head of Data at Rocks at Globex"),
            "Globex"
        );
        assert_eq!(company_from_headline("Freelance consultant"), COMPANY_NOT_FOUND);
    }

    #[test]
    fn blocked_pages_are_detected_from_title_or_url() {
        assert!(looks_blocked("this page isn't working", ""));
        assert!(looks_blocked("", "https://www.linkedin.com/authwall?x=1"));
        assert!(looks_blocked("", "https://www.linkedin.com/login"));
        assert!(looks_blocked("", "https://www.linkedin.com/checkpoint/challenge/"));
        assert!(!looks_blocked("jane smith | linkedin", "https://www.linkedin.com/in/jane/"));
    }

    #[test]
    fn fallback_profile_fields_are_all_non_empty() {
        let profile = fallback_profile("https://linkedin.com/in/joel-garcia/");
        assert_eq!(profile.name, "Joel Garcia");
        assert!(!profile.company.is_empty());
        assert!(!profile.job_title.is_empty());
        assert!(!profile.about.is_empty());
        assert!(!profile.location.is_empty());
        assert!(profile.recent_posts.is_empty());
    }

    #[test]
    fn truncation_is_char_safe() {
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo");
        assert_eq!(truncate_chars("short", 250), "short");
    }
}
