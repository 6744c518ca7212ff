// src/scraper/website.rs - Company website extraction over plain HTTP
use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, warn};

use super::types::WebsiteSnapshot;

const SERVICE_SELECTORS: &[&str] = &[
    "section[class*='service']",
    "div[class*='service']",
    "section[class*='product']",
    "div[class*='product']",
    ".services",
    ".products",
    "#services",
    "#products",
];

const ABOUT_SELECTORS: &[&str] = &[
    "section[class*='about']",
    "div[class*='about']",
    ".about",
    "#about",
    "section[class*='company']",
    "div[class*='company']",
];

const NEWS_SELECTORS: &[&str] = &[
    "article",
    ".blog-post",
    ".news-item",
    "section[class*='news']",
    "div[class*='blog']",
    ".post",
];

const TECH_TERMS: &[&str] = &[
    "AWS",
    "Azure",
    "Google Cloud",
    "Docker",
    "Kubernetes",
    "React",
    "Angular",
    "Vue",
    "Python",
    "JavaScript",
    "Node.js",
    "API",
    "REST",
    "GraphQL",
    "MongoDB",
    "PostgreSQL",
    "MySQL",
    "Redis",
    "Elasticsearch",
    "Machine Learning",
    "Artificial Intelligence",
    "DevOps",
    "CI/CD",
    "Microservices",
    "Serverless",
    "Blockchain",
    "IoT",
];

const INDUSTRY_TERMS: &[&str] = &[
    "fintech",
    "healthcare",
    "e-commerce",
    "retail",
    "manufacturing",
    "logistics",
    "education",
    "real estate",
    "insurance",
    "banking",
    "startup",
    "enterprise",
    "SaaS",
    "B2B",
    "B2C",
    "marketplace",
    "platform",
    "analytics",
    "automation",
];

pub struct WebsiteScraper {
    client: Client,
    email_regex: Regex,
    phone_regex: Regex,
}

impl WebsiteScraper {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (compatible; OutreachScraper/1.0)")
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            email_regex: Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap(),
            phone_regex: Regex::new(r"\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").unwrap(),
        }
    }

    /// Fetches and parses a company website, degrading to a placeholder
    /// snapshot on any failure. Never returns an error.
    pub async fn scrape(&self, website_url: &str, company_name: &str) -> WebsiteSnapshot {
        let url = normalize_url(website_url);

        match self.fetch_page(&url).await {
            Ok(html) => {
                let snapshot = self.parse_snapshot(&html, &url);
                debug!("Scraped website {} ({} services, {} technologies)",
                    url, snapshot.services.len(), snapshot.technologies.len());
                snapshot
            }
            Err(e) => {
                warn!("Error scraping website {}: {}", url, e);
                WebsiteSnapshot::fallback(&url, company_name)
            }
        }
    }

    async fn fetch_page(
        &self,
        url: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(format!("HTTP error: {}", response.status()).into());
        }
        Ok(response.text().await?)
    }

    fn parse_snapshot(&self, html: &str, url: &str) -> WebsiteSnapshot {
        let document = Html::parse_document(html);

        let title_selector = Selector::parse("title").unwrap();
        let title = document
            .select(&title_selector)
            .next()
            .map(|t| normalize_text(&t.text().collect::<Vec<_>>().join(" ")))
            .unwrap_or_else(|| "Website".to_string());

        let meta_selector = Selector::parse("meta[name='description']").unwrap();
        let description = document
            .select(&meta_selector)
            .next()
            .and_then(|m| m.value().attr("content"))
            .map(|content| truncate_chars(content.trim(), 300))
            .unwrap_or_default();

        let services = extract_sections(&document, SERVICE_SELECTORS, 20, 500, 3, 200);
        let about = extract_about(&document);
        let recent_news = extract_news(&document);

        let html_lower = html.to_lowercase();
        let technologies = scan_terms(&html_lower, TECH_TERMS, 5);
        let industry_keywords = scan_terms(&html_lower, INDUSTRY_TERMS, 3);

        let contact_email = self
            .email_regex
            .find(html)
            .map(|m| m.as_str().to_string());
        let contact_phone = self
            .phone_regex
            .find(html)
            .map(|m| m.as_str().to_string());

        WebsiteSnapshot {
            url: url.to_string(),
            title,
            description,
            services,
            about,
            recent_news,
            technologies,
            industry_keywords,
            contact_email,
            contact_phone,
        }
    }
}

fn normalize_url(website_url: &str) -> String {
    if website_url.starts_with("http://") || website_url.starts_with("https://") {
        website_url.to_string()
    } else {
        format!("https://{}", website_url)
    }
}

fn normalize_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

fn extract_sections(
    document: &Html,
    selectors: &[&str],
    min_len: usize,
    max_len: usize,
    max_items: usize,
    item_truncate: usize,
) -> Vec<String> {
    let mut sections = Vec::new();

    for &selector in selectors {
        let parsed = Selector::parse(selector).unwrap();
        for element in document.select(&parsed).take(3) {
            let text = normalize_text(&element.text().collect::<Vec<_>>().join(" "));
            if text.len() > min_len && text.len() < max_len {
                sections.push(truncate_chars(&text, item_truncate));
            }
        }
        if sections.len() >= max_items {
            break;
        }
    }

    sections.truncate(max_items);
    sections
}

fn extract_about(document: &Html) -> String {
    for &selector in ABOUT_SELECTORS {
        let parsed = Selector::parse(selector).unwrap();
        if let Some(element) = document.select(&parsed).next() {
            let text = normalize_text(&element.text().collect::<Vec<_>>().join(" "));
            if text.len() > 50 {
                return truncate_chars(&text, 400);
            }
        }
    }
    String::new()
}

fn extract_news(document: &Html) -> Vec<String> {
    let headline_selector = Selector::parse("h1, h2, h3, h4").unwrap();
    let mut news = Vec::new();

    for &selector in NEWS_SELECTORS {
        let parsed = Selector::parse(selector).unwrap();
        for element in document.select(&parsed).take(2) {
            if let Some(headline) = element.select(&headline_selector).next() {
                let text = normalize_text(&headline.text().collect::<Vec<_>>().join(" "));
                if text.len() > 10 {
                    news.push(truncate_chars(&text, 150));
                }
            }
        }
        if news.len() >= 2 {
            break;
        }
    }

    news.truncate(2);
    news
}

fn scan_terms(page_text_lower: &str, terms: &[&str], max_items: usize) -> Vec<String> {
    terms
        .iter()
        .filter(|term| page_text_lower.contains(&term.to_lowercase()))
        .take(max_items)
        .map(|term| term.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html>
      <head>
        <title>  Acme   Robotics  </title>
        <meta name="description" content="Acme builds warehouse robots.">
      </head>
      <body>
        <div class="services-overview">
          <p>We offer robot fleet management, predictive maintenance and custom integrations for warehouses.</p>
        </div>
        <section id="about">
          <p>Acme Robotics was founded in 2015 and has grown into a leading automation company serving logistics providers worldwide.</p>
        </section>
        <article><h2>Acme raises Series B to expand into Europe</h2></article>
        <p>Our stack runs on AWS with Kubernetes and PostgreSQL.</p>
        <footer>Contact us at hello@acme-robotics.com or (415) 555-0123.</footer>
      </body>
    </html>"#;

    fn scraper() -> WebsiteScraper {
        WebsiteScraper::new()
    }

    #[test]
    fn parses_title_and_description() {
        let snapshot = scraper().parse_snapshot(PAGE, "https://acme-robotics.com");
        assert_eq!(snapshot.title, "Acme Robotics");
        assert_eq!(snapshot.description, "Acme builds warehouse robots.");
    }

    #[test]
    fn collects_services_about_and_news() {
        let snapshot = scraper().parse_snapshot(PAGE, "https://acme-robotics.com");
        assert_eq!(snapshot.services.len(), 1);
        assert!(snapshot.services[0].contains("fleet management"));
        assert!(snapshot.about.contains("founded in 2015"));
        assert_eq!(snapshot.recent_news.len(), 1);
        assert!(snapshot.recent_news[0].contains("Series B"));
    }

    #[test]
    fn scans_technology_and_industry_terms() {
        let snapshot = scraper().parse_snapshot(PAGE, "https://acme-robotics.com");
        assert!(snapshot.technologies.contains(&"AWS".to_string()));
        assert!(snapshot.technologies.contains(&"Kubernetes".to_string()));
        assert!(snapshot.technologies.contains(&"PostgreSQL".to_string()));
        assert!(snapshot
            .industry_keywords
            .contains(&"logistics".to_string()));
        assert!(snapshot.industry_keywords.len() <= 3);
    }

    #[test]
    fn extracts_first_contact_email_and_phone() {
        let snapshot = scraper().parse_snapshot(PAGE, "https://acme-robotics.com");
        assert_eq!(
            snapshot.contact_email.as_deref(),
            Some("hello@acme-robotics.com")
        );
        assert_eq!(snapshot.contact_phone.as_deref(), Some("(415) 555-0123"));
    }

    #[test]
    fn url_scheme_is_added_when_missing() {
        assert_eq!(normalize_url("acme.com"), "https://acme.com");
        assert_eq!(normalize_url("http://acme.com"), "http://acme.com");
        assert_eq!(normalize_url("https://acme.com"), "https://acme.com");
    }
}
