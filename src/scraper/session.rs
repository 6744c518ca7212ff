use thirtyfour::cookie::Cookie;
use thirtyfour::{DesiredCapabilities, WebDriver};
use tracing::{info, warn};

use crate::config::ScrapingConfig;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// An owned browser session. Created at the start of a run, passed by
/// reference into each scrape call, and released with [`BrowserSession::quit`]
/// when the run finishes.
pub struct BrowserSession {
    driver: WebDriver,
}

impl BrowserSession {
    pub async fn start(config: &ScrapingConfig) -> Result<Self> {
        let mut caps = DesiredCapabilities::chrome();
        if config.headless {
            caps.add_arg("--headless=new")?;
        }
        caps.add_arg("--no-sandbox")?;
        caps.add_arg("--disable-dev-shm-usage")?;
        caps.add_arg("--disable-gpu")?;
        caps.add_arg("--window-size=1920,1080")?;
        caps.add_arg("--disable-blink-features=AutomationControlled")?;
        caps.add_arg(&format!("--user-agent={}", USER_AGENT))?;

        let driver = WebDriver::new(&config.webdriver_url, caps).await?;
        let session = Self { driver };
        session.apply_linkedin_cookie().await;
        Ok(session)
    }

    /// Installs the `li_at` session cookie from LINKEDIN_SESSION_COOKIE when
    /// present. Failure here only degrades scraping quality, so it is logged
    /// and swallowed.
    async fn apply_linkedin_cookie(&self) {
        let token = match std::env::var("LINKEDIN_SESSION_COOKIE") {
            Ok(token) if !token.is_empty() => token,
            _ => {
                warn!("No LinkedIn session cookie found in environment variables");
                return;
            }
        };

        let result: Result<()> = async {
            // The domain must be loaded before the cookie can be attached.
            self.driver.goto("https://www.linkedin.com").await?;
            let mut cookie = Cookie::new("li_at", token);
            cookie.set_domain(".linkedin.com");
            cookie.set_path("/");
            cookie.set_secure(true);
            self.driver.add_cookie(cookie).await?;
            self.driver.refresh().await?;
            Ok(())
        }
        .await;

        match result {
            Ok(()) => info!("LinkedIn session cookie applied"),
            Err(e) => warn!("Failed to apply LinkedIn session cookie: {}", e),
        }
    }

    pub fn driver(&self) -> &WebDriver {
        &self.driver
    }

    pub async fn quit(self) -> Result<()> {
        self.driver.quit().await?;
        Ok(())
    }
}
