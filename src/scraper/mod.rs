pub mod cache;
pub mod profile;
pub mod session;
pub mod types;
pub mod website;

// Re-export the main types for easy importing
pub use cache::ProfileCache;
pub use profile::ProfileScraper;
pub use session::BrowserSession;
pub use types::{Experience, RecentPost, ScrapedProfile, WebsiteSnapshot};
pub use website::WebsiteScraper;
