use std::path::PathBuf;
use tracing::{debug, warn};

use super::types::ScrapedProfile;

/// Read-through cache of scraped profiles, one JSON file per profile slug.
/// There is no expiry: a cached profile is reused as-is on later runs.
pub struct ProfileCache {
    directory: PathBuf,
}

impl ProfileCache {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub async fn load(&self, profile_url: &str) -> Option<ScrapedProfile> {
        let path = self.path_for(profile_url);
        let content = tokio::fs::read_to_string(&path).await.ok()?;
        match serde_json::from_str(&content) {
            Ok(profile) => {
                debug!("Loaded cached profile from {}", path.display());
                Some(profile)
            }
            Err(e) => {
                warn!("Ignoring unreadable profile cache {}: {}", path.display(), e);
                None
            }
        }
    }

    pub async fn store(&self, profile_url: &str, profile: &ScrapedProfile) {
        let path = self.path_for(profile_url);
        let result: Result<(), Box<dyn std::error::Error + Send + Sync>> = async {
            tokio::fs::create_dir_all(&self.directory).await?;
            let json = serde_json::to_string_pretty(profile)?;
            tokio::fs::write(&path, json).await?;
            Ok(())
        }
        .await;

        if let Err(e) = result {
            warn!("Failed to cache profile to {}: {}", path.display(), e);
        }
    }

    fn path_for(&self, profile_url: &str) -> PathBuf {
        self.directory
            .join(format!("profile_{}.json", slug_for(profile_url)))
    }
}

/// Filesystem-safe identifier from the profile URL's last path segment.
pub fn slug_for(profile_url: &str) -> String {
    let segment = super::profile::profile_slug(profile_url);

    let slug: String = segment
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();

    if slug.is_empty() {
        "unknown".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_uses_last_path_segment() {
        assert_eq!(slug_for("https://www.linkedin.com/in/joel-garcia/"), "joel_garcia");
        assert_eq!(slug_for("https://linkedin.com/in/janeSmith"), "janesmith");
        assert_eq!(slug_for(""), "unknown");
    }

    #[tokio::test]
    async fn store_then_load_round_trips() {
        let dir = std::env::temp_dir().join(format!("profile-cache-{}", uuid::Uuid::new_v4()));
        let cache = ProfileCache::new(&dir);
        let url = "https://www.linkedin.com/in/jane-doe/";

        assert!(cache.load(url).await.is_none());

        let profile = ScrapedProfile::fallback_named("Jane Doe");
        cache.store(url, &profile).await;

        let loaded = cache.load(url).await.expect("cached profile");
        assert_eq!(loaded.name, "Jane Doe");
        assert_eq!(loaded.job_title, profile.job_title);

        tokio::fs::remove_dir_all(&dir).await.ok();
    }
}
