use serde::{Deserialize, Serialize};

pub const DEFAULT_MIRROR_DOMAIN: &str = "https://nitter.net";
pub const DEFAULT_CDN_DOMAIN: &str = "https://pbs.twimg.com";

/// Knobs for a [`Scraper`](crate::Scraper) instance.
///
/// `mirror_domain` and `cdn_domain` carry no trailing slash; page paths and
/// image-proxy paths are appended verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub mirror_domain: String,
    pub cdn_domain: String,
    /// Wait after navigation for client-side rendering to finish, in ms.
    pub settle_delay_ms: u64,
    /// Bound on concurrently offloaded browser calls.
    pub worker_pool_size: usize,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            mirror_domain: DEFAULT_MIRROR_DOMAIN.to_owned(),
            cdn_domain: DEFAULT_CDN_DOMAIN.to_owned(),
            settle_delay_ms: 5000,
            worker_pool_size: 4,
        }
    }
}
