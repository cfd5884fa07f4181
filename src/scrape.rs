use std::sync::Arc;
use std::time::Duration;

use headless_chrome::{Browser, Tab};
use tokio::{
    sync::{Mutex, Semaphore},
    time::sleep,
};

use crate::{
    config::ScraperConfig,
    error::ScrapeError,
    extract,
    model::{ProfileBundle, SearchResultUser},
};

pub mod puppeteer;

/// Owns one browser session for its whole lifetime and reuses a single tab
/// for every fetch. The tab has one current page at a time, so navigation is
/// serialized through `nav`; concurrent calls queue instead of clobbering
/// each other's page. `slots` bounds how many blocking browser calls may be
/// in flight on the offload pool.
pub struct Scraper {
    tab: Arc<Tab>,
    nav: Mutex<()>,
    slots: Semaphore,
    config: ScraperConfig,
    _browser: Browser,
}

impl Scraper {
    /// Launch a headless browser and open the tab all fetches go through.
    /// The session is closed when the `Scraper` is dropped.
    pub fn new(config: ScraperConfig) -> anyhow::Result<Self> {
        let browser = puppeteer::launch(true)?;
        let tab = puppeteer::first_tab(&browser)?;

        Ok(Self {
            tab,
            nav: Mutex::new(()),
            slots: Semaphore::new(config.worker_pool_size),
            config,
            _browser: browser,
        })
    }

    pub const fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Search the mirror for users matching `query`, optionally bounded by
    /// `since`/`until` dates (`YYYY-MM-DD`), in result-page order.
    pub async fn search(
        &self,
        query: &str,
        from_date: Option<&str>,
        to_date: Option<&str>,
    ) -> Result<Vec<SearchResultUser>, ScrapeError> {
        let url = search_url(&self.config.mirror_domain, query, from_date, to_date);
        let Some(html) = self.fetch_page(&url).await else {
            return Err(ScrapeError::Fetch { url });
        };
        Ok(extract::search::users(&html, &self.config))
    }

    /// Fetch one profile page: card, timeline in document order, photo rail.
    pub async fn get_profile(&self, username: &str) -> Result<ProfileBundle, ScrapeError> {
        let url = profile_url(&self.config.mirror_domain, username);
        let Some(html) = self.fetch_page(&url).await else {
            return Err(ScrapeError::Fetch { url });
        };
        extract::profile::bundle(&html, &self.config)
    }

    /// Navigate the shared tab and read the settled page source. Faults are
    /// logged and surface as `None`; there are no retries.
    async fn fetch_page(&self, url: &str) -> Option<String> {
        let _slot = self.slots.acquire().await.ok()?;
        let _nav = self.nav.lock().await;

        if let Err(e) = puppeteer::navigate(&self.tab, url.to_owned()).await {
            tracing::warn!(target: "fetch", "navigation to {url} failed: {e:?}");
            return None;
        }

        sleep(Duration::from_millis(self.config.settle_delay_ms)).await;

        match puppeteer::page_source(&self.tab).await {
            Ok(html) => Some(html),
            Err(e) => {
                tracing::warn!(target: "fetch", "reading {url} failed: {e:?}");
                None
            }
        }
    }
}

fn profile_url(domain: &str, username: &str) -> String {
    format!("{domain}/{username}/search")
}

fn search_url(domain: &str, query: &str, from_date: Option<&str>, to_date: Option<&str>) -> String {
    format!(
        "{domain}/search?f=users&q={}&since={}&until={}",
        urlencoding::encode(query),
        from_date.unwrap_or_default(),
        to_date.unwrap_or_default(),
    )
}
