use std::{ffi::OsStr, sync::Arc};

use headless_chrome::{Browser, LaunchOptions, Tab};
use tokio::task::spawn_blocking;

/// Launch Chrome the way the mirror tolerates: fixed viewport, no sandbox
/// (the automation environment runs containerized), GPU and /dev/shm off.
pub fn launch(headless: bool) -> anyhow::Result<Browser> {
    Browser::new(LaunchOptions {
        args: vec![
            OsStr::new("--disable-gpu"),
            OsStr::new("--disable-dev-shm-usage"),
        ],
        headless,
        sandbox: false,
        window_size: Some((1920, 1080)),
        ..LaunchOptions::default()
    })
}

/// One fresh tab, everything else closed.
#[allow(clippy::significant_drop_tightening)]
pub fn first_tab(browser: &Browser) -> anyhow::Result<Arc<Tab>> {
    let tab = browser.new_tab()?;

    {
        let tabs_guard = browser
            .get_tabs()
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        for remain in &*tabs_guard {
            if !Arc::ptr_eq(&tab, remain) {
                remain.close(true)?;
            }
        }
    }

    Ok(tab)
}

/// `Tab::navigate_to` blocks on the CDP round trip, so it runs on the
/// blocking pool rather than the caller's scheduler.
pub async fn navigate(tab: &Arc<Tab>, url: String) -> anyhow::Result<()> {
    let tab = Arc::clone(tab);

    spawn_blocking(move || tab.navigate_to(&url).map(|_| ())).await?
}

/// Serialized outer HTML of the current page, read off the blocking pool.
pub async fn page_source(tab: &Arc<Tab>) -> anyhow::Result<String> {
    let tab = Arc::clone(tab);

    spawn_blocking(move || tab.get_content()).await?
}
