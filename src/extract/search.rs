use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::{mirror_image, text_of};
use crate::{config::ScraperConfig, model::SearchResultUser};

struct Selectors {
    timeline_item: Selector,
    avatar: Selector,
    fullname: Selector,
    username: Selector,
    tweet_content: Selector,
}

static SEL: LazyLock<Selectors> = LazyLock::new(|| Selectors {
    timeline_item: Selector::parse(".timeline-item").unwrap(),
    avatar: Selector::parse(".profile-result .tweet-avatar img").unwrap(),
    fullname: Selector::parse(".fullname").unwrap(),
    username: Selector::parse(".username").unwrap(),
    tweet_content: Selector::parse(".tweet-content").unwrap(),
});

/// Map a user-search results page to its rows, in document order. An item
/// missing a required element is skipped with a warning rather than failing
/// the whole page.
pub fn users(html: &str, config: &ScraperConfig) -> Vec<SearchResultUser> {
    let doc = Html::parse_document(html);

    doc.select(&SEL.timeline_item)
        .filter_map(|item| user(item, config))
        .collect()
}

fn user(item: ElementRef<'_>, config: &ScraperConfig) -> Option<SearchResultUser> {
    let Some(avatar) = item
        .select(&SEL.avatar)
        .next()
        .and_then(|img| img.attr("src"))
    else {
        tracing::warn!(target: "extract", "search result without an avatar, skipping");
        return None;
    };
    let Some(full_name) = item.select(&SEL.fullname).next().map(text_of) else {
        tracing::warn!(target: "extract", "search result without a full name, skipping");
        return None;
    };
    let Some(username) = item.select(&SEL.username).next().map(text_of) else {
        tracing::warn!(target: "extract", "search result without a username, skipping");
        return None;
    };

    let bio = item
        .select(&SEL.tweet_content)
        .next()
        .map(text_of)
        .unwrap_or_default();

    Some(SearchResultUser {
        profile_image_url: mirror_image(avatar, config),
        full_name,
        username,
        bio,
    })
}
