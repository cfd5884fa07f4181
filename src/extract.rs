use scraper::ElementRef;

use crate::{config::ScraperConfig, util::normalize_image_url};

pub mod profile;
pub mod search;

/// Concatenated text of an element, trimmed at both ends.
fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_owned()
}

/// Trimmed text of the element's parent, for stat icons whose count lives in
/// the enclosing element.
fn parent_text(el: ElementRef<'_>) -> Option<String> {
    el.parent().and_then(ElementRef::wrap).map(text_of)
}

/// The template emits image `src` attributes relative to the mirror root;
/// prefix the domain, then rewrite proxy URLs back to the origin CDN.
fn mirror_image(src: &str, config: &ScraperConfig) -> String {
    normalize_image_url(
        &format!("{}{src}", config.mirror_domain),
        &config.mirror_domain,
        &config.cdn_domain,
    )
}
