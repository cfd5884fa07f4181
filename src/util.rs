/// Drop every `@` from a handle, not just the leading sigil.
pub fn strip_sigil(handle: &str) -> String {
    handle.replace('@', "")
}

/// Parse a thousands-separated display count ("1,234"). Empty or otherwise
/// unparseable text yields 0.
pub fn parse_count(text: &str) -> u64 {
    text.replace(',', "").parse().unwrap_or(0)
}

/// Rewrite a mirror image-proxy URL to the origin CDN.
///
/// The mirror serves images as `{mirror_domain}/pic/{percent-encoded path}`.
/// The encoded part is either a bare CDN path (`media%2F...`) or a full
/// origin URL; either way the result points at the CDN directly. Anything
/// not under the proxy prefix passes through unchanged (default avatars,
/// already-normalized URLs).
pub fn normalize_image_url(url: &str, mirror_domain: &str, cdn_domain: &str) -> String {
    let prefix = format!("{mirror_domain}/pic/");
    let Some(rest) = url.strip_prefix(prefix.as_str()) else {
        return url.to_owned();
    };

    let decoded = match urlencoding::decode(rest) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => rest.to_owned(),
    };

    if decoded.starts_with("https://") || decoded.starts_with("http://") {
        decoded
    } else {
        format!("{cdn_domain}/{decoded}")
    }
}
