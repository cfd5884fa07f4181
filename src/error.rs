#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// Navigation or driver fault. The underlying cause is logged at the
    /// fetch site; callers only learn that the page never arrived.
    #[error("failed to fetch {url}")]
    Fetch { url: String },

    /// A required structural element is missing, i.e. the markup does not
    /// match the mirror template this scraper understands.
    #[error("malformed page: no match for `{selector}`")]
    MalformedPage { selector: &'static str },
}
