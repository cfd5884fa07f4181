pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod scrape;
pub mod util;

pub use config::ScraperConfig;
pub use error::ScrapeError;
pub use model::{Profile, ProfileBundle, SearchResultUser, TimelineEntry};
pub use scrape::Scraper;
