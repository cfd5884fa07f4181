use serde::{Deserialize, Serialize};

/// Profile-card data for one user.
///
/// Stat counts are parsed from the thousands-separated display text; the
/// per-tweet engagement counts on [`TimelineEntry`] stay as display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub full_name: String,
    /// Handle without the `@` sigil.
    pub username: String,
    pub bio: String,
    pub location: String,
    pub join_date: String,
    pub tweets: u64,
    pub following: u64,
    pub followers: u64,
    pub likes: u64,
    pub profile_image: String,
    /// Empty when the profile has no banner.
    pub banner_image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub content: String,
    pub date: String,
    /// Engagement counts as displayed, `"0"` when the icon is absent.
    pub likes: String,
    pub comments: String,
    pub retweets: String,
    pub tweet_link: String,
    pub images: Vec<String>,
    pub retweeted_by: Option<String>,
    pub is_retweet: bool,
    pub is_reply: bool,
    pub replying_to: Option<String>,
}

/// One row of a user-search results page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultUser {
    pub profile_image_url: String,
    pub full_name: String,
    /// As displayed, sigil included.
    pub username: String,
    pub bio: String,
}

/// Everything one profile page yields: the card, the timeline in document
/// order, and the photo-rail media URLs (distinct from tweet attachments).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileBundle {
    pub profile: Profile,
    pub tweets: Vec<TimelineEntry>,
    pub media: Vec<String>,
}
