use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::{mirror_image, parent_text, text_of};
use crate::{
    config::ScraperConfig,
    error::ScrapeError,
    model::{Profile, ProfileBundle, TimelineEntry},
    util::{parse_count, strip_sigil},
};

struct Selectors {
    fullname: Selector,
    username: Selector,
    bio: Selector,
    location: Selector,
    join_date: Selector,
    posts: Selector,
    following: Selector,
    followers: Selector,
    likes: Selector,
    avatar: Selector,
    banner: Selector,
    timeline_item: Selector,
    tweet_content: Selector,
    tweet_date: Selector,
    icon_comment: Selector,
    icon_retweet: Selector,
    icon_heart: Selector,
    tweet_link: Selector,
    attachment_img: Selector,
    retweet_header: Selector,
    replying_to: Selector,
    photo_rail_img: Selector,
}

static SEL: LazyLock<Selectors> = LazyLock::new(|| Selectors {
    fullname: sel(".profile-card-fullname"),
    username: sel(".profile-card-username"),
    bio: sel(".profile-bio p"),
    location: sel(".profile-location span"),
    join_date: sel(".profile-joindate span"),
    posts: sel(".posts .profile-stat-num"),
    following: sel(".following .profile-stat-num"),
    followers: sel(".followers .profile-stat-num"),
    likes: sel(".likes .profile-stat-num"),
    avatar: sel(".profile-card-avatar img"),
    banner: sel(".profile-banner img"),
    timeline_item: sel(".timeline-item"),
    tweet_content: sel(".tweet-content"),
    tweet_date: sel(".tweet-date a"),
    icon_comment: sel(".icon-comment"),
    icon_retweet: sel(".icon-retweet"),
    icon_heart: sel(".icon-heart"),
    tweet_link: sel(".tweet-link"),
    attachment_img: sel(".attachment.image img"),
    retweet_header: sel(".retweet-header div"),
    replying_to: sel(".tweet-body .replying-to a"),
    photo_rail_img: sel(".photo-rail-grid a img"),
});

fn sel(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

/// Map a profile page to its bundle. Fails with
/// [`ScrapeError::MalformedPage`] when a required card element is missing;
/// a single malformed timeline item is skipped, not fatal.
pub fn bundle(html: &str, config: &ScraperConfig) -> Result<ProfileBundle, ScrapeError> {
    let doc = Html::parse_document(html);

    let profile = profile_card(&doc, config)?;

    let tweets = doc
        .select(&SEL.timeline_item)
        .filter_map(|item| timeline_entry(item, config))
        .collect();

    let media = doc
        .select(&SEL.photo_rail_img)
        .filter_map(|img| img.attr("src"))
        .map(|src| mirror_image(src, config))
        .collect();

    Ok(ProfileBundle {
        profile,
        tweets,
        media,
    })
}

fn required<'a>(
    doc: &'a Html,
    selector: &Selector,
    name: &'static str,
) -> Result<ElementRef<'a>, ScrapeError> {
    doc.select(selector)
        .next()
        .ok_or(ScrapeError::MalformedPage { selector: name })
}

fn profile_card(doc: &Html, config: &ScraperConfig) -> Result<Profile, ScrapeError> {
    let full_name = text_of(required(doc, &SEL.fullname, ".profile-card-fullname")?);
    let username = strip_sigil(&text_of(required(
        doc,
        &SEL.username,
        ".profile-card-username",
    )?));

    let bio = doc.select(&SEL.bio).next().map(text_of).unwrap_or_default();
    // The first span is the location icon; the text sits in the second.
    let location = doc
        .select(&SEL.location)
        .nth(1)
        .map(text_of)
        .unwrap_or_default();

    let join_date = text_of(required(doc, &SEL.join_date, ".profile-joindate span")?);
    let join_date = join_date
        .strip_prefix("Joined")
        .unwrap_or(&join_date)
        .trim()
        .to_owned();

    let tweets = parse_count(&text_of(required(
        doc,
        &SEL.posts,
        ".posts .profile-stat-num",
    )?));
    let following = parse_count(&text_of(required(
        doc,
        &SEL.following,
        ".following .profile-stat-num",
    )?));
    let followers = parse_count(&text_of(required(
        doc,
        &SEL.followers,
        ".followers .profile-stat-num",
    )?));
    let likes = parse_count(&text_of(required(
        doc,
        &SEL.likes,
        ".likes .profile-stat-num",
    )?));

    let profile_image = required(doc, &SEL.avatar, ".profile-card-avatar img")?
        .attr("src")
        .map(|src| mirror_image(src, config))
        .ok_or(ScrapeError::MalformedPage {
            selector: ".profile-card-avatar img",
        })?;

    let banner_image = doc
        .select(&SEL.banner)
        .next()
        .and_then(|img| img.attr("src"))
        .map(|src| mirror_image(src, config))
        .unwrap_or_default();

    Ok(Profile {
        full_name,
        username,
        bio,
        location,
        join_date,
        tweets,
        following,
        followers,
        likes,
        profile_image,
        banner_image,
    })
}

fn timeline_entry(item: ElementRef<'_>, config: &ScraperConfig) -> Option<TimelineEntry> {
    let Some(date) = item.select(&SEL.tweet_date).next().map(text_of) else {
        tracing::warn!(target: "extract", "timeline item without a date link, skipping");
        return None;
    };

    let content = item
        .select(&SEL.tweet_content)
        .next()
        .map(text_of)
        .unwrap_or_default();

    let likes = stat_text(item, &SEL.icon_heart);
    let comments = stat_text(item, &SEL.icon_comment);
    let retweets = stat_text(item, &SEL.icon_retweet);

    let tweet_link = item
        .select(&SEL.tweet_link)
        .next()
        .and_then(|a| a.attr("href"))
        .unwrap_or_default()
        .to_owned();

    let images = item
        .select(&SEL.attachment_img)
        .filter_map(|img| img.attr("src"))
        .map(|src| mirror_image(src, config))
        .collect();

    let retweeted_by = item.select(&SEL.retweet_header).next().map(text_of);
    let replying_to = item.select(&SEL.replying_to).next().map(text_of);

    Some(TimelineEntry {
        content,
        date,
        likes,
        comments,
        retweets,
        tweet_link,
        images,
        is_retweet: retweeted_by.is_some(),
        retweeted_by,
        is_reply: replying_to.is_some(),
        replying_to,
    })
}

/// Engagement counts stay display text; the template omits the icon entirely
/// at zero, hence the `"0"` fallback.
fn stat_text(item: ElementRef<'_>, icon: &Selector) -> String {
    item.select(icon)
        .next()
        .and_then(parent_text)
        .unwrap_or_else(|| "0".to_owned())
}

#[cfg(test)]
mod tests {
    use super::bundle;
    use crate::{config::ScraperConfig, error::ScrapeError};

    const CARD: &str = r#"
        <div class="profile-card">
          <a class="profile-card-fullname">Blessing A.</a>
          <a class="profile-card-username">@oyelamin</a>
          <div class="profile-bio"><p>Building things.</p></div>
          <div class="profile-location"><span class="icon-location"></span><span>Lagos, Nigeria</span></div>
          <div class="profile-joindate"><span>Joined March 2019</span></div>
          <ul class="profile-statlist">
            <li class="posts"><span class="profile-stat-num">1,234</span></li>
            <li class="following"><span class="profile-stat-num">56</span></li>
            <li class="followers"><span class="profile-stat-num">7,890</span></li>
            <li class="likes"><span class="profile-stat-num">321</span></li>
          </ul>
          <div class="profile-card-avatar"><img src="/pic/media%2Favatar.jpg"></div>
          <div class="profile-banner"><img src="/pic/media%2Fbanner.jpg"></div>
        </div>
    "#;

    const TWEET: &str = r#"
        <div class="timeline-item">
          <a class="tweet-link" href="/oyelamin/status/1"></a>
          <div class="retweet-header"><div>Someone retweeted</div></div>
          <div class="tweet-body">
            <div class="replying-to">Replying to <a>@friend</a></div>
            <div class="tweet-content">hello world</div>
            <span class="tweet-date"><a>Mar 1</a></span>
            <div class="tweet-stats">
              <span class="tweet-stat"><span class="icon-comment"></span> 2</span>
              <span class="tweet-stat"><span class="icon-retweet"></span> 3</span>
              <span class="tweet-stat"><span class="icon-heart"></span> 14</span>
            </div>
            <div class="attachment image"><img src="/pic/media%2Ffirst.jpg"></div>
            <div class="attachment image"><img src="/pic/media%2Fsecond.jpg"></div>
          </div>
        </div>
    "#;

    const RAIL: &str = r##"
        <div class="photo-rail-grid">
          <a href="#"><img src="/pic/media%2Fa.jpg"></a>
          <a href="#"><img src="/pic/media%2Fb.jpg"></a>
        </div>
    "##;

    fn page(parts: &[&str]) -> String {
        format!("<html><body>{}</body></html>", parts.concat())
    }

    #[test]
    fn card_fields_are_extracted_and_normalized() {
        let html = page(&[CARD]);
        let bundle = bundle(&html, &ScraperConfig::default()).unwrap();
        let p = &bundle.profile;

        assert_eq!(p.full_name, "Blessing A.");
        assert_eq!(p.username, "oyelamin");
        assert_eq!(p.bio, "Building things.");
        assert_eq!(p.location, "Lagos, Nigeria");
        assert_eq!(p.join_date, "March 2019");
        assert_eq!(p.tweets, 1234);
        assert_eq!(p.following, 56);
        assert_eq!(p.followers, 7890);
        assert_eq!(p.likes, 321);
        assert_eq!(p.profile_image, "https://pbs.twimg.com/media/avatar.jpg");
        assert_eq!(p.banner_image, "https://pbs.twimg.com/media/banner.jpg");
    }

    #[test]
    fn bare_card_yields_empty_timeline_and_media() {
        let html = page(&[CARD]);
        let bundle = bundle(&html, &ScraperConfig::default()).unwrap();

        assert!(bundle.tweets.is_empty());
        assert!(bundle.media.is_empty());
    }

    #[test]
    fn optional_card_fields_default_to_empty() {
        let html = page(&[CARD])
            .replace(r#"<div class="profile-bio"><p>Building things.</p></div>"#, "")
            .replace(
                r#"<div class="profile-location"><span class="icon-location"></span><span>Lagos, Nigeria</span></div>"#,
                "",
            )
            .replace(r#"<div class="profile-banner"><img src="/pic/media%2Fbanner.jpg"></div>"#, "");
        let bundle = bundle(&html, &ScraperConfig::default()).unwrap();

        assert_eq!(bundle.profile.bio, "");
        assert_eq!(bundle.profile.location, "");
        assert_eq!(bundle.profile.banner_image, "");
    }

    #[test]
    fn missing_full_name_is_a_malformed_page() {
        let html = page(&[CARD]).replace(r#"<a class="profile-card-fullname">Blessing A.</a>"#, "");
        let err = bundle(&html, &ScraperConfig::default()).unwrap_err();

        assert!(matches!(
            err,
            ScrapeError::MalformedPage {
                selector: ".profile-card-fullname"
            }
        ));
    }

    #[test]
    fn timeline_entries_carry_stats_links_and_images() {
        let html = page(&[CARD, TWEET]);
        let bundle = bundle(&html, &ScraperConfig::default()).unwrap();

        assert_eq!(bundle.tweets.len(), 1);
        let t = &bundle.tweets[0];
        assert_eq!(t.content, "hello world");
        assert_eq!(t.date, "Mar 1");
        assert_eq!(t.likes, "14");
        assert_eq!(t.comments, "2");
        assert_eq!(t.retweets, "3");
        assert_eq!(t.tweet_link, "/oyelamin/status/1");
        assert_eq!(
            t.images,
            vec![
                "https://pbs.twimg.com/media/first.jpg",
                "https://pbs.twimg.com/media/second.jpg",
            ]
        );
        assert!(t.is_retweet);
        assert_eq!(t.retweeted_by.as_deref(), Some("Someone retweeted"));
        assert!(t.is_reply);
        assert_eq!(t.replying_to.as_deref(), Some("@friend"));
    }

    #[test]
    fn plain_tweet_defaults_stats_to_zero_text() {
        let plain = r#"
            <div class="timeline-item">
              <div class="tweet-body">
                <div class="tweet-content">no engagement yet</div>
                <span class="tweet-date"><a>Apr 2</a></span>
              </div>
            </div>
        "#;
        let html = page(&[CARD, plain]);
        let bundle = bundle(&html, &ScraperConfig::default()).unwrap();

        let t = &bundle.tweets[0];
        assert_eq!(t.likes, "0");
        assert_eq!(t.comments, "0");
        assert_eq!(t.retweets, "0");
        assert_eq!(t.tweet_link, "");
        assert!(t.images.is_empty());
        assert!(!t.is_retweet);
        assert!(!t.is_reply);
        assert_eq!(t.retweeted_by, None);
        assert_eq!(t.replying_to, None);
    }

    #[test]
    fn dateless_item_is_skipped_not_fatal() {
        let dateless = r#"
            <div class="timeline-item">
              <div class="tweet-body"><div class="tweet-content">orphan</div></div>
            </div>
        "#;
        let html = page(&[CARD, dateless, TWEET]);
        let bundle = bundle(&html, &ScraperConfig::default()).unwrap();

        assert_eq!(bundle.tweets.len(), 1);
        assert_eq!(bundle.tweets[0].content, "hello world");
    }

    #[test]
    fn photo_rail_preserves_document_order() {
        let html = page(&[CARD, RAIL]);
        let bundle = bundle(&html, &ScraperConfig::default()).unwrap();

        assert_eq!(
            bundle.media,
            vec![
                "https://pbs.twimg.com/media/a.jpg",
                "https://pbs.twimg.com/media/b.jpg",
            ]
        );
    }
}
