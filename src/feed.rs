//! RSS feed and XML sitemap.
//!
//! Both documents are rendered with maud, which escapes text content.
//! The XML prolog is prepended as a plain string.

use crate::config::SiteConfig;
use crate::content::blog::Post;
use crate::content::team::TeamMember;
use chrono::{DateTime, SecondsFormat, Utc};
use maud::html;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

const XML_PROLOG: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
const UNKNOWN_AUTHOR: &str = "Unknown Author";

static PAGINATED_ROUTES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"/blog/[0-9]+/$",
        r"/blog/tags/[^/]+/[0-9]+/$",
        r"/blog/categories/[^/]+/[0-9]+/$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("pagination pattern is valid"))
    .collect()
});

/// One `<item>` in the feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub title: String,
    pub description: String,
    pub link: String,
    pub pub_date: DateTime<Utc>,
    pub author: String,
    /// Post categories followed by its tags.
    pub categories: Vec<String>,
}

/// Feed items: published posts only, newest first, at most
/// `feed.max_items`.
pub fn feed_items<'a>(
    config: &SiteConfig,
    posts: impl IntoIterator<Item = &'a Post>,
    team: impl IntoIterator<Item = &'a TeamMember>,
) -> Vec<FeedItem> {
    let authors: HashMap<&str, &str> = team
        .into_iter()
        .map(|m| (m.id.as_str(), m.name.as_str()))
        .collect();

    let mut published: Vec<&Post> = posts.into_iter().filter(|p| !p.draft).collect();
    published.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));

    published
        .into_iter()
        .take(config.feed.max_items)
        .map(|post| FeedItem {
            title: post.title.clone(),
            description: post.description.clone(),
            link: config.absolute_url(&format!("/blog/{}/", post.id)),
            pub_date: post.pub_date,
            author: authors
                .get(post.author.as_str())
                .copied()
                .unwrap_or(UNKNOWN_AUTHOR)
                .to_string(),
            categories: post
                .categories
                .iter()
                .chain(post.tags.iter())
                .cloned()
                .collect(),
        })
        .collect()
}

/// Render `rss.xml`.
pub fn render_rss(config: &SiteConfig, items: &[FeedItem]) -> String {
    let channel_link = config.absolute_url("/");
    let markup = html! {
        rss version="2.0" {
            channel {
                title { (config.name) }
                description { (config.description) }
                link { (channel_link) }
                language { (config.feed.language) }
                @if let Some(latest) = items.first() {
                    lastBuildDate { (latest.pub_date.to_rfc2822()) }
                }
                @for item in items {
                    item {
                        title { (item.title) }
                        description { (item.description) }
                        link { (item.link) }
                        guid isPermaLink="true" { (item.link) }
                        pubDate { (item.pub_date.to_rfc2822()) }
                        author { (item.author) }
                        @for category in &item.categories {
                            category { (category) }
                        }
                    }
                }
            }
        }
    };
    format!("{}{}", XML_PROLOG, markup.into_string())
}

/// Whether `route` is a numbered pagination page (`/blog/2/`,
/// `/blog/tags/seo/2/`, `/blog/categories/news/2/`).
pub fn is_paginated_route(route: &str) -> bool {
    PAGINATED_ROUTES.iter().any(|re| re.is_match(route))
}

/// Render `sitemap.xml` for every non-paginated route.
pub fn render_sitemap(config: &SiteConfig, routes: &[String], lastmod: DateTime<Utc>) -> String {
    let lastmod = lastmod.to_rfc3339_opts(SecondsFormat::Secs, true);
    let markup = html! {
        urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9" {
            @for route in routes.iter().filter(|r| !is_paginated_route(r)) {
                url {
                    loc { (config.absolute_url(route)) }
                    lastmod { (lastmod) }
                    changefreq { (config.sitemap.changefreq) }
                    priority { (config.sitemap.priority) }
                }
            }
        }
    };
    format!("{}{}", XML_PROLOG, markup.into_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.name = "Acme & Sons".to_string();
        config.description = "Quality work".to_string();
        config.seo.site_url = "https://acme.example.com".to_string();
        config
    }

    fn post(id: &str, day: u32, draft: bool) -> Post {
        Post {
            id: id.to_string(),
            title: format!("Post {id}"),
            description: "desc".to_string(),
            pub_date: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
            author: "jane-doe".to_string(),
            image: None,
            tags: vec!["seo".to_string()],
            categories: vec!["Marketing".to_string()],
            draft,
            body: String::new(),
        }
    }

    fn jane() -> TeamMember {
        TeamMember {
            id: "jane-doe".to_string(),
            name: "Jane Doe".to_string(),
            slug: "jane-doe".to_string(),
            bio: String::new(),
            avatar: String::new(),
            role: String::new(),
            social: None,
            body: String::new(),
        }
    }

    #[test]
    fn items_exclude_drafts_and_sort_newest_first() {
        let posts = vec![post("a", 1, false), post("b", 3, true), post("c", 2, false)];
        let team = vec![jane()];
        let items = feed_items(&config(), &posts, &team);
        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Post c", "Post a"]);
    }

    #[test]
    fn items_capped_at_max_items() {
        let posts: Vec<Post> = (1..=28).map(|d| post(&format!("p{d}"), d, false)).collect();
        let items = feed_items(&config(), &posts, &[]);
        assert_eq!(items.len(), 25);
        assert_eq!(items[0].title, "Post p28");
    }

    #[test]
    fn item_fields() {
        let posts = vec![post("2024/launch", 5, false)];
        let team = vec![jane()];
        let item = &feed_items(&config(), &posts, &team)[0];
        assert_eq!(item.link, "https://acme.example.com/blog/2024/launch/");
        assert_eq!(item.author, "Jane Doe");
        assert_eq!(item.categories, vec!["Marketing", "seo"]);
    }

    #[test]
    fn unknown_author_fallback() {
        let posts = vec![post("a", 1, false)];
        let item = &feed_items(&config(), &posts, &[])[0];
        assert_eq!(item.author, "Unknown Author");
    }

    #[test]
    fn rss_document_shape() {
        let posts = vec![post("a", 1, false)];
        let xml = render_rss(&config(), &feed_items(&config(), &posts, &[jane()]));
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<rss version=\"2.0\">"));
        assert!(xml.contains("<title>Acme &amp; Sons</title>"));
        assert!(xml.contains("<language>en-us</language>"));
        assert!(xml.contains("Jan 2024 00:00:00 +0000</pubDate>"));
        assert!(xml.contains("<category>Marketing</category><category>seo</category>"));
    }

    #[test]
    fn empty_feed_is_valid_channel() {
        let xml = render_rss(&config(), &[]);
        assert!(xml.contains("<channel>"));
        assert!(!xml.contains("<item>"));
    }

    #[test]
    fn paginated_routes_detected() {
        assert!(is_paginated_route("/blog/2/"));
        assert!(is_paginated_route("/blog/tags/seo/3/"));
        assert!(is_paginated_route("/blog/categories/local-news/2/"));
        assert!(!is_paginated_route("/blog/"));
        assert!(!is_paginated_route("/blog/tags/seo/"));
        assert!(!is_paginated_route("/blog/hello-world/"));
        assert!(!is_paginated_route("/services/web-design/"));
        assert!(!is_paginated_route("/blog/\u{0662}/"));
    }

    #[test]
    fn sitemap_skips_pagination() {
        let routes: Vec<String> = ["/", "/blog/", "/blog/2/", "/blog/tags/seo/", "/blog/tags/seo/2/"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let lastmod = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let xml = render_sitemap(&config(), &routes, lastmod);
        assert_eq!(xml.matches("<url>").count(), 3);
        assert!(xml.contains("<loc>https://acme.example.com/blog/tags/seo/</loc>"));
        assert!(!xml.contains("/blog/2/"));
        assert!(xml.contains("<lastmod>2024-06-01T12:00:00Z</lastmod>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(xml.contains("<priority>0.7</priority>"));
    }
}
