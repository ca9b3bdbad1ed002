//! Blog posts (`blog/**/*.md`, `blog/**/*.mdx`).
//!
//! `pubDate` accepts an RFC 3339 timestamp, a bare `YYYY-MM-DD` date
//! (midnight UTC) or a naive `YYYY-MM-DDTHH:MM:SS` (taken as UTC).

use super::team::TeamMember;
use super::{ContentError, load_documents};
use crate::related::Taxonomy;
use crate::validation::{Issue, ValidationError, Validator};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

const SUBJECT: &str = "Blog post";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostFrontmatter {
    title: String,
    description: String,
    pub_date: String,
    author: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    draft: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Entry id derived from the file path, used in `/blog/<id>/`.
    pub id: String,
    pub title: String,
    pub description: String,
    pub pub_date: DateTime<Utc>,
    /// Team entry id.
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub draft: bool,
    /// Raw markdown body.
    pub body: String,
}

impl Taxonomy for Post {
    fn id(&self) -> &str {
        &self.id
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn categories(&self) -> &[String] {
        &self.categories
    }
}

/// Coerce a frontmatter date string into a UTC timestamp.
pub fn parse_pub_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Load every post under `root`, newest first. A missing directory means
/// no posts.
pub fn load_posts(root: &Path) -> Result<Vec<Post>, ContentError> {
    let mut posts = Vec::new();
    for doc in load_documents::<PostFrontmatter>(root)? {
        let fm = doc.frontmatter;
        let mut v = Validator::new();
        v.non_blank("title", &fm.title, "Title is required");
        v.non_blank("author", &fm.author, "Author is required");
        let pub_date = parse_pub_date(&fm.pub_date);
        v.check(
            "pubDate",
            pub_date.is_some(),
            format!("Invalid date (got: {})", fm.pub_date),
        );
        v.finish(SUBJECT).map_err(|source| ContentError::Entry {
            path: doc.path.clone(),
            source,
        })?;
        let Some(pub_date) = pub_date else {
            continue;
        };

        posts.push(Post {
            id: doc.id,
            title: fm.title,
            description: fm.description,
            pub_date,
            author: fm.author.trim().to_string(),
            image: fm.image,
            tags: fm.tags,
            categories: fm.categories,
            draft: fm.draft,
            body: doc.body,
        });
    }
    sort_posts(&mut posts);
    Ok(posts)
}

/// Newest first; same-instant posts fall back to id order.
pub fn sort_posts(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.pub_date.cmp(&a.pub_date).then_with(|| a.id.cmp(&b.id)));
}

/// Every post's `author` must name a team entry id.
pub fn check_authors(posts: &[Post], team: &[TeamMember]) -> Result<(), ContentError> {
    let ids: HashSet<&str> = team.iter().map(|m| m.id.as_str()).collect();
    let issues: Vec<Issue> = posts
        .iter()
        .filter(|p| !ids.contains(p.author.as_str()))
        .map(|p| Issue {
            path: format!("{}.author", p.id),
            message: format!("Unknown team member \"{}\"", p.author),
        })
        .collect();
    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::Schema {
            subject: "Blog data",
            issues,
        }
        .into())
    }
}

/// Posts that should be published: drafts are dropped unless `include_drafts`.
pub fn visible_posts(posts: &[Post], include_drafts: bool) -> Vec<Post> {
    posts
        .iter()
        .filter(|p| include_drafts || !p.draft)
        .cloned()
        .collect()
}
