//! Team members (`team/**/*.md`).
//!
//! Team entries double as blog authors: a post's `author` field names a team
//! entry id.

use super::{ContentError, load_documents};
use crate::validation::{Validate, Validator};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

const SUBJECT: &str = "Team member";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct TeamFrontmatter {
    name: String,
    slug: String,
    bio: String,
    avatar: String,
    role: String,
    #[serde(default)]
    social: Option<TeamSocial>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamSocial {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

impl TeamSocial {
    /// `(label, url)` for every link that is set.
    pub fn links(&self) -> Vec<(&'static str, &str)> {
        [
            ("Twitter", &self.twitter),
            ("LinkedIn", &self.linkedin),
            ("GitHub", &self.github),
        ]
        .into_iter()
        .filter_map(|(label, url)| url.as_deref().map(|u| (label, u)))
        .collect()
    }
}

impl Validate for TeamSocial {
    fn validate(&self, v: &mut Validator) {
        for (field, url) in [
            ("twitter", &self.twitter),
            ("linkedin", &self.linkedin),
            ("github", &self.github),
        ] {
            if let Some(url) = url {
                v.check(field, Url::parse(url).is_ok(), format!("Invalid url (got: {url})"));
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Entry id derived from the file path; referenced by post authors.
    pub id: String,
    pub name: String,
    pub slug: String,
    pub bio: String,
    /// Path or URL of the avatar image.
    pub avatar: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social: Option<TeamSocial>,
    /// Markdown body below the frontmatter.
    pub body: String,
}

impl Validate for TeamMember {
    fn validate(&self, v: &mut Validator) {
        v.non_blank("name", &self.name, "Name is required");
        if let Some(social) = &self.social {
            v.nested("social", social);
        }
    }
}

/// Load every team member under `root`. A missing directory means no team.
///
/// Each file is validated on its own; the first failing file is reported
/// with its path.
pub fn load_team(root: &Path) -> Result<Vec<TeamMember>, ContentError> {
    let mut members = Vec::new();
    for doc in load_documents::<TeamFrontmatter>(root)? {
        let fm = doc.frontmatter;
        let member = TeamMember {
            id: doc.id,
            name: fm.name,
            slug: fm.slug,
            bio: fm.bio,
            avatar: fm.avatar,
            role: fm.role,
            social: fm.social,
            body: doc.body,
        };
        let mut v = Validator::new();
        member.validate(&mut v);
        v.finish(SUBJECT).map_err(|source| ContentError::Entry {
            path: doc.path,
            source,
        })?;
        members.push(member);
    }
    Ok(members)
}

pub fn member_by_id<'a>(team: &'a [TeamMember], id: &str) -> Option<&'a TeamMember> {
    team.iter().find(|m| m.id == id)
}
