//! Content loading and manifest generation.
//!
//! Stage 1 of the build pipeline. Reads every content source under the
//! content root, validates it, and produces a [`Manifest`] that the process
//! stage consumes.
//!
//! ## Directory Structure
//!
//! ```text
//! content/
//! ├── config.toml              # Site configuration
//! ├── blog/                    # Posts (nested directories allowed)
//! │   ├── 2024/
//! │   │   └── launch-day.md    # id: 2024/launch-day
//! │   └── hello-world.mdx      # id: hello-world
//! ├── team/
//! │   └── jane-doe.md          # id: jane-doe (referenced by post authors)
//! ├── data/
//! │   ├── homepage.json        # Required
//! │   ├── pages.json           # Required
//! │   ├── services.json        # Optional
//! │   └── locations.json       # Optional
//! └── assets/                  # Copied verbatim by the generate stage
//! ```
//!
//! ## Validation
//!
//! Scanning fails on the first source that does not validate. Within a
//! source, every problem is reported at once. Cross-source rules checked here:
//! - Every post author names an existing team entry

use crate::config::{self, SiteConfig};
use crate::content::blog::{self, Post};
use crate::content::homepage::{self, HomepageData};
use crate::content::locations::{self, Location};
use crate::content::pages::{self, PagesData};
use crate::content::services::{self, Service};
use crate::content::team::{self, TeamMember};
use crate::content::ContentError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const DATA_DIR: &str = "data";
pub const BLOG_DIR: &str = "blog";
pub const TEAM_DIR: &str = "team";
pub const ASSETS_DIR: &str = "assets";

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("{0}")]
    Content(#[from] ContentError),
    #[error("Content directory not found: {0}")]
    SourceNotFound(PathBuf),
}

/// Manifest output from the scan stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub config: SiteConfig,
    pub homepage: HomepageData,
    pub pages: PagesData,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub team: Vec<TeamMember>,
    /// All posts including drafts, newest first.
    #[serde(default)]
    pub posts: Vec<Post>,
}

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::SourceNotFound(root.to_path_buf()));
    }

    let config = config::load_config(root)?;

    let data = root.join(DATA_DIR);
    let homepage = homepage::load_homepage(&data.join("homepage.json"))?;
    let pages = pages::load_pages(&data.join("pages.json"))?;
    let services = services::load_services(&data.join("services.json"))?;
    let locations = locations::load_locations(&data.join("locations.json"))?;

    let team = team::load_team(&root.join(TEAM_DIR))?;
    let posts = blog::load_posts(&root.join(BLOG_DIR))?;
    blog::check_authors(&posts, &team)?;

    debug!(
        services = services.len(),
        locations = locations.len(),
        team = team.len(),
        posts = posts.len(),
        "scan complete"
    );

    Ok(Manifest {
        config,
        homepage,
        pages,
        services,
        locations,
        team,
        posts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn scan_loads_every_source() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();

        assert_eq!(manifest.config.name, "Acme Services");
        assert!(!manifest.services.is_empty());
        assert!(!manifest.locations.is_empty());
        assert!(!manifest.team.is_empty());
        assert!(!manifest.posts.is_empty());
    }

    #[test]
    fn posts_include_drafts_newest_first() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();

        assert!(manifest.posts.iter().any(|p| p.draft));
        for pair in manifest.posts.windows(2) {
            assert!(pair[0].pub_date >= pair[1].pub_date);
        }
    }

    #[test]
    fn nested_post_id_keeps_directory() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        find_post(&manifest.posts, "2024/launch-day");
    }

    #[test]
    fn missing_source_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = scan(&tmp.path().join("nope"));
        assert!(matches!(result, Err(ScanError::SourceNotFound(_))));
    }

    #[test]
    fn missing_homepage_is_error() {
        let tmp = setup_fixtures();
        fs::remove_file(tmp.path().join("data/homepage.json")).unwrap();
        let result = scan(tmp.path());
        assert!(matches!(
            result,
            Err(ScanError::Content(ContentError::MissingFile(_)))
        ));
    }

    #[test]
    fn optional_data_files_may_be_absent() {
        let tmp = setup_fixtures();
        fs::remove_file(tmp.path().join("data/services.json")).unwrap();
        fs::remove_file(tmp.path().join("data/locations.json")).unwrap();
        let manifest = scan(tmp.path()).unwrap();
        assert!(manifest.services.is_empty());
        assert!(manifest.locations.is_empty());
    }

    #[test]
    fn unknown_author_is_error() {
        let tmp = setup_fixtures();
        fs::write(
            tmp.path().join("blog/orphan.md"),
            "---\ntitle: Orphan\ndescription: d\npubDate: 2024-01-01\nauthor: nobody\n---\nText\n",
        )
        .unwrap();
        let err = scan(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("orphan.author: Unknown team member \"nobody\""));
    }

    #[test]
    fn invalid_config_is_error() {
        let tmp = setup_fixtures();
        fs::write(tmp.path().join("config.toml"), "name = \"\"\n").unwrap();
        assert!(matches!(scan(tmp.path()), Err(ScanError::Config(_))));
    }

    #[test]
    fn manifest_round_trips_through_json() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let json = serde_json::to_string(&manifest).unwrap();
        let back: Manifest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.posts, manifest.posts);
        assert_eq!(back.pages, manifest.pages);
    }
}
