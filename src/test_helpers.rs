//! Shared test utilities for the storefront test suite.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//!
//! let post = find_post(&manifest.posts, "2024/launch-day");
//! assert_eq!(post.author, "jane-doe");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::content::blog::Post;
use crate::process::ProcessedPost;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Lookups (panic with the available ids on miss)
// =========================================================================

/// Find a scanned post by id. Panics if not found.
pub fn find_post<'a>(posts: &'a [Post], id: &str) -> &'a Post {
    posts.iter().find(|p| p.id == id).unwrap_or_else(|| {
        let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
        panic!("post '{id}' not found. Available: {ids:?}")
    })
}

/// Find a processed post by id. Panics if not found.
pub fn find_processed_post<'a>(posts: &'a [ProcessedPost], id: &str) -> &'a ProcessedPost {
    posts.iter().find(|p| p.post.id == id).unwrap_or_else(|| {
        let ids: Vec<&str> = posts.iter().map(|p| p.post.id.as_str()).collect();
        panic!("post '{id}' not found. Available: {ids:?}")
    })
}
