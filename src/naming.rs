//! URL naming for collection entries and taxonomy terms.
//!
//! Two conventions are shared by every stage:
//!
//! - **Entry ids**: a markdown file's path relative to its collection root,
//!   extension dropped, `/`-separated and lowercased. Spaces become dashes.
//!   `blog/2024/Launch Day.md` → `2024/launch-day`.
//! - **Term slugs**: tags and categories are free text in frontmatter and
//!   are slugified for archive URLs. `"Local SEO"` → `local-seo`.

use std::path::Path;

/// Derive a collection entry id from a path relative to the collection root.
pub fn entry_id(relative: &Path) -> String {
    let without_ext = relative.with_extension("");
    without_ext
        .components()
        .map(|c| c.as_os_str().to_string_lossy().trim().to_lowercase().replace(' ', "-"))
        .collect::<Vec<_>>()
        .join("/")
}

/// Slugify a free-text term: lowercase alphanumerics, runs of anything else
/// collapse into one dash, no leading or trailing dashes.
///
/// Non-ASCII letters are kept (lowercased) so `"Café"` stays readable.
pub fn slugify(term: &str) -> String {
    let mut slug = String::with_capacity(term.len());
    let mut pending_dash = false;
    for c in term.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn entry_id_drops_extension() {
        assert_eq!(entry_id(Path::new("hello-world.md")), "hello-world");
        assert_eq!(entry_id(Path::new("component-demo.mdx")), "component-demo");
    }

    #[test]
    fn entry_id_keeps_nested_path() {
        let path: PathBuf = ["2024", "Launch Day.md"].iter().collect();
        assert_eq!(entry_id(&path), "2024/launch-day");
    }

    #[test]
    fn entry_id_lowercases() {
        assert_eq!(entry_id(Path::new("Jane-Doe.md")), "jane-doe");
    }

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("Local SEO"), "local-seo");
        assert_eq!(slugify("web-design"), "web-design");
    }

    #[test]
    fn slugify_collapses_punctuation() {
        assert_eq!(slugify("  Tips & Tricks!! "), "tips-tricks");
        assert_eq!(slugify("C++ / Rust"), "c-rust");
    }

    #[test]
    fn slugify_keeps_unicode_letters() {
        assert_eq!(slugify("Café Culture"), "café-culture");
    }

    #[test]
    fn slugify_empty() {
        assert_eq!(slugify("---"), "");
        assert_eq!(slugify(""), "");
    }
}
