//! Build-time schema checking for structured content.
//!
//! Every content type is parsed in two passes:
//!
//! 1. **Structural**: serde decodes the file into typed records. A wrong type
//!    or a missing required field aborts immediately with the parser's own
//!    message (which carries line and column).
//! 2. **Semantic**: each record implements [`Validate`] and reports every
//!    broken rule (empty strings, slug format, ranges, minimum lengths) into a
//!    [`Validator`]. All issues are collected before failing, so a single build
//!    shows the full list of problems in a data file.
//!
//! ```text
//! Services data validation error: Schema validation failed:
//!   - 0.slug: Slug must be lowercase with hyphens only
//!   - 2.features: At least one feature is required
//! ```

use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

static SLUG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug pattern is valid"));

/// Whether `slug` is lowercase alphanumerics separated by single hyphens.
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_REGEX.is_match(slug)
}

/// A single broken rule, located by a dotted path into the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub path: String,
    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("{subject} validation error: Schema validation failed:\n{}", render_issues(.issues))]
    Schema {
        subject: &'static str,
        issues: Vec<Issue>,
    },
    #[error(
        "{subject} validation error: Duplicate slugs found: {}. Each {item} must have a unique slug.",
        quote_all(.slugs)
    )]
    DuplicateSlugs {
        subject: &'static str,
        item: &'static str,
        slugs: Vec<String>,
    },
}

impl ValidationError {
    /// Issues carried by a schema failure; empty for duplicate-slug failures.
    pub fn issues(&self) -> &[Issue] {
        match self {
            ValidationError::Schema { issues, .. } => issues,
            ValidationError::DuplicateSlugs { .. } => &[],
        }
    }
}

fn render_issues(issues: &[Issue]) -> String {
    issues
        .iter()
        .map(|issue| format!("  - {issue}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn quote_all(slugs: &[String]) -> String {
    slugs
        .iter()
        .map(|s| format!("\"{s}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Collects issues while walking a document.
///
/// The validator keeps a stack of path segments; [`Validator::at`] pushes a
/// segment for the duration of a closure, so nested records report paths like
/// `features.0.title` without threading strings through every call.
#[derive(Debug, Default)]
pub struct Validator {
    path: Vec<String>,
    issues: Vec<Issue>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with `segment` appended to the current path.
    pub fn at<F: FnOnce(&mut Self)>(&mut self, segment: impl fmt::Display, f: F) {
        self.path.push(segment.to_string());
        f(self);
        self.path.pop();
    }

    /// Record `message` against `field` unless `ok` holds.
    pub fn check(&mut self, field: &str, ok: bool, message: impl Into<String>) {
        if !ok {
            self.push(field, message.into());
        }
    }

    /// `value` must contain at least one character.
    pub fn non_empty(&mut self, field: &str, value: &str, message: &str) {
        self.check(field, !value.is_empty(), message);
    }

    /// `value` must contain something other than whitespace.
    pub fn non_blank(&mut self, field: &str, value: &str, message: &str) {
        self.check(field, !value.trim().is_empty(), message);
    }

    /// Apply `non_empty` then the slug pattern, mirroring how both rules
    /// report independently.
    pub fn slug(&mut self, field: &str, value: &str) {
        self.non_empty(field, value, "Slug is required");
        self.check(
            field,
            is_valid_slug(value),
            "Slug must be lowercase with hyphens only",
        );
    }

    /// Validate every element of `items` under `field.<index>`.
    pub fn each<T: Validate>(&mut self, field: &str, items: &[T]) {
        self.at(field, |v| {
            for (i, item) in items.iter().enumerate() {
                v.at(i, |v| item.validate(v));
            }
        });
    }

    /// Validate a nested record under `field`.
    pub fn nested<T: Validate>(&mut self, field: &str, item: &T) {
        self.at(field, |v| item.validate(v));
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Convert collected issues into a result for `subject`.
    pub fn finish(self, subject: &'static str) -> Result<(), ValidationError> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Schema {
                subject,
                issues: self.issues,
            })
        }
    }

    fn push(&mut self, field: &str, message: String) {
        let mut segments = self.path.clone();
        if !field.is_empty() {
            segments.push(field.to_string());
        }
        self.issues.push(Issue {
            path: segments.join("."),
            message,
        });
    }
}

/// Semantic rules for a record type.
pub trait Validate {
    fn validate(&self, v: &mut Validator);
}

/// Validate a top-level array of records, reporting paths as `<index>.<field>`.
pub fn validate_list<T: Validate>(items: &[T], subject: &'static str) -> Result<(), ValidationError> {
    let mut v = Validator::new();
    for (i, item) in items.iter().enumerate() {
        v.at(i, |v| item.validate(v));
    }
    v.finish(subject)
}

/// Slugs that appear more than once, each listed once in order of first repeat.
pub fn duplicate_slugs<'a>(slugs: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();
    for slug in slugs {
        if !seen.insert(slug) && reported.insert(slug) {
            duplicates.push(slug.to_string());
        }
    }
    duplicates
}

/// Fail with [`ValidationError::DuplicateSlugs`] if any slug repeats.
pub fn ensure_unique_slugs<'a>(
    slugs: impl IntoIterator<Item = &'a str>,
    subject: &'static str,
    item: &'static str,
) -> Result<(), ValidationError> {
    let duplicates = duplicate_slugs(slugs);
    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::DuplicateSlugs {
            subject,
            item,
            slugs: duplicates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Widget {
        slug: String,
        parts: Vec<Part>,
    }

    struct Part {
        name: String,
    }

    impl Validate for Part {
        fn validate(&self, v: &mut Validator) {
            v.non_empty("name", &self.name, "Name is required");
        }
    }

    impl Validate for Widget {
        fn validate(&self, v: &mut Validator) {
            v.slug("slug", &self.slug);
            v.check("parts", !self.parts.is_empty(), "At least one part is required");
            v.each("parts", &self.parts);
        }
    }

    #[test]
    fn valid_slugs() {
        assert!(is_valid_slug("web-design"));
        assert!(is_valid_slug("seo2"));
        assert!(is_valid_slug("a"));
    }

    #[test]
    fn invalid_slugs() {
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Web-Design"));
        assert!(!is_valid_slug("web--design"));
        assert!(!is_valid_slug("-web"));
        assert!(!is_valid_slug("web-"));
        assert!(!is_valid_slug("web design"));
        assert!(!is_valid_slug("web_design"));
    }

    #[test]
    fn collects_all_issues_with_paths() {
        let widgets = vec![
            Widget {
                slug: "Bad Slug".into(),
                parts: vec![],
            },
            Widget {
                slug: "good".into(),
                parts: vec![
                    Part { name: "ok".into() },
                    Part { name: "".into() },
                ],
            },
        ];
        let err = validate_list(&widgets, "Widgets data").unwrap_err();
        let paths: Vec<&str> = err.issues().iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["0.slug", "0.parts", "1.parts.1.name"]);
    }

    #[test]
    fn empty_slug_reports_both_rules() {
        let mut v = Validator::new();
        v.slug("slug", "");
        let messages: Vec<&str> = v.issues().iter().map(|i| i.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["Slug is required", "Slug must be lowercase with hyphens only"]
        );
    }

    #[test]
    fn schema_error_message_format() {
        let mut v = Validator::new();
        v.at(0, |v| v.non_empty("title", "", "Title is required"));
        let err = v.finish("Services data").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Services data validation error: Schema validation failed:\n  - 0.title: Title is required"
        );
    }

    #[test]
    fn non_blank_rejects_whitespace() {
        let mut v = Validator::new();
        v.non_empty("a", "   ", "required");
        v.non_blank("b", "   ", "required");
        assert_eq!(v.issues().len(), 1);
        assert_eq!(v.issues()[0].path, "b");
    }

    #[test]
    fn finish_ok_when_no_issues() {
        let v = Validator::new();
        assert!(v.finish("Anything").is_ok());
    }

    #[test]
    fn duplicates_listed_once_in_first_repeat_order() {
        let slugs = ["a", "b", "b", "c", "a", "b"];
        assert_eq!(duplicate_slugs(slugs), vec!["b", "a"]);
    }

    #[test]
    fn duplicate_slug_message_format() {
        let err = ensure_unique_slugs(["x", "x"], "Locations data", "location").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Locations data validation error: Duplicate slugs found: \"x\". Each location must have a unique slug."
        );
    }

    #[test]
    fn unique_slugs_pass() {
        assert!(ensure_unique_slugs(["x", "y"], "Services data", "service").is_ok());
    }
}
