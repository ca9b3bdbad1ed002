//! Structured site content: JSON data files and markdown collections.
//!
//! | Module | Source | Required |
//! |--------|--------|----------|
//! | [`homepage`] | `data/homepage.json` | yes |
//! | [`pages`] | `data/pages.json` | yes |
//! | [`services`] | `data/services.json` | no |
//! | [`locations`] | `data/locations.json` | no |
//! | [`team`] | `team/**/*.md` | no |
//! | [`blog`] | `blog/**/*.md` | no |
//!
//! Every loader decodes, then validates, and fails with an error naming the
//! file and every rule it breaks. Nothing here renders HTML; that is the
//! generate stage's job.

pub mod blog;
pub mod homepage;
pub mod locations;
pub mod pages;
pub mod services;
pub mod team;

use crate::validation::{ValidationError, duplicate_slugs};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Required data file not found: {0}")]
    MissingFile(PathBuf),
    #[error("Failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("No frontmatter block found in {0}")]
    MissingFrontmatter(PathBuf),
    #[error("Failed to parse frontmatter in {path}: {source}")]
    Frontmatter {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("{path}: {source}")]
    Entry {
        path: PathBuf,
        source: ValidationError,
    },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Entries in {} map to the same id: {}", .root.display(), .clashes.join("; "))]
    DuplicateIds { root: PathBuf, clashes: Vec<String> },
    #[error("Failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
}

/// Read and decode a JSON data file.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ContentError> {
    if !path.exists() {
        return Err(ContentError::MissingFile(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| ContentError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Read an optional JSON array file; a missing file is an empty list.
pub(crate) fn read_json_list<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ContentError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    read_json(path)
}

/// Split a `---` fenced YAML block off the top of a markdown document.
///
/// Returns `(yaml, body)`, or `None` when the document doesn't open with a
/// fence or the fence is never closed.
pub fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let rest = content
        .strip_prefix("---\r\n")
        .or_else(|| content.strip_prefix("---\n"))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((yaml, body));
        }
        offset += line.len();
    }
    None
}

/// Markdown documents (`.md`, `.mdx`) under `root`, sorted, with hidden
/// files and directories skipped. A missing root yields nothing.
pub(crate) fn collection_files(root: &Path) -> Result<Vec<PathBuf>, ContentError> {
    if !root.is_dir() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'));
    for entry in walker {
        let entry = entry.map_err(|source| ContentError::Walk {
            path: root.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let is_markdown = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("md") || e.eq_ignore_ascii_case("mdx"))
            .unwrap_or(false);
        if entry.file_type().is_file() && is_markdown {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}

/// A markdown document parsed into typed frontmatter plus its body.
pub(crate) struct Document<F> {
    pub path: PathBuf,
    pub id: String,
    pub frontmatter: F,
    pub body: String,
}

/// Load every document in a collection, decoding frontmatter into `F`.
pub(crate) fn load_documents<F: DeserializeOwned>(
    root: &Path,
) -> Result<Vec<Document<F>>, ContentError> {
    let mut documents = Vec::new();
    for path in collection_files(root)? {
        let content = fs::read_to_string(&path)?;
        let (yaml, body) = split_frontmatter(&content)
            .ok_or_else(|| ContentError::MissingFrontmatter(path.clone()))?;
        let frontmatter: F =
            serde_yaml::from_str(yaml).map_err(|source| ContentError::Frontmatter {
                path: path.clone(),
                source,
            })?;
        let relative = path.strip_prefix(root).unwrap_or(&path);
        documents.push(Document {
            id: crate::naming::entry_id(relative),
            path,
            frontmatter,
            body: body.to_string(),
        });
    }
    ensure_unique_ids(root, &documents)?;
    Ok(documents)
}

/// Two files whose names differ only in case or spaces get the same id and
/// would publish to the same route.
fn ensure_unique_ids<F>(root: &Path, documents: &[Document<F>]) -> Result<(), ContentError> {
    let duplicates = duplicate_slugs(documents.iter().map(|d| d.id.as_str()));
    if duplicates.is_empty() {
        return Ok(());
    }
    let clashes = duplicates
        .into_iter()
        .map(|id| {
            let files: Vec<String> = documents
                .iter()
                .filter(|d| d.id == id)
                .map(|d| {
                    let relative = d.path.strip_prefix(root).unwrap_or(&d.path);
                    relative.to_string_lossy().replace('\\', "/")
                })
                .collect();
            format!("{id} ({})", files.join(", "))
        })
        .collect();
    Err(ContentError::DuplicateIds {
        root: root.to_path_buf(),
        clashes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn split_frontmatter_basic() {
        let (yaml, body) = split_frontmatter("---\ntitle: Hi\n---\nBody\n").unwrap();
        assert_eq!(yaml, "title: Hi\n");
        assert_eq!(body, "Body\n");
    }

    #[test]
    fn split_frontmatter_crlf() {
        let (yaml, body) = split_frontmatter("---\r\ntitle: Hi\r\n---\r\nBody").unwrap();
        assert_eq!(yaml, "title: Hi\r\n");
        assert_eq!(body, "Body");
    }

    #[test]
    fn split_frontmatter_ignores_dashes_inside_values() {
        let (yaml, _) = split_frontmatter("---\ntitle: a --- b\n---\n").unwrap();
        assert_eq!(yaml, "title: a --- b\n");
    }

    #[test]
    fn split_frontmatter_requires_opening_fence() {
        assert!(split_frontmatter("title: Hi\n---\n").is_none());
        assert!(split_frontmatter("# Heading").is_none());
    }

    #[test]
    fn split_frontmatter_requires_closing_fence() {
        assert!(split_frontmatter("---\ntitle: Hi\n").is_none());
    }

    #[test]
    fn collection_files_finds_md_and_mdx_recursively() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("2024")).unwrap();
        fs::create_dir_all(root.join(".drafts")).unwrap();
        fs::write(root.join("a.md"), "").unwrap();
        fs::write(root.join("2024/b.mdx"), "").unwrap();
        fs::write(root.join("notes.txt"), "").unwrap();
        fs::write(root.join(".hidden.md"), "").unwrap();
        fs::write(root.join(".drafts/c.md"), "").unwrap();

        let files = collection_files(root).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(names, vec!["2024/b.mdx", "a.md"]);
    }

    #[test]
    fn collection_files_missing_root_is_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(collection_files(&tmp.path().join("nope")).unwrap().is_empty());
    }

    #[test]
    fn read_json_missing_file() {
        let tmp = TempDir::new().unwrap();
        let result: Result<Vec<String>, _> = read_json(&tmp.path().join("x.json"));
        assert!(matches!(result, Err(ContentError::MissingFile(_))));
    }

    #[test]
    fn read_json_list_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let result: Vec<String> = read_json_list(&tmp.path().join("x.json")).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn read_json_reports_path_on_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.json");
        fs::write(&path, "[1, 2,").unwrap();
        let err = read_json::<Vec<u32>>(&path).unwrap_err();
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn load_documents_assigns_ids_and_bodies() {
        #[derive(serde::Deserialize)]
        struct Fm {
            title: String,
        }

        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("nested")).unwrap();
        fs::write(tmp.path().join("nested/Hello World.md"), "---\ntitle: Hi\n---\nBody").unwrap();

        let docs = load_documents::<Fm>(tmp.path()).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "nested/hello-world");
        assert_eq!(docs[0].frontmatter.title, "Hi");
        assert_eq!(docs[0].body, "Body");
    }

    #[test]
    fn load_documents_rejects_clashing_ids() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("Launch Day.md"), "---\ntitle: A\n---\n").unwrap();
        fs::write(tmp.path().join("launch-day.md"), "---\ntitle: B\n---\n").unwrap();
        fs::write(tmp.path().join("other.md"), "---\ntitle: C\n---\n").unwrap();

        let err = load_documents::<serde_yaml::Value>(tmp.path()).err().unwrap();
        let ContentError::DuplicateIds { clashes, .. } = &err else {
            panic!("expected duplicate ids, got {err:?}");
        };
        assert_eq!(clashes, &vec!["launch-day (Launch Day.md, launch-day.md)".to_string()]);
    }

    #[test]
    fn load_documents_without_frontmatter_fails() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("x.md"), "# Just markdown").unwrap();
        let result = load_documents::<serde_yaml::Value>(tmp.path());
        assert!(matches!(result, Err(ContentError::MissingFrontmatter(_))));
    }
}
