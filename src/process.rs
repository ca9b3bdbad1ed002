//! Post processing: reading time, HTML bodies and related posts.
//!
//! Stage 2 of the build pipeline. Takes the manifest from the scan stage and
//! derives everything the generate stage needs that is expensive or
//! cross-cutting:
//!
//! - **Draft filtering**: drafts are dropped here unless drafts are enabled,
//!   so no later stage can leak them into listings, feeds or related posts.
//! - **HTML bodies**: markdown rendered with pulldown-cmark. MDX `import` and
//!   `export` lines are removed first.
//! - **Reading time**: minutes at the configured words-per-minute.
//! - **Related posts**: ids of the best-matching published posts.
//!
//! Data files (services, locations) are sorted into display order here too,
//! so generate renders lists as-is.
//!
//! ## Output Structure
//!
//! ```text
//! processed/
//! └── manifest.json
//! ```
//!
//! ## Parallel Processing
//!
//! Posts are processed in parallel with [rayon](https://docs.rs/rayon).
//! Progress is reported through an optional channel so the CLI can print as
//! posts complete.

use crate::config::SiteConfig;
use crate::content::blog::{self, Post};
use crate::content::homepage::HomepageData;
use crate::content::locations::{self, Location};
use crate::content::pages::PagesData;
use crate::content::services::{self, Service};
use crate::content::team::TeamMember;
use crate::reading_time;
use crate::related;
use crate::scan::Manifest;
use pulldown_cmark::{Event, Options, Parser, Tag, html as md_html};
use rayon::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::path::Path;
use std::sync::LazyLock;
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Progress reported while processing.
#[derive(Debug, Clone)]
pub enum ProcessEvent {
    /// Sent once, before any post is processed.
    Started { posts: usize, drafts_skipped: usize },
    PostProcessed {
        /// 1-based position in publication order.
        index: usize,
        id: String,
        title: String,
        reading_minutes: usize,
        related: Vec<String>,
    },
    MemberProcessed { id: String, name: String },
}

/// A post with everything derived from its body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedPost {
    #[serde(flatten)]
    pub post: Post,
    pub reading_minutes: usize,
    /// Rendered body.
    pub html: String,
    /// Ids of related posts, best match first.
    pub related: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedMember {
    #[serde(flatten)]
    pub member: TeamMember,
    pub html: String,
}

/// Output manifest (after processing).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputManifest {
    pub config: SiteConfig,
    pub homepage: HomepageData,
    pub pages: PagesData,
    /// In display order.
    pub services: Vec<Service>,
    /// In display order.
    pub locations: Vec<Location>,
    pub team: Vec<ProcessedMember>,
    /// Published posts (plus drafts when enabled), newest first.
    pub posts: Vec<ProcessedPost>,
}

static MDX_STATEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:import|export)\s").expect("mdx statement pattern is valid")
});

fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
}

/// Byte ranges of every fenced or indented code block in `body`.
fn code_block_ranges(body: &str) -> Vec<Range<usize>> {
    Parser::new_ext(body, markdown_options())
        .into_offset_iter()
        .filter_map(|(event, range)| {
            matches!(event, Event::Start(Tag::CodeBlock(_))).then_some(range)
        })
        .collect()
}

/// Drop MDX `import`/`export` lines that sit outside code blocks.
pub fn strip_mdx_statements(body: &str) -> String {
    let code = code_block_ranges(body);
    let mut kept = String::with_capacity(body.len());
    let mut offset = 0;
    for line in body.split_inclusive('\n') {
        let start = offset;
        offset += line.len();
        let in_code = code.iter().any(|r| r.contains(&start));
        if !in_code && MDX_STATEMENT.is_match(line) {
            continue;
        }
        kept.push_str(line);
    }
    kept
}

/// Render a markdown body to HTML. Top-level MDX `import`/`export` lines
/// are dropped before rendering; code blocks are left untouched.
pub fn render_markdown(body: &str) -> String {
    let source = strip_mdx_statements(body);
    let parser = Parser::new_ext(&source, markdown_options());
    let mut html = String::with_capacity(source.len() * 2);
    md_html::push_html(&mut html, parser);
    html
}

/// Read the scan manifest and process it.
///
/// Drafts survive when `include_drafts` is set or the config enables them.
pub fn process(
    manifest_path: &Path,
    include_drafts: bool,
    progress: Option<Sender<ProcessEvent>>,
) -> Result<OutputManifest, ProcessError> {
    let manifest_content = std::fs::read_to_string(manifest_path)?;
    let input: Manifest = serde_json::from_str(&manifest_content)?;
    Ok(process_manifest(input, include_drafts, progress.as_ref()))
}

/// Process an in-memory scan manifest.
pub fn process_manifest(
    input: Manifest,
    include_drafts: bool,
    progress: Option<&Sender<ProcessEvent>>,
) -> OutputManifest {
    let include_drafts = include_drafts || input.config.blog.include_drafts;
    let words_per_minute = input.config.blog.words_per_minute;
    let related_limit = input.config.blog.related_posts;

    let posts = blog::visible_posts(&input.posts, include_drafts);
    let published = blog::visible_posts(&input.posts, false);
    if let Some(tx) = progress {
        tx.send(ProcessEvent::Started {
            posts: posts.len(),
            drafts_skipped: input.posts.len() - posts.len(),
        })
        .ok();
    }

    let processed_posts: Vec<ProcessedPost> = posts
        .par_iter()
        .enumerate()
        .map(|(i, post)| {
            let related: Vec<String> = related::related_posts(post, &published, related_limit)
                .into_iter()
                .map(|p| p.id.clone())
                .collect();
            let processed = ProcessedPost {
                post: post.clone(),
                reading_minutes: reading_time::reading_time_at(&post.body, words_per_minute),
                html: render_markdown(&post.body),
                related,
            };
            if let Some(tx) = progress {
                tx.send(ProcessEvent::PostProcessed {
                    index: i + 1,
                    id: processed.post.id.clone(),
                    title: processed.post.title.clone(),
                    reading_minutes: processed.reading_minutes,
                    related: processed.related.clone(),
                })
                .ok();
            }
            processed
        })
        .collect();

    let team: Vec<ProcessedMember> = input
        .team
        .into_iter()
        .map(|member| {
            if let Some(tx) = progress {
                tx.send(ProcessEvent::MemberProcessed {
                    id: member.id.clone(),
                    name: member.name.clone(),
                })
                .ok();
            }
            ProcessedMember {
                html: render_markdown(&member.body),
                member,
            }
        })
        .collect();

    OutputManifest {
        services: services::sorted_services(&input.services),
        locations: locations::sorted_locations(&input.locations),
        config: input.config,
        homepage: input.homepage,
        pages: input.pages,
        team,
        posts: processed_posts,
    }
}
