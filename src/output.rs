//! CLI output formatting for all pipeline stages.
//!
//! Output is a content inventory: each entity is shown by its identity
//! (positional index + title) with details such as slugs, ids and routes on
//! indented lines underneath.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Config
//!     Acme Services → https://acme.example.com
//!
//! Services
//! 001 Web Design
//!     Slug: web-design
//!
//! Posts (3, 1 draft)
//! 001 Launch Day
//!     Id: 2024/launch-day
//!     Author: jane-doe
//! ```
//!
//! ## Process
//!
//! ```text
//! Processing 2 posts (1 draft skipped)
//! 001 Launch Day (3 min read)
//!     Related: hello-world
//! Team: Jane Doe
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//! Web Design → services/web-design/index.html
//!
//! Generated 14 pages, 2 feed items, 12 sitemap URLs, 1 asset
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::generate::GenerateReport;
use crate::process::ProcessEvent;
use crate::scan::Manifest;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn entity_header(index: usize, title: &str) -> String {
    format!("{} {}", format_index(index), title)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    }
}

/// Output file for a route, relative to the output directory.
fn route_file(route: &str) -> String {
    let trimmed = route.trim_matches('/');
    if trimmed.is_empty() {
        "index.html".to_string()
    } else {
        format!("{trimmed}/index.html")
    }
}

// ============================================================================
// Scan
// ============================================================================

pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Config".to_string());
    lines.push(format!(
        "{}{} → {}",
        indent(1),
        manifest.config.name,
        manifest.config.seo.site_url
    ));
    lines.push(format!("{}Source: {}", indent(1), source_root.display()));

    if !manifest.services.is_empty() {
        lines.push(String::new());
        lines.push("Services".to_string());
        for (i, service) in manifest.services.iter().enumerate() {
            lines.push(entity_header(i + 1, &service.title));
            lines.push(format!("{}Slug: {}", indent(1), service.slug));
        }
    }

    if !manifest.locations.is_empty() {
        lines.push(String::new());
        lines.push("Locations".to_string());
        for (i, location) in manifest.locations.iter().enumerate() {
            lines.push(entity_header(i + 1, &location.display_name()));
            lines.push(format!("{}Slug: {}", indent(1), location.slug));
        }
    }

    if !manifest.team.is_empty() {
        lines.push(String::new());
        lines.push("Team".to_string());
        for (i, member) in manifest.team.iter().enumerate() {
            lines.push(format!("{} ({})", entity_header(i + 1, &member.name), member.role));
            lines.push(format!("{}Id: {}", indent(1), member.id));
        }
    }

    let drafts = manifest.posts.iter().filter(|p| p.draft).count();
    lines.push(String::new());
    lines.push(format!(
        "Posts ({}, {})",
        manifest.posts.len(),
        plural(drafts, "draft")
    ));
    for (i, post) in manifest.posts.iter().enumerate() {
        let marker = if post.draft { " [draft]" } else { "" };
        lines.push(format!("{}{}", entity_header(i + 1, &post.title), marker));
        lines.push(format!("{}Id: {}", indent(1), post.id));
        lines.push(format!("{}Author: {}", indent(1), post.author));
        if !post.description.is_empty() {
            lines.push(format!(
                "{}Description: {}",
                indent(1),
                truncate_desc(&post.description, 60)
            ));
        }
    }

    lines
}

pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{line}");
    }
}

// ============================================================================
// Process
// ============================================================================

pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::Started {
            posts,
            drafts_skipped,
        } => {
            let mut line = format!("Processing {}", plural(*posts, "post"));
            if *drafts_skipped > 0 {
                line.push_str(&format!(" ({} skipped)", plural(*drafts_skipped, "draft")));
            }
            vec![line]
        }
        ProcessEvent::PostProcessed {
            index,
            title,
            reading_minutes,
            related,
            ..
        } => {
            let mut lines = vec![format!(
                "{} ({} min read)",
                entity_header(*index, title),
                reading_minutes
            )];
            if !related.is_empty() {
                lines.push(format!("{}Related: {}", indent(1), related.join(", ")));
            }
            lines
        }
        ProcessEvent::MemberProcessed { name, .. } => vec![format!("Team: {name}")],
    }
}

// ============================================================================
// Generate
// ============================================================================

pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .pages
        .iter()
        .map(|page| {
            let title = if page.route == "/" { "Home" } else { &page.title };
            format!("{} → {}", title, route_file(&page.route))
        })
        .collect();

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}, {}, {}",
        plural(report.pages.len(), "page"),
        plural(report.feed_items, "feed item"),
        plural(report.sitemap_urls, "sitemap URL"),
        plural(report.assets_copied, "asset"),
    ));
    lines
}

pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{line}");
    }
}
