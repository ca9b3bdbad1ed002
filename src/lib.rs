//! # Storefront
//!
//! A static site generator for small-business websites. Business data
//! (services, locations, homepage sections) lives in JSON files; team bios
//! and blog posts are markdown with YAML frontmatter. Everything is validated
//! before a page is written, and the output is plain HTML with no
//! client-side JavaScript.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! Content flows through three stages, each producing a JSON manifest that
//! the next stage consumes:
//!
//! ```text
//! 1. Scan      content/  →  manifest.json    (files → validated data)
//! 2. Process   manifest  →  processed/       (HTML bodies, reading time, related posts)
//! 3. Generate  manifest  →  dist/            (pages, rss.xml, sitemap.xml)
//! ```
//!
//! Each manifest is human-readable JSON, so a broken page can be traced to
//! the stage that produced the bad data.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: loads and validates every content source |
//! | [`process`] | Stage 2: draft filtering, markdown rendering, reading time, related posts |
//! | [`generate`] | Stage 3: renders every route with Maud, writes feed and sitemap |
//! | [`config`] | `config.toml` loading, stock defaults, validation |
//! | [`content`] | Typed content collections and their loaders |
//! | [`validation`] | Path-tracking validator shared by every loader |
//! | [`hours`] | Operating hours: Schema.org and display formatting |
//! | [`reading_time`] | Markup stripping and words-per-minute estimate |
//! | [`related`] | Tag/category overlap scoring for related posts |
//! | [`feed`] | RSS 2.0 feed and XML sitemap |
//! | [`seo`] | Meta tags, Open Graph, JSON-LD builders |
//! | [`icons`] | Outline SVG icon registry |
//! | [`naming`] | Entry ids and taxonomy term slugs |
//! | [`output`] | CLI output formatting for each stage |
//!
//! # Design Decisions
//!
//! ## Validate Everything Up Front
//!
//! A data file that fails validation stops the build with an error naming
//! the file and every broken field (`services.json: 0.slug: ...`). Pages are
//! never rendered from partially valid data.
//!
//! ## Maud Over Template Engines
//!
//! HTML, RSS and sitemap XML are all generated with
//! [Maud](https://maud.lambda.xyz/). Interpolated text is escaped, so
//! business copy containing `&` or `<` cannot break the markup.

pub mod config;
pub mod content;
pub mod feed;
pub mod generate;
pub mod hours;
pub mod icons;
pub mod naming;
pub mod output;
pub mod process;
pub mod reading_time;
pub mod related;
pub mod scan;
pub mod seo;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_helpers;
