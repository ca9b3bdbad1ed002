//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the content root and describes the business (identity, contact details,
//! social profiles, SEO defaults, opening hours) plus a handful of build
//! settings for the blog, feed and sitemap.
//!
//! ## Configuration Options
//!
//! ```toml
//! name = "Acme Services"            # Required
//! tagline = "Quality Solutions"     # Optional
//! description = "..."               # Required
//! logo = "/images/logo.svg"         # Optional (warns when missing)
//! phone = "(555) 123-4567"          # Optional (warns when missing)
//! twitter_handle = "acme"           # Without the @
//! gtm_id = "GTM-XXXXXXX"
//!
//! [address]                         # Optional (warns when missing)
//! street = "123 Main Street"
//! city = "Austin"
//! state = "TX"
//! zip = "78701"
//!
//! [social]                          # Every URL must start with https://
//! facebook = "https://facebook.com/acme"
//!
//! [seo]
//! title_template = "%s | Acme Services"
//! default_description = "..."
//! site_url = "https://acme.example.com"   # Required
//!
//! [[operating_hours]]
//! day_of_week = "Monday"
//! open = "09:00"
//! close = "17:00"
//!
//! [[footer_nav]]
//! text = "Privacy Policy"
//! link = "/privacy"
//!
//! [blog]
//! posts_per_page = 10
//! words_per_minute = 238
//! related_posts = 3
//! include_drafts = false
//!
//! [feed]
//! max_items = 25
//! language = "en-us"
//!
//! [sitemap]
//! changefreq = "weekly"
//! priority = 0.7
//! ```
//!
//! ## Partial Configuration
//!
//! User values are merged over stock defaults, so build settings can be left
//! out entirely. The business identity has no sensible default and fails
//! validation until it is filled in. Unknown keys are rejected to catch
//! typos early.

use crate::hours::OperatingHoursEntry;
use crate::validation::{Validate, ValidationError, Validator};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Business name. Required.
    pub name: String,
    /// Tagline or slogan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    /// Site description for SEO. Required.
    pub description: String,
    /// Path to the logo image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social: Option<SocialLinks>,
    /// Twitter handle for Twitter cards, without the leading `@`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_handle: Option<String>,
    /// Google Tag Manager container ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtm_id: Option<String>,
    pub seo: SeoConfig,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub operating_hours: Vec<OperatingHoursEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub footer_nav: Vec<FooterNavItem>,
    pub blog: BlogConfig,
    pub feed: FeedConfig,
    pub sitemap: SitemapConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// Social profile URLs. `twitter` doubles as X.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SocialLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tiktok: Option<String>,
}

impl SocialLinks {
    fn clear_blank(&mut self) {
        for url in [
            &mut self.facebook,
            &mut self.instagram,
            &mut self.twitter,
            &mut self.linkedin,
            &mut self.youtube,
            &mut self.tiktok,
        ] {
            clear_blank(url);
        }
    }

    /// Present links as `(platform, url)` in a fixed order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("facebook", &self.facebook),
            ("instagram", &self.instagram),
            ("twitter", &self.twitter),
            ("linkedin", &self.linkedin),
            ("youtube", &self.youtube),
            ("tiktok", &self.tiktok),
        ]
        .into_iter()
        .filter_map(|(platform, url)| url.as_deref().map(|u| (platform, u)))
        .collect()
    }
}

/// SEO defaults applied to every page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeoConfig {
    /// Title template, e.g. `"%s | Business Name"`.
    pub title_template: String,
    pub default_description: String,
    /// Path to the default Open Graph image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    pub og_image_width: u32,
    pub og_image_height: u32,
    /// Full site URL including `https://`. Required.
    pub site_url: String,
}

impl Default for SeoConfig {
    fn default() -> Self {
        Self {
            title_template: "%s".to_string(),
            default_description: String::new(),
            og_image: None,
            og_image_width: 1200,
            og_image_height: 630,
            site_url: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FooterNavItem {
    pub text: String,
    pub link: String,
}

/// Blog listing and post page settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlogConfig {
    /// Posts per listing page (blog index, tag and category archives).
    pub posts_per_page: usize,
    /// Reading speed used for the reading time estimate.
    pub words_per_minute: usize,
    /// Related posts shown under each post.
    pub related_posts: usize,
    /// Render draft posts. The RSS feed never includes drafts.
    pub include_drafts: bool,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            posts_per_page: 10,
            words_per_minute: crate::reading_time::WORDS_PER_MINUTE,
            related_posts: 3,
            include_drafts: false,
        }
    }
}

/// RSS feed settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeedConfig {
    /// Most recent posts to include.
    pub max_items: usize,
    pub language: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            max_items: 25,
            language: "en-us".to_string(),
        }
    }
}

/// Sitemap entry defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SitemapConfig {
    pub changefreq: String,
    pub priority: f64,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            changefreq: "weekly".to_string(),
            priority: 0.7,
        }
    }
}

impl Validate for SiteConfig {
    fn validate(&self, v: &mut Validator) {
        v.non_blank("name", &self.name, "name is required and cannot be empty");
        v.non_blank(
            "description",
            &self.description,
            "description is required and cannot be empty",
        );

        v.at("seo", |v| {
            v.non_blank(
                "site_url",
                &self.seo.site_url,
                "seo.site_url is required and cannot be empty",
            );
            if !self.seo.site_url.trim().is_empty() {
                v.check(
                    "site_url",
                    url::Url::parse(&self.seo.site_url).is_ok(),
                    format!("seo.site_url must be an absolute URL (got: {})", self.seo.site_url),
                );
            }
        });

        if let Some(social) = &self.social {
            v.at("social", |v| {
                for (platform, url) in social.entries() {
                    v.check(
                        platform,
                        url.len() > "https://".len() && url.starts_with("https://"),
                        format!("social.{platform} URL must start with https:// (got: {url})"),
                    );
                }
            });
        }

        v.each("operating_hours", &self.operating_hours);

        v.at("blog", |v| {
            v.check("posts_per_page", self.blog.posts_per_page > 0, "must be at least 1");
            v.check("words_per_minute", self.blog.words_per_minute > 0, "must be at least 1");
            v.check("related_posts", self.blog.related_posts > 0, "must be at least 1");
        });
        v.at("feed", |v| {
            v.check("max_items", self.feed.max_items > 0, "must be at least 1");
        });
        v.at("sitemap", |v| {
            v.check(
                "priority",
                (0.0..=1.0).contains(&self.sitemap.priority),
                "must be between 0.0 and 1.0",
            );
        });
    }
}

/// An empty or whitespace-only optional string counts as unset.
fn clear_blank(value: &mut Option<String>) {
    if value.as_deref().is_some_and(|s| s.trim().is_empty()) {
        *value = None;
    }
}

impl SiteConfig {
    /// Reset blank optional strings to `None` so validation, warnings and
    /// rendering all see them as unset.
    pub fn clear_blank_fields(&mut self) {
        for field in [
            &mut self.tagline,
            &mut self.logo,
            &mut self.phone,
            &mut self.twitter_handle,
            &mut self.gtm_id,
            &mut self.seo.og_image,
        ] {
            clear_blank(field);
        }
        if let Some(social) = &mut self.social {
            social.clear_blank();
        }
    }

    /// Check required fields and formats, collecting every problem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut v = Validator::new();
        Validate::validate(self, &mut v);
        v.finish("Site config")?;
        Ok(())
    }

    /// Recommended-but-optional fields that are missing.
    pub fn warnings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();
        if self.logo.is_none() {
            warnings.push("logo is not set. Consider adding a logo for brand identity.");
        }
        if self.phone.is_none() {
            warnings.push("phone is not set. Consider adding a phone number for contact.");
        }
        if self.address.is_none() {
            warnings.push("address is not set. Consider adding an address for local SEO.");
        }
        warnings
    }

    /// Apply the SEO title template to a page title.
    pub fn page_title(&self, title: &str) -> String {
        self.seo.title_template.replacen("%s", title, 1)
    }

    /// Join a site-relative path onto `seo.site_url`.
    pub fn absolute_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.seo.site_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let mut config: SiteConfig = merged.try_into()?;
    config.clear_blank_fields();
    config.validate()?;
    Ok(config)
}

/// Load, merge, and validate the site config from `root/config.toml`.
///
/// Missing recommended fields are logged as warnings, not errors.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    if overlay.is_none() {
        debug!(root = %root.display(), "no config.toml found, using stock defaults");
    }
    let config = resolve_config(base, overlay)?;
    for warning in config.warnings() {
        warn!("[Site Config] Warning: {warning}");
    }
    Ok(config)
}

/// Returns a fully-commented `config.toml` with demo values for every key.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Storefront Site Configuration
# =============================
# Replace the demo values below with your business information.
# name, description and seo.site_url are required; everything else is
# optional. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Business identity
# ---------------------------------------------------------------------------
name = "Acme Services"
tagline = "Quality Solutions for Modern Problems"
description = "Acme Services provides professional business solutions including consulting, implementation, and support services for companies of all sizes."
logo = "/images/logo.svg"

# ---------------------------------------------------------------------------
# Contact
# ---------------------------------------------------------------------------
phone = "(555) 123-4567"

# Twitter handle for Twitter cards (without @)
twitter_handle = "acmeservices"

# Google Tag Manager container ID. Remove to disable the snippet.
gtm_id = "GTM-XXXXXXX"

[address]
street = "123 Main Street"
city = "Austin"
state = "TX"
zip = "78701"

# ---------------------------------------------------------------------------
# Social links (must start with https://)
# ---------------------------------------------------------------------------
[social]
facebook = "https://facebook.com/acmeservices"
instagram = "https://instagram.com/acmeservices"
twitter = "https://twitter.com/acmeservices"
linkedin = "https://linkedin.com/company/acmeservices"
youtube = "https://youtube.com/@acmeservices"

# ---------------------------------------------------------------------------
# SEO defaults
# ---------------------------------------------------------------------------
[seo]
# %s is replaced by the page title.
title_template = "%s | Acme Services"
default_description = "Acme Services provides professional business solutions including consulting, implementation, and support services."
og_image = "/images/og-default.jpg"
og_image_width = 1200
og_image_height = 630
site_url = "https://acmeservices.example.com"

# ---------------------------------------------------------------------------
# Operating hours (24h HH:MM, days Monday..Sunday)
# ---------------------------------------------------------------------------
[[operating_hours]]
day_of_week = "Monday"
open = "09:00"
close = "17:00"

[[operating_hours]]
day_of_week = "Tuesday"
open = "09:00"
close = "17:00"

[[operating_hours]]
day_of_week = "Wednesday"
open = "09:00"
close = "17:00"

[[operating_hours]]
day_of_week = "Thursday"
open = "09:00"
close = "17:00"

[[operating_hours]]
day_of_week = "Friday"
open = "09:00"
close = "17:00"

[[operating_hours]]
day_of_week = "Saturday"
open = "10:00"
close = "14:00"

# ---------------------------------------------------------------------------
# Footer navigation
# ---------------------------------------------------------------------------
[[footer_nav]]
text = "Privacy Policy"
link = "/privacy"

[[footer_nav]]
text = "Terms of Service"
link = "/terms"

# ---------------------------------------------------------------------------
# Blog
# ---------------------------------------------------------------------------
[blog]
posts_per_page = 10
# Average reading speed for the "N min read" estimate.
words_per_minute = 238
related_posts = 3
# Render drafts (useful for previews). Drafts never appear in the feed.
include_drafts = false

# ---------------------------------------------------------------------------
# RSS feed
# ---------------------------------------------------------------------------
[feed]
max_items = 25
language = "en-us"

# ---------------------------------------------------------------------------
# Sitemap
# ---------------------------------------------------------------------------
[sitemap]
changefreq = "weekly"
priority = 0.7
"##
}
