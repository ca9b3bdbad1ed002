//! Services offered by the business (`data/services.json`).
//!
//! Each service gets a listing card and a detail page at
//! `/services/<slug>/`. Listing order is `order` ascending, with ties broken
//! alphabetically by title.

use super::{ContentError, read_json_list};
use crate::icons;
use crate::validation::{Validate, Validator, ensure_unique_slugs, validate_list};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::Path;
use tracing::warn;

const SUBJECT: &str = "Services data";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// URL slug, unique across services.
    pub slug: String,
    pub title: String,
    /// Short description for listings.
    pub description: String,
    /// Extended plain-text description for the detail page.
    pub long_description: String,
    /// Key into the [`icons`] registry.
    pub icon: String,
    pub features: Vec<ServiceFeature>,
    pub cta: CallToAction,
    /// Sort order, lower first.
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceFeature {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallToAction {
    pub text: String,
    pub link: String,
}

impl Validate for ServiceFeature {
    fn validate(&self, v: &mut Validator) {
        v.non_empty("title", &self.title, "Feature title is required");
        v.non_empty("description", &self.description, "Feature description is required");
    }
}

impl Validate for CallToAction {
    fn validate(&self, v: &mut Validator) {
        v.non_empty("text", &self.text, "CTA text is required");
        v.non_empty("link", &self.link, "CTA link is required");
    }
}

impl Validate for Service {
    fn validate(&self, v: &mut Validator) {
        v.slug("slug", &self.slug);
        v.non_empty("title", &self.title, "Title is required");
        v.non_empty("description", &self.description, "Description is required");
        v.non_empty(
            "longDescription",
            &self.long_description,
            "Long description is required",
        );
        v.non_empty("icon", &self.icon, "Icon key is required");
        v.check(
            "features",
            !self.features.is_empty(),
            "At least one feature is required",
        );
        v.each("features", &self.features);
        v.nested("cta", &self.cta);
    }
}

/// Check every service and reject duplicate slugs.
pub fn validate_services(services: &[Service]) -> Result<(), ContentError> {
    validate_list(services, SUBJECT)?;
    ensure_unique_slugs(services.iter().map(|s| s.slug.as_str()), SUBJECT, "service")?;
    for service in services.iter().filter(|s| !icons::has_icon(&s.icon)) {
        warn!(
            service = %service.slug,
            icon = %service.icon,
            "unknown icon key, a placeholder will be rendered"
        );
    }
    Ok(())
}

/// Load and validate `services.json`. A missing file means no services.
pub fn load_services(path: &Path) -> Result<Vec<Service>, ContentError> {
    let services: Vec<Service> = read_json_list(path)?;
    validate_services(&services)?;
    Ok(services)
}

/// Alphabetical comparison that ignores case first, then falls back to
/// exact byte order so the result is total.
pub(crate) fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Services ordered by `order`, then title.
pub fn sorted_services(services: &[Service]) -> Vec<Service> {
    let mut sorted = services.to_vec();
    sorted.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| compare_text(&a.title, &b.title)));
    sorted
}

pub fn service_by_slug<'a>(services: &'a [Service], slug: &str) -> Option<&'a Service> {
    services.iter().find(|s| s.slug == slug)
}

/// Slugs in file order, for route generation.
pub fn all_service_slugs(services: &[Service]) -> Vec<String> {
    services.iter().map(|s| s.slug.clone()).collect()
}
