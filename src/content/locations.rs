//! Business locations (`data/locations.json`).
//!
//! Each location gets a detail page at `/locations/<slug>/` with a
//! LocalBusiness JSON-LD block. City names are kept exactly as written so
//! accents survive into titles and structured data.

use super::services::compare_text;
use super::{ContentError, read_json_list};
use crate::hours::{self, OperatingHoursEntry};
use crate::validation::{Validate, Validator, ensure_unique_slugs, validate_list};
use serde::{Deserialize, Serialize};
use std::path::Path;

const SUBJECT: &str = "Locations data";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub slug: String,
    pub city: String,
    /// State or province code.
    pub state: String,
    /// Full street address.
    pub address: String,
    /// Falls back to the site phone when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub description: String,
    pub long_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    /// Local SEO keywords for the area this location serves.
    pub service_area_keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_hours: Option<Vec<OperatingHoursEntry>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Validate for Coordinates {
    fn validate(&self, v: &mut Validator) {
        v.check(
            "lat",
            (-90.0..=90.0).contains(&self.lat),
            "Latitude must be between -90 and 90",
        );
        v.check(
            "lng",
            (-180.0..=180.0).contains(&self.lng),
            "Longitude must be between -180 and 180",
        );
    }
}

impl Validate for Location {
    fn validate(&self, v: &mut Validator) {
        v.slug("slug", &self.slug);
        v.non_empty("city", &self.city, "City is required");
        v.non_empty("state", &self.state, "State is required");
        v.non_empty("address", &self.address, "Address is required");
        v.non_empty("description", &self.description, "Description is required");
        v.non_empty(
            "longDescription",
            &self.long_description,
            "Long description is required",
        );
        if let Some(coordinates) = &self.coordinates {
            v.nested("coordinates", coordinates);
        }
        v.check(
            "serviceAreaKeywords",
            !self.service_area_keywords.is_empty(),
            "At least one service area keyword is required",
        );
        v.at("serviceAreaKeywords", |v| {
            for (i, keyword) in self.service_area_keywords.iter().enumerate() {
                v.non_empty(
                    &i.to_string(),
                    keyword,
                    "Service area keyword cannot be empty",
                );
            }
        });
        if let Some(schedule) = &self.operating_hours {
            v.at("operatingHours", |v| {
                for (i, entry) in schedule.iter().enumerate() {
                    v.at(i, |v| {
                        v.check(
                            "open",
                            hours::is_valid_time(&entry.open),
                            "Open time must be in HH:MM format (00:00-23:59)",
                        );
                        v.check(
                            "close",
                            hours::is_valid_time(&entry.close),
                            "Close time must be in HH:MM format (00:00-23:59)",
                        );
                    });
                }
            });
        }
    }
}

impl Location {
    /// `"Austin, TX"`.
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.city, self.state)
    }
}

/// Check every location and reject duplicate slugs.
pub fn validate_locations(locations: &[Location]) -> Result<(), ContentError> {
    validate_list(locations, SUBJECT)?;
    ensure_unique_slugs(
        locations.iter().map(|l| l.slug.as_str()),
        SUBJECT,
        "location",
    )?;
    Ok(())
}

/// Load and validate `locations.json`. A missing file means no locations.
pub fn load_locations(path: &Path) -> Result<Vec<Location>, ContentError> {
    let locations: Vec<Location> = read_json_list(path)?;
    validate_locations(&locations)?;
    Ok(locations)
}

/// Locations ordered alphabetically by city, then state.
pub fn sorted_locations(locations: &[Location]) -> Vec<Location> {
    let mut sorted = locations.to_vec();
    sorted.sort_by(|a, b| {
        compare_text(&a.city, &b.city).then_with(|| compare_text(&a.state, &b.state))
    });
    sorted
}

pub fn location_by_slug<'a>(locations: &'a [Location], slug: &str) -> Option<&'a Location> {
    locations.iter().find(|l| l.slug == slug)
}

pub fn all_location_slugs(locations: &[Location]) -> Vec<String> {
    locations.iter().map(|l| l.slug.clone()).collect()
}
