//! Listing and taxonomy page metadata (`data/pages.json`).
//!
//! Listing pages (`/blog/`, `/services/`, ...) take their title and meta
//! description from here. Taxonomy archives use templates where `%s` is
//! replaced by the term, e.g. `"Posts tagged %s"`.

use super::{ContentError, read_json};
use crate::validation::{Validate, Validator};
use serde::{Deserialize, Serialize};
use std::path::Path;

const SUBJECT: &str = "Pages data";
const PLACEHOLDER: &str = "%s";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagesData {
    pub listings: Listings,
    pub taxonomies: Taxonomies,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listings {
    pub blog: ListingMeta,
    pub services: ListingMeta,
    pub locations: ListingMeta,
    pub team: ListingMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingMeta {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Taxonomies {
    pub tags: TaxonomyMeta,
    pub categories: TaxonomyMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonomyMeta {
    pub title_template: String,
    pub description_template: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingKey {
    Blog,
    Services,
    Locations,
    Team,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaxonomyKind {
    Tags,
    Categories,
}

impl TaxonomyKind {
    /// URL segment under `/blog/`.
    pub fn segment(self) -> &'static str {
        match self {
            TaxonomyKind::Tags => "tags",
            TaxonomyKind::Categories => "categories",
        }
    }
}

impl Validate for ListingMeta {
    fn validate(&self, v: &mut Validator) {
        v.non_empty("title", &self.title, "Title is required");
        v.non_empty("description", &self.description, "Description is required");
    }
}

impl Validate for TaxonomyMeta {
    fn validate(&self, v: &mut Validator) {
        v.non_empty("titleTemplate", &self.title_template, "Title template is required");
        v.check(
            "titleTemplate",
            self.title_template.contains(PLACEHOLDER),
            "Title template must include %s placeholder",
        );
        v.non_empty(
            "descriptionTemplate",
            &self.description_template,
            "Description template is required",
        );
        v.check(
            "descriptionTemplate",
            self.description_template.contains(PLACEHOLDER),
            "Description template must include %s placeholder",
        );
    }
}

impl Validate for PagesData {
    fn validate(&self, v: &mut Validator) {
        v.at("listings", |v| {
            v.nested("blog", &self.listings.blog);
            v.nested("services", &self.listings.services);
            v.nested("locations", &self.listings.locations);
            v.nested("team", &self.listings.team);
        });
        v.at("taxonomies", |v| {
            v.nested("tags", &self.taxonomies.tags);
            v.nested("categories", &self.taxonomies.categories);
        });
    }
}

impl PagesData {
    pub fn validate(&self) -> Result<(), ContentError> {
        let mut v = Validator::new();
        Validate::validate(self, &mut v);
        v.finish(SUBJECT)?;
        Ok(())
    }

    pub fn listing_meta(&self, key: ListingKey) -> &ListingMeta {
        match key {
            ListingKey::Blog => &self.listings.blog,
            ListingKey::Services => &self.listings.services,
            ListingKey::Locations => &self.listings.locations,
            ListingKey::Team => &self.listings.team,
        }
    }

    pub fn taxonomy(&self, kind: TaxonomyKind) -> &TaxonomyMeta {
        match kind {
            TaxonomyKind::Tags => &self.taxonomies.tags,
            TaxonomyKind::Categories => &self.taxonomies.categories,
        }
    }

    /// Archive title for `term`. Only the first `%s` is replaced.
    pub fn taxonomy_title(&self, kind: TaxonomyKind, term: &str) -> String {
        self.taxonomy(kind).title_template.replacen(PLACEHOLDER, term, 1)
    }

    /// Archive meta description for `term`. Only the first `%s` is replaced.
    pub fn taxonomy_description(&self, kind: TaxonomyKind, term: &str) -> String {
        self.taxonomy(kind)
            .description_template
            .replacen(PLACEHOLDER, term, 1)
    }
}

/// Load and validate `pages.json`. The file is required.
pub fn load_pages(path: &Path) -> Result<PagesData, ContentError> {
    let data: PagesData = read_json(path)?;
    data.validate()?;
    Ok(data)
}
