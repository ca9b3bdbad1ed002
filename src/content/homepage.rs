//! Homepage sections (`data/homepage.json`).

use super::services::CallToAction;
use super::{ContentError, read_json};
use crate::validation::{Validate, Validator};
use serde::{Deserialize, Serialize};
use std::path::Path;

const SUBJECT: &str = "Homepage data";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomepageData {
    pub hero: Hero,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub stats: Vec<Stat>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
    pub cta: ClosingCta,
    #[serde(default)]
    pub faq: Vec<FaqEntry>,
    /// Render the contact block (phone, address, hours) near the bottom.
    #[serde(default)]
    pub show_contact: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub headline: String,
    pub subheadline: String,
    pub cta: CallToAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub icon: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    /// Display value, e.g. `"500+"`.
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub quote: String,
    pub name: String,
    /// Role or company line under the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
}

/// Closing call to action above the footer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosingCta {
    pub headline: String,
    pub button: CallToAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

impl Validate for Hero {
    fn validate(&self, v: &mut Validator) {
        v.non_empty("headline", &self.headline, "Headline is required");
        v.non_empty("subheadline", &self.subheadline, "Subheadline is required");
        v.at("cta", |v| {
            v.non_empty("text", &self.cta.text, "CTA text is required");
            v.non_empty("link", &self.cta.link, "CTA link is required");
        });
    }
}

impl Validate for Feature {
    fn validate(&self, v: &mut Validator) {
        v.non_empty("icon", &self.icon, "Icon key is required");
        v.non_empty("title", &self.title, "Feature title is required");
        v.non_empty("description", &self.description, "Feature description is required");
    }
}

impl Validate for Stat {
    fn validate(&self, v: &mut Validator) {
        v.non_empty("value", &self.value, "Stat value is required");
        v.non_empty("label", &self.label, "Stat label is required");
    }
}

impl Validate for Testimonial {
    fn validate(&self, v: &mut Validator) {
        v.non_empty("quote", &self.quote, "Quote is required");
        v.non_empty("name", &self.name, "Name is required");
    }
}

impl Validate for ClosingCta {
    fn validate(&self, v: &mut Validator) {
        v.non_empty("headline", &self.headline, "CTA headline is required");
        v.at("button", |v| {
            v.non_empty("text", &self.button.text, "Button text is required");
            v.non_empty("link", &self.button.link, "Button link is required");
        });
    }
}

impl Validate for FaqEntry {
    fn validate(&self, v: &mut Validator) {
        v.non_empty("question", &self.question, "Question is required");
        v.non_empty("answer", &self.answer, "Answer is required");
    }
}

impl Validate for HomepageData {
    fn validate(&self, v: &mut Validator) {
        v.nested("hero", &self.hero);
        v.each("features", &self.features);
        v.each("stats", &self.stats);
        v.each("testimonials", &self.testimonials);
        v.nested("cta", &self.cta);
        v.each("faq", &self.faq);
    }
}

impl HomepageData {
    pub fn validate(&self) -> Result<(), ContentError> {
        let mut v = Validator::new();
        Validate::validate(self, &mut v);
        v.finish(SUBJECT)?;
        Ok(())
    }
}

/// Load and validate `homepage.json`. The file is required.
pub fn load_homepage(path: &Path) -> Result<HomepageData, ContentError> {
    let data: HomepageData = read_json(path)?;
    data.validate()?;
    Ok(data)
}
