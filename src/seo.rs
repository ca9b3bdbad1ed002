//! Head metadata and Schema.org structured data.
//!
//! [`meta_tags`] renders the `<head>` block every page shares: title,
//! description, canonical link, Open Graph and Twitter card tags. The
//! remaining functions build JSON-LD documents as [`serde_json::Value`]s;
//! [`json_ld`] embeds one in a `<script>` tag.
//!
//! JSON is embedded raw, so `</` is escaped to `<\/` to keep a value like
//! `"</script>"` from closing the tag early.

use crate::config::{Address, SiteConfig};
use crate::content::blog::Post;
use crate::content::homepage::FaqEntry;
use crate::content::locations::Location;
use crate::content::services::Service;
use crate::content::team::TeamMember;
use crate::hours;
use chrono::{DateTime, SecondsFormat, Utc};
use maud::{Markup, PreEscaped, html};
use serde_json::{Map, Value, json};

const SCHEMA_CONTEXT: &str = "https://schema.org";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OgType {
    Website,
    Article,
}

impl OgType {
    fn as_str(self) -> &'static str {
        match self {
            OgType::Website => "website",
            OgType::Article => "article",
        }
    }
}

/// What a single page says about itself.
#[derive(Debug, Clone)]
pub struct PageMeta<'a> {
    /// Page title before the site title template is applied.
    pub title: &'a str,
    /// Falls back to `seo.default_description`, then the site description.
    pub description: Option<&'a str>,
    /// Site-relative path, e.g. `/blog/hello-world/`.
    pub path: &'a str,
    /// Page-specific share image; falls back to `seo.og_image`.
    pub image: Option<&'a str>,
    pub og_type: OgType,
    pub published: Option<DateTime<Utc>>,
}

impl<'a> PageMeta<'a> {
    pub fn new(title: &'a str, path: &'a str) -> Self {
        Self {
            title,
            description: None,
            path,
            image: None,
            og_type: OgType::Website,
            published: None,
        }
    }

    pub fn description(mut self, description: &'a str) -> Self {
        self.description = Some(description);
        self
    }

    pub fn article(mut self, published: DateTime<Utc>, image: Option<&'a str>) -> Self {
        self.og_type = OgType::Article;
        self.published = Some(published);
        self.image = image;
        self
    }
}

fn absolute(config: &SiteConfig, path_or_url: &str) -> String {
    if path_or_url.starts_with("http://") || path_or_url.starts_with("https://") {
        path_or_url.to_string()
    } else {
        config.absolute_url(path_or_url)
    }
}

fn resolved_description<'a>(config: &'a SiteConfig, meta: &PageMeta<'a>) -> &'a str {
    meta.description
        .filter(|d| !d.trim().is_empty())
        .or_else(|| Some(config.seo.default_description.as_str()).filter(|d| !d.trim().is_empty()))
        .unwrap_or(&config.description)
}

/// `<title>`, description, canonical, Open Graph and Twitter tags.
pub fn meta_tags(config: &SiteConfig, meta: &PageMeta) -> Markup {
    let title = config.page_title(meta.title);
    let description = resolved_description(config, meta);
    let canonical = config.absolute_url(meta.path);
    let image = meta
        .image
        .or(config.seo.og_image.as_deref())
        .map(|i| absolute(config, i));
    let card = if image.is_some() {
        "summary_large_image"
    } else {
        "summary"
    };

    html! {
        title { (title) }
        meta name="description" content=(description);
        link rel="canonical" href=(canonical);
        meta property="og:type" content=(meta.og_type.as_str());
        meta property="og:site_name" content=(config.name);
        meta property="og:title" content=(title);
        meta property="og:description" content=(description);
        meta property="og:url" content=(canonical);
        @if let Some(image) = &image {
            meta property="og:image" content=(image);
            @if meta.image.is_none() {
                meta property="og:image:width" content=(config.seo.og_image_width);
                meta property="og:image:height" content=(config.seo.og_image_height);
            }
        }
        @if let Some(published) = meta.published {
            meta property="article:published_time"
                content=(published.to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        meta name="twitter:card" content=(card);
        @if let Some(handle) = &config.twitter_handle {
            meta name="twitter:site" content={ "@" (handle.trim_start_matches('@')) };
        }
        meta name="twitter:title" content=(title);
        meta name="twitter:description" content=(description);
        @if let Some(image) = &image {
            meta name="twitter:image" content=(image);
        }
    }
}

/// Google Tag Manager loader for `<head>`, when `gtm_id` is set.
pub fn gtm_head(config: &SiteConfig) -> Markup {
    html! {
        @if let Some(id) = &config.gtm_id {
            script {
                (PreEscaped(format!(
                    "(function(w,d,s,l,i){{w[l]=w[l]||[];w[l].push({{'gtm.start':new Date().getTime(),event:'gtm.js'}});\
                     var f=d.getElementsByTagName(s)[0],j=d.createElement(s),dl=l!='dataLayer'?'&l='+l:'';\
                     j.async=true;j.src='https://www.googletagmanager.com/gtm.js?id='+i+dl;\
                     f.parentNode.insertBefore(j,f);}})(window,document,'script','dataLayer',{});",
                    escape_script_json(&Value::String(id.clone()).to_string())
                )))
            }
        }
    }
}

/// `<noscript>` fallback placed right after `<body>`.
pub fn gtm_body(config: &SiteConfig) -> Markup {
    html! {
        @if let Some(id) = &config.gtm_id {
            noscript {
                iframe src={ "https://www.googletagmanager.com/ns.html?id=" (id) }
                    height="0" width="0" style="display:none;visibility:hidden" {}
            }
        }
    }
}

/// Escape serialized JSON for embedding inside a `<script>` element.
pub fn escape_script_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

/// Embed a JSON-LD document.
pub fn json_ld(value: &Value) -> Markup {
    html! {
        script type="application/ld+json" {
            (PreEscaped(escape_script_json(&value.to_string())))
        }
    }
}

fn postal_address(address: &Address) -> Value {
    json!({
        "@type": "PostalAddress",
        "streetAddress": address.street,
        "addressLocality": address.city,
        "addressRegion": address.state,
        "postalCode": address.zip,
    })
}

fn insert_some(map: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    if let Some(value) = value {
        map.insert(key.to_string(), value);
    }
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

pub fn organization(config: &SiteConfig) -> Value {
    let mut ld = object(json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "Organization",
        "name": config.name,
        "url": config.absolute_url("/"),
        "description": config.description,
    }));
    insert_some(&mut ld, "logo", config.logo.as_deref().map(|l| json!(absolute(config, l))));
    insert_some(&mut ld, "telephone", config.phone.as_ref().map(|p| json!(p)));
    insert_some(&mut ld, "address", config.address.as_ref().map(postal_address));
    let same_as: Vec<&str> = config
        .social
        .as_ref()
        .map(|s| s.entries().into_iter().map(|(_, url)| url).collect())
        .unwrap_or_default();
    if !same_as.is_empty() {
        ld.insert("sameAs".to_string(), json!(same_as));
    }
    Value::Object(ld)
}

pub fn website(config: &SiteConfig) -> Value {
    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "WebSite",
        "name": config.name,
        "url": config.absolute_url("/"),
        "description": config.description,
    })
}

pub fn blog_posting(config: &SiteConfig, post: &Post, author: Option<&TeamMember>) -> Value {
    let url = config.absolute_url(&format!("/blog/{}/", post.id));
    let mut ld = object(json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "BlogPosting",
        "headline": post.title,
        "description": post.description,
        "datePublished": post.pub_date.to_rfc3339_opts(SecondsFormat::Secs, true),
        "url": url,
        "mainEntityOfPage": {"@type": "WebPage", "@id": url},
        "publisher": {
            "@type": "Organization",
            "name": config.name,
        },
    }));
    insert_some(
        &mut ld,
        "author",
        author.map(|a| {
            json!({
                "@type": "Person",
                "name": a.name,
                "url": config.absolute_url(&format!("/team/{}/", a.id)),
            })
        }),
    );
    insert_some(&mut ld, "image", post.image.as_deref().map(|i| json!(absolute(config, i))));
    let keywords: Vec<&str> = post.tags.iter().map(String::as_str).collect();
    if !keywords.is_empty() {
        ld.insert("keywords".to_string(), json!(keywords.join(", ")));
    }
    Value::Object(ld)
}

/// A service as a `ProfessionalService` offered by the business.
pub fn professional_service(config: &SiteConfig, service: &Service) -> Value {
    let mut provider = object(json!({
        "@type": "Organization",
        "name": config.name,
        "url": config.absolute_url("/"),
    }));
    insert_some(&mut provider, "telephone", config.phone.as_ref().map(|p| json!(p)));
    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "ProfessionalService",
        "name": service.title,
        "description": service.long_description,
        "url": config.absolute_url(&format!("/services/{}/", service.slug)),
        "provider": Value::Object(provider),
        "hasOfferCatalog": {
            "@type": "OfferCatalog",
            "name": service.title,
            "itemListElement": service.features.iter().map(|f| json!({
                "@type": "Offer",
                "itemOffered": {"@type": "Service", "name": f.title, "description": f.description},
            })).collect::<Vec<_>>(),
        },
    })
}

/// A location as a `LocalBusiness`. Phone and hours fall back to the
/// site-wide values.
pub fn local_business(config: &SiteConfig, location: &Location) -> Value {
    let mut ld = object(json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "LocalBusiness",
        "name": format!("{} - {}", config.name, location.display_name()),
        "description": location.description,
        "url": config.absolute_url(&format!("/locations/{}/", location.slug)),
        "address": {
            "@type": "PostalAddress",
            "streetAddress": location.address,
            "addressLocality": location.city,
            "addressRegion": location.state,
        },
        "areaServed": location.service_area_keywords,
    }));
    insert_some(
        &mut ld,
        "telephone",
        location
            .phone
            .as_ref()
            .or(config.phone.as_ref())
            .map(|p| json!(p)),
    );
    insert_some(
        &mut ld,
        "geo",
        location.coordinates.map(|c| {
            json!({"@type": "GeoCoordinates", "latitude": c.lat, "longitude": c.lng})
        }),
    );
    let hours = location
        .operating_hours
        .as_deref()
        .unwrap_or(&config.operating_hours);
    let opening_hours = hours::format_schema_org_hours(hours);
    if !opening_hours.is_empty() {
        ld.insert("openingHours".to_string(), json!(opening_hours));
    }
    insert_some(&mut ld, "image", config.logo.as_deref().map(|l| json!(absolute(config, l))));
    Value::Object(ld)
}

/// One step in a breadcrumb trail.
#[derive(Debug, Clone, PartialEq)]
pub struct Crumb {
    pub name: String,
    /// Site-relative path.
    pub path: String,
}

impl Crumb {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

pub fn breadcrumb_list(config: &SiteConfig, crumbs: &[Crumb]) -> Value {
    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "BreadcrumbList",
        "itemListElement": crumbs.iter().enumerate().map(|(i, crumb)| json!({
            "@type": "ListItem",
            "position": i + 1,
            "name": crumb.name,
            "item": config.absolute_url(&crumb.path),
        })).collect::<Vec<_>>(),
    })
}

pub fn faq_page(entries: &[FaqEntry]) -> Value {
    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "FAQPage",
        "mainEntity": entries.iter().map(|entry| json!({
            "@type": "Question",
            "name": entry.question,
            "acceptedAnswer": {"@type": "Answer", "text": entry.answer},
        })).collect::<Vec<_>>(),
    })
}
