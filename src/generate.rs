//! HTML site generation.
//!
//! Stage 3 of the build pipeline. Takes the processed manifest and renders
//! the final static site.
//!
//! ## Generated Pages
//!
//! - **Home** (`/`): hero, features, stats, testimonials, FAQ, contact
//! - **Services** (`/services/`, `/services/<slug>/`)
//! - **Locations** (`/locations/`, `/locations/<slug>/`)
//! - **Team** (`/team/`, `/team/<id>/`): bio plus the member's posts
//! - **Blog** (`/blog/`, `/blog/<n>/`, `/blog/<id>/`)
//! - **Archives** (`/blog/tags/<term>/`, `/blog/categories/<term>/`, each
//!   paginated as `.../<n>/`)
//! - **Feeds**: `rss.xml` and `sitemap.xml`
//!
//! ## Output Structure
//!
//! Every route is a directory with an `index.html`, so URLs end in `/`:
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── rss.xml
//! ├── sitemap.xml
//! ├── services/
//! │   ├── index.html
//! │   └── web-design/index.html
//! ├── blog/
//! │   ├── index.html
//! │   ├── 2/index.html
//! │   ├── hello-world/index.html
//! │   └── tags/seo/index.html
//! └── ...                        # plus everything in content/assets/
//! ```
//!
//! ## CSS
//!
//! One stylesheet (`static/style.css`) is inlined into every page. There is
//! no JavaScript.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Text interpolated into templates is escaped; only markdown output and
//! JSON-LD are inserted pre-escaped.

use crate::config::SiteConfig;
use crate::content::locations::Location;
use crate::content::pages::{ListingKey, TaxonomyKind};
use crate::content::services::Service;
use crate::feed;
use crate::hours;
use crate::icons;
use crate::naming;
use crate::process::{OutputManifest, ProcessedMember, ProcessedPost};
use crate::scan::ASSETS_DIR;
use crate::seo::{self, Crumb, PageMeta};
use chrono::{DateTime, Datelike, Utc};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

const CSS: &str = include_str!("../static/style.css");

/// One rendered HTML page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPage {
    /// Site-relative route ending in `/`.
    pub route: String,
    pub title: String,
}

/// What a generate run produced.
#[derive(Debug, Clone, Default)]
pub struct GenerateReport {
    pub pages: Vec<GeneratedPage>,
    pub feed_items: usize,
    pub sitemap_urls: usize,
    pub assets_copied: usize,
}

impl GenerateReport {
    pub fn routes(&self) -> Vec<String> {
        self.pages.iter().map(|p| p.route.clone()).collect()
    }
}

pub fn generate(
    manifest_path: &Path,
    source_root: &Path,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: OutputManifest = serde_json::from_str(&manifest_content)?;
    generate_site(&manifest, source_root, output_dir, Utc::now())
}

/// Render every page of `manifest` into `output_dir`.
///
/// `build_time` becomes the sitemap `lastmod` and the footer year.
pub fn generate_site(
    manifest: &OutputManifest,
    source_root: &Path,
    output_dir: &Path,
    build_time: DateTime<Utc>,
) -> Result<GenerateReport, GenerateError> {
    fs::create_dir_all(output_dir)?;

    let site = Site {
        manifest,
        config: &manifest.config,
        year: build_time.year(),
    };
    let mut report = GenerateReport::default();

    let assets = source_root.join(ASSETS_DIR);
    if assets.is_dir() {
        report.assets_copied = copy_dir_recursive(&assets, output_dir)?;
    }

    let mut pages = vec![site.render_home()];
    pages.extend(site.render_services());
    pages.extend(site.render_locations());
    pages.extend(site.render_team());
    pages.extend(site.render_blog());
    pages.extend(site.render_taxonomy(TaxonomyKind::Tags));
    pages.extend(site.render_taxonomy(TaxonomyKind::Categories));

    for page in pages {
        write_page(output_dir, &page.route, &page.markup)?;
        debug!(route = %page.route, "wrote page");
        report.pages.push(GeneratedPage {
            route: page.route,
            title: page.title,
        });
    }

    let items = feed::feed_items(
        site.config,
        manifest.posts.iter().map(|p| &p.post),
        manifest.team.iter().map(|m| &m.member),
    );
    report.feed_items = items.len();
    fs::write(output_dir.join("rss.xml"), feed::render_rss(site.config, &items))?;

    let routes = report.routes();
    report.sitemap_urls = routes.iter().filter(|r| !feed::is_paginated_route(r)).count();
    fs::write(
        output_dir.join("sitemap.xml"),
        feed::render_sitemap(site.config, &routes, build_time),
    )?;

    Ok(report)
}

/// Copy a directory tree, returning the number of files copied.
fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<usize> {
    let mut copied = 0;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copied += copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
            copied += 1;
        }
    }
    Ok(copied)
}

fn write_page(output_dir: &Path, route: &str, markup: &Markup) -> std::io::Result<()> {
    let dir = route
        .trim_matches('/')
        .split('/')
        .filter(|segment| !segment.is_empty())
        .fold(output_dir.to_path_buf(), |dir, segment| dir.join(segment));
    fs::create_dir_all(&dir)?;
    fs::write(dir.join("index.html"), &markup.0)
}

/// Number of pages needed for `count` items. An empty list still gets one.
pub fn page_count(count: usize, per_page: usize) -> usize {
    count.div_ceil(per_page.max(1)).max(1)
}

/// Route of page `n` (1-based) of a paginated listing rooted at `base`.
pub fn page_route(base: &str, n: usize) -> String {
    if n <= 1 {
        base.to_string()
    } else {
        format!("{base}{n}/")
    }
}

pub fn post_route(id: &str) -> String {
    format!("/blog/{id}/")
}

pub fn term_route(kind: TaxonomyKind, slug: &str) -> String {
    format!("/blog/{}/{slug}/", kind.segment())
}

// ============================================================================
// Site context
// ============================================================================

struct Page {
    route: String,
    title: String,
    markup: Markup,
}

struct Site<'a> {
    manifest: &'a OutputManifest,
    config: &'a SiteConfig,
    year: i32,
}

/// Posts under one taxonomy term, keyed by slug.
struct TermGroup<'a> {
    name: String,
    posts: Vec<&'a ProcessedPost>,
}

impl<'a> Site<'a> {
    fn author(&self, id: &str) -> Option<&'a ProcessedMember> {
        self.manifest.team.iter().find(|m| m.member.id == id)
    }

    fn post(&self, id: &str) -> Option<&'a ProcessedPost> {
        self.manifest.posts.iter().find(|p| p.post.id == id)
    }

    fn posts_per_page(&self) -> usize {
        self.config.blog.posts_per_page
    }

    /// Group posts by slugified term, keeping the first spelling seen as
    /// the display name.
    fn term_groups(&self, kind: TaxonomyKind) -> BTreeMap<String, TermGroup<'a>> {
        let mut groups: BTreeMap<String, TermGroup<'a>> = BTreeMap::new();
        for post in &self.manifest.posts {
            let terms = match kind {
                TaxonomyKind::Tags => &post.post.tags,
                TaxonomyKind::Categories => &post.post.categories,
            };
            for term in terms {
                let slug = naming::slugify(term);
                if slug.is_empty() {
                    warn!(post = %post.post.id, term = %term, "term has no usable characters, skipping");
                    continue;
                }
                let group = groups.entry(slug).or_insert_with(|| TermGroup {
                    name: term.clone(),
                    posts: Vec::new(),
                });
                if !group.posts.iter().any(|p| p.post.id == post.post.id) {
                    group.posts.push(post);
                }
            }
        }
        groups
    }

    // ------------------------------------------------------------------------
    // Page chrome
    // ------------------------------------------------------------------------

    fn document(&self, meta: &PageMeta, ld: &[Value], current: &str, content: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    (seo::meta_tags(self.config, meta))
                    link rel="alternate" type="application/rss+xml"
                        title={ (self.config.name) " RSS" } href="/rss.xml";
                    style { (PreEscaped(CSS)) }
                    @for value in ld {
                        (seo::json_ld(value))
                    }
                    (seo::gtm_head(self.config))
                }
                body {
                    (seo::gtm_body(self.config))
                    (self.site_header(current))
                    main { (content) }
                    (self.site_footer())
                }
            }
        }
    }

    fn nav_links(&self) -> Vec<(&'static str, &'static str)> {
        let mut links = Vec::new();
        if !self.manifest.services.is_empty() {
            links.push(("Services", "/services/"));
        }
        if !self.manifest.locations.is_empty() {
            links.push(("Locations", "/locations/"));
        }
        if !self.manifest.team.is_empty() {
            links.push(("Team", "/team/"));
        }
        links.push(("Blog", "/blog/"));
        links
    }

    fn site_header(&self, current: &str) -> Markup {
        html! {
            header.site-header {
                a.brand href="/" {
                    @if let Some(logo) = &self.config.logo {
                        img.logo src=(logo) alt=(self.config.name);
                    }
                    span.brand-name { (self.config.name) }
                }
                nav.site-nav {
                    ul {
                        @for (label, href) in self.nav_links() {
                            li class=[current.starts_with(href).then_some("current")] {
                                a href=(href) { (label) }
                            }
                        }
                    }
                }
                @if let Some(phone) = &self.config.phone {
                    a.header-phone href={ "tel:" (tel_digits(phone)) } { (phone) }
                }
            }
        }
    }

    fn site_footer(&self) -> Markup {
        let social = self
            .config
            .social
            .as_ref()
            .map(|s| s.entries())
            .unwrap_or_default();
        html! {
            footer.site-footer {
                div.footer-about {
                    strong { (self.config.name) }
                    @if let Some(tagline) = &self.config.tagline {
                        p { (tagline) }
                    }
                }
                (self.contact_block())
                @if !social.is_empty() {
                    ul.social-links {
                        @for (platform, url) in &social {
                            li { a href=(url) rel="noopener" { (platform) } }
                        }
                    }
                }
                @if !self.config.footer_nav.is_empty() {
                    nav.footer-nav {
                        @for item in &self.config.footer_nav {
                            a href=(item.link) { (item.text) }
                        }
                    }
                }
                p.copyright { "© " (self.year) " " (self.config.name) }
            }
        }
    }

    fn contact_block(&self) -> Markup {
        let hours = hours::format_display_hours(&self.config.operating_hours);
        html! {
            div.contact {
                @if let Some(phone) = &self.config.phone {
                    p.phone { a href={ "tel:" (tel_digits(phone)) } { (phone) } }
                }
                @if let Some(address) = &self.config.address {
                    address {
                        (address.street) br;
                        (address.city) ", " (address.state) " " (address.zip)
                    }
                }
                @if !hours.is_empty() {
                    ul.hours {
                        @for line in &hours {
                            li { (line) }
                        }
                    }
                }
            }
        }
    }

    fn breadcrumbs(&self, crumbs: &[Crumb]) -> Markup {
        html! {
            nav.breadcrumb aria-label="Breadcrumb" {
                ol {
                    @for (i, crumb) in crumbs.iter().enumerate() {
                        li {
                            @if i + 1 == crumbs.len() {
                                span aria-current="page" { (crumb.name) }
                            } @else {
                                a href=(crumb.path) { (crumb.name) }
                            }
                        }
                    }
                }
            }
        }
    }

    fn post_card(&self, post: &ProcessedPost) -> Markup {
        let author = self.author(&post.post.author);
        html! {
            article.post-card {
                h3 { a href=(post_route(&post.post.id)) { (post.post.title) } }
                p.post-meta {
                    time datetime=(post.post.pub_date.format("%Y-%m-%d").to_string()) {
                        (post.post.pub_date.format("%B %-d, %Y").to_string())
                    }
                    " · " (post.reading_minutes) " min read"
                    @if let Some(author) = author {
                        " · " (author.member.name)
                    }
                    @if post.post.draft {
                        " " span.badge { "Draft" }
                    }
                }
                p { (post.post.description) }
            }
        }
    }

    fn pagination(&self, base: &str, current: usize, total: usize) -> Markup {
        html! {
            @if total > 1 {
                nav.pagination aria-label="Pagination" {
                    @if current > 1 {
                        a rel="prev" href=(page_route(base, current - 1)) { "← Newer" }
                    }
                    span { "Page " (current) " of " (total) }
                    @if current < total {
                        a rel="next" href=(page_route(base, current + 1)) { "Older →" }
                    }
                }
            }
        }
    }

    /// Split `posts` into listing pages under `base`.
    fn paginated(
        &self,
        base: &str,
        title: &str,
        description: &str,
        crumbs: &[Crumb],
        posts: &[&ProcessedPost],
    ) -> Vec<Page> {
        let per_page = self.posts_per_page().max(1);
        let total = page_count(posts.len(), per_page);
        (1..=total)
            .map(|n| {
                let route = page_route(base, n);
                let chunk = posts.iter().skip((n - 1) * per_page).take(per_page);
                let page_title = if n == 1 {
                    title.to_string()
                } else {
                    format!("{title} (page {n})")
                };
                let meta = PageMeta::new(&page_title, &route).description(description);
                let ld = [seo::breadcrumb_list(self.config, crumbs)];
                let content = html! {
                    (self.breadcrumbs(crumbs))
                    h1 { (title) }
                    p.lead { (description) }
                    @if posts.is_empty() {
                        p.empty { "No posts yet." }
                    }
                    div.post-list {
                        @for post in chunk {
                            (self.post_card(post))
                        }
                    }
                    (self.pagination(base, n, total))
                };
                Page {
                    markup: self.document(&meta, &ld, base, content),
                    title: page_title.clone(),
                    route,
                }
            })
            .collect()
    }

    // ------------------------------------------------------------------------
    // Page renderers
    // ------------------------------------------------------------------------

    fn render_home(&self) -> Page {
        let home = &self.manifest.homepage;
        let mut ld = vec![seo::organization(self.config), seo::website(self.config)];
        if !home.faq.is_empty() {
            ld.push(seo::faq_page(&home.faq));
        }
        let home_title = self.config.tagline.as_deref().unwrap_or(&self.config.name);
        let meta = PageMeta::new(home_title, "/").description(&self.config.description);
        let featured_services = self.manifest.services.iter().take(3);
        let latest_posts = self.manifest.posts.iter().take(3);

        let content = html! {
            section.hero {
                h1 { (home.hero.headline) }
                p.lead { (home.hero.subheadline) }
                a.button href=(home.hero.cta.link) { (home.hero.cta.text) }
            }
            @if !home.features.is_empty() {
                section.features {
                    @for feature in &home.features {
                        div.feature {
                            (icons::icon_or_placeholder(&feature.icon))
                            h3 { (feature.title) }
                            p { (feature.description) }
                        }
                    }
                }
            }
            @if !self.manifest.services.is_empty() {
                section.services-preview {
                    h2 { (self.manifest.pages.listing_meta(ListingKey::Services).title) }
                    div.card-grid {
                        @for service in featured_services {
                            (service_card(service))
                        }
                    }
                    a href="/services/" { "All services " (icons::icon_or_placeholder("arrowRight")) }
                }
            }
            @if !home.stats.is_empty() {
                section.stats {
                    @for stat in &home.stats {
                        div.stat {
                            span.stat-value { (stat.value) }
                            span.stat-label { (stat.label) }
                        }
                    }
                }
            }
            @if !home.testimonials.is_empty() {
                section.testimonials {
                    @for t in &home.testimonials {
                        figure.testimonial {
                            blockquote { (t.quote) }
                            figcaption {
                                (t.name)
                                @if let Some(attribution) = &t.attribution {
                                    ", " cite { (attribution) }
                                }
                            }
                        }
                    }
                }
            }
            @if !self.manifest.posts.is_empty() {
                section.latest-posts {
                    h2 { "Latest from the blog" }
                    @for post in latest_posts {
                        (self.post_card(post))
                    }
                }
            }
            @if !home.faq.is_empty() {
                section.faq {
                    h2 { "Frequently asked questions" }
                    @for entry in &home.faq {
                        details {
                            summary { (entry.question) }
                            p { (entry.answer) }
                        }
                    }
                }
            }
            section.closing-cta {
                h2 { (home.cta.headline) }
                a.button href=(home.cta.button.link) { (home.cta.button.text) }
            }
            @if home.show_contact {
                section.contact-section {
                    h2 { "Contact us" }
                    (self.contact_block())
                }
            }
        };

        Page {
            route: "/".to_string(),
            title: self.config.name.clone(),
            markup: self.document(&meta, &ld, "/", content),
        }
    }

    fn render_services(&self) -> Vec<Page> {
        if self.manifest.services.is_empty() {
            return Vec::new();
        }
        let listing = self.manifest.pages.listing_meta(ListingKey::Services);
        let crumbs = [Crumb::new("Home", "/"), Crumb::new(&listing.title, "/services/")];
        let meta = PageMeta::new(&listing.title, "/services/").description(&listing.description);
        let content = html! {
            (self.breadcrumbs(&crumbs))
            h1 { (listing.title) }
            p.lead { (listing.description) }
            div.card-grid {
                @for service in &self.manifest.services {
                    (service_card(service))
                }
            }
        };
        let mut pages = vec![Page {
            route: "/services/".to_string(),
            title: listing.title.clone(),
            markup: self.document(
                &meta,
                &[seo::breadcrumb_list(self.config, &crumbs)],
                "/services/",
                content,
            ),
        }];

        for service in &self.manifest.services {
            let route = format!("/services/{}/", service.slug);
            let crumbs = [
                Crumb::new("Home", "/"),
                Crumb::new(&listing.title, "/services/"),
                Crumb::new(&service.title, &route),
            ];
            let meta = PageMeta::new(&service.title, &route).description(&service.description);
            let ld = [
                seo::professional_service(self.config, service),
                seo::breadcrumb_list(self.config, &crumbs),
            ];
            let content = html! {
                (self.breadcrumbs(&crumbs))
                article.service {
                    header {
                        (icons::icon_or_placeholder(&service.icon))
                        h1 { (service.title) }
                        p.lead { (service.description) }
                    }
                    p { (service.long_description) }
                    ul.feature-list {
                        @for feature in &service.features {
                            li {
                                (icons::icon_or_placeholder("check"))
                                strong { (feature.title) }
                                " " (feature.description)
                            }
                        }
                    }
                    a.button href=(service.cta.link) { (service.cta.text) }
                }
            };
            pages.push(Page {
                markup: self.document(&meta, &ld, "/services/", content),
                title: service.title.clone(),
                route,
            });
        }
        pages
    }

    fn render_locations(&self) -> Vec<Page> {
        if self.manifest.locations.is_empty() {
            return Vec::new();
        }
        let listing = self.manifest.pages.listing_meta(ListingKey::Locations);
        let crumbs = [Crumb::new("Home", "/"), Crumb::new(&listing.title, "/locations/")];
        let meta = PageMeta::new(&listing.title, "/locations/").description(&listing.description);
        let content = html! {
            (self.breadcrumbs(&crumbs))
            h1 { (listing.title) }
            p.lead { (listing.description) }
            div.card-grid {
                @for location in &self.manifest.locations {
                    (location_card(location))
                }
            }
        };
        let mut pages = vec![Page {
            route: "/locations/".to_string(),
            title: listing.title.clone(),
            markup: self.document(
                &meta,
                &[seo::breadcrumb_list(self.config, &crumbs)],
                "/locations/",
                content,
            ),
        }];

        for location in &self.manifest.locations {
            let route = format!("/locations/{}/", location.slug);
            let name = location.display_name();
            let crumbs = [
                Crumb::new("Home", "/"),
                Crumb::new(&listing.title, "/locations/"),
                Crumb::new(&name, &route),
            ];
            let meta = PageMeta::new(&name, &route).description(&location.description);
            let ld = [
                seo::local_business(self.config, location),
                seo::breadcrumb_list(self.config, &crumbs),
            ];
            let phone = location.phone.as_ref().or(self.config.phone.as_ref());
            let hours = hours::format_display_hours(
                location
                    .operating_hours
                    .as_deref()
                    .unwrap_or(&self.config.operating_hours),
            );
            let content = html! {
                (self.breadcrumbs(&crumbs))
                article.location {
                    h1 { (name) }
                    p.lead { (location.description) }
                    address {
                        (icons::icon_or_placeholder("mapPin"))
                        (location.address)
                    }
                    @if let Some(phone) = phone {
                        p.phone {
                            (icons::icon_or_placeholder("phone"))
                            a href={ "tel:" (tel_digits(phone)) } { (phone) }
                        }
                    }
                    p { (location.long_description) }
                    @if !hours.is_empty() {
                        h2 { "Hours" }
                        ul.hours {
                            @for line in &hours {
                                li { (line) }
                            }
                        }
                    }
                    h2 { "Areas we serve" }
                    ul.keywords {
                        @for keyword in &location.service_area_keywords {
                            li { (keyword) }
                        }
                    }
                }
            };
            pages.push(Page {
                markup: self.document(&meta, &ld, "/locations/", content),
                title: name,
                route,
            });
        }
        pages
    }

    fn render_team(&self) -> Vec<Page> {
        if self.manifest.team.is_empty() {
            return Vec::new();
        }
        let listing = self.manifest.pages.listing_meta(ListingKey::Team);
        let crumbs = [Crumb::new("Home", "/"), Crumb::new(&listing.title, "/team/")];
        let meta = PageMeta::new(&listing.title, "/team/").description(&listing.description);
        let content = html! {
            (self.breadcrumbs(&crumbs))
            h1 { (listing.title) }
            p.lead { (listing.description) }
            div.card-grid {
                @for member in &self.manifest.team {
                    a.card.team-card href={ "/team/" (member.member.id) "/" } {
                        img.avatar src=(member.member.avatar) alt=(member.member.name) loading="lazy";
                        h3 { (member.member.name) }
                        p.role { (member.member.role) }
                    }
                }
            }
        };
        let mut pages = vec![Page {
            route: "/team/".to_string(),
            title: listing.title.clone(),
            markup: self.document(
                &meta,
                &[seo::breadcrumb_list(self.config, &crumbs)],
                "/team/",
                content,
            ),
        }];

        for member in &self.manifest.team {
            let m = &member.member;
            let route = format!("/team/{}/", m.id);
            let crumbs = [
                Crumb::new("Home", "/"),
                Crumb::new(&listing.title, "/team/"),
                Crumb::new(&m.name, &route),
            ];
            let meta = PageMeta::new(&m.name, &route).description(&m.bio);
            let posts: Vec<&ProcessedPost> = self
                .manifest
                .posts
                .iter()
                .filter(|p| p.post.author == m.id)
                .collect();
            let links = m.social.as_ref().map(|s| s.links()).unwrap_or_default();
            let content = html! {
                (self.breadcrumbs(&crumbs))
                article.team-member {
                    img.avatar src=(m.avatar) alt=(m.name);
                    h1 { (m.name) }
                    p.role { (m.role) }
                    p.lead { (m.bio) }
                    div.prose { (PreEscaped(&member.html)) }
                    @if !links.is_empty() {
                        ul.social-links {
                            @for (label, url) in &links {
                                li { a href=(url) rel="noopener" { (label) } }
                            }
                        }
                    }
                }
                @if !posts.is_empty() {
                    section.member-posts {
                        h2 { "Posts by " (m.name) }
                        @for post in &posts {
                            (self.post_card(post))
                        }
                    }
                }
            };
            pages.push(Page {
                markup: self.document(&meta, &[seo::breadcrumb_list(self.config, &crumbs)], "/team/", content),
                title: m.name.clone(),
                route,
            });
        }
        pages
    }

    fn render_blog(&self) -> Vec<Page> {
        let listing = self.manifest.pages.listing_meta(ListingKey::Blog);
        let crumbs = [Crumb::new("Home", "/"), Crumb::new(&listing.title, "/blog/")];
        let posts: Vec<&ProcessedPost> = self.manifest.posts.iter().collect();
        let mut pages = self.paginated("/blog/", &listing.title, &listing.description, &crumbs, &posts);

        for post in &self.manifest.posts {
            pages.push(self.render_post(post, &listing.title));
        }
        pages
    }

    fn render_post(&self, processed: &ProcessedPost, blog_title: &str) -> Page {
        let post = &processed.post;
        let route = post_route(&post.id);
        let author = self.author(&post.author);
        let crumbs = [
            Crumb::new("Home", "/"),
            Crumb::new(blog_title, "/blog/"),
            Crumb::new(&post.title, &route),
        ];
        let meta = PageMeta::new(&post.title, &route)
            .description(&post.description)
            .article(post.pub_date, post.image.as_deref());
        let ld = [
            seo::blog_posting(self.config, post, author.map(|a| &a.member)),
            seo::breadcrumb_list(self.config, &crumbs),
        ];
        let related: Vec<&ProcessedPost> =
            processed.related.iter().filter_map(|id| self.post(id)).collect();

        let content = html! {
            (self.breadcrumbs(&crumbs))
            article.post {
                header {
                    h1 { (post.title) }
                    p.post-meta {
                        time datetime=(post.pub_date.format("%Y-%m-%d").to_string()) {
                            (post.pub_date.format("%B %-d, %Y").to_string())
                        }
                        " · " (processed.reading_minutes) " min read"
                        @if let Some(author) = author {
                            " · "
                            a href={ "/team/" (author.member.id) "/" } { (author.member.name) }
                        }
                        @if post.draft {
                            " " span.badge { "Draft" }
                        }
                    }
                    @if let Some(image) = &post.image {
                        img.featured src=(image) alt=(post.title);
                    }
                }
                div.prose { (PreEscaped(&processed.html)) }
                footer {
                    (term_links(TaxonomyKind::Categories, "Categories", &post.categories))
                    (term_links(TaxonomyKind::Tags, "Tags", &post.tags))
                }
            }
            @if !related.is_empty() {
                section.related-posts {
                    h2 { "Related posts" }
                    @for r in &related {
                        (self.post_card(r))
                    }
                }
            }
        };

        Page {
            markup: self.document(&meta, &ld, "/blog/", content),
            title: post.title.clone(),
            route,
        }
    }

    fn render_taxonomy(&self, kind: TaxonomyKind) -> Vec<Page> {
        let blog_title = &self.manifest.pages.listing_meta(ListingKey::Blog).title;
        let mut pages = Vec::new();
        for (slug, group) in self.term_groups(kind) {
            let base = term_route(kind, &slug);
            let title = self.manifest.pages.taxonomy_title(kind, &group.name);
            let description = self.manifest.pages.taxonomy_description(kind, &group.name);
            let crumbs = [
                Crumb::new("Home", "/"),
                Crumb::new(blog_title, "/blog/"),
                Crumb::new(&title, &base),
            ];
            pages.extend(self.paginated(&base, &title, &description, &crumbs, &group.posts));
        }
        pages
    }
}

fn service_card(service: &Service) -> Markup {
    html! {
        a.card.service-card href={ "/services/" (service.slug) "/" } {
            (icons::icon_or_placeholder(&service.icon))
            h3 { (service.title) }
            p { (service.description) }
        }
    }
}

fn location_card(location: &Location) -> Markup {
    html! {
        a.card.location-card href={ "/locations/" (location.slug) "/" } {
            h3 { (location.display_name()) }
            p { (location.description) }
        }
    }
}

fn term_links(kind: TaxonomyKind, label: &str, terms: &[String]) -> Markup {
    html! {
        @if !terms.is_empty() {
            p class={ "terms terms-" (kind.segment()) } {
                (label) ": "
                @for (i, term) in terms.iter().enumerate() {
                    @let slug = naming::slugify(term);
                    @if i > 0 { ", " }
                    @if slug.is_empty() {
                        (term)
                    } @else {
                        a href=(term_route(kind, &slug)) { (term) }
                    }
                }
            }
        }
    }
}

/// Keep `+` and digits for `tel:` links.
fn tel_digits(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::process_manifest;
    use crate::scan;
    use crate::test_helpers::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn build_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    fn processed(source: &Path) -> OutputManifest {
        process_manifest(scan::scan(source).unwrap(), false, None)
    }

    fn build() -> (TempDir, TempDir, GenerateReport) {
        let source = setup_fixtures();
        let out = TempDir::new().unwrap();
        let manifest = processed(source.path());
        let report = generate_site(&manifest, source.path(), out.path(), build_time()).unwrap();
        (source, out, report)
    }

    fn read(out: &TempDir, route: &str) -> String {
        let path = out.path().join(route.trim_matches('/')).join("index.html");
        fs::read_to_string(&path).unwrap_or_else(|e| panic!("{}: {e}", path.display()))
    }

    #[test]
    fn page_count_rounds_up_with_floor_of_one() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(5, 0), 5);
    }

    #[test]
    fn page_routes() {
        assert_eq!(page_route("/blog/", 1), "/blog/");
        assert_eq!(page_route("/blog/", 2), "/blog/2/");
        assert_eq!(page_route("/blog/tags/seo/", 3), "/blog/tags/seo/3/");
    }

    #[test]
    fn writes_index_files_for_routes() {
        let (_source, out, report) = build();
        assert!(out.path().join("index.html").exists());
        assert!(out.path().join("services/index.html").exists());
        assert!(out.path().join("blog/2024/launch-day/index.html").exists());
        assert!(report.pages.iter().any(|p| p.route == "/"));
    }

    #[test]
    fn home_has_org_and_faq_json_ld() {
        let (_source, out, _) = build();
        let html = read(&out, "/");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#""@type":"Organization""#));
        assert!(html.contains(r#""@type":"FAQPage""#));
        assert!(html.contains("<title>Acme Services</title>") || html.contains("| Acme Services</title>"));
    }

    #[test]
    fn every_service_and_location_has_a_page() {
        let source = setup_fixtures();
        let manifest = processed(source.path());
        let out = TempDir::new().unwrap();
        let report = generate_site(&manifest, source.path(), out.path(), build_time()).unwrap();
        let routes = report.routes();
        for service in &manifest.services {
            assert!(routes.contains(&format!("/services/{}/", service.slug)));
        }
        for location in &manifest.locations {
            let html = read(&out, &format!("/locations/{}/", location.slug));
            assert!(html.contains(r#""@type":"LocalBusiness""#));
        }
    }

    #[test]
    fn drafts_not_rendered() {
        let (_source, out, report) = build();
        assert!(!report.routes().contains(&"/blog/work-in-progress/".to_string()));
        assert!(!out.path().join("blog/work-in-progress").exists());
        let rss = fs::read_to_string(out.path().join("rss.xml")).unwrap();
        assert!(!rss.contains("work-in-progress"));
    }

    #[test]
    fn post_page_shows_reading_time_and_author() {
        let (_source, out, _) = build();
        let html = read(&out, "/blog/hello-world/");
        assert!(html.contains("min read"));
        assert!(html.contains(r#"href="/team/jane-doe/""#));
        assert!(html.contains(r#""@type":"BlogPosting""#));
        assert!(html.contains(r#"<meta property="og:type" content="article">"#));
    }

    #[test]
    fn taxonomy_archives_use_templates() {
        let (_source, out, report) = build();
        assert!(report.routes().contains(&"/blog/tags/seo/".to_string()));
        let html = read(&out, "/blog/tags/seo/");
        assert!(html.contains("Posts tagged seo") || html.contains("Posts tagged SEO"));
    }

    #[test]
    fn blog_paginates_by_posts_per_page() {
        let source = setup_fixtures();
        let mut manifest = processed(source.path());
        manifest.config.blog.posts_per_page = 1;
        let out = TempDir::new().unwrap();
        let report = generate_site(&manifest, source.path(), out.path(), build_time()).unwrap();

        let total = manifest.posts.len();
        assert!(total >= 2);
        let routes = report.routes();
        assert!(routes.contains(&format!("/blog/{total}/")));
        assert!(!routes.contains(&format!("/blog/{}/", total + 1)));
        assert!(read(&out, "/blog/2/").contains(r#"rel="prev""#));
    }

    #[test]
    fn sitemap_excludes_pagination() {
        let source = setup_fixtures();
        let mut manifest = processed(source.path());
        manifest.config.blog.posts_per_page = 1;
        let out = TempDir::new().unwrap();
        let report = generate_site(&manifest, source.path(), out.path(), build_time()).unwrap();

        let sitemap = fs::read_to_string(out.path().join("sitemap.xml")).unwrap();
        assert!(!sitemap.contains("/blog/2/</loc>"));
        assert!(sitemap.contains("/blog/</loc>"));
        assert_eq!(sitemap.matches("<url>").count(), report.sitemap_urls);
        assert!(sitemap.contains("<lastmod>2025-03-01T12:00:00Z</lastmod>"));
    }

    #[test]
    fn assets_copied_to_output_root() {
        let (_source, out, report) = build();
        assert!(report.assets_copied >= 1);
        assert!(out.path().join("robots.txt").exists());
    }

    #[test]
    fn footer_year_from_build_time() {
        let (_source, out, _) = build();
        assert!(read(&out, "/").contains("© 2025 Acme Services"));
    }

    #[test]
    fn html_escapes_content() {
        let source = setup_fixtures();
        let mut manifest = processed(source.path());
        manifest.homepage.hero.headline = "<script>alert(1)</script>".to_string();
        let out = TempDir::new().unwrap();
        generate_site(&manifest, source.path(), out.path(), build_time()).unwrap();
        let html = read(&out, "/");
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn term_with_no_slug_is_skipped() {
        let source = setup_fixtures();
        let mut manifest = processed(source.path());
        manifest.posts[0].post.tags.push("!!!".to_string());
        let out = TempDir::new().unwrap();
        let report = generate_site(&manifest, source.path(), out.path(), build_time()).unwrap();
        assert!(!report.routes().iter().any(|r| r.starts_with("/blog/tags//")));
    }

    #[test]
    fn tel_digits_strips_formatting() {
        assert_eq!(tel_digits("(555) 123-4567"), "5551234567");
        assert_eq!(tel_digits("+1 555 123"), "+1555123");
    }
}
