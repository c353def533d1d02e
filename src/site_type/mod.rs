//! Site-type detection and the per-type schema enhancers.
//!
//! Enhancers run on the serialized schema record and may add keys such as
//! `metadata.cms`. Dispatch is a lookup in a static table.

mod wordpress;

use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::LazyLock;
use url::Url;

use crate::page::PageView;

const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteType {
    WordPress,
    Shopify,
    Wix,
    Squarespace,
    Webflow,
    Joomla,
    Drupal,
    Tailwind,
    Bootstrap,
    React,
    Vue,
    Angular,
    Material,
    Ecommerce,
    Blog,
    Government,
    Education,
    Organization,
    General,
}

impl SiteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteType::WordPress => "wordpress",
            SiteType::Shopify => "shopify",
            SiteType::Wix => "wix",
            SiteType::Squarespace => "squarespace",
            SiteType::Webflow => "webflow",
            SiteType::Joomla => "joomla",
            SiteType::Drupal => "drupal",
            SiteType::Tailwind => "tailwind",
            SiteType::Bootstrap => "bootstrap",
            SiteType::React => "react",
            SiteType::Vue => "vue",
            SiteType::Angular => "angular",
            SiteType::Material => "material",
            SiteType::Ecommerce => "ecommerce",
            SiteType::Blog => "blog",
            SiteType::Government => "government",
            SiteType::Education => "education",
            SiteType::Organization => "organization",
            SiteType::General => "general",
        }
    }
}

/// Markup signatures, CMS before frameworks before generic vocabularies.
const MARKUP_SIGNATURES: &[(SiteType, &str)] = &[
    (SiteType::WordPress, r"wp-content|wordpress|wp-includes"),
    (SiteType::Shopify, r"cdn\.shopify\.com|myshopify\.com"),
    (SiteType::Wix, r"wix\.com|wixstatic\.com|wixsite\.com"),
    (SiteType::Squarespace, r"squarespace\.com"),
    (SiteType::Webflow, r"webflow\.io|webflow\.com"),
    (SiteType::Joomla, r"joomla|com_content"),
    (SiteType::Drupal, r"drupal\.js|sites/default/files"),
    (
        SiteType::Tailwind,
        r#"tailwindcss|tailwind\.css|class="[^"]*(?:flex|grid|p-|m-|text-|bg-)"#,
    ),
    (
        SiteType::Bootstrap,
        r#"bootstrap\.min\.css|bootstrap\.bundle\.min\.js|class="[^"]*(?:container|row|col-)"#,
    ),
    (SiteType::React, r"react-root|data-reactid"),
    (SiteType::Vue, r"data-v-"),
    (SiteType::Angular, r"ng-version"),
    (SiteType::Material, r"material-design|mdl-|mui-"),
    (
        SiteType::Ecommerce,
        r"cart|checkout|product|shop|store|price|add to cart|woocommerce",
    ),
    (
        SiteType::Blog,
        r"blog|article|post|author|comment|category|archive",
    ),
];

/// Host fragments checked when the markup gave no answer.
const HOST_HINTS: &[(SiteType, &str)] = &[
    (SiteType::Government, ".gov"),
    (SiteType::Education, ".edu"),
    (SiteType::Organization, ".org"),
];

static SIGNATURES: LazyLock<Vec<(SiteType, Regex)>> = LazyLock::new(|| {
    MARKUP_SIGNATURES
        .iter()
        .map(|(site, pattern)| {
            let regex = Regex::new(&format!("(?i){pattern}")).expect("valid site signature");
            (*site, regex)
        })
        .collect()
});

/// Classify a page by its markup, falling back to URL hints.
pub fn detect_site_type(markup: &str, url: &str) -> SiteType {
    if let Some((site, _)) = SIGNATURES.iter().find(|(_, regex)| regex.is_match(markup)) {
        return *site;
    }

    let host = Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_ascii_lowercase));
    if let Some(host) = host {
        if let Some((site, _)) = HOST_HINTS.iter().find(|(_, hint)| host.contains(hint)) {
            return *site;
        }
    }

    SiteType::General
}

/// Adds site-specific keys to a schema record.
pub type Enhancer = fn(&mut Value, &str, &dyn PageView) -> Result<()>;

const ENHANCERS: &[(SiteType, &str, Enhancer)] = &[(
    SiteType::WordPress,
    "wordpress_enhancer",
    wordpress::enhance,
)];

pub fn enhancer_for(site: SiteType) -> Option<(&'static str, Enhancer)> {
    ENHANCERS
        .iter()
        .find(|(registered, _, _)| *registered == site)
        .map(|(_, name, enhancer)| (*name, *enhancer))
}

/// Run the enhancer registered for `site`, if any. A failing enhancer leaves
/// the record as it was and is only logged.
pub fn enhance_record(
    site: SiteType,
    record: &mut Value,
    markup: &str,
    page: &dyn PageView,
) -> Option<&'static str> {
    let (name, enhancer) = enhancer_for(site)?;

    let mut enhanced = record.clone();
    match enhancer(&mut enhanced, markup, page) {
        Ok(()) => {
            *record = enhanced;
            log_info!("applied {name} for {} site", site.as_str());
            Some(name)
        }
        Err(err) => {
            log_warn!("{name} failed, keeping unenhanced schema: {err:#}");
            None
        }
    }
}
