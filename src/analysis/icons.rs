use indexmap::IndexSet;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

use crate::analysis::patterns::{class_tokens, has_inline_svg, icon_font_signature, is_icon_class};
use crate::models::{IconProfile, StyleMap};
use crate::page::{ElementId, Metric, PageView};
use crate::utils::css::is_none_value;

const ENABLE_LOGS: bool = false;

use crate::log_debug;

/// Logo candidates; image elements before background-image holders.
const LOGO_SELECTORS: &[&str] = &[
    "header img[alt*='logo' i]",
    "nav img[alt*='logo' i]",
    "img[src*='logo']",
    "header a[href='/'] img",
    "nav a[href='/'] img",
    ".logo",
    "#logo",
    "[class*='logo']",
    "[id*='logo']",
    "[aria-label*='logo' i]",
];

/// Images at or below this size in either dimension are treated as icons.
const MIN_STYLED_IMAGE_PX: f64 = 20.0;

const IMAGE_STYLE_PROPERTIES: &[(&str, &str)] = &[
    ("border_radius", "border-radius"),
    ("box_shadow", "box-shadow"),
    ("border", "border"),
    ("filter", "filter"),
];

static CSS_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"url\(\s*["']?([^"')]+)["']?\s*\)"#).expect("valid css url regex")
});

/// Icon technology, image styling and logo location.
pub fn classify_icons(page: &dyn PageView, markup: &str, source_url: &str) -> IconProfile {
    let tokens = class_tokens(markup);
    let signature = icon_font_signature(&tokens);

    let icon_classes = if signature.is_some() {
        tokens
            .into_iter()
            .filter(|token| is_icon_class(token))
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    } else {
        Vec::new()
    };

    let logo = find_logo(page);
    if let Some(element) = logo {
        log_debug!("logo candidate: element {}", element.0);
    }

    IconProfile {
        has_svg_icons: has_inline_svg(markup),
        has_icon_font: signature.is_some(),
        icon_classes,
        image_style: image_style(page),
        logo_detected: logo.is_some(),
        logo_url: logo
            .and_then(|element| logo_url(page, element))
            .map(|url| resolve_url(source_url, &url)),
    }
}

fn find_logo(page: &dyn PageView) -> Option<ElementId> {
    LOGO_SELECTORS
        .iter()
        .find_map(|selector| page.first(selector))
}

fn logo_url(page: &dyn PageView, element: ElementId) -> Option<String> {
    if page.tag_name(element).as_deref() == Some("img") {
        return page
            .attribute(element, "src")
            .filter(|src| !src.trim().is_empty());
    }

    let background = page.computed_style(element, "background-image").ok()?;
    if is_none_value(&background) {
        return None;
    }
    CSS_URL
        .captures(&background)
        .map(|caps| caps[1].trim().to_string())
}

/// Absolute form of `candidate` when the page URL is absolute.
fn resolve_url(source_url: &str, candidate: &str) -> String {
    if Url::parse(candidate).is_ok() {
        return candidate.to_string();
    }
    Url::parse(source_url)
        .and_then(|base| base.join(candidate))
        .map(String::from)
        .unwrap_or_else(|_| candidate.to_string())
}

fn image_style(page: &dyn PageView) -> StyleMap {
    let large_enough = |element: ElementId| {
        [Metric::ClientWidth, Metric::ClientHeight]
            .into_iter()
            .all(|metric| matches!(page.measure(element, metric), Ok(px) if px > MIN_STYLED_IMAGE_PX))
    };

    let Some(image) = page.query("img").into_iter().find(|el| large_enough(*el)) else {
        return StyleMap::new();
    };

    IMAGE_STYLE_PROPERTIES
        .iter()
        .filter_map(|(name, property)| {
            page.computed_style(image, property)
                .ok()
                .map(|value| (name.to_string(), value))
        })
        .collect()
}
