use crate::analysis::config::{UTILITY_MIN_OCCURRENCES, UTILITY_PATTERN_LIMIT};
use crate::analysis::frequency::FrequencyTable;
use crate::analysis::patterns::{class_tokens, is_utility_class};
use crate::models::{ComponentCategory, ComponentProfile, StyleMap};
use crate::page::{ElementId, Metric, PageView};
use crate::utils::css::normalize_color;

/// How one fingerprint property is read.
#[derive(Debug, Clone, Copy)]
enum Probe {
    /// Computed style, kept verbatim.
    Style(&'static str),
    /// Computed style, normalized to hex when it parses as a color.
    Color(&'static str),
    /// Rendered height, rounded to whole pixels.
    Height,
}

struct CategorySpec {
    selectors: &'static [&'static str],
    properties: &'static [(&'static str, Probe)],
}

const BUTTONS: CategorySpec = CategorySpec {
    selectors: &[
        "button",
        ".button",
        ".btn",
        "[class*='button']",
        "[class*='btn']",
        "input[type='button']",
        "input[type='submit']",
        "a[role='button']",
    ],
    properties: &[
        ("background_color", Probe::Color("background-color")),
        ("text_color", Probe::Color("color")),
        ("padding", Probe::Style("padding")),
        ("border", Probe::Style("border")),
        ("border_radius", Probe::Style("border-radius")),
        ("font_size", Probe::Style("font-size")),
        ("font_weight", Probe::Style("font-weight")),
        ("text_transform", Probe::Style("text-transform")),
    ],
};

const CARDS: CategorySpec = CategorySpec {
    selectors: &[
        ".card",
        "[class*='card']",
        "article",
        ".panel",
        "[class*='panel']",
        ".box",
        "[class*='box']",
        ".widget",
        "[class*='widget']",
    ],
    properties: &[
        ("background_color", Probe::Color("background-color")),
        ("box_shadow", Probe::Style("box-shadow")),
        ("border_radius", Probe::Style("border-radius")),
        ("padding", Probe::Style("padding")),
        ("border", Probe::Style("border")),
    ],
};

const INPUTS: CategorySpec = CategorySpec {
    selectors: &[
        "input[type='text']",
        "input[type='email']",
        "input[type='password']",
        "input[type='search']",
        "textarea",
        "select",
    ],
    properties: &[
        ("border", Probe::Style("border")),
        ("border_radius", Probe::Style("border-radius")),
        ("padding", Probe::Style("padding")),
        ("background_color", Probe::Color("background-color")),
        ("font_size", Probe::Style("font-size")),
    ],
};

const NAVIGATION: CategorySpec = CategorySpec {
    selectors: &[
        "nav",
        "header",
        ".navigation",
        ".navbar",
        "#navbar",
        "#main-nav",
        ".main-navigation",
        ".header",
        "#header",
    ],
    properties: &[
        ("background_color", Probe::Color("background-color")),
        ("height", Probe::Height),
        ("box_shadow", Probe::Style("box-shadow")),
    ],
};

fn spec_for(category: ComponentCategory) -> &'static CategorySpec {
    match category {
        ComponentCategory::Buttons => &BUTTONS,
        ComponentCategory::Cards => &CARDS,
        ComponentCategory::Inputs => &INPUTS,
        ComponentCategory::Navigation => &NAVIGATION,
    }
}

/// Fingerprint every component category and rank utility classes.
pub fn fingerprint_components(page: &dyn PageView, markup: &str) -> ComponentProfile {
    ComponentProfile {
        buttons: fingerprint(page, ComponentCategory::Buttons),
        cards: fingerprint(page, ComponentCategory::Cards),
        inputs: fingerprint(page, ComponentCategory::Inputs),
        navigation: fingerprint(page, ComponentCategory::Navigation),
        utility_patterns: utility_patterns(markup),
    }
}

/// Properties of the first element matched by the category's selectors.
/// Empty when nothing matches.
pub fn fingerprint(page: &dyn PageView, category: ComponentCategory) -> StyleMap {
    let spec = spec_for(category);
    let Some(element) = spec
        .selectors
        .iter()
        .find_map(|selector| page.first(selector))
    else {
        return StyleMap::new();
    };

    spec.properties
        .iter()
        .filter_map(|(name, probe)| {
            read_probe(page, element, *probe).map(|value| (name.to_string(), value))
        })
        .collect()
}

fn read_probe(page: &dyn PageView, element: ElementId, probe: Probe) -> Option<String> {
    match probe {
        Probe::Style(property) => page.computed_style(element, property).ok(),
        Probe::Color(property) => page
            .computed_style(element, property)
            .ok()
            .map(|value| normalize_color(&value).unwrap_or(value)),
        Probe::Height => page
            .measure(element, Metric::BoundingHeight)
            .ok()
            .map(|height| format!("{height:.0}px")),
    }
}

/// Frequent utility-style class names, most frequent first.
pub fn utility_patterns(markup: &str) -> Vec<String> {
    class_tokens(markup)
        .into_iter()
        .collect::<FrequencyTable<String>>()
        .ranked()
        .into_iter()
        .filter(|(token, count)| *count > UTILITY_MIN_OCCURRENCES && is_utility_class(token))
        .take(UTILITY_PATTERN_LIMIT)
        .map(|(token, _)| token)
        .collect()
}
