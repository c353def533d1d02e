//! Property tests for palette bounds, spacing ranking and style tag order.

use chrono::{TimeZone, Utc};
use design_extractor_lib::analysis::colors::canonical_palette;
use design_extractor_lib::analysis::layout::rank_spacing;
use design_extractor_lib::models::{ColorSource, RawColorSample, SignalSet};
use design_extractor_lib::page::SnapshotPage;
use design_extractor_lib::{extract, ExtractorConfig};
use proptest::prelude::*;
use std::collections::HashSet;

/// Tags in the order the classifier may emit them.
const TAG_ORDER: [&str; 12] = [
    "high-contrast",
    "monochromatic",
    "rounded",
    "sharp-edges",
    "shadowed",
    "flat",
    "serif",
    "sans-serif",
    "grid-based",
    "modern-icons",
    "material-inspired",
    "minimalist",
];

// ============================================================================
// Generators
// ============================================================================

/// Color strings as renderers report them, malformed ones included.
fn arb_color() -> impl Strategy<Value = String> {
    prop_oneof![
        "#[0-9a-f]{6}".prop_map(|s| s),
        "#[0-9a-f]{3}".prop_map(|s| s),
        (0u8..=255, 0u8..=255, 0u8..=255)
            .prop_map(|(r, g, b)| format!("rgb({r}, {g}, {b})")),
        Just("transparent".to_string()),
        Just("rgba(0, 0, 0, 0)".to_string()),
        "[a-z]{0,8}".prop_map(|s| s),
    ]
}

fn arb_source() -> impl Strategy<Value = ColorSource> {
    prop_oneof![
        Just(ColorSource::Pixel),
        Just(ColorSource::Css),
        Just(ColorSource::Computed),
    ]
}

fn arb_length() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..24).prop_map(|n| format!("{n}px")),
        (0u32..4).prop_map(|n| format!("{n}em")),
        Just("auto".to_string()),
        Just("0".to_string()),
    ]
}

fn arb_radius() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop_oneof![
        Just("0px".to_string()),
        Just("4px".to_string()),
        Just("0px 0px 8px 0px".to_string()),
        Just("50%".to_string()),
    ])
}

fn arb_shadow() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop_oneof![
        Just("none".to_string()),
        Just("rgba(0, 0, 0, 0.2) 0px 1px 3px 0px".to_string()),
    ])
}

fn arb_family() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop_oneof![
        Just("Georgia, serif".to_string()),
        Just("Helvetica, Arial, sans-serif".to_string()),
        Just("Inter".to_string()),
    ])
}

fn page_with(radius: &Option<String>, shadow: &Option<String>, family: &Option<String>) -> SnapshotPage {
    let mut page = SnapshotPage::new();
    let button = page.add_element("button");
    let card = page.add_element("article");
    let heading = page.add_element("h1");
    page.register("button", button)
        .register("article", card)
        .register("h1", heading);
    if let Some(radius) = radius {
        page.set_style(button, "border-radius", radius);
    }
    if let Some(shadow) = shadow {
        page.set_style(card, "box-shadow", shadow);
    }
    if let Some(family) = family {
        page.set_style(heading, "font-family", family);
    }
    page
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn palette_is_bounded_and_unique(
        raw in prop::collection::vec((arb_source(), arb_color()), 0..40)
    ) {
        let samples: Vec<RawColorSample> = raw
            .into_iter()
            .enumerate()
            .map(|(rank, (source, value))| RawColorSample::new(source, Some(value), rank as u32))
            .collect();

        let palette = canonical_palette(&samples);

        prop_assert!((3..=10).contains(&palette.len()));
        let unique: HashSet<&String> = palette.iter().collect();
        prop_assert_eq!(unique.len(), palette.len());
        for color in &palette {
            prop_assert!(color.starts_with('#') && color.len() == 7, "{}", color);
        }
    }

    #[test]
    fn spacing_ranks_by_count_then_first_seen(
        samples in prop::collection::vec(arb_length(), 0..60)
    ) {
        let ranked = rank_spacing(&samples);
        prop_assert!(ranked.len() <= 5);

        let count = |value: &String| samples.iter().filter(|s| *s == value).count();
        let first = |value: &String| samples.iter().position(|s| s == value);
        for pair in ranked.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(count(a) >= count(b));
            if count(a) == count(b) {
                prop_assert!(first(a) < first(b));
            }
        }
        for value in &ranked {
            prop_assert!(!matches!(value.as_str(), "0" | "0px" | "0em" | "auto"), "{}", value);
        }
    }

    #[test]
    fn style_tags_follow_fixed_order(
        colors in prop::collection::vec(arb_color(), 0..12),
        radius in arb_radius(),
        shadow in arb_shadow(),
        family in arb_family(),
    ) {
        let signals = SignalSet::new("https://example.com", "")
            .with_colors(RawColorSample::ranked(ColorSource::Pixel, colors));
        let page = page_with(&radius, &shadow, &family);
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        let extraction = extract(&signals, &page, &ExtractorConfig::default(), at).unwrap();
        let tags = extraction.schema.style_keywords();

        let positions: Vec<usize> = tags
            .iter()
            .map(|tag| TAG_ORDER.iter().position(|known| *known == tag.as_str()).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]), "{:?}", tags);

        let has = |tag: &str| tags.iter().any(|t| t == tag);
        prop_assert!(has("rounded") != has("sharp-edges"));
        prop_assert!(has("shadowed") != has("flat"));
        prop_assert!(has("serif") != has("sans-serif"));
        prop_assert_eq!(has("material-inspired"), has("rounded") && has("shadowed"));
        prop_assert_eq!(has("minimalist"), has("flat") && has("sharp-edges"));
    }
}
