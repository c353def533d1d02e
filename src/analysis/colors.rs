use indexmap::IndexSet;

use crate::analysis::config::{
    DEFAULT_BACKGROUND, DEFAULT_TEXT, FALLBACK_PALETTE, MAX_PALETTE_SIZE, MIN_PALETTE_SIZE,
};
use crate::models::{ColorProfile, ColorRoles, ColorSource, RawColorSample, SignalSet};
use crate::page::PageView;
use crate::utils::css::{first_color_token, normalize_color};

const ENABLE_LOGS: bool = true;

use crate::log_debug;

/// Source precedence when building the palette.
const SOURCE_PRECEDENCE: [ColorSource; 3] =
    [ColorSource::Pixel, ColorSource::Css, ColorSource::Computed];

const COMPUTED_COLOR_SELECTOR: &str = "body, h1, h2, h3, p, a, button, .btn, .card";

/// Merge the three color sources into a palette and assign roles.
pub fn aggregate_colors(signals: &SignalSet, page: &dyn PageView) -> ColorProfile {
    let ordered = SOURCE_PRECEDENCE
        .iter()
        .flat_map(|source| signals.samples_from(*source));
    let palette = canonical_palette(ordered);
    let (background_color, text_color) = root_colors(page);

    ColorProfile {
        roles: ColorRoles {
            primary_color: palette[0].clone(),
            secondary_color: palette[1].clone(),
            accent_color: palette[2].clone(),
            background_color,
            text_color,
        },
        palette,
    }
}

/// Unique normalized colors in the order given, capped at the palette limit
/// and padded with the fallback colors up to the minimum size.
pub fn canonical_palette<'a, I>(samples: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a RawColorSample>,
{
    let mut palette: IndexSet<String> = IndexSet::new();

    for sample in samples {
        if palette.len() >= MAX_PALETTE_SIZE {
            break;
        }
        let Some(raw) = sample.hex.as_deref() else {
            continue;
        };
        match normalize_color(raw) {
            Some(hex) => {
                palette.insert(hex);
            }
            None => {
                log_debug!(
                    "dropping malformed {} color sample {raw:?}",
                    sample.source.as_str()
                );
            }
        }
    }

    for fallback in FALLBACK_PALETTE {
        if palette.len() >= MIN_PALETTE_SIZE {
            break;
        }
        palette.insert(fallback.to_string());
    }

    palette.into_iter().collect()
}

/// Background and text colors of the page root, with defaults.
pub fn root_colors(page: &dyn PageView) -> (String, String) {
    let read = |property: &str, default: &str| {
        page.root()
            .and_then(|root| page.computed_style(root, property).ok())
            .and_then(|value| normalize_color(&value))
            .unwrap_or_else(|| default.to_string())
    };
    (
        read("background-color", DEFAULT_BACKGROUND),
        read("color", DEFAULT_TEXT),
    )
}

/// Computed colors of common elements, for renderers that did not collect
/// them. Values are raw and unique, in first-seen order.
pub fn harvest_computed_colors(page: &dyn PageView, cap: usize) -> Vec<String> {
    let mut seen: IndexSet<String> = IndexSet::new();

    for element in page.query(COMPUTED_COLOR_SELECTOR).into_iter().take(cap) {
        for property in ["background-color", "color"] {
            if let Ok(value) = page.computed_style(element, property) {
                seen.insert(value.trim().to_string());
            }
        }
        if let Some(border) = page
            .computed_style(element, "border-color")
            .ok()
            .and_then(|value| first_color_token(&value))
        {
            seen.insert(border);
        }
    }

    seen.into_iter().filter(|value| !value.is_empty()).collect()
}
