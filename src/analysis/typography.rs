use indexmap::IndexMap;

use crate::analysis::patterns::{font_import_urls, has_font_face};
use crate::models::{FontSpec, StyleSample, TypographyTable};
use crate::page::{ElementId, PageView};
use crate::utils::css::strip_quotes;

const HEADING_LEVELS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// Body and heading fonts plus web-font signals found in the markup.
pub fn resolve_typography(page: &dyn PageView, markup: &str) -> TypographyTable {
    let body = match page.root() {
        Some(root) => sample_font(page, root, true),
        None => FontSpec::unavailable(true),
    };

    let headings: IndexMap<String, FontSpec> = HEADING_LEVELS
        .iter()
        .filter_map(|tag| {
            page.first(tag)
                .map(|element| (tag.to_string(), sample_font(page, element, false)))
        })
        .collect();

    TypographyTable {
        headings,
        body,
        font_imports: font_import_urls(markup),
        custom_fonts: has_font_face(markup),
    }
}

fn sample_font(page: &dyn PageView, element: ElementId, with_line_height: bool) -> FontSpec {
    let read = |property: &str| -> StyleSample {
        page.computed_style(element, property)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .into()
    };

    let font_family = match read("font-family") {
        StyleSample::Value(family) => StyleSample::Value(strip_quotes(&family)),
        StyleSample::Unavailable => StyleSample::Unavailable,
    };

    FontSpec {
        font_family,
        font_size: read("font-size"),
        font_weight: read("font-weight"),
        line_height: with_line_height.then(|| read("line-height")),
    }
}
