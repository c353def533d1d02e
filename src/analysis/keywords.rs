//! Style tags derived from an assembled schema.
//!
//! Rules run in a fixed order and tags are appended in that order; consumers
//! rely on the position of each tag. The composite rule reads the tags
//! already emitted rather than the schema.

use crate::analysis::config::{HIGH_CONTRAST_MIN_PALETTE, MONOCHROMATIC_MAX_PALETTE};
use crate::models::{DesignSchema, StyleMap};
use crate::utils::css::{has_nonzero_component, is_none_value};

pub const HIGH_CONTRAST: &str = "high-contrast";
pub const MONOCHROMATIC: &str = "monochromatic";
pub const ROUNDED: &str = "rounded";
pub const SHARP_EDGES: &str = "sharp-edges";
pub const SHADOWED: &str = "shadowed";
pub const FLAT: &str = "flat";
pub const SERIF: &str = "serif";
pub const SANS_SERIF: &str = "sans-serif";
pub const GRID_BASED: &str = "grid-based";
pub const MODERN_ICONS: &str = "modern-icons";
pub const MATERIAL_INSPIRED: &str = "material-inspired";
pub const MINIMALIST: &str = "minimalist";

const SERIF_FAMILIES: &[&str] = &[
    "serif",
    "georgia",
    "times",
    "palatino",
    "bookman",
    "charter",
    "garamond",
    "baskerville",
];

pub fn classify_keywords(schema: &DesignSchema) -> Vec<String> {
    let mut tags: Vec<&'static str> = Vec::new();

    let palette_len = schema.colors().palette.len();
    if palette_len >= HIGH_CONTRAST_MIN_PALETTE {
        tags.push(HIGH_CONTRAST);
    } else if palette_len <= MONOCHROMATIC_MAX_PALETTE {
        tags.push(MONOCHROMATIC);
    }

    let components = schema.components();
    tags.push(if has_radius(&components.buttons) {
        ROUNDED
    } else {
        SHARP_EDGES
    });

    tags.push(
        if has_shadow(&components.cards) || has_shadow(&schema.images().image_style) {
            SHADOWED
        } else {
            FLAT
        },
    );

    let typography = schema.typography();
    let family = typography
        .primary_heading_family()
        .or_else(|| typography.body.font_family.as_str())
        .unwrap_or_default();
    tags.push(if is_serif(family) { SERIF } else { SANS_SERIF });

    if schema.layout().has_grid_system {
        tags.push(GRID_BASED);
    }
    if schema.images().has_svg_icons {
        tags.push(MODERN_ICONS);
    }

    if tags.contains(&ROUNDED) && tags.contains(&SHADOWED) {
        tags.push(MATERIAL_INSPIRED);
    }
    if tags.contains(&FLAT) && tags.contains(&SHARP_EDGES) {
        tags.push(MINIMALIST);
    }

    tags.into_iter().map(str::to_string).collect()
}

fn has_radius(fingerprint: &StyleMap) -> bool {
    fingerprint
        .get("border_radius")
        .is_some_and(|radius| has_nonzero_component(radius))
}

fn has_shadow(fingerprint: &StyleMap) -> bool {
    fingerprint
        .get("box_shadow")
        .is_some_and(|shadow| !is_none_value(shadow))
}

/// Case-insensitive serif match; `sans-serif` never counts as serif.
fn is_serif(family: &str) -> bool {
    let family = family.to_ascii_lowercase().replace("sans-serif", "");
    SERIF_FAMILIES.iter().any(|needle| family.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::assemble::{assemble_schema, AnalyzerOutputs};
    use crate::models::{
        ColorProfile, ColorRoles, ComponentProfile, FontSpec, IconProfile, LayoutProfile,
        PageDimensions, StyleSample, TypographyTable,
    };
    use chrono::Utc;
    use indexmap::IndexMap;

    fn outputs(palette_len: usize) -> AnalyzerOutputs {
        let palette: Vec<String> = (0..palette_len).map(|i| format!("#0000{i:02x}")).collect();
        AnalyzerOutputs {
            colors: ColorProfile {
                roles: ColorRoles {
                    primary_color: palette[0].clone(),
                    secondary_color: palette[1].clone(),
                    accent_color: palette[2].clone(),
                    background_color: "#ffffff".into(),
                    text_color: "#000000".into(),
                },
                palette,
            },
            typography: TypographyTable {
                headings: IndexMap::new(),
                body: FontSpec::unavailable(true),
                font_imports: Vec::new(),
                custom_fonts: false,
            },
            layout: LayoutProfile {
                page_dimensions: PageDimensions::default(),
                container_width: None,
                has_grid_system: false,
                common_spacing_units: Vec::new(),
            },
            components: ComponentProfile::default(),
            images: IconProfile::default(),
        }
    }

    fn tags(outputs: AnalyzerOutputs) -> Vec<String> {
        classify_keywords(&assemble_schema(outputs, "https://example.com", Utc::now()))
    }

    #[test]
    fn palette_size_picks_contrast_tag() {
        let plain = ["sharp-edges", "flat", "sans-serif", "minimalist"];
        let with = |first: &'static str| {
            std::iter::once(first)
                .chain(plain)
                .map(String::from)
                .collect::<Vec<_>>()
        };

        assert_eq!(tags(outputs(3)), with(MONOCHROMATIC));
        assert_eq!(tags(outputs(4)), plain);
        assert_eq!(tags(outputs(5)), plain);
        assert_eq!(tags(outputs(6)), with(HIGH_CONTRAST));
        assert_eq!(tags(outputs(10)), with(HIGH_CONTRAST));
    }

    #[test]
    fn grid_and_svg_icons_are_tagged() {
        let mut page = outputs(4);
        page.layout.has_grid_system = true;
        page.images.has_svg_icons = true;

        assert_eq!(
            tags(page),
            ["sharp-edges", "flat", "sans-serif", "grid-based", "modern-icons", "minimalist"]
        );
    }

    #[test]
    fn rounded_shadowed_serif_page_is_material_inspired() {
        let mut page = outputs(6);
        page.components
            .buttons
            .insert("border_radius".into(), "8px".into());
        page.components
            .cards
            .insert("box_shadow".into(), "rgba(0, 0, 0, 0.2) 0px 2px 4px 0px".into());
        page.typography.headings.insert(
            "h1".into(),
            FontSpec {
                font_family: StyleSample::Value("Georgia, serif".into()),
                ..FontSpec::unavailable(false)
            },
        );

        assert_eq!(
            tags(page),
            ["high-contrast", "rounded", "shadowed", "serif", "material-inspired"]
        );
    }

    #[test]
    fn image_shadow_alone_makes_page_shadowed() {
        let mut page = outputs(4);
        page.images
            .image_style
            .insert("box_shadow".into(), "0 1px 2px #000".into());

        assert_eq!(tags(page), ["sharp-edges", "shadowed", "sans-serif"]);
    }

    #[test]
    fn serif_detection_ignores_sans_serif() {
        assert!(is_serif("Georgia, serif"));
        assert!(is_serif("\"Times New Roman\""));
        assert!(!is_serif("Helvetica, Arial, sans-serif"));
        assert!(!is_serif(""));
    }

    #[test]
    fn radius_needs_a_nonzero_component() {
        let mut buttons = StyleMap::new();
        assert!(!has_radius(&buttons));
        buttons.insert("border_radius".into(), "0px".into());
        assert!(!has_radius(&buttons));
        buttons.insert("border_radius".into(), "0px 4px".into());
        assert!(has_radius(&buttons));
    }

    #[test]
    fn shadow_none_is_flat() {
        let mut cards = StyleMap::new();
        assert!(!has_shadow(&cards));
        cards.insert("box_shadow".into(), "none".into());
        assert!(!has_shadow(&cards));
        cards.insert("box_shadow".into(), "0 1px 2px #000".into());
        assert!(has_shadow(&cards));
    }
}
