//! Canonical design schema and its sub-records.
//!
//! A `DesignSchema` is composed once by the assembler and only read
//! afterwards; formatters and enhancers work on its serialized record.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered property name -> value mapping captured from one element.
/// An empty map means nothing matched.
pub type StyleMap = IndexMap<String, String>;

/// A style read that may have failed.
///
/// `Unavailable` serializes as `null` so the key stays present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleSample {
    Value(String),
    Unavailable,
}

impl StyleSample {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StyleSample::Value(value) => Some(value),
            StyleSample::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, StyleSample::Value(_))
    }
}

impl From<Option<String>> for StyleSample {
    fn from(value: Option<String>) -> Self {
        value.map_or(StyleSample::Unavailable, StyleSample::Value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub source_url: String,
    pub extraction_date: String,
    pub schema_version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRoles {
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub background_color: String,
    pub text_color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorProfile {
    #[serde(flatten)]
    pub roles: ColorRoles,
    /// Unique `#rrggbb` values in assignment precedence, 3 to 10 entries.
    pub palette: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSpec {
    pub font_family: StyleSample,
    pub font_size: StyleSample,
    pub font_weight: StyleSample,
    /// Only sampled for body text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<StyleSample>,
}

impl FontSpec {
    pub fn unavailable(with_line_height: bool) -> Self {
        Self {
            font_family: StyleSample::Unavailable,
            font_size: StyleSample::Unavailable,
            font_weight: StyleSample::Unavailable,
            line_height: with_line_height.then_some(StyleSample::Unavailable),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypographyTable {
    /// Keyed by `h1`..`h6`; levels without a matching element are absent.
    pub headings: IndexMap<String, FontSpec>,
    pub body: FontSpec,
    pub font_imports: Vec<String>,
    pub custom_fonts: bool,
}

impl TypographyTable {
    /// Font family of the highest heading level present.
    pub fn primary_heading_family(&self) -> Option<&str> {
        (1..=6)
            .filter_map(|level| self.headings.get(&format!("h{level}")))
            .find_map(|spec| spec.font_family.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PageDimensions {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutProfile {
    pub page_dimensions: PageDimensions,
    pub container_width: Option<f64>,
    pub has_grid_system: bool,
    /// Up to five raw lengths, most frequent first.
    pub common_spacing_units: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentCategory {
    Buttons,
    Cards,
    Inputs,
    Navigation,
}

impl ComponentCategory {
    pub const ALL: [ComponentCategory; 4] = [
        ComponentCategory::Buttons,
        ComponentCategory::Cards,
        ComponentCategory::Inputs,
        ComponentCategory::Navigation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentCategory::Buttons => "buttons",
            ComponentCategory::Cards => "cards",
            ComponentCategory::Inputs => "inputs",
            ComponentCategory::Navigation => "navigation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComponentProfile {
    pub buttons: StyleMap,
    pub cards: StyleMap,
    pub inputs: StyleMap,
    pub navigation: StyleMap,
    pub utility_patterns: Vec<String>,
}

impl ComponentProfile {
    pub fn fingerprint(&self, category: ComponentCategory) -> &StyleMap {
        match category {
            ComponentCategory::Buttons => &self.buttons,
            ComponentCategory::Cards => &self.cards,
            ComponentCategory::Inputs => &self.inputs,
            ComponentCategory::Navigation => &self.navigation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IconProfile {
    pub has_svg_icons: bool,
    pub has_icon_font: bool,
    pub icon_classes: Vec<String>,
    pub image_style: StyleMap,
    pub logo_detected: bool,
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DesignSummary {
    pub style_keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignSchema {
    pub(crate) metadata: Metadata,
    pub(crate) colors: ColorProfile,
    pub(crate) typography: TypographyTable,
    pub(crate) layout: LayoutProfile,
    pub(crate) components: ComponentProfile,
    pub(crate) images: IconProfile,
    pub(crate) design_summary: DesignSummary,
}

impl DesignSchema {
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn colors(&self) -> &ColorProfile {
        &self.colors
    }

    pub fn typography(&self) -> &TypographyTable {
        &self.typography
    }

    pub fn layout(&self) -> &LayoutProfile {
        &self.layout
    }

    pub fn components(&self) -> &ComponentProfile {
        &self.components
    }

    pub fn images(&self) -> &IconProfile {
        &self.images
    }

    pub fn style_keywords(&self) -> &[String] {
        &self.design_summary.style_keywords
    }

    /// Consume the schema, producing one that carries the given style tags.
    pub fn with_style_keywords(self, style_keywords: Vec<String>) -> Self {
        Self {
            design_summary: DesignSummary { style_keywords },
            ..self
        }
    }

    /// Schema-shaped JSON record, the form enhancers and the validator see.
    pub fn to_record(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).context("failed to serialize design schema")
    }
}
