use chrono::{DateTime, SecondsFormat, Utc};

use crate::analysis::config::SCHEMA_VERSION;
use crate::models::{
    ColorProfile, ComponentProfile, DesignSchema, DesignSummary, IconProfile, LayoutProfile,
    Metadata, TypographyTable,
};

/// Outputs of the five analyzers for one page.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerOutputs {
    pub colors: ColorProfile,
    pub typography: TypographyTable,
    pub layout: LayoutProfile,
    pub components: ComponentProfile,
    pub images: IconProfile,
}

/// Compose the schema from analyzer outputs. No values are recomputed or
/// checked; the style summary starts empty.
pub fn assemble_schema(
    outputs: AnalyzerOutputs,
    source_url: &str,
    extracted_at: DateTime<Utc>,
) -> DesignSchema {
    DesignSchema {
        metadata: Metadata {
            source_url: source_url.to_string(),
            extraction_date: extracted_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            schema_version: SCHEMA_VERSION.to_string(),
        },
        colors: outputs.colors,
        typography: outputs.typography,
        layout: outputs.layout,
        components: outputs.components,
        images: outputs.images,
        design_summary: DesignSummary::default(),
    }
}
