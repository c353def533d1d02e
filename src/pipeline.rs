use anyhow::Result;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::analysis::{
    aggregate_colors, analyze_layout, assemble_schema, classify_icons, classify_keywords,
    fingerprint_components, resolve_typography, validate_record, AnalyzerOutputs, ExtractorConfig,
    ValidationReport,
};
use crate::models::{DesignSchema, SignalSet};
use crate::page::PageView;
use crate::site_type::{detect_site_type, enhance_record, SiteType};

const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

/// Result of analysing one page.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub schema: DesignSchema,
    pub site_type: SiteType,
    /// Serialized schema after site enhancement; what formatters consume.
    pub record: Value,
    pub enhancer: Option<&'static str>,
    pub validation: ValidationReport,
}

/// Run the five independent analyzers over one page's signals.
pub fn analyze(signals: &SignalSet, page: &dyn PageView, config: &ExtractorConfig) -> AnalyzerOutputs {
    AnalyzerOutputs {
        colors: aggregate_colors(signals, page),
        typography: resolve_typography(page, &signals.markup),
        layout: analyze_layout(page, config.spacing_sample_cap),
        components: fingerprint_components(page, &signals.markup),
        images: classify_icons(page, &signals.markup, &signals.source_url),
    }
}

/// Analyze, assemble, tag, enhance and validate one page.
///
/// A failed validation is logged and reported in the result; the schema is
/// returned regardless.
pub fn extract(
    signals: &SignalSet,
    page: &dyn PageView,
    config: &ExtractorConfig,
    extracted_at: DateTime<Utc>,
) -> Result<Extraction> {
    let site_type = detect_site_type(&signals.markup, &signals.source_url);

    let outputs = analyze(signals, page, config);
    let schema = assemble_schema(outputs, &signals.source_url, extracted_at);
    let keywords = classify_keywords(&schema);
    let schema = schema.with_style_keywords(keywords);

    let mut record = schema.to_record()?;
    let enhancer = if config.apply_site_enhancers {
        enhance_record(site_type, &mut record, &signals.markup, page)
    } else {
        None
    };

    let validation = validate_record(&record);
    if validation.valid {
        log_info!(
            "extracted {} ({} site): {}",
            signals.source_url,
            site_type.as_str(),
            schema.style_keywords().join(", ")
        );
    } else {
        log_warn!(
            "schema for {} did not pass validation: {}",
            signals.source_url,
            validation.message
        );
    }

    Ok(Extraction {
        schema,
        site_type,
        record,
        enhancer,
        validation,
    })
}
