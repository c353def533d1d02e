pub mod assemble;
pub mod colors;
pub mod components;
pub mod config;
pub mod frequency;
pub mod icons;
pub mod keywords;
pub mod layout;
pub mod patterns;
pub mod typography;
pub mod validate;

pub use assemble::{assemble_schema, AnalyzerOutputs};
pub use colors::aggregate_colors;
pub use components::fingerprint_components;
pub use config::ExtractorConfig;
pub use icons::classify_icons;
pub use keywords::classify_keywords;
pub use layout::analyze_layout;
pub use typography::resolve_typography;
pub use validate::{validate_record, ValidationReport};
