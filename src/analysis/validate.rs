use serde::Serialize;
use serde_json::Value;

/// Required top-level sections and the fields each must carry.
/// `components` and `images` are required but open.
const REQUIRED_FIELDS: &[(&str, &[&str])] = &[
    ("metadata", &["source_url", "extraction_date", "schema_version"]),
    (
        "colors",
        &[
            "primary_color",
            "secondary_color",
            "accent_color",
            "background_color",
            "text_color",
            "palette",
        ],
    ),
    ("typography", &["headings", "body"]),
    ("layout", &["page_dimensions", "common_spacing_units"]),
    ("components", &[]),
    ("images", &[]),
    ("design_summary", &["style_keywords"]),
];

/// Outcome of a structural check. A failed check is a warning for the
/// caller; the record is still usable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub message: String,
}

/// Check a schema-shaped record for the required sections and fields.
/// Extra keys are ignored.
pub fn validate_record(record: &Value) -> ValidationReport {
    let Some(root) = record.as_object() else {
        return ValidationReport {
            valid: false,
            message: "schema record is not an object".to_string(),
        };
    };

    let mut missing: Vec<String> = Vec::new();
    for (section, fields) in REQUIRED_FIELDS {
        match root.get(*section) {
            Some(Value::Object(body)) => missing.extend(
                fields
                    .iter()
                    .filter(|field| !body.contains_key(**field))
                    .map(|field| format!("{section}.{field}")),
            ),
            Some(_) => missing.push(format!("{section} (not an object)")),
            None => missing.push(section.to_string()),
        }
    }

    if missing.is_empty() {
        ValidationReport {
            valid: true,
            message: "schema validation passed".to_string(),
        }
    } else {
        ValidationReport {
            valid: false,
            message: format!("missing required fields: {}", missing.join(", ")),
        }
    }
}
