use regex::Regex;
use std::sync::LazyLock;

static COLOR_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)rgba?\([^)]*\)|#[0-9a-f]{6}\b|#[0-9a-f]{3}\b").expect("valid color token regex")
});

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)").expect("valid number regex")
});

/// Normalize an RGB-like color string to lowercase `#rrggbb`.
///
/// Accepts `#rgb`, `#rrggbb`, `rgb(r, g, b)` and `rgba(r, g, b, a)` with
/// integer channels in 0..=255. Anything else, including a fully transparent
/// `rgba`, yields `None`.
pub fn normalize_color(raw: &str) -> Option<String> {
    let value = raw.trim().to_ascii_lowercase();

    if let Some(hex) = value.strip_prefix('#') {
        return normalize_hex(hex);
    }

    let (inner, expected) = if let Some(rest) = value.strip_prefix("rgba(") {
        (rest.strip_suffix(')')?, 4)
    } else if let Some(rest) = value.strip_prefix("rgb(") {
        (rest.strip_suffix(')')?, 3)
    } else {
        return None;
    };

    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    if parts.len() != expected {
        return None;
    }

    let mut channels = [0u8; 3];
    for (slot, part) in channels.iter_mut().zip(&parts) {
        *slot = part.parse::<u8>().ok()?;
    }

    if expected == 4 {
        let alpha: f64 = parts[3].parse().ok()?;
        if !(0.0..=1.0).contains(&alpha) || alpha == 0.0 {
            return None;
        }
    }

    Some(format!(
        "#{:02x}{:02x}{:02x}",
        channels[0], channels[1], channels[2]
    ))
}

fn normalize_hex(hex: &str) -> Option<String> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => Some(format!("#{hex}")),
        3 => {
            let expanded: String = hex.chars().flat_map(|c| [c, c]).collect();
            Some(format!("#{expanded}"))
        }
        _ => None,
    }
}

/// Every color-looking token in a style value, in order of appearance.
pub fn color_tokens(value: &str) -> Vec<String> {
    COLOR_TOKEN
        .find_iter(value)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// First color token of a composite value such as `rgb(0, 0, 0) none none`.
pub fn first_color_token(value: &str) -> Option<String> {
    COLOR_TOKEN.find(value).map(|m| m.as_str().to_string())
}

/// Numeric prefix of a length value (`"12.5px"` -> 12.5).
pub fn leading_number(value: &str) -> Option<f64> {
    LEADING_NUMBER
        .find(value.trim())
        .and_then(|m| m.as_str().parse().ok())
}

/// True when the value is a readable length with a non-zero magnitude.
pub fn is_nonzero_length(value: &str) -> bool {
    matches!(leading_number(value), Some(n) if n != 0.0)
}

/// True when any whitespace-separated component of a shorthand is non-zero.
pub fn has_nonzero_component(value: &str) -> bool {
    value.split_whitespace().any(is_nonzero_length)
}

/// True for empty or `none` values.
pub fn is_none_value(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none")
}

pub fn strip_quotes(value: &str) -> String {
    value.trim().trim_matches(|c| c == '"' || c == '\'').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_accepted_forms() {
        assert_eq!(normalize_color("rgb(16, 32, 48)").as_deref(), Some("#102030"));
        assert_eq!(normalize_color("RGBA(255,255,255,0.5)").as_deref(), Some("#ffffff"));
        assert_eq!(normalize_color("#ABC").as_deref(), Some("#aabbcc"));
        assert_eq!(normalize_color(" #102030 ").as_deref(), Some("#102030"));
    }

    #[test]
    fn rejects_malformed_colors() {
        assert_eq!(normalize_color("rgb(300, 0, 0)"), None);
        assert_eq!(normalize_color("rgb(1, 2)"), None);
        assert_eq!(normalize_color("rgba(0, 0, 0, 0)"), None);
        assert_eq!(normalize_color("transparent"), None);
        assert_eq!(normalize_color("#12345"), None);
        assert_eq!(normalize_color("#gggggg"), None);
        assert_eq!(normalize_color(""), None);
    }

    #[test]
    fn extracts_first_color_token() {
        assert_eq!(
            first_color_token("rgb(0, 0, 0) none none").as_deref(),
            Some("rgb(0, 0, 0)")
        );
        assert_eq!(first_color_token("none"), None);
    }

    #[test]
    fn length_helpers() {
        assert_eq!(leading_number("12.5px"), Some(12.5));
        assert!(!is_nonzero_length("0px"));
        assert!(!is_nonzero_length("auto"));
        assert!(is_nonzero_length("8px"));
        assert!(has_nonzero_component("0px 4px"));
        assert!(!has_nonzero_component("0px 0px"));
    }

    #[test]
    fn strips_surrounding_quotes() {
        assert_eq!(strip_quotes("\"Open Sans\""), "Open Sans");
        assert_eq!(strip_quotes("'Georgia'"), "Georgia");
    }
}
