//! Named matchers over raw markup.
//!
//! Tag and at-rule matching is case-insensitive. Class tokens are compared
//! case-sensitively and never by substring: icon-font signatures match a
//! whole token or a token prefix (see `SignatureMatch`), utility prefixes by
//! `starts_with`. Class attributes may be double-quoted, single-quoted or
//! unquoted.

use indexmap::IndexSet;
use regex::Regex;
use std::sync::LazyLock;

use crate::utils::css::color_tokens;

/// How a class token is compared against an icon-font signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureMatch {
    /// The token equals the signature.
    Token,
    /// The token starts with the signature.
    Prefix,
}

impl SignatureMatch {
    pub fn matches(self, token: &str, signature: &str) -> bool {
        match self {
            SignatureMatch::Token => token == signature,
            SignatureMatch::Prefix => token.starts_with(signature),
        }
    }
}

/// Icon-font signatures. Order only decides which signature is reported
/// first. The bare Font Awesome style classes are short enough to occur
/// inside ordinary words, so they only match as whole tokens.
pub const ICON_FONT_REGISTRY: &[(&str, SignatureMatch)] = &[
    ("fa-", SignatureMatch::Prefix),
    ("fas", SignatureMatch::Token),
    ("far", SignatureMatch::Token),
    ("fal", SignatureMatch::Token),
    ("fab", SignatureMatch::Token),
    ("glyphicon", SignatureMatch::Prefix),
    ("material-icons", SignatureMatch::Prefix),
    ("icon-", SignatureMatch::Prefix),
    ("icofont-", SignatureMatch::Prefix),
    ("bi-", SignatureMatch::Prefix),
    ("feather", SignatureMatch::Prefix),
    ("mdi-", SignatureMatch::Prefix),
];

/// Prefixes of utility-first class names.
pub const UTILITY_PREFIXES: &[&str] = &[
    "bg-", "text-", "p-", "px-", "py-", "pt-", "pb-", "pl-", "pr-", "m-", "mx-", "my-", "mt-",
    "mb-", "ml-", "mr-", "flex", "grid", "border", "rounded", "w-", "h-", "font-", "shadow",
    "gap-", "space-", "col-", "items-", "justify-",
];

/// Hosts serving web fonts.
pub const WEB_FONT_HOSTS: &[&str] = &[
    "fonts.googleapis.com",
    "fonts.gstatic.com",
    "use.typekit.net",
    "p.typekit.net",
    "fonts.bunny.net",
    "fast.fonts.net",
    "cloud.typography.com",
];

/// Declarations whose property names contain one of these carry colors.
const COLOR_PROPERTY_HINTS: &[&str] = &["color", "background", "border", "fill", "stroke"];
const NON_COLOR_KEYWORDS: &[&str] = &[
    "inherit",
    "transparent",
    "none",
    "initial",
    "unset",
    "currentcolor",
];

static CLASS_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:^|\s)class\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("valid class attribute regex")
});

static FONT_URL: LazyLock<Regex> = LazyLock::new(|| {
    let hosts = WEB_FONT_HOSTS
        .iter()
        .map(|host| regex::escape(host))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r#"(?i)(?:https?:)?//(?:{hosts})[^"'\s)<>]*"#))
        .expect("valid font url regex")
});

static FONT_FACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)@font-face").expect("valid font-face regex"));

static INLINE_SVG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<svg[\s>/]").expect("valid svg regex"));

static STYLE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<style[^>]*>(.*?)</style>").expect("valid style block regex")
});

static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([a-z-]+)\s*:\s*([^;{}]+)").expect("valid declaration regex")
});

/// Every class token in document order, duplicates included.
pub fn class_tokens(markup: &str) -> Vec<String> {
    CLASS_ATTRIBUTE
        .captures_iter(markup)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)))
        .flat_map(|value| {
            value
                .as_str()
                .split_whitespace()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Web-font URLs, verbatim, deduplicated in order of appearance.
pub fn font_import_urls(markup: &str) -> Vec<String> {
    FONT_URL
        .find_iter(markup)
        .map(|m| m.as_str().to_string())
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

pub fn has_font_face(markup: &str) -> bool {
    FONT_FACE.is_match(markup)
}

pub fn has_inline_svg(markup: &str) -> bool {
    INLINE_SVG.is_match(markup)
}

pub fn is_utility_class(token: &str) -> bool {
    UTILITY_PREFIXES.iter().any(|prefix| token.starts_with(prefix))
}

/// First registry signature matched by any token.
pub fn icon_font_signature<'a, I>(tokens: I) -> Option<&'static str>
where
    I: IntoIterator<Item = &'a String>,
    I::IntoIter: Clone,
{
    let tokens = tokens.into_iter();
    ICON_FONT_REGISTRY
        .iter()
        .find(|(signature, matching)| {
            tokens.clone().any(|token| matching.matches(token, signature))
        })
        .map(|(signature, _)| *signature)
}

pub fn is_icon_class(token: &str) -> bool {
    ICON_FONT_REGISTRY
        .iter()
        .any(|(signature, matching)| matching.matches(token, signature))
}

/// Color literals authored in `<style>` blocks, in declaration order.
pub fn style_block_colors(markup: &str) -> Vec<String> {
    let mut colors = Vec::new();
    for block in STYLE_BLOCK.captures_iter(markup) {
        let Some(body) = block.get(1) else {
            continue;
        };
        for decl in DECLARATION.captures_iter(body.as_str()) {
            let property = decl[1].to_ascii_lowercase();
            let value = decl[2].trim();
            if !COLOR_PROPERTY_HINTS.iter().any(|hint| property.contains(hint)) {
                continue;
            }
            if NON_COLOR_KEYWORDS
                .iter()
                .any(|kw| value.eq_ignore_ascii_case(kw))
            {
                continue;
            }
            colors.extend(color_tokens(value));
        }
    }
    colors
}
