use anyhow::{anyhow, Result};
use regex::Regex;
use serde_json::{json, Map, Value};
use std::sync::LazyLock;

use crate::page::{Metric, PageView};

const SIDEBAR_SELECTOR: &str = ".widget-area, .sidebar, #sidebar, #secondary";

static THEME_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)wp-content/themes/([^/"'\s?]+)"#).expect("valid theme regex")
});

/// Record the CMS and theme, and the sidebar when one is rendered.
pub(super) fn enhance(record: &mut Value, markup: &str, page: &dyn PageView) -> Result<()> {
    let theme = THEME_PATH
        .captures(markup)
        .map(|caps| caps[1].to_string());

    section(record, "metadata")?.insert(
        "cms".to_string(),
        json!({ "type": "wordpress", "theme": theme }),
    );

    if let Some(sidebar) = page.first(SIDEBAR_SELECTOR) {
        let width = page.measure(sidebar, Metric::ClientWidth).ok();
        section(record, "components")?.insert(
            "sidebar".to_string(),
            json!({ "present": true, "width": width }),
        );
    }

    Ok(())
}

/// Top-level object `name` of the record, created when absent.
fn section<'a>(record: &'a mut Value, name: &str) -> Result<&'a mut Map<String, Value>> {
    record
        .as_object_mut()
        .ok_or_else(|| anyhow!("schema record is not an object"))?
        .entry(name)
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| anyhow!("schema section {name} is not an object"))
}
