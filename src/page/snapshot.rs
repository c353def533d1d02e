//! In-memory page built from what a renderer recorded.

use anyhow::{anyhow, Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::{ElementId, Metric, PageView};
use crate::analysis::colors::harvest_computed_colors;
use crate::analysis::config::ExtractorConfig;
use crate::analysis::patterns::style_block_colors;
use crate::models::{ColorSource, RawColorSample, SignalSet};
use crate::sensing::dominant_colors;

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_warn};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotElement {
    pub tag: String,
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
    #[serde(default)]
    pub styles: IndexMap<String, String>,
    #[serde(default)]
    pub metrics: IndexMap<Metric, f64>,
}

/// A `PageView` over recorded elements and selector matches.
///
/// Selectors are not evaluated; a query returns whatever the renderer
/// recorded for that exact selector string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotPage {
    elements: Vec<SnapshotElement>,
    selectors: IndexMap<String, Vec<ElementId>>,
}

impl SnapshotPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_element(&mut self, tag: &str) -> ElementId {
        self.elements.push(SnapshotElement {
            tag: tag.to_ascii_lowercase(),
            ..SnapshotElement::default()
        });
        ElementId(self.elements.len() - 1)
    }

    pub fn set_style(&mut self, element: ElementId, property: &str, value: &str) -> &mut Self {
        if let Some(el) = self.elements.get_mut(element.0) {
            el.styles.insert(property.to_string(), value.to_string());
        }
        self
    }

    pub fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) -> &mut Self {
        if let Some(el) = self.elements.get_mut(element.0) {
            el.attributes.insert(name.to_string(), value.to_string());
        }
        self
    }

    pub fn set_metric(&mut self, element: ElementId, metric: Metric, value: f64) -> &mut Self {
        if let Some(el) = self.elements.get_mut(element.0) {
            el.metrics.insert(metric, value);
        }
        self
    }

    /// Record that `element` matches `selector`. Document order is the
    /// registration order.
    pub fn register(&mut self, selector: &str, element: ElementId) -> &mut Self {
        let matches = self.selectors.entry(selector.to_string()).or_default();
        if !matches.contains(&element) {
            matches.push(element);
        }
        self
    }

    fn element(&self, element: ElementId) -> Result<&SnapshotElement> {
        self.elements
            .get(element.0)
            .ok_or_else(|| anyhow!("element {} is not part of the snapshot", element.0))
    }
}

impl PageView for SnapshotPage {
    fn query(&self, selector: &str) -> Vec<ElementId> {
        self.selectors
            .get(selector)
            .map(|ids| {
                ids.iter()
                    .copied()
                    .filter(|id| id.0 < self.elements.len())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn computed_style(&self, element: ElementId, property: &str) -> Result<String> {
        self.element(element)?
            .styles
            .get(property)
            .cloned()
            .ok_or_else(|| anyhow!("no computed {property} recorded for element {}", element.0))
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.elements.get(element.0)?.attributes.get(name).cloned()
    }

    fn tag_name(&self, element: ElementId) -> Option<String> {
        self.elements.get(element.0).map(|el| el.tag.clone())
    }

    fn measure(&self, element: ElementId, metric: Metric) -> Result<f64> {
        self.element(element)?
            .metrics
            .get(&metric)
            .copied()
            .ok_or_else(|| anyhow!("no {metric:?} recorded for element {}", element.0))
    }
}

/// JSON document a renderer writes for one page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageCapture {
    pub source_url: String,
    #[serde(default)]
    pub markup: String,
    /// Screenshot file; relative paths resolve against the capture file.
    #[serde(default)]
    pub screenshot: Option<PathBuf>,
    #[serde(default)]
    pub pixel_colors: Vec<String>,
    #[serde(default)]
    pub css_colors: Option<Vec<String>>,
    #[serde(default)]
    pub computed_colors: Option<Vec<String>>,
    #[serde(default)]
    pub elements: Vec<SnapshotElement>,
    #[serde(default)]
    pub selectors: IndexMap<String, Vec<ElementId>>,
}

impl PageCapture {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read capture from {}", path.display()))?;
        let mut capture: PageCapture = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse capture {}", path.display()))?;

        if let (Some(shot), Some(dir)) = (capture.screenshot.as_mut(), path.parent()) {
            if shot.is_relative() {
                *shot = dir.join(&*shot);
            }
        }
        Ok(capture)
    }

    /// Split the capture into the signal set and the page view, filling any
    /// color source the renderer left out.
    pub fn into_inputs(self, config: &ExtractorConfig) -> (SignalSet, SnapshotPage) {
        let page = SnapshotPage {
            elements: self.elements,
            selectors: self.selectors,
        };

        let pixel = if self.pixel_colors.is_empty() {
            self.screenshot
                .as_deref()
                .map(|shot| pixels_from_screenshot(shot, config.dominant_color_count))
                .unwrap_or_default()
        } else {
            self.pixel_colors
        };

        let css = self
            .css_colors
            .unwrap_or_else(|| style_block_colors(&self.markup));

        let computed = self
            .computed_colors
            .unwrap_or_else(|| harvest_computed_colors(&page, config.computed_color_sample_cap));

        log_debug!(
            "capture {}: {} pixel, {} css, {} computed color samples",
            self.source_url,
            pixel.len(),
            css.len(),
            computed.len()
        );

        let signals = SignalSet::new(self.source_url, self.markup)
            .with_colors(RawColorSample::ranked(ColorSource::Pixel, pixel))
            .with_colors(RawColorSample::ranked(ColorSource::Css, css))
            .with_colors(RawColorSample::ranked(ColorSource::Computed, computed));

        (signals, page)
    }
}

fn pixels_from_screenshot(path: &Path, count: usize) -> Vec<String> {
    let result = fs::read(path)
        .with_context(|| format!("Failed to read screenshot {}", path.display()))
        .and_then(|bytes| dominant_colors(&bytes, count));

    match result {
        Ok(colors) => colors,
        Err(err) => {
            log_warn!("continuing without pixel colors: {err:#}");
            Vec::new()
        }
    }
}
