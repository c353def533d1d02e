//! Read-only view of a rendered page, supplied by the renderer.

pub mod snapshot;

pub use snapshot::{PageCapture, SnapshotElement, SnapshotPage};

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Opaque handle to an element of the rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    ClientWidth,
    ClientHeight,
    BoundingHeight,
}

/// Capabilities the analyzers need from a rendered page.
///
/// Reads may fail at any point (stale elements, renderer timeouts); callers
/// treat a failure as a missing value.
pub trait PageView {
    /// Elements matching `selector`, in document order.
    fn query(&self, selector: &str) -> Vec<ElementId>;

    /// Post-cascade value of a kebab-case CSS property.
    fn computed_style(&self, element: ElementId, property: &str) -> Result<String>;

    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;

    /// Lowercase tag name.
    fn tag_name(&self, element: ElementId) -> Option<String>;

    fn measure(&self, element: ElementId, metric: Metric) -> Result<f64>;

    fn first(&self, selector: &str) -> Option<ElementId> {
        self.query(selector).into_iter().next()
    }

    /// The element whose computed style defines page-level defaults.
    fn root(&self) -> Option<ElementId> {
        self.first("body")
    }
}
