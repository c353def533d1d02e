//! Raw signals handed over by the page renderer.
//!
//! Produced once per page and consumed read-only by the analyzers.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ColorSource {
    /// Dominant color of the rendered pixel buffer.
    Pixel,
    /// Literal value authored in a stylesheet.
    Css,
    /// Post-cascade value read from a live element.
    Computed,
}

impl ColorSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorSource::Pixel => "pixel",
            ColorSource::Css => "css",
            ColorSource::Computed => "computed",
        }
    }
}

/// One color observation in RGB-like form, not yet normalized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawColorSample {
    pub source: ColorSource,
    pub hex: Option<String>,
    /// Position in the source's ordering; 0 is the most prominent.
    pub saliency_rank: u32,
}

impl RawColorSample {
    pub fn new(source: ColorSource, hex: Option<String>, saliency_rank: u32) -> Self {
        Self {
            source,
            hex,
            saliency_rank,
        }
    }

    /// Build samples for one source, ranking them by their position in `values`.
    pub fn ranked<I, S>(source: ColorSource, values: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        values
            .into_iter()
            .enumerate()
            .map(|(rank, value)| Self::new(source, Some(value.into()), rank as u32))
            .collect()
    }
}

/// Everything the core needs about one page besides the live `PageView`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignalSet {
    pub source_url: String,
    pub markup: String,
    pub color_samples: Vec<RawColorSample>,
}

impl SignalSet {
    pub fn new(source_url: impl Into<String>, markup: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            markup: markup.into(),
            color_samples: Vec::new(),
        }
    }

    pub fn with_colors(mut self, samples: Vec<RawColorSample>) -> Self {
        self.color_samples.extend(samples);
        self
    }

    /// Samples of one source. Pixel samples are ordered by saliency rank;
    /// the sort is stable so equal ranks keep their collection order.
    pub fn samples_from(&self, source: ColorSource) -> Vec<&RawColorSample> {
        let mut samples: Vec<&RawColorSample> = self
            .color_samples
            .iter()
            .filter(|s| s.source == source)
            .collect();
        if source == ColorSource::Pixel {
            samples.sort_by_key(|s| s.saliency_rank);
        }
        samples
    }
}
