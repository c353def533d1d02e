use serde::{Deserialize, Serialize};

/// Version stamped into every schema's metadata.
pub const SCHEMA_VERSION: &str = "1.0";

/// Palette bounds and the colors injected when too few were observed.
pub const MAX_PALETTE_SIZE: usize = 10;
pub const MIN_PALETTE_SIZE: usize = 3;
pub const FALLBACK_PALETTE: [&str; 3] = ["#000000", "#ffffff", "#0000ff"];

/// Role defaults when the root element's colors cannot be read.
pub const DEFAULT_BACKGROUND: &str = "#ffffff";
pub const DEFAULT_TEXT: &str = "#000000";

/// Number of spacing values reported.
pub const SPACING_TOP_N: usize = 5;

/// More than this many grid/column elements means a grid system is in use.
pub const GRID_ELEMENT_THRESHOLD: usize = 3;

/// A utility class must occur more than this many times to be reported.
pub const UTILITY_MIN_OCCURRENCES: usize = 3;
pub const UTILITY_PATTERN_LIMIT: usize = 15;

/// Palette length thresholds for the contrast tags.
pub const HIGH_CONTRAST_MIN_PALETTE: usize = 6;
pub const MONOCHROMATIC_MAX_PALETTE: usize = 3;

/// Tunables for the extraction run. None of these change what a correct
/// result is; they bound how much the page is sampled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Body descendants sampled for margin/padding values.
    pub spacing_sample_cap: usize,

    /// Elements sampled when computed colors must be harvested from the page.
    pub computed_color_sample_cap: usize,

    /// Dominant colors taken from a screenshot.
    pub dominant_color_count: usize,

    /// Per-page limit in batch runs.
    pub capture_timeout_secs: u64,

    /// Run the site-type enhancer registered for the detected site type.
    pub apply_site_enhancers: bool,

    pub pretty_output: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            spacing_sample_cap: 50,
            computed_color_sample_cap: 100,
            dominant_color_count: 10,
            capture_timeout_secs: 30,
            apply_site_enhancers: true,
            pretty_output: true,
        }
    }
}
