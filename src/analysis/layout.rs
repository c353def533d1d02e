use crate::analysis::config::{GRID_ELEMENT_THRESHOLD, SPACING_TOP_N};
use crate::analysis::frequency::FrequencyTable;
use crate::models::{LayoutProfile, PageDimensions};
use crate::page::{Metric, PageView};
use crate::utils::css::is_nonzero_length;

/// Structural containers, semantic ones first.
const CONTAINER_SELECTORS: &[&str] = &[
    "main",
    "[role='main']",
    "#main",
    ".main",
    "#content",
    ".content",
    ".container",
    "#container",
    ".wrapper",
    "#wrapper",
];

const GRID_SELECTOR: &str = ".row, .grid, .columns, [class*='grid-'], [class*='col-'], \
                             [class*='span-'], [class*='uk-grid']";

const SPACING_SAMPLE_SELECTOR: &str = "body *";
const SPACING_PROPERTIES: [&str; 2] = ["margin-bottom", "padding-top"];

/// Page geometry, grid usage and the page's spacing vocabulary.
pub fn analyze_layout(page: &dyn PageView, spacing_sample_cap: usize) -> LayoutProfile {
    LayoutProfile {
        page_dimensions: page_dimensions(page),
        container_width: container_width(page),
        has_grid_system: page.query(GRID_SELECTOR).len() > GRID_ELEMENT_THRESHOLD,
        common_spacing_units: rank_spacing(spacing_samples(page, spacing_sample_cap)),
    }
}

fn page_dimensions(page: &dyn PageView) -> PageDimensions {
    let Some(root) = page.root() else {
        return PageDimensions::default();
    };
    PageDimensions {
        width: page.measure(root, Metric::ClientWidth).ok(),
        height: page.measure(root, Metric::ClientHeight).ok(),
    }
}

/// Width of the first element matched by the first matching container
/// selector.
fn container_width(page: &dyn PageView) -> Option<f64> {
    let element = CONTAINER_SELECTORS
        .iter()
        .find_map(|selector| page.first(selector))?;
    page.measure(element, Metric::ClientWidth).ok()
}

/// Margin/padding values of the first `cap` body descendants, in sampling
/// order. Unreadable values are skipped.
fn spacing_samples(page: &dyn PageView, cap: usize) -> Vec<String> {
    page.query(SPACING_SAMPLE_SELECTOR)
        .into_iter()
        .take(cap)
        .flat_map(|element| {
            SPACING_PROPERTIES
                .iter()
                .filter_map(move |property| page.computed_style(element, property).ok())
        })
        .collect()
}

/// Most common non-zero lengths, ties broken by first occurrence.
pub fn rank_spacing<I, S>(samples: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    samples
        .into_iter()
        .map(|value| value.as_ref().trim().to_string())
        .filter(|value| is_nonzero_length(value))
        .collect::<FrequencyTable<String>>()
        .top(SPACING_TOP_N)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::SnapshotPage;

    #[test]
    fn ranks_by_count_then_first_seen() {
        assert_eq!(
            rank_spacing(["8px", "8px", "16px", "8px", "4px"]),
            vec!["8px", "16px", "4px"]
        );
    }

    #[test]
    fn drops_zero_and_unreadable_lengths() {
        assert_eq!(
            rank_spacing(["0px", "auto", "", "0", "12px", "0.0em"]),
            vec!["12px"]
        );
    }

    #[test]
    fn keeps_at_most_five_values() {
        let samples = ["1px", "2px", "3px", "4px", "5px", "6px", "6px"];
        assert_eq!(
            rank_spacing(samples),
            vec!["6px", "1px", "2px", "3px", "4px"]
        );
    }

    #[test]
    fn samples_margin_then_padding_within_cap() {
        let mut page = SnapshotPage::new();
        for (margin, padding) in [("8px", "16px"), ("16px", "0px"), ("24px", "24px")] {
            let el = page.add_element("div");
            page.register(SPACING_SAMPLE_SELECTOR, el)
                .set_style(el, "margin-bottom", margin)
                .set_style(el, "padding-top", padding);
        }
        assert_eq!(spacing_samples(&page, 2), vec!["8px", "16px", "16px", "0px"]);

        let layout = analyze_layout(&page, 50);
        assert_eq!(layout.common_spacing_units, vec!["16px", "24px", "8px"]);
    }

    #[test]
    fn container_uses_first_matching_selector() {
        let mut page = SnapshotPage::new();
        let wrapper = page.add_element("div");
        let content = page.add_element("div");
        page.register(".wrapper", wrapper)
            .register(".content", content)
            .set_metric(wrapper, Metric::ClientWidth, 1400.0)
            .set_metric(content, Metric::ClientWidth, 960.0);
        assert_eq!(container_width(&page), Some(960.0));
        assert_eq!(container_width(&SnapshotPage::new()), None);
    }

    #[test]
    fn grid_requires_more_than_threshold() {
        let mut page = SnapshotPage::new();
        for _ in 0..GRID_ELEMENT_THRESHOLD {
            let el = page.add_element("div");
            page.register(GRID_SELECTOR, el);
        }
        assert!(!analyze_layout(&page, 50).has_grid_system);

        let extra = page.add_element("div");
        page.register(GRID_SELECTOR, extra);
        assert!(analyze_layout(&page, 50).has_grid_system);
    }

    #[test]
    fn dimensions_come_from_root() {
        let mut page = SnapshotPage::new();
        let body = page.add_element("body");
        page.register("body", body)
            .set_metric(body, Metric::ClientWidth, 1920.0);
        let dims = analyze_layout(&page, 50).page_dimensions;
        assert_eq!(dims.width, Some(1920.0));
        assert_eq!(dims.height, None);
    }
}
