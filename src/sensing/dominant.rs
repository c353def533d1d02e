use anyhow::{Context, Result};
use image::GenericImageView;
use std::collections::HashMap;

use crate::analysis::frequency::FrequencyTable;

/// Screenshots are downscaled to fit this box before bucketing.
const SAMPLE_EDGE_PX: u32 = 128;

/// Low bits dropped from each channel when bucketing (5 bits kept).
const CHANNEL_SHIFT: u8 = 3;

#[derive(Debug, Default, Clone, Copy)]
struct BucketSum {
    r: u64,
    g: u64,
    b: u64,
    n: u64,
}

/// Most common colors of an encoded screenshot, most prominent first, as
/// `rgb(r, g, b)` strings.
pub fn dominant_colors(encoded: &[u8], count: usize) -> Result<Vec<String>> {
    let img = image::load_from_memory(encoded).context("failed to decode screenshot")?;
    let (width, height) = img.dimensions();
    let sample = if width > SAMPLE_EDGE_PX || height > SAMPLE_EDGE_PX {
        img.thumbnail(SAMPLE_EDGE_PX, SAMPLE_EDGE_PX)
    } else {
        img
    };

    let mut buckets: FrequencyTable<(u8, u8, u8)> = FrequencyTable::new();
    let mut sums: HashMap<(u8, u8, u8), BucketSum> = HashMap::new();

    for pixel in sample.to_rgba8().pixels() {
        let [r, g, b, a] = pixel.0;
        if a == 0 {
            continue;
        }
        let key = (r >> CHANNEL_SHIFT, g >> CHANNEL_SHIFT, b >> CHANNEL_SHIFT);
        buckets.record(key);
        let sum = sums.entry(key).or_default();
        sum.r += u64::from(r);
        sum.g += u64::from(g);
        sum.b += u64::from(b);
        sum.n += 1;
    }

    Ok(buckets
        .top(count)
        .into_iter()
        .filter_map(|key| sums.get(&key))
        .map(|sum| {
            format!(
                "rgb({}, {}, {})",
                sum.r / sum.n,
                sum.g / sum.n,
                sum.b / sum.n
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode(img: &RgbaImage) -> Vec<u8> {
        let mut bytes = Cursor::new(Vec::new());
        img.write_to(&mut bytes, ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn ranks_colors_by_area() {
        let mut img = RgbaImage::from_pixel(10, 10, Rgba([255, 255, 255, 255]));
        for x in 0..10 {
            for y in 0..3 {
                img.put_pixel(x, y, Rgba([16, 32, 48, 255]));
            }
        }
        img.put_pixel(0, 9, Rgba([200, 0, 0, 0]));

        let colors = dominant_colors(&encode(&img), 10).unwrap();
        assert_eq!(colors, vec!["rgb(255, 255, 255)", "rgb(16, 32, 48)"]);
    }

    #[test]
    fn count_limits_output() {
        let img = RgbaImage::from_fn(4, 1, |x, _| Rgba([(x * 60) as u8, 0, 0, 255]));
        assert_eq!(dominant_colors(&encode(&img), 2).unwrap().len(), 2);
    }

    #[test]
    fn garbage_bytes_are_an_error() {
        assert!(dominant_colors(b"not an image", 5).is_err());
    }
}
