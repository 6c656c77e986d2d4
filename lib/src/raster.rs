//! The renderer: folds a value sequence through a color mapper into a square
//! raster, row-major from the top-left, black beyond the last value.

use std::path::Path;

use image::{Rgb, RgbImage};
use log::debug;

use crate::color::ColorMap;
use crate::error::{Chainable, Result};
use crate::metric::Measurement;

/// A rendered square image plus the measurements that produced it, still in
/// raster order. Linear index `i` sits at `(i % side, i / side)`; the viewer
/// inverts that mapping for its tooltip lookups.
#[derive(Debug)]
pub struct Raster {
    pub image: RgbImage,
    pub side: u32,
    pub samples: Vec<Measurement>,
}

/// Rasterize `samples` with `map`. The side is `ceil(sqrt(n))`; unused
/// trailing cells keep the black background. An empty sequence renders
/// nothing and returns `None`.
pub fn render(samples: Vec<Measurement>, map: ColorMap) -> Option<Raster> {
    if samples.is_empty() {
        return None;
    }

    let side = (samples.len() as f64).sqrt().ceil() as u32;
    let mut image = RgbImage::new(side, side);
    for (i, sample) in samples.iter().enumerate() {
        let x = i as u32 % side;
        let y = i as u32 / side;
        let value = sample.value.clamp(0.0, 1.0);
        image.put_pixel(x, y, Rgb(map.shade(value)));
    }

    debug!("rasterized {} values onto a {side}x{side} grid", samples.len());
    Some(Raster { image, side, samples })
}

impl Raster {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Write the raster to `path` as a lossless image; the format follows
    /// the file extension, PNG by default.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.image.save(path).chain_with(|| error! {
            "failed to write image",
            "path" => path.display(),
        })
    }
}

#[cfg(test)]
mod render_tests {
    use super::*;

    fn samples(values: &[f64]) -> Vec<Measurement> {
        values.iter()
            .enumerate()
            .map(|(i, &value)| Measurement { label: format!("w{i}"), value })
            .collect()
    }

    #[test]
    fn test_empty_renders_nothing() {
        assert!(render(vec![], ColorMap::Grayscale).is_none());
    }

    #[test]
    fn test_side_is_ceil_sqrt() {
        for (n, side) in [(1, 1), (2, 2), (4, 2), (5, 3), (9, 3), (10, 4)] {
            let raster = render(samples(&vec![0.5; n]), ColorMap::Grayscale).unwrap();
            assert_eq!(raster.side, side, "n = {n}");
            assert_eq!(raster.len(), n);
        }
    }

    #[test]
    fn test_row_major_layout() {
        // 5 values on a 3x3 grid: indexes 0..5 fill the first row and the
        // start of the second.
        let raster = render(samples(&[1.0; 5]), ColorMap::Grayscale).unwrap();
        for i in 0..5u32 {
            let pixel = raster.image.get_pixel(i % 3, i / 3);
            assert_eq!(pixel.0, [255, 255, 255]);
        }
    }

    #[test]
    fn test_padding_stays_black() {
        let raster = render(samples(&[1.0; 5]), ColorMap::Grayscale).unwrap();
        for i in 5..9u32 {
            assert_eq!(raster.image.get_pixel(i % 3, i / 3).0, [0, 0, 0]);
        }
    }

    #[test]
    fn test_values_clamped_before_mapping() {
        let raster = render(samples(&[-0.5, 1.5]), ColorMap::Grayscale).unwrap();
        assert_eq!(raster.image.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(raster.image.get_pixel(1, 0).0, [255, 255, 255]);
        // The raw measurement is preserved for the viewer.
        assert_eq!(raster.samples[1].value, 1.5);
    }
}
