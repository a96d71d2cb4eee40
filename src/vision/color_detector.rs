use std::collections::BTreeMap;

use anyhow::bail;
use image::{DynamicImage, GrayImage, Luma, RgbImage};
use imageproc::filter::gaussian_blur_f32;
use imageproc::region_labelling::{Connectivity, connected_components};

use crate::models::{BoundingBox, Detection};
use crate::vision::Detector;
use crate::vision::color::rgb_to_hsv;

/// Tuning for the colour-blob detector.
#[derive(Debug, Clone)]
pub struct ColorBlobParams {
    /// Minimum channel spread (max - min) for a pixel to count as fruit-coloured
    pub saturation_threshold: u8,
    /// Minimum brightest channel for a pixel to count (rejects near-black noise)
    pub value_threshold: u8,
    /// Regions with fewer mask pixels than this are discarded
    pub min_region_area: u32,
    /// Blur applied to the mask before labelling, smooths speckle
    pub blur_sigma: f32,
}

impl Default for ColorBlobParams {
    fn default() -> Self {
        Self {
            saturation_threshold: 60,
            value_threshold: 40,
            min_region_area: 400,
            blur_sigma: 1.5,
        }
    }
}

/// Built-in detector: finds saturated colour blobs and labels them by hue.
///
/// A stand-in for a pretrained object detector with the same interface. It is
/// deterministic, which keeps the demo and its tests reproducible.
pub struct ColorBlobDetector {
    params: ColorBlobParams,
}

impl ColorBlobDetector {
    pub fn new(params: ColorBlobParams) -> anyhow::Result<Self> {
        if params.min_region_area == 0 {
            bail!("min_region_area must be positive");
        }
        if !(params.blur_sigma > 0.0) {
            bail!("blur_sigma must be positive, got {}", params.blur_sigma);
        }
        if params.saturation_threshold == 0 {
            bail!("saturation_threshold of 0 would mark every pixel as fruit");
        }
        Ok(Self { params })
    }

    /// Binary mask of fruit-coloured pixels.
    fn saturation_mask(&self, rgb: &RgbImage) -> GrayImage {
        GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
            let p = rgb.get_pixel(x, y);
            let max = p[0].max(p[1]).max(p[2]);
            let min = p[0].min(p[1]).min(p[2]);
            let saturated = max - min >= self.params.saturation_threshold;
            let bright_enough = max >= self.params.value_threshold;
            if saturated && bright_enough {
                Luma([255u8])
            } else {
                Luma([0u8])
            }
        })
    }
}

/// Running statistics for one labelled region.
struct RegionStats {
    min_x: u32,
    min_y: u32,
    max_x: u32,
    max_y: u32,
    count: u32,
    sum_r: u64,
    sum_g: u64,
    sum_b: u64,
}

impl Detector for ColorBlobDetector {
    fn detect(&self, img: &DynamicImage) -> anyhow::Result<Vec<Detection>> {
        let rgb = img.to_rgb8();
        if rgb.width() == 0 || rgb.height() == 0 {
            return Ok(Vec::new());
        }

        let mask = self.saturation_mask(&rgb);
        let blurred = gaussian_blur_f32(&mask, self.params.blur_sigma);
        let binary = GrayImage::from_fn(blurred.width(), blurred.height(), |x, y| {
            if blurred.get_pixel(x, y)[0] >= 128 {
                Luma([255u8])
            } else {
                Luma([0u8])
            }
        });

        let labeled = connected_components(&binary, Connectivity::Eight, Luma([0u8]));

        // BTreeMap keyed by component label keeps scan order deterministic.
        let mut regions: BTreeMap<u32, RegionStats> = BTreeMap::new();
        for (x, y, label) in labeled.enumerate_pixels() {
            let label_val = label[0];
            if label_val == 0 {
                continue; // background
            }

            let p = rgb.get_pixel(x, y);
            regions
                .entry(label_val)
                .and_modify(|stats| {
                    stats.min_x = stats.min_x.min(x);
                    stats.min_y = stats.min_y.min(y);
                    stats.max_x = stats.max_x.max(x);
                    stats.max_y = stats.max_y.max(y);
                    stats.count += 1;
                    stats.sum_r += p[0] as u64;
                    stats.sum_g += p[1] as u64;
                    stats.sum_b += p[2] as u64;
                })
                .or_insert(RegionStats {
                    min_x: x,
                    min_y: y,
                    max_x: x,
                    max_y: y,
                    count: 1,
                    sum_r: p[0] as u64,
                    sum_g: p[1] as u64,
                    sum_b: p[2] as u64,
                });
        }

        let detections = regions
            .into_values()
            .filter(|stats| stats.count >= self.params.min_region_area)
            .map(|stats| {
                let mean_r = (stats.sum_r / stats.count as u64) as u8;
                let mean_g = (stats.sum_g / stats.count as u64) as u8;
                let mean_b = (stats.sum_b / stats.count as u64) as u8;
                let (hue, _, _) = rgb_to_hsv(mean_r, mean_g, mean_b);

                let width = stats.max_x - stats.min_x + 1;
                let height = stats.max_y - stats.min_y + 1;
                let fill_ratio = stats.count as f32 / (width as f32 * height as f32);

                Detection {
                    label: label_for_hue(hue).to_string(),
                    score: fill_ratio.min(1.0),
                    bbox: BoundingBox::new(
                        stats.min_x as f32,
                        stats.min_y as f32,
                        (stats.max_x + 1) as f32,
                        (stats.max_y + 1) as f32,
                    ),
                }
            })
            .collect();

        Ok(detections)
    }

    fn name(&self) -> &str {
        "color-blob"
    }
}

/// Map a dominant hue to a fruit category.
fn label_for_hue(hue: f32) -> &'static str {
    match hue {
        h if h < 25.0 || h >= 330.0 => "apple",
        h if h < 45.0 => "orange",
        h if h < 75.0 => "banana",
        h if h < 170.0 => "apple", // green fruit
        _ => "plum",
    }
}
