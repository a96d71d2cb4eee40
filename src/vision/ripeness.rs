use anyhow::bail;
use image::DynamicImage;

use crate::models::Classification;
use crate::vision::Classifier;
use crate::vision::color::{hue_distance, rgb_to_hsv};

const RIPE_HUE: f32 = 0.0; // red
const UNRIPE_HUE: f32 = 120.0; // green
const OVERRIPE_HUE: f32 = 30.0; // brown

/// Tuning for the ripeness classifier.
#[derive(Debug, Clone)]
pub struct RipenessParams {
    /// Pixels with channel spread below this are treated as background and
    /// excluded from the colour average
    pub saturation_floor: u8,
}

impl Default for RipenessParams {
    fn default() -> Self {
        Self { saturation_floor: 30 }
    }
}

/// Built-in classifier: scores a crop against ripeness prototypes by its
/// average colour. Results are returned best-first with normalised scores.
///
/// Like [`super::color_detector::ColorBlobDetector`], a deterministic
/// stand-in for a pretrained model behind the same interface.
pub struct RipenessClassifier {
    params: RipenessParams,
}

impl RipenessClassifier {
    pub fn new(params: RipenessParams) -> anyhow::Result<Self> {
        if params.saturation_floor > 200 {
            bail!(
                "saturation_floor {} would exclude every plausible fruit colour",
                params.saturation_floor
            );
        }
        Ok(Self { params })
    }

    /// Mean colour of the crop, preferring saturated (non-background) pixels.
    fn mean_color(&self, rgb: &image::RgbImage) -> (u8, u8, u8) {
        let mut sums = (0u64, 0u64, 0u64);
        let mut count = 0u64;

        for p in rgb.pixels() {
            let max = p[0].max(p[1]).max(p[2]);
            let min = p[0].min(p[1]).min(p[2]);
            if max - min >= self.params.saturation_floor {
                sums.0 += p[0] as u64;
                sums.1 += p[1] as u64;
                sums.2 += p[2] as u64;
                count += 1;
            }
        }

        // Nothing saturated in the crop: fall back to the full average.
        if count == 0 {
            for p in rgb.pixels() {
                sums.0 += p[0] as u64;
                sums.1 += p[1] as u64;
                sums.2 += p[2] as u64;
                count += 1;
            }
        }

        (
            (sums.0 / count) as u8,
            (sums.1 / count) as u8,
            (sums.2 / count) as u8,
        )
    }
}

impl Classifier for RipenessClassifier {
    fn classify(&self, img: &DynamicImage) -> anyhow::Result<Vec<Classification>> {
        let rgb = img.to_rgb8();
        if rgb.width() == 0 || rgb.height() == 0 {
            return Ok(Vec::new());
        }

        let (r, g, b) = self.mean_color(&rgb);
        let (hue, _, value) = rgb_to_hsv(r, g, b);

        let ripe = 1.0 - hue_distance(hue, RIPE_HUE) / 180.0;
        let unripe = 1.0 - hue_distance(hue, UNRIPE_HUE) / 180.0;
        // Overripe fruit reads as dark and brownish.
        let overripe =
            0.7 * (1.0 - value) + 0.3 * (1.0 - hue_distance(hue, OVERRIPE_HUE) / 180.0);

        let total = ripe + unripe + overripe;
        let mut ranked = vec![
            Classification {
                label: "ripe".to_string(),
                score: ripe / total,
            },
            Classification {
                label: "unripe".to_string(),
                score: unripe / total,
            },
            Classification {
                label: "overripe".to_string(),
                score: overripe / total,
            },
        ];

        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(ranked)
    }

    fn name(&self) -> &str {
        "ripeness-prototype"
    }
}
