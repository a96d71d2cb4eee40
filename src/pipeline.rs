use image::DynamicImage;

use crate::annotate;
use crate::vision::VisionContext;

/// Machine-readable category for a pipeline outcome, alongside the summary
/// text. Everything except `Classified` is a terminal failure for that one
/// request; nothing here is fatal to the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Classified,
    MissingInput,
    DetectorUnavailable,
    DetectionFailed,
    NoQualifyingDetection,
    ClassifierUnavailable,
    ClassificationFailed,
    EmptyClassification,
}

/// Result of one pipeline invocation.
///
/// `summary` is never empty. Which image variant comes back encodes how far
/// the pipeline got: `None` means no input, the untouched original means
/// detection never ran (or found nothing), the annotated copy means a box
/// was drawn before the failure.
pub struct Outcome {
    pub image: Option<DynamicImage>,
    pub summary: String,
    pub kind: OutcomeKind,
}

impl Outcome {
    fn new(kind: OutcomeKind, image: Option<DynamicImage>, summary: String) -> Self {
        Self { image, summary, kind }
    }

    pub fn is_classified(&self) -> bool {
        self.kind == OutcomeKind::Classified
    }
}

/// The whole demo: detect, pick the largest matching box, crop, classify,
/// annotate, summarise.
pub struct FruitPipeline {
    /// Object category the pipeline treats as relevant
    pub target_label: String,
    /// Detections at or below this confidence are ignored
    pub score_threshold: f32,
    /// Outline thickness in pixels
    pub stroke_width: u32,
    pub verbose: bool,
}

impl FruitPipeline {
    pub fn new() -> Self {
        Self {
            target_label: "apple".to_string(),
            score_threshold: 0.5,
            stroke_width: 5,
            verbose: false,
        }
    }

    pub fn with_target_label(mut self, label: impl Into<String>) -> Self {
        self.target_label = label.into();
        self
    }

    pub fn with_score_threshold(mut self, threshold: f32) -> Self {
        self.score_threshold = threshold;
        self
    }

    pub fn with_stroke_width(mut self, stroke_width: u32) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Run the full pipeline on one image.
    ///
    /// Never panics and never returns an error: every failure becomes an
    /// [`Outcome`] with a diagnostic summary and the best available image.
    pub fn process(&self, ctx: &VisionContext, input: Option<&DynamicImage>) -> Outcome {
        let Some(original) = input else {
            return Outcome::new(
                OutcomeKind::MissingInput,
                None,
                "Please upload an image.".to_string(),
            );
        };

        if !ctx.has_detector() {
            return Outcome::new(
                OutcomeKind::DetectorUnavailable,
                Some(original.clone()),
                "Error: the object detection model could not be loaded.".to_string(),
            );
        }

        // Copy to draw on; the input itself is never touched.
        let mut annotated = original.clone();

        if self.verbose {
            println!("Running object detection...");
        }

        let detections = match ctx.run_detector(original) {
            Some(Ok(detections)) => detections,
            Some(Err(e)) => {
                return Outcome::new(
                    OutcomeKind::DetectionFailed,
                    Some(original.clone()),
                    format!("An error occurred during object detection: {e:#}"),
                );
            }
            None => {
                return Outcome::new(
                    OutcomeKind::DetectorUnavailable,
                    Some(original.clone()),
                    "Error: the object detection model could not be loaded.".to_string(),
                );
            }
        };

        let qualifying: Vec<_> = detections
            .iter()
            .filter(|det| det.label == self.target_label && det.score > self.score_threshold)
            .collect();

        if self.verbose {
            println!(
                "{} of {} detections match '{}' above {:.2}",
                qualifying.len(),
                detections.len(),
                self.target_label,
                self.score_threshold
            );
        }

        let Some(&first) = qualifying.first() else {
            return Outcome::new(
                OutcomeKind::NoQualifyingDetection,
                Some(original.clone()),
                format!(
                    "No '{}' was detected in the image with sufficient confidence.",
                    self.target_label
                ),
            );
        };

        // Largest box wins; equal areas keep the earlier detection.
        let mut best = first;
        for &det in &qualifying[1..] {
            if det.bbox.area() > best.bbox.area() {
                best = det;
            }
        }

        let Some(rect) = best.bbox.to_pixels(original.width(), original.height()) else {
            // The box lies entirely outside the image; nothing to crop.
            return Outcome::new(
                OutcomeKind::NoQualifyingDetection,
                Some(original.clone()),
                format!(
                    "No '{}' was detected in the image with sufficient confidence.",
                    self.target_label
                ),
            );
        };

        if self.verbose {
            println!(
                "Selected box at ({}, {}) size {}x{} (area {:.0})",
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                best.bbox.area()
            );
        }

        annotate::draw_box(&mut annotated, &rect, self.stroke_width);
        let crop = annotate::crop_box(original, &rect);

        if !ctx.has_classifier() {
            // Detection ran, so the annotated copy comes back here -- unlike
            // the detector-absent case, which returns the untouched original.
            return Outcome::new(
                OutcomeKind::ClassifierUnavailable,
                Some(annotated),
                "Error: the classification model could not be loaded.".to_string(),
            );
        }

        if self.verbose {
            println!("Classifying cropped region ({}x{})...", crop.width(), crop.height());
        }

        let ranked = match ctx.run_classifier(&crop) {
            Some(Ok(ranked)) => ranked,
            Some(Err(e)) => {
                return Outcome::new(
                    OutcomeKind::ClassificationFailed,
                    Some(annotated),
                    format!("An error occurred while classifying the detected object: {e:#}"),
                );
            }
            None => {
                return Outcome::new(
                    OutcomeKind::ClassifierUnavailable,
                    Some(annotated),
                    "Error: the classification model could not be loaded.".to_string(),
                );
            }
        };

        // The classifier's own ordering contract makes the first entry the
        // best prediction; no re-sorting happens here.
        let Some(top) = ranked.first() else {
            return Outcome::new(
                OutcomeKind::EmptyClassification,
                Some(annotated),
                format!(
                    "A '{}' was detected, but the classifier returned no prediction.",
                    best.label
                ),
            );
        };

        let summary = format!(
            "Detected object (label: '{}', detection confidence: {:.2}, area: {:.0}).\n\n\
             Classified as: '{}' (classification confidence: {:.2}).",
            best.label,
            best.score,
            best.bbox.area(),
            top.label,
            top.score
        );

        Outcome::new(OutcomeKind::Classified, Some(annotated), summary)
    }
}

impl Default for FruitPipeline {
    fn default() -> Self {
        Self::new()
    }
}
