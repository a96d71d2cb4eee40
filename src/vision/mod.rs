pub mod color;
pub mod color_detector;
pub mod ripeness;

use std::sync::Mutex;

use image::DynamicImage;

use crate::models::{Classification, Detection};
use self::color_detector::{ColorBlobDetector, ColorBlobParams};
use self::ripeness::{RipenessClassifier, RipenessParams};

/// Produces labelled bounding boxes from an image. May fail per call.
pub trait Detector: Send {
    fn detect(&self, img: &DynamicImage) -> anyhow::Result<Vec<Detection>>;

    /// Human-readable name for this backend (used in verbose output)
    fn name(&self) -> &str;
}

/// Produces ranked label/confidence pairs from an image, best first.
/// An empty result means the backend had no prediction to offer.
pub trait Classifier: Send {
    fn classify(&self, img: &DynamicImage) -> anyhow::Result<Vec<Classification>>;

    /// Human-readable name for this backend (used in verbose output)
    fn name(&self) -> &str;
}

/// Holds the model handles for one process.
///
/// Each component is optional: a backend that fails to construct is recorded
/// as absent, and the pipeline reports the gap per request instead of the
/// process dying. The handles sit behind a `Mutex` each so concurrent
/// submissions serialise per model instance.
pub struct VisionContext {
    detector: Option<Mutex<Box<dyn Detector>>>,
    classifier: Option<Mutex<Box<dyn Classifier>>>,
}

impl VisionContext {
    /// A context with no components at all.
    pub fn empty() -> Self {
        Self {
            detector: None,
            classifier: None,
        }
    }

    /// Construct both built-in backends.
    ///
    /// Either construction may fail independently; the failure is reported
    /// and that component stays absent.
    pub fn initialize(
        detector_params: ColorBlobParams,
        classifier_params: RipenessParams,
        verbose: bool,
    ) -> Self {
        let detector = match ColorBlobDetector::new(detector_params) {
            Ok(d) => {
                if verbose {
                    println!("Detector ready: {}", d.name());
                }
                Some(Mutex::new(Box::new(d) as Box<dyn Detector>))
            }
            Err(e) => {
                eprintln!("Failed to initialize the detector: {e:#}");
                None
            }
        };

        let classifier = match RipenessClassifier::new(classifier_params) {
            Ok(c) => {
                if verbose {
                    println!("Classifier ready: {}", c.name());
                }
                Some(Mutex::new(Box::new(c) as Box<dyn Classifier>))
            }
            Err(e) => {
                eprintln!("Failed to initialize the classifier: {e:#}");
                None
            }
        };

        Self { detector, classifier }
    }

    /// Inject a detector implementation (replaces any existing one).
    pub fn with_detector(mut self, detector: Box<dyn Detector>) -> Self {
        self.detector = Some(Mutex::new(detector));
        self
    }

    /// Inject a classifier implementation (replaces any existing one).
    pub fn with_classifier(mut self, classifier: Box<dyn Classifier>) -> Self {
        self.classifier = Some(Mutex::new(classifier));
        self
    }

    pub fn has_detector(&self) -> bool {
        self.detector.is_some()
    }

    pub fn has_classifier(&self) -> bool {
        self.classifier.is_some()
    }

    pub(crate) fn run_detector(
        &self,
        img: &DynamicImage,
    ) -> Option<anyhow::Result<Vec<Detection>>> {
        self.detector.as_ref().map(|slot| {
            let guard = match slot.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard.detect(img)
        })
    }

    pub(crate) fn run_classifier(
        &self,
        img: &DynamicImage,
    ) -> Option<anyhow::Result<Vec<Classification>>> {
        self.classifier.as_ref().map(|slot| {
            let guard = match slot.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard.classify(img)
        })
    }
}

impl Default for VisionContext {
    fn default() -> Self {
        Self::empty()
    }
}
