use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::bail;
use image::DynamicImage;

use fruitspot::models::{BoundingBox, Classification, Detection};
use fruitspot::vision::{Classifier, Detector};

pub fn detection(label: &str, score: f32, bbox: (f32, f32, f32, f32)) -> Detection {
    Detection {
        label: label.to_string(),
        score,
        bbox: BoundingBox::new(bbox.0, bbox.1, bbox.2, bbox.3),
    }
}

pub fn classification(label: &str, score: f32) -> Classification {
    Classification {
        label: label.to_string(),
        score,
    }
}

/// Detector stand-in that returns a scripted list and counts invocations.
pub struct ScriptedDetector {
    detections: Vec<Detection>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedDetector {
    pub fn new(detections: Vec<Detection>) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                detections,
                calls: calls.clone(),
            },
            calls,
        )
    }
}

impl Detector for ScriptedDetector {
    fn detect(&self, _img: &DynamicImage) -> anyhow::Result<Vec<Detection>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.detections.clone())
    }

    fn name(&self) -> &str {
        "scripted-detector"
    }
}

/// Detector stand-in whose call always fails.
pub struct FailingDetector;

impl Detector for FailingDetector {
    fn detect(&self, _img: &DynamicImage) -> anyhow::Result<Vec<Detection>> {
        bail!("detector backend exploded")
    }

    fn name(&self) -> &str {
        "failing-detector"
    }
}

/// Classifier stand-in that returns a scripted ranking, counts invocations
/// and records the dimensions of every crop it is handed.
pub struct ScriptedClassifier {
    results: Vec<Classification>,
    calls: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<(u32, u32)>>>,
}

impl ScriptedClassifier {
    pub fn new(
        results: Vec<Classification>,
    ) -> (Self, Arc<AtomicUsize>, Arc<Mutex<Vec<(u32, u32)>>>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                results,
                calls: calls.clone(),
                seen: seen.clone(),
            },
            calls,
            seen,
        )
    }
}

impl Classifier for ScriptedClassifier {
    fn classify(&self, img: &DynamicImage) -> anyhow::Result<Vec<Classification>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .expect("seen-sizes lock poisoned")
            .push((img.width(), img.height()));
        Ok(self.results.clone())
    }

    fn name(&self) -> &str {
        "scripted-classifier"
    }
}

/// Classifier stand-in whose call always fails.
pub struct FailingClassifier;

impl Classifier for FailingClassifier {
    fn classify(&self, _img: &DynamicImage) -> anyhow::Result<Vec<Classification>> {
        bail!("classifier backend exploded")
    }

    fn name(&self) -> &str {
        "failing-classifier"
    }
}

/// Classifier stand-in that runs but never has a prediction.
pub struct EmptyClassifier;

impl Classifier for EmptyClassifier {
    fn classify(&self, _img: &DynamicImage) -> anyhow::Result<Vec<Classification>> {
        Ok(Vec::new())
    }

    fn name(&self) -> &str {
        "empty-classifier"
    }
}
