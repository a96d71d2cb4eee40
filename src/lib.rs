pub mod annotate;
pub mod models;
pub mod pipeline;
pub mod vision;

pub use models::{BoundingBox, Classification, Detection, PixelRect};
pub use pipeline::{FruitPipeline, Outcome, OutcomeKind};
pub use vision::{Classifier, Detector, VisionContext};

#[cfg(feature = "gui")]
pub mod gui;
