use std::path::Path;

use iced::widget::image::Handle;

use crate::pipeline::{FruitPipeline, Outcome};
use crate::vision::VisionContext;
use crate::vision::color_detector::ColorBlobParams;
use crate::vision::ripeness::RipenessParams;

pub struct AppState {
    ctx: VisionContext,
    pipeline: FruitPipeline,
    summary: String,
    annotated: Option<Handle>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            ctx: VisionContext::initialize(
                ColorBlobParams::default(),
                RipenessParams::default(),
                false,
            ),
            pipeline: FruitPipeline::new(),
            summary: String::new(),
            annotated: None,
        }
    }
}

impl AppState {
    /// Run the pipeline on the image at `path` and keep the outcome for the view.
    pub fn load_and_process(&mut self, path: &Path) {
        let decoded = image::ImageReader::open(path)
            .map_err(anyhow::Error::from)
            .and_then(|reader| reader.decode().map_err(anyhow::Error::from));

        let img = match decoded {
            Ok(img) => img,
            Err(e) => {
                self.summary = format!("Failed to load image: {e}");
                self.annotated = None;
                return;
            }
        };

        let outcome = self.pipeline.process(&self.ctx, Some(&img));
        self.apply(outcome);
    }

    fn apply(&mut self, outcome: Outcome) {
        self.summary = outcome.summary;
        self.annotated = outcome.image.map(|img| {
            let rgba = img.to_rgba8();
            let (width, height) = rgba.dimensions();
            Handle::from_rgba(width, height, rgba.into_raw())
        });
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn annotated_handle(&self) -> Option<Handle> {
        self.annotated.clone()
    }
}
