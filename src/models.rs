/// Axis-aligned bounding box in pixel coordinates.
///
/// Detectors report float coordinates with `xmin <= xmax` and `ymin <= ymax`.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    pub xmin: f32,
    pub ymin: f32,
    pub xmax: f32,
    pub ymax: f32,
}

impl BoundingBox {
    pub fn new(xmin: f32, ymin: f32, xmax: f32, ymax: f32) -> Self {
        Self { xmin, ymin, xmax, ymax }
    }

    pub fn width(&self) -> f32 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f32 {
        self.ymax - self.ymin
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Convert to an integer rectangle for drawing and cropping.
    ///
    /// Coordinates are truncated toward zero and clamped to the image, so
    /// drawing and cropping can never disagree on where the box is. Returns
    /// `None` when the clamped box has no pixels.
    pub fn to_pixels(&self, img_width: u32, img_height: u32) -> Option<PixelRect> {
        let x = (self.xmin.max(0.0) as u32).min(img_width);
        let y = (self.ymin.max(0.0) as u32).min(img_height);
        let x_end = (self.xmax.max(0.0) as u32).min(img_width);
        let y_end = (self.ymax.max(0.0) as u32).min(img_height);

        if x_end <= x || y_end <= y {
            return None;
        }

        Some(PixelRect {
            x,
            y,
            width: x_end - x,
            height: y_end - y,
        })
    }
}

/// Integer rectangle inside an image, produced by [`BoundingBox::to_pixels`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// One labelled bounding box reported by a detector.
#[derive(Debug, Clone)]
pub struct Detection {
    pub label: String,
    /// Confidence in [0, 1]
    pub score: f32,
    pub bbox: BoundingBox,
}

/// One ranked label reported by a classifier.
#[derive(Debug, Clone)]
pub struct Classification {
    pub label: String,
    /// Confidence in [0, 1]
    pub score: f32,
}
