use image::{DynamicImage, Rgba};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::models::PixelRect;

const BOX_COLOR: Rgba<u8> = Rgba([0, 0, 255, 255]);

/// Draw a blue box outline onto the image.
///
/// The stroke is built from 1-px hollow rectangles inset inward from `rect`,
/// so no painted pixel ever lands outside the box.
pub fn draw_box(img: &mut DynamicImage, rect: &PixelRect, stroke_width: u32) {
    let mut canvas = img.to_rgba8();

    for inset in 0..stroke_width {
        let width = rect.width.saturating_sub(2 * inset);
        let height = rect.height.saturating_sub(2 * inset);
        if width == 0 || height == 0 {
            break;
        }
        let ring = Rect::at((rect.x + inset) as i32, (rect.y + inset) as i32)
            .of_size(width, height);
        draw_hollow_rect_mut(&mut canvas, ring, BOX_COLOR);
    }

    *img = DynamicImage::ImageRgba8(canvas);
}

/// Crop the image to the box. Callers pass the untouched original here, never
/// the annotated copy, so the classifier sees no drawn pixels.
pub fn crop_box(img: &DynamicImage, rect: &PixelRect) -> DynamicImage {
    img.crop_imm(rect.x, rect.y, rect.width, rect.height)
}
