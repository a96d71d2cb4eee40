#![allow(dead_code)]

pub mod stubs;

use image::{DynamicImage, ImageBuffer, Rgb};

pub const RED: [u8; 3] = [220, 30, 30];
pub const GREEN: [u8; 3] = [40, 200, 40];
pub const ORANGE: [u8; 3] = [255, 140, 0];
pub const WHITE: [u8; 3] = [255, 255, 255];

/// Solid-colour RGB test image.
pub fn solid_image(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(ImageBuffer::from_fn(width, height, |_, _| Rgb(color)))
}

/// White canvas with one filled coloured rectangle.
pub fn image_with_patch(
    width: u32,
    height: u32,
    patch: (u32, u32, u32, u32),
    color: [u8; 3],
) -> DynamicImage {
    let (px, py, pw, ph) = patch;
    DynamicImage::ImageRgb8(ImageBuffer::from_fn(width, height, |x, y| {
        if x >= px && x < px + pw && y >= py && y < py + ph {
            Rgb(color)
        } else {
            Rgb(WHITE)
        }
    }))
}

/// Pixel-for-pixel equality after normalising to RGBA.
pub fn images_equal(a: &DynamicImage, b: &DynamicImage) -> bool {
    a.to_rgba8() == b.to_rgba8()
}
