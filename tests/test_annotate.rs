mod common;

use common::{GREEN, solid_image};
use fruitspot::annotate::{crop_box, draw_box};
use fruitspot::models::{BoundingBox, PixelRect};

const BLUE: [u8; 4] = [0, 0, 255, 255];

#[test]
fn to_pixels_truncates_toward_zero() {
    let rect = BoundingBox::new(10.9, 10.2, 50.7, 50.99)
        .to_pixels(100, 100)
        .unwrap();
    assert_eq!(
        rect,
        PixelRect {
            x: 10,
            y: 10,
            width: 40,
            height: 40
        }
    );
}

#[test]
fn to_pixels_clamps_to_image() {
    let rect = BoundingBox::new(-5.0, -8.0, 120.0, 130.0)
        .to_pixels(100, 100)
        .unwrap();
    assert_eq!(
        rect,
        PixelRect {
            x: 0,
            y: 0,
            width: 100,
            height: 100
        }
    );
}

#[test]
fn to_pixels_rejects_degenerate_boxes() {
    assert!(BoundingBox::new(50.0, 50.0, 50.0, 60.0).to_pixels(100, 100).is_none());
    assert!(BoundingBox::new(200.0, 200.0, 300.0, 300.0).to_pixels(100, 100).is_none());
}

#[test]
fn bounding_box_area() {
    assert_eq!(BoundingBox::new(10.0, 10.0, 50.0, 50.0).area(), 1600.0);
    assert_eq!(BoundingBox::new(0.0, 0.0, 31.0, 31.0).area(), 961.0);
}

#[test]
fn stroke_stays_inside_the_rect() {
    let mut img = solid_image(100, 100, GREEN);
    let original = img.to_rgba8();
    let rect = PixelRect {
        x: 10,
        y: 10,
        width: 40,
        height: 40,
    };

    draw_box(&mut img, &rect, 5);

    let annotated = img.to_rgba8();
    for (x, y, pixel) in annotated.enumerate_pixels() {
        let inside = (10..50).contains(&x) && (10..50).contains(&y);
        if !inside {
            assert_eq!(pixel, original.get_pixel(x, y), "pixel ({x}, {y}) changed");
        }
    }
    // Outer ring and the innermost ring of a 5 px stroke
    assert_eq!(annotated.get_pixel(10, 10).0, BLUE);
    assert_eq!(annotated.get_pixel(14, 14).0, BLUE);
    assert_eq!(annotated.get_pixel(10, 30).0, BLUE);
    // Interior is untouched
    assert_eq!(annotated.get_pixel(15, 15), original.get_pixel(15, 15));
    assert_eq!(annotated.get_pixel(30, 30), original.get_pixel(30, 30));
}

#[test]
fn narrow_rect_does_not_overdraw() {
    let mut img = solid_image(100, 100, GREEN);
    let original = img.to_rgba8();
    let rect = PixelRect {
        x: 20,
        y: 20,
        width: 6,
        height: 6,
    };

    // Stroke wider than the rect can hold; rings stop once they collapse
    draw_box(&mut img, &rect, 5);

    let annotated = img.to_rgba8();
    for (x, y, pixel) in annotated.enumerate_pixels() {
        let inside = (20..26).contains(&x) && (20..26).contains(&y);
        if !inside {
            assert_eq!(pixel, original.get_pixel(x, y));
        }
    }
}

#[test]
fn crop_box_matches_rect_dimensions() {
    let img = solid_image(100, 100, GREEN);
    let rect = PixelRect {
        x: 10,
        y: 10,
        width: 40,
        height: 40,
    };
    let crop = crop_box(&img, &rect);
    assert_eq!((crop.width(), crop.height()), (40, 40));
}

#[test]
fn annotated_image_round_trips_through_png() -> anyhow::Result<()> {
    let mut img = solid_image(64, 64, GREEN);
    let rect = PixelRect {
        x: 8,
        y: 8,
        width: 32,
        height: 32,
    };
    draw_box(&mut img, &rect, 5);

    let file = tempfile::Builder::new().suffix(".png").tempfile()?;
    img.save(file.path())?;

    let reloaded = image::ImageReader::open(file.path())?.decode()?;
    assert_eq!((reloaded.width(), reloaded.height()), (64, 64));
    assert_eq!(reloaded.to_rgba8().get_pixel(8, 8).0, BLUE);
    Ok(())
}
