use image::{Rgba, RgbaImage};
use photo_sheet::*;

fn quadrants(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        match (x < width / 2, y < height / 2) {
            (true, true) => Rgba([255, 0, 0, 255]),
            (false, true) => Rgba([0, 255, 0, 255]),
            (true, false) => Rgba([0, 0, 255, 255]),
            (false, false) => Rgba([255, 255, 0, 255]),
        }
    })
}

#[test]
fn test_extract_crop_copies_region() {
    let image = quadrants(100, 100);
    let crop = extract_crop(&image, PixelRect::new(50, 0, 50, 50), 800).unwrap();
    assert_eq!(crop.dimensions(), (50, 50));
    assert!(crop.pixels().all(|p| p.0 == [0, 255, 0, 255]));
}

#[test]
fn test_extract_crop_bounds_output() {
    let image = RgbaImage::from_pixel(2000, 1000, Rgba([1, 2, 3, 255]));
    let crop = extract_crop(&image, PixelRect::new(0, 0, 1600, 1000), 800).unwrap();
    assert_eq!(crop.dimensions(), (800, 500));
}

#[test]
fn test_empty_rect_is_rejected() {
    let image = quadrants(10, 10);
    match extract_crop(&image, PixelRect::new(0, 0, 0, 5), 800) {
        Err(SheetError::InvalidGeometry(GeometryError::EmptyRect)) => {}
        other => panic!("Expected EmptyRect, got {:?}", other.map(|i| i.dimensions())),
    }
}

#[test]
fn test_out_of_bounds_rect_is_rejected() {
    let image = quadrants(10, 10);
    match extract_crop(&image, PixelRect::new(5, 5, 10, 2), 800) {
        Err(SheetError::InvalidGeometry(GeometryError::RectOutOfBounds {
            image_width,
            image_height,
            ..
        })) => assert_eq!((image_width, image_height), (10, 10)),
        other => panic!("Expected RectOutOfBounds, got {:?}", other.map(|i| i.dimensions())),
    }
}

#[test]
fn test_clamp_then_crop() {
    let image = quadrants(10, 10);
    let rect = PixelRect::new(5, 5, 10, 2).clamp_to(10, 10);
    assert_eq!(rect, PixelRect::new(5, 5, 5, 2));
    let crop = extract_crop(&image, rect, 800).unwrap();
    assert_eq!(crop.dimensions(), (5, 2));
}

#[test]
fn test_render_crop_is_jpeg() {
    let bytes = render_crop(&quadrants(40, 40), PixelRect::new(0, 0, 20, 20)).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    let decoded = codec::decode(&bytes).unwrap();
    assert_eq!(decoded.dimensions(), (20, 20));
}
