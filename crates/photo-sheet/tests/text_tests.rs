use image::{Rgba, RgbaImage};
use photo_sheet::*;

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

fn font() -> FontArc {
    font_from_bytes(include_bytes!("fonts/Tuffy.ttf").to_vec()).unwrap()
}

/// Bounding box (min_x, min_y, max_x, max_y) of pixels brighter than 128
fn bright_bounds(image: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
    image
        .enumerate_pixels()
        .filter(|(_, _, p)| p[0] > 128)
        .fold(None, |acc, (x, y, _)| match acc {
            None => Some((x, y, x, y)),
            Some((x0, y0, x1, y1)) => Some((x0.min(x), y0.min(y), x1.max(x), y1.max(y))),
        })
}

fn plain(text: &str) -> TextOverlay {
    TextOverlay {
        shadow: false,
        ..TextOverlay::new(text).with_font_size(60.0)
    }
}

#[test]
fn test_text_is_centered_on_anchor() {
    let image = RgbaImage::from_pixel(400, 200, BLACK);
    let out = apply_text(&image, &plain("HHH"), &font()).unwrap();
    assert_eq!(out.dimensions(), (400, 200));

    let (x0, y0, x1, y1) = bright_bounds(&out).expect("text was drawn");
    let cx = (x0 + x1) as f32 / 2.0;
    let cy = (y0 + y1) as f32 / 2.0;
    assert!((cx - 200.0).abs() < 8.0, "horizontal center {}", cx);
    assert!((60.0..140.0).contains(&cy), "vertical center {}", cy);

    // Corners untouched
    assert_eq!(*out.get_pixel(0, 0), BLACK);
    assert_eq!(*out.get_pixel(399, 199), BLACK);
}

#[test]
fn test_position_is_percent_of_size() {
    let image = RgbaImage::from_pixel(400, 200, BLACK);
    let overlay = plain("H").at(25.0, 50.0);
    let out = apply_text(&image, &overlay, &font()).unwrap();
    let (x0, _, x1, _) = bright_bounds(&out).expect("text was drawn");
    let cx = (x0 + x1) as f32 / 2.0;
    assert!((cx - 100.0).abs() < 8.0, "horizontal center {}", cx);
}

#[test]
fn test_font_scales_with_preview_width() {
    let image = RgbaImage::from_pixel(800, 400, BLACK);
    let natural = apply_text(&image, &plain("HH"), &font()).unwrap();
    let previewed = TextOverlay {
        display_width: Some(400.0),
        ..plain("HH")
    };
    let scaled = apply_text(&image, &previewed, &font()).unwrap();

    let width = |img: &RgbaImage| {
        let (x0, _, x1, _) = bright_bounds(img).expect("text was drawn");
        (x1 - x0) as f32
    };
    let ratio = width(&scaled) / width(&natural);
    assert!((1.8..2.2).contains(&ratio), "size ratio {}", ratio);
}

#[test]
fn test_shadow_darkens_below_right() {
    let image = RgbaImage::from_pixel(300, 150, WHITE);
    let without = apply_text(&image, &plain("HHH"), &font()).unwrap();
    assert_eq!(without, image);

    let shadowed = TextOverlay {
        shadow: true,
        ..plain("HHH")
    };
    let out = apply_text(&image, &shadowed, &font()).unwrap();
    let darkest = out.pixels().map(|p| p[0]).min().unwrap();
    assert!(darkest < 230, "darkest shadow pixel {}", darkest);
    assert!(out.pixels().all(|p| p[3] == 255));
}

#[test]
fn test_text_color() {
    let image = RgbaImage::from_pixel(300, 150, BLACK);
    let red = parse_hex_color("#ef4444").unwrap();
    let out = apply_text(&image, &plain("HHH").with_color(red), &font()).unwrap();
    let brightest = out.pixels().max_by_key(|p| p[0]).unwrap();
    assert!(brightest[0] >= 0xEE && brightest[1] <= 0x45 && brightest[2] <= 0x45);
}

#[test]
fn test_blank_text_leaves_image_unchanged() {
    let image = RgbaImage::from_pixel(50, 50, BLACK);
    let out = apply_text(&image, &TextOverlay::new(""), &font()).unwrap();
    assert_eq!(out, image);
}

#[test]
fn test_invalid_overlays_are_rejected() {
    let image = RgbaImage::from_pixel(50, 50, BLACK);
    let font = font();
    for overlay in [
        TextOverlay::new("x").at(150.0, 50.0),
        TextOverlay::new("x").at(50.0, f32::NAN),
        TextOverlay::new("x").with_font_size(0.0),
        TextOverlay {
            display_width: Some(0.0),
            ..TextOverlay::new("x")
        },
    ] {
        assert!(matches!(
            apply_text(&image, &overlay, &font),
            Err(SheetError::InvalidGeometry(GeometryError::InvalidArgument(_)))
        ));
    }
    assert!(apply_text(&RgbaImage::new(0, 0), &TextOverlay::default(), &font).is_err());
}

#[test]
fn test_invalid_font_bytes() {
    assert!(matches!(font_from_bytes(vec![1, 2, 3]), Err(SheetError::Font(_))));
}

#[test]
fn test_render_text_is_jpeg() {
    let image = RgbaImage::from_pixel(120, 80, Rgba([30, 60, 90, 255]));
    let bytes = render_text(&image, &TextOverlay::default(), &font()).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    assert_eq!(codec::decode(&bytes).unwrap().dimensions(), (120, 80));
}

#[cfg(feature = "serde")]
#[test]
fn test_overlay_from_partial_json() {
    let overlay: TextOverlay = serde_json::from_str(r#"{"text": "Hi", "x_percent": 20}"#).unwrap();
    assert_eq!(overlay.text, "Hi");
    assert_eq!(overlay.x_percent, 20.0);
    assert_eq!(overlay.y_percent, 50.0);
    assert!(overlay.shadow);
}
