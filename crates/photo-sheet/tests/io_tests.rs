use image::{Rgba, RgbaImage};
use photo_sheet::*;

#[tokio::test]
async fn test_save_and_load_image() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("subject.png");

    let image = RgbaImage::from_pixel(12, 9, Rgba([40, 80, 120, 255]));
    let png = codec::encode_png(&image).unwrap();
    save_bytes(&png, &path).await.unwrap();

    let loaded = load_image(&path).await.unwrap();
    assert_eq!(loaded, image);
}

#[tokio::test]
async fn test_load_images_keeps_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut paths = Vec::new();
    for (i, shade) in [10u8, 20, 30].into_iter().enumerate() {
        let path = dir.path().join(format!("{}.png", i));
        let png =
            codec::encode_png(&RgbaImage::from_pixel(2, 2, Rgba([shade, 0, 0, 255]))).unwrap();
        save_bytes(&png, &path).await.unwrap();
        paths.push(path);
    }

    let images = load_images(&paths).await.unwrap();
    let shades: Vec<u8> = images.iter().map(|img| img.get_pixel(0, 0)[0]).collect();
    assert_eq!(shades, vec![10, 20, 30]);
}

#[tokio::test]
async fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_image(dir.path().join("missing.png")).await;
    assert!(matches!(result, Err(SheetError::Io(_))));
}

#[tokio::test]
async fn test_load_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrupt.jpg");
    save_bytes(b"not a jpeg", &path).await.unwrap();
    assert!(matches!(load_image(&path).await, Err(SheetError::Decode(_))));
}

#[tokio::test]
async fn test_load_data_url() {
    let image = RgbaImage::from_pixel(3, 3, Rgba([5, 6, 7, 255]));
    let url = codec::to_data_url(&codec::encode_png(&image).unwrap(), "image/png");
    let loaded = io::load_data_url(url).await.unwrap();
    assert_eq!(loaded, image);
}

#[tokio::test]
async fn test_load_font() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fonts/Tuffy.ttf");
    assert!(load_font(&path).await.is_ok());

    let dir = tempfile::tempdir().unwrap();
    let bogus = dir.path().join("bogus.ttf");
    save_bytes(b"not a font", &bogus).await.unwrap();
    assert!(matches!(load_font(&bogus).await, Err(SheetError::Font(_))));
}
