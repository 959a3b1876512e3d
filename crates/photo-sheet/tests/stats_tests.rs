use image::RgbaImage;
use photo_sheet::*;

fn request(subjects: usize, quantity: Quantity) -> SheetRequest {
    let subjects = (0..subjects).map(|_| RgbaImage::new(10, 10)).collect();
    SheetRequest::new(subjects, PaperSize::FourBySix, PhotoSize::Eu35x45).with_quantity(quantity)
}

#[test]
fn test_stats_passport_sheet() {
    let config = PrintConfig::default();
    let layout = request(1, Quantity::Max).layout(&config).unwrap();
    let stats = calculate_statistics(&layout, 1);

    assert_eq!((stats.cols, stats.rows, stats.capacity), (2, 3, 6));
    assert_eq!(stats.copies, 6);
    assert_eq!(stats.empty_slots, 0);
    assert_eq!(stats.copies_per_subject, vec![6]);
    assert_eq!(stats.paper_px, (1200, 1800));
    assert_eq!(stats.slot_px, (413, 531));
}

#[test]
fn test_stats_round_robin_counts() {
    let config = PrintConfig::default();
    let layout = request(4, Quantity::Count(5)).layout(&config).unwrap();
    let stats = calculate_statistics(&layout, 4);

    assert_eq!(stats.copies, 5);
    assert_eq!(stats.empty_slots, 1);
    assert_eq!(stats.copies_per_subject, vec![2, 1, 1, 1]);
}

#[test]
fn test_stats_clamps_to_capacity() {
    let config = PrintConfig::default();
    let layout = request(1, Quantity::Count(8)).layout(&config).unwrap();
    let stats = calculate_statistics(&layout, 1);
    assert_eq!(stats.copies, 6);
    assert_eq!(stats.empty_slots, 0);
}

#[test]
fn test_capacity_statistics() {
    let stats =
        capacity_statistics(PaperSize::FourBySix, PhotoSize::Eu35x45, &PrintConfig::default())
            .unwrap();
    assert_eq!(stats.capacity, 6);
    assert_eq!(stats.copies, 0);
    assert_eq!(stats.empty_slots, 6);
    assert_eq!(
        stats.quantity_choices,
        vec![
            Quantity::Count(1),
            Quantity::Count(2),
            Quantity::Count(3),
            Quantity::Count(4),
            Quantity::Count(5),
            Quantity::Count(6),
            Quantity::Max,
        ]
    );
}

#[test]
fn test_capacity_statistics_reports_zero() {
    let huge = PhotoSize::Custom(PhysicalSize::inches(5.0, 5.0));
    let stats = capacity_statistics(PaperSize::FourBySix, huge, &PrintConfig::default()).unwrap();
    assert_eq!(stats.capacity, 0);
    assert!(stats.quantity_choices.is_empty());
}
