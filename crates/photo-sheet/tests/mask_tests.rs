use photo_sheet::layout::PixelSize;
use photo_sheet::mask::{DisplayMapping, SessionState};
use photo_sheet::*;

fn horizontal_stroke() -> MaskStroke {
    MaskStroke::new(
        vec![Point::new(10.0, 50.0), Point::new(90.0, 50.0)],
        5.0,
        StrokeMode::Paint,
    )
}

#[test]
fn test_session_state_machine() {
    let mut session = MaskSession::new(100, 100).unwrap();
    assert_eq!(session.state(), SessionState::Idle);
    assert!(!session.has_content());

    // Moves without a press paint nothing
    session.pointer_move(Point::new(20.0, 20.0)).unwrap();
    assert!(!session.has_content());
    assert!(!session.accumulator().has_coverage());

    session.pointer_down(Point::new(20.0, 20.0)).unwrap();
    assert_eq!(
        session.state(),
        SessionState::Drawing {
            last: Point::new(20.0, 20.0)
        }
    );
    assert!(session.has_content());

    session.pointer_move(Point::new(40.0, 20.0)).unwrap();
    assert_eq!(
        session.state(),
        SessionState::Drawing {
            last: Point::new(40.0, 20.0)
        }
    );

    session.pointer_up();
    assert_eq!(session.state(), SessionState::Idle);

    session.pointer_down(Point::new(60.0, 60.0)).unwrap();
    session.pointer_leave();
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn test_pointer_down_paints_a_dot() {
    let mut session = MaskSession::new(50, 50).unwrap();
    session.pointer_down(Point::new(25.0, 25.0)).unwrap();
    session.pointer_up();

    let mask = session.commit().unwrap();
    assert!(mask.is_selected(25, 25));
    assert!(!mask.is_selected(0, 0));
}

#[test]
fn test_commit_without_content_fails() {
    let session = MaskSession::new(10, 10).unwrap();
    assert!(matches!(session.commit(), Err(SheetError::EmptyMask)));
}

#[test]
fn test_clear_resets_content() {
    let mut session = MaskSession::new(100, 100).unwrap();
    session.apply_stroke(&horizontal_stroke()).unwrap();
    assert!(session.has_content());

    session.clear();
    assert!(!session.has_content());
    assert!(!session.accumulator().has_coverage());
    assert!(matches!(session.commit(), Err(SheetError::EmptyMask)));
}

#[test]
fn test_stroke_coverage() {
    let mut session = MaskSession::new(100, 100).unwrap();
    session.apply_stroke(&horizontal_stroke()).unwrap();
    let mask = session.commit().unwrap();

    assert_eq!((mask.width(), mask.height()), (100, 100));
    assert!(mask.is_selected(50, 50));
    assert!(mask.is_selected(10, 50));
    assert!(mask.is_selected(90, 50));
    // Round caps reach the radius past the ends
    assert!(mask.is_selected(6, 50));
    assert!(!mask.is_selected(50, 40));
    assert!(!mask.is_selected(97, 50));
}

#[test]
fn test_mask_is_binary() {
    let mut session = MaskSession::new(64, 64).unwrap();
    session.apply_stroke(&MaskStroke::paint(vec![Point::new(32.0, 32.0)])).unwrap();
    let mask = session.commit().unwrap();

    for pixel in mask.image().pixels() {
        assert!(pixel.0 == [255, 255, 255, 255] || pixel.0 == [0, 0, 0, 255]);
    }
    assert!(mask.selected_count() > 0);
}

#[test]
fn test_replay_is_deterministic() {
    let strokes = vec![
        horizontal_stroke(),
        MaskStroke::new(
            vec![Point::new(50.0, 10.0), Point::new(50.0, 90.0), Point::new(80.0, 80.0)],
            8.0,
            StrokeMode::Paint,
        ),
        MaskStroke::new(vec![Point::new(50.0, 50.0)], 4.0, StrokeMode::Erase),
    ];

    let replay = || {
        let mut session = MaskSession::new(100, 100).unwrap();
        for stroke in &strokes {
            session.apply_stroke(stroke).unwrap();
        }
        session.commit().unwrap()
    };

    assert_eq!(replay(), replay());
}

#[test]
fn test_erase_clears_coverage() {
    let mut session = MaskSession::new(100, 100).unwrap();
    session.apply_stroke(&horizontal_stroke()).unwrap();
    session
        .apply_stroke(&MaskStroke::new(
            vec![Point::new(50.0, 50.0)],
            10.0,
            StrokeMode::Erase,
        ))
        .unwrap();
    let mask = session.commit().unwrap();

    assert!(!mask.is_selected(50, 50));
    assert!(mask.is_selected(20, 50));
}

#[test]
fn test_apply_stroke_restores_brush() {
    let mut session = MaskSession::new(20, 20).unwrap();
    session.set_brush_radius(3.0).unwrap();
    session.apply_stroke(&horizontal_stroke()).unwrap();
    assert_eq!(session.brush_radius(), 3.0);
    assert_eq!(session.mode(), StrokeMode::Paint);

    assert!(session.set_brush_radius(0.0).is_err());
    assert!(session.set_brush_radius(f32::INFINITY).is_err());
}

#[test]
fn test_display_mapping() {
    // 200x100 image shown at half size
    let mapping =
        DisplayMapping::new(PixelSize::new(200.0, 100.0), PixelSize::new(100.0, 50.0)).unwrap();
    assert_eq!(mapping.to_native(Point::new(10.0, 20.0)), Point::new(20.0, 40.0));

    let mut session = MaskSession::new(200, 100).unwrap().with_mapping(mapping);
    session.pointer_down(Point::new(50.0, 25.0)).unwrap();
    session.pointer_up();
    let mask = session.commit().unwrap();
    assert!(mask.is_selected(100, 50));
    assert!(!mask.is_selected(50, 25));

    assert!(DisplayMapping::new(PixelSize::new(0.0, 100.0), PixelSize::new(100.0, 50.0)).is_err());
}

#[test]
fn test_mask_png_and_data_url() {
    let mut session = MaskSession::new(16, 16).unwrap();
    session.pointer_down(Point::new(8.0, 8.0)).unwrap();
    let mask = session.commit().unwrap();

    let png = mask.to_png().unwrap();
    let decoded = codec::decode(&png).unwrap();
    assert_eq!(&decoded, mask.image());

    let url = mask.to_data_url().unwrap();
    assert!(url.starts_with("data:image/png;base64,"));
}

#[test]
fn test_non_finite_points_are_rejected() {
    let mut session = MaskSession::new(10, 10).unwrap();
    assert!(session.pointer_down(Point::new(f32::NAN, 1.0)).is_err());
}
