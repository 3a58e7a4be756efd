use std::sync::Arc;

use super::*;

fn photo(w: u32, h: u32, px: [u8; 4]) -> PreparedImage {
    PreparedImage {
        width: w,
        height: h,
        rgba8_premul: Arc::new(
            std::iter::repeat_n(px, (w * h) as usize)
                .flatten()
                .collect(),
        ),
    }
}

fn pose(nose_y: f64) -> Vec<Landmark> {
    let mut lm = vec![Landmark::new(0.5, 0.5, 0.0); 33];
    lm[0] = Landmark::new(0.5, nose_y, 0.95);
    lm[11] = Landmark::new(0.42, nose_y + 0.12, 0.9);
    lm[12] = Landmark::new(0.58, nose_y + 0.12, 0.9);
    lm[23] = Landmark::new(0.45, nose_y + 0.45, 0.9);
    lm[24] = Landmark::new(0.55, nose_y + 0.45, 0.9);
    lm
}

fn pair() -> PhotoPair {
    PhotoPair::new(photo(60, 80, [255, 0, 0, 255]), photo(50, 90, [0, 0, 255, 255]))
        .with_landmarks(Side::Before, Some(pose(0.12)))
        .with_landmarks(Side::After, Some(pose(0.18)))
}

#[test]
fn photo_ref_carries_dimensions_and_pose() {
    let p = pair();
    let r = p.photo_ref(Side::After);
    assert_eq!((r.width, r.height), (50, 90));
    assert_eq!(r.landmarks().map(<[Landmark]>::len), Some(33));
}

#[test]
fn still_preview_matches_direct_alignment() {
    let p = pair();
    let cfg = AlignConfig::default();
    let preview =
        Preview::still(&p, &cfg, Format::Square, 120, &RenderSettings::default()).unwrap();
    let direct = crate::align::calculator::calculate_alignment(
        &p.photo_ref(Side::Before),
        &p.photo_ref(Side::After),
        60.0,
        120.0,
    );
    assert_eq!(preview.alignment(), &direct);
    assert_eq!(preview.frame_count(), 1);
    let canvas = preview.canvas();
    assert_eq!(canvas.width, canvas.height);
}

#[test]
fn still_rejects_other_frames() {
    let mut preview = Preview::still(
        &pair(),
        &AlignConfig::default(),
        Format::Square,
        40,
        &RenderSettings::default(),
    )
    .unwrap();
    assert!(preview.render(0).is_ok());
    assert!(preview.render(1).is_err());
}

#[test]
fn animation_preview_exposes_schedule() {
    let mut preview = Preview::animation(
        &pair(),
        &AlignConfig::default(),
        AnimationStyle::Toggle,
        8.0,
        Format::Portrait,
        40,
        &RenderSettings::default(),
    )
    .unwrap();
    assert_eq!(preview.canvas(), Canvas::new(40, 50).unwrap());
    assert_eq!(preview.frame_count(), 12);
    assert_eq!(preview.schedule().map(|s| s.total_ms()), Some(8000));
    let frame = preview.render(5).unwrap();
    assert_eq!(frame.pixel(20, 25), Some([0, 0, 255, 255]));
}

#[test]
fn repeated_renders_are_identical() {
    let mut preview = Preview::animation(
        &pair(),
        &AlignConfig::default(),
        AnimationStyle::Slider,
        1.0,
        Format::Square,
        32,
        &RenderSettings::default(),
    )
    .unwrap();
    let a = preview.render(7).unwrap();
    let b = preview.render(7).unwrap();
    assert_eq!(a.data, b.data);
}
