use std::sync::Arc;

use super::*;
use crate::assets::decode::PreparedImage;
use crate::geometry::rect::DrawRect;

fn solid(px: [u8; 4]) -> PreparedImage {
    PreparedImage {
        width: 2,
        height: 2,
        rgba8_premul: Arc::new(std::iter::repeat_n(px, 4).flatten().collect()),
    }
}

fn fixture(style: AnimationStyle) -> (FrameRenderer, PairPaints) {
    let full = DrawRect {
        x: 0.0,
        y: 0.0,
        width: 20.0,
        height: 10.0,
    };
    let alignment = AlignmentResult {
        before: full,
        after: full,
        used_shoulder_anchor: false,
        top_crop_offset: 0.0,
        anchor_row: 1.0,
        before_anchor_row: 1.0,
        after_anchor_row: 1.0,
        body_scale: 1.0,
    };
    let renderer = FrameRenderer::new(
        style,
        alignment,
        Canvas::new(20, 10).unwrap(),
        &RenderSettings::default(),
    )
    .unwrap();
    let paints = PairPaints::new(&solid([255, 0, 0, 255]), &solid([0, 0, 255, 255])).unwrap();
    (renderer, paints)
}

const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];

#[test]
fn slider_wipes_from_before_to_after() {
    let (mut r, paints) = fixture(AnimationStyle::Slider);
    let first = r.render(&paints, 0, 5).unwrap();
    assert_eq!(first.pixel(15, 5), Some(RED));
    let mid = r.render(&paints, 2, 5).unwrap();
    assert_eq!(mid.pixel(2, 5), Some(BLUE));
    assert_eq!(mid.pixel(17, 5), Some(RED));
    assert_eq!(mid.pixel(10, 5), Some([255, 255, 255, 255]));
    let last = r.render(&paints, 4, 5).unwrap();
    assert_eq!(last.pixel(5, 5), Some(BLUE));
}

#[test]
fn slider_label_switches_at_half() {
    assert_eq!(
        frame_state(AnimationStyle::Slider, 1, 5, 100.0).label(),
        Side::Before
    );
    assert_eq!(
        frame_state(AnimationStyle::Slider, 2, 5, 100.0).label(),
        Side::After
    );
    let FrameState::Slider { divider_x, .. } = frame_state(AnimationStyle::Slider, 3, 5, 100.0)
    else {
        panic!("expected slider state");
    };
    assert!((divider_x - 75.0).abs() < 1e-9);
}

#[test]
fn crossfade_alphas_follow_eased_progress() {
    let FrameState::Crossfade {
        before_alpha,
        after_alpha,
        label,
    } = frame_state(AnimationStyle::Crossfade, 1, 5, 100.0)
    else {
        panic!("expected crossfade state");
    };
    // t = 0.25 -> 4t^3 = 0.0625
    assert!((after_alpha - 0.0625).abs() < 1e-6);
    assert!((before_alpha - 0.9375).abs() < 1e-6);
    assert_eq!(label, Side::Before);
    assert_eq!(
        frame_state(AnimationStyle::Crossfade, 1, 3, 100.0).label(),
        Side::After
    );
}

#[test]
fn crossfade_endpoints_are_pure_photos() {
    let (mut r, paints) = fixture(AnimationStyle::Crossfade);
    assert_eq!(r.render(&paints, 0, 4).unwrap().pixel(10, 5), Some(RED));
    assert_eq!(r.render(&paints, 3, 4).unwrap().pixel(10, 5), Some(BLUE));
}

#[test]
fn toggle_follows_pattern() {
    let (mut r, paints) = fixture(AnimationStyle::Toggle);
    assert_eq!(r.render(&paints, 0, 12).unwrap().pixel(10, 5), Some(RED));
    assert_eq!(r.render(&paints, 4, 12).unwrap().pixel(10, 5), Some(BLUE));
    assert_eq!(r.render(&paints, 9, 12).unwrap().pixel(10, 5), Some(BLUE));
    assert_eq!(r.render(&paints, 10, 12).unwrap().pixel(10, 5), Some(RED));
}

#[test]
fn out_of_range_frame_is_rejected() {
    let (mut r, paints) = fixture(AnimationStyle::Toggle);
    assert!(r.render(&paints, 12, 12).is_err());
    assert!(r.render(&paints, 0, 0).is_err());
}
