use super::*;

fn pose(points: &[(PoseIndex, f64, f64, f64)]) -> Vec<Landmark> {
    let mut lm = vec![Landmark::new(0.5, 0.5, 0.0); POSE_LANDMARK_COUNT];
    for &(idx, x, y, vis) in points {
        lm[idx as usize] = Landmark::new(x, y, vis);
    }
    lm
}

fn cfg() -> AlignConfig {
    AlignConfig::default()
}

#[test]
fn shoulder_anchor_averages_both_sides() {
    let lm = pose(&[
        (PoseIndex::LeftShoulder, 0.4, 0.30, 0.9),
        (PoseIndex::RightShoulder, 0.6, 0.34, 0.9),
    ]);
    let y = anchor_y(Some(&lm), AnchorKind::Shoulder, &cfg()).unwrap();
    assert!((y - 0.32).abs() < 1e-12);
    let x = anchor_x(Some(&lm), &cfg()).unwrap();
    assert!((x - 0.5).abs() < 1e-12);
}

#[test]
fn shoulder_anchor_uses_single_visible_side() {
    let lm = pose(&[
        (PoseIndex::LeftShoulder, 0.4, 0.30, 0.2),
        (PoseIndex::RightShoulder, 0.6, 0.34, 0.9),
    ]);
    assert_eq!(anchor_y(Some(&lm), AnchorKind::Shoulder, &cfg()), Some(0.34));
    assert_eq!(anchor_x(Some(&lm), &cfg()), Some(0.6));
}

#[test]
fn anchors_are_none_without_trusted_points() {
    let lm = pose(&[]);
    assert_eq!(anchor_y(Some(&lm), AnchorKind::Nose, &cfg()), None);
    assert_eq!(anchor_y(Some(&lm), AnchorKind::Shoulder, &cfg()), None);
    assert_eq!(anchor_y(None, AnchorKind::Nose, &cfg()), None);
    assert_eq!(anchor_x(Some(&[]), &cfg()), None);
}

#[test]
fn short_arrays_and_nan_are_invisible() {
    let short = vec![Landmark::new(0.5, 0.1, 0.9); 5];
    assert_eq!(anchor_y(Some(&short), AnchorKind::Nose, &cfg()), Some(0.1));
    assert_eq!(anchor_y(Some(&short), AnchorKind::Shoulder, &cfg()), None);

    let mut lm = pose(&[(PoseIndex::Nose, 0.5, 0.1, 0.9)]);
    lm[0].y = f64::NAN;
    assert_eq!(anchor_y(Some(&lm), AnchorKind::Nose, &cfg()), None);
}

#[test]
fn head_crop_detection() {
    let near_top = pose(&[(PoseIndex::Nose, 0.5, 0.01, 0.9)]);
    assert!(head_cropped(Some(&near_top), &cfg()));

    let low_vis = pose(&[(PoseIndex::Nose, 0.5, 0.2, 0.3)]);
    assert!(head_cropped(Some(&low_vis), &cfg()));

    let ok = pose(&[(PoseIndex::Nose, 0.5, 0.12, 0.95)]);
    assert!(!head_cropped(Some(&ok), &cfg()));

    assert!(!head_cropped(None, &cfg()));
    assert!(!head_cropped(Some(&[]), &cfg()));
}

#[test]
fn body_height_prefers_nose_to_hip() {
    let lm = pose(&[
        (PoseIndex::Nose, 0.5, 0.10, 0.9),
        (PoseIndex::LeftShoulder, 0.4, 0.20, 0.9),
        (PoseIndex::RightShoulder, 0.6, 0.20, 0.9),
        (PoseIndex::LeftHip, 0.45, 0.55, 0.9),
        (PoseIndex::RightHip, 0.55, 0.55, 0.9),
    ]);
    let bh = body_height(Some(&lm), &cfg());
    assert_eq!(bh.source, BodyHeightSource::NoseToHip);
    assert!((bh.value - 0.45).abs() < 1e-12);
}

#[test]
fn body_height_falls_back_to_shoulders_when_head_cropped() {
    let lm = pose(&[
        (PoseIndex::Nose, 0.5, 0.01, 0.9),
        (PoseIndex::LeftShoulder, 0.4, 0.20, 0.9),
        (PoseIndex::RightShoulder, 0.6, 0.20, 0.9),
        (PoseIndex::LeftHip, 0.45, 0.60, 0.9),
    ]);
    let bh = body_height(Some(&lm), &cfg());
    assert_eq!(bh.source, BodyHeightSource::ShoulderToHip);
    assert!((bh.value - 0.40).abs() < 1e-12);
}

#[test]
fn body_height_constants_for_missing_data() {
    let no_hips = pose(&[(PoseIndex::Nose, 0.5, 0.1, 0.9)]);
    let bh = body_height(Some(&no_hips), &cfg());
    assert_eq!(bh.source, BodyHeightSource::Undetected);
    assert_eq!(bh.value, 0.35);

    let bh = body_height(None, &cfg());
    assert_eq!(bh.source, BodyHeightSource::NoPose);
    assert_eq!(bh.value, 0.5);
}

#[test]
fn inverted_torso_is_not_a_measurement() {
    let lm = pose(&[
        (PoseIndex::Nose, 0.5, 0.70, 0.9),
        (PoseIndex::LeftHip, 0.5, 0.40, 0.9),
    ]);
    assert_eq!(
        body_height(Some(&lm), &cfg()).source,
        BodyHeightSource::Undetected
    );
}

#[test]
fn landmark_json_defaults_optional_fields() {
    let lm: Vec<Landmark> = serde_json::from_str(r#"[{"x":0.5,"y":0.25}]"#).unwrap();
    assert_eq!(lm[0].z, 0.0);
    assert_eq!(lm[0].visibility, 0.0);
}
