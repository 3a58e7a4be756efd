use super::*;

#[test]
fn default_style_matches_overlay_conventions() {
    let s = LabelStyle::default();
    assert_eq!(s.text(Side::Before), "Before");
    assert_eq!(s.text(Side::After), "After");
    assert!((s.size_frac - 0.04).abs() < 1e-12);
}

#[test]
fn with_texts_replaces_both_sides() {
    let s = LabelStyle::default().with_texts("Day 1", "Day 90");
    assert_eq!(s.text(Side::Before), "Day 1");
    assert_eq!(s.text(Side::After), "Day 90");
}

#[test]
fn svg_escapes_markup_and_carries_shadow() {
    let svg = label_svg("<A & B>", 20.0);
    assert!(svg.contains("&lt;A &amp; B&gt;"));
    assert!(svg.contains("feGaussianBlur"));
    assert!(svg.contains("fill=\"#ffffff\""));
    assert!(usvg::Tree::from_data(svg.as_bytes(), &usvg::Options::default()).is_ok());
}

#[test]
fn missing_font_dir_is_ignored() {
    let mut db = usvg::fontdb::Database::new();
    load_fonts_from_dir(&mut db, Path::new("/nonexistent/splitshot/fonts"));
    assert!(db.is_empty());
}

#[test]
fn blank_text_draws_nothing() {
    let mut labels = LabelRenderer::new(LabelStyle::default().with_texts("", " "));
    let canvas = Canvas::new(40, 20).unwrap();
    let mut painter = Painter::new(canvas).unwrap();
    let mut pixmap = painter.new_pixmap();
    painter.begin(crate::foundation::core::Rgba8Premul::BLACK);
    labels
        .draw(
            &mut painter,
            Side::Before,
            Rect::new(0.0, 0.0, 40.0, 20.0),
            20.0,
            canvas,
        )
        .unwrap();
    painter.finish_into(&mut pixmap).unwrap();
    assert!(
        pixmap
            .data_as_u8_slice()
            .chunks_exact(4)
            .all(|px| px == [0, 0, 0, 255])
    );
}
