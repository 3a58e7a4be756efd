use super::*;

fn frame(px: [u8; 4], premultiplied: bool) -> FrameRGBA {
    FrameRGBA {
        width: 3,
        height: 2,
        data: std::iter::repeat_n(px, 6).flatten().collect(),
        premultiplied,
    }
}

#[test]
fn png_output_is_opaque_and_flattened() {
    let half_red = frame([128, 0, 0, 128], true);
    let bytes = encode_still(&half_red, StillFormat::Png, Rgba8Premul::WHITE).unwrap();
    let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (3, 2));
    let px = img.get_pixel(0, 0).0;
    assert_eq!(px[3], 255);
    assert_eq!(px[0], 255);
    assert!((126..=128).contains(&px[1]));
}

#[test]
fn straight_alpha_input_is_premultiplied_first() {
    let half_red = frame([255, 0, 0, 128], false);
    let bytes = encode_still(&half_red, StillFormat::Png, Rgba8Premul::BLACK).unwrap();
    let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
    let px = img.get_pixel(2, 1).0;
    assert_eq!(px, [128, 0, 0, 255]);
}

#[test]
fn jpeg_round_trips_dimensions() {
    let bytes = encode_still(
        &frame([10, 200, 30, 255], true),
        StillFormat::JPEG,
        Rgba8Premul::BLACK,
    )
    .unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    let img = image::load_from_memory(&bytes).unwrap();
    assert_eq!((img.width(), img.height()), (3, 2));
}

#[test]
fn bad_inputs_are_rejected() {
    let mut short = frame([0, 0, 0, 255], true);
    short.data.truncate(8);
    assert!(encode_still(&short, StillFormat::Png, Rgba8Premul::BLACK).is_err());
    assert!(
        encode_still(
            &frame([0, 0, 0, 255], true),
            StillFormat::Jpeg { quality: 0 },
            Rgba8Premul::BLACK
        )
        .is_err()
    );
}

#[test]
fn format_from_extension() {
    assert_eq!(
        StillFormat::from_path(Path::new("out/x.PNG")).unwrap(),
        StillFormat::Png
    );
    assert_eq!(
        StillFormat::from_path(Path::new("x.jpeg")).unwrap(),
        StillFormat::JPEG
    );
    assert!(StillFormat::from_path(Path::new("x.gif")).is_err());
}
