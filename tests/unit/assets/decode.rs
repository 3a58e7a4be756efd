use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(px));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let prepared = decode_image(&png_bytes(1, 1, [100, 50, 200, 128])).unwrap();
    assert_eq!(prepared.width, 1);
    assert_eq!(prepared.height, 1);
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn garbage_bytes_are_a_decode_error() {
    let err = decode_image(b"not an image").unwrap_err();
    assert!(matches!(err, SplitshotError::Decode(_)));
}

#[test]
fn missing_file_is_a_decode_error() {
    let err = load_image_file(Path::new("/nonexistent/splitshot/before.png")).unwrap_err();
    assert!(matches!(err, SplitshotError::Decode(_)));
    assert!(err.to_string().contains("before.png"));
}

#[test]
fn pair_decodes_both_sides() {
    let before = ImageInput::Bytes(Arc::new(png_bytes(4, 6, [255, 0, 0, 255])));
    let after = ImageInput::Bytes(Arc::new(png_bytes(8, 2, [0, 0, 255, 255])));
    let (b, a) = decode_pair(&before, &after).unwrap();
    assert_eq!((b.width, b.height), (4, 6));
    assert_eq!((a.width, a.height), (8, 2));
}

#[test]
fn pair_fails_when_either_side_fails() {
    let good = ImageInput::Bytes(Arc::new(png_bytes(2, 2, [0, 0, 0, 255])));
    let bad = ImageInput::Bytes(Arc::new(b"nope".to_vec()));
    assert!(decode_pair(&good, &bad).is_err());
    assert!(decode_pair(&bad, &good).is_err());
}
