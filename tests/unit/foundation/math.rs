use super::*;

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn premultiply_zeroes_transparent_pixels() {
    let mut px = vec![200u8, 100, 50, 0, 100, 50, 200, 128];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[0, 0, 0, 0]);
    assert_eq!(
        &px[4..],
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128
        ]
    );
}

#[test]
fn unpremultiply_restores_opaque_and_half_alpha() {
    let mut px = vec![128u8, 0, 64, 128, 10, 20, 30, 255];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[255, 0, 128, 128]);
    assert_eq!(&px[4..], &[10, 20, 30, 255]);
}

#[test]
fn flatten_premul_over_black_produces_expected_rgb() {
    // Premultiplied red @ 50% alpha.
    let src = vec![128u8, 0u8, 0u8, 128u8];
    let mut dst = vec![0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, [0, 0, 0, 255]).unwrap();
    assert_eq!(dst, vec![128u8, 0u8, 0u8, 255u8]);
}

#[test]
fn flatten_transparent_over_white_is_white() {
    let src = vec![0u8; 4];
    let mut dst = vec![0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, [255, 255, 255, 255]).unwrap();
    assert_eq!(dst, vec![255u8; 4]);
}

#[test]
fn flatten_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(flatten_to_opaque_rgba8(&mut dst, &[0u8; 4], [0, 0, 0, 255]).is_err());
}
