use std::io::Cursor;

use super::*;

fn encode_png(width: u32, height: u32, rgba: Vec<u8>) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(width, height, rgba).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_pixels() {
    let buf = encode_png(2, 1, vec![100, 50, 200, 128, 1, 2, 3, 255]);

    let frame = decode_image(&buf).unwrap();
    assert_eq!(frame.width(), 2);
    assert_eq!(frame.height(), 1);
    assert!(!frame.is_sentinel());
    assert_eq!(frame.pixels().as_raw().as_slice(), &[100, 50, 200, 128, 1, 2, 3, 255]);
}

#[test]
fn decode_garbage_is_an_error() {
    assert!(decode_image(b"definitely not an image").is_err());
    assert!(decode_image(&[]).is_err());
}

#[test]
fn premultiply_matches_rounding_rule() {
    let mut px = vec![100u8, 50, 200, 128, 9, 9, 9, 0, 7, 8, 9, 255];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(
        px,
        vec![
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128,
            0,
            0,
            0,
            0,
            7,
            8,
            9,
            255,
        ]
    );
}

#[test]
fn unpremultiply_restores_opaque_and_approximates_translucent() {
    let mut px = vec![50u8, 25, 100, 128, 7, 8, 9, 255];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[4..], &[7, 8, 9, 255]);
    assert!((i32::from(px[0]) - 100).abs() <= 1);
    assert!((i32::from(px[2]) - 199).abs() <= 1);
}
