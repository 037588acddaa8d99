use super::*;

fn solid(w: u32, h: u32, px: [u8; 4]) -> image::RgbaImage {
    image::RgbaImage::from_pixel(w, h, image::Rgba(px))
}

#[test]
fn paste_places_tile_at_offset() {
    let canvas = Canvas::new(4, 4).unwrap();
    let mut f = Frame::transparent(canvas);
    f.paste(&solid(2, 2, [255, 0, 0, 255]), Offset::new(1, 2));

    assert_eq!(f.pixel(0, 0), [0, 0, 0, 0]);
    assert_eq!(f.pixel(1, 2), [255, 0, 0, 255]);
    assert_eq!(f.pixel(2, 3), [255, 0, 0, 255]);
    assert_eq!(f.pixel(3, 3), [0, 0, 0, 0]);
    assert_eq!(f.pixel(1, 1), [0, 0, 0, 0]);
}

#[test]
fn paste_clips_negative_and_overflowing_offsets() {
    let canvas = Canvas::new(3, 3).unwrap();
    let mut f = Frame::transparent(canvas);
    f.paste(&solid(3, 3, [0, 255, 0, 255]), Offset::new(-2, 1));
    assert_eq!(f.pixel(0, 1), [0, 255, 0, 255]);
    assert_eq!(f.pixel(1, 1), [0, 0, 0, 0]);
    assert_eq!(f.pixel(0, 0), [0, 0, 0, 0]);

    let mut g = Frame::transparent(canvas);
    g.paste(&solid(3, 3, [0, 0, 255, 255]), Offset::new(2, 2));
    assert_eq!(g.pixel(2, 2), [0, 0, 255, 255]);
    assert_eq!(g.pixel(1, 2), [0, 0, 0, 0]);

    let mut h = Frame::transparent(canvas);
    h.paste(&solid(2, 2, [9, 9, 9, 255]), Offset::new(10, 0));
    assert!(h.data.iter().all(|&b| b == 0));
}

#[test]
fn paste_keeps_straight_colour() {
    let canvas = Canvas::new(1, 1).unwrap();
    let mut f = Frame::transparent(canvas);
    f.paste(&solid(1, 1, [200, 100, 0, 128]), Offset::ZERO);
    assert_eq!(f.pixel(0, 0), [200, 100, 0, 128]);
}

#[test]
fn composite_over_rejects_size_mismatch() {
    let a = Frame::transparent(Canvas::new(2, 2).unwrap());
    let b = Frame::transparent(Canvas::new(3, 2).unwrap());
    assert!(a.composite_over(&b).is_err());
}

#[test]
fn rgba_image_round_trip_of_opaque_pixels() {
    let canvas = Canvas::new(2, 1).unwrap();
    let mut f = Frame::transparent(canvas);
    f.paste(&solid(1, 1, [12, 34, 56, 255]), Offset::ZERO);
    let img = f.to_rgba_image().unwrap();
    assert_eq!(img.get_pixel(0, 0).0, [12, 34, 56, 255]);
    assert_eq!(img.get_pixel(1, 0).0, [0, 0, 0, 0]);
}

#[test]
fn low_alpha_pixels_survive_compositing_onto_transparent() {
    let canvas = Canvas::new(3, 1).unwrap();
    let src = image::RgbaImage::from_raw(
        3,
        1,
        vec![200, 100, 50, 128, 200, 100, 50, 3, 7, 250, 129, 1],
    )
    .unwrap();
    let mut tile = Frame::transparent(canvas);
    tile.paste(&src, Offset::ZERO);
    let out = Frame::transparent(canvas).composite_over(&tile).unwrap();
    assert_eq!(out.to_rgba_image().unwrap(), src);
}

#[test]
fn from_premul_converts_to_straight_alpha() {
    let canvas = Canvas::new(1, 1).unwrap();
    let f = Frame::from_premul(canvas, vec![64, 32, 0, 128]).unwrap();
    assert_eq!(f.pixel(0, 0), [128, 64, 0, 128]);
}

#[test]
fn constructors_check_length() {
    let canvas = Canvas::new(2, 2).unwrap();
    assert!(Frame::from_premul(canvas, vec![0; 15]).is_err());
    assert!(Frame::from_premul(canvas, vec![0; 16]).is_ok());
    assert!(Frame::from_rgba(canvas, vec![0; 12]).is_err());
    assert!(Frame::from_rgba(canvas, vec![0; 16]).is_ok());
}
