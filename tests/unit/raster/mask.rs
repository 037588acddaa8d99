use super::*;
use crate::foundation::core::BBox;

fn full_mask(x0: i32, y0: i32, w: u32, h: u32, value: u8) -> Mask {
    Mask::new(
        BBox::new(x0, y0, x0 + w as i32, y0 + h as i32).unwrap(),
        image::GrayImage::from_pixel(w, h, image::Luma([value])),
    )
    .unwrap()
}

fn revealed_rows(mask: &Mask) -> usize {
    (0..mask.raster.height())
        .filter(|&y| mask.raster.get_pixel(0, y).0[0] != 0)
        .count()
}

#[test]
fn stencil_places_mask_at_bbox_and_zeroes_elsewhere() {
    let canvas = Canvas::new(6, 6).unwrap();
    let stencil = Stencil::from_mask(&full_mask(2, 1, 2, 3, 200), canvas);

    assert_eq!(stencil.coverage(2, 1), 200);
    assert_eq!(stencil.coverage(3, 3), 200);
    assert_eq!(stencil.coverage(1, 1), 0);
    assert_eq!(stencil.coverage(2, 4), 0);
    assert_eq!(stencil.data.iter().filter(|&&c| c != 0).count(), 6);
}

#[test]
fn stencil_clips_bbox_outside_canvas() {
    let canvas = Canvas::new(4, 4).unwrap();
    let stencil = Stencil::from_mask(&full_mask(-2, 3, 4, 4, 255), canvas);
    assert_eq!(stencil.coverage(0, 3), 255);
    assert_eq!(stencil.coverage(1, 3), 255);
    assert_eq!(stencil.coverage(2, 3), 0);
    assert_eq!(stencil.data.iter().filter(|&&c| c != 0).count(), 2);

    let off_canvas = Stencil::from_mask(&full_mask(10, 10, 2, 2, 255), canvas);
    assert!(off_canvas.data.iter().all(|&c| c == 0));
}

#[test]
fn apply_scales_tile_alpha() {
    let canvas = Canvas::new(3, 1).unwrap();
    let mut tile = Frame::from_rgba(
        canvas,
        vec![200, 200, 200, 200, 10, 20, 30, 255, 90, 80, 70, 255],
    )
    .unwrap();
    let stencil = Stencil {
        width: 3,
        height: 1,
        data: vec![0, 255, 128],
    };
    stencil.apply(&mut tile).unwrap();
    assert_eq!(
        tile.data,
        vec![0, 0, 0, 0, 10, 20, 30, 255, 90, 80, 70, 128]
    );
}

#[test]
fn reveal_half_of_bar_mask() {
    let mask = full_mask(0, 0, 100, 200, 255);
    let revealed = reveal_bottom(&mask, 50);
    for y in 0..100 {
        assert_eq!(revealed.raster.get_pixel(50, y).0[0], 0, "row {y}");
    }
    for y in 100..200 {
        assert_eq!(revealed.raster.get_pixel(50, y).0[0], 255, "row {y}");
    }
    assert_eq!(revealed.bbox, mask.bbox);
}

#[test]
fn reveal_endpoints() {
    let mask = full_mask(0, 0, 3, 10, 180);
    assert_eq!(reveal_bottom(&mask, 100), mask);
    assert_eq!(revealed_rows(&reveal_bottom(&mask, 0)), 0);
    assert_eq!(revealed_rows(&reveal_bottom(&mask, 250)), 10);
}

#[test]
fn reveal_is_monotonic_in_percent() {
    let mask = full_mask(0, 0, 1, 37, 255);
    let mut prev = reveal_bottom(&mask, 0);
    for p in 1..=100u8 {
        let cur = reveal_bottom(&mask, p);
        for y in 0..37 {
            let before = prev.raster.get_pixel(0, y).0[0];
            let now = cur.raster.get_pixel(0, y).0[0];
            assert!(before == 0 || now == before, "p={p} row={y}");
        }
        assert!(revealed_rows(&cur) >= revealed_rows(&prev));
        prev = cur;
    }
}
