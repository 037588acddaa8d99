use super::*;

fn tile(w: u32, h: u32) -> image::RgbaImage {
    image::RgbaImage::from_pixel(w, h, image::Rgba([1, 2, 3, 255]))
}

fn sample() -> Document {
    Document::new(
        Canvas::new(8, 8).unwrap(),
        vec![
            LeafLayer::new("bg", tile(8, 8), Offset::ZERO).into(),
            GroupLayer::new(
                "chars",
                vec![
                    LeafLayer::new("a", tile(2, 2), Offset::new(1, 1)).into(),
                    LeafLayer::new("b", tile(2, 2), Offset::new(3, 1))
                        .hidden()
                        .into(),
                ],
            )
            .into(),
            GroupLayer::new(
                "hidden_group",
                vec![LeafLayer::new("c", tile(1, 1), Offset::ZERO).into()],
            )
            .hidden()
            .into(),
        ],
    )
    .unwrap()
}

#[test]
fn mask_rejects_raster_bbox_mismatch() {
    let bbox = BBox::new(0, 0, 4, 4).unwrap();
    assert!(Mask::new(bbox, image::GrayImage::new(4, 3)).is_err());
    assert!(Mask::new(bbox, image::GrayImage::new(4, 4)).is_ok());
}

#[test]
fn document_validation_reports_nested_bad_mask() {
    let mut leaf = LeafLayer::new("m", tile(2, 2), Offset::ZERO);
    leaf.mask = Some(Mask {
        bbox: BBox::new(0, 0, 2, 2).unwrap(),
        raster: image::GrayImage::new(1, 1),
    });
    let err = Document::new(
        Canvas::new(4, 4).unwrap(),
        vec![GroupLayer::new("g", vec![leaf.into()]).into()],
    )
    .unwrap_err();
    assert!(err.to_string().contains("layer 'm'"));
}

#[test]
fn reachable_leaves_skip_hidden_layers_and_groups() {
    let doc = sample();
    let names: Vec<&str> = doc
        .reachable_leaves()
        .iter()
        .map(|l| l.name.as_str())
        .collect();
    assert_eq!(names, vec!["bg", "a"]);
}

#[test]
fn outline_lists_top_most_first() {
    let text = sample().outline();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "[group] hidden_group (hidden)");
    assert_eq!(lines[1], "  c @(0,0) 1x1");
    assert_eq!(lines[2], "[group] chars");
    assert_eq!(lines[3], "  b @(3,1) 2x2 (hidden)");
    assert_eq!(lines.last().copied(), Some("bg @(0,0) 8x8"));
}
