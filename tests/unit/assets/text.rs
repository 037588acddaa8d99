use super::*;

#[test]
fn rejects_non_positive_size() {
    let mut engine = TextLayoutEngine::new();
    for size in [0.0, -3.0, f32::NAN, f32::INFINITY] {
        let err = engine
            .prepare("abc", Vec::new(), size, TextBrushRgba8::BLACK)
            .unwrap_err();
        assert!(matches!(err, FrameError::Config(_)));
    }
}

#[test]
fn rejects_bytes_that_are_not_a_font() {
    let mut engine = TextLayoutEngine::new();
    let err = engine
        .prepare(
            "abc",
            b"not a font file".to_vec(),
            24.0,
            TextBrushRgba8::BLACK,
        )
        .unwrap_err();
    assert!(matches!(err, FrameError::Input(_)));
}
