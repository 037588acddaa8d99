use super::*;

#[test]
fn ascii_maps_to_full_width() {
    assert_eq!(to_full_width("AB 1"), "\u{FF21}\u{FF22}\u{3000}\u{FF11}");
}

#[test]
fn printable_range_endpoints() {
    assert_eq!(to_full_width("!~"), "\u{FF01}\u{FF5E}");
}

#[test]
fn non_ascii_and_controls_pass_through() {
    assert_eq!(to_full_width("勇者\tＡé"), "勇者\tＡé");
    assert_eq!(to_full_width(""), "");
}

#[test]
fn mixed_text() {
    assert_eq!(to_full_width("Lv.5 勇者"), "Ｌｖ．５\u{3000}勇者");
}
