/// Map printable ASCII (`0x20..=0x7E`) to its full-width form; everything else is unchanged.
///
/// Space becomes U+3000 (ideographic space); `!`..`~` shift into U+FF01..U+FF5E.
pub fn to_full_width(text: &str) -> String {
    text.chars().map(full_width_char).collect()
}

fn full_width_char(c: char) -> char {
    match c {
        ' ' => '\u{3000}',
        '!'..='~' => char::from_u32(u32::from(c) + 0xFEE0).unwrap_or(c),
        _ => c,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/replace/text.rs"]
mod tests;
