use super::*;

#[test]
fn parse_font_size_accepts_slider_values() {
    assert_eq!(parse_font_size("150"), Some(150));
    assert_eq!(parse_font_size(" 75 "), Some(75));
}

#[test]
fn parse_font_size_snaps_and_clamps() {
    assert_eq!(parse_font_size("152"), Some(150));
    assert_eq!(parse_font_size("10"), Some(FONT_SIZE_MIN));
    assert_eq!(parse_font_size("900"), Some(FONT_SIZE_MAX));
}

#[test]
fn parse_font_size_rejects_non_numbers() {
    assert_eq!(parse_font_size(""), None);
    assert_eq!(parse_font_size("big"), None);
}

#[test]
fn font_size_label_shows_percent() {
    assert_eq!(font_size_label(125), "Text Size (125%)");
}
