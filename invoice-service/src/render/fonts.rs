//! Glyph metrics for the built-in Helvetica faces, used to right-align and
//! truncate text. Widths are Adobe AFM values in 1/1000 em for ASCII 32..=126.

use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    Regular,
    Bold,
}

/// Height of the ascender above the baseline, in em.
pub const ASCENT: f32 = 0.718;

const ELLIPSIS: &str = "...";

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    // space ! " # $ % & ' ( ) * + , - . /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // : ; < = > ? @
    278, 278, 584, 584, 584, 556, 1015,
    // A-Z
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [ \ ] ^ _ `
    278, 278, 278, 469, 556, 333,
    // a-z
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // { | } ~
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    // space ! " # $ % & ' ( ) * + , - . /
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // : ; < = > ? @
    333, 333, 584, 584, 584, 611, 975,
    // A-Z
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [ \ ] ^ _ `
    333, 278, 333, 584, 556, 333,
    // a-z
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    // { | } ~
    389, 280, 389, 584,
];

/// Characters outside ASCII are measured as a digit, which errs wide.
const FALLBACK_WIDTH: u16 = 556;

pub fn char_width(face: FontFace, ch: char) -> u16 {
    let code = ch as u32;
    if !(32..=126).contains(&code) {
        return FALLBACK_WIDTH;
    }
    let index = (code - 32) as usize;
    match face {
        FontFace::Regular => HELVETICA_WIDTHS[index],
        FontFace::Bold => HELVETICA_BOLD_WIDTHS[index],
    }
}

/// Width of `text` in points.
pub fn text_width(text: &str, face: FontFace, size: f32) -> f32 {
    let units: u32 = text.chars().map(|ch| u32::from(char_width(face, ch))).sum();
    units as f32 * size / 1000.0
}

/// `text` unchanged if it fits in `max_width`, otherwise the longest prefix
/// that fits with `...` appended.
pub fn fit_text(text: &str, face: FontFace, size: f32, max_width: f32) -> Cow<'_, str> {
    if text_width(text, face, size) <= max_width {
        return Cow::Borrowed(text);
    }

    let budget = max_width - text_width(ELLIPSIS, face, size);
    let mut used = 0.0;
    let mut end = 0;
    for (idx, ch) in text.char_indices() {
        let w = f32::from(char_width(face, ch)) * size / 1000.0;
        if used + w > budget {
            break;
        }
        used += w;
        end = idx + ch.len_utf8();
    }

    let prefix = text[..end].trim_end();
    if prefix.is_empty() {
        Cow::Borrowed("")
    } else {
        Cow::Owned(format!("{}{}", prefix, ELLIPSIS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_cover_printable_ascii() {
        assert_eq!(HELVETICA_WIDTHS.len(), 95);
        assert_eq!(char_width(FontFace::Regular, ' '), 278);
        assert_eq!(char_width(FontFace::Regular, '~'), 584);
        assert_eq!(char_width(FontFace::Bold, 'm'), 889);
        assert_eq!(char_width(FontFace::Regular, 'W'), 944);
    }

    #[test]
    fn digits_are_tabular() {
        assert_eq!(text_width("1234", FontFace::Regular, 10.0), 4.0 * 5.56);
        assert_eq!(
            text_width("$15.00", FontFace::Regular, 10.0),
            text_width("$99.99", FontFace::Regular, 10.0)
        );
    }

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(fit_text("Widget", FontFace::Regular, 10.0, 200.0), "Widget");
    }

    #[test]
    fn long_text_is_truncated_to_width() {
        let long = "Extended warranty covering parts and labour for thirty six months";
        let fitted = fit_text(long, FontFace::Regular, 10.0, 100.0);
        assert!(fitted.ends_with("..."));
        assert!(text_width(&fitted, FontFace::Regular, 10.0) <= 100.0);
    }

    #[test]
    fn nothing_fits_in_tiny_box() {
        assert_eq!(fit_text("Widget", FontFace::Regular, 10.0, 5.0), "");
    }
}
