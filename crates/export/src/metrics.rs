//! Text measurement and wrapping.
//!
//! Widths come from the font metrics `pdf_canvas` ships for the base-14
//! Helvetica faces, so previews wrap exactly like the rendered PDF.

use pdf_canvas::{BuiltinFont, FontSource};
use serde::{Deserialize, Serialize};

/// Millimetres per PostScript point.
pub const MM_PER_PT: f64 = 25.4 / 72.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Font {
    #[default]
    Regular,
    Bold,
    Italic,
}

impl Font {
    pub(crate) fn builtin(self) -> BuiltinFont {
        match self {
            Self::Regular => BuiltinFont::Helvetica,
            Self::Bold => BuiltinFont::Helvetica_Bold,
            Self::Italic => BuiltinFont::Helvetica_Oblique,
        }
    }
}

/// Width of `text` in millimetres when set in `font` at `size` points.
pub fn text_width(text: &str, font: Font, size: f64) -> f64 {
    f64::from(font.builtin().get_width(size as f32, text)) * MM_PER_PT
}

/// Greedy word wrap.
///
/// Lines never exceed `max_width` as reported by `measure`, except for a
/// single character wider than the line. Words that do not fit on a line of
/// their own are broken between characters. Explicit newlines are kept.
pub fn wrap_text(text: &str, max_width: f64, measure: impl Fn(&str) -> f64) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if measure(&candidate) <= max_width {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if measure(word) <= max_width {
                current = word.to_string();
                continue;
            }
            for c in word.chars() {
                current.push(c);
                if measure(&current) > max_width && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::replace(&mut current, c.to_string()));
                }
            }
        }
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_follow_font_metrics() {
        // "Hi" = 722 + 222 units at 10pt.
        let expected = 0.944 * 10.0 * MM_PER_PT;
        assert!((text_width("Hi", Font::Regular, 10.0) - expected).abs() < 1e-4);
        assert!(text_width("", Font::Regular, 10.0).abs() < 1e-9);
        assert!(text_width("Menu", Font::Bold, 12.0) > text_width("Menu", Font::Regular, 12.0));
        assert_eq!(
            text_width("Note", Font::Italic, 8.0),
            text_width("Note", Font::Regular, 8.0)
        );
    }

    #[test]
    fn wraps_on_word_boundaries() {
        let measure = |s: &str| s.chars().count() as f64;
        assert_eq!(
            wrap_text("crispy corn with spices", 10.0, measure),
            ["crispy", "corn with", "spices"]
        );
    }

    #[test]
    fn breaks_words_longer_than_a_line() {
        let measure = |s: &str| s.chars().count() as f64;
        assert_eq!(wrap_text("abcdefgh ij", 3.0, measure), ["abc", "def", "gh", "ij"]);
    }

    #[test]
    fn keeps_explicit_newlines_and_empty_text() {
        let measure = |s: &str| s.chars().count() as f64;
        assert_eq!(wrap_text("a\nb", 10.0, measure), ["a", "b"]);
        assert_eq!(wrap_text("", 10.0, measure), [""]);
    }
}
