//! Internal helpers for text normalization.
//!
//! These utilities are **not** part of the public API. They centralize the
//! way free text from spreadsheets is compared and turned into identifiers.

use unicode_normalization::UnicodeNormalization;

/// NFKC-normalized, lowercased, whitespace-collapsed key used for keyword
/// matching.
pub(crate) fn normalize_key(value: &str) -> String {
    let folded: String = value.nfkc().collect::<String>().to_lowercase();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Turns a display name into an identifier (`Rice & Biryanis` → `rice-biryanis`).
pub(crate) fn slugify(value: &str) -> String {
    let key = normalize_key(value);
    let mut slug = String::with_capacity(key.len());
    for c in key.chars() {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// `veg-mains` → `Veg Mains`.
pub(crate) fn title_from_slug(slug: &str) -> String {
    slug.split(['-', '_'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_folds_case_width_and_spaces() {
        assert_eq!(normalize_key("  Garlic   NAAN "), "garlic naan");
        assert_eq!(normalize_key("ＢＩＲＹＡＮＩ"), "biryani");
    }

    #[test]
    fn slugify_and_title() {
        assert_eq!(slugify("Rice & Biryanis"), "rice-biryanis");
        assert_eq!(slugify("Ice-Cream!"), "ice-cream");
        assert_eq!(title_from_slug("veg-mains"), "Veg Mains");
    }
}
