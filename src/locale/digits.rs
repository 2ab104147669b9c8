//! Digit glyphs and separators for the fa-IR locale.

#[cfg(test)]
#[path = "digits_test.rs"]
mod digits_test;

/// Extended Arabic-Indic digits, indexed by value.
pub const PERSIAN_DIGITS: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];

/// Arabic thousands separator (U+066C).
pub const GROUP_SEPARATOR: char = '\u{066C}';

/// Arabic decimal separator (U+066B).
pub const DECIMAL_SEPARATOR: char = '\u{066B}';

/// Left-to-right mark followed by the Unicode minus sign.
pub const MINUS_PREFIX: &str = "\u{200E}\u{2212}";

/// NaN rendering in the Persian locale.
pub const NAN_SYMBOL: &str = "ناعدد";

pub const INFINITY_SYMBOL: &str = "∞";

/// Replace ASCII digits with Persian digits, leaving everything else intact.
pub fn to_persian_digits(raw: &str) -> String {
    raw.chars().map(|c| persian_digit(c).unwrap_or(c)).collect()
}

fn persian_digit(c: char) -> Option<char> {
    ('0'..='9').zip(PERSIAN_DIGITS).find_map(|(latin, persian)| (latin == c).then_some(persian))
}

/// Replace Persian and Arabic-Indic digits with ASCII digits.
pub fn to_latin_digits(raw: &str) -> String {
    raw.chars()
        .map(|c| digit_value(c).and_then(|d| char::from_digit(d, 10)).unwrap_or(c))
        .collect()
}

/// Numeric value of an ASCII, Persian, or Arabic-Indic digit.
pub fn digit_value(c: char) -> Option<u32> {
    match c {
        '0'..='9' => Some(u32::from(c) - u32::from('0')),
        '\u{06F0}'..='\u{06F9}' => Some(u32::from(c) - 0x06F0),
        '\u{0660}'..='\u{0669}' => Some(u32::from(c) - 0x0660),
        _ => None,
    }
}
