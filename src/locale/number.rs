//! Number formatting for the admin panel.
//!
//! DESIGN
//! ======
//! Input is coerced the way the panel's page scripts coerce it (`parseFloat`
//! semantics: leading numeric prefix, otherwise NaN) and then rendered with
//! the fa-IR conventions: Persian digits, `٬` grouping, `٫` decimal mark, at
//! most three fraction digits. Rounding is applied to the shortest
//! round-trip decimal form of the value, half away from zero.
//!
//! Malformed input is not an error. It renders the locale's NaN sentinel.

use super::digits::{
    DECIMAL_SEPARATOR, GROUP_SEPARATOR, INFINITY_SYMBOL, MINUS_PREFIX, NAN_SYMBOL, digit_value, to_persian_digits,
};

#[cfg(test)]
#[path = "number_test.rs"]
mod number_test;

/// Maximum fraction digits shown by `format_number`.
pub const MAX_FRACTION_DIGITS: usize = 3;

/// Anything the panel may hand to `format_number`.
pub trait NumberLike {
    /// Coerce to a float. Non-numeric input yields NaN.
    fn to_float(&self) -> f64;
}

impl NumberLike for f64 {
    fn to_float(&self) -> f64 {
        *self
    }
}

impl NumberLike for f32 {
    fn to_float(&self) -> f64 {
        f64::from(*self)
    }
}

macro_rules! lossless_number_like {
    ($($ty:ty),*) => {
        $(impl NumberLike for $ty {
            fn to_float(&self) -> f64 {
                f64::from(*self)
            }
        })*
    };
}

macro_rules! wide_number_like {
    ($($ty:ty),*) => {
        $(impl NumberLike for $ty {
            #[allow(clippy::cast_precision_loss)]
            fn to_float(&self) -> f64 {
                *self as f64
            }
        })*
    };
}

lossless_number_like!(i8, i16, i32, u8, u16, u32);
wide_number_like!(i64, u64, isize, usize);

impl NumberLike for str {
    fn to_float(&self) -> f64 {
        parse_float(self)
    }
}

impl NumberLike for String {
    fn to_float(&self) -> f64 {
        parse_float(self)
    }
}

impl<T: NumberLike + ?Sized> NumberLike for &T {
    fn to_float(&self) -> f64 {
        (**self).to_float()
    }
}

impl<T: NumberLike> NumberLike for Option<T> {
    fn to_float(&self) -> f64 {
        self.as_ref().map_or(f64::NAN, NumberLike::to_float)
    }
}

/// Format a number-like value for display in the Persian locale.
///
/// `format_number(&1234.5)` renders `۱٬۲۳۴٫۵`.
pub fn format_number<T: NumberLike + ?Sized>(value: &T) -> String {
    format_float(value.to_float())
}

/// Format an `f64` for display in the Persian locale.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return NAN_SYMBOL.to_owned();
    }
    let body = if value.is_infinite() {
        INFINITY_SYMBOL.to_owned()
    } else {
        let (int_digits, frac_digits) = round_fraction(&format!("{}", value.abs()), MAX_FRACTION_DIGITS);
        let mut out = group_thousands(&int_digits, GROUP_SEPARATOR);
        if !frac_digits.is_empty() {
            out.push(DECIMAL_SEPARATOR);
            out.push_str(&frac_digits);
        }
        to_persian_digits(&out)
    };
    if value.is_sign_negative() { format!("{MINUS_PREFIX}{body}") } else { body }
}

/// Parse a string the way `parseFloat` does.
///
/// Leading whitespace is skipped, then an optional sign and either
/// `Infinity` or the longest valid decimal prefix are consumed. Anything
/// after the prefix is ignored. No prefix yields NaN.
pub fn parse_float(raw: &str) -> f64 {
    let trimmed = raw.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}');
    let (negative, body) = if let Some(rest) = trimmed.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = trimmed.strip_prefix('+') {
        (false, rest)
    } else {
        (false, trimmed)
    };

    let magnitude = if body.starts_with("Infinity") {
        f64::INFINITY
    } else {
        let len = decimal_prefix_len(body.as_bytes());
        if len == 0 {
            return f64::NAN;
        }
        body[..len].parse::<f64>().unwrap_or(f64::NAN)
    };
    if negative { -magnitude } else { magnitude }
}

/// Coerce a page-script value for formatting. A JS number is used as is;
/// anything else goes through its `String(value)` form and `parse_float`,
/// as `parseFloat` does. No string form at all yields NaN.
pub fn coerce_script_value(number: Option<f64>, text: Option<&str>) -> f64 {
    match (number, text) {
        (Some(n), _) => n,
        (None, Some(s)) => parse_float(s),
        (None, None) => f64::NAN,
    }
}

/// Reverse `format_number`: accept Persian or Latin digits, strip grouping,
/// map the decimal mark and minus prefix back. Returns `None` when the text
/// is not a rendered number.
pub fn parse_localized_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim().trim_start_matches('\u{200E}');
    if trimmed == NAN_SYMBOL {
        return Some(f64::NAN);
    }
    let (negative, body) = match trimmed.strip_prefix(['\u{2212}', '-']) {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    if body == INFINITY_SYMBOL {
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let mut latin = String::with_capacity(body.len());
    for c in body.chars() {
        if let Some(d) = digit_value(c) {
            latin.push(char::from_digit(d, 10)?);
        } else if c == GROUP_SEPARATOR || c == ',' {
            continue;
        } else if c == DECIMAL_SEPARATOR || c == '.' {
            latin.push('.');
        } else {
            return None;
        }
    }
    match latin.parse::<f64>() {
        Ok(v) if negative => Some(-v),
        Ok(v) => Some(v),
        Err(_) => None,
    }
}

/// Format an amount the way the panel's server-side templates do: Latin
/// digits, comma grouping, exactly two decimals (`1,234.50`).
pub fn format_amount(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_owned();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-inf".to_owned() } else { "inf".to_owned() };
    }
    let fixed = format!("{:.2}", value.abs());
    let (int_digits, frac_digits) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value.is_sign_negative() { "-" } else { "" };
    format!("{sign}{}.{frac_digits}", group_thousands(int_digits, ','))
}

/// Length of the longest `digits[.digits][e[+-]digits]` prefix with at
/// least one mantissa digit.
fn decimal_prefix_len(bytes: &[u8]) -> usize {
    let count_digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let int_len = count_digits(0);
    let mut end = int_len;
    let mut mantissa_digits = int_len;
    if bytes.get(end) == Some(&b'.') {
        let frac_len = count_digits(end + 1);
        mantissa_digits += frac_len;
        if mantissa_digits > 0 {
            end += 1 + frac_len;
        }
    }
    if mantissa_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_len = count_digits(exp);
        if exp_len > 0 {
            end = exp + exp_len;
        }
    }
    end
}

/// Round a plain decimal string (`"1234.5678"`) to `max_frac` fraction
/// digits, half away from zero, dropping trailing zeros.
fn round_fraction(repr: &str, max_frac: usize) -> (String, String) {
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr, ""));
    if frac_part.len() <= max_frac {
        return (int_part.to_owned(), frac_part.trim_end_matches('0').to_owned());
    }

    let mut digits: Vec<u8> = int_part.bytes().chain(frac_part.bytes().take(max_frac)).collect();
    if frac_part.as_bytes()[max_frac] >= b'5' {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - max_frac;
    let int_digits = String::from_utf8_lossy(&digits[..split]).into_owned();
    let frac_digits = String::from_utf8_lossy(&digits[split..]).trim_end_matches('0').to_owned();
    (int_digits, frac_digits)
}

/// Insert `sep` between every group of three integer digits.
fn group_thousands(int_digits: &str, sep: char) -> String {
    let len = int_digits.len();
    let mut out = String::with_capacity(len + len / 3 * sep.len_utf8());
    for (i, c) in int_digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(c);
    }
    out
}
