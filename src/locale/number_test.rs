use super::*;
use crate::locale::digits::PERSIAN_DIGITS;

const MINUS: &str = "\u{200E}\u{2212}";

// =============================================================
// format_number
// =============================================================

#[test]
fn formats_grouped_persian_digits_with_decimal_mark() {
    assert_eq!(format_number(&1234.5), "۱٬۲۳۴٫۵");
    assert_eq!(format_number("1234.5"), "۱٬۲۳۴٫۵");
}

#[test]
fn groups_every_three_integer_digits() {
    assert_eq!(format_number(&0), "۰");
    assert_eq!(format_number(&100), "۱۰۰");
    assert_eq!(format_number(&1000), "۱٬۰۰۰");
    assert_eq!(format_number(&1_000_000u32), "۱٬۰۰۰٬۰۰۰");
    assert_eq!(format_number(&1e21), "۱٬۰۰۰٬۰۰۰٬۰۰۰٬۰۰۰٬۰۰۰٬۰۰۰٬۰۰۰");
}

#[test]
fn rounds_to_three_fraction_digits_half_away_from_zero() {
    assert_eq!(format_number(&1.23456), "۱٫۲۳۵");
    assert_eq!(format_number(&1.2344), "۱٫۲۳۴");
    assert_eq!(format_number(&999.9996), "۱٬۰۰۰");
    assert_eq!(format_number(&(0.1 + 0.2)), "۰٫۳");
}

#[test]
fn negative_values_carry_minus_prefix() {
    assert_eq!(format_number(&-42.5), format!("{MINUS}۴۲٫۵"));
    assert_eq!(format_number("-1000"), format!("{MINUS}۱٬۰۰۰"));
}

#[test]
fn malformed_input_renders_nan_sentinel() {
    assert_eq!(format_number("abc"), "ناعدد");
    assert_eq!(format_number(""), "ناعدد");
    assert_eq!(format_number(&None::<f64>), "ناعدد");
    assert_eq!(format_number(&f64::NAN), "ناعدد");
}

#[test]
fn infinities_render_infinity_symbol() {
    assert_eq!(format_number(&f64::INFINITY), "∞");
    assert_eq!(format_number("-Infinity"), format!("{MINUS}∞"));
}

#[test]
fn string_input_uses_leading_numeric_prefix() {
    assert_eq!(format_number("12px"), "۱۲");
    assert_eq!(format_number("  3.5e2 toman"), "۳۵۰");
    assert_eq!(format_number(&String::from("7.25")), "۷٫۲۵");
}

#[test]
fn output_contains_only_locale_characters() {
    for value in [0.5, 12.0, 1234.5, 9_876_543.21, 1e15] {
        let rendered = format_number(&value);
        assert!(
            rendered
                .chars()
                .all(|c| PERSIAN_DIGITS.contains(&c) || c == GROUP_SEPARATOR || c == DECIMAL_SEPARATOR),
            "unexpected character in {rendered}"
        );
    }
}

// =============================================================
// parse_float
// =============================================================

#[test]
fn parse_float_accepts_partial_decimal_forms() {
    assert_eq!(parse_float(".5"), 0.5);
    assert_eq!(parse_float("5."), 5.0);
    assert_eq!(parse_float("+.5e1"), 5.0);
    assert_eq!(parse_float("\u{FEFF} 7"), 7.0);
}

#[test]
fn parse_float_ignores_incomplete_exponent() {
    assert_eq!(parse_float("1e"), 1.0);
    assert_eq!(parse_float("1e+"), 1.0);
    assert_eq!(parse_float("2E-3x"), 0.002);
}

#[test]
fn parse_float_without_prefix_is_nan() {
    assert!(parse_float("-").is_nan());
    assert!(parse_float(".").is_nan());
    assert!(parse_float("infinity").is_nan());
    assert!(parse_float("x1").is_nan());
}

#[test]
fn parse_float_reads_signed_infinity() {
    assert_eq!(parse_float("Infinity"), f64::INFINITY);
    assert_eq!(parse_float("-Infinityish"), f64::NEG_INFINITY);
}

// =============================================================
// parse_localized_number
// =============================================================

#[test]
fn localized_rendering_round_trips() {
    for value in [0.0, 1.5, 1234.5, -98_765.432, 1e9, 0.125] {
        let rendered = format_number(&value);
        let parsed = parse_localized_number(&rendered).unwrap();
        assert!((parsed - value).abs() < 1e-9, "{value} -> {rendered} -> {parsed}");
    }
}

#[test]
fn localized_parse_accepts_latin_and_special_forms() {
    assert_eq!(parse_localized_number("1,234.5"), Some(1234.5));
    assert_eq!(parse_localized_number("-12"), Some(-12.0));
    assert_eq!(parse_localized_number("∞"), Some(f64::INFINITY));
    assert!(parse_localized_number("ناعدد").is_some_and(f64::is_nan));
}

#[test]
fn localized_parse_rejects_foreign_text() {
    assert_eq!(parse_localized_number("۱۲ تومان"), None);
    assert_eq!(parse_localized_number(""), None);
}

// =============================================================
// format_amount
// =============================================================

#[test]
fn format_amount_uses_two_decimals_and_commas() {
    assert_eq!(format_amount(1234.5), "1,234.50");
    assert_eq!(format_amount(0.0), "0.00");
    assert_eq!(format_amount(-1_234_567.891), "-1,234,567.89");
    assert_eq!(format_amount(999.999), "1,000.00");
}

#[test]
fn format_amount_non_finite_values() {
    assert_eq!(format_amount(f64::NAN), "nan");
    assert_eq!(format_amount(f64::INFINITY), "inf");
    assert_eq!(format_amount(f64::NEG_INFINITY), "-inf");
}

// =============================================================
// Script values
// =============================================================

#[test]
fn script_numbers_pass_through_unparsed() {
    assert_eq!(coerce_script_value(Some(12.5), None), 12.5);
    assert!(coerce_script_value(Some(f64::NAN), Some("7")).is_nan());
}

#[test]
fn script_values_without_a_number_go_through_their_string_form() {
    // String([5]) and String(10n)
    assert_eq!(coerce_script_value(None, Some("5")), 5.0);
    assert_eq!(coerce_script_value(None, Some("10")), 10.0);
    // String(null), String(true)
    assert!(coerce_script_value(None, Some("null")).is_nan());
    assert!(coerce_script_value(None, Some("true")).is_nan());
    assert!(coerce_script_value(None, None).is_nan());
    assert_eq!(format_float(coerce_script_value(None, Some("1234.5"))), "۱٬۲۳۴٫۵");
}
