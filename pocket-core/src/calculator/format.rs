//! Number formatting for the calculator display.
//!
//! Results are stored with [`RESULT_SIGNIFICANT_DIGITS`] so floating-point
//! noise such as `0.1 + 0.2 = 0.30000000000000004` never reaches the
//! operand text. The display rounds further, to
//! [`DISPLAY_SIGNIFICANT_DIGITS`], and switches to exponent notation outside
//! the band `[1e-6, 1e12)`.
//!
//! Both roundings send a midpoint away from zero, so `12345678905` shows as
//! `12345678910` on a ten-digit display.

use rust_decimal::{Decimal, RoundingStrategy};

/// Significant digits kept when a result is stored as the current operand.
pub const RESULT_SIGNIFICANT_DIGITS: usize = 12;

/// Significant digits shown for values rendered in plain notation.
pub const DISPLAY_SIGNIFICANT_DIGITS: usize = 10;

/// Fractional digits of the mantissa in exponent notation.
pub const EXPONENT_FRACTION_DIGITS: usize = 4;

/// Magnitudes at or above this value are displayed in exponent notation.
pub const EXPONENT_UPPER_BOUND: f64 = 1e12;

/// Non-zero magnitudes below this value are displayed in exponent notation.
pub const EXPONENT_LOWER_BOUND: f64 = 1e-6;

// Range in which `number_to_string` uses plain notation.
const PLAIN_TEXT_MIN: f64 = 1e-6;
const PLAIN_TEXT_MAX: f64 = 1e21;

// Band in which a `Decimal` keeps every significant digit of an `f64`.
const DECIMAL_MIN: f64 = 1e-10;
const DECIMAL_MAX: f64 = 1e27;

/// Rounds `value` to `digits` significant digits, midpoints away from zero.
///
/// Zero, non-finite values and a `digits` of zero are returned unchanged.
///
/// # Examples
///
/// ```
/// use pocket_core::calculator::format::round_significant;
///
/// assert_eq!(round_significant(0.1 + 0.2, 12), 0.3);
/// assert_eq!(round_significant(123456.789, 4), 123500.0);
/// assert_eq!(round_significant(-0.000123456, 2), -0.00012);
/// assert_eq!(round_significant(1234567890125.0, 12), 1234567890130.0);
/// ```
pub fn round_significant(
    value: f64,
    digits: usize,
) -> f64 {
    if digits == 0 || value == 0.0 || !value.is_finite() {
        return value;
    }
    if (DECIMAL_MIN..DECIMAL_MAX).contains(&value.abs())
        && let Some(rounded) = round_decimal(value, digits)
    {
        return rounded;
    }
    // Past the band formatting rounds instead, midpoints to even.
    format!("{:.*e}", digits - 1, value)
        .parse()
        .unwrap_or(value)
}

fn round_decimal(
    value: f64,
    digits: usize,
) -> Option<f64> {
    let digits = u32::try_from(digits).ok()?;
    Decimal::from_f64_retain(value)?
        .round_sf_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero)?
        .normalize()
        .to_string()
        .parse()
        .ok()
}

/// Converts a number to its shortest round-trip decimal text.
///
/// Plain notation is used for magnitudes in `[1e-6, 1e21)`; anything else is
/// written as `<mantissa>e<sign><exponent>`. Negative zero is written `"0"`.
///
/// # Examples
///
/// ```
/// use pocket_core::calculator::format::number_to_string;
///
/// assert_eq!(number_to_string(8.0), "8");
/// assert_eq!(number_to_string(-0.25), "-0.25");
/// assert_eq!(number_to_string(1e-7), "1e-7");
/// assert_eq!(number_to_string(1.5e21), "1.5e+21");
/// assert_eq!(number_to_string(-0.0), "0");
/// ```
pub fn number_to_string(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if (PLAIN_TEXT_MIN..PLAIN_TEXT_MAX).contains(&magnitude) {
        format!("{value}")
    } else {
        with_signed_exponent(format!("{value:e}"))
    }
}

/// Formats a number for the calculator display.
///
/// # Examples
///
/// ```
/// use pocket_core::calculator::format::format_number;
///
/// assert_eq!(format_number(8.0), "8");
/// assert_eq!(format_number(1.0 / 3.0), "0.3333333333");
/// assert_eq!(format_number(1234567890123.0), "1.2346e+12");
/// assert_eq!(format_number(0.00000012345), "1.2345e-7");
/// assert_eq!(format_number(1000050000000.0), "1.0001e+12");
/// assert_eq!(format_number(0.0), "0");
/// ```
pub fn format_number(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= EXPONENT_UPPER_BOUND
        || (magnitude > 0.0 && magnitude < EXPONENT_LOWER_BOUND)
    {
        let mantissa_digits = EXPONENT_FRACTION_DIGITS + 1;
        let rounded = round_significant(value, mantissa_digits);
        with_signed_exponent(format!("{:.*e}", EXPONENT_FRACTION_DIGITS, rounded))
    } else {
        number_to_string(round_significant(value, DISPLAY_SIGNIFICANT_DIGITS))
    }
}

/// Rust writes `1e21`; the display always carries the exponent sign.
fn with_signed_exponent(text: String) -> String {
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => text,
    }
}
