//! Number formatting ahead of plural selection.
//!
//! Plural operands are read from the formatted text, so `1` and `1.0` select
//! differently.

use super::PluralOptions;

/// Significant digits `f64` can carry without formatting noise.
const MAX_PRECISION: u32 = 15;

/// Format the absolute value of `value` like `Intl.NumberFormat` would with
/// the digit options of `options`.
///
/// Significant-digit options take precedence over fraction-digit options.
pub(super) fn format_decimal(value: f64, options: &PluralOptions) -> String {
    let value = value.abs();
    let mut text = if options.minimum_significant_digits.is_some()
        || options.maximum_significant_digits.is_some()
    {
        format_significant(value, options)
    } else {
        format_fraction(value, options)
    };

    if let Some(min_integer) = options.minimum_integer_digits {
        let integer_len = text.find('.').unwrap_or(text.len());
        let missing = (min_integer as usize).saturating_sub(integer_len);
        text.insert_str(0, &"0".repeat(missing));
    }
    text
}

fn format_fraction(value: f64, options: &PluralOptions) -> String {
    let min = options.minimum_fraction_digits.unwrap_or(0).min(MAX_PRECISION);
    let max = options
        .maximum_fraction_digits
        .unwrap_or(min.max(3))
        .clamp(min, MAX_PRECISION);

    let rounded = round_to(value, max as i32);
    pad_fraction(rounded.to_string(), min as usize)
}

fn format_significant(value: f64, options: &PluralOptions) -> String {
    let max = options
        .maximum_significant_digits
        .unwrap_or(21)
        .clamp(1, MAX_PRECISION);
    let min = options.minimum_significant_digits.unwrap_or(1).clamp(1, max);

    let magnitude = if value == 0.0 {
        0
    } else {
        value.log10().floor() as i32
    };
    let rounded = round_to(value, max as i32 - 1 - magnitude);
    let text = rounded.to_string();

    let significant = significant_digits(&text);
    if significant >= min as usize {
        return text;
    }
    let fraction_len = text.split_once('.').map_or(0, |(_, f)| f.len());
    pad_fraction(text, fraction_len + (min as usize - significant))
}

/// Round half away from zero to `decimals` places; negative places round to
/// tens, hundreds and so on.
fn round_to(value: f64, decimals: i32) -> f64 {
    if decimals >= 0 {
        let factor = 10f64.powi(decimals);
        (value * factor).round() / factor
    } else {
        let factor = 10f64.powi(-decimals);
        (value / factor).round() * factor
    }
}

fn pad_fraction(mut text: String, min_fraction: usize) -> String {
    let current = match text.split_once('.') {
        Some((_, fraction)) => fraction.len(),
        None => {
            if min_fraction > 0 {
                text.push('.');
            }
            0
        }
    };
    if current < min_fraction {
        text.push_str(&"0".repeat(min_fraction - current));
    }
    text
}

fn significant_digits(text: &str) -> usize {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        digits.len()
    } else {
        trimmed.len()
    }
}
