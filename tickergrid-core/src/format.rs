//! Display formatting for grid cells.

use rust_decimal::prelude::*;

/// Shown in place of any value that cannot be derived.
pub const PLACEHOLDER: &str = "—";

const SPARK_BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Format an amount as en-US dollar text: `$1,234.50`, `-$5.00`.
///
/// Rounds half away from zero on the shortest decimal text of the value, so
/// `1.005` becomes `$1.01` and `2.675` becomes `$2.68`. A negative sign is
/// kept for values that round to zero. Non-finite input yields
/// [`PLACEHOLDER`].
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return PLACEHOLDER.to_string();
    }

    let sign = if amount.is_sign_negative() { "-" } else { "" };
    format!("{sign}${}", group_thousands(&cents(amount.abs())))
}

/// `magnitude` rounded to cents, as plain digits with two decimals.
fn cents(magnitude: f64) -> String {
    let shortest = magnitude.to_string();
    match shortest.parse::<Decimal>() {
        Ok(value) => {
            let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            two_decimals(&rounded.to_string())
        }
        // Past Decimal's range every f64 is integral.
        Err(_) if !shortest.contains('.') => format!("{shortest}.00"),
        // Too many fractional digits for Decimal: far below half a cent.
        Err(_) => "0.00".to_string(),
    }
}

fn two_decimals(text: &str) -> String {
    let (int_part, frac) = text.split_once('.').unwrap_or((text, ""));
    format!("{int_part}.{frac:0<2}")
}

/// Plain number text (`150`, `12.5`), or [`PLACEHOLDER`] when non-finite.
pub fn format_number(value: f64) -> String {
    if value.is_finite() {
        format!("{value}")
    } else {
        PLACEHOLDER.to_string()
    }
}

/// Block-character sparkline over the last `width` values.
///
/// Values are normalised between the window's min and max; a flat window
/// renders at mid height and non-finite points render as blanks.
pub fn sparkline(values: &[f64], width: usize) -> String {
    let window = &values[values.len().saturating_sub(width)..];

    let (min, max) = window
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    let span = max - min;

    window
        .iter()
        .map(|&v| {
            if !v.is_finite() {
                ' '
            } else if span <= f64::EPSILON {
                SPARK_BARS[3]
            } else {
                let level = ((v - min) / span * 7.0).round() as usize;
                SPARK_BARS[level.min(7)]
            }
        })
        .collect()
}

fn group_thousands(digits: &str) -> String {
    let (int_part, frac) = digits.split_once('.').unwrap_or((digits, ""));
    let mut out = String::with_capacity(digits.len() + int_part.len() / 3);

    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_basic() {
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(-5.0), "-$5.00");
    }

    #[test]
    fn currency_grouping() {
        assert_eq!(format_currency(999.0), "$999.00");
        assert_eq!(format_currency(1000.0), "$1,000.00");
        assert_eq!(format_currency(1_234_567.891), "$1,234,567.89");
        assert_eq!(format_currency(-98_765.4), "-$98,765.40");
    }

    #[test]
    fn currency_rounds_shortest_decimal() {
        assert_eq!(format_currency(0.125), "$0.13");
        assert_eq!(format_currency(-0.125), "-$0.13");
        assert_eq!(format_currency(1.005), "$1.01");
        assert_eq!(format_currency(2.675), "$2.68");
        assert_eq!(format_currency(-2.675), "-$2.68");
        assert_eq!(format_currency(0.999), "$1.00");
        assert_eq!(format_currency(0.004), "$0.00");
    }

    #[test]
    fn currency_large_magnitudes() {
        assert_eq!(format_currency(1e20), "$100,000,000,000,000,000,000.00");
        assert_eq!(
            format_currency(1e30),
            "$1,000,000,000,000,000,000,000,000,000,000.00"
        );
        assert_eq!(
            format_currency(-1e30),
            "-$1,000,000,000,000,000,000,000,000,000,000.00"
        );
    }

    #[test]
    fn currency_tiny_magnitudes() {
        assert_eq!(format_currency(1e-30), "$0.00");
        assert_eq!(format_currency(-1e-30), "-$0.00");
    }

    #[test]
    fn currency_negative_zero_keeps_sign() {
        assert_eq!(format_currency(-0.0), "-$0.00");
        assert_eq!(format_currency(-0.001), "-$0.00");
    }

    #[test]
    fn currency_non_finite_is_placeholder() {
        assert_eq!(format_currency(f64::NAN), PLACEHOLDER);
        assert_eq!(format_currency(f64::INFINITY), PLACEHOLDER);
    }

    #[test]
    fn number_text() {
        assert_eq!(format_number(150.0), "150");
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(f64::NAN), PLACEHOLDER);
    }

    #[test]
    fn sparkline_shapes() {
        assert_eq!(sparkline(&[1.0, 2.0, 3.0], 30), "▁▅█");
        assert_eq!(sparkline(&[5.0, 5.0], 30), "▄▄");
        assert_eq!(sparkline(&[], 30), "");
        assert_eq!(sparkline(&[1.0, 2.0, 3.0], 0), "");
    }

    #[test]
    fn sparkline_keeps_last_window() {
        let line = sparkline(&[100.0, 1.0, 2.0], 2);
        assert_eq!(line.chars().count(), 2);
        assert_eq!(line, "▁█");
    }

    #[test]
    fn sparkline_blanks_non_finite() {
        assert_eq!(sparkline(&[1.0, f64::NAN, 3.0], 30), "▁ █");
    }
}
