// Percent arithmetic and number helpers.
//
// The percent primitives are total: division by zero is mapped to fixed
// sentinel values so a report always renders.
use num_format::{Locale, ToFormattedString};

/// Period-over-period change of `current` against `prior`, in percent.
///
/// A zero `prior` does not produce a true percent change:
/// - `100` when `current > 0`,
/// - `0` when `current == 0`,
/// - `-100` when `current < 0`.
pub fn percent_change(current: f64, prior: f64) -> f64 {
    if prior == 0.0 {
        if current > 0.0 {
            100.0
        } else if current == 0.0 {
            0.0
        } else {
            -100.0
        }
    } else {
        (current - prior) / prior * 100.0
    }
}

/// Share of `value` in `total`, in percent. Every share is `0` when the
/// total is zero, whatever the value.
pub fn percent_share(value: f64, total: f64) -> f64 {
    if total == 0.0 || value == 0.0 {
        return 0.0;
    }
    value / total * 100.0
}

/// Parse a warehouse cell into `f64`, tolerating the usual export noise.
///
/// - Trims whitespace.
/// - Rejects values that contain alphabetic characters (except an exponent).
/// - Strips thousands separators like `","` before parsing.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return None;
    }
    let s = s.replace(',', "");
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn parse_u32_safe(s: Option<&str>) -> Option<u32> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<u32>().ok()
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Fixed decimals plus thousands separators on the integer part,
    // e.g. `1,234,567.89`.
    let neg = n.is_sign_negative() && n != 0.0;
    let s = format!("{:.*}", decimals, n.abs());
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        res.push('.');
        res.push_str(frac);
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}
