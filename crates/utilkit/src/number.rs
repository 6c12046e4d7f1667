/// Limit `value` to the range between `min` and `max`. Reversed bounds are
/// swapped.
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    let (lo, hi) = if min > max { (max, min) } else { (min, max) };
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}

/// Whether `value` lies in `[start, end)`. Reversed bounds are swapped.
pub fn in_range(value: f64, start: f64, end: f64) -> bool {
    let (lo, hi) = if start > end { (end, start) } else { (start, end) };
    value >= lo && value < hi
}

/// Round to `decimals` places. Negative `decimals` round to tens, hundreds...
pub fn round_to(value: f64, decimals: i32) -> f64 {
    if decimals < 0 {
        let factor = 10f64.powi(-decimals);
        return (value / factor).round() * factor;
    }
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// `1234567` becomes `"1,234,567"`.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps() {
        assert_eq!(clamp(15, 0, 10), 10);
        assert_eq!(clamp(-5, 0, 10), 0);
        assert_eq!(clamp(5, 10, 0), 5);
        assert_eq!(clamp(15.5, 10.0, 0.0), 10.0);
    }

    #[test]
    fn ranges_and_rounding() {
        assert!(in_range(3.0, 2.0, 4.0));
        assert!(!in_range(4.0, 2.0, 4.0));
        assert!(in_range(3.0, 4.0, 2.0));
        assert_eq!(round_to(4.006, 2), 4.01);
        assert_eq!(round_to(4060.0, -2), 4100.0);
    }

    #[test]
    fn thousands() {
        assert_eq!(format_thousands(1_234_567), "1,234,567");
        assert_eq!(format_thousands(-1000), "-1,000");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(i64::MIN), "-9,223,372,036,854,775,808");
    }
}
