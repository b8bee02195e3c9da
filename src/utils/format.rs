/// Longest exact decimal fraction of an f64 (the smallest subnormal).
const MAX_F64_FRACTION_DIGITS: usize = 1074;

/// Render a number the way the rating details are displayed: integral values
/// without a decimal point, everything else in shortest round-trip form.
/// Magnitudes at or above `1e21` or below `1e-6` switch to exponent form
/// (`1e+21`, `1.5e-7`).
pub fn display_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        // avoid "-0"
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{}", value);
    }

    let exponential = format!("{:e}", value);
    match exponential.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => exponential,
    }
}

/// Fixed-point rendering with `digits` decimals, e.g. `(0.5, 1) -> "0.5"`.
///
/// Rounds on the exact decimal value of the f64 with ties away from zero, so
/// `6.25` renders as `6.3` while `1.005` (stored as `1.00499...`) renders as
/// `1.00`. Magnitudes at or above `1e21` fall back to [`display_number`].
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() || value.abs() >= 1e21 {
        return display_number(value);
    }

    let exact = format!("{:.*}", MAX_F64_FRACTION_DIGITS, value.abs());
    let (integer, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut kept: Vec<u8> = integer
        .bytes()
        .chain(fraction.bytes().chain(std::iter::repeat(b'0')).take(digits))
        .collect();

    if fraction.as_bytes().get(digits).is_some_and(|d| *d >= b'5') {
        let mut carry = true;
        for d in kept.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, b'1');
        }
    }

    let split = kept.len() - digits;
    let mut rendered = String::with_capacity(kept.len() + 2);
    if value < 0.0 {
        rendered.push('-');
    }
    rendered.extend(kept[..split].iter().map(|d| char::from(*d)));
    if digits > 0 {
        rendered.push('.');
        rendered.extend(kept[split..].iter().map(|d| char::from(*d)));
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_number() {
        assert_eq!(display_number(70.0), "70");
        assert_eq!(display_number(70.5), "70.5");
        assert_eq!(display_number(0.75), "0.75");
        assert_eq!(display_number(0.6), "0.6");
        assert_eq!(display_number(-0.0), "0");
        assert_eq!(display_number(-5.0), "-5");
    }

    #[test]
    fn test_display_number_exponent_form() {
        assert_eq!(display_number(1e21), "1e+21");
        assert_eq!(display_number(-2.5e22), "-2.5e+22");
        assert_eq!(display_number(1e-7), "1e-7");
        assert_eq!(display_number(1.5e-7), "1.5e-7");
        assert_eq!(display_number(0.000001), "0.000001");
        assert_eq!(display_number(f64::NAN), "NaN");
        assert_eq!(display_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_to_fixed() {
        assert_eq!(to_fixed(100.0, 1), "100.0");
        assert_eq!(to_fixed(33.333_333, 1), "33.3");
        assert_eq!(to_fixed(66.666_666, 1), "66.7");
        assert_eq!(to_fixed(5.0, 0), "5");
        assert_eq!(to_fixed(0.5, 3), "0.500");
    }

    #[test]
    fn test_to_fixed_rounds_exact_ties_up() {
        assert_eq!(to_fixed(6.25, 1), "6.3");
        assert_eq!(to_fixed(12.25, 1), "12.3");
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(-6.25, 1), "-6.3");
    }

    #[test]
    fn test_to_fixed_uses_stored_value() {
        // 1.005 and 9.95 are stored just below the tie, 99.95 just above
        assert_eq!(to_fixed(1.005, 2), "1.00");
        assert_eq!(to_fixed(9.95, 1), "9.9");
        assert_eq!(to_fixed(99.95, 1), "100.0");
        assert_eq!(to_fixed(0.05, 1), "0.1");
    }

    #[test]
    fn test_to_fixed_sign_and_zero() {
        assert_eq!(to_fixed(-0.0, 1), "0.0");
        assert_eq!(to_fixed(-0.01, 1), "-0.0");
        assert_eq!(to_fixed(1e21, 1), "1e+21");
    }
}
