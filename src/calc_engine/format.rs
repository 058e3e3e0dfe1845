/// Significant digits shown for a result.
pub const SIGNIFICANT_DIGITS: usize = 10;

/// Maps `-0.0` to `0.0`; every other value passes through.
pub fn normalize_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

/// Formats a result the way it is shown to the user: at most
/// [`SIGNIFICANT_DIGITS`] significant digits, general notation.
pub fn format_result(value: f64) -> String {
    format_general(normalize_zero(value), SIGNIFICANT_DIGITS)
}

/// Printf-style `%.{precision}g`: fixed notation while the decimal exponent
/// is in `[-4, precision)`, `d.ddde±XX` otherwise, insignificant zeros trimmed.
pub fn format_general(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let precision = precision.max(1);
    // Rounds to `precision` digits first, so the exponent reflects any carry.
    let scientific = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
