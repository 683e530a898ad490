//! en-US style numeric formatting for the interpolated milestone narrative.

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Rounds half away from zero and groups thousands: 15000.0 -> "15,000".
pub fn format_number(value: f64) -> String {
    let rounded = value.round();
    if rounded < 0.0 {
        format!("-{}", group_thousands(rounded.abs() as u64))
    } else {
        group_thousands(rounded as u64)
    }
}

/// USD with grouping and two decimals: 796875.0 -> "$796,875.00".
pub fn format_currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);
    let frac = cents % 100;
    if value < 0.0 {
        format!("-${whole}.{frac:02}")
    } else {
        format!("${whole}.{frac:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_number_groups_thousands() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1_000.0), "1,000");
        assert_eq!(format_number(15_000.0), "15,000");
        assert_eq!(format_number(1_234_567.0), "1,234,567");
    }

    #[test]
    fn format_number_rounds_half_away_from_zero() {
        assert_eq!(format_number(2.5), "3");
        assert_eq!(format_number(2.4), "2");
        assert_eq!(format_number(-2.5), "-3");
    }

    #[test]
    fn format_currency_always_shows_cents() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(796_875.0), "$796,875.00");
        assert_eq!(format_currency(1_234.5), "$1,234.50");
        assert_eq!(format_currency(-12.34), "-$12.34");
    }
}
