use rust_decimal::{Decimal, RoundingStrategy};

/// Insert `,` every three digits of a run of ASCII digits.
pub fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (position, ch) in digits.chars().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

/// Format a block height or count as `1,234,567`.
pub fn format_thousands(value: u64) -> String {
    group_digits(&value.to_string())
}

/// Format a coin amount with thousands separators, rounded to `decimals`
/// places with trailing zeros removed.
pub fn format_amount(amount: Decimal, decimals: u32) -> String {
    let rounded = amount
        .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
        .normalize();

    let text = rounded.abs().to_string();
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut formatted = String::new();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        formatted.push('-');
    }
    formatted.push_str(&group_digits(whole));
    if let Some(fraction) = fraction {
        formatted.push('.');
        formatted.push_str(fraction);
    }

    formatted
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(raw: &str) -> Decimal {
        Decimal::from_str(raw).expect("valid decimal literal")
    }

    #[test]
    fn thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_000), "1,000");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn amounts_keep_significant_decimals_only() {
        assert_eq!(format_amount(dec("1000000.50"), 2), "1,000,000.5");
        assert_eq!(format_amount(dec("25"), 8), "25");
        assert_eq!(format_amount(dec("0.000123456"), 4), "0.0001");
        assert_eq!(format_amount(dec("12345.678"), 2), "12,345.68");
    }

    #[test]
    fn negative_amounts_and_zero() {
        assert_eq!(format_amount(dec("-1234.5"), 2), "-1,234.5");
        assert_eq!(format_amount(dec("-0.0001"), 2), "0");
    }
}
