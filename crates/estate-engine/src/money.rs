//! Dollar formatting and the flat estate-tax estimate used in
//! message text.

/// Estimated tax on a registered balance collapsing into the estate.
/// Flat 40% marginal-rate approximation, floored to whole dollars.
pub fn estimated_tax(balance: f64) -> f64 {
    (balance * 0.40).floor()
}

/// Format a non-negative dollar amount as `$1,234,567` (whole
/// dollars, comma-grouped).
pub fn format_dollars(amount: f64) -> String {
    let whole = amount.max(0.0).floor() as u64;
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("${grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_thousands_separators() {
        assert_eq!(format_dollars(0.0), "$0");
        assert_eq!(format_dollars(950.0), "$950");
        assert_eq!(format_dollars(1000.0), "$1,000");
        assert_eq!(format_dollars(500_000.0), "$500,000");
        assert_eq!(format_dollars(1_234_567.89), "$1,234,567");
    }

    #[test]
    fn tax_estimate_is_forty_percent_floored() {
        assert_eq!(estimated_tax(500_000.0), 200_000.0);
        assert_eq!(estimated_tax(1001.0), 400.0);
        assert_eq!(estimated_tax(0.0), 0.0);
    }
}
