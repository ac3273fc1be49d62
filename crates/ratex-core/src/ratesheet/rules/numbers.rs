//! Numeric cell parsing.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a rate cell written with a comma decimal separator ("10,50").
///
/// Every comma is turned into a period before parsing, so thousands
/// separators are not supported: "1,234,50" is rejected. Values outside the
/// `Decimal` range (above ~7.9e28, or more than 28 significant digits) are
/// rejected too.
pub fn parse_rate(cell: &str) -> Option<Decimal> {
    let normalized = cell.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }

    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rate() {
        assert_eq!(parse_rate("10,50"), Some(Decimal::new(1050, 2)));
        assert_eq!(parse_rate("4.10"), Some(Decimal::new(410, 2)));
        assert_eq!(parse_rate("12"), Some(Decimal::new(12, 0)));
        assert_eq!(parse_rate(" 5,2 "), Some(Decimal::new(52, 1)));
        assert_eq!(parse_rate("-1,5"), Some(Decimal::new(-15, 1)));
    }

    #[test]
    fn test_parse_rate_rejects_text() {
        assert_eq!(parse_rate(""), None);
        assert_eq!(parse_rate("Min"), None);
        assert_eq!(parse_rate("n/a"), None);
        assert_eq!(parse_rate("1,234,50"), None);
        assert_eq!(parse_rate("nan"), None);
        assert_eq!(parse_rate("inf"), None);
    }

    #[test]
    fn test_parse_rate_range() {
        assert_eq!(parse_rate("1,5e3"), Some(Decimal::new(1500, 0)));
        assert_eq!(parse_rate("1e30"), None);
        assert_eq!(parse_rate("123456789012345678901234567890123"), None);
    }
}
