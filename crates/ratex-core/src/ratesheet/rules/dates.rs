//! Date extraction and file-name date tokens.

use super::patterns::DATE_DMY;
use super::{ExtractionMatch, FieldExtractor};

/// Token used in output names when a date is missing or malformed.
pub const UNKNOWN_DATE: &str = "unknown_date";

/// Finds DD/MM/YYYY substrings. Values are kept as written.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        DATE_DMY
            .find_iter(text)
            .map(|m| {
                ExtractionMatch::new(m.as_str().to_string()).with_position(m.start(), m.end())
            })
            .collect()
    }
}

/// Convert a DD/MM/YYYY date into the compact DDMMYY token used in file names.
///
/// Never fails: empty, wrongly shaped or non-numeric input yields
/// [`UNKNOWN_DATE`].
pub fn format_for_identifier(date: &str) -> String {
    let parts: Vec<&str> = date.split('/').collect();
    let &[day, month, year] = parts.as_slice() else {
        return UNKNOWN_DATE.to_string();
    };

    let numeric = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    if !(numeric(day) && numeric(month) && numeric(year)) {
        return UNKNOWN_DATE.to_string();
    }

    let short_year = &year[year.len().saturating_sub(2)..];
    format!("{}{}{}", day, month, short_year)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_for_identifier() {
        assert_eq!(format_for_identifier("15/03/2024"), "150324");
        assert_eq!(format_for_identifier("01/02/1999"), "010299");
    }

    #[test]
    fn test_format_for_identifier_sentinel() {
        assert_eq!(format_for_identifier(""), UNKNOWN_DATE);
        assert_eq!(format_for_identifier("bad-date"), UNKNOWN_DATE);
        assert_eq!(format_for_identifier("15/03"), UNKNOWN_DATE);
        assert_eq!(format_for_identifier("15/03/2024/1"), UNKNOWN_DATE);
        assert_eq!(format_for_identifier("aa/bb/cccc"), UNKNOWN_DATE);
        assert_eq!(format_for_identifier("15//2024"), UNKNOWN_DATE);
    }

    #[test]
    fn test_extract_all_in_order() {
        let extractor = DateExtractor::new();
        let text = "Valid 28/02/2024, issued 01/02/2024 and revised 05/02/2024";

        let dates: Vec<String> = extractor.extract_all(text).into_iter().map(|m| m.value).collect();
        assert_eq!(dates, vec!["28/02/2024", "01/02/2024", "05/02/2024"]);
    }

    #[test]
    fn test_extract_ignores_other_shapes() {
        let extractor = DateExtractor::new();

        assert!(extractor.extract_all("2024-02-01 1/2/2024 01.02.2024").is_empty());

        let found = extractor.extract_all("from 01/02/2024");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].position, Some((5, 15)));
    }
}
