//! Localized digit normalization
//!
//! Payment amounts arrive as operator-typed text that may mix Persian
//! (۰–۹) and Arabic-Indic (٠–٩) digits with separators and currency
//! marks. Normalization strips everything that is not a digit and never
//! rejects input.

/// Normalize a localized amount string to a plain non-negative integer.
///
/// Non-digit characters are stripped, not rejected; empty or overflowing
/// input yields 0.
pub fn normalize_amount(raw: &str) -> i64 {
    let digits: String = raw.chars().filter_map(to_ascii_digit).collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(0)
}

fn to_ascii_digit(c: char) -> Option<char> {
    match c {
        '0'..='9' => Some(c),
        // Persian digits U+06F0..U+06F9
        '\u{06F0}'..='\u{06F9}' => char::from_u32('0' as u32 + (c as u32 - 0x06F0)),
        // Arabic-Indic digits U+0660..U+0669
        '\u{0660}'..='\u{0669}' => char::from_u32('0' as u32 + (c as u32 - 0x0660)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passthrough() {
        assert_eq!(normalize_amount("2000000"), 2_000_000);
        assert_eq!(normalize_amount("0"), 0);
    }

    #[test]
    fn test_persian_digits() {
        assert_eq!(normalize_amount("۲۰۰۰۰۰۰"), 2_000_000);
        assert_eq!(normalize_amount("۱۴۰۳"), 1403);
    }

    #[test]
    fn test_arabic_indic_digits() {
        assert_eq!(normalize_amount("٥٠٠"), 500);
    }

    #[test]
    fn test_separators_and_junk_stripped() {
        assert_eq!(normalize_amount("1,500,000"), 1_500_000);
        assert_eq!(normalize_amount("۲٬۵۰۰٬۰۰۰ ریال"), 2_500_000);
        assert_eq!(normalize_amount("abc12x3"), 123);
    }

    #[test]
    fn test_empty_and_non_numeric() {
        assert_eq!(normalize_amount(""), 0);
        assert_eq!(normalize_amount("   "), 0);
        assert_eq!(normalize_amount("نقدی"), 0);
    }

    #[test]
    fn test_overflow_yields_zero() {
        assert_eq!(normalize_amount("99999999999999999999999999"), 0);
    }
}
