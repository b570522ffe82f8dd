//! Patti → ank derivation and the `open_jodi_close` result string.
//!
//! A result reads `OpenPatti_OpenAnkCloseAnk_ClosePatti`, e.g. open 238 and
//! close 357 give `238_35_357` (2+3+8=13 → 3, 3+5+7=15 → 5).

use crate::config::{PLACEHOLDER_RESULT, UNDECLARED};

/// First three digit characters of `value`, ignoring separators like `-` or spaces.
pub fn extract_three_digits(value: &str) -> Option<String> {
    let digits: String = value.chars().filter(char::is_ascii_digit).take(3).collect();
    (digits.len() == 3).then_some(digits)
}

/// Digit sum modulo 10. Non-digit characters contribute nothing.
pub fn patti_to_ank(patti: &str) -> u8 {
    let sum: u32 = patti.chars().filter_map(|c| c.to_digit(10)).sum();
    (sum % 10) as u8
}

pub fn format_result(open: &str, close: &str) -> String {
    match (extract_three_digits(open), extract_three_digits(close)) {
        (Some(open), Some(close)) => format!(
            "{open}_{}{}_{close}",
            patti_to_ank(&open),
            patti_to_ank(&close)
        ),
        _ => PLACEHOLDER_RESULT.to_string(),
    }
}

pub fn is_undeclared(value: &str) -> bool {
    let v = value.trim();
    v.is_empty() || v == UNDECLARED
}

pub fn is_placeholder(open: &str, close: &str) -> bool {
    is_undeclared(open) || is_undeclared(close)
}

/// Result string shown for a market or daily row.
///
/// Precedence: a stored `result` verbatim, then open-only (`258_5*_***`),
/// then the placeholder when a side is missing, else [`format_result`].
pub fn display_result(open: &str, close: &str, result: Option<&str>) -> String {
    if let Some(stored) = result.map(str::trim).filter(|r| !r.is_empty()) {
        return stored.to_string();
    }

    let open_declared = if is_undeclared(open) {
        None
    } else {
        extract_three_digits(open)
    };

    if let (Some(open), true) = (&open_declared, is_undeclared(close)) {
        return format!("{open}_{}*_{UNDECLARED}", patti_to_ank(open));
    }

    if is_placeholder(open, close) {
        return PLACEHOLDER_RESULT.to_string();
    }

    format_result(open.trim(), close.trim())
}

/// Accepts `***` or anything carrying at least three digits. Used to reject
/// junk at the API boundary instead of storing it.
pub fn is_valid_patti_input(value: &str) -> bool {
    let v = value.trim();
    v == UNDECLARED || extract_three_digits(v).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_digits_through_separators() {
        assert_eq!(extract_three_digits("2-5-8").as_deref(), Some("258"));
        assert_eq!(extract_three_digits(" 3 6 9 ").as_deref(), Some("369"));
        assert_eq!(extract_three_digits("12345").as_deref(), Some("123"));
        assert_eq!(extract_three_digits("12"), None);
        assert_eq!(extract_three_digits("***"), None);
        assert_eq!(extract_three_digits(""), None);
    }

    #[test]
    fn ank_is_digit_sum_mod_ten() {
        assert_eq!(patti_to_ank("238"), 3);
        assert_eq!(patti_to_ank("357"), 5);
        assert_eq!(patti_to_ank("999"), 7);
        assert_eq!(patti_to_ank("000"), 0);
    }

    #[test]
    fn ank_ignores_digit_order() {
        for p in ["238", "283", "328", "382", "823", "832"] {
            assert_eq!(patti_to_ank(p), 3, "patti {p}");
        }
        for n in 0..1000 {
            assert!(patti_to_ank(&format!("{n:03}")) <= 9);
        }
    }

    #[test]
    fn formats_open_jodi_close() {
        assert_eq!(format_result("238", "357"), "238_35_357");
        assert_eq!(format_result("2-3-8", "3-5-7"), "238_35_357");
        assert_eq!(format_result("", "357"), "***_**_***");
        assert_eq!(format_result("12", "357"), "***_**_***");
    }

    #[test]
    fn placeholder_detection() {
        assert!(is_placeholder("***", "357"));
        assert!(is_placeholder("238", "  "));
        assert!(!is_placeholder("238", "357"));
    }

    #[test]
    fn display_prefers_stored_result() {
        assert_eq!(display_result("238", "357", Some(" 111_11_111 ")), "111_11_111");
        assert_eq!(display_result("238", "357", Some("   ")), "238_35_357");
    }

    #[test]
    fn display_open_only() {
        assert_eq!(display_result("2-5-8", "***", None), "258_5*_***");
        assert_eq!(display_result("258", "", None), "258_5*_***");
    }

    #[test]
    fn display_missing_sides_use_placeholder() {
        assert_eq!(display_result("***", "***", None), "***_**_***");
        assert_eq!(display_result("***", "357", None), "***_**_***");
        assert_eq!(display_result("12", "***", None), "***_**_***");
    }

    #[test]
    fn display_both_declared() {
        assert_eq!(display_result("238", "357", None), "238_35_357");
        assert_eq!(display_result("12", "357", None), "***_**_***");
    }

    #[test]
    fn patti_input_validation() {
        assert!(is_valid_patti_input("***"));
        assert!(is_valid_patti_input("2-5-8"));
        assert!(!is_valid_patti_input("12"));
        assert!(!is_valid_patti_input("abc"));
    }
}
