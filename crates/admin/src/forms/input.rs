//! Numeric input masking for form text fields.
//!
//! Masking runs on every keystroke and keeps the field valid-by-construction;
//! normalization runs on blur/submit and produces the canonical wire form.

/// Keep only digits.
#[must_use]
pub fn mask_integer(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Keep digits plus at most one decimal separator (`,` or `.`).
#[must_use]
pub fn mask_decimal(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut seen_separator = false;
    for ch in raw.chars() {
        if ch.is_ascii_digit() {
            out.push(ch);
        } else if (ch == ',' || ch == '.') && !seen_separator {
            seen_separator = true;
            out.push(ch);
        }
    }
    out
}

/// Canonicalize a masked decimal: `,` becomes `.`, redundant leading zeros
/// and a trailing separator are dropped, and a bare separator gains a
/// leading zero.
#[must_use]
pub fn normalize_decimal(masked: &str) -> String {
    let mut value = masked.replace(',', ".");
    if let Some(stripped) = value.strip_suffix('.') {
        value = stripped.to_string();
    }
    while value.len() > 1 && value.starts_with('0') && !value.starts_with("0.") {
        value.remove(0);
    }
    if value.starts_with('.') {
        value.insert(0, '0');
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_integer_strips_everything_else() {
        assert_eq!(mask_integer("12a3 ₽"), "123");
        assert_eq!(mask_integer("-5"), "5");
        assert_eq!(mask_integer(""), "");
    }

    #[test]
    fn test_mask_decimal_keeps_one_separator() {
        assert_eq!(mask_decimal("12,5"), "12,5");
        assert_eq!(mask_decimal("12.5.7"), "12.57");
        assert_eq!(mask_decimal("1,2.3"), "1,23");
        assert_eq!(mask_decimal("abc"), "");
    }

    #[test]
    fn test_normalize_decimal() {
        assert_eq!(normalize_decimal("12,5"), "12.5");
        assert_eq!(normalize_decimal("12."), "12");
        assert_eq!(normalize_decimal("007"), "7");
        assert_eq!(normalize_decimal("0.5"), "0.5");
        assert_eq!(normalize_decimal(",5"), "0.5");
        assert_eq!(normalize_decimal("0"), "0");
    }
}
