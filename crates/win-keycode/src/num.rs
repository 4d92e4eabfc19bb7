//! Lenient unsigned integer parsing shared by key codes and process ids.

/// Parses the leading unsigned integer of `s` with automatic radix detection.
///
/// - `0x`/`0X` prefix selects hexadecimal.
/// - A leading `0` followed by more characters selects octal.
/// - Anything else is decimal.
///
/// Leading whitespace is skipped and parsing stops at the first character that
/// is not a digit in the selected radix. Returns `None` when no digits were
/// consumed or the value does not fit in a `u32`.
pub fn parse_unsigned(s: &str) -> Option<u32> {
    let s = s.trim_start();
    let (digits, radix) = if let Some(rest) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"))
    {
        (rest, 16)
    } else if s.len() > 1 && s.starts_with('0') {
        (&s[1..], 8)
    } else {
        (s, 10)
    };
    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    u32::from_str_radix(&digits[..end], radix).ok()
}
