//! Live input masks
//!
//! Reformatting applied as the user types. Both masks strip non-digits
//! first, so they are idempotent on already-formatted input.

/// EIN mask: digits only, capped at 9, hyphen inserted after the 2nd digit.
///
/// `"123456789"` → `"12-3456789"`; running the mask again is a no-op.
pub fn mask_ein(input: &str) -> String {
    let digits: String = input
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(9)
        .collect();

    if digits.len() <= 2 {
        digits
    } else {
        format!("{}-{}", &digits[..2], &digits[2..])
    }
}

/// Phone mask: `(000) 000-0000`, digits capped at 10. Partial input keeps
/// the mask prefix so the caret lands naturally while typing.
pub fn mask_phone(input: &str) -> String {
    let digits: String = input
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(10)
        .collect();

    match digits.len() {
        0 => String::new(),
        1..=3 => format!("({}", digits),
        4..=6 => format!("({}) {}", &digits[..3], &digits[3..]),
        _ => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
    }
}
