//! ISBN normalization and checksum validation.
//!
//! Used by the registry when [`IsbnPolicy`](crate::config::IsbnPolicy) asks
//! for normalized or validated identifiers.

/// Strip hyphens and whitespace and upper-case a trailing ISBN-10 `x`
///
/// Every other character is kept as given.
///
/// # Examples
///
/// ```
/// use circulation::isbn;
///
/// assert_eq!(isbn::normalize("978-7-115-42802-8"), "9787115428028");
/// assert_eq!(isbn::normalize("0 306 40615 x"), "030640615X");
/// ```
#[must_use]
pub fn normalize(raw: &str) -> String {
    let mut clean: String = raw
        .chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .collect();
    if clean.ends_with('x') {
        clean.pop();
        clean.push('X');
    }
    clean
}

/// Check an ISBN-10 checksum (weights 10 down to 1, mod 11, `X` = 10)
#[must_use]
pub fn is_valid_isbn10(isbn: &str) -> bool {
    let clean = normalize(isbn);
    if clean.len() != 10 {
        return false;
    }

    let mut sum = 0u32;
    for (weight, (pos, ch)) in (1..=10u32).rev().zip(clean.chars().enumerate()) {
        let digit = match ch {
            'X' if pos == 9 => 10,
            _ => match ch.to_digit(10) {
                Some(d) => d,
                None => return false,
            },
        };
        sum += digit * weight;
    }
    sum % 11 == 0
}

/// Check an ISBN-13 checksum (alternating weights 1 and 3, mod 10)
///
/// Only the `978` and `979` bookland prefixes are accepted.
#[must_use]
pub fn is_valid_isbn13(isbn: &str) -> bool {
    let clean = normalize(isbn);
    if clean.len() != 13 || !(clean.starts_with("978") || clean.starts_with("979")) {
        return false;
    }

    clean
        .chars()
        .enumerate()
        .try_fold(0u32, |sum, (pos, ch)| {
            let weight = if pos % 2 == 0 { 1 } else { 3 };
            ch.to_digit(10).map(|d| sum + d * weight)
        })
        .is_some_and(|sum| sum % 10 == 0)
}

/// Check either form, chosen by normalized length
///
/// # Examples
///
/// ```
/// use circulation::isbn;
///
/// assert!(isbn::is_valid("0306406152"));
/// assert!(isbn::is_valid("978-0-306-40615-7"));
/// assert!(!isbn::is_valid("9780306406158"));
/// ```
#[must_use]
pub fn is_valid(isbn: &str) -> bool {
    match normalize(isbn).len() {
        10 => is_valid_isbn10(isbn),
        13 => is_valid_isbn13(isbn),
        _ => false,
    }
}
