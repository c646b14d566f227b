//! Field cleanup rules shared by every source format.

/// Canonicalize a model identifier.
///
/// A trimmed value made of exactly two ASCII letters followed by one or more
/// ASCII digits gets a single space between the prefix and the digits.
/// Everything else is returned trimmed and otherwise untouched.
///
/// ```
/// use memorial_core::normalize_model;
///
/// assert_eq!(normalize_model("FY550"), "FY 550");
/// assert_eq!(normalize_model("  FY 670 "), "FY 670");
/// assert_eq!(normalize_model("X1"), "X1");
/// ```
pub fn normalize_model(raw: &str) -> String {
    let trimmed = raw.trim();
    match split_prefix_digits(trimmed) {
        Some((prefix, digits)) => format!("{prefix} {digits}"),
        None => trimmed.to_string(),
    }
}

/// Split `"FY550"` into `("FY", "550")`; `None` if the shape doesn't match.
fn split_prefix_digits(s: &str) -> Option<(&str, &str)> {
    let bytes = s.as_bytes();
    if bytes.len() < 3 {
        return None;
    }
    if !bytes[0].is_ascii_alphabetic() || !bytes[1].is_ascii_alphabetic() {
        return None;
    }
    if !bytes[2..].iter().all(u8::is_ascii_digit) {
        return None;
    }
    // First two bytes are ASCII, so index 2 is a char boundary.
    Some(s.split_at(2))
}

/// Trim a category cell.
pub fn clean_category(raw: &str) -> String {
    raw.trim().to_string()
}

/// Trim a description cell and drop one surrounding `"` on each side.
pub fn clean_description(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('"').unwrap_or(trimmed);
    trimmed.to_string()
}

#[cfg(test)]
#[path = "tests/normalize_tests.rs"]
mod tests;
