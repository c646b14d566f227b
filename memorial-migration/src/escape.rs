use std::borrow::Cow;

/// Escape text for a single-quoted SQL literal by doubling every `'`.
///
/// No other character is touched. Borrows when there is nothing to escape.
pub fn escape_literal(text: &str) -> Cow<'_, str> {
    if text.contains('\'') {
        Cow::Owned(text.replace('\'', "''"))
    } else {
        Cow::Borrowed(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubles_single_quotes() {
        assert_eq!(escape_literal("Tampa d'água"), "Tampa d''água");
        assert_eq!(escape_literal("'"), "''");
        assert_eq!(escape_literal("''x'"), "''''x''");
    }

    #[test]
    fn quote_count_doubles() {
        let input = "a'b'c'd";
        let n = input.matches('\'').count();
        assert_eq!(escape_literal(input).matches('\'').count(), 2 * n);
    }

    #[test]
    fn other_characters_untouched() {
        let input = "Motor \"principal\"; -- \\n ção";
        assert!(matches!(escape_literal(input), Cow::Borrowed(_)));
        assert_eq!(escape_literal(input), input);
    }
}
