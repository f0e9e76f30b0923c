//! Bracket pairing

/// Partner of a bracket character, or the character itself
pub fn partner(ch: char) -> char {
    match ch {
        '(' => ')',
        ')' => '(',
        '[' => ']',
        ']' => '[',
        '{' => '}',
        '}' => '{',
        '<' => '>',
        '>' => '<',
        other => other,
    }
}

/// Reverse `text` and swap every bracket for its partner.
///
/// `"(["` becomes `"])"`, so a multi-character opening bracket maps to the
/// closing bracket that balances it.
pub fn reversed(text: &str) -> String {
    text.chars().rev().map(partner).collect()
}

/// Whether `closing` balances `opening`
pub fn pairs(opening: &str, closing: &str) -> bool {
    reversed(opening) == closing
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reversed() {
        assert_eq!(reversed("("), ")");
        assert_eq!(reversed("]"), "[");
        assert_eq!(reversed("(["), "])");
        assert_eq!(reversed("{<"), ">}");
        assert_eq!(reversed("begin"), "nigeb");
        assert_eq!(reversed(""), "");
    }

    #[test]
    fn test_pairs() {
        assert!(pairs("(", ")"));
        assert!(pairs("[", "]"));
        assert!(!pairs("(", "]"));
        assert!(!pairs("{", "{"));
    }
}
