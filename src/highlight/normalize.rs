//! Structural character normalization
//!
//! Directory trees and diagrams pasted into code blocks use box-drawing glyphs
//! that many PDF fonts lack. They are mapped to ASCII before highlighting.

use std::borrow::Cow;

/// Map a box-drawing glyph to its ASCII stand-in
fn ascii_equivalent(c: char) -> Option<char> {
    match c {
        '├' | '│' | '┃' | '║' => Some('|'),
        '└' | '╰' => Some('`'),
        '─' | '━' => Some('-'),
        '═' => Some('='),
        '┌' | '┐' | '┘' | '┬' | '┴' | '┼' | '┤' | '╭' | '╮' | '╯' => Some('+'),
        _ => None,
    }
}

/// Replace tree and box-drawing characters with ASCII.
///
/// `├── src` becomes `|-- src` and `└── lib.rs` becomes `` `-- lib.rs ``.
/// Borrows the input when nothing needs replacing.
pub fn normalize_structure(code: &str) -> Cow<'_, str> {
    if !code.chars().any(|c| ascii_equivalent(c).is_some()) {
        return Cow::Borrowed(code);
    }
    Cow::Owned(
        code.chars()
            .map(|c| ascii_equivalent(c).unwrap_or(c))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_is_ascii() {
        let tree = "project\n├── src\n│   └── main.rs\n└── Cargo.toml";
        let normalized = normalize_structure(tree);
        assert_eq!(
            normalized,
            "project\n|-- src\n|   `-- main.rs\n`-- Cargo.toml"
        );
        assert!(normalized.is_ascii());
    }

    #[test]
    fn test_plain_code_is_borrowed() {
        let code = "SELECT 1;";
        assert!(matches!(normalize_structure(code), Cow::Borrowed(_)));
    }

    #[test]
    fn test_other_unicode_untouched() {
        assert_eq!(normalize_structure("naïve → ├─ x"), "naïve → |- x");
    }
}
