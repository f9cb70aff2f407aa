//! Utilities module for mdpress
//!
//! Shared helper functions:
//! - Path utilities
//! - HTML escaping
//! - Text cleanup for PDF output

use std::path::{Path, PathBuf};

/// Path utilities
pub mod path {
    use super::*;

    /// Check if path has a markdown extension
    pub fn is_markdown(path: &Path) -> bool {
        matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("md" | "markdown" | "mdown" | "mkd")
        )
    }

    /// Expand tilde to home directory
    pub fn expand_tilde(path: &Path) -> PathBuf {
        if let Ok(stripped) = path.strip_prefix("~") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        }
        path.to_path_buf()
    }
}

/// Text utilities
pub mod text {
    use std::borrow::Cow;

    use once_cell::sync::Lazy;
    use regex::Regex;

    // Emoji blocks plus dingbats, misc symbols and the variation selector.
    static EMOJI: Lazy<Regex> = Lazy::new(|| {
        Regex::new(concat!(
            "[",
            "\u{1F600}-\u{1F64F}",
            "\u{1F300}-\u{1F5FF}",
            "\u{1F680}-\u{1F6FF}",
            "\u{1F1E0}-\u{1F1FF}",
            "\u{2702}-\u{27B0}",
            "\u{24C2}",
            "\u{1F170}-\u{1F251}",
            "\u{1F900}-\u{1F9FF}",
            "\u{2600}-\u{26FF}",
            "\u{2700}-\u{27BF}",
            "\u{1FA00}-\u{1FA6F}",
            "\u{1FA70}-\u{1FAFF}",
            "\u{2B50}",
            "\u{FE0F}",
            "]+"
        ))
        .unwrap()
    });

    /// Escape text-node content: `&`, `<` and `>` only.
    pub fn escape_text(text: &str) -> Cow<'_, str> {
        if !text.contains(&['&', '<', '>'][..]) {
            return Cow::Borrowed(text);
        }
        let mut out = String::with_capacity(text.len() + 16);
        for c in text.chars() {
            match c {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                _ => out.push(c),
            }
        }
        Cow::Owned(out)
    }

    /// Escape text for use inside an attribute value or `<title>`
    pub fn escape_attr(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#39;")
    }

    /// Remove emoji and pictographic symbols
    pub fn strip_emoji(text: &str) -> Cow<'_, str> {
        EMOJI.replace_all(text, "")
    }

    /// Truncate to at most `max_chars` characters, backing off to the last
    /// space when one exists inside the limit
    pub fn truncate_at_word(s: &str, max_chars: usize) -> &str {
        let Some((cut, _)) = s.char_indices().nth(max_chars) else {
            return s;
        };
        let head = &s[..cut];
        match head.rfind(' ') {
            Some(space) => &head[..space],
            None => head,
        }
    }
}
