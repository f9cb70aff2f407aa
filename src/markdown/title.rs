//! Output file naming from document content

use once_cell::sync::Lazy;
use regex::Regex;

use crate::utils::text::truncate_at_word;

/// Fallback stem when the document has no usable heading
pub const DEFAULT_STEM: &str = "document";

/// Longest stem kept, in characters
const MAX_STEM_CHARS: usize = 100;

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#{1,6}[ \t]+(.+?)[ \t]*$").unwrap());

/// Inline markup stripped from the heading, applied in order
static INLINE_MARKUP: Lazy<[(Regex, &'static str); 6]> = Lazy::new(|| {
    [
        (Regex::new(r"\*\*(.+?)\*\*").unwrap(), "$1"),
        (Regex::new(r"\*(.+?)\*").unwrap(), "$1"),
        (Regex::new(r"__(.+?)__").unwrap(), "$1"),
        (Regex::new(r"_(.+?)_").unwrap(), "$1"),
        (Regex::new(r"\[(.+?)\]\(.+?\)").unwrap(), "$1"),
        (Regex::new(r"`(.+?)`").unwrap(), "$1"),
    ]
});

static INVALID_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[<>:"/\\|?*]"#).unwrap());

/// First ATX heading text outside fenced code blocks
fn first_heading(markdown: &str) -> Option<&str> {
    let mut fence: Option<&str> = None;
    for line in markdown.lines() {
        let trimmed = line.trim_start();
        if let Some(open) = fence {
            if trimmed.starts_with(open) || line.trim_end().ends_with(open) {
                fence = None;
            }
            continue;
        }
        if let Some(open) = ["```", "~~~"].into_iter().find(|f| trimmed.starts_with(f)) {
            fence = Some(open);
            continue;
        }
        if let Some(text) = HEADING.captures(line).and_then(|caps| caps.get(1)) {
            return Some(text.as_str());
        }
    }
    None
}

/// Derive a file stem from the first ATX heading.
///
/// Markup is removed, characters invalid in file names are dropped and the
/// result is cut at a word boundary. Returns [`DEFAULT_STEM`] if nothing
/// usable remains.
pub fn derive_file_stem(markdown: &str) -> String {
    let Some(heading) = first_heading(markdown) else {
        return DEFAULT_STEM.to_string();
    };

    let mut text = heading.trim().to_string();
    for (pattern, replacement) in INLINE_MARKUP.iter() {
        text = pattern.replace_all(&text, *replacement).into_owned();
    }
    let cleaned = INVALID_CHARS.replace_all(&text, "");
    let stem = truncate_at_word(cleaned.trim(), MAX_STEM_CHARS).trim();

    if stem.is_empty() {
        DEFAULT_STEM.to_string()
    } else {
        stem.to_string()
    }
}
