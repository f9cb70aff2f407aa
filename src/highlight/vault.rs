//! Placeholder vault
//!
//! Shields already-classified spans from later pattern passes. Each protected
//! match is swapped for an opaque token built from Unicode private-use
//! characters that do not occur in the fragment, so no later pattern (word
//! boundaries, digits, operators) can match inside a token and no token can
//! collide with input text. Tokens are turned back into rendered markup in a
//! single final scan.
//!
//! A vault is scoped to one highlighting pass. Its counter is never shared, so
//! independent fragments can be highlighted concurrently.

use std::collections::HashMap;
use std::ops::Range;

use regex::{Captures, Regex};

use super::Category;
use crate::error::{HighlightError, HighlightResult};

/// Basic multilingual plane private-use area, searched for free sentinels.
const SENTINEL_RANGE: std::ops::RangeInclusive<u32> = 0xE000..=0xF8FF;

/// Token digits are hex values offset into supplementary private-use area A.
const DIGIT_BASE: u32 = 0xF0000;

/// A span removed from the working text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedRegion {
    /// Opaque placeholder standing in for the span
    pub token: String,
    /// The span's original text, with any nested tokens already expanded
    pub raw: String,
    /// Category the span is rendered as
    pub category: Category,
}

enum Segment<'a> {
    Text(&'a str),
    Region(&'a ProtectedRegion),
}

/// Per-pass store of protected regions.
#[derive(Debug)]
pub struct Vault {
    open: char,
    close: char,
    regions: Vec<ProtectedRegion>,
    index: HashMap<String, usize>,
}

impl Vault {
    /// Create a vault whose tokens cannot occur in `text`.
    pub fn for_text(text: &str) -> HighlightResult<Self> {
        let mut free = SENTINEL_RANGE
            .filter_map(char::from_u32)
            .filter(|c| !text.contains(*c));
        let open = free.next().ok_or(HighlightError::NoSentinel)?;
        let close = free.next().ok_or(HighlightError::NoSentinel)?;

        Ok(Self {
            open,
            close,
            regions: Vec::new(),
            index: HashMap::new(),
        })
    }

    /// Number of regions protected so far
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Protected regions in the order they were minted
    pub fn regions(&self) -> &[ProtectedRegion] {
        &self.regions
    }

    /// Protect every match of `pattern` as `category`.
    pub fn protect_matches(&mut self, text: &str, pattern: &Regex, category: Category) -> String {
        self.protect(text, pattern, |caps| caps.get(0).map(|m| (m.range(), category)))
    }

    /// Protect the `tok` group of every match (or the whole match if the
    /// pattern has no such group) as `category`.
    ///
    /// Used for call-syntax rules where the trailing `(` must stay visible.
    pub fn protect_token_group(&mut self, text: &str, pattern: &Regex, category: Category) -> String {
        self.protect(text, pattern, |caps| {
            caps.name("tok")
                .or_else(|| caps.get(0))
                .map(|m| (m.range(), category))
        })
    }

    /// Replace the spans chosen by `select` with fresh tokens.
    ///
    /// Matches are collected first and spliced rightmost-first, so each
    /// replacement leaves the byte offsets of the remaining matches intact.
    /// A span that swallows an earlier token absorbs that token's original
    /// text, which keeps rendered regions from ever nesting.
    pub fn protect<F>(&mut self, text: &str, pattern: &Regex, mut select: F) -> String
    where
        F: FnMut(&Captures<'_>) -> Option<(Range<usize>, Category)>,
    {
        let spans: Vec<(Range<usize>, Category)> = pattern
            .captures_iter(text)
            .filter_map(|caps| select(&caps))
            .filter(|(range, _)| !range.is_empty())
            .collect();

        if spans.is_empty() {
            return text.to_string();
        }

        let mut out = text.to_string();
        for (range, category) in spans.into_iter().rev() {
            let raw = self.expand(&out[range.clone()]);
            let token = self.mint(raw, category);
            out.replace_range(range, &token);
        }
        out
    }

    /// Substitute every token in `text` with `render(category, raw)`.
    ///
    /// The rendered output is never rescanned.
    pub fn restore<F>(&self, text: &str, mut render: F) -> String
    where
        F: FnMut(Category, &str) -> String,
    {
        let mut out = String::with_capacity(text.len() * 2);
        self.walk(text, |segment| match segment {
            Segment::Text(t) => out.push_str(t),
            Segment::Region(region) => out.push_str(&render(region.category, &region.raw)),
        });
        out
    }

    /// Replace tokens inside `fragment` with their raw text.
    fn expand(&self, fragment: &str) -> String {
        if !fragment.contains(self.open) {
            return fragment.to_string();
        }
        let mut out = String::with_capacity(fragment.len());
        self.walk(fragment, |segment| match segment {
            Segment::Text(t) => out.push_str(t),
            Segment::Region(region) => out.push_str(&region.raw),
        });
        out
    }

    fn mint(&mut self, raw: String, category: Category) -> String {
        let id = self.regions.len();
        let mut token = String::new();
        token.push(self.open);
        token.extend(
            format!("{id:x}")
                .chars()
                .filter_map(|c| c.to_digit(16))
                .filter_map(|d| char::from_u32(DIGIT_BASE + d)),
        );
        token.push(self.close);

        self.index.insert(token.clone(), id);
        self.regions.push(ProtectedRegion {
            token: token.clone(),
            raw,
            category,
        });
        token
    }

    fn walk<'t, F>(&'t self, text: &'t str, mut visit: F)
    where
        F: FnMut(Segment<'t>),
    {
        let mut rest = text;
        while let Some(start) = rest.find(self.open) {
            visit(Segment::Text(&rest[..start]));
            let body = start + self.open.len_utf8();
            let Some(len) = rest[body..].find(self.close) else {
                visit(Segment::Text(&rest[start..]));
                return;
            };
            let end = body + len + self.close.len_utf8();
            let token = &rest[start..end];
            match self.index.get(token) {
                Some(&id) => visit(Segment::Region(&self.regions[id])),
                None => visit(Segment::Text(token)),
            }
            rest = &rest[end..];
        }
        visit(Segment::Text(rest));
    }
}
