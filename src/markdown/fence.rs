//! Fenced code block extraction
//!
//! Finds ```` ``` ```` and `~~~` fenced regions, highlights each one and
//! splices the rendered block back into the document as a single-line raw
//! HTML block, which the Markdown processor passes through untouched.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::highlight::{Registry, SourceFragment, TaggedOutput};

/// A fence opener at the start of a line, after optional indentation.
/// Group 1 is the indentation.
static OPENING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^([ \t]*)(?:```|~~~)").unwrap());

static BACKTICK_FENCES: Lazy<[Regex; 3]> = Lazy::new(|| fence_patterns("```"));
static TILDE_FENCES: Lazy<[Regex; 3]> = Lazy::new(|| fence_patterns("~~~"));

/// Strict, relaxed and loose spellings of a fenced block, tried in that order.
///
/// - strict: tag right after the fence, closing fence on its own line
/// - relaxed: the closing fence may follow code on the same line
/// - loose: whitespace before the tag and trailing text on the opening line
///
/// Group 1 is the language tag, group 2 the code. The closing fence may be
/// indented like the opening one.
fn fence_patterns(fence: &str) -> [Regex; 3] {
    let f = regex::escape(fence);
    [
        Regex::new(&format!(r"\A{f}([\w+#.-]*)\n([\s\S]*?)\n[ \t]*{f}")).unwrap(),
        Regex::new(&format!(r"\A{f}([\w+#.-]*)\n([\s\S]*?){f}")).unwrap(),
        Regex::new(&format!(r"\A{f}[ \t]*([\w+#.-]*)[^\n]*\n([\s\S]*?){f}")).unwrap(),
    ]
}

/// What happened while extracting one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FenceReport {
    /// Fenced blocks found and replaced
    pub blocks: usize,
    /// Blocks whose tag selected a real lexicon
    pub highlighted: usize,
    /// Distinct non-empty tags with no lexicon, in order of appearance
    pub unknown_languages: Vec<String>,
    /// Byte offset of an opening fence that never closes
    pub unterminated_at: Option<usize>,
}

/// Document with every fenced block replaced by highlighted markup
#[derive(Debug, Clone)]
pub struct Extraction {
    pub document: String,
    pub report: FenceReport,
}

/// Replaces fenced code regions with highlighted HTML blocks
pub struct CodeBlockExtractor<'r> {
    registry: &'r Registry,
}

impl<'r> CodeBlockExtractor<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Extract and highlight every fenced block.
    ///
    /// A single forward scan: text between blocks is copied verbatim and the
    /// scan resumes after each closing fence, so substituted output is never
    /// looked at again. An opening fence with no closing fence leaves the rest
    /// of the document as it is.
    pub fn extract(&self, document: &str) -> Extraction {
        let document = document.replace("\r\n", "\n");
        let mut report = FenceReport::default();
        let mut out = String::with_capacity(document.len() + document.len() / 2);
        let mut pos = 0;

        while let Some(opening) = OPENING.captures_at(&document, pos) {
            let (Some(line), Some(indent)) = (opening.get(0), opening.get(1)) else {
                break;
            };
            let start = line.start();
            let fence_start = indent.end();
            let indent = indent.as_str();
            out.push_str(&document[pos..start]);

            let patterns: &[Regex; 3] = if document[fence_start..].starts_with('~') {
                &TILDE_FENCES
            } else {
                &BACKTICK_FENCES
            };
            let rest = &document[fence_start..];
            let Some(caps) = patterns.iter().find_map(|p| p.captures(rest)) else {
                log::warn!("unterminated code fence at byte {start}, leaving the rest as text");
                report.unterminated_at = Some(start);
                out.push_str(&document[start..]);
                pos = document.len();
                break;
            };

            let tag = caps.get(1).map_or("", |m| m.as_str());
            let code = dedent(caps.get(2).map_or("", |m| m.as_str()), indent);
            self.record(&mut report, tag);
            let tagged = self
                .registry
                .highlight(SourceFragment::new(code.trim_matches('\n'), tag));
            out.push_str(indent);
            out.push_str(&render_block(&tagged));

            // `\A` anchors at `fence_start`, so the match always begins there
            pos = fence_start + caps.get(0).map_or(rest.len(), |m| m.end());
        }
        out.push_str(&document[pos..]);

        log::debug!(
            "extracted {} code blocks ({} highlighted)",
            report.blocks,
            report.highlighted
        );
        Extraction {
            document: out,
            report,
        }
    }

    fn record(&self, report: &mut FenceReport, tag: &str) {
        report.blocks += 1;
        if self.registry.is_known(tag) {
            report.highlighted += 1;
        } else if !tag.trim().is_empty() {
            let tag = tag.trim().to_lowercase();
            if !report.unknown_languages.contains(&tag) {
                report.unknown_languages.push(tag);
            }
        }
    }
}

/// Remove the fence's indentation from every code line.
///
/// Lines indented less than the fence lose only their leading whitespace.
fn dedent(code: &str, indent: &str) -> String {
    if indent.is_empty() {
        return code.to_string();
    }
    code.split('\n')
        .map(|line| {
            line.strip_prefix(indent)
                .unwrap_or_else(|| line.trim_start_matches([' ', '\t']))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wrap tagged code as one `<pre>` with a `<div>` per source line.
///
/// Emitted without newlines so the whole block stays one raw HTML line.
pub fn render_block(tagged: &TaggedOutput) -> String {
    let mut html = String::with_capacity(tagged.text.len() + 64);
    html.push_str("<pre class=\"code-block\">");
    for line in tagged.lines() {
        html.push_str("<div class=\"code-line\">");
        if line.trim().is_empty() {
            html.push(' ');
        } else {
            html.push_str(line);
        }
        html.push_str("</div>");
    }
    html.push_str("</pre>");
    html
}
