//! Export functionality for Markdown documents
//!
//! This module turns a markdown document into a standalone HTML page:
//! - fenced code blocks highlighted and replaced before parsing
//! - body rendered with pulldown-cmark
//! - inline styles removed and callout paragraphs boxed
//! - stylesheet embedded in the page head

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use pulldown_cmark::{Options, Parser};
use regex::{Captures, Regex};

use super::fence::{CodeBlockExtractor, FenceReport};
use super::title::{derive_file_stem, DEFAULT_STEM};
use crate::highlight::Registry;
use crate::utils::text::{escape_attr, strip_emoji};

/// A `style` attribute inside a start tag. Code text never matches because
/// its `<` is already escaped.
static INLINE_STYLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(<[a-zA-Z][^<>]*?)\s+style="[^"]*""#).unwrap());

/// A paragraph opening with a bold marker, e.g. `**⚠️ Careful**`
static CALLOUT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<p><strong>(⚠\x{FE0F}?|✓|✗|💡)[^<]*</strong>(.*?)</p>").unwrap()
});

/// Highlighted code blocks and callout headers, copied as-is when emoji are
/// stripped from the surrounding prose
static VERBATIM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?s)<pre class="code-block">.*?</pre>|<div class="(?:warning|success|error|info)"><strong>[^<]*</strong>"#,
    )
    .unwrap()
});

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Html,
    Pdf,
}

impl ExportFormat {
    /// Get the file extension for the format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// Get display name for the format
    pub fn display_name(&self) -> &'static str {
        match self {
            ExportFormat::Html => "HTML",
            ExportFormat::Pdf => "PDF",
        }
    }
}

/// Options for HTML export
#[derive(Debug, Clone, Default)]
pub struct HtmlExportOptions {
    /// Document title
    pub title: Option<String>,
    /// Stylesheet embedded in the page head
    pub stylesheet: String,
    /// Remove emoji from the rendered body
    pub strip_emoji: bool,
}

/// An exported page and what the code-block pass found
#[derive(Debug, Clone)]
pub struct ExportedPage {
    pub html: String,
    pub report: FenceReport,
}

/// Main exporter for markdown documents
pub struct MarkdownExporter<'r> {
    registry: &'r Registry,
    options: Options,
}

impl<'r> MarkdownExporter<'r> {
    /// Create a new exporter highlighting code with `registry`
    pub fn new(registry: &'r Registry) -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);

        Self { registry, options }
    }

    /// Render the document body: highlighted code plus markdown structure
    pub fn render_body(&self, markdown: &str) -> (String, FenceReport) {
        let extraction = CodeBlockExtractor::new(self.registry).extract(markdown);

        let parser = Parser::new_ext(&extraction.document, self.options);
        let mut html = String::with_capacity(extraction.document.len() * 2);
        pulldown_cmark::html::push_html(&mut html, parser);

        let html = INLINE_STYLE.replace_all(&html, "$1");
        let html = CALLOUT.replace_all(&html, |caps: &Captures<'_>| {
            let (class, marker, label) = callout_kind(&caps[1]);
            format!(
                "<div class=\"{class}\"><strong>{marker} {label}:</strong>{}</div>",
                &caps[2]
            )
        });

        (html.into_owned(), extraction.report)
    }

    /// Export markdown to a standalone HTML page
    pub fn export_html(&self, markdown: &str, options: &HtmlExportOptions) -> ExportedPage {
        let (body, report) = self.render_body(markdown);
        let body = if options.strip_emoji {
            strip_prose_emoji(&body)
        } else {
            body
        };

        let title = options
            .title
            .clone()
            .unwrap_or_else(|| derive_file_stem(markdown));

        let html = format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta http-equiv="Content-Type" content="text/html; charset=utf-8">
    <meta name="generator" content="mdpress">
    <title>{}</title>
    <style>
{}
    </style>
</head>
<body>
{}
</body>
</html>
"#,
            escape_attr(&title),
            options.stylesheet,
            body
        );

        ExportedPage { html, report }
    }

    /// Generate suggested output path from the input path and its content.
    ///
    /// The stem comes from the first heading, or the input file name when
    /// the document has none.
    pub fn suggest_output_path(input_path: &Path, markdown: &str, format: ExportFormat) -> PathBuf {
        let derived = derive_file_stem(markdown);
        let stem = if derived == DEFAULT_STEM {
            input_path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or(DEFAULT_STEM)
                .to_string()
        } else {
            derived
        };

        let mut output = input_path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_default();

        output.push(format!("{}.{}", stem, format.extension()));
        output
    }
}

/// Remove emoji from the body everywhere except inside [`VERBATIM`] regions
fn strip_prose_emoji(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut pos = 0;
    for keep in VERBATIM.find_iter(body) {
        out.push_str(&strip_emoji(&body[pos..keep.start()]));
        out.push_str(keep.as_str());
        pos = keep.end();
    }
    out.push_str(&strip_emoji(&body[pos..]));
    out
}

/// CSS class, canonical marker and label for a callout marker
fn callout_kind(marker: &str) -> (&'static str, &'static str, &'static str) {
    match marker {
        "✓" => ("success", "✓", "Best Practice"),
        "✗" => ("error", "✗", "Common Mistake"),
        "💡" => ("info", "💡", "Info"),
        _ => ("warning", "⚠\u{FE0F}", "Warning"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::HighlightOptions;

    fn registry() -> Registry {
        Registry::new(HighlightOptions::default()).unwrap()
    }

    #[test]
    fn test_html_export() {
        let registry = registry();
        let exporter = MarkdownExporter::new(&registry);
        let options = HtmlExportOptions {
            title: Some("Test".to_string()),
            stylesheet: "body { color: red; }".to_string(),
            ..Default::default()
        };

        let page = exporter.export_html("# Hello\n\nWorld", &options);

        assert!(page.html.contains("<title>Test</title>"));
        assert!(page.html.contains("body { color: red; }"));
        assert!(page.html.contains("<h1>Hello</h1>"));
        assert!(page.html.contains("<p>World</p>"));
    }

    #[test]
    fn test_title_defaults_to_heading() {
        let registry = registry();
        let exporter = MarkdownExporter::new(&registry);
        let page = exporter.export_html("# A & B\n", &HtmlExportOptions::default());
        assert!(page.html.contains("<title>A &amp; B</title>"));
    }

    #[test]
    fn test_code_block_passes_through_parser() {
        let registry = registry();
        let exporter = MarkdownExporter::new(&registry);
        let (body, report) = exporter.render_body("Text\n\n```sql\nSELECT *\nFROM t\n```\n");

        assert_eq!(report.blocks, 1);
        assert!(body.contains(
            "<pre class=\"code-block\"><div class=\"code-line\">\
             <span class=\"sql-keyword\">SELECT</span> *</div>"
        ));
        assert!(!body.contains("<code"));
    }

    #[test]
    fn test_code_block_in_list_item() {
        let registry = registry();
        let exporter = MarkdownExporter::new(&registry);
        let (body, report) = exporter.render_body("1. Run this:\n\n   ```sql\n   SELECT 1;\n   ```\n");

        assert_eq!(report.highlighted, 1);
        assert!(body.contains("<li>"));
        assert!(body.contains("<span class=\"sql-keyword\">SELECT</span>"));
        assert!(!body.contains("language-sql"));
    }

    #[test]
    fn test_inline_styles_removed() {
        let registry = registry();
        let exporter = MarkdownExporter::new(&registry);
        let (body, _) = exporter.render_body("| a | b |\n|:--|--:|\n| 1 | 2 |\n");
        assert!(body.contains("<table>"));
        assert!(!body.contains("style="));
    }

    #[test]
    fn test_callouts() {
        let registry = registry();
        let exporter = MarkdownExporter::new(&registry);
        let (body, _) = exporter.render_body(
            "**⚠️ Note** keep backups\n\n**✓** use indexes\n\n**✗ Avoid** SELECT *\n\n**💡 Tip** read plans\n",
        );
        assert!(body.contains(
            "<div class=\"warning\"><strong>⚠\u{FE0F} Warning:</strong> keep backups</div>"
        ));
        assert!(body.contains("<div class=\"success\"><strong>✓ Best Practice:</strong> use indexes</div>"));
        assert!(body.contains("<div class=\"error\"><strong>✗ Common Mistake:</strong> SELECT *</div>"));
        assert!(body.contains("<div class=\"info\"><strong>💡 Info:</strong> read plans</div>"));
        assert!(!body.contains("<p><strong>"));
    }

    #[test]
    fn test_strip_emoji_option() {
        let registry = registry();
        let exporter = MarkdownExporter::new(&registry);
        let options = HtmlExportOptions {
            strip_emoji: true,
            ..Default::default()
        };
        let page = exporter.export_html("Launch 🚀 day\n", &options);
        assert!(page.html.contains("<p>Launch  day</p>"));
    }

    #[test]
    fn test_strip_emoji_keeps_code_and_callout_markers() {
        let registry = registry();
        let exporter = MarkdownExporter::new(&registry);
        let options = HtmlExportOptions {
            strip_emoji: true,
            ..Default::default()
        };
        let markdown = "**⚠️ Careful** text ✅\n\n```python\ns = \"✓ done ☀\"\n```\n";
        let page = exporter.export_html(markdown, &options);

        assert!(page
            .html
            .contains("<div class=\"warning\"><strong>⚠\u{FE0F} Warning:</strong> text </div>"));
        assert!(page
            .html
            .contains("<span class=\"py-string\">\"✓ done ☀\"</span>"));
    }

    #[test]
    fn test_suggest_output_path() {
        let input = PathBuf::from("/docs/readme.md");
        let output = MarkdownExporter::suggest_output_path(&input, "# Release Notes\n", ExportFormat::Pdf);
        assert_eq!(output, PathBuf::from("/docs/Release Notes.pdf"));

        let output = MarkdownExporter::suggest_output_path(&input, "no heading", ExportFormat::Html);
        assert_eq!(output, PathBuf::from("/docs/readme.html"));
    }
}
