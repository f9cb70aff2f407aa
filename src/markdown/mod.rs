//! Markdown module for mdpress
//!
//! Handles Markdown conversion including:
//! - Fenced code block extraction and highlighting
//! - HTML export with an embedded print stylesheet
//! - Output naming from the first heading
//! - PDF conversion through an external engine

pub mod export;
pub mod fence;
pub mod style;
pub mod title;

pub use export::{ExportFormat, ExportedPage, HtmlExportOptions, MarkdownExporter};
pub use fence::{render_block, CodeBlockExtractor, Extraction, FenceReport};
pub use style::generate_css;
pub use title::derive_file_stem;

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::AppResult;
use crate::file_handler::{ensure_parent_dir, read_document, write_output_atomic};
use crate::highlight::Registry;
use crate::pdf::render_pdf;

/// Result of converting one file
#[derive(Debug, Clone)]
pub struct Conversion {
    pub output: PathBuf,
    pub format: ExportFormat,
    pub bytes_written: usize,
    pub report: FenceReport,
}

/// Main converter combining highlighting, HTML export and PDF rendering
pub struct Converter {
    config: Config,
    registry: Registry,
    stylesheet: String,
}

impl Converter {
    /// Build a converter; compiles every lexicon once
    pub fn new(config: Config) -> AppResult<Self> {
        let registry = Registry::new(config.highlight_options())?;
        let stylesheet = generate_css(&config);
        Ok(Self {
            config,
            registry,
            stylesheet,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Render markdown to a standalone HTML page
    pub fn render_html(&self, markdown: &str) -> ExportedPage {
        let options = HtmlExportOptions {
            title: None,
            stylesheet: self.stylesheet.clone(),
            strip_emoji: self.config.output.strip_emoji,
        };
        MarkdownExporter::new(&self.registry).export_html(markdown, &options)
    }

    /// Convert a markdown file to HTML or PDF.
    ///
    /// Without an explicit `output` the file is written next to the input,
    /// named after the document's first heading.
    pub fn convert(
        &self,
        input: &Path,
        output: Option<&Path>,
        format: ExportFormat,
    ) -> AppResult<Conversion> {
        let document = read_document(input)?;
        let output = match output {
            Some(path) => path.to_path_buf(),
            None => MarkdownExporter::suggest_output_path(input, &document.content, format),
        };

        log::info!(
            "converting {} to {} ({})",
            input.display(),
            output.display(),
            format.display_name()
        );
        let page = self.render_html(&document.content);
        if page.report.blocks > 0 {
            log::info!(
                "highlighted {} of {} code blocks",
                page.report.highlighted,
                page.report.blocks
            );
        }

        let bytes = match format {
            ExportFormat::Html => page.html.into_bytes(),
            ExportFormat::Pdf => {
                render_pdf(&page.html, self.config.output.pdf_engine, &self.config.page)?
            }
        };

        ensure_parent_dir(&output)?;
        write_output_atomic(&output, &bytes)?;

        Ok(Conversion {
            output,
            format,
            bytes_written: bytes.len(),
            report: page.report,
        })
    }
}
