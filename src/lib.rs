//! mdpress - Markdown to PDF with lexical syntax highlighting
//!
//! Fenced SQL, Python/PySpark and R code blocks are tagged with per-category
//! `<span>` classes, the document is rendered to a styled HTML page, and the
//! page is handed to an external engine for PDF output.
//!
//! ```no_run
//! use mdpress::highlight::{HighlightOptions, Registry, SourceFragment};
//!
//! let registry = Registry::new(HighlightOptions::default())?;
//! let tagged = registry.highlight(SourceFragment::new("SELECT 1;", "sql"));
//! assert!(tagged.text.contains("sql-keyword"));
//! # Ok::<(), mdpress::error::HighlightError>(())
//! ```

pub mod config;
pub mod error;
pub mod file_handler;
pub mod highlight;
pub mod markdown;
pub mod pdf;
pub mod utils;

pub use config::{Config, Preset};
pub use error::{AppError, AppResult};
pub use highlight::{HighlightOptions, Registry, SourceFragment, TaggedOutput};
pub use markdown::{CodeBlockExtractor, Conversion, Converter, ExportFormat, FenceReport};
pub use pdf::PdfEngine;
