//! PDF rendering through an external HTML to PDF engine
//!
//! The page is piped to the engine on stdin and the PDF read back from
//! stdout, so nothing is written to disk until the caller saves the bytes.

use std::fmt;
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::PageConfig;
use crate::error::{ConfigError, RenderError, RenderResult};

/// Supported HTML to PDF renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PdfEngine {
    #[default]
    Wkhtmltopdf,
    Weasyprint,
}

impl PdfEngine {
    /// Executable name
    pub fn program(&self) -> &'static str {
        match self {
            PdfEngine::Wkhtmltopdf => "wkhtmltopdf",
            PdfEngine::Weasyprint => "weasyprint",
        }
    }

    /// Command-line arguments for reading HTML on stdin and writing PDF to
    /// stdout.
    ///
    /// WeasyPrint takes page size and margins from the CSS `@page` rule;
    /// wkhtmltopdf ignores `@page` and needs them as flags.
    pub fn args(&self, page: &PageConfig) -> Vec<String> {
        match self {
            PdfEngine::Wkhtmltopdf => {
                let margin = format!("{}cm", page.margin_cm);
                let mut args: Vec<String> = [
                    "--quiet",
                    "--encoding",
                    "utf-8",
                    "--page-size",
                    page.page_size.as_str(),
                ]
                .iter()
                .map(|s| s.to_string())
                .collect();
                for side in ["--margin-top", "--margin-bottom", "--margin-left", "--margin-right"] {
                    args.push(side.to_string());
                    args.push(margin.clone());
                }
                args.push("-".to_string());
                args.push("-".to_string());
                args
            }
            PdfEngine::Weasyprint => vec![
                "--quiet".to_string(),
                "--encoding".to_string(),
                "utf-8".to_string(),
                "-".to_string(),
                "-".to_string(),
            ],
        }
    }
}

impl fmt::Display for PdfEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

impl FromStr for PdfEngine {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wkhtmltopdf" => Ok(PdfEngine::Wkhtmltopdf),
            "weasyprint" => Ok(PdfEngine::Weasyprint),
            _ => Err(ConfigError::UnknownName {
                kind: "PDF engine",
                value: s.to_string(),
            }),
        }
    }
}

/// Render a complete HTML page to PDF bytes
pub fn render_pdf(html: &str, engine: PdfEngine, page: &PageConfig) -> RenderResult<Vec<u8>> {
    let program = engine.program();
    log::info!("rendering PDF with {program}");

    let mut child = Command::new(program)
        .args(engine.args(page))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|err| match err.kind() {
            ErrorKind::NotFound => RenderError::EngineNotFound { engine: program },
            _ => RenderError::Io(err),
        })?;

    // Feed stdin from a thread so a large page cannot deadlock against a
    // full stdout pipe.
    let writer = child.stdin.take().map(|mut stdin| {
        let input = html.as_bytes().to_vec();
        std::thread::spawn(move || stdin.write_all(&input))
    });

    let output = child.wait_with_output()?;
    if let Some(writer) = writer {
        match writer.join() {
            Ok(result) => {
                // The engine closing stdin early shows up as a failed status below
                if let Err(err) = result {
                    log::debug!("{program} stdin closed early: {err}");
                }
            }
            Err(_) => log::warn!("stdin writer for {program} panicked"),
        }
    }

    if !output.status.success() {
        return Err(RenderError::EngineFailed {
            engine: program,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    if output.stdout.is_empty() {
        return Err(RenderError::EmptyOutput { engine: program });
    }

    log::debug!("{program} produced {} bytes", output.stdout.len());
    Ok(output.stdout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageSize;

    #[test]
    fn test_engine_from_str() {
        assert_eq!("WeasyPrint".parse::<PdfEngine>().unwrap(), PdfEngine::Weasyprint);
        assert!("prince".parse::<PdfEngine>().is_err());
    }

    #[test]
    fn test_engine_serde_lowercase() {
        let json = serde_json::to_string(&PdfEngine::Weasyprint).unwrap();
        assert_eq!(json, "\"weasyprint\"");
    }

    #[test]
    fn test_wkhtmltopdf_args() {
        let page = PageConfig {
            page_size: PageSize::Letter,
            margin_cm: 2.0,
        };
        let args = PdfEngine::Wkhtmltopdf.args(&page);
        assert!(args.windows(2).any(|w| w[0] == "--page-size" && w[1] == "Letter"));
        assert!(args.windows(2).any(|w| w[0] == "--margin-left" && w[1] == "2cm"));
        assert_eq!(&args[args.len() - 2..], ["-", "-"]);
    }
}
