//! @ai:module:intent Export rendered documents to files
//! @ai:module:layer infrastructure
//! @ai:module:public_api ExportFormat, DocumentExporter, ReportWriter, SvgExporter, MarkdownExporter, JsonExporter

pub mod json_export;
pub mod markdown_export;
pub mod svg_export;

pub use json_export::JsonExporter;
pub use markdown_export::MarkdownExporter;
pub use svg_export::SvgExporter;

use crate::error::Result;
use crate::render::Document;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// @ai:intent Output formats a document can be written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Svg,
    Markdown,
    Json,
}

impl ExportFormat {
    /// @ai:intent Exporter implementing this format
    /// @ai:effects pure
    pub fn exporter(&self) -> Box<dyn DocumentExporter> {
        match self {
            ExportFormat::Svg => Box::new(SvgExporter::new()),
            ExportFormat::Markdown => Box::new(MarkdownExporter::new()),
            ExportFormat::Json => Box::new(JsonExporter::new()),
        }
    }
}

/// @ai:intent Trait for turning a document into file bytes
pub trait DocumentExporter: Send + Sync {
    /// @ai:intent File extension without the dot
    fn extension(&self) -> &'static str;

    /// @ai:intent Produce the complete file content
    /// @ai:post Err means nothing usable was produced
    fn export(&self, document: &Document) -> Result<Vec<u8>>;
}

/// @ai:intent Writes documents in the configured formats into a directory
pub struct ReportWriter {
    exporters: Vec<Box<dyn DocumentExporter>>,
}

impl ReportWriter {
    /// @ai:intent Create a writer for the given formats, duplicates ignored
    /// @ai:effects pure
    pub fn new(formats: &[ExportFormat]) -> Self {
        let mut seen: Vec<ExportFormat> = Vec::new();
        for format in formats {
            if !seen.contains(format) {
                seen.push(*format);
            }
        }

        Self {
            exporters: seen.iter().map(|f| f.exporter()).collect(),
        }
    }

    /// @ai:intent Export one document in every format
    /// @ai:post a file exists only if its export fully succeeded
    /// @ai:effects fs:write
    pub fn write_all(&self, document: &Document, output_dir: &Path) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(output_dir)?;

        let mut written = Vec::new();
        for exporter in &self.exporters {
            let bytes = exporter.export(document)?;
            let path = output_dir.join(document.filename(exporter.extension()));
            write_atomically(&path, &bytes)?;

            tracing::info!("Wrote {}", path.display());
            written.push(path);
        }

        Ok(written)
    }
}

/// @ai:intent Write through a sibling temp file so readers never see partial content
/// @ai:effects fs:write
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    persist_with(path, |file| file.write_all(bytes))
}

/// @ai:intent Fill a staging file next to `path`, then move it into place
/// @ai:post on any error the staging file is removed and `path` is untouched
/// @ai:effects fs:write
fn persist_with<F>(path: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut File) -> std::io::Result<()>,
{
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut staging = tempfile::Builder::new()
        .prefix(".report-")
        .suffix(".partial")
        .tempfile_in(dir)?;
    fill(staging.as_file_mut())?;
    staging.persist(path).map_err(|e| e.error)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::render::{Block, Page, PageKind};
    use tempfile::TempDir;

    struct FailingExporter;

    impl DocumentExporter for FailingExporter {
        fn extension(&self) -> &'static str {
            "bin"
        }

        fn export(&self, _document: &Document) -> Result<Vec<u8>> {
            Err(Error::Export {
                format: "bin",
                message: "backend unavailable".to_string(),
            })
        }
    }

    fn document() -> Document {
        Document {
            title: "Reporte General".to_string(),
            control_number: " 21460123 ".to_string(),
            pages: vec![Page::new(PageKind::Cover, None).with(Block::Title {
                text: "Reporte General".to_string(),
            })],
        }
    }

    #[test]
    fn test_format_extensions() {
        assert_eq!(ExportFormat::Svg.exporter().extension(), "svg");
        assert_eq!(ExportFormat::Markdown.exporter().extension(), "md");
        assert_eq!(ExportFormat::Json.exporter().extension(), "json");
    }

    #[test]
    fn test_write_all_uses_report_filenames() {
        let temp = TempDir::new().unwrap();
        let writer = ReportWriter::new(&[ExportFormat::Json, ExportFormat::Markdown, ExportFormat::Json]);

        let written = writer.write_all(&document(), temp.path()).unwrap();

        assert_eq!(written.len(), 2);
        assert!(temp.path().join("GeneralReport_21460123.json").exists());
        assert!(temp.path().join("GeneralReport_21460123.md").exists());
    }

    #[test]
    fn test_failed_export_leaves_no_file() {
        let temp = TempDir::new().unwrap();
        let writer = ReportWriter {
            exporters: vec![Box::new(FailingExporter)],
        };

        let err = writer.write_all(&document(), temp.path()).unwrap_err();

        assert!(err.is_recoverable());
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_interrupted_write_removes_staging_file() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("GeneralReport_21460123.svg");

        let err = persist_with(&target, |file| {
            file.write_all(b"<svg width=")?;
            Err(std::io::Error::new(std::io::ErrorKind::Other, "no space left on device"))
        })
        .unwrap_err();

        assert!(matches!(err, Error::Io(_)));
        assert!(err.is_recoverable());
        assert!(!target.exists());
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_persist_replaces_existing_report() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("GeneralReport_21460123.json");
        std::fs::write(&target, "old").unwrap();

        write_atomically(&target, b"new").unwrap();

        assert_eq!(std::fs::read_to_string(&target).unwrap(), "new");
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 1);
    }
}
