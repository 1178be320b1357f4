//! @ai:module:intent Markdown export of rendered documents
//! @ai:module:layer infrastructure
//! @ai:module:public_api MarkdownExporter
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::export::DocumentExporter;
use crate::render::locale::format_value;
use crate::render::{Block, Document, Page, PageKind, TableBlock};
use crate::shaping::Polarity;
use std::fmt::Write as FmtWrite;

const BAR_CELLS: f64 = 20.0;

/// @ai:intent Writes a plain-text rendition of the report
pub struct MarkdownExporter;

impl MarkdownExporter {
    /// @ai:intent Create a new Markdown exporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    fn page_label(kind: PageKind) -> &'static str {
        match kind {
            PageKind::Cover => "Portada",
            PageKind::PieChart => "Distribución",
            PageKind::BarChart => "Puntajes",
            PageKind::Narrative => "Recomendaciones",
            PageKind::Summary => "Resumen",
        }
    }

    /// @ai:intent Generate one page section
    /// @ai:effects pure
    fn write_page(output: &mut String, number: usize, page: &Page) -> std::fmt::Result {
        writeln!(output, "## Página {}: {}", number, Self::page_label(page.kind))?;
        writeln!(output)?;

        if let Some(header) = &page.header {
            writeln!(
                output,
                "_{} | {} | {}_",
                header.title, header.student_name, header.generated_on
            )?;
            writeln!(output)?;
        }

        for block in &page.blocks {
            Self::write_block(output, block)?;
        }

        Ok(())
    }

    fn write_block(output: &mut String, block: &Block) -> std::fmt::Result {
        match block {
            Block::Image { reference, caption } => writeln!(output, "![{}]({})", caption, reference)?,
            Block::Title { text } => writeln!(output, "# {}", text)?,
            Block::Heading { text } => writeln!(output, "### {}", text)?,
            Block::Paragraph { text } => writeln!(output, "{}", text)?,
            Block::Field { label, value } => writeln!(output, "- **{}:** {}", label, value)?,
            Block::Legend { items } => {
                for item in items {
                    writeln!(output, "- {} ({}): {}", item.label, item.color, item.value)?;
                }
            }
            Block::Pie { chart } => {
                if chart.is_empty() {
                    writeln!(output, "_Sin datos para graficar._")?;
                }
                for sector in &chart.sectors {
                    writeln!(
                        output,
                        "- {}: {:.1}° desde {:.1}°",
                        sector.label, sector.sweep_deg, sector.start_deg
                    )?;
                }
            }
            Block::Bars { chart } => {
                writeln!(output, "```")?;
                for bar in &chart.bars {
                    let cells = (bar.fraction * BAR_CELLS).round().max(1.0) as usize;
                    writeln!(
                        output,
                        "{:<28} {} {}",
                        bar.label,
                        "#".repeat(cells),
                        format_value(bar.value)
                    )?;
                }
                writeln!(output, "```")?;
            }
            Block::Table { table } => Self::write_table(output, table)?,
            Block::Answers { title, rows } => {
                writeln!(output, "### {}", title)?;
                writeln!(output)?;
                for row in rows {
                    let marker = match row.polarity {
                        Some(Polarity::Positive) => " (+)",
                        Some(Polarity::Negative) => " (-)",
                        None => "",
                    };
                    writeln!(
                        output,
                        "{}. {}{} **{}**",
                        row.number, row.question, marker, row.answer
                    )?;
                }
            }
        }

        writeln!(output)
    }

    fn write_table(output: &mut String, table: &TableBlock) -> std::fmt::Result {
        writeln!(output, "| {} |", table.columns.join(" | "))?;
        writeln!(
            output,
            "|{}",
            table.columns.iter().map(|_| "---|").collect::<String>()
        )?;

        for row in &table.rows {
            writeln!(output, "| {} |", row.join(" | "))?;
        }

        Ok(())
    }

    /// @ai:intent Generate the whole document as Markdown text
    /// @ai:effects pure
    fn render_into(output: &mut String, document: &Document) -> std::fmt::Result {
        writeln!(output, "# {}", document.title)?;
        writeln!(output)?;
        writeln!(output, "**Número de control:** {}", document.control_number)?;
        writeln!(output)?;

        for (index, page) in document.pages.iter().enumerate() {
            Self::write_page(output, index + 1, page)?;
        }

        Ok(())
    }
}

impl Default for MarkdownExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentExporter for MarkdownExporter {
    fn extension(&self) -> &'static str {
        "md"
    }

    /// @ai:effects pure
    fn export(&self, document: &Document) -> Result<Vec<u8>> {
        let mut output = String::new();
        Self::render_into(&mut output, document).map_err(|e| Error::Export {
            format: "markdown",
            message: e.to_string(),
        })?;

        Ok(output.into_bytes())
    }
}
