//! @ai:module:intent Vector export of rendered documents, one A4 page per page
//! @ai:module:layer infrastructure
//! @ai:module:public_api SvgExporter, PAGE_WIDTH, PAGE_HEIGHT
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::export::DocumentExporter;
use crate::render::locale::format_value;
use crate::render::{AnswerRow, BarChart, Block, Document, LegendItem, Page, PageHeader, PieChart, TableBlock};
use crate::shaping::{Polarity, Rgb};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontStyle;

/// A4 in points.
pub const PAGE_WIDTH: u32 = 595;
pub const PAGE_HEIGHT: u32 = 842;

const MARGIN: i32 = 40;
const PIE_RADIUS: f64 = 110.0;
const BAR_LABEL_WIDTH: i32 = 150;
const BAR_HEIGHT: i32 = 14;
const WRAP_CHARS: usize = 88;

const INK: RGBColor = RGBColor(0x22, 0x22, 0x22);
const MUTED: RGBColor = RGBColor(0x77, 0x77, 0x77);
const RULE: RGBColor = RGBColor(0xCC, 0xCC, 0xCC);
const NEGATIVE: RGBColor = RGBColor(0xC0, 0x39, 0x2B);
const POSITIVE: RGBColor = RGBColor(0x1E, 0x84, 0x49);

type Area<'a> = DrawingArea<SVGBackend<'a>, Shift>;

/// @ai:intent Draws every page as an SVG region stacked top to bottom
pub struct SvgExporter;

impl SvgExporter {
    /// @ai:intent Create a new SVG exporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Draw one page into its region
    /// @ai:effects pure
    fn draw_page(&self, area: &Area<'_>, page: &Page) -> Result<()> {
        let (width, height) = area.dim_in_pixel();
        area.draw(&Rectangle::new(
            [(0, 0), (width as i32 - 1, height as i32 - 1)],
            RULE.stroke_width(1),
        ))
        .map_err(draw_err)?;

        let mut y = MARGIN;
        if let Some(header) = &page.header {
            y = draw_header(area, header, y)?;
        }

        let limit = height as i32 - MARGIN;
        for block in &page.blocks {
            if y >= limit {
                tracing::warn!("Page content overflows, remaining blocks not drawn");
                break;
            }
            y = draw_block(area, block, y)?;
        }

        Ok(())
    }
}

impl Default for SvgExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentExporter for SvgExporter {
    fn extension(&self) -> &'static str {
        "svg"
    }

    /// @ai:effects pure
    fn export(&self, document: &Document) -> Result<Vec<u8>> {
        let mut svg = String::new();
        let page_count = document.pages.len().max(1);

        {
            let root = SVGBackend::with_string(&mut svg, (PAGE_WIDTH, PAGE_HEIGHT * page_count as u32))
                .into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;

            let areas = root.split_evenly((page_count, 1));
            for (page, area) in document.pages.iter().zip(areas.iter()) {
                self.draw_page(area, page)?;
            }

            root.present().map_err(draw_err)?;
        }

        Ok(svg.into_bytes())
    }
}

fn draw_err<E: std::fmt::Display>(e: E) -> Error {
    Error::Export {
        format: "svg",
        message: e.to_string(),
    }
}

fn color(rgb: Rgb) -> RGBColor {
    RGBColor(rgb.r, rgb.g, rgb.b)
}

fn text(area: &Area<'_>, content: &str, pos: (i32, i32), size: f64, ink: RGBColor, bold: bool) -> Result<()> {
    let mut font = ("sans-serif", size).into_font();
    if bold {
        font = font.style(FontStyle::Bold);
    }

    area.draw(&Text::new(content.to_string(), pos, font.color(&ink)))
        .map_err(draw_err)
}

fn rule(area: &Area<'_>, y: i32) -> Result<()> {
    area.draw(&PathElement::new(
        vec![(MARGIN, y), (PAGE_WIDTH as i32 - MARGIN, y)],
        RULE.stroke_width(1),
    ))
    .map_err(draw_err)
}

/// @ai:intent Word wrap by character count
/// @ai:effects pure
fn wrap(content: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in content.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn draw_header(area: &Area<'_>, header: &PageHeader, y: i32) -> Result<i32> {
    text(area, &header.title, (MARGIN, y), 16.0, INK, true)?;
    text(
        area,
        &format!("{} | {}", header.student_name, header.generated_on),
        (MARGIN, y + 22),
        11.0,
        MUTED,
        false,
    )?;
    rule(area, y + 40)?;

    Ok(y + 56)
}

/// @ai:intent Draw a block at the cursor and return the next cursor
/// @ai:effects pure
fn draw_block(area: &Area<'_>, block: &Block, y: i32) -> Result<i32> {
    match block {
        Block::Image { reference, caption } => {
            area.draw(&Rectangle::new([(MARGIN, y), (MARGIN + 110, y + 60)], RULE.stroke_width(1)))
                .map_err(draw_err)?;
            text(area, caption, (MARGIN + 8, y + 18), 11.0, INK, true)?;
            text(area, reference, (MARGIN + 8, y + 36), 9.0, MUTED, false)?;
            Ok(y + 76)
        }
        Block::Title { text: title } => {
            text(area, title, (MARGIN, y), 26.0, INK, true)?;
            Ok(y + 44)
        }
        Block::Heading { text: heading } => {
            text(area, heading, (MARGIN, y), 15.0, INK, true)?;
            Ok(y + 26)
        }
        Block::Paragraph { text: paragraph } => {
            let mut cursor = y;
            for line in wrap(paragraph, WRAP_CHARS) {
                text(area, &line, (MARGIN, cursor), 11.0, INK, false)?;
                cursor += 16;
            }
            Ok(cursor + 8)
        }
        Block::Field { label, value } => {
            text(area, &format!("{}:", label), (MARGIN, y), 12.0, MUTED, true)?;
            text(area, value, (MARGIN + 170, y), 12.0, INK, false)?;
            Ok(y + 22)
        }
        Block::Legend { items } => draw_legend(area, items, y),
        Block::Pie { chart } => draw_pie(area, chart, y),
        Block::Bars { chart } => draw_bars(area, chart, y),
        Block::Table { table } => draw_table(area, table, y),
        Block::Answers { title, rows } => draw_answers(area, title, rows, y),
    }
}

fn draw_legend(area: &Area<'_>, items: &[LegendItem], y: i32) -> Result<i32> {
    let mut cursor = y;
    for item in items {
        area.draw(&Rectangle::new(
            [(MARGIN, cursor), (MARGIN + 10, cursor + 10)],
            color(item.color).filled(),
        ))
        .map_err(draw_err)?;
        text(area, &item.label, (MARGIN + 18, cursor), 11.0, INK, false)?;
        text(area, &item.value, (MARGIN + 260, cursor), 11.0, INK, true)?;
        cursor += 18;
    }

    Ok(cursor + 8)
}

fn draw_pie(area: &Area<'_>, chart: &PieChart, y: i32) -> Result<i32> {
    let center = (PAGE_WIDTH as f64 / 2.0, y as f64 + PIE_RADIUS);

    if chart.is_empty() {
        area.draw(&Circle::new(
            (center.0 as i32, center.1 as i32),
            PIE_RADIUS as i32,
            RULE.stroke_width(1),
        ))
        .map_err(draw_err)?;
        text(
            area,
            "Sin datos",
            (center.0 as i32 - 24, center.1 as i32 - 6),
            11.0,
            MUTED,
            false,
        )?;
    }

    for sector in &chart.sectors {
        let points: Vec<(i32, i32)> = sector
            .outline(center, PIE_RADIUS)
            .into_iter()
            .map(|(px, py)| (px.round() as i32, py.round() as i32))
            .collect();
        area.draw(&Polygon::new(points, color(sector.color).filled()))
            .map_err(draw_err)?;
    }

    Ok(y + (PIE_RADIUS * 2.0) as i32 + 20)
}

fn draw_bars(area: &Area<'_>, chart: &BarChart, y: i32) -> Result<i32> {
    let track_start = MARGIN + BAR_LABEL_WIDTH;
    let track_width = (PAGE_WIDTH as i32 - MARGIN - 50 - track_start) as f64;

    let mut cursor = y;
    for bar in &chart.bars {
        let bar_end = track_start + (track_width * bar.fraction).round() as i32;
        text(area, &bar.label, (MARGIN, cursor + 1), 11.0, INK, false)?;
        area.draw(&Rectangle::new(
            [(track_start, cursor), (bar_end, cursor + BAR_HEIGHT)],
            color(bar.color).filled(),
        ))
        .map_err(draw_err)?;
        text(area, &format_value(bar.value), (bar_end + 6, cursor + 1), 10.0, MUTED, false)?;
        cursor += BAR_HEIGHT + 8;
    }

    Ok(cursor + 10)
}

fn draw_table(area: &Area<'_>, table: &TableBlock, y: i32) -> Result<i32> {
    let columns = table.columns.len().max(1) as i32;
    let column_width = (PAGE_WIDTH as i32 - 2 * MARGIN) / columns;
    let x = |index: usize| MARGIN + column_width * index as i32;

    for (index, column) in table.columns.iter().enumerate() {
        text(area, column, (x(index), y), 11.0, INK, true)?;
    }
    rule(area, y + 16)?;

    let mut cursor = y + 22;
    for row in &table.rows {
        for (index, cell) in row.iter().enumerate() {
            text(area, cell, (x(index), cursor), 11.0, INK, false)?;
        }
        cursor += 18;
    }

    Ok(cursor + 10)
}

fn draw_answers(area: &Area<'_>, title: &str, rows: &[AnswerRow], y: i32) -> Result<i32> {
    text(area, title, (MARGIN, y), 13.0, INK, true)?;

    let mut cursor = y + 22;
    for row in rows {
        let (ink, bold) = match row.polarity {
            Some(Polarity::Negative) => (NEGATIVE, true),
            Some(Polarity::Positive) => (POSITIVE, true),
            None => (INK, false),
        };
        text(
            area,
            &format!("{}. {}", row.number, row.question),
            (MARGIN, cursor),
            10.0,
            INK,
            false,
        )?;
        text(area, &row.answer, (PAGE_WIDTH as i32 - MARGIN - 110, cursor), 10.0, ink, bold)?;
        cursor += 17;
    }

    Ok(cursor + 10)
}
