//! @ai:module:intent Renderable document structure produced by the renderer
//! @ai:module:layer domain
//! @ai:module:public_api Document, Page, PageKind, PageHeader, Block, TableBlock
//! @ai:module:stateless true

use crate::render::chart::{BarChart, PieChart};
use crate::shaping::{Polarity, Rgb};
use serde::Serialize;

/// @ai:intent Role of a page in the report sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    Cover,
    PieChart,
    BarChart,
    Narrative,
    Summary,
}

/// @ai:intent Header repeated on every per-test page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageHeader {
    pub title: String,
    pub student_name: String,
    pub generated_on: String,
}

/// @ai:intent Legend row next to a pie chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendItem {
    pub label: String,
    pub value: String,
    pub color: Rgb,
}

/// @ai:intent Simple table with a header row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableBlock {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// @ai:intent Individual answer row, emphasis follows likert polarity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerRow {
    pub number: u32,
    pub question: String,
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polarity: Option<Polarity>,
}

/// @ai:intent Content unit laid out on a page in order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Image { reference: String, caption: String },
    Title { text: String },
    Heading { text: String },
    Paragraph { text: String },
    Field { label: String, value: String },
    Legend { items: Vec<LegendItem> },
    Pie { chart: PieChart },
    Bars { chart: BarChart },
    Table { table: TableBlock },
    Answers { title: String, rows: Vec<AnswerRow> },
}

/// @ai:intent One printable page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub kind: PageKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<PageHeader>,
    pub blocks: Vec<Block>,
}

impl Page {
    pub fn new(kind: PageKind, header: Option<PageHeader>) -> Self {
        Self {
            kind,
            header,
            blocks: Vec::new(),
        }
    }

    /// @ai:intent Append a block, builder style
    /// @ai:effects pure
    pub fn with(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }
}

/// @ai:intent Paginated report for one student
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub title: String,
    pub control_number: String,
    pub pages: Vec<Page>,
}

impl Document {
    /// @ai:intent Kinds of all pages in order
    /// @ai:effects pure
    pub fn page_kinds(&self) -> Vec<PageKind> {
        self.pages.iter().map(|p| p.kind).collect()
    }

    /// @ai:intent Conventional export file name
    /// @ai:effects pure
    pub fn filename(&self, extension: &str) -> String {
        report_filename(&self.control_number, extension)
    }
}

/// @ai:intent File name convention GeneralReport_<control_number>.<ext>
/// @ai:effects pure
pub fn report_filename(control_number: &str, extension: &str) -> String {
    format!("GeneralReport_{}.{}", control_number.trim(), extension)
}
