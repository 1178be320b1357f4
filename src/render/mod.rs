//! @ai:module:intent Document rendering for the General Report
//! @ai:module:layer application
//! @ai:module:public_api ReportRenderer, Document, Page, Block, PieChart, BarChart

pub mod chart;
pub mod document;
pub mod locale;
pub mod renderer;

pub use chart::{Bar, BarChart, PieChart, Sector, MIN_BAR_FRACTION};
pub use document::{
    report_filename, AnswerRow, Block, Document, LegendItem, Page, PageHeader, PageKind,
    TableBlock,
};
pub use renderer::{ReportRenderer, ReportRendererTrait, DEFAULT_TITLE};
