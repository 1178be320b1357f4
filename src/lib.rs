//! @ai:module:intent General Report library for tutoring and psychological assistance results
//! @ai:module:layer application
//! @ai:module:public_api access, config, error, export, render, shaping, store

pub mod access;
pub mod config;
pub mod error;
pub mod export;
pub mod render;
pub mod shaping;
pub mod store;

pub use access::{applicable_results, authorize, Audience};
pub use config::ReportConfig;
pub use error::{Error, Result};
pub use export::{DocumentExporter, ExportFormat, ReportWriter};
pub use render::{Document, ReportRenderer, ReportRendererTrait};
pub use shaping::{AnswerExtractor, Shaper, ShaperTrait, TestCategory};
pub use store::{ReportRequest, StoreReader, StoreReaderTrait};
