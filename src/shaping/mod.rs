//! @ai:module:intent Data shaping of stored test payloads into view models
//! @ai:module:layer application
//! @ai:module:public_api Shaper, ShapedResult, ViewEntry, TestCategory, AnswerExtractor, ShapingTables

pub mod answers;
pub mod category;
pub mod score;
pub mod shaper;
pub mod tables;

pub use answers::{AnswerExtractor, AnswerSheet, ContextAnswer, LikertAnswer, Polarity};
pub use category::TestCategory;
pub use score::Score;
pub use shaper::{ShapedResult, Shaper, ShaperTrait, ViewEntry};
pub use tables::{humanize, Rgb, ShapingTables, DEFAULT_PALETTE};
