//! @ai:module:intent Student records and test outcomes read from storage
//! @ai:module:layer domain
//! @ai:module:public_api StoreReader, ReportRequest, Student, TestResult

pub mod loader;
pub mod model;

pub use loader::{StoreReader, StoreReaderTrait};
pub use model::{
    non_blank, Assignment, GroupRef, ReportRequest, Requester, Role, Student, TestRef, TestResult,
};
