//! @ai:module:intent JSON export of rendered documents
//! @ai:module:layer infrastructure
//! @ai:module:public_api JsonExporter
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::export::DocumentExporter;
use crate::render::Document;

/// @ai:intent Serializes the document structure for downstream renderers
pub struct JsonExporter;

impl JsonExporter {
    /// @ai:intent Create a new JSON exporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentExporter for JsonExporter {
    fn extension(&self) -> &'static str {
        "json"
    }

    /// @ai:effects pure
    fn export(&self, document: &Document) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(document).map_err(|e| Error::Export {
            format: "json",
            message: e.to_string(),
        })
    }
}
