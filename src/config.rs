//! @ai:module:intent Configuration structs for report generation
//! @ai:module:layer infrastructure
//! @ai:module:public_api ReportConfig, RenderConfig, ShapingConfig, OutputConfig, StudentFilter
//! @ai:module:stateless true

use crate::access::Audience;
use crate::export::ExportFormat;
use crate::render::DEFAULT_TITLE;
use crate::shaping::{Rgb, ShapingTables};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// @ai:intent Main configuration for the report pipeline
/// @ai:effects pure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub shaping: ShapingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// @ai:intent Cover and title settings
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}

/// @ai:intent Palette override for entry colors
/// @ai:effects pure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShapingConfig {
    /// Empty means the built-in palette
    #[serde(default)]
    pub palette: Vec<Rgb>,
}

/// @ai:intent Where and how reports are written
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_formats")]
    pub formats: Vec<ExportFormat>,
    #[serde(default = "default_audience")]
    pub audience: Audience,
    #[serde(default)]
    pub filter: StudentFilter,
}

/// @ai:intent Filter for selecting students by control number
/// @ai:effects pure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentFilter {
    pub control_numbers: Option<Vec<String>>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            institution: None,
            logo: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            formats: default_formats(),
            audience: default_audience(),
            filter: StudentFilter::default(),
        }
    }
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_directory() -> PathBuf {
    PathBuf::from("reports")
}

fn default_formats() -> Vec<ExportFormat> {
    vec![ExportFormat::Svg]
}

fn default_audience() -> Audience {
    Audience::Tutor
}

impl ReportConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @ai:intent Shaping tables honoring the palette override
    /// @ai:effects pure
    pub fn shaping_tables(&self) -> ShapingTables {
        ShapingTables::with_palette(self.shaping.palette.clone())
    }
}

impl StudentFilter {
    /// @ai:intent Check if filter matches a student
    /// @ai:effects pure
    pub fn matches(&self, control_number: &str) -> bool {
        self.control_numbers
            .as_ref()
            .map(|numbers| numbers.iter().any(|n| n.trim() == control_number.trim()))
            .unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_filter_matches_all_when_empty() {
        let filter = StudentFilter::default();
        assert!(filter.matches("21460123"));
    }

    #[test]
    fn test_filter_matches_specific_students() {
        let filter = StudentFilter {
            control_numbers: Some(vec!["21460123".to_string(), " 21460124".to_string()]),
        };
        assert!(filter.matches("21460123"));
        assert!(filter.matches("21460124"));
        assert!(!filter.matches("21460999"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ReportConfig = toml::from_str(
            r##"
[render]
institution = "Instituto Tecnológico"

[shaping]
palette = ["#112233", "#445566"]
"##,
        )
        .unwrap();

        assert_eq!(config.render.title, "Reporte General");
        assert_eq!(config.output.formats, vec![ExportFormat::Svg]);
        assert_eq!(config.output.audience, Audience::Tutor);
        assert_eq!(config.shaping_tables().palette().len(), 2);
    }

    #[test]
    fn test_invalid_palette_color_is_rejected() {
        let parsed: Result<ReportConfig, _> = toml::from_str("[shaping]\npalette = [\"blue\"]\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("report.toml");

        let mut config = ReportConfig::default();
        config.output.formats = vec![ExportFormat::Markdown, ExportFormat::Json];
        config.save(&path).unwrap();

        let loaded = ReportConfig::load(&path).unwrap();
        assert_eq!(loaded.output.formats, config.output.formats);
        assert!(loaded.shaping_tables().palette().len() > 2);
    }
}
