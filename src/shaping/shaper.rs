//! @ai:module:intent Convert raw result payloads into legend and table view models
//! @ai:module:layer application
//! @ai:module:public_api Shaper, ShaperTrait, ShapedResult, ViewEntry
//! @ai:module:stateless true

use crate::shaping::category::TestCategory;
use crate::shaping::score::{coerce_number, score_entries, Score};
use crate::shaping::tables::{humanize, Rgb, ShapingTables};
use crate::store::TestResult;
use serde::Serialize;
use serde_json::Value;

const LEARNING_STYLE_RESERVED: &[&str] = &["percentages", "dominant_style"];
const ASSISTANCE_RESERVED: &[&str] = &["answers", "level"];

/// @ai:intent One named, colored value in a view model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewEntry {
    pub key: String,
    pub name: String,
    pub value: f64,
    pub color: Rgb,
}

/// @ai:intent Parallel legend and table view models for one result
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShapedResult {
    pub legend: Vec<ViewEntry>,
    pub table: Vec<ViewEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dominant_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

impl ShapedResult {
    pub fn is_empty(&self) -> bool {
        self.legend.is_empty() && self.table.is_empty()
    }
}

/// @ai:intent Trait for shaping a test result into view models
pub trait ShaperTrait: Send + Sync {
    /// @ai:intent Shape a result under the given category rules
    fn shape(&self, result: &TestResult, category: TestCategory) -> ShapedResult;
}

/// @ai:intent Applies per-category shaping rules using immutable tables
pub struct Shaper {
    tables: ShapingTables,
}

impl Shaper {
    /// @ai:intent Create a shaper over the given tables
    /// @ai:effects pure
    pub fn new(tables: ShapingTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &ShapingTables {
        &self.tables
    }

    /// @ai:intent Shape a bare payload, missing payloads yield empty models
    /// @ai:effects pure
    pub fn shape_payload(&self, payload: Option<&Value>, category: TestCategory) -> ShapedResult {
        match category {
            TestCategory::LearningStyles => self.shape_learning_styles(payload),
            TestCategory::EmotionalIntelligence => self.shape_share_of_total(payload, category),
            TestCategory::SoftSkills => self.shape_share_of_total(payload, category),
            TestCategory::PsychologicalAssistance => self.shape_assistance(payload),
            TestCategory::Generic => self.shape_share_of_total(payload, category),
        }
    }

    fn entry(&self, category: TestCategory, key: &str, value: f64, color: Rgb) -> ViewEntry {
        ViewEntry {
            key: key.to_string(),
            name: self.tables.display_name(category, key),
            value,
            color,
        }
    }

    /// @ai:intent Legend from the stored percentage map, table from raw counts
    /// @ai:effects pure
    fn shape_learning_styles(&self, payload: Option<&Value>) -> ShapedResult {
        let category = TestCategory::LearningStyles;
        let percentages = payload.and_then(|p| p.get("percentages"));
        let mut shaped = ShapedResult::default();

        for (index, (key, raw)) in score_entries(payload, LEARNING_STYLE_RESERVED)
            .into_iter()
            .enumerate()
        {
            let color = self.tables.palette_color(index);
            let percentage = percentages
                .and_then(|p| p.get(key))
                .map(coerce_number)
                .unwrap_or(0.0);

            shaped.legend.push(self.entry(category, key, percentage, color));
            shaped
                .table
                .push(self.entry(category, key, Score::from_value(raw).value(), color));
        }

        shaped.dominant_style = payload
            .and_then(|p| p.get("dominant_style"))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| self.tables.display_name(category, &style_key(s)));

        shaped
    }

    /// @ai:intent Legend as rounded share of the total, table rounded to 2 decimals
    /// @ai:effects pure
    fn shape_share_of_total(&self, payload: Option<&Value>, category: TestCategory) -> ShapedResult {
        let values: Vec<(&str, f64)> = score_entries(payload, &[])
            .into_iter()
            .map(|(key, raw)| (key, Score::from_value(raw).value()))
            .collect();
        let total: f64 = values.iter().map(|(_, v)| v).sum();
        let mut shaped = ShapedResult::default();

        for (index, (key, value)) in values.into_iter().enumerate() {
            let color = self.tables.palette_color(index);
            let percentage = if total > 0.0 {
                (100.0 * value / total).round()
            } else {
                0.0
            };

            shaped.legend.push(self.entry(category, key, percentage, color));
            shaped.table.push(self.entry(category, key, round2(value), color));
        }

        shaped
    }

    /// @ai:intent Raw category scores for both models, fixed colors first
    /// @ai:effects pure
    fn shape_assistance(&self, payload: Option<&Value>) -> ShapedResult {
        let category = TestCategory::PsychologicalAssistance;
        let mut shaped = ShapedResult::default();

        for (index, (key, raw)) in score_entries(payload, ASSISTANCE_RESERVED)
            .into_iter()
            .enumerate()
        {
            let value = Score::from_value(raw).value();
            let color = self.tables.entry_color(category, key, index);

            shaped.legend.push(self.entry(category, key, value, color));
            shaped.table.push(self.entry(category, key, value, color));
        }

        shaped.level = payload
            .and_then(|p| p.get("level"))
            .and_then(Value::as_str)
            .map(humanize)
            .filter(|s| !s.is_empty());

        shaped
    }
}

impl Default for Shaper {
    fn default() -> Self {
        Self::new(ShapingTables::default())
    }
}

impl ShaperTrait for Shaper {
    /// @ai:effects pure
    fn shape(&self, result: &TestResult, category: TestCategory) -> ShapedResult {
        self.shape_payload(result.payload.as_ref(), category)
    }
}

/// @ai:intent Dictionary key for a stored style label, e.g. "Lectura/Escritura" -> "lectura_escritura"
/// @ai:effects pure
fn style_key(label: &str) -> String {
    label
        .to_lowercase()
        .split(|c: char| c == '/' || c == '-' || c == '_' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// @ai:intent Round to two decimal places
/// @ai:effects pure
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shaping::tables::DEFAULT_PALETTE;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn values(entries: &[ViewEntry]) -> Vec<f64> {
        entries.iter().map(|e| e.value).collect()
    }

    #[test]
    fn test_learning_styles_reads_stored_percentages() {
        let payload = json!({
            "visual": 6,
            "auditivo": 2,
            "kinestesico": 2,
            "percentages": {"visual": 60, "auditivo": 20, "kinestesico": 20},
            "dominant_style": "Visual"
        });

        let shaped = Shaper::default().shape_payload(Some(&payload), TestCategory::LearningStyles);
        assert_eq!(values(&shaped.legend), vec![60.0, 20.0, 20.0]);
        assert_eq!(values(&shaped.table), vec![6.0, 2.0, 2.0]);
        assert_eq!(shaped.legend[2].name, "Kinestésico");
        assert_eq!(shaped.dominant_style.as_deref(), Some("Visual"));
    }

    #[test]
    fn test_dominant_style_label_resolves_through_dictionary() {
        let shaper = Shaper::default();
        let dominant = |label: &str| {
            shaper
                .shape_payload(
                    Some(&json!({"visual": 1, "dominant_style": label})),
                    TestCategory::LearningStyles,
                )
                .dominant_style
        };

        assert_eq!(dominant("Lectura/Escritura").as_deref(), Some("Lectura/Escritura"));
        assert_eq!(dominant("lectura - escritura").as_deref(), Some("Lectura/Escritura"));
        assert_eq!(dominant("READING_WRITING").as_deref(), Some("Lectura/Escritura"));
        assert_eq!(dominant("Musical").as_deref(), Some("Musical"));
    }

    #[test]
    fn test_learning_styles_without_percentages_shows_zero() {
        let payload = json!({"visual": 6, "auditivo": 2});

        let shaped = Shaper::default().shape_payload(Some(&payload), TestCategory::LearningStyles);
        assert_eq!(values(&shaped.legend), vec![0.0, 0.0]);
        assert_eq!(values(&shaped.table), vec![6.0, 2.0]);
    }

    #[test]
    fn test_emotional_intelligence_share_of_total() {
        let payload = json!({"empatia": 8, "motivacion": 2});

        let shaped =
            Shaper::default().shape_payload(Some(&payload), TestCategory::EmotionalIntelligence);
        assert_eq!(values(&shaped.legend), vec![80.0, 20.0]);
        assert_eq!(values(&shaped.table), vec![8.0, 2.0]);
        assert_eq!(shaped.legend[0].name, "Empatía");
    }

    #[test]
    fn test_soft_skills_composites_and_rounding() {
        let payload = json!({
            "liderazgo": {"weighted_sum": 3.333, "sum": 5},
            "comunicacion": {"sum": 3},
            "creatividad": {"items": []},
            "adaptabilidad": "n/a"
        });

        let shaped = Shaper::default().shape_payload(Some(&payload), TestCategory::SoftSkills);
        assert_eq!(values(&shaped.table), vec![3.33, 3.0, 0.0, 0.0]);
        assert_eq!(values(&shaped.legend), vec![53.0, 47.0, 0.0, 0.0]);
    }

    #[test]
    fn test_zero_total_gives_zero_percentages() {
        let payload = json!({"empatia": 0, "motivacion": 0});

        let shaped =
            Shaper::default().shape_payload(Some(&payload), TestCategory::EmotionalIntelligence);
        assert_eq!(values(&shaped.legend), vec![0.0, 0.0]);
    }

    #[test]
    fn test_percentages_sum_to_about_one_hundred() {
        let payload = json!({"a": 1, "b": 1, "c": 1, "d": 2, "e": 7});

        for category in [
            TestCategory::EmotionalIntelligence,
            TestCategory::SoftSkills,
            TestCategory::Generic,
        ] {
            let shaped = Shaper::default().shape_payload(Some(&payload), category);
            let sum: f64 = values(&shaped.legend).iter().sum();
            assert!((sum - 100.0).abs() <= 1.0, "{} summed to {}", category, sum);
        }
    }

    #[test]
    fn test_empty_payload_for_every_category() {
        for category in TestCategory::ALL {
            let shaper = Shaper::default();
            assert!(shaper.shape_payload(Some(&json!({})), category).is_empty());
            assert!(shaper.shape_payload(None, category).is_empty());
        }
    }

    #[test]
    fn test_assistance_uses_raw_scores_and_fixed_colors() {
        let payload = json!({
            "ansiedad": 12,
            "insomnio": 4,
            "answers": {"question_1": 2},
            "level": "moderado_alto"
        });

        let shaped =
            Shaper::default().shape_payload(Some(&payload), TestCategory::PsychologicalAssistance);
        assert_eq!(values(&shaped.legend), vec![12.0, 4.0]);
        assert_eq!(values(&shaped.table), vec![12.0, 4.0]);
        assert_eq!(shaped.legend[0].color, Rgb::new(0xE1, 0x57, 0x59));
        assert_eq!(shaped.legend[1].color, DEFAULT_PALETTE[1]);
        assert_eq!(shaped.legend[1].name, "Insomnio");
        assert_eq!(shaped.level.as_deref(), Some("Moderado Alto"));
    }

    #[test]
    fn test_generic_humanizes_and_cycles_palette() {
        let payload: Value = serde_json::from_str(
            r#"{"k_1":1,"k_2":1,"k_3":1,"k_4":1,"k_5":1,"k_6":1,"k_7":1,"k_8":1,"k_9":1}"#,
        )
        .unwrap();

        let shaped = Shaper::default().shape_payload(Some(&payload), TestCategory::Generic);
        assert_eq!(shaped.legend[0].name, "K 1");
        assert_eq!(shaped.legend[8].color, shaped.legend[0].color);
    }

    #[test]
    fn test_shaping_is_idempotent() {
        let payload = json!({"empatia": 8, "motivacion": 2});
        let shaper = Shaper::default();

        assert_eq!(
            shaper.shape_payload(Some(&payload), TestCategory::EmotionalIntelligence),
            shaper.shape_payload(Some(&payload), TestCategory::EmotionalIntelligence)
        );
    }
}
