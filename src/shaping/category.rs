//! @ai:module:intent Closed set of psychometric test categories
//! @ai:module:layer domain
//! @ai:module:public_api TestCategory
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};

/// @ai:intent Category of psychometric test, selects the shaping rules
/// @ai:effects pure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestCategory {
    LearningStyles,
    EmotionalIntelligence,
    SoftSkills,
    PsychologicalAssistance,
    Generic,
}

impl TestCategory {
    pub const ALL: [TestCategory; 5] = [
        TestCategory::LearningStyles,
        TestCategory::EmotionalIntelligence,
        TestCategory::SoftSkills,
        TestCategory::PsychologicalAssistance,
        TestCategory::Generic,
    ];

    /// @ai:intent Resolve a stored test code, unknown codes fall back to Generic
    /// @ai:effects pure
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_lowercase().replace('-', "_").as_str() {
            "learning_styles" | "estilos_aprendizaje" | "vark" => TestCategory::LearningStyles,
            "emotional_intelligence" | "inteligencia_emocional" => {
                TestCategory::EmotionalIntelligence
            }
            "soft_skills" | "habilidades_blandas" => TestCategory::SoftSkills,
            "psychological_assistance" | "asistencia_psicologica" => {
                TestCategory::PsychologicalAssistance
            }
            _ => TestCategory::Generic,
        }
    }

    /// @ai:intent Convert category to its canonical code
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            TestCategory::LearningStyles => "learning_styles",
            TestCategory::EmotionalIntelligence => "emotional_intelligence",
            TestCategory::SoftSkills => "soft_skills",
            TestCategory::PsychologicalAssistance => "psychological_assistance",
            TestCategory::Generic => "generic",
        }
    }

    /// @ai:intent Report title for the category, None for Generic
    /// @ai:effects pure
    pub fn display_name(&self) -> Option<&'static str> {
        match self {
            TestCategory::LearningStyles => Some("Estilos de Aprendizaje"),
            TestCategory::EmotionalIntelligence => Some("Inteligencia Emocional"),
            TestCategory::SoftSkills => Some("Habilidades Blandas"),
            TestCategory::PsychologicalAssistance => Some("Asistencia Psicológica"),
            TestCategory::Generic => None,
        }
    }

    /// @ai:intent Whether legend values are percentages of the payload total
    /// @ai:effects pure
    pub fn uses_share_of_total(&self) -> bool {
        matches!(
            self,
            TestCategory::EmotionalIntelligence | TestCategory::SoftSkills | TestCategory::Generic
        )
    }
}

impl std::fmt::Display for TestCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_round_trips_canonical_codes() {
        for category in TestCategory::ALL {
            assert_eq!(TestCategory::from_code(category.as_str()), category);
        }
    }

    #[test]
    fn test_from_code_accepts_aliases() {
        assert_eq!(
            TestCategory::from_code("Inteligencia-Emocional"),
            TestCategory::EmotionalIntelligence
        );
        assert_eq!(TestCategory::from_code(" VARK "), TestCategory::LearningStyles);
    }

    #[test]
    fn test_unknown_code_is_generic() {
        assert_eq!(TestCategory::from_code("career_interest"), TestCategory::Generic);
        assert_eq!(TestCategory::Generic.display_name(), None);
    }
}
