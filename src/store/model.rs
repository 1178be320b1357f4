//! @ai:module:intent Persisted records consumed by the report pipeline
//! @ai:module:layer domain
//! @ai:module:public_api Student, GroupRef, TestRef, TestResult, ReportRequest, Requester, Role, Assignment
//! @ai:module:stateless true

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// @ai:intent Reference to the student's current group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRef {
    pub id: u64,
    pub name: String,
}

/// @ai:intent Student identity record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: u64,
    pub control_number: String,
    pub name: String,
    pub first_surname: String,
    #[serde(default)]
    pub second_surname: Option<String>,
    #[serde(default)]
    pub group: Option<GroupRef>,
    pub semester: u32,
    #[serde(default)]
    pub photo_ref: Option<String>,
}

impl Student {
    /// @ai:intent Name plus both surnames with whitespace collapsed
    /// @ai:effects pure
    pub fn full_name(&self) -> String {
        [
            self.name.as_str(),
            self.first_surname.as_str(),
            self.second_surname.as_deref().unwrap_or(""),
        ]
        .iter()
        .flat_map(|part| part.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// @ai:intent Group display name, empty when unassigned
    /// @ai:effects pure
    pub fn group_name(&self) -> &str {
        self.group.as_ref().map(|g| g.name.as_str()).unwrap_or("")
    }
}

/// @ai:intent Identifies the test a result belongs to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestRef {
    pub code: String,
    pub name: String,
}

/// @ai:intent One completed test for a student
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub test: TestRef,
    pub student_id: u64,
    #[serde(deserialize_with = "deserialize_completion_date")]
    pub completed_at: NaiveDate,
    #[serde(default)]
    pub total_score: Option<f64>,
    /// Category-dependent result blob; JSON-encoded strings are decoded on read
    #[serde(default, deserialize_with = "deserialize_payload")]
    pub payload: Option<Value>,
    #[serde(default)]
    pub recommendation: Option<String>,
    #[serde(default)]
    pub fun_fact: Option<String>,
    #[serde(default)]
    pub total_answered: Option<u32>,
}

impl TestResult {
    /// @ai:intent Whether a narrative page should follow the charts
    /// @ai:effects pure
    pub fn has_narrative(&self) -> bool {
        non_blank(&self.recommendation).is_some() || non_blank(&self.fun_fact).is_some()
    }
}

/// @ai:intent Trimmed text when present and not blank
/// @ai:effects pure
pub fn non_blank(text: &Option<String>) -> Option<&str> {
    text.as_deref().map(str::trim).filter(|t| !t.is_empty())
}

/// @ai:intent Role of whoever asked for the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Tutor,
    Psychologist,
}

/// @ai:intent A tutor or psychologist assignment to a group for a semester
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub group_id: u64,
    pub semester: u32,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// @ai:intent Identity of the report requester
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requester {
    pub role: Role,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

/// @ai:intent Everything needed to build one student's report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    pub student: Student,
    #[serde(default)]
    pub results: Vec<TestResult>,
    #[serde(default)]
    pub requested_by: Option<Requester>,
}

/// @ai:intent Accept plain dates or datetimes and keep the date part
/// @ai:effects pure
fn deserialize_completion_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let date_part = raw.get(..10).unwrap_or(raw.as_str());

    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(serde::de::Error::custom)
}

/// @ai:intent Decode payloads stored either as JSON values or JSON-encoded strings
/// @ai:effects pure
fn deserialize_payload<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;

    Ok(match value {
        Value::Null => None,
        Value::String(encoded) => match serde_json::from_str::<Value>(&encoded) {
            Ok(Value::Null) => None,
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::warn!("Ignoring undecodable result payload: {}", e);
                None
            }
        },
        other => Some(other),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(second: Option<&str>) -> Student {
        Student {
            id: 1,
            control_number: "21460123".to_string(),
            name: "  Ana  María ".to_string(),
            first_surname: "López".to_string(),
            second_surname: second.map(str::to_string),
            group: None,
            semester: 3,
            photo_ref: None,
        }
    }

    #[test]
    fn test_full_name_collapses_whitespace() {
        assert_eq!(student(Some(" Ruiz ")).full_name(), "Ana María López Ruiz");
        assert_eq!(student(None).full_name(), "Ana María López");
    }

    #[test]
    fn test_completion_date_accepts_datetime() {
        let json = r#"{
            "test": {"code": "soft_skills", "name": "Habilidades"},
            "student_id": 1,
            "completed_at": "2026-03-14 10:22:05"
        }"#;

        let result: TestResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.completed_at, NaiveDate::from_ymd_opt(2026, 3, 14).unwrap());
        assert!(result.payload.is_none());
    }

    #[test]
    fn test_string_payload_is_decoded() {
        let json = r#"{
            "test": {"code": "soft_skills", "name": "Habilidades"},
            "student_id": 1,
            "completed_at": "2026-03-14",
            "payload": "{\"liderazgo\": 4}"
        }"#;

        let result: TestResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.payload.unwrap()["liderazgo"], 4);
    }

    #[test]
    fn test_undecodable_payload_is_absent() {
        let json = r#"{
            "test": {"code": "soft_skills", "name": "Habilidades"},
            "student_id": 1,
            "completed_at": "2026-03-14",
            "payload": "not json"
        }"#;

        let result: TestResult = serde_json::from_str(json).unwrap();
        assert!(result.payload.is_none());
    }

    #[test]
    fn test_narrative_requires_non_blank_text() {
        let json = r#"{
            "test": {"code": "soft_skills", "name": "Habilidades"},
            "student_id": 1,
            "completed_at": "2026-03-14",
            "recommendation": "   "
        }"#;

        let mut result: TestResult = serde_json::from_str(json).unwrap();
        assert!(!result.has_narrative());

        result.fun_fact = Some("Dato".to_string());
        assert!(result.has_narrative());
    }
}
