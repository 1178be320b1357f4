//! @ai:module:intent Typed access to loosely structured score payloads
//! @ai:module:layer domain
//! @ai:module:public_api Score, number, coerce_number, score_entries
//! @ai:module:stateless true

use serde_json::Value;

/// @ai:intent A dimension score, either plain or a weighted composite
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Score {
    Numeric(f64),
    Composite {
        weighted_sum: Option<f64>,
        sum: Option<f64>,
    },
}

impl Score {
    /// @ai:intent Classify a raw payload value
    /// @ai:effects pure
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(fields) => Score::Composite {
                weighted_sum: fields.get("weighted_sum").and_then(number),
                sum: fields.get("sum").and_then(number),
            },
            other => Score::Numeric(coerce_number(other)),
        }
    }

    /// @ai:intent Effective value: weighted sum, else sum, else zero
    /// @ai:effects pure
    pub fn value(&self) -> f64 {
        match *self {
            Score::Numeric(v) => v,
            Score::Composite { weighted_sum, sum } => weighted_sum.or(sum).unwrap_or(0.0),
        }
    }
}

/// @ai:intent Numeric reading of a JSON value; numeric strings count
/// @ai:effects pure
pub fn number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed.filter(|v| v.is_finite())
}

/// @ai:intent Numeric reading with non-numeric values coerced to zero
/// @ai:effects pure
pub fn coerce_number(value: &Value) -> f64 {
    number(value).unwrap_or(0.0)
}

/// @ai:intent Key/value score pairs of a payload in stored order
///
/// A nested `scores` object wins; otherwise the top-level entries are used
/// minus the category's reserved keys. Anything that is not an object yields
/// no entries.
/// @ai:effects pure
pub fn score_entries<'a>(payload: Option<&'a Value>, reserved: &[&str]) -> Vec<(&'a str, &'a Value)> {
    let Some(Value::Object(fields)) = payload else {
        return Vec::new();
    };

    if let Some(Value::Object(scores)) = fields.get("scores") {
        return scores.iter().map(|(k, v)| (k.as_str(), v)).collect();
    }

    fields
        .iter()
        .filter(|(k, _)| k.as_str() != "scores" && !reserved.contains(&k.as_str()))
        .map(|(k, v)| (k.as_str(), v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_composite_prefers_weighted_sum() {
        let score = Score::from_value(&json!({"weighted_sum": 7.5, "sum": 9}));
        assert_eq!(score.value(), 7.5);
    }

    #[test]
    fn test_composite_falls_back_to_sum_then_zero() {
        assert_eq!(Score::from_value(&json!({"sum": 9})).value(), 9.0);
        assert_eq!(Score::from_value(&json!({"items": [1, 2]})).value(), 0.0);
    }

    #[test]
    fn test_non_numeric_values_coerce_to_zero() {
        assert_eq!(Score::from_value(&json!("alto")).value(), 0.0);
        assert_eq!(Score::from_value(&json!(null)).value(), 0.0);
        assert_eq!(Score::from_value(&json!([3])).value(), 0.0);
        assert_eq!(Score::from_value(&json!(" 4.5 ")).value(), 4.5);
    }

    #[test]
    fn test_score_entries_keeps_stored_order_and_skips_reserved() {
        let payload = json!({"visual": 6, "percentages": {"visual": 100}, "auditivo": 2});
        let keys: Vec<_> = score_entries(Some(&payload), &["percentages"])
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["visual", "auditivo"]);
    }

    #[test]
    fn test_score_entries_prefers_nested_scores() {
        let payload = json!({"scores": {"estres": 4}, "level": "medio"});
        let entries = score_entries(Some(&payload), &["level"]);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, "estres");
    }

    #[test]
    fn test_score_entries_tolerates_missing_payload() {
        assert!(score_entries(None, &[]).is_empty());
        assert!(score_entries(Some(&json!([1, 2])), &[]).is_empty());
    }
}
