//! @ai:module:intent Resolve individual psychological-assistance answers
//! @ai:module:layer application
//! @ai:module:public_api AnswerExtractor, AnswerSheet, ContextAnswer, LikertAnswer, Polarity, QUESTIONS
//! @ai:module:stateless true

use crate::shaping::score::number;
use crate::store::TestResult;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

/// @ai:intent Direction of a likert statement, used for display emphasis only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
}

/// @ai:intent How a question's raw value is interpreted
#[derive(Debug, Clone, Copy)]
pub enum QuestionKind {
    Context {
        labels: &'static [(&'static str, &'static str)],
    },
    Likert {
        polarity: Polarity,
    },
}

/// @ai:intent Static definition of one intake question
#[derive(Debug, Clone, Copy)]
pub struct QuestionDef {
    pub number: u32,
    pub text: &'static str,
    pub kind: QuestionKind,
}

const YES_NO: &[(&str, &str)] = &[("1", "Sí"), ("2", "No")];

pub const LIKERT_SCALE: [(i64, &str); 5] = [
    (1, "Nunca"),
    (2, "Casi nunca"),
    (3, "A veces"),
    (4, "Casi siempre"),
    (5, "Siempre"),
];

pub static QUESTIONS: [QuestionDef; 15] = [
    QuestionDef {
        number: 1,
        text: "¿Con quién vives actualmente?",
        kind: QuestionKind::Context {
            labels: &[
                ("1", "Con mis padres"),
                ("2", "Con otro familiar"),
                ("3", "Solo(a)"),
                ("4", "Con amigos o compañeros"),
                ("5", "Con mi pareja"),
            ],
        },
    },
    QuestionDef {
        number: 2,
        text: "¿Trabajas además de estudiar?",
        kind: QuestionKind::Context {
            labels: &[("1", "No"), ("2", "Medio tiempo"), ("3", "Tiempo completo")],
        },
    },
    QuestionDef {
        number: 3,
        text: "¿Cómo describirías tu situación económica?",
        kind: QuestionKind::Context {
            labels: &[
                ("1", "Muy difícil"),
                ("2", "Difícil"),
                ("3", "Estable"),
                ("4", "Holgada"),
            ],
        },
    },
    QuestionDef {
        number: 4,
        text: "¿Has recibido atención psicológica anteriormente?",
        kind: QuestionKind::Context { labels: YES_NO },
    },
    QuestionDef {
        number: 5,
        text: "¿Cuántas horas duermes por noche?",
        kind: QuestionKind::Context {
            labels: &[
                ("1", "Menos de 5"),
                ("2", "De 5 a 6"),
                ("3", "De 7 a 8"),
                ("4", "Más de 8"),
            ],
        },
    },
    QuestionDef {
        number: 6,
        text: "Me siento nervioso(a) o ansioso(a).",
        kind: QuestionKind::Likert {
            polarity: Polarity::Negative,
        },
    },
    QuestionDef {
        number: 7,
        text: "Disfruto de las actividades que realizo.",
        kind: QuestionKind::Likert {
            polarity: Polarity::Positive,
        },
    },
    QuestionDef {
        number: 8,
        text: "Me cuesta concentrarme en clase.",
        kind: QuestionKind::Likert {
            polarity: Polarity::Negative,
        },
    },
    QuestionDef {
        number: 9,
        text: "Cuento con alguien con quien hablar de mis problemas.",
        kind: QuestionKind::Likert {
            polarity: Polarity::Positive,
        },
    },
    QuestionDef {
        number: 10,
        text: "Me siento triste sin una razón aparente.",
        kind: QuestionKind::Likert {
            polarity: Polarity::Negative,
        },
    },
    QuestionDef {
        number: 11,
        text: "Me siento satisfecho(a) conmigo mismo(a).",
        kind: QuestionKind::Likert {
            polarity: Polarity::Positive,
        },
    },
    QuestionDef {
        number: 12,
        text: "Las exigencias escolares me abruman.",
        kind: QuestionKind::Likert {
            polarity: Polarity::Negative,
        },
    },
    QuestionDef {
        number: 13,
        text: "Me llevo bien con mis compañeros de grupo.",
        kind: QuestionKind::Likert {
            polarity: Polarity::Positive,
        },
    },
    QuestionDef {
        number: 14,
        text: "He pensado en abandonar mis estudios.",
        kind: QuestionKind::Likert {
            polarity: Polarity::Negative,
        },
    },
    QuestionDef {
        number: 15,
        text: "Tengo metas claras para mi futuro.",
        kind: QuestionKind::Likert {
            polarity: Polarity::Positive,
        },
    },
];

/// @ai:intent Resolved multiple-choice answer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextAnswer {
    pub number: u32,
    pub question: String,
    pub raw: String,
    pub label: String,
}

/// @ai:intent Resolved 5-point scale answer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LikertAnswer {
    pub number: u32,
    pub question: String,
    pub raw: String,
    pub label: String,
    pub polarity: Polarity,
}

/// @ai:intent Individual answers split by question kind, ascending by number
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnswerSheet {
    pub context: Vec<ContextAnswer>,
    pub likert: Vec<LikertAnswer>,
    /// Keys that matched no known question
    pub dropped: Vec<String>,
}

impl AnswerSheet {
    pub fn is_empty(&self) -> bool {
        self.context.is_empty() && self.likert.is_empty()
    }
}

/// @ai:intent Extracts answers from the `answers` map of an assistance payload
pub struct AnswerExtractor {
    question_key_regex: Regex,
}

impl AnswerExtractor {
    /// @ai:intent Create a new answer extractor
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            question_key_regex: Regex::new(r"^question_(\d+)$").expect("valid question key pattern"),
        }
    }

    /// @ai:intent Extract answers from a stored result
    /// @ai:effects pure
    pub fn extract(&self, result: &TestResult) -> AnswerSheet {
        self.extract_payload(result.payload.as_ref())
    }

    /// @ai:intent Extract answers from a bare payload
    /// @ai:post context and likert sorted by ascending question number
    /// @ai:effects log
    pub fn extract_payload(&self, payload: Option<&Value>) -> AnswerSheet {
        let mut sheet = AnswerSheet::default();

        let Some(Value::Object(answers)) = payload.and_then(|p| p.get("answers")) else {
            return sheet;
        };

        let mut numbered: Vec<(u32, &QuestionDef, &Value)> = Vec::with_capacity(answers.len());

        for (key, value) in answers {
            match self.question_number(key).and_then(find_question) {
                Some(def) => numbered.push((def.number, def, unwrap_answer(value))),
                None => {
                    tracing::warn!("Dropping answer for unknown question key '{}'", key);
                    sheet.dropped.push(key.clone());
                }
            }
        }

        numbered.sort_by_key(|(number, _, _)| *number);

        for (number, def, value) in numbered {
            let raw = raw_text(value);

            match def.kind {
                QuestionKind::Context { labels } => {
                    let label = labels
                        .iter()
                        .find(|(k, _)| *k == raw)
                        .map(|(_, label)| label.to_string())
                        .unwrap_or_else(|| unresolved(&raw));

                    sheet.context.push(ContextAnswer {
                        number,
                        question: def.text.to_string(),
                        raw,
                        label,
                    });
                }
                QuestionKind::Likert { polarity } => {
                    let label = likert_label(value)
                        .map(str::to_string)
                        .unwrap_or_else(|| unresolved(&raw));

                    sheet.likert.push(LikertAnswer {
                        number,
                        question: def.text.to_string(),
                        raw,
                        label,
                        polarity,
                    });
                }
            }
        }

        sheet
    }

    /// @ai:effects pure
    fn question_number(&self, key: &str) -> Option<u32> {
        self.question_key_regex
            .captures(key)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }
}

impl Default for AnswerExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn find_question(number: u32) -> Option<&'static QuestionDef> {
    QUESTIONS.iter().find(|q| q.number == number)
}

/// @ai:intent Unwrap the `{ "answer": v }` composite form
/// @ai:effects pure
fn unwrap_answer(value: &Value) -> &Value {
    static MISSING: Value = Value::Null;

    match value {
        Value::Object(fields) => fields.get("answer").unwrap_or(&MISSING),
        other => other,
    }
}

/// @ai:intent Canonical text of a raw answer, integral numbers without decimals
/// @ai:effects pure
fn raw_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Null => String::new(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

fn likert_label(value: &Value) -> Option<&'static str> {
    let score = number(value).filter(|f| f.fract() == 0.0)? as i64;
    LIKERT_SCALE
        .iter()
        .find(|(point, _)| *point == score)
        .map(|(_, label)| *label)
}

fn unresolved(raw: &str) -> String {
    format!("Valor: {}", raw)
}
