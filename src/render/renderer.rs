//! @ai:module:intent Compose the paginated General Report for one student
//! @ai:module:layer application
//! @ai:module:public_api ReportRenderer, ReportRendererTrait
//! @ai:module:stateless true

use crate::render::chart::{BarChart, PieChart};
use crate::render::document::{
    AnswerRow, Block, Document, LegendItem, Page, PageHeader, PageKind, TableBlock,
};
use crate::render::locale::{evaluation_count, format_value, long_date};
use crate::shaping::{AnswerExtractor, AnswerSheet, ShapedResult, Shaper, ShaperTrait, TestCategory};
use crate::store::{non_blank, Student, TestResult};
use chrono::NaiveDate;

pub const DEFAULT_TITLE: &str = "Reporte General";

/// @ai:intent Trait for turning a student's results into a document
pub trait ReportRendererTrait: Send + Sync {
    /// @ai:intent Render the full report; no I/O
    fn render(&self, student: &Student, results: &[TestResult], logo: Option<&str>) -> Document;
}

/// @ai:intent Lays out cover, per-test and summary pages
pub struct ReportRenderer {
    shaper: Shaper,
    answers: AnswerExtractor,
    title: String,
    institution: Option<String>,
    generated_on: NaiveDate,
}

/// Everything the per-test pages need about one result.
struct TestContext<'a> {
    result: &'a TestResult,
    category: TestCategory,
    header: PageHeader,
    shaped: ShapedResult,
}

impl ReportRenderer {
    /// @ai:intent Create a renderer stamped with the given generation date
    /// @ai:effects pure
    pub fn new(shaper: Shaper, generated_on: NaiveDate) -> Self {
        Self {
            shaper,
            answers: AnswerExtractor::new(),
            title: DEFAULT_TITLE.to_string(),
            institution: None,
            generated_on,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_institution(mut self, institution: Option<String>) -> Self {
        self.institution = institution.filter(|i| !i.trim().is_empty());
        self
    }

    /// @ai:intent Report title of a result: category name, else stored test name
    /// @ai:effects pure
    pub fn test_title(result: &TestResult) -> String {
        TestCategory::from_code(&result.test.code)
            .display_name()
            .map(str::to_string)
            .unwrap_or_else(|| result.test.name.clone())
    }

    fn header(&self, title: String, student: &Student) -> PageHeader {
        PageHeader {
            title,
            student_name: student.full_name(),
            generated_on: long_date(self.generated_on),
        }
    }

    /// @ai:intent Cover page with identity fields and generation date
    /// @ai:effects pure
    fn cover_page(&self, student: &Student, logo: Option<&str>) -> Page {
        let mut page = Page::new(PageKind::Cover, None);

        if let Some(reference) = logo.map(str::trim).filter(|r| !r.is_empty()) {
            page.push(Block::Image {
                reference: reference.to_string(),
                caption: "Logo".to_string(),
            });
        }

        page.push(Block::Title {
            text: self.title.clone(),
        });

        if let Some(institution) = &self.institution {
            page.push(Block::Paragraph {
                text: institution.clone(),
            });
        }

        if let Some(photo) = non_blank(&student.photo_ref) {
            page.push(Block::Image {
                reference: photo.to_string(),
                caption: "Fotografía".to_string(),
            });
        }

        let group = match student.group_name().trim() {
            "" => "Sin grupo".to_string(),
            name => name.to_string(),
        };

        page.with(field("Estudiante", student.full_name()))
            .with(field("Número de control", student.control_number.trim()))
            .with(field("Grupo", group))
            .with(field("Semestre", student.semester.to_string()))
            .with(field("Fecha de generación", long_date(self.generated_on)))
    }

    /// @ai:intent Pie chart page with legend and headline figures
    /// @ai:effects pure
    fn pie_page(&self, ctx: &TestContext<'_>) -> Page {
        let mut page = Page::new(PageKind::PieChart, Some(ctx.header.clone()));
        page.push(Block::Heading {
            text: "Distribución de resultados".to_string(),
        });

        if ctx.shaped.is_empty() {
            page.push(Block::Paragraph {
                text: "No hay datos registrados para esta evaluación.".to_string(),
            });
        }

        let chart = match ctx.category {
            TestCategory::PsychologicalAssistance => PieChart::from_scores(&ctx.shaped.legend),
            _ => PieChart::from_entries(&ctx.shaped.legend),
        };
        page.push(Block::Pie { chart });

        let items = ctx
            .shaped
            .legend
            .iter()
            .map(|entry| LegendItem {
                label: entry.name.clone(),
                value: legend_value(ctx.category, entry.value),
                color: entry.color,
            })
            .collect();
        page.push(Block::Legend { items });

        if let Some(total) = ctx.result.total_score {
            page.push(field("Puntaje total", format_value(total)));
        }
        if let Some(answered) = ctx.result.total_answered {
            page.push(field("Preguntas respondidas", answered.to_string()));
        }
        if let Some(style) = &ctx.shaped.dominant_style {
            page.push(field("Estilo dominante", style.clone()));
        }
        if let Some(level) = &ctx.shaped.level {
            page.push(field("Nivel", level.clone()));
        }

        page
    }

    /// @ai:intent Bar chart and score table, plus answers for assistance tests
    /// @ai:effects pure
    fn bar_page(&self, ctx: &TestContext<'_>) -> Page {
        let mut page = Page::new(PageKind::BarChart, Some(ctx.header.clone()));
        page.push(Block::Heading {
            text: "Puntajes por dimensión".to_string(),
        });
        page.push(Block::Bars {
            chart: BarChart::from_entries(&ctx.shaped.table),
        });
        page.push(Block::Table {
            table: score_table(ctx),
        });

        if ctx.category == TestCategory::PsychologicalAssistance {
            let sheet = self.answers.extract(ctx.result);
            push_answers(&mut page, &sheet);
        }

        page
    }

    /// @ai:intent Recommendation and fun fact, only the non-blank ones
    /// @ai:effects pure
    fn narrative_page(&self, ctx: &TestContext<'_>) -> Page {
        let mut page = Page::new(PageKind::Narrative, Some(ctx.header.clone()));

        for (heading, text) in [
            ("Recomendaciones", non_blank(&ctx.result.recommendation)),
            ("Dato curioso", non_blank(&ctx.result.fun_fact)),
        ] {
            if let Some(text) = text {
                page.push(Block::Heading {
                    text: heading.to_string(),
                });
                page.push(Block::Paragraph {
                    text: text.to_string(),
                });
            }
        }

        page
    }

    /// @ai:intent Summary of all completed tests with a closing sentence
    /// @ai:pre results is non-empty
    /// @ai:effects pure
    fn summary_page(&self, student: &Student, results: &[TestResult]) -> Page {
        let header = self.header("Resumen".to_string(), student);
        let rows = results
            .iter()
            .map(|r| vec![Self::test_title(r), long_date(r.completed_at)])
            .collect();

        Page::new(PageKind::Summary, Some(header))
            .with(Block::Heading {
                text: "Evaluaciones completadas".to_string(),
            })
            .with(Block::Table {
                table: TableBlock {
                    columns: vec!["Evaluación".to_string(), "Fecha de aplicación".to_string()],
                    rows,
                },
            })
            .with(Block::Paragraph {
                text: format!(
                    "{} completó {} como parte de su seguimiento de tutoría. \
                     Este reporte fue generado el {}.",
                    student.full_name(),
                    evaluation_count(results.len()),
                    long_date(self.generated_on)
                ),
            })
    }
}

impl ReportRendererTrait for ReportRenderer {
    /// @ai:post pages = 1 + Σ(2 or 3 per result) + (1 if results non-empty)
    /// @ai:effects pure
    fn render(&self, student: &Student, results: &[TestResult], logo: Option<&str>) -> Document {
        let mut pages = vec![self.cover_page(student, logo)];

        for result in results {
            let category = TestCategory::from_code(&result.test.code);
            let ctx = TestContext {
                result,
                category,
                header: self.header(Self::test_title(result), student),
                shaped: self.shaper.shape(result, category),
            };

            pages.push(self.pie_page(&ctx));
            pages.push(self.bar_page(&ctx));

            if result.has_narrative() {
                pages.push(self.narrative_page(&ctx));
            }
        }

        if !results.is_empty() {
            pages.push(self.summary_page(student, results));
        }

        tracing::debug!(
            "Rendered {} pages for student {}",
            pages.len(),
            student.control_number
        );

        Document {
            title: self.title.clone(),
            control_number: student.control_number.trim().to_string(),
            pages,
        }
    }
}

fn field(label: &str, value: impl Into<String>) -> Block {
    Block::Field {
        label: label.to_string(),
        value: value.into(),
    }
}

/// @ai:intent Legend label: percentages for share categories, raw scores otherwise
/// @ai:effects pure
fn legend_value(category: TestCategory, value: f64) -> String {
    match category {
        TestCategory::PsychologicalAssistance => format_value(value),
        _ => format!("{}%", format_value(value)),
    }
}

fn score_table(ctx: &TestContext<'_>) -> TableBlock {
    if ctx.category == TestCategory::PsychologicalAssistance {
        return TableBlock {
            columns: vec!["Categoría".to_string(), "Puntaje".to_string()],
            rows: ctx
                .shaped
                .table
                .iter()
                .map(|e| vec![e.name.clone(), format_value(e.value)])
                .collect(),
        };
    }

    let first_column = match ctx.category {
        TestCategory::LearningStyles => "Estilo",
        _ => "Dimensión",
    };

    TableBlock {
        columns: vec![
            first_column.to_string(),
            "Puntaje".to_string(),
            "Porcentaje".to_string(),
        ],
        rows: ctx
            .shaped
            .table
            .iter()
            .zip(&ctx.shaped.legend)
            .map(|(row, legend)| {
                vec![
                    row.name.clone(),
                    format_value(row.value),
                    legend_value(ctx.category, legend.value),
                ]
            })
            .collect(),
    }
}

fn push_answers(page: &mut Page, sheet: &AnswerSheet) {
    if !sheet.context.is_empty() {
        page.push(Block::Answers {
            title: "Preguntas de contexto".to_string(),
            rows: sheet
                .context
                .iter()
                .map(|a| AnswerRow {
                    number: a.number,
                    question: a.question.clone(),
                    answer: a.label.clone(),
                    polarity: None,
                })
                .collect(),
        });
    }

    if !sheet.likert.is_empty() {
        page.push(Block::Answers {
            title: "Escala de frecuencia".to_string(),
            rows: sheet
                .likert
                .iter()
                .map(|a| AnswerRow {
                    number: a.number,
                    question: a.question.clone(),
                    answer: a.label.clone(),
                    polarity: Some(a.polarity),
                })
                .collect(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shaping::Polarity;
    use crate::store::{GroupRef, TestRef};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn generated_on() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn renderer() -> ReportRenderer {
        ReportRenderer::new(Shaper::default(), generated_on())
    }

    fn student() -> Student {
        Student {
            id: 9,
            control_number: "21460999".to_string(),
            name: "María".to_string(),
            first_surname: " Gómez".to_string(),
            second_surname: Some("Ruiz ".to_string()),
            group: Some(GroupRef {
                id: 4,
                name: "3A".to_string(),
            }),
            semester: 3,
            photo_ref: None,
        }
    }

    fn result(code: &str, payload: Value) -> TestResult {
        TestResult {
            test: TestRef {
                code: code.to_string(),
                name: "Prueba almacenada".to_string(),
            },
            student_id: 9,
            completed_at: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            total_score: Some(10.0),
            payload: Some(payload),
            recommendation: None,
            fun_fact: None,
            total_answered: Some(10),
        }
    }

    fn fields(page: &Page) -> Vec<(String, String)> {
        page.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Field { label, value } => Some((label.clone(), value.clone())),
                _ => None,
            })
            .collect()
    }

    fn pie(page: &Page) -> &PieChart {
        page.blocks
            .iter()
            .find_map(|b| match b {
                Block::Pie { chart } => Some(chart),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_no_results_renders_only_cover() {
        let doc = renderer().render(&student(), &[], None);
        assert_eq!(doc.page_kinds(), vec![PageKind::Cover]);
        assert_eq!(doc.filename("svg"), "GeneralReport_21460999.svg");
    }

    #[test]
    fn test_page_sequence_with_optional_narrative() {
        let mut with_narrative = result("soft_skills", json!({"liderazgo": 3}));
        with_narrative.fun_fact = Some("Los líderes escuchan más.".to_string());
        let plain = result("learning_styles", json!({"visual": 3}));

        let doc = renderer().render(&student(), &[with_narrative, plain], Some("logo.png"));
        assert_eq!(
            doc.page_kinds(),
            vec![
                PageKind::Cover,
                PageKind::PieChart,
                PageKind::BarChart,
                PageKind::Narrative,
                PageKind::PieChart,
                PageKind::BarChart,
                PageKind::Summary,
            ]
        );
    }

    #[test]
    fn test_cover_fields() {
        let doc = renderer().render(&student(), &[], Some("logo.png"));
        let cover = &doc.pages[0];

        assert_eq!(
            cover.blocks[0],
            Block::Image {
                reference: "logo.png".to_string(),
                caption: "Logo".to_string()
            }
        );
        assert_eq!(
            fields(cover),
            vec![
                ("Estudiante".to_string(), "María Gómez Ruiz".to_string()),
                ("Número de control".to_string(), "21460999".to_string()),
                ("Grupo".to_string(), "3A".to_string()),
                ("Semestre".to_string(), "3".to_string()),
                ("Fecha de generación".to_string(), "18 de octubre de 2026".to_string()),
            ]
        );
    }

    #[test]
    fn test_header_uses_category_name_then_stored_name() {
        let doc = renderer().render(
            &student(),
            &[
                result("emotional_intelligence", json!({"empatia": 8})),
                result("career_interest", json!({"ciencia": 2})),
            ],
            None,
        );

        let first = doc.pages[1].header.as_ref().unwrap();
        assert_eq!(first.title, "Inteligencia Emocional");
        assert_eq!(first.student_name, "María Gómez Ruiz");
        assert_eq!(first.generated_on, "18 de octubre de 2026");
        assert_eq!(doc.pages[3].header.as_ref().unwrap().title, "Prueba almacenada");
    }

    #[test]
    fn test_learning_style_pie_follows_stored_percentages() {
        let payload = json!({
            "visual": 6,
            "auditivo": 2,
            "percentages": {"visual": 50, "auditivo": 20}
        });
        let doc = renderer().render(&student(), &[result("learning_styles", payload)], None);

        let sweeps: Vec<f64> = pie(&doc.pages[1]).sectors.iter().map(|s| s.sweep_deg).collect();
        assert_eq!(sweeps, vec![180.0, 72.0]);
    }

    #[test]
    fn test_assistance_pie_spans_raw_score_shares() {
        let payload = json!({"ansiedad": 6, "depresion": 2});
        let doc = renderer().render(
            &student(),
            &[result("psychological_assistance", payload)],
            None,
        );

        let sweeps: Vec<f64> = pie(&doc.pages[1]).sectors.iter().map(|s| s.sweep_deg).collect();
        assert_eq!(sweeps, vec![270.0, 90.0]);
    }

    #[test]
    fn test_zero_assistance_scores_render_empty_pie_on_full_page() {
        let payload = json!({"ansiedad": 0, "depresion": 0, "estres": 0});
        let doc = renderer().render(
            &student(),
            &[result("psychological_assistance", payload)],
            None,
        );

        let pie_page = &doc.pages[1];
        assert!(pie_page.header.is_some());
        assert!(pie(pie_page).is_empty());
        let legend = pie_page
            .blocks
            .iter()
            .find_map(|b| match b {
                Block::Legend { items } => Some(items.len()),
                _ => None,
            })
            .unwrap();
        assert_eq!(legend, 3);

        let table = doc.pages[2]
            .blocks
            .iter()
            .find_map(|b| match b {
                Block::Table { table } => Some(table.rows.len()),
                _ => None,
            })
            .unwrap();
        assert_eq!(table, 3);
    }

    #[test]
    fn test_assistance_bar_page_lists_answers() {
        let payload = json!({
            "ansiedad": 6,
            "answers": {"question_7": 3, "question_1": {"answer": 1}}
        });
        let doc = renderer().render(
            &student(),
            &[result("psychological_assistance", payload)],
            None,
        );

        let answers: Vec<&Vec<AnswerRow>> = doc.pages[2]
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::Answers { rows, .. } => Some(rows),
                _ => None,
            })
            .collect();

        assert_eq!(answers.len(), 2);
        assert_eq!(answers[0][0].answer, "Con mis padres");
        assert_eq!(answers[1][0].answer, "A veces");
        assert_eq!(answers[1][0].polarity, Some(Polarity::Positive));
    }

    #[test]
    fn test_pie_page_headline_fields() {
        let payload = json!({
            "visual": 6,
            "auditivo": 4,
            "percentages": {"visual": 60, "auditivo": 40},
            "dominant_style": "visual"
        });
        let doc = renderer().render(&student(), &[result("learning_styles", payload)], None);

        assert_eq!(
            fields(&doc.pages[1]),
            vec![
                ("Puntaje total".to_string(), "10".to_string()),
                ("Preguntas respondidas".to_string(), "10".to_string()),
                ("Estilo dominante".to_string(), "Visual".to_string()),
            ]
        );
        assert_eq!(pie(&doc.pages[1]).sectors.len(), 2);
    }

    #[test]
    fn test_summary_pluralizes_evaluations() {
        let one = renderer().render(&student(), &[result("soft_skills", json!({}))], None);
        let two = renderer().render(
            &student(),
            &[
                result("soft_skills", json!({})),
                result("learning_styles", json!({})),
            ],
            None,
        );

        let closing = |doc: &Document| match doc.pages.last().unwrap().blocks.last().unwrap() {
            Block::Paragraph { text } => text.clone(),
            other => panic!("unexpected block {:?}", other),
        };

        assert!(closing(&one).contains("completó 1 evaluación como"));
        assert!(closing(&two).contains("completó 2 evaluaciones como"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let results = vec![result("soft_skills", json!({"liderazgo": 3, "creatividad": 1}))];
        assert_eq!(
            renderer().render(&student(), &results, None),
            renderer().render(&student(), &results, None)
        );
    }
}
