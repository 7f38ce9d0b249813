use super::ReportRenderer;
use crate::error::{AppResult, OutputError};
use crate::models::StudentReport;
use serde_json::json;

/// JSON 渲染器
pub struct JsonRenderer;

impl ReportRenderer for JsonRenderer {
    fn render(&self, report: &StudentReport) -> AppResult<String> {
        serde_json::to_string_pretty(report).map_err(|e| OutputError::from(e).into())
    }

    fn render_roster(&self, subject: &str, names: &[String]) -> AppResult<String> {
        let value = json!({ "subject": subject, "students": names });
        serde_json::to_string_pretty(&value).map_err(|e| OutputError::from(e).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ErrorRecord, KnowledgeGroup, Subject, SubjectOutcome, SubjectReport};
    use serde_json::Value;

    #[test]
    fn test_render_report_shape() {
        let report = StudentReport::new(
            "Alice",
            vec![
                SubjectReport {
                    subject: Subject::English,
                    outcome: SubjectOutcome::Analyzed {
                        records: vec![ErrorRecord::new("2", "B", "Grammar")],
                        groups: vec![KnowledgeGroup {
                            knowledge_point: "Grammar".to_string(),
                            error_count: 1,
                            question_ids: vec!["2".to_string()],
                            sort_key: 2.0,
                            highlighted: true,
                        }],
                    },
                },
                SubjectReport {
                    subject: Subject::Math,
                    outcome: SubjectOutcome::StudentMissing,
                },
            ],
        );

        let text = JsonRenderer.render(&report).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["student"], "Alice");
        assert_eq!(value["subjects"][0]["status"], "analyzed");
        assert_eq!(value["subjects"][0]["subject"], "英文");
        assert_eq!(value["subjects"][0]["groups"][0]["error_count"], 1);
        assert_eq!(value["subjects"][1]["status"], "student_missing");
    }

    #[test]
    fn test_render_roster() {
        let text = JsonRenderer
            .render_roster("國文", &["王小明".to_string()])
            .unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["students"][0], "王小明");
    }
}
