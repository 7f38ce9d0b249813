use super::ReportRenderer;
use crate::error::{AppResult, OutputError};
use crate::models::{ErrorRecord, KnowledgeGroup, StudentReport, SubjectOutcome};
use std::fmt::Write;

/// 纯文本渲染器
pub struct TextRenderer {
    /// 重点复习条目的前缀
    pub highlight_mark: String,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            highlight_mark: "★".to_string(),
        }
    }
}

impl TextRenderer {
    fn write_report(&self, out: &mut String, report: &StudentReport) -> std::fmt::Result {
        writeln!(out, "{}", "=".repeat(60))?;
        writeln!(out, "👤 学生：{}", report.student)?;
        writeln!(
            out,
            "🕒 {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(out, "{}", "=".repeat(60))?;

        for subject in &report.subjects {
            writeln!(out)?;
            writeln!(out, "📖 {}科 分析结果", subject.subject)?;
            writeln!(out, "{}", "─".repeat(60))?;

            match &subject.outcome {
                SubjectOutcome::Analyzed { records, groups } => {
                    self.write_groups(out, groups)?;
                    writeln!(out)?;
                    writeln!(out, "⚠️ 共发现 {} 题错题，详细列表如下：", records.len())?;
                    write_records(out, records)?;
                }
                SubjectOutcome::AllCorrect => {
                    writeln!(out, "🎉 太棒了！{}科全对，没有错题！", subject.subject)?;
                }
                SubjectOutcome::StudentMissing => {
                    writeln!(
                        out,
                        "在 {} 科找不到此学生的资料 (可能是缺考或名单不一致)。",
                        subject.subject
                    )?;
                }
                SubjectOutcome::Failed { message } => {
                    writeln!(out, "❌ 资料读取失败: {}", message)?;
                }
            }
        }

        Ok(())
    }

    fn write_groups(&self, out: &mut String, groups: &[KnowledgeGroup]) -> std::fmt::Result {
        writeln!(out, "📌 重点复习 (依错误次数排序)")?;
        if groups.is_empty() {
            writeln!(out, "  (没有达到门槛的知识点)")?;
            return Ok(());
        }

        let blank = " ".repeat(self.highlight_mark.chars().count());
        for group in groups {
            let mark = if group.highlighted {
                self.highlight_mark.as_str()
            } else {
                blank.as_str()
            };
            writeln!(
                out,
                "{} 【{}】 共 {} 題 (題號: {})",
                mark,
                group.knowledge_point,
                group.error_count,
                group.question_ids.join(", ")
            )?;
        }
        Ok(())
    }
}

fn write_records(out: &mut String, records: &[ErrorRecord]) -> std::fmt::Result {
    writeln!(out, "{:<6}\t{:<6}\t需加強觀念", "題號", "誤選")?;
    for record in records {
        writeln!(
            out,
            "{:<6}\t{:<6}\t{}",
            record.question_id, record.submitted_answer, record.knowledge_point
        )?;
    }
    Ok(())
}

impl ReportRenderer for TextRenderer {
    fn render(&self, report: &StudentReport) -> AppResult<String> {
        let mut out = String::new();
        self.write_report(&mut out, report)
            .map_err(OutputError::from)?;
        Ok(out)
    }

    fn render_roster(&self, subject: &str, names: &[String]) -> AppResult<String> {
        let mut out = String::new();
        let mut write = || -> std::fmt::Result {
            writeln!(out, "📋 学生名单 (来源: {}，共 {} 人)", subject, names.len())?;
            for (i, name) in names.iter().enumerate() {
                writeln!(out, "{:>3}. {}", i + 1, name)?;
            }
            Ok(())
        };
        write().map_err(OutputError::from)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Subject, SubjectReport};

    fn group(kp: &str, count: usize, ids: &[&str], highlighted: bool) -> KnowledgeGroup {
        KnowledgeGroup {
            knowledge_point: kp.to_string(),
            error_count: count,
            question_ids: ids.iter().map(|s| s.to_string()).collect(),
            sort_key: 0.0,
            highlighted,
        }
    }

    #[test]
    fn test_render_all_outcomes() {
        let report = StudentReport::new(
            "Alice",
            vec![
                SubjectReport {
                    subject: Subject::English,
                    outcome: SubjectOutcome::Analyzed {
                        records: vec![
                            ErrorRecord::new("2", "B", "Grammar"),
                            ErrorRecord::new("5", "C", "Grammar"),
                            ErrorRecord::new("7", "D", "Vocab"),
                        ],
                        groups: vec![
                            group("Grammar", 2, &["2", "5"], true),
                            group("Vocab", 1, &["7"], false),
                        ],
                    },
                },
                SubjectReport {
                    subject: Subject::Math,
                    outcome: SubjectOutcome::AllCorrect,
                },
                SubjectReport {
                    subject: Subject::Social,
                    outcome: SubjectOutcome::StudentMissing,
                },
                SubjectReport {
                    subject: Subject::Science,
                    outcome: SubjectOutcome::Failed {
                        message: "timeout".to_string(),
                    },
                },
            ],
        );

        let text = TextRenderer::default().render(&report).unwrap();
        assert!(text.contains("👤 学生：Alice"));
        assert!(text.contains("★ 【Grammar】 共 2 題 (題號: 2, 5)"));
        assert!(text.contains("  【Vocab】 共 1 題 (題號: 7)"));
        assert!(text.contains("共发现 3 题错题"));
        assert!(text.contains("數學科全对"));
        assert!(text.contains("在 社會 科找不到此学生"));
        assert!(text.contains("资料读取失败: timeout"));
        // Grammar 排在 Vocab 之前
        assert!(text.find("【Grammar】") < text.find("【Vocab】"));
    }

    #[test]
    fn test_render_roster() {
        let text = TextRenderer::default()
            .render_roster("國文", &["王小明".to_string(), "李大華".to_string()])
            .unwrap();
        assert!(text.contains("共 2 人"));
        assert!(text.contains("  2. 李大華"));
    }
}
