use super::record::{ErrorRecord, KnowledgeGroup};
use super::subject::Subject;
use chrono::{DateTime, Local};
use serde::Serialize;

/// 单科分析结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubjectOutcome {
    /// 有错题
    Analyzed {
        /// 原始错题（按题目顺序）
        records: Vec<ErrorRecord>,
        /// 按错误次数排序的知识点
        groups: Vec<KnowledgeGroup>,
    },
    /// 全对
    AllCorrect,
    /// 该科找不到学生（缺考或名单不一致）
    StudentMissing,
    /// 读取或解析失败
    Failed { message: String },
}

/// 单科报告
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectReport {
    pub subject: Subject,
    #[serde(flatten)]
    pub outcome: SubjectOutcome,
}

/// 单个学生的完整报告
#[derive(Debug, Clone, Serialize)]
pub struct StudentReport {
    pub student: String,
    pub generated_at: DateTime<Local>,
    pub subjects: Vec<SubjectReport>,
}

impl StudentReport {
    pub fn new(student: impl Into<String>, subjects: Vec<SubjectReport>) -> Self {
        Self {
            student: student.into(),
            generated_at: Local::now(),
            subjects,
        }
    }

    /// 所有科目的错题总数
    pub fn total_errors(&self) -> usize {
        self.subjects
            .iter()
            .map(|s| match &s.outcome {
                SubjectOutcome::Analyzed { records, .. } => records.len(),
                _ => 0,
            })
            .sum()
    }
}
