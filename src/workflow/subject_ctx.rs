//! 科目分析上下文
//!
//! 封装"我正在分析哪个学生的哪一科"这一信息

use crate::models::Subject;
use std::fmt::Display;

/// 科目分析上下文
#[derive(Debug, Clone)]
pub struct SubjectCtx {
    /// 科目
    pub subject: Subject,

    /// 学生姓名
    pub student: String,

    /// 科目在本次分析中的序号（从1开始，仅用于日志显示）
    pub subject_index: usize,
}

impl SubjectCtx {
    pub fn new(subject: Subject, student: impl Into<String>, subject_index: usize) -> Self {
        Self {
            subject,
            student: student.into(),
            subject_index,
        }
    }

    pub fn sheet_name(&self) -> &'static str {
        self.subject.sheet_name()
    }
}

impl Display for SubjectCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[科目#{} {} 学生 {}]",
            self.subject_index, self.subject, self.student
        )
    }
}
