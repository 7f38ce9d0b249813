use serde::{Deserialize, Serialize};

/// 无法解析为数字的题号使用的排序键
pub const UNPARSEABLE_SORT_KEY: f64 = f64::MAX;

/// 单个学生的一道错题
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// 题号
    pub question_id: String,
    /// 误选答案（已去除首尾空白）
    pub submitted_answer: String,
    /// 知识点
    pub knowledge_point: String,
}

impl ErrorRecord {
    pub fn new(
        question_id: impl Into<String>,
        submitted_answer: impl Into<String>,
        knowledge_point: impl Into<String>,
    ) -> Self {
        Self {
            question_id: question_id.into(),
            submitted_answer: submitted_answer.into(),
            knowledge_point: knowledge_point.into(),
        }
    }
}

/// 同一知识点下的错题汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeGroup {
    pub knowledge_point: String,
    pub error_count: usize,
    /// 按数值排序的题号，无法解析的排在最后
    pub question_ids: Vec<String>,
    /// 组内最小的数值题号
    pub sort_key: f64,
    /// 是否属于重点复习（见 `mark_highlights`）
    #[serde(default)]
    pub highlighted: bool,
}

/// 解析题号为数值
pub fn parse_question_id(id: &str) -> Option<f64> {
    id.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
