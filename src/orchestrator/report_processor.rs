//! 单个学生报告处理器 - 编排层
//!
//! ## 职责
//!
//! 1. **遍历科目**：按配置顺序逐科分析
//! 2. **流程调度**：创建并复用 `SubjectFlow`
//! 3. **失败隔离**：单科失败只记录在该科结果中
//! 4. **统计输出**：记录各状态的科目数量

use crate::infrastructure::SheetSource;
use crate::models::{StudentReport, Subject, SubjectOutcome};
use crate::utils::logging;
use crate::workflow::{SubjectCtx, SubjectFlow};

/// 科目处理统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SubjectStats {
    pub analyzed: usize,
    pub all_correct: usize,
    pub missing: usize,
    pub failed: usize,
}

impl SubjectStats {
    pub fn from_report(report: &StudentReport) -> Self {
        let mut stats = Self::default();
        for subject in &report.subjects {
            match subject.outcome {
                SubjectOutcome::Analyzed { .. } => stats.analyzed += 1,
                SubjectOutcome::AllCorrect => stats.all_correct += 1,
                SubjectOutcome::StudentMissing => stats.missing += 1,
                SubjectOutcome::Failed { .. } => stats.failed += 1,
            }
        }
        stats
    }

    pub fn total(&self) -> usize {
        self.analyzed + self.all_correct + self.missing + self.failed
    }
}

/// 分析单个学生的所有科目
///
/// # 参数
/// - `source`: 工作表数据源
/// - `flow`: 单科分析流程
/// - `subjects`: 要分析的科目（按显示顺序）
/// - `student`: 学生姓名
pub async fn process_student<S: SheetSource>(
    source: &S,
    flow: &SubjectFlow,
    subjects: &[Subject],
    student: &str,
) -> StudentReport {
    logging::log_student_start(student, subjects.len());

    let mut reports = Vec::with_capacity(subjects.len());
    for (index, subject) in subjects.iter().enumerate() {
        let ctx = SubjectCtx::new(*subject, student, index + 1);
        reports.push(flow.run(source, &ctx).await);
    }

    let report = StudentReport::new(student, reports);
    let stats = SubjectStats::from_report(&report);
    logging::log_student_complete(student, &stats, report.total_errors());

    report
}
