//! 单科分析流程 - 流程层
//!
//! 核心职责：定义"一科"的完整分析流程
//!
//! 流程顺序：
//! 1. 读取工作表 → 提取错题
//! 2. 按知识点汇总 → 标记重点复习
//! 3. 把错误转换为该科的结果状态，不向上传播

use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::AnalysisError;
use crate::infrastructure::SheetSource;
use crate::models::{SheetLayout, SubjectOutcome, SubjectReport};
use crate::services::{aggregate, mark_highlights, Extractor};
use crate::workflow::subject_ctx::SubjectCtx;

/// 单科分析流程
///
/// - 编排提取与汇总
/// - 不持有数据源，只借用
/// - 单科失败不影响其他科目
pub struct SubjectFlow {
    extractor: Extractor,
    min_count: usize,
    highlight_ranks: usize,
}

impl SubjectFlow {
    pub fn new(config: &Config, layout: SheetLayout) -> Self {
        Self {
            extractor: Extractor::new(layout),
            min_count: config.min_count.max(1),
            highlight_ranks: config.highlight_ranks,
        }
    }

    pub fn with_thresholds(layout: SheetLayout, min_count: usize, highlight_ranks: usize) -> Self {
        Self {
            extractor: Extractor::new(layout),
            min_count: min_count.max(1),
            highlight_ranks,
        }
    }

    pub async fn run<S: SheetSource>(&self, source: &S, ctx: &SubjectCtx) -> SubjectReport {
        info!("{} 📖 开始分析", ctx);

        let outcome = match self
            .extractor
            .fetch_and_extract(source, ctx.sheet_name(), &ctx.student)
            .await
        {
            Ok(records) if records.is_empty() => {
                info!("{} 🎉 全对，没有错题", ctx);
                SubjectOutcome::AllCorrect
            }
            Ok(records) => {
                let mut groups = aggregate(&records, self.min_count);
                mark_highlights(&mut groups, self.highlight_ranks);
                info!(
                    "{} ✓ 共 {} 道错题，涉及 {} 个知识点",
                    ctx,
                    records.len(),
                    groups.len()
                );
                SubjectOutcome::Analyzed { records, groups }
            }
            Err(AnalysisError::StudentNotFound { .. }) => {
                warn!("{} ⚠️ 找不到该学生 (可能是缺考或名单不一致)", ctx);
                SubjectOutcome::StudentMissing
            }
            Err(e) => {
                error!("{} ❌ 分析失败: {}", ctx, e);
                SubjectOutcome::Failed {
                    message: e.to_string(),
                }
            }
        };

        SubjectReport {
            subject: ctx.subject,
            outcome,
        }
    }
}
