//! # Review Analysis
//!
//! 复习考错题知识点分析：从每科一张的答案工作表中找出学生的错题，
//! 按知识点分组计数并排出重点复习顺序。
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有外部数据源，只暴露 `read(工作表名称)` 能力
//! - 限流重试在这一层内部完成
//!
//! ### ② 业务能力层（Services）
//! - `Extractor` - 从工作表提取某个学生的错题
//! - `aggregate` - 按知识点分组、计数、排序
//! - `roster` - 读取学生名单
//!
//! ### ③ 流程层（Workflow）
//! - `SubjectCtx` - 上下文封装（科目 + 学生）
//! - `SubjectFlow` - 单科流程（读取 → 提取 → 汇总 → 结果状态）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/report_processor` - 逐科分析一个学生，隔离单科失败
//! - `orchestrator/app` - 配置、数据源与渲染器的装配
//!
//! ### ⑤ 展示层（Render）
//! - `render/` - 文本 / JSON 渲染器，只消费分析结果

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod render;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AnalysisError, AppError, AppResult, SourceError};
pub use infrastructure::{ConfiguredSource, SheetSource};
pub use models::{ErrorRecord, KnowledgeGroup, RawSheet, SheetLayout, Subject};
pub use orchestrator::App;
pub use services::{aggregate, Extractor};
pub use workflow::{SubjectCtx, SubjectFlow};
