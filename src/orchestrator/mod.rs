//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `app` - 应用
//! - 根据配置创建数据源、版式和渲染器
//! - 决定输出名单还是学生报告
//! - 写出报告文件
//!
//! ### `report_processor` - 单个学生报告处理器
//! - 遍历科目列表，复用 SubjectFlow
//! - 输出单个学生的统计信息
//!
//! ## 层次关系
//!
//! ```text
//! app (配置 → 数据源 / 渲染器)
//!     ↓
//! report_processor (处理 Vec<Subject>)
//!     ↓
//! workflow::SubjectFlow (处理单个科目)
//!     ↓
//! services (能力层：extract / aggregate / roster)
//!     ↓
//! infrastructure (基础设施：SheetSource)
//! ```

pub mod app;
pub mod report_processor;

pub use app::App;
pub use report_processor::{process_student, SubjectStats};
