//! 展示层（Render）
//!
//! 只消费分析结果，不参与计算。新增输出格式时实现 `ReportRenderer` 即可。

pub mod json;
pub mod text;

pub use json::JsonRenderer;
pub use text::TextRenderer;

use crate::config::OutputFormat;
use crate::error::AppResult;
use crate::models::StudentReport;

/// 报告渲染器
pub trait ReportRenderer {
    fn render(&self, report: &StudentReport) -> AppResult<String>;

    /// 渲染学生名单
    fn render_roster(&self, subject: &str, names: &[String]) -> AppResult<String>;
}

/// 按输出格式创建渲染器
pub fn renderer_for(format: OutputFormat) -> Box<dyn ReportRenderer> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer::default()),
        OutputFormat::Json => Box::new(JsonRenderer),
    }
}
