/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use crate::orchestrator::report_processor::SubjectStats;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 日志写到 stderr，stdout 只输出报告。级别由 `RUST_LOG` 控制，默认 info。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // 重复初始化（例如测试中）时忽略错误
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `source`: 数据源描述
/// - `subject_count`: 科目数量
pub fn log_startup(source: &str, subject_count: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 错题知识点分析");
    info!("📂 数据源: {}", source);
    info!("📚 科目数: {}", subject_count);
    info!("{}", "=".repeat(60));
}

/// 记录名单加载信息
pub fn log_roster_loaded(subject: &str, names: &[String]) {
    info!("✓ 从 {} 工作表读取到 {} 名学生", subject, names.len());
    info!("📋 {}", truncate_text(&names.join("、"), 40));
}

/// 记录学生分析开始
pub fn log_student_start(student: &str, subject_count: usize) {
    info!("\n{}", "─".repeat(60));
    info!("👤 学生: {} | 共 {} 科", student, subject_count);
    info!("{}", "─".repeat(60));
}

/// 记录学生分析完成
///
/// # 参数
/// - `student`: 学生姓名
/// - `stats`: 各状态科目数量
/// - `total_errors`: 错题总数
pub fn log_student_complete(student: &str, stats: &SubjectStats, total_errors: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📊 {} 分析完成统计", student);
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 有错题: {}/{}", stats.analyzed, stats.total());
    info!("🎉 全对: {}", stats.all_correct);
    info!("⚠️ 找不到学生: {}", stats.missing);
    info!("❌ 失败: {}", stats.failed);
    info!("📝 错题总数: {}", total_errors);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
