use crate::config::Config;
use crate::error::{AppResult, ConfigError, OutputError};
use crate::infrastructure::{ConfiguredSource, SheetSource};
use crate::models::{SheetLayout, StudentReport, Subject};
use crate::orchestrator::report_processor::process_student;
use crate::render::{renderer_for, ReportRenderer};
use crate::services::roster;
use crate::utils::logging;
use crate::workflow::SubjectFlow;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

/// 应用主结构
///
/// 持有数据源、版式和渲染器，负责把配置变成一次完整的分析。
pub struct App<S: SheetSource = ConfiguredSource> {
    config: Config,
    source: S,
    layout: SheetLayout,
    subjects: Vec<Subject>,
    renderer: Box<dyn ReportRenderer>,
}

impl App<ConfiguredSource> {
    /// 根据配置初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        let source = ConfiguredSource::from_config(&config).context("无法创建数据源")?;
        let layout = load_layout(&config).await?;
        let app = Self::with_source(config, source, layout)?;

        logging::log_startup(app.source.describe(), app.subjects.len());
        Ok(app)
    }
}

impl<S: SheetSource> App<S> {
    /// 使用指定数据源创建应用
    pub fn with_source(config: Config, source: S, layout: SheetLayout) -> AppResult<Self> {
        let subjects = config.subjects()?;
        let renderer = renderer_for(config.output_format()?);
        Ok(Self {
            config,
            source,
            layout,
            subjects,
            renderer,
        })
    }

    /// 运行应用主逻辑
    ///
    /// 设置了学生姓名时输出该学生的报告，否则输出学生名单。
    pub async fn run(&self) -> Result<String> {
        let output = match self.config.student_name.as_deref() {
            Some(student) => {
                let report = self.analyze(student).await;
                self.renderer.render(&report)?
            }
            None => {
                info!("💡 未设置 STUDENT_NAME，输出学生名单");
                let subject = self.config.roster_subject()?;
                let names = self.roster().await?;
                self.renderer.render_roster(subject.sheet_name(), &names)?
            }
        };

        if let Some(path) = &self.config.report_file {
            write_report_file(path, &output).await?;
            info!("\n报告已保存至: {}", path);
        }

        Ok(output)
    }

    /// 读取名单科目的学生名单
    pub async fn roster(&self) -> Result<Vec<String>> {
        let subject = self.config.roster_subject()?;
        let sheet = self
            .source
            .read(subject.sheet_name())
            .await
            .with_context(|| format!("无法读取「{}」工作表以建立名单", subject))?;

        let names = roster(&sheet, &self.layout);
        if names.is_empty() {
            warn!("⚠️ {} 工作表中没有学生资料", subject);
        }
        logging::log_roster_loaded(subject.sheet_name(), &names);
        Ok(names)
    }

    /// 分析单个学生的所有科目
    pub async fn analyze(&self, student: &str) -> StudentReport {
        let flow = SubjectFlow::new(&self.config, self.layout.clone());
        process_student(&self.source, &flow, &self.subjects, student).await
    }
}

/// 加载版式：设置了 LAYOUT_FILE 时读取文件，否则使用默认版式
async fn load_layout(config: &Config) -> Result<SheetLayout> {
    match &config.layout_file {
        Some(path) => SheetLayout::load(Path::new(path)).await.map_err(|e| {
            ConfigError::LayoutLoadFailed {
                path: path.clone(),
                reason: format!("{:#}", e),
            }
            .into()
        }),
        None => Ok(SheetLayout::default()),
    }
}

async fn write_report_file(path: &str, content: &str) -> AppResult<()> {
    tokio::fs::write(path, content)
        .await
        .map_err(|e| OutputError::WriteFailed {
            path: path.to_string(),
            source: e,
        })?;
    Ok(())
}
