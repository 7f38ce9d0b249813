use crate::error::ConfigError;
use crate::models::Subject;

/// 数据源类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// 共享的 Google 试算表
    GoogleSheet,
    /// 本地工作簿
    Workbook,
    /// 本地 CSV 目录
    CsvDir,
}

/// 报告输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 数据源类型（gsheet / xlsx / csv）
    pub sheet_source: String,
    /// Google 试算表 ID
    pub spreadsheet_id: String,
    /// Google Sheets API key（试算表需对持有链接者公开）
    pub google_api_key: String,
    /// 本地工作簿路径
    pub workbook_path: String,
    /// 本地 CSV 目录
    pub csv_dir: String,
    /// 要分析的科目（逗号分隔）
    pub subjects: String,
    /// 用于建立学生名单的科目
    pub roster_subject: String,
    /// 要分析的学生，未设置时只输出名单
    pub student_name: Option<String>,
    /// 知识点至少出现几次才列出
    pub min_count: usize,
    /// 重点复习取前几名错误次数
    pub highlight_ranks: usize,
    /// 版式文件（TOML）
    pub layout_file: Option<String>,
    /// 输出格式（text / json）
    pub output_format: String,
    /// 报告同时写入的文件
    pub report_file: Option<String>,
    // --- 数据源重试配置 ---
    pub max_retries: usize,
    pub retry_base_delay_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sheet_source: "gsheet".to_string(),
            spreadsheet_id: String::new(),
            google_api_key: String::new(),
            workbook_path: "review.xlsx".to_string(),
            csv_dir: "sheets".to_string(),
            subjects: Subject::ALL
                .iter()
                .map(|s| s.sheet_name())
                .collect::<Vec<_>>()
                .join(","),
            roster_subject: Subject::Chinese.sheet_name().to_string(),
            student_name: None,
            min_count: 1,
            highlight_ranks: 2,
            layout_file: None,
            output_format: "text".to_string(),
            report_file: None,
            max_retries: 5,
            retry_base_delay_ms: 1000,
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            sheet_source: std::env::var("SHEET_SOURCE").unwrap_or(default.sheet_source),
            spreadsheet_id: std::env::var("SPREADSHEET_ID").unwrap_or(default.spreadsheet_id),
            google_api_key: std::env::var("GOOGLE_API_KEY").unwrap_or(default.google_api_key),
            workbook_path: std::env::var("WORKBOOK_PATH").unwrap_or(default.workbook_path),
            csv_dir: std::env::var("CSV_DIR").unwrap_or(default.csv_dir),
            subjects: std::env::var("SUBJECTS").unwrap_or(default.subjects),
            roster_subject: std::env::var("ROSTER_SUBJECT").unwrap_or(default.roster_subject),
            student_name: non_empty_var("STUDENT_NAME"),
            min_count: std::env::var("MIN_COUNT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.min_count),
            highlight_ranks: std::env::var("HIGHLIGHT_RANKS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.highlight_ranks),
            layout_file: non_empty_var("LAYOUT_FILE"),
            output_format: std::env::var("OUTPUT_FORMAT").unwrap_or(default.output_format),
            report_file: non_empty_var("REPORT_FILE"),
            max_retries: std::env::var("MAX_RETRIES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_retries),
            retry_base_delay_ms: std::env::var("RETRY_BASE_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.retry_base_delay_ms),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
        }
    }

    /// 解析数据源类型
    pub fn source_kind(&self) -> Result<SourceKind, ConfigError> {
        match self.sheet_source.trim().to_lowercase().as_str() {
            "gsheet" | "gsheets" | "google" => Ok(SourceKind::GoogleSheet),
            "xlsx" | "xls" | "ods" | "workbook" => Ok(SourceKind::Workbook),
            "csv" => Ok(SourceKind::CsvDir),
            _ => Err(ConfigError::UnknownSourceKind {
                value: self.sheet_source.clone(),
            }),
        }
    }

    /// 解析输出格式
    pub fn output_format(&self) -> Result<OutputFormat, ConfigError> {
        match self.output_format.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::UnknownOutputFormat {
                value: self.output_format.clone(),
            }),
        }
    }

    /// 解析科目列表（保持配置顺序，去重）
    pub fn subjects(&self) -> Result<Vec<Subject>, ConfigError> {
        let mut subjects = Vec::new();
        for name in self.subjects.split([',', '，']).map(str::trim).filter(|s| !s.is_empty()) {
            let subject = Subject::find(name).ok_or_else(|| ConfigError::UnknownSubject {
                subject: name.to_string(),
            })?;
            if !subjects.contains(&subject) {
                subjects.push(subject);
            }
        }
        Ok(subjects)
    }

    /// 解析名单科目
    pub fn roster_subject(&self) -> Result<Subject, ConfigError> {
        Subject::find(&self.roster_subject).ok_or_else(|| ConfigError::UnknownSubject {
            subject: self.roster_subject.clone(),
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
