use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 单科分析错误
    #[error("分析错误: {0}")]
    Analysis(#[from] AnalysisError),
    /// 数据源错误
    #[error("数据源错误: {0}")]
    Source(#[from] SourceError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 渲染/输出错误
    #[error("输出错误: {0}")]
    Output(#[from] OutputError),
}

/// 单科分析错误
///
/// 三种错误都只影响当前科目，其余科目照常分析。
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// 工作表中没有该学生
    #[error("在工作表 {sheet} 中找不到学生 {student}")]
    StudentNotFound { student: String, sheet: String },
    /// 数据源读取失败（重试已在数据源内部耗尽）
    #[error("工作表 {sheet} 读取失败: {source}")]
    SourceUnavailable {
        sheet: String,
        #[source]
        source: SourceError,
    },
    /// 行列结构不符合版式
    #[error("工作表 {sheet} 结构异常: {reason}")]
    MalformedSheet { sheet: String, reason: String },
}

/// 数据源错误
#[derive(Debug, Error)]
pub enum SourceError {
    /// 网络请求失败
    #[error("请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 接口地址无效
    #[error("接口地址无效 ({endpoint}): {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    /// 返回非成功状态码
    #[error("请求返回状态码 {status} ({endpoint})")]
    BadStatus { endpoint: String, status: u16 },
    /// 请求频率限制，重试次数已用尽
    #[error("请求频率限制 ({endpoint})，已重试 {attempts} 次")]
    RateLimited { endpoint: String, attempts: usize },
    /// 工作表不存在
    #[error("工作表不存在: {sheet}")]
    WorksheetNotFound { sheet: String },
    /// CSV 解析失败
    #[error("CSV 解析失败 ({sheet}): {source}")]
    CsvParseFailed {
        sheet: String,
        #[source]
        source: csv::Error,
    },
    /// 工作簿读取失败
    #[error("工作簿读取失败 ({path}): {message}")]
    WorkbookFailed { path: String, message: String },
    /// 文件读取失败
    #[error("读取文件失败 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 环境变量不存在
    #[error("环境变量 {var_name} 不存在")]
    EnvVarNotFound { var_name: String },
    /// 无法识别的科目
    #[error("无法识别的科目: {subject}")]
    UnknownSubject { subject: String },
    /// 无法识别的数据源类型
    #[error("无法识别的数据源类型: {value} (可选: gsheet / xlsx / csv)")]
    UnknownSourceKind { value: String },
    /// 无法识别的输出格式
    #[error("无法识别的输出格式: {value} (可选: text / json)")]
    UnknownOutputFormat { value: String },
    /// 版式文件加载失败
    #[error("版式文件加载失败 ({path}): {reason}")]
    LayoutLoadFailed { path: String, reason: String },
}

/// 报告输出错误
#[derive(Debug, Error)]
pub enum OutputError {
    /// JSON 序列化失败
    #[error("JSON 序列化失败: {0}")]
    Json(#[from] serde_json::Error),
    /// 文本格式化失败
    #[error("文本格式化失败: {0}")]
    Format(#[from] std::fmt::Error),
    /// 写入报告文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ========== 便捷构造函数 ==========

impl SourceError {
    /// 创建网络请求失败错误
    pub fn request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        SourceError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// 创建文件读取错误
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        SourceError::Io {
            path: path.into(),
            source,
        }
    }
}

impl AnalysisError {
    /// 创建结构异常错误
    pub fn malformed(sheet: impl Into<String>, reason: impl Into<String>) -> Self {
        AnalysisError::MalformedSheet {
            sheet: sheet.into(),
            reason: reason.into(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
