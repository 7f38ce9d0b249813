//! 基础设施层（Infrastructure）
//!
//! 持有外部数据源，只暴露"读取工作表"的能力。
//!
//! - `GoogleSheetSource`：共享试算表（Sheets API v4，带限流重试）
//! - `WorkbookSource`：本地工作簿
//! - `CsvDirSource`：本地 CSV 目录
//! - `ConfiguredSource`：按配置选择上述之一

pub mod csv_dir;
pub mod google_sheet;
pub mod sheet_source;
pub mod workbook;

pub use csv_dir::CsvDirSource;
pub use google_sheet::GoogleSheetSource;
pub use sheet_source::{parse_csv, SheetSource};
pub use workbook::WorkbookSource;

use crate::config::{Config, SourceKind};
use crate::error::{AppResult, ConfigError, SourceError};
use crate::models::RawSheet;

/// 按配置选择的数据源
pub enum ConfiguredSource {
    Google(GoogleSheetSource),
    Workbook(WorkbookSource),
    CsvDir(CsvDirSource),
}

impl ConfiguredSource {
    /// 根据配置创建数据源
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let source = match config.source_kind()? {
            SourceKind::GoogleSheet => {
                for (var_name, value) in [
                    ("SPREADSHEET_ID", &config.spreadsheet_id),
                    ("GOOGLE_API_KEY", &config.google_api_key),
                ] {
                    if value.trim().is_empty() {
                        return Err(ConfigError::EnvVarNotFound {
                            var_name: var_name.to_string(),
                        }
                        .into());
                    }
                }
                ConfiguredSource::Google(GoogleSheetSource::new(config)?)
            }
            SourceKind::Workbook => {
                ConfiguredSource::Workbook(WorkbookSource::new(&config.workbook_path))
            }
            SourceKind::CsvDir => ConfiguredSource::CsvDir(CsvDirSource::new(&config.csv_dir)),
        };
        Ok(source)
    }

    pub fn describe(&self) -> &'static str {
        match self {
            ConfiguredSource::Google(_) => "Google 试算表",
            ConfiguredSource::Workbook(_) => "本地工作簿",
            ConfiguredSource::CsvDir(_) => "CSV 目录",
        }
    }
}

impl SheetSource for ConfiguredSource {
    async fn read(&self, sheet_name: &str) -> Result<RawSheet, SourceError> {
        match self {
            ConfiguredSource::Google(source) => source.read(sheet_name).await,
            ConfiguredSource::Workbook(source) => source.read(sheet_name).await,
            ConfiguredSource::CsvDir(source) => source.read(sheet_name).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_google_source_requires_id_and_key() {
        let missing_key = Config {
            spreadsheet_id: "abc".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            ConfiguredSource::from_config(&missing_key),
            Err(AppError::Config(ConfigError::EnvVarNotFound { ref var_name }))
                if var_name == "GOOGLE_API_KEY"
        ));

        let complete = Config {
            google_api_key: "key".to_string(),
            ..missing_key
        };
        let source = ConfiguredSource::from_config(&complete).unwrap();
        assert_eq!(source.describe(), "Google 试算表");
    }
}
