//! CSV 目录数据源
//!
//! 每个工作表对应目录中的 `{工作表名称}.csv` 文件。

use super::sheet_source::{parse_csv, SheetSource};
use crate::error::SourceError;
use crate::models::RawSheet;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

/// CSV 目录数据源
pub struct CsvDirSource {
    dir: PathBuf,
}

impl CsvDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn sheet_path(&self, sheet_name: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", sheet_name))
    }
}

impl SheetSource for CsvDirSource {
    async fn read(&self, sheet_name: &str) -> Result<RawSheet, SourceError> {
        let path = self.sheet_path(sheet_name);
        debug!("读取 CSV 工作表: {}", path.display());

        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(SourceError::WorksheetNotFound {
                    sheet: sheet_name.to_string(),
                })
            }
            Err(e) => return Err(SourceError::io(path.display().to_string(), e)),
        };

        // Excel 导出的 CSV 常带 BOM
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
        parse_csv(sheet_name, content)
    }
}
