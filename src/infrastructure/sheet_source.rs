//! 工作表数据源 - 基础设施层
//!
//! 只暴露"按名称读取一张工作表"的能力，不认识学生、科目或知识点。

use crate::error::SourceError;
use crate::models::{Cell, RawSheet};
use std::future::Future;

/// 工作表数据源
///
/// 重试、限流处理和认证都由实现方负责，调用方只看到最终结果。
pub trait SheetSource {
    /// 读取指定名称的工作表
    fn read(&self, sheet_name: &str) -> impl Future<Output = Result<RawSheet, SourceError>> + Send;
}

/// 解析无表头的 CSV 文本
///
/// 行长度可以不一致，空字段视为空单元格。
pub fn parse_csv(sheet_name: &str, content: &str) -> Result<RawSheet, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| SourceError::CsvParseFailed {
            sheet: sheet_name.to_string(),
            source: e,
        })?;
        rows.push(record.iter().map(Cell::text).collect());
    }

    Ok(RawSheet::from_rows(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_ragged() {
        let sheet = parse_csv("國文", "a,b,c\n,,x\nonly\n").unwrap();
        assert_eq!(sheet.row_count(), 3);
        assert_eq!(sheet.column_count(), 3);
        assert_eq!(sheet.cell(1, 0), &Cell::Empty);
        assert_eq!(sheet.cell(1, 2), &Cell::Text("x".to_string()));
        assert_eq!(sheet.cell(2, 1), &Cell::Empty);
    }

    #[test]
    fn test_parse_csv_quoted_fields() {
        let sheet = parse_csv("英文", "\"1\",\"Grammar, tense\"\n").unwrap();
        assert_eq!(sheet.cell(0, 1).to_string(), "Grammar, tense");
    }
}
