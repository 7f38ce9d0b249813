//! 错题提取服务 - 业务能力层
//!
//! 只负责"从一张工作表中找出某个学生的错题"，不关心科目顺序和展示。

use crate::error::AnalysisError;
use crate::infrastructure::SheetSource;
use crate::models::{Cell, ErrorRecord, RawSheet, SheetLayout};
use tracing::debug;

/// 错题提取服务
pub struct Extractor {
    layout: SheetLayout,
}

impl Extractor {
    pub fn new(layout: SheetLayout) -> Self {
        Self { layout }
    }

    /// 读取工作表后提取错题
    ///
    /// 数据源失败时返回 `SourceUnavailable`，本层不重试。
    pub async fn fetch_and_extract<S: SheetSource>(
        &self,
        source: &S,
        sheet_name: &str,
        student_name: &str,
    ) -> Result<Vec<ErrorRecord>, AnalysisError> {
        let sheet = source
            .read(sheet_name)
            .await
            .map_err(|e| AnalysisError::SourceUnavailable {
                sheet: sheet_name.to_string(),
                source: e,
            })?;

        self.extract(&sheet, sheet_name, student_name)
    }

    /// 提取学生的错题
    ///
    /// # 参数
    /// - `sheet`: 原始工作表
    /// - `sheet_name`: 工作表名称（仅用于错误信息）
    /// - `student_name`: 学生姓名，与姓名列精确匹配
    ///
    /// # 返回
    /// 按题目从左到右顺序排列的错题
    pub fn extract(
        &self,
        sheet: &RawSheet,
        sheet_name: &str,
        student_name: &str,
    ) -> Result<Vec<ErrorRecord>, AnalysisError> {
        self.check_shape(sheet, sheet_name)?;

        let layout = &self.layout;
        let student_row = self
            .find_student_row(sheet, student_name)
            .ok_or_else(|| AnalysisError::StudentNotFound {
                student: student_name.to_string(),
                sheet: sheet_name.to_string(),
            })?;

        let question_ids = sheet.row_from(layout.question_id_row, layout.answer_start_column);
        let knowledge_points =
            sheet.row_from(layout.knowledge_point_row, layout.answer_start_column);
        let answers = sheet.row_from(student_row, layout.answer_start_column);

        let records: Vec<ErrorRecord> = answers
            .iter()
            .zip(knowledge_points)
            .zip(question_ids)
            .filter_map(|((answer, knowledge), question_id)| {
                self.wrong_answer(answer).map(|submitted| {
                    ErrorRecord::new(question_id.to_string(), submitted, knowledge.to_string())
                })
            })
            .collect();

        debug!(
            "工作表 {} 学生 {} (第 {} 行): {} 道错题",
            sheet_name,
            student_name,
            student_row + 1,
            records.len()
        );

        Ok(records)
    }

    /// 判断作答是否为错题，是则返回去除空白后的答案
    fn wrong_answer(&self, answer: &Cell) -> Option<String> {
        if answer.is_empty() {
            return None;
        }
        let text = answer.to_string();
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed == self.layout.correct_marker {
            return None;
        }
        Some(trimmed.to_string())
    }

    fn find_student_row(&self, sheet: &RawSheet, student_name: &str) -> Option<usize> {
        let name_column = self.layout.name_column;
        sheet
            .rows_from(self.layout.student_start_row)
            .find(|(_, row)| match row.get(name_column) {
                Some(cell) if !cell.is_empty() => cell.to_string() == student_name,
                _ => false,
            })
            .map(|(index, _)| index)
    }

    fn check_shape(&self, sheet: &RawSheet, sheet_name: &str) -> Result<(), AnalysisError> {
        let layout = &self.layout;
        if sheet.row_count() < layout.min_rows() {
            return Err(AnalysisError::malformed(
                sheet_name,
                format!(
                    "至少需要 {} 行，实际只有 {} 行",
                    layout.min_rows(),
                    sheet.row_count()
                ),
            ));
        }
        if sheet.column_count() < layout.min_columns() {
            return Err(AnalysisError::malformed(
                sheet_name,
                format!(
                    "至少需要 {} 列，实际只有 {} 列",
                    layout.min_columns(),
                    sheet.column_count()
                ),
            ));
        }
        Ok(())
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(SheetLayout::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_sheet() -> RawSheet {
        RawSheet::from_strings(vec![
            vec!["", "", "1", "2", "3"],
            vec!["", "", "", "", ""],
            vec!["", "", "Grammar", "Grammar", "Vocab"],
            vec!["", "", "", "", ""],
            vec!["", "", "", "", ""],
            vec!["1", "Alice", "-", "B", ""],
            vec!["2", "Bob", "C", " - ", "  A "],
        ])
    }

    #[test]
    fn test_extract_single_error() {
        let records = Extractor::default()
            .extract(&sample_sheet(), "英文", "Alice")
            .unwrap();
        assert_eq!(records, vec![ErrorRecord::new("2", "B", "Grammar")]);
    }

    #[test]
    fn test_extract_trims_and_keeps_column_order() {
        let records = Extractor::default()
            .extract(&sample_sheet(), "英文", "Bob")
            .unwrap();
        assert_eq!(
            records,
            vec![
                ErrorRecord::new("1", "C", "Grammar"),
                ErrorRecord::new("3", "A", "Vocab"),
            ]
        );
    }

    #[test]
    fn test_student_not_found() {
        let result = Extractor::default().extract(&sample_sheet(), "英文", "Carol");
        assert!(matches!(result, Err(AnalysisError::StudentNotFound { .. })));

        // 姓名需精确匹配
        let result = Extractor::default().extract(&sample_sheet(), "英文", "alice");
        assert!(matches!(result, Err(AnalysisError::StudentNotFound { .. })));
    }

    #[test]
    fn test_empty_name_never_matches() {
        let result = Extractor::default().extract(&sample_sheet(), "英文", "");
        assert!(matches!(result, Err(AnalysisError::StudentNotFound { .. })));
    }

    #[test]
    fn test_metadata_rows_are_not_students() {
        // 第 0 行的第 1 列不应被当作学生
        let mut rows = vec![vec!["", "題號", "1"], vec![], vec!["", "", "KP"], vec![], vec![]];
        rows.push(vec!["", "Dan", "X"]);
        let sheet = RawSheet::from_strings(rows);
        let result = Extractor::default().extract(&sheet, "數學", "題號");
        assert!(matches!(result, Err(AnalysisError::StudentNotFound { .. })));
    }

    #[test]
    fn test_malformed_sheet() {
        let short = RawSheet::from_strings(vec![vec!["", "", "1"]; 5]);
        let result = Extractor::default().extract(&short, "數學", "Alice");
        assert!(matches!(result, Err(AnalysisError::MalformedSheet { .. })));

        let narrow = RawSheet::from_strings(vec![vec!["", "Alice"]; 6]);
        let result = Extractor::default().extract(&narrow, "數學", "Alice");
        assert!(matches!(result, Err(AnalysisError::MalformedSheet { .. })));
    }

    #[test]
    fn test_numeric_cells() {
        let sheet = RawSheet::from_rows(vec![
            vec![Cell::Empty, Cell::Empty, Cell::Number(1.0), Cell::Number(2.0)],
            vec![],
            vec![Cell::Empty, Cell::Empty, "分數".into(), "方程式".into()],
            vec![],
            vec![],
            vec![Cell::Number(1.0), "小明".into(), Cell::Number(3.0), "-".into()],
        ]);
        let records = Extractor::default().extract(&sheet, "數學", "小明").unwrap();
        assert_eq!(records, vec![ErrorRecord::new("1", "3", "分數")]);
    }

    #[test]
    fn test_nan_answer_is_unanswered() {
        let sheet = RawSheet::from_rows(vec![
            vec![Cell::Empty, Cell::Empty, Cell::Number(1.0), Cell::Number(2.0)],
            vec![],
            vec![Cell::Empty, Cell::Empty, "分數".into(), "方程式".into()],
            vec![],
            vec![],
            vec![Cell::Empty, "小明".into(), Cell::Number(f64::NAN), "B".into()],
        ]);
        let records = Extractor::default().extract(&sheet, "數學", "小明").unwrap();
        assert_eq!(records, vec![ErrorRecord::new("2", "B", "方程式")]);
    }

    #[test]
    fn test_custom_marker() {
        let layout = SheetLayout {
            correct_marker: "O".to_string(),
            ..SheetLayout::default()
        };
        let records = Extractor::new(layout)
            .extract(&sample_sheet(), "英文", "Alice")
            .unwrap();
        // "-" 不再是答对标记
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.submitted_answer != "O"));
    }
}
