//! 学生名单服务 - 业务能力层

use crate::models::{RawSheet, SheetLayout};
use std::collections::HashSet;

/// 从工作表读取学生名单
///
/// 取姓名列从学生数据起始行开始的所有非空姓名，去重并保持首次出现顺序。
pub fn roster(sheet: &RawSheet, layout: &SheetLayout) -> Vec<String> {
    let mut seen = HashSet::new();
    sheet
        .rows_from(layout.student_start_row)
        .filter_map(|(_, row)| row.get(layout.name_column))
        .map(|cell| cell.to_string())
        .filter(|name| !name.trim().is_empty())
        .filter(|name| seen.insert(name.clone()))
        .collect()
}
