//! 原始工作表数据结构
//!
//! 工作表没有表头，所有元信息都按固定位置存放，位置由 `SheetLayout` 描述。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 单元格
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum Cell {
    /// 空单元格（缺失值）
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    /// 从文本构造，空字符串视为空单元格
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value)
        }
    }

    /// 空单元格与非有限数值（NaN、无穷）都视为缺失
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Number(n) => !n.is_finite(),
            _ => false,
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::text(value)
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::text(value)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Number(n) if !n.is_finite() => Ok(()),
            Cell::Text(s) => f.write_str(s),
            // 整数值不显示小数点，避免题号变成 "3.0"
            Cell::Number(n) if n.fract() == 0.0 => write!(f, "{:.0}", n),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// 原始工作表
///
/// 行列均从 0 开始计数。构造时会把长短不一的行补齐为矩形。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawSheet {
    rows: Vec<Vec<Cell>>,
    width: usize,
}

impl RawSheet {
    /// 从行数据构造，短行用空单元格补齐
    pub fn from_rows(mut rows: Vec<Vec<Cell>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, Cell::Empty);
        }
        Self { rows, width }
    }

    /// 从字符串表格构造（空字符串视为空单元格）
    pub fn from_strings<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_rows(
            rows.into_iter()
                .map(|row| row.into_iter().map(|s| Cell::text(s)).collect())
                .collect(),
        )
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.width
    }

    /// 获取一整行，越界返回 None
    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// 获取单元格，越界视为空
    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        const EMPTY: &Cell = &Cell::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(EMPTY)
    }

    /// 获取某一行从 `start` 列开始的切片
    pub fn row_from(&self, row: usize, start: usize) -> &[Cell] {
        self.row(row)
            .and_then(|r| r.get(start..))
            .unwrap_or(&[])
    }

    /// 遍历从 `start` 行开始的所有行（附带行号）
    pub fn rows_from(&self, start: usize) -> impl Iterator<Item = (usize, &[Cell])> {
        self.rows
            .iter()
            .enumerate()
            .skip(start)
            .map(|(i, r)| (i, r.as_slice()))
    }
}
