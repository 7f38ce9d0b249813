//! 本地工作簿数据源（xlsx / xls / ods）

use super::sheet_source::SheetSource;
use crate::error::SourceError;
use crate::models::{Cell, RawSheet};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::{Path, PathBuf};
use tracing::debug;

/// 本地工作簿数据源
///
/// 每次读取都重新打开文件，始终反映磁盘上的最新内容。
pub struct WorkbookSource {
    path: PathBuf,
}

impl WorkbookSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SheetSource for WorkbookSource {
    async fn read(&self, sheet_name: &str) -> Result<RawSheet, SourceError> {
        debug!("读取工作簿 {} 中的工作表 {}", self.path.display(), sheet_name);

        let path = self.path.clone();
        let sheet = sheet_name.to_string();
        let path_display = path.display().to_string();

        // calamine 是同步 API，放到阻塞线程池执行
        tokio::task::spawn_blocking(move || read_worksheet(&path, &sheet))
            .await
            .map_err(|e| SourceError::WorkbookFailed {
                path: path_display,
                message: e.to_string(),
            })?
    }
}

fn read_worksheet(path: &Path, sheet_name: &str) -> Result<RawSheet, SourceError> {
    let path_display = path.display().to_string();
    if !path.exists() {
        return Err(SourceError::io(
            path_display,
            std::io::Error::new(std::io::ErrorKind::NotFound, "文件不存在"),
        ));
    }

    let mut workbook = open_workbook_auto(path).map_err(|e| SourceError::WorkbookFailed {
        path: path_display.clone(),
        message: e.to_string(),
    })?;

    if !workbook.sheet_names().iter().any(|name| name == sheet_name) {
        return Err(SourceError::WorksheetNotFound {
            sheet: sheet_name.to_string(),
        });
    }

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| SourceError::WorkbookFailed {
            path: path_display,
            message: e.to_string(),
        })?;

    Ok(range_to_sheet(&range))
}

/// 转换为从 A1 开始的工作表
///
/// calamine 返回的区域从第一个非空单元格开始，这里按起始偏移补齐空行空列，
/// 保证版式中的绝对行列号仍然有效。
fn range_to_sheet(range: &Range<Data>) -> RawSheet {
    let (start_row, start_col) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); start_row];
    for row in range.rows() {
        let mut cells = vec![Cell::Empty; start_col];
        cells.extend(row.iter().map(data_to_cell));
        rows.push(cells);
    }

    RawSheet::from_rows(rows)
}

fn data_to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::text(s.as_str()),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::text(s.as_str()),
        Data::Error(e) => Cell::Text(format!("#ERR:{:?}", e)),
    }
}
