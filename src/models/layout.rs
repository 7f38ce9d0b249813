//! 工作表版式
//!
//! 描述固定位置的表格结构：题号行、知识点行、学生数据起始行以及姓名列和作答起始列。
//! 版式变化只需修改 TOML 文件，不需要改代码。

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

/// 工作表版式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetLayout {
    /// 题号所在行
    pub question_id_row: usize,
    /// 知识点所在行
    pub knowledge_point_row: usize,
    /// 学生数据起始行
    pub student_start_row: usize,
    /// 姓名所在列
    pub name_column: usize,
    /// 作答起始列（题号、知识点也从这一列开始）
    pub answer_start_column: usize,
    /// 表示答对的标记
    pub correct_marker: String,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            question_id_row: 0,
            knowledge_point_row: 2,
            student_start_row: 5,
            name_column: 1,
            answer_start_column: 2,
            correct_marker: "-".to_string(),
        }
    }
}

impl SheetLayout {
    /// 工作表至少需要的行数
    pub fn min_rows(&self) -> usize {
        self.student_start_row + 1
    }

    /// 工作表至少需要的列数
    pub fn min_columns(&self) -> usize {
        self.answer_start_column + 1
    }

    /// 校验版式自身是否自洽
    pub fn validate(&self) -> Result<(), String> {
        if self.question_id_row >= self.student_start_row {
            return Err(format!(
                "题号行 {} 必须位于学生数据起始行 {} 之前",
                self.question_id_row, self.student_start_row
            ));
        }
        if self.knowledge_point_row >= self.student_start_row {
            return Err(format!(
                "知识点行 {} 必须位于学生数据起始行 {} 之前",
                self.knowledge_point_row, self.student_start_row
            ));
        }
        if self.name_column >= self.answer_start_column {
            return Err(format!(
                "姓名列 {} 必须位于作答起始列 {} 之前",
                self.name_column, self.answer_start_column
            ));
        }
        if self.correct_marker.trim().is_empty() {
            return Err("答对标记不能为空".to_string());
        }
        Ok(())
    }

    /// 从 TOML 字符串解析版式
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let layout: SheetLayout = toml::from_str(content).context("无法解析版式 TOML")?;
        layout.validate().map_err(anyhow::Error::msg)?;
        Ok(layout)
    }

    /// 从 TOML 文件加载版式
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("无法读取版式文件: {}", path.display()))?;

        let layout = Self::from_toml_str(&content)
            .with_context(|| format!("版式文件无效: {}", path.display()))?;

        tracing::info!("已加载版式文件: {}", path.display());
        Ok(layout)
    }
}
