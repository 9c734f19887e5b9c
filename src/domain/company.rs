// ==========================================
// GCC 企业数据导入工具 - 企业数据领域模型
// ==========================================
// 用途: 源文件行（解析层产出）与目标记录（转换层产出）
// 对齐: gcc_companies 表
// ==========================================

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 源文件行: 列名 → 原始值（字符串/数值/布尔/Null）
///
/// 依赖 serde_json 的 preserve_order，列顺序与文件一致。
pub type SourceRow = Map<String, Value>;

/// 目标记录: 目标字段名 → 转换后的值（字符串/整数/Null）
pub type DestinationRecord = Map<String, Value>;

static ABSENT: Value = Value::Null;

// ==========================================
// SourceTable - 行式内存表
// ==========================================
// 用途: 解析层输出,转换层输入
// 红线: 行顺序与列顺序均保持源文件顺序
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceTable {
    columns: Vec<String>, // 列名（首次出现顺序）
    rows: Vec<SourceRow>, // 数据行
}

impl SourceTable {
    /// 以给定表头创建空表（重复表头只保留第一个）
    pub fn with_columns(columns: Vec<String>) -> Self {
        let mut table = Self::default();
        for column in columns {
            if !table.has_column(&column) {
                table.columns.push(column);
            }
        }
        table
    }

    /// 追加一行；行内出现的新列名按出现顺序补入表头
    pub fn push_row(&mut self, row: SourceRow) {
        for key in row.keys() {
            if !self.columns.iter().any(|c| c == key) {
                self.columns.push(key.clone());
            }
        }
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[SourceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// 读取单元格；行内缺失的列视为 Null
    pub fn cell<'a>(&self, row: &'a SourceRow, column: &str) -> &'a Value {
        row.get(column).unwrap_or(&ABSENT)
    }
}

impl FromIterator<SourceRow> for SourceTable {
    fn from_iter<I: IntoIterator<Item = SourceRow>>(iter: I) -> Self {
        let mut table = SourceTable::default();
        for row in iter {
            table.push_row(row);
        }
        table
    }
}
