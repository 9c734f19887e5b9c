// ==========================================
// GCC 企业数据导入工具 - 文件解析器实现
// ==========================================
// 阶段 1: 文件读取与解析
// 支持: Excel (.xlsx/.xls) / JSON 数组 (.json) / CSV (.csv)
// 红线: 只按扩展名选择解析器,不做内容嗅探;解析失败不返回部分数据
// ==========================================

use crate::domain::{SourceRow, SourceTable};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::FileParser;
use calamine::{open_workbook_auto, Data, ExcelDateTime, Reader};
use chrono::Timelike;
use csv::ReaderBuilder;
use serde_json::{Number, Value};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// 小写扩展名（无扩展名时为空串）
fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// 检查扩展名与文件存在性
fn check_file(path: &Path, accepted: &[&str]) -> ImportResult<()> {
    let ext = extension_of(path);
    if !accepted.contains(&ext.as_str()) {
        return Err(ImportError::UnsupportedFormat(display_ext(&ext)));
    }
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

fn display_ext(ext: &str) -> String {
    if ext.is_empty() {
        "(无扩展名)".to_string()
    } else {
        format!(".{}", ext)
    }
}

/// 空表头按列序命名,与常见表格工具保持一致
fn header_name(raw: String, col_idx: usize) -> String {
    if raw.trim().is_empty() {
        format!("Unnamed: {}", col_idx)
    } else {
        raw
    }
}

/// 重复表头只读取第一列
fn warn_duplicate_headers(headers: &[String]) {
    let mut seen = HashSet::new();
    for header in headers {
        if !seen.insert(header.as_str()) {
            warn!(header = %header, "表头重复,只读取第一列");
        }
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_table(&self, file_path: &Path) -> ImportResult<SourceTable> {
        check_file(file_path, self.extensions())?;

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_path(file_path)?;

        // 表头不做 trim: 映射表中的列名可能带有意义的空白
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(idx, h)| header_name(h.trim_start_matches('\u{feff}').to_string(), idx))
            .collect();
        warn_duplicate_headers(&headers);

        let mut table = SourceTable::with_columns(headers.clone());
        for result in reader.records() {
            let record = result?;
            let mut row = SourceRow::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    if row.contains_key(header) {
                        continue;
                    }
                    let cell = if value.is_empty() {
                        Value::Null
                    } else {
                        Value::String(value.to_string())
                    };
                    row.insert(header.clone(), cell);
                }
            }

            table.push_row(row);
        }

        debug!(rows = table.len(), columns = table.columns().len(), "CSV 解析完成");
        Ok(table)
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["csv"]
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    fn cell_to_value(cell: &Data) -> Value {
        match cell {
            Data::Empty | Data::Error(_) => Value::Null,
            Data::String(s) => Value::String(s.clone()),
            Data::Int(i) => Value::from(*i),
            Data::Float(f) => float_to_value(*f),
            Data::Bool(b) => Value::Bool(*b),
            Data::DateTime(dt) => Value::String(excel_date_text(dt)),
            // ISO 日期/时长文本原样保留
            other => Value::String(other.to_string()),
        }
    }
}

/// 日期单元格的显示文本: 整日为 YYYY-MM-DD,带时间为 YYYY-MM-DD HH:MM:SS
///
/// 时长或超出范围的序列值退回原始序列数文本。
fn excel_date_text(dt: &ExcelDateTime) -> String {
    if dt.is_duration() {
        return dt.as_f64().to_string();
    }
    match dt.as_datetime() {
        Some(value) if value.time().num_seconds_from_midnight() == 0 => {
            value.format("%Y-%m-%d").to_string()
        }
        Some(value) => value.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => dt.as_f64().to_string(),
    }
}

/// 整数值的浮点单元格还原为整数
fn float_to_value(f: f64) -> Value {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15 {
        Value::from(f as i64)
    } else {
        Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
    }
}

impl FileParser for ExcelParser {
    fn parse_to_table(&self, file_path: &Path) -> ImportResult<SourceTable> {
        check_file(file_path, self.extensions())?;

        // 打开 Excel 文件（.xlsx/.xls 自动识别）
        let mut workbook = open_workbook_auto(file_path)?;

        // 读取第一个 sheet
        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无表头行".to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .enumerate()
            .map(|(idx, cell)| header_name(cell.to_string(), idx))
            .collect();
        warn_duplicate_headers(&headers);

        // 读取数据行
        let mut table = SourceTable::with_columns(headers.clone());
        for data_row in rows {
            let mut row = SourceRow::new();
            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    if row.contains_key(header) {
                        continue;
                    }
                    row.insert(header.clone(), Self::cell_to_value(cell));
                }
            }
            table.push_row(row);
        }

        debug!(sheet = %sheet_name, rows = table.len(), "Excel 解析完成");
        Ok(table)
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["xlsx", "xls"]
    }
}

// ==========================================
// JSON Parser 实现
// ==========================================
// 格式: 顶层数组,每个元素为 { 列名: 值 } 对象
pub struct JsonParser;

impl FileParser for JsonParser {
    fn parse_to_table(&self, file_path: &Path) -> ImportResult<SourceTable> {
        check_file(file_path, self.extensions())?;

        let content = fs::read_to_string(file_path)?;
        let parsed: Value = serde_json::from_str(&content)?;

        let items = match parsed {
            Value::Array(items) => items,
            other => {
                return Err(ImportError::JsonParseError(format!(
                    "顶层必须为记录数组,实际为 {}",
                    json_kind(&other)
                )))
            }
        };

        let mut table = SourceTable::default();
        for (idx, item) in items.into_iter().enumerate() {
            match item {
                Value::Object(row) => table.push_row(row),
                other => {
                    return Err(ImportError::JsonParseError(format!(
                        "第 {} 个元素不是对象: {}",
                        idx + 1,
                        json_kind(&other)
                    )))
                }
            }
        }

        debug!(rows = table.len(), columns = table.columns().len(), "JSON 解析完成");
        Ok(table)
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["json"]
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser {
    parsers: Vec<Box<dyn FileParser>>,
}

impl Default for UniversalFileParser {
    fn default() -> Self {
        Self {
            parsers: vec![
                Box::new(ExcelParser),
                Box::new(JsonParser),
                Box::new(CsvParser),
            ],
        }
    }
}

impl UniversalFileParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<SourceTable> {
        let path = file_path.as_ref();
        let ext = extension_of(path);

        let parser = self
            .parsers
            .iter()
            .find(|p| p.extensions().contains(&ext.as_str()))
            .ok_or_else(|| ImportError::UnsupportedFormat(display_ext(&ext)))?;

        let table = parser.parse_to_table(path)?;
        info!(
            file = %path.display(),
            format = %ext,
            records = table.len(),
            "数据文件已加载"
        );
        Ok(table)
    }
}
