// ==========================================
// GCC 企业数据导入工具 - 记录转换器
// ==========================================
// 阶段 2: 字段重命名 → 整数转换 → NULL 标准化 → 字段投影
// 红线: 不丢行、不重排;整数字段转换失败一律取 0（不是 NULL,也不报错）
// ==========================================

use crate::domain::{DestinationRecord, SourceTable};
use crate::importer::column_mapper::ColumnMapping;
use serde_json::Value;
use tracing::{debug, info, warn};

// ==========================================
// RecordTransformer
// ==========================================
pub struct RecordTransformer {
    mapping: ColumnMapping,
}

impl RecordTransformer {
    pub fn new(mapping: ColumnMapping) -> Self {
        Self { mapping }
    }

    /// 将源表转换为目标记录（顺序与源行一一对应）
    pub fn transform(&self, table: &SourceTable) -> Vec<DestinationRecord> {
        let resolved = self.resolve_columns(table);

        let dropped = table.columns().len() - resolved.len();
        if dropped > 0 {
            debug!(dropped, "未映射或重复的源列已忽略");
        }

        let mut fallback_count = 0usize;
        let mut records = Vec::with_capacity(table.len());

        for (row_idx, row) in table.rows().iter().enumerate() {
            let mut record = DestinationRecord::new();

            for &(source, dest) in &resolved {
                let raw = table.cell(row, source);

                let value = if self.mapping.is_numeric(dest) {
                    let (number, exact) = coerce_integer(raw);
                    if !exact {
                        fallback_count += 1;
                        debug!(row = row_idx + 1, field = dest, raw = %raw, "整数转换失败,取 0");
                    }
                    Value::from(number)
                } else {
                    normalize_value(raw)
                };

                record.insert(dest.to_string(), value);
            }

            // 投影: 只保留映射表中的目标字段
            record.retain(|field, _| self.mapping.is_destination(field));
            records.push(record);
        }

        if fallback_count > 0 {
            warn!(count = fallback_count, "部分整数字段无法解析,已按 0 写入");
        }
        info!(records = records.len(), "记录转换完成");

        records
    }

    /// 源列 → 目标字段（未映射的列丢弃）
    ///
    /// 多个源列落到同一目标字段时只保留一列: 精确匹配优先于去空白匹配,
    /// 同类匹配保留先出现的列。
    fn resolve_columns<'a>(&'a self, table: &'a SourceTable) -> Vec<(&'a str, &'a str)> {
        let mut resolved: Vec<(&str, &str)> = Vec::new();

        for column in table.columns() {
            let Some(dest) = self.mapping.destination_for(column) else {
                continue;
            };

            let Some(pos) = resolved.iter().position(|&(_, d)| d == dest) else {
                resolved.push((column.as_str(), dest));
                continue;
            };

            let existing = resolved[pos].0;
            let (kept, ignored) =
                if self.mapping.is_exact_source(column) && !self.mapping.is_exact_source(existing) {
                    resolved[pos] = (column.as_str(), dest);
                    (column.as_str(), existing)
                } else {
                    (existing, column.as_str())
                };
            warn!(
                field = dest,
                kept = %kept,
                ignored = %ignored,
                "多个源列映射到同一目标字段,已忽略其中一列"
            );
        }

        resolved
    }
}

/// 以给定映射转换整张表
pub fn transform(table: &SourceTable, mapping: &ColumnMapping) -> Vec<DestinationRecord> {
    RecordTransformer::new(mapping.clone()).transform(table)
}

/// 整数转换
///
/// 返回 (值, 是否由原值解析得到)。缺失、空串、非数字文本返回 (0, false)。
/// 小数向零截断。
pub fn coerce_integer(raw: &Value) -> (i64, bool) {
    match raw {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                (i, true)
            } else {
                n.as_f64().and_then(truncate_float).map_or((0, false), |i| (i, true))
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            if let Ok(i) = trimmed.parse::<i64>() {
                (i, true)
            } else {
                trimmed
                    .parse::<f64>()
                    .ok()
                    .and_then(truncate_float)
                    .map_or((0, false), |i| (i, true))
            }
        }
        Value::Bool(b) => (i64::from(*b), true),
        Value::Null | Value::Array(_) | Value::Object(_) => (0, false),
    }
}

fn truncate_float(f: f64) -> Option<i64> {
    if f.is_finite() && f.abs() < 9.2e18 {
        Some(f.trunc() as i64)
    } else {
        None
    }
}

/// NULL 标准化: 缺失/空白文本 → Null;文本去首尾空白;其余原样保留
pub fn normalize_value(raw: &Value) -> Value {
    match raw {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Value::Null
            } else {
                Value::String(trimmed.to_string())
            }
        }
        other => other.clone(),
    }
}
