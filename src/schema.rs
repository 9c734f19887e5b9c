// ==========================================
// GCC 企业数据导入工具 - 表结构查看
// ==========================================
// 目标库 REST 接口不开放 information_schema,
// 以一条样例记录推断列名与值类型,并附带精确总行数
// ==========================================

use crate::store::{DestinationStore, SelectQuery, StoreResult};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

/// 样例值显示宽度
const SAMPLE_WIDTH: usize = 25;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: &'static str,
    pub nullable: &'static str, // 单条样例只能确定 NULL 值的列可空
    pub sample: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaReport {
    pub table: String,
    pub columns: Vec<ColumnInfo>,
    pub total_rows: Option<u64>,
}

impl SchemaReport {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// 对齐的文本表格
    pub fn render(&self) -> String {
        let mut out = format!(
            "{:<35} {:<20} {:<10} {}\n{}\n",
            "Column Name",
            "Data Type",
            "Nullable",
            "Sample Value",
            "-".repeat(100)
        );
        for column in &self.columns {
            out.push_str(&format!(
                "{:<35} {:<20} {:<10} {}\n",
                column.name, column.data_type, column.nullable, column.sample
            ));
        }
        out
    }
}

/// 由样例值推断列类型
pub fn infer_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "unknown",
        Value::String(_) => "text",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "numeric",
        Value::Bool(_) => "boolean",
        Value::Array(_) | Value::Object(_) => "json",
    }
}

/// 样例值显示文本（NULL 显示为 "NULL",超长截断为 22 字符 + "..."）
pub fn display_sample(value: &Value) -> String {
    let text = match value {
        Value::Null => return "NULL".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    if text.chars().count() > SAMPLE_WIDTH {
        let head: String = text.chars().take(SAMPLE_WIDTH - 3).collect();
        format!("{}...", head)
    } else {
        text
    }
}

/// 查看目标表结构
#[instrument(skip(store))]
pub async fn inspect_schema<S>(store: &S, table: &str) -> StoreResult<SchemaReport>
where
    S: DestinationStore + ?Sized,
{
    let sample = store
        .select(table, &SelectQuery::all_columns().limit(1))
        .await?;

    let columns: Vec<ColumnInfo> = sample
        .rows
        .first()
        .map(|row| {
            row.iter()
                .map(|(name, value)| ColumnInfo {
                    name: name.clone(),
                    data_type: infer_type(value),
                    nullable: if value.is_null() { "YES" } else { "?" },
                    sample: display_sample(value),
                })
                .collect()
        })
        .unwrap_or_default();

    let count = store
        .select(table, &SelectQuery::columns(&["id"]).limit(1).with_exact_count())
        .await?
        .count;

    info!(columns = columns.len(), total_rows = ?count, "表结构查看完成");

    Ok(SchemaReport {
        table: table.to_string(),
        columns,
        total_rows: count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_infer_type() {
        assert_eq!(infer_type(&Value::Null), "unknown");
        assert_eq!(infer_type(&json!("Acme")), "text");
        assert_eq!(infer_type(&json!(12)), "integer");
        assert_eq!(infer_type(&json!(1.5)), "numeric");
        assert_eq!(infer_type(&json!(true)), "boolean");
        assert_eq!(infer_type(&json!({"a": 1})), "json");
    }

    #[test]
    fn test_display_sample_truncates() {
        assert_eq!(display_sample(&Value::Null), "NULL");
        assert_eq!(display_sample(&json!("short")), "short");
        assert_eq!(display_sample(&json!(42)), "42");

        let long = "Global Capability Centre Holdings";
        let shown = display_sample(&json!(long));
        assert_eq!(shown, "Global Capability Cent...");
        assert_eq!(shown.chars().count(), 25);
    }

    #[test]
    fn test_render_contains_columns() {
        let report = SchemaReport {
            table: "gcc_companies".to_string(),
            columns: vec![ColumnInfo {
                name: "industry".to_string(),
                data_type: "text",
                nullable: "?",
                sample: "IT".to_string(),
            }],
            total_rows: Some(1),
        };

        let rendered = report.render();
        assert!(rendered.starts_with("Column Name"));
        assert!(rendered.contains("industry"));
    }
}
