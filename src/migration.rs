// ==========================================
// GCC 企业数据导入工具 - 表结构迁移助手
// ==========================================
// 状态机: Prompt → DryDescribe → (Confirmed | Cancelled)
// 红线: 只生成 SQL 文本交由操作人员在 SQL 编辑器中执行;
//       目标库客户端不具备 DDL 执行能力,本模块不尝试执行
// ==========================================

use std::fmt;
use thiserror::Error;

/// 迁移助手状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationState {
    Prompt,      // 初始状态,尚未展示变更计划
    DryDescribe, // 已展示变更计划,等待确认
    Confirmed,   // 操作人员确认,可输出 SQL
    Cancelled,   // 操作人员取消
}

impl fmt::Display for MigrationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MigrationState::Prompt => "PROMPT",
            MigrationState::DryDescribe => "DRY_DESCRIBE",
            MigrationState::Confirmed => "CONFIRMED",
            MigrationState::Cancelled => "CANCELLED",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MigrationError {
    #[error("无效的状态转换: 需要 {expected},当前 {actual}")]
    InvalidState {
        expected: MigrationState,
        actual: MigrationState,
    },
}

// ==========================================
// ColumnConversion - 单列类型转换
// ==========================================
// 规则: '' 与 NULL → NULL,其余按 ::INTEGER 转换
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnConversion {
    pub column: String,
    pub from_type: &'static str,
    pub to_type: &'static str,
}

impl ColumnConversion {
    pub fn text_to_integer(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            from_type: "TEXT",
            to_type: "INTEGER",
        }
    }

    pub fn title(&self) -> String {
        format!("Convert {} to {}", self.column, self.to_type)
    }

    pub fn sql(&self, table: &str) -> String {
        let col = &self.column;
        format!(
            "ALTER TABLE {table}\n\
             ALTER COLUMN {col}\n\
             TYPE {to}\n\
             USING CASE\n    \
             WHEN {col} = '' THEN NULL\n    \
             WHEN {col} IS NULL THEN NULL\n    \
             ELSE {col}::{to}\n\
             END;",
            table = table,
            col = col,
            to = self.to_type,
        )
    }
}

/// 人工执行步骤
pub const OPERATOR_STEPS: &[&str] = &[
    "打开 Supabase 控制台 → SQL Editor",
    "复制并粘贴上面的 SQL",
    "执行查询",
    "运行 inspect_schema 确认列类型",
];

// ==========================================
// SchemaMigration - 迁移助手
// ==========================================
#[derive(Debug, Clone)]
pub struct SchemaMigration {
    table: String,
    conversions: Vec<ColumnConversion>,
    state: MigrationState,
}

impl SchemaMigration {
    pub fn new(table: impl Into<String>, conversions: Vec<ColumnConversion>) -> Self {
        Self {
            table: table.into(),
            conversions,
            state: MigrationState::Prompt,
        }
    }

    /// gcc_companies: established_in_india / years_in_india 改为 INTEGER
    pub fn gcc_companies() -> Self {
        Self::new(
            crate::DEFAULT_TABLE,
            vec![
                ColumnConversion::text_to_integer("established_in_india"),
                ColumnConversion::text_to_integer("years_in_india"),
            ],
        )
    }

    pub fn state(&self) -> MigrationState {
        self.state
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// 确认前展示的变更清单
    pub fn plan_summary(&self) -> String {
        self.conversions
            .iter()
            .map(|c| format!("  - {} ({} → {})", c.column, c.from_type, c.to_type))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// 展示变更计划（不生成 SQL）,进入 DryDescribe 等待确认
    pub fn describe(&mut self) -> Result<String, MigrationError> {
        self.expect_state(MigrationState::Prompt)?;
        self.state = MigrationState::DryDescribe;
        Ok(self.plan_summary())
    }

    /// 处理操作人员的确认输入（仅 "yes" 视为确认,忽略大小写）
    pub fn answer(&mut self, input: &str) -> Result<MigrationState, MigrationError> {
        self.expect_state(MigrationState::DryDescribe)?;
        self.state = if input.trim().eq_ignore_ascii_case("yes") {
            MigrationState::Confirmed
        } else {
            MigrationState::Cancelled
        };
        Ok(self.state)
    }

    /// 确认后的完整 SQL 脚本
    pub fn confirmed_script(&self) -> Result<String, MigrationError> {
        self.expect_state(MigrationState::Confirmed)?;
        Ok(self.sql_script())
    }

    pub fn sql_script(&self) -> String {
        self.conversions
            .iter()
            .enumerate()
            .map(|(idx, c)| format!("-- Migration {}: {}\n{}", idx + 1, c.title(), c.sql(&self.table)))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn expect_state(&self, expected: MigrationState) -> Result<(), MigrationError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(MigrationError::InvalidState {
                expected,
                actual: self.state,
            })
        }
    }
}
