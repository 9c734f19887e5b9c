// ==========================================
// GCC 企业数据导入工具 - 目标库 Trait
// ==========================================
// 职责: 定义目标库访问接口（不包含实现）
// 红线: 接口只暴露 select/insert/delete,不提供原始 SQL 执行能力
// ==========================================

use crate::domain::DestinationRecord;
use crate::store::error::StoreResult;
use async_trait::async_trait;
use std::sync::Arc;

// ==========================================
// Filter - 行过滤条件
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Neq { column: String, value: String },
}

impl Filter {
    pub fn neq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::Neq {
            column: column.into(),
            value: value.into(),
        }
    }

    /// 匹配全表的过滤条件（目标库拒绝无条件 DELETE）
    ///
    /// id 为 UUID 主键,任何真实行都不等于全零 UUID。
    pub fn all_rows() -> Self {
        Filter::neq("id", "00000000-0000-0000-0000-000000000000")
    }

    /// PostgREST 查询参数形式: (列名, "op.值")
    pub fn to_query_pair(&self) -> (String, String) {
        match self {
            Filter::Neq { column, value } => (column.clone(), format!("neq.{}", value)),
        }
    }
}

// ==========================================
// SelectQuery - 查询参数
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectQuery {
    pub columns: Vec<String>, // 空表示 "*"
    pub limit: Option<usize>,
    pub count_exact: bool, // 是否要求返回精确总行数
}

impl SelectQuery {
    pub fn columns(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn all_columns() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_exact_count(mut self) -> Self {
        self.count_exact = true;
        self
    }

    /// select 参数文本（逗号分隔,空列表为 "*"）
    pub fn select_clause(&self) -> String {
        if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns.join(",")
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectResponse {
    pub rows: Vec<DestinationRecord>,
    pub count: Option<u64>,
}

/// 写入响应; data 为 None 表示目标库未返回写入的行
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsertResponse {
    pub data: Option<Vec<DestinationRecord>>,
}

impl InsertResponse {
    pub fn has_data(&self) -> bool {
        self.data.as_ref().is_some_and(|rows| !rows.is_empty())
    }
}

// ==========================================
// DestinationStore Trait
// ==========================================
// 用途: 导入器/校验器/表结构查看的数据访问接口
// 实现者: RestStore（reqwest）,测试中的 MockStore
#[async_trait]
pub trait DestinationStore: Send + Sync {
    /// 查询行（可附带精确计数）
    async fn select(&self, table: &str, query: &SelectQuery) -> StoreResult<SelectResponse>;

    /// 批量写入整批记录（单次请求）
    async fn insert(
        &self,
        table: &str,
        records: Vec<DestinationRecord>,
    ) -> StoreResult<InsertResponse>;

    /// 按条件删除
    async fn delete(&self, table: &str, filter: &Filter) -> StoreResult<()>;
}

#[async_trait]
impl<S> DestinationStore for Arc<S>
where
    S: DestinationStore + ?Sized,
{
    async fn select(&self, table: &str, query: &SelectQuery) -> StoreResult<SelectResponse> {
        (**self).select(table, query).await
    }

    async fn insert(
        &self,
        table: &str,
        records: Vec<DestinationRecord>,
    ) -> StoreResult<InsertResponse> {
        (**self).insert(table, records).await
    }

    async fn delete(&self, table: &str, filter: &Filter) -> StoreResult<()> {
        (**self).delete(table, filter).await
    }
}
