// ==========================================
// Mock 目标库实现 - 用于集成测试
// ==========================================
// 记录每一次调用;可指定第 n 次写入失败/无返回数据、清空失败、查询失败
// ==========================================

use async_trait::async_trait;
use gcc_import::domain::DestinationRecord;
use gcc_import::store::{
    DestinationStore, Filter, InsertResponse, SelectQuery, SelectResponse, StoreError,
    StoreResult,
};
use std::collections::HashSet;
use std::sync::Mutex;

/// 调用记录
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Select { table: String, query: SelectQuery },
    Insert { table: String, size: usize },
    Delete { table: String, filter: Filter },
}

#[derive(Default)]
pub struct MockStore {
    calls: Mutex<Vec<StoreCall>>,
    rows: Mutex<Vec<DestinationRecord>>,
    failing_inserts: HashSet<usize>, // 第 n 次写入（从 0 开始）返回错误
    empty_inserts: HashSet<usize>,   // 第 n 次写入返回 data = None
    fail_delete: bool,
    fail_select: bool,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_insert(mut self, ordinal: usize) -> Self {
        self.failing_inserts.insert(ordinal);
        self
    }

    pub fn empty_insert(mut self, ordinal: usize) -> Self {
        self.empty_inserts.insert(ordinal);
        self
    }

    pub fn failing_delete(mut self) -> Self {
        self.fail_delete = true;
        self
    }

    pub fn failing_select(mut self) -> Self {
        self.fail_select = true;
        self
    }

    pub fn with_rows(self, rows: Vec<DestinationRecord>) -> Self {
        *self.rows.lock().unwrap() = rows;
        self
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn insert_sizes(&self) -> Vec<usize> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                StoreCall::Insert { size, .. } => Some(size),
                _ => None,
            })
            .collect()
    }

    pub fn delete_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, StoreCall::Delete { .. }))
            .count()
    }

    pub fn stored_rows(&self) -> Vec<DestinationRecord> {
        self.rows.lock().unwrap().clone()
    }

    fn record(&self, call: StoreCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn insert_ordinal(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, StoreCall::Insert { .. }))
            .count()
    }
}

#[async_trait]
impl DestinationStore for MockStore {
    async fn select(&self, table: &str, query: &SelectQuery) -> StoreResult<SelectResponse> {
        self.record(StoreCall::Select {
            table: table.to_string(),
            query: query.clone(),
        });

        if self.fail_select {
            return Err(StoreError::Api {
                status: 503,
                message: "service unavailable".to_string(),
            });
        }

        let stored = self.rows.lock().unwrap().clone();
        let count = query.count_exact.then_some(stored.len() as u64);

        let rows = stored
            .into_iter()
            .take(query.limit.unwrap_or(usize::MAX))
            .map(|row| {
                if query.columns.is_empty() {
                    row
                } else {
                    row.into_iter()
                        .filter(|(k, _)| query.columns.contains(k))
                        .collect()
                }
            })
            .collect();

        Ok(SelectResponse { rows, count })
    }

    async fn insert(
        &self,
        table: &str,
        records: Vec<DestinationRecord>,
    ) -> StoreResult<InsertResponse> {
        let ordinal = self.insert_ordinal();
        self.record(StoreCall::Insert {
            table: table.to_string(),
            size: records.len(),
        });

        if self.failing_inserts.contains(&ordinal) {
            return Err(StoreError::Api {
                status: 409,
                message: "duplicate key value violates unique constraint".to_string(),
            });
        }
        if self.empty_inserts.contains(&ordinal) {
            return Ok(InsertResponse { data: None });
        }

        self.rows.lock().unwrap().extend(records.iter().cloned());
        Ok(InsertResponse {
            data: Some(records),
        })
    }

    async fn delete(&self, table: &str, filter: &Filter) -> StoreResult<()> {
        self.record(StoreCall::Delete {
            table: table.to_string(),
            filter: filter.clone(),
        });

        if self.fail_delete {
            return Err(StoreError::Api {
                status: 401,
                message: "permission denied".to_string(),
            });
        }

        self.rows.lock().unwrap().clear();
        Ok(())
    }
}
