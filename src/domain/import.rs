// ==========================================
// GCC 企业数据导入工具 - 导入批次与结果模型
// ==========================================
// 红线: 批次之间无事务关联,单批失败不影响其他批次
// ==========================================

use crate::domain::company::DestinationRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Batch - 导入批次
// ==========================================
// 用途: 分批器产出,导入器消费（每条记录只发送一次）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub index: usize,                    // 批次序号（从 0 开始）
    pub records: Vec<DestinationRecord>, // 批内记录（保持源顺序）
}

impl Batch {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 面向用户的批次编号（从 1 开始）
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

// ==========================================
// BatchStatus / BatchOutcome - 单批结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchStatus {
    Imported,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub index: usize,
    pub size: usize,
    #[serde(flatten)]
    pub status: BatchStatus,
}

// ==========================================
// ImportOutcome - 单次运行的导入汇总
// ==========================================
// 红线: 每次运行重新计数; imported_count + error_count == 发送记录总数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub imported_count: usize,
    pub error_count: usize,
    pub batches: Vec<BatchOutcome>,
}

impl ImportOutcome {
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            started_at: Utc::now(),
            finished_at: None,
            imported_count: 0,
            error_count: 0,
            batches: Vec::new(),
        }
    }

    pub fn record_success(&mut self, index: usize, size: usize) {
        self.imported_count += size;
        self.batches.push(BatchOutcome {
            index,
            size,
            status: BatchStatus::Imported,
        });
    }

    pub fn record_failure(&mut self, index: usize, size: usize, reason: impl Into<String>) {
        self.error_count += size;
        self.batches.push(BatchOutcome {
            index,
            size,
            status: BatchStatus::Failed {
                reason: reason.into(),
            },
        });
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn total(&self) -> usize {
        self.imported_count + self.error_count
    }

    pub fn has_failures(&self) -> bool {
        self.error_count > 0
    }

    pub fn failed_batches(&self) -> impl Iterator<Item = &BatchOutcome> {
        self.batches
            .iter()
            .filter(|b| matches!(b.status, BatchStatus::Failed { .. }))
    }
}

// ==========================================
// VerificationReport - 导入后校验报告
// ==========================================
// 用途: 只读查询结果; 查询失败写入 error,不影响已记录的导入结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub total_rows: Option<u64>,
    pub samples: Vec<DestinationRecord>,
    pub error: Option<String>,
}

impl VerificationReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
