// ==========================================
// GCC 企业数据导入工具 - 分批器
// ==========================================
// 阶段 3: 按固定大小切分,批次 k = 记录 [k·N, (k+1)·N)
// ==========================================

use crate::domain::{Batch, DestinationRecord};
use crate::importer::error::{ImportError, ImportResult};

/// 将记录切分为有序批次（最后一批可能不足 size 条）
///
/// 记录按值移入各批次,每条记录只属于一个批次。
pub fn batch(records: Vec<DestinationRecord>, size: usize) -> ImportResult<Vec<Batch>> {
    if size == 0 {
        return Err(ImportError::InvalidBatchSize(size));
    }

    let mut batches = Vec::with_capacity(records.len().div_ceil(size));
    let mut iter = records.into_iter().peekable();
    while iter.peek().is_some() {
        let chunk: Vec<DestinationRecord> = iter.by_ref().take(size).collect();
        batches.push(Batch {
            index: batches.len(),
            records: chunk,
        });
    }

    Ok(batches)
}
