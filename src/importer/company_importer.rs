// ==========================================
// GCC 企业数据导入工具 - 企业数据导入器
// ==========================================
// 阶段 4: (可选)清空目标表 → 逐批写入 → 计数
// 阶段 5: 导入后校验（总行数 + 样例记录）
// 红线: 单批失败只计数,不重试、不回滚、不中断后续批次
// ==========================================

use crate::domain::{Batch, ImportOutcome, VerificationReport};
use crate::importer::error::{ImportError, ImportResult};
use crate::store::{DestinationStore, Filter, SelectQuery};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

/// 校验样例字段
pub const VERIFY_SAMPLE_COLUMNS: &[&str] =
    &["account_global_legal_name", "industry", "primary_city"];

/// 校验样例条数
pub const VERIFY_SAMPLE_LIMIT: usize = 3;

// ==========================================
// CompanyImporter - 批量写入 + 校验
// ==========================================
pub struct CompanyImporter<S>
where
    S: DestinationStore,
{
    store: S,
    table: String,
}

impl<S> CompanyImporter<S>
where
    S: DestinationStore,
{
    pub fn new(store: S, table: impl Into<String>) -> Self {
        Self {
            store,
            table: table.into(),
        }
    }

    /// 清空目标表（全表删除）
    #[instrument(skip(self), fields(table = %self.table))]
    pub async fn clear_existing(&self) -> ImportResult<()> {
        info!("清空目标表现有数据");
        self.store
            .delete(&self.table, &Filter::all_rows())
            .await
            .map_err(|e| {
                error!(error = %e, "清空目标表失败");
                ImportError::ClearFailed(e)
            })?;
        info!("目标表已清空");
        Ok(())
    }

    /// 逐批写入
    ///
    /// # 返回
    /// - Ok(ImportOutcome): 成功/失败计数（是否视为整体失败由调用方决定）
    /// - Err(ClearFailed): clear_first 时清空失败,未发送任何批次
    #[instrument(skip(self, batches), fields(table = %self.table, run_id = tracing::field::Empty, batches = batches.len()))]
    pub async fn import_all(
        &self,
        batches: Vec<Batch>,
        clear_first: bool,
    ) -> ImportResult<ImportOutcome> {
        let run_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("run_id", run_id.as_str());

        if clear_first {
            self.clear_existing().await?;
        }

        let total_batches = batches.len();
        let total_records: usize = batches.iter().map(Batch::len).sum();
        info!(total_records, total_batches, "开始写入");

        let mut outcome = ImportOutcome::new(run_id);
        for batch in batches {
            let index = batch.index;
            let number = batch.number();
            let size = batch.len();

            match self.store.insert(&self.table, batch.records).await {
                Ok(response) if response.has_data() => {
                    info!(batch = number, total_batches, size, "批次写入完成");
                    outcome.record_success(index, size);
                }
                Ok(_) => {
                    warn!(batch = number, size, "批次写入未返回数据");
                    outcome.record_failure(index, size, "目标库未返回写入数据");
                }
                Err(e) => {
                    warn!(batch = number, size, error = %e, "批次写入失败");
                    outcome.record_failure(index, size, e.to_string());
                }
            }
        }
        outcome.finish();

        info!(
            imported = outcome.imported_count,
            failed = outcome.error_count,
            "写入结束"
        );
        Ok(outcome)
    }

    /// 导入后校验（只读;失败写入报告,不影响导入结果）
    #[instrument(skip(self), fields(table = %self.table))]
    pub async fn verify(&self) -> VerificationReport {
        let mut report = VerificationReport::default();

        let count_query = SelectQuery::columns(&["id"]).limit(1).with_exact_count();
        match self.store.select(&self.table, &count_query).await {
            Ok(response) => match response.count {
                Some(count) => report.total_rows = Some(count),
                None => {
                    warn!("目标库未返回总行数");
                    report.error = Some("目标库未返回总行数".to_string());
                    return report;
                }
            },
            Err(e) => {
                warn!(error = %e, "校验计数失败");
                report.error = Some(e.to_string());
                return report;
            }
        }

        let sample_query = SelectQuery::columns(VERIFY_SAMPLE_COLUMNS).limit(VERIFY_SAMPLE_LIMIT);
        match self.store.select(&self.table, &sample_query).await {
            Ok(response) => {
                report.samples = response
                    .rows
                    .into_iter()
                    .take(VERIFY_SAMPLE_LIMIT)
                    .collect();
            }
            Err(e) => {
                warn!(error = %e, "校验样例查询失败");
                report.error = Some(e.to_string());
            }
        }

        info!(
            total_rows = ?report.total_rows,
            samples = report.samples.len(),
            "校验完成"
        );
        report
    }
}
