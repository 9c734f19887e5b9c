// ==========================================
// GCC 企业数据导入工具 - 导入管道
// ==========================================
// 流程: 解析 → 转换 → (预演: 预览 | 分批 → 写入 → 校验)
// 红线: 预演模式不调用目标库任何接口
// ==========================================

use crate::config::ImportOptions;
use crate::domain::{DestinationRecord, ImportOutcome, VerificationReport};
use crate::importer::batcher::batch;
use crate::importer::column_mapper::ColumnMapping;
use crate::importer::company_importer::CompanyImporter;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::transformer::RecordTransformer;
use crate::store::DestinationStore;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// 预览优先展示的字段
pub const PREVIEW_COLUMNS: &[&str] = &[
    "account_global_legal_name",
    "industry",
    "primary_city",
    "total_gcc_centers",
];

// ==========================================
// PipelineReport - 单次运行结果
// ==========================================
#[derive(Debug, Clone)]
pub enum PipelineReport {
    DryRun {
        total_records: usize,
        preview: Vec<DestinationRecord>,
    },
    Imported {
        total_records: usize,
        outcome: ImportOutcome,
        verification: VerificationReport,
    },
}

impl PipelineReport {
    pub fn total_records(&self) -> usize {
        match self {
            PipelineReport::DryRun { total_records, .. }
            | PipelineReport::Imported { total_records, .. } => *total_records,
        }
    }
}

/// 预览展示列: 优先字段中存在的部分;都不存在时退回首条记录的全部字段
pub fn preview_columns(records: &[DestinationRecord]) -> Vec<String> {
    let present: Vec<String> = PREVIEW_COLUMNS
        .iter()
        .filter(|col| records.iter().any(|r| r.contains_key(**col)))
        .map(|col| col.to_string())
        .collect();

    if !present.is_empty() {
        return present;
    }
    records
        .first()
        .map(|r| r.keys().cloned().collect())
        .unwrap_or_default()
}

// ==========================================
// ImportPipeline
// ==========================================
pub struct ImportPipeline<S>
where
    S: DestinationStore,
{
    options: ImportOptions,
    parser: UniversalFileParser,
    transformer: RecordTransformer,
    importer: CompanyImporter<S>,
}

impl<S> ImportPipeline<S>
where
    S: DestinationStore,
{
    pub fn new(store: S, options: ImportOptions) -> Self {
        let importer = CompanyImporter::new(store, options.table.clone());
        Self {
            options,
            parser: UniversalFileParser::new(),
            transformer: RecordTransformer::new(ColumnMapping::gcc_companies()),
            importer,
        }
    }

    /// 执行一次完整运行
    ///
    /// 配置、文件、清空错误终止运行;单批写入失败记录在 ImportOutcome 中。
    #[instrument(skip(self), fields(file = %self.options.file.display(), dry_run = self.options.dry_run))]
    pub async fn run(&self) -> ImportResult<PipelineReport> {
        let start_time = Instant::now();

        // === 步骤 0: 参数检查 ===
        self.options.validate()?;
        if self.options.batch_size == 0 {
            return Err(ImportError::InvalidBatchSize(self.options.batch_size));
        }

        // === 步骤 1: 解析文件 ===
        debug!("步骤 1: 解析文件");
        let table = self.parser.parse(&self.options.file)?;

        // === 步骤 2: 字段映射与转换 ===
        debug!("步骤 2: 字段映射与转换");
        let records = self.transformer.transform(&table);
        let total_records = records.len();

        if self.options.dry_run {
            let preview = records
                .into_iter()
                .take(self.options.preview_rows)
                .collect();
            info!(total_records, "预演完成,未写入任何数据");
            return Ok(PipelineReport::DryRun {
                total_records,
                preview,
            });
        }

        // === 步骤 3: 分批 ===
        debug!("步骤 3: 分批");
        let batches = batch(records, self.options.batch_size)?;
        info!(
            batches = batches.len(),
            batch_size = self.options.batch_size,
            "分批完成"
        );

        // === 步骤 4: 写入 ===
        debug!("步骤 4: 写入");
        let outcome = self
            .importer
            .import_all(batches, self.options.clear_first)
            .await?;

        // === 步骤 5: 校验 ===
        debug!("步骤 5: 校验");
        let verification = self.importer.verify().await;

        info!(
            total_records,
            imported = outcome.imported_count,
            failed = outcome.error_count,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "导入运行结束"
        );

        Ok(PipelineReport::Imported {
            total_records,
            outcome,
            verification,
        })
    }
}
