// ==========================================
// 导入管道端到端测试
// ==========================================
// 测试范围: 解析 → 转换 → 分批 → 写入 → 校验（MockStore 作为目标库）
// ==========================================

mod helpers;

use gcc_import::config::ImportOptions;
use gcc_import::importer::{ImportError, ImportPipeline, PipelineReport};
use gcc_import::logging;
use gcc_import::store::Filter;
use gcc_import::BatchStatus;
use helpers::{csv_with_rows, temp_data_file, MockStore, StoreCall};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/data")
        .join(name)
}

fn expect_imported(report: PipelineReport) -> (usize, gcc_import::ImportOutcome, gcc_import::VerificationReport) {
    match report {
        PipelineReport::Imported {
            total_records,
            outcome,
            verification,
        } => (total_records, outcome, verification),
        other => panic!("应为 Imported 结果: {:?}", other),
    }
}

// ==========================================
// 正常导入
// ==========================================

#[tokio::test]
async fn test_json_import_end_to_end() {
    logging::init_test();

    let store = Arc::new(MockStore::new());
    let options = ImportOptions::new(fixture("gcc_companies_sample.json")).with_batch_size(2);
    let pipeline = ImportPipeline::new(store.clone(), options);

    let report = pipeline.run().await.expect("导入应成功");
    let (total, outcome, verification) = expect_imported(report);

    assert_eq!(total, 3);
    assert_eq!(outcome.imported_count, 3);
    assert_eq!(outcome.error_count, 0);
    assert_eq!(store.insert_sizes(), vec![2, 1], "批次大小应为 [2, 1]");
    assert_eq!(store.delete_count(), 0, "未指定 --clear 不应清空");

    let rows = store.stored_rows();
    assert_eq!(rows[0]["account_global_legal_name"], json!("Acme Technologies Ltd"));
    assert_eq!(rows[0]["total_centers"], json!(12));
    assert_eq!(rows[0]["total_gcc_centers"], json!(4));
    assert_eq!(rows[0]["total_excl_gcc_centers"], json!(8));

    // 缺失/非数字的整数字段取 0
    assert_eq!(rows[1]["total_centers"], json!(0));
    assert_eq!(rows[1]["total_gcc_centers"], json!(0));
    assert_eq!(rows[1]["total_excl_gcc_centers"], json!(0));

    // 文本去空白,空文本 → NULL
    assert_eq!(rows[2]["account_global_legal_name"], json!("Contoso Retail"));
    assert_eq!(rows[2]["industry"], Value::Null);

    assert_eq!(verification.total_rows, Some(3));
    assert_eq!(verification.samples.len(), 3);
    assert!(verification.is_ok());
}

#[tokio::test]
async fn test_csv_header_spelling_is_preserved() {
    logging::init_test();

    let store = Arc::new(MockStore::new());
    let options = ImportOptions::new(fixture("gcc_companies_sample.csv"));
    let pipeline = ImportPipeline::new(store.clone(), options);

    let report = pipeline.run().await.expect("导入应成功");
    assert_eq!(report.total_records(), 2);

    let rows = store.stored_rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["total_gcc_centers"], json!(4));
    assert_eq!(rows[0]["years_established_in_india"], json!("2008"));
    assert_eq!(rows[0]["hq_country"], json!("USA"));
    assert_eq!(rows[1]["revenue_range"], Value::Null);
    assert_eq!(rows[1]["total_gcc_centers"], json!(0));

    for row in &rows {
        assert!(!row.contains_key("Unmapped Column"));
        assert!(!row.contains_key("Totoal GCC Centers"));
    }
}

#[tokio::test]
async fn test_excel_import_end_to_end() {
    logging::init_test();

    let store = Arc::new(MockStore::new());
    let options = ImportOptions::new(fixture("gcc_companies_sample.xlsx"));
    let pipeline = ImportPipeline::new(store.clone(), options);

    let (total, outcome, _) = expect_imported(pipeline.run().await.expect("导入应成功"));

    assert_eq!(total, 2, "只读取第一个工作表");
    assert_eq!(outcome.imported_count, 2);

    let rows = store.stored_rows();
    assert_eq!(rows[0]["account_global_legal_name"], json!("Acme Technologies Ltd"));
    assert_eq!(rows[0]["total_gcc_centers"], json!(4));
    assert_eq!(rows[0]["years_established_in_india"], json!("2008-01-01"));
    assert_eq!(rows[0]["primary_city"], json!("Bengaluru"));

    assert_eq!(rows[1]["industry"], Value::Null);
    assert_eq!(rows[1]["total_gcc_centers"], json!(2));
    assert_eq!(rows[1]["years_established_in_india"], Value::Null);
}

#[tokio::test]
async fn test_batch_sizes_cover_all_records() {
    logging::init_test();

    let file = temp_data_file(".csv", &csv_with_rows(250));
    let store = Arc::new(MockStore::new());
    let pipeline = ImportPipeline::new(store.clone(), ImportOptions::new(file.path()));

    let report = pipeline.run().await.unwrap();
    let (total, outcome, _) = expect_imported(report);

    assert_eq!(total, 250);
    assert_eq!(store.insert_sizes(), vec![100, 100, 50]);
    assert_eq!(outcome.imported_count, 250);

    // 顺序保持
    let rows = store.stored_rows();
    assert_eq!(rows[0]["total_gcc_centers"], json!(1));
    assert_eq!(rows[249]["total_gcc_centers"], json!(250));
}

// ==========================================
// 预演模式
// ==========================================

#[tokio::test]
async fn test_dry_run_never_touches_store() {
    logging::init_test();

    let file = temp_data_file(".csv", &csv_with_rows(8));
    let store = Arc::new(MockStore::new());
    let options = ImportOptions::new(file.path()).dry_run(true).clear_first(true);
    let pipeline = ImportPipeline::new(store.clone(), options);

    let report = pipeline.run().await.unwrap();

    match report {
        PipelineReport::DryRun {
            total_records,
            preview,
        } => {
            assert_eq!(total_records, 8);
            assert_eq!(preview.len(), 5, "预览最多 5 条");
            assert_eq!(preview[0]["account_global_legal_name"], json!("Company 1"));
        }
        other => panic!("应为 DryRun 结果: {:?}", other),
    }
    assert!(store.calls().is_empty(), "预演模式不应调用目标库");
}

// ==========================================
// 清空目标表
// ==========================================

#[tokio::test]
async fn test_clear_runs_before_inserts() {
    logging::init_test();

    let file = temp_data_file(".csv", &csv_with_rows(3));
    let store = Arc::new(MockStore::new());
    let options = ImportOptions::new(file.path()).clear_first(true);
    let pipeline = ImportPipeline::new(store.clone(), options);

    pipeline.run().await.unwrap();

    let calls = store.calls();
    assert_eq!(
        calls[0],
        StoreCall::Delete {
            table: "gcc_companies".to_string(),
            filter: Filter::all_rows(),
        }
    );
    assert!(matches!(calls[1], StoreCall::Insert { size: 3, .. }));
}

#[tokio::test]
async fn test_clear_failure_aborts_before_insert() {
    logging::init_test();

    let file = temp_data_file(".csv", &csv_with_rows(3));
    let store = Arc::new(MockStore::new().failing_delete());
    let options = ImportOptions::new(file.path()).clear_first(true);
    let pipeline = ImportPipeline::new(store.clone(), options);

    let result = pipeline.run().await;

    assert!(matches!(result, Err(ImportError::ClearFailed(_))));
    assert!(store.insert_sizes().is_empty(), "清空失败后不应写入任何批次");
}

// ==========================================
// 批次失败隔离
// ==========================================

#[tokio::test]
async fn test_failed_batch_does_not_stop_later_batches() {
    logging::init_test();

    let file = temp_data_file(".csv", &csv_with_rows(5));
    let store = Arc::new(MockStore::new().failing_insert(1));
    let options = ImportOptions::new(file.path()).with_batch_size(2);
    let pipeline = ImportPipeline::new(store.clone(), options);

    let (total, outcome, _) = expect_imported(pipeline.run().await.unwrap());

    assert_eq!(store.insert_sizes(), vec![2, 2, 1], "失败批次之后仍继续写入");
    assert_eq!(outcome.imported_count, 3);
    assert_eq!(outcome.error_count, 2);
    assert_eq!(outcome.imported_count + outcome.error_count, total);

    let failed: Vec<_> = outcome.failed_batches().collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].index, 1);
    match &failed[0].status {
        BatchStatus::Failed { reason } => assert!(reason.contains("duplicate key")),
        BatchStatus::Imported => panic!("批次 2 应失败"),
    }
}

#[tokio::test]
async fn test_empty_insert_response_counts_as_failure() {
    logging::init_test();

    let file = temp_data_file(".csv", &csv_with_rows(4));
    let store = Arc::new(MockStore::new().empty_insert(0));
    let options = ImportOptions::new(file.path()).with_batch_size(2);
    let pipeline = ImportPipeline::new(store.clone(), options);

    let (_, outcome, _) = expect_imported(pipeline.run().await.unwrap());

    assert_eq!(outcome.imported_count, 2);
    assert_eq!(outcome.error_count, 2);
    assert!(outcome.has_failures());
}

// ==========================================
// 校验
// ==========================================

#[tokio::test]
async fn test_verification_failure_keeps_import_result() {
    logging::init_test();

    let file = temp_data_file(".csv", &csv_with_rows(3));
    let store = Arc::new(MockStore::new().failing_select());
    let pipeline = ImportPipeline::new(store.clone(), ImportOptions::new(file.path()));

    let (_, outcome, verification) = expect_imported(pipeline.run().await.unwrap());

    assert_eq!(outcome.imported_count, 3);
    assert!(!verification.is_ok());
    assert_eq!(verification.total_rows, None);
    assert!(verification.samples.is_empty());

    let selects = store
        .calls()
        .iter()
        .filter(|c| matches!(c, StoreCall::Select { .. }))
        .count();
    assert_eq!(selects, 1, "计数失败后不再查询样例");
}

#[tokio::test]
async fn test_verification_counts_existing_rows() {
    logging::init_test();

    let existing = vec![json!({
        "account_global_legal_name": "Existing Co",
        "industry": "Pharma",
        "primary_city": "Chennai",
        "website": "existing.example"
    })
    .as_object()
    .cloned()
    .unwrap()];

    let file = temp_data_file(".csv", &csv_with_rows(2));
    let store = Arc::new(MockStore::new().with_rows(existing));
    let pipeline = ImportPipeline::new(store.clone(), ImportOptions::new(file.path()));

    let (_, _, verification) = expect_imported(pipeline.run().await.unwrap());

    assert_eq!(verification.total_rows, Some(3));
    assert_eq!(verification.samples[0]["account_global_legal_name"], json!("Existing Co"));
    assert!(
        !verification.samples[0].contains_key("website"),
        "样例只包含名称/行业/城市"
    );
}

// ==========================================
// 终止运行的错误
// ==========================================

#[tokio::test]
async fn test_unsupported_format_makes_no_store_calls() {
    logging::init_test();

    let file = temp_data_file(".txt", "Account Global Legal Name\nAcme\n");
    let store = Arc::new(MockStore::new());
    let pipeline = ImportPipeline::new(store.clone(), ImportOptions::new(file.path()));

    let result = pipeline.run().await;

    assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_missing_file_reports_not_found() {
    logging::init_test();

    let store = Arc::new(MockStore::new());
    let options = ImportOptions::new("/nonexistent/gcc_companies.xlsx");
    let pipeline = ImportPipeline::new(store.clone(), options);

    let result = pipeline.run().await;

    assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_zero_batch_size_is_rejected() {
    logging::init_test();

    let file = temp_data_file(".csv", &csv_with_rows(2));
    let store = Arc::new(MockStore::new());
    let options = ImportOptions::new(file.path()).with_batch_size(0);
    let pipeline = ImportPipeline::new(store.clone(), options);

    let result = pipeline.run().await;

    assert!(matches!(result, Err(ImportError::InvalidBatchSize(0))));
    assert!(store.calls().is_empty());
}
