// ==========================================
// GCC 企业数据导入工具 - 命令行主入口
// ==========================================
// 用法:
//   gcc-import --file data.xlsx [--clear] [--batch-size N] [--dry-run]
// 环境变量: VITE_SUPABASE_URL / SUPABASE_SERVICE_ROLE_KEY（可写入 .env）
// ==========================================

use anyhow::Context;
use clap::Parser;
use gcc_import::cli::ImportArgs;
use gcc_import::domain::{DestinationRecord, ImportOutcome, VerificationReport};
use gcc_import::importer::{preview_columns, ImportPipeline, PipelineReport};
use gcc_import::{logging, RestStore, StoreConfig};
use serde_json::Value;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = ImportArgs::parse();

    if args.log_json {
        logging::init_json();
    } else {
        logging::init();
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\n❌ 错误: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: ImportArgs) -> anyhow::Result<()> {
    println!("\n{}", "=".repeat(50));
    println!("🚀 {} v{}", gcc_import::APP_NAME, gcc_import::VERSION);
    println!("{}\n", "=".repeat(50));

    // 凭据在任何网络调用之前检查
    let config = StoreConfig::from_env()?;
    let store = RestStore::new(&config).context("无法创建目标库客户端")?;
    println!("✅ 目标库: {}\n", config.url);

    let options = args.to_options();
    println!("📂 数据文件: {}", options.file.display());

    let pipeline = ImportPipeline::new(store, options);
    let report = pipeline.run().await?;

    match report {
        PipelineReport::DryRun {
            total_records,
            preview,
        } => {
            print_preview(&preview, total_records);
            println!("✅ 预演完成,未写入任何数据。");
            println!("   去掉 --dry-run 参数以执行实际导入。\n");
        }
        PipelineReport::Imported {
            total_records,
            outcome,
            verification,
        } => {
            print_outcome(&outcome, total_records);
            print_verification(&verification);
            println!("\n✅ 导入流程结束。\n");
        }
    }

    Ok(())
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "NULL".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn print_preview(records: &[DestinationRecord], total_records: usize) {
    println!("\n👀 数据预览（前 {} 条）:\n", records.len());

    let columns = preview_columns(records);
    let widths: Vec<usize> = columns
        .iter()
        .map(|col| {
            records
                .iter()
                .map(|r| cell_text(r.get(col)).chars().count())
                .chain(std::iter::once(col.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(col, w)| format!("{:<width$}", col, width = *w))
        .collect();
    println!("{}", header.join("  "));

    for record in records {
        let line: Vec<String> = columns
            .iter()
            .zip(&widths)
            .map(|(col, w)| format!("{:<width$}", cell_text(record.get(col)), width = *w))
            .collect();
        println!("{}", line.join("  "));
    }

    println!("\n📊 待导入记录总数: {}\n", total_records);
}

fn print_outcome(outcome: &ImportOutcome, total_records: usize) {
    println!("{}", "=".repeat(50));
    println!("📊 导入完成\n");
    println!(
        "✅ 成功导入: {} / {}",
        outcome.imported_count, total_records
    );
    if outcome.has_failures() {
        println!("❌ 失败: {}", outcome.error_count);
        for failed in outcome.failed_batches() {
            if let gcc_import::BatchStatus::Failed { reason } = &failed.status {
                println!(
                    "   批次 {} ({} 条): {}",
                    failed.index + 1,
                    failed.size,
                    reason
                );
            }
        }
    }
    println!("{}", "=".repeat(50));
}

fn print_verification(report: &VerificationReport) {
    println!("\n🔍 导入校验\n");

    if let Some(total) = report.total_rows {
        println!("✅ 目标表总行数: {}", total);
    }

    if !report.samples.is_empty() {
        println!("\n📋 样例记录:");
        for (i, record) in report.samples.iter().enumerate() {
            println!(
                "   {}. {} - {} - {}",
                i + 1,
                cell_text(record.get("account_global_legal_name")),
                cell_text(record.get("industry")),
                cell_text(record.get("primary_city"))
            );
        }
    }

    if let Some(error) = &report.error {
        println!("❌ 校验失败: {}", error);
    }
}
