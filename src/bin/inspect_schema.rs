// 查看目标表结构: 由一条样例记录推断列类型,并输出总行数。
//
// Usage:
//   cargo run --bin inspect_schema -- [--table gcc_companies]

use anyhow::Context;
use clap::Parser;
use gcc_import::cli::InspectArgs;
use gcc_import::{inspect_schema, logging, RestStore, StoreConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = InspectArgs::parse();
    logging::init();

    let config = StoreConfig::from_env()?;
    let store = RestStore::new(&config).context("无法创建目标库客户端")?;

    println!("{}", "=".repeat(100));
    println!("📊 表结构: {}", args.table);
    println!("{}\n", "=".repeat(100));

    let report = inspect_schema(&store, &args.table)
        .await
        .with_context(|| format!("查询表 {} 失败", args.table))?;

    if report.is_empty() {
        println!("⚠️  表中没有记录,无法推断列类型");
    } else {
        print!("{}", report.render());
        println!();
        println!("📊 列数: {}", report.columns.len());
    }

    if let Some(total) = report.total_rows {
        println!("📈 总行数: {}", total);
    }

    println!("\n{}", "=".repeat(100));
    Ok(())
}
