// 表结构迁移助手: established_in_india / years_in_india 由 TEXT 改为 INTEGER。
//
// Usage:
//   cargo run --bin migrate_schema
//
// 目标库 REST 客户端不能执行 DDL,确认后只输出 SQL,由操作人员在 SQL Editor 中执行。

use gcc_import::migration::{MigrationState, SchemaMigration, OPERATOR_STEPS};
use gcc_import::{logging, StoreConfig};
use std::io::{self, BufRead, Write};

fn main() -> anyhow::Result<()> {
    logging::init();

    // 与导入工具一致: 凭据缺失直接退出
    let config = StoreConfig::from_env()?;
    tracing::info!(url = %config.url, "凭据检查通过");

    let mut migration = SchemaMigration::gcc_companies();

    println!("{}", "=".repeat(70));
    println!("🔧 表结构迁移 ({})", migration.table());
    println!("{}", "=".repeat(70));
    println!("\n将以下列改为 INTEGER 类型:");
    println!("{}\n", migration.describe()?);

    print!("Do you want to proceed? (yes/no): ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;

    if migration.answer(&input)? == MigrationState::Cancelled {
        println!("\n❌ 迁移已取消。");
        return Ok(());
    }

    let script = migration.confirmed_script()?;

    println!("\n⚠️  目标库客户端不支持执行 DDL,请在 Supabase SQL Editor 中手动执行以下 SQL:");
    println!("\n{}\n", "=".repeat(70));
    println!("{}", script);
    println!("\n{}", "=".repeat(70));
    println!("\n步骤:");
    for (i, step) in OPERATOR_STEPS.iter().enumerate() {
        println!("{}. {}", i + 1, step);
    }
    println!("\n{}", "=".repeat(70));

    Ok(())
}
