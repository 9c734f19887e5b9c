//! 命令行参数定义
//!
//! - `gcc-import`: 导入管道
//! - `inspect_schema`: 表结构查看

use crate::config::{ImportOptions, DEFAULT_BATCH_SIZE};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gcc-import")]
#[command(
    version,
    about = "将 GCC 企业数据（Excel / JSON / CSV）导入 Supabase",
    after_help = "示例:\n  gcc-import --file data.xlsx\n  gcc-import --file data.json --clear\n  gcc-import --file data.csv --batch-size 50\n  gcc-import --file data.xlsx --dry-run"
)]
pub struct ImportArgs {
    /// 数据文件路径（.xlsx / .xls / .json / .csv）
    #[arg(long)]
    pub file: PathBuf,

    /// 导入前清空目标表
    #[arg(long)]
    pub clear: bool,

    /// 每批记录数
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// 只预览转换结果,不写入
    #[arg(long)]
    pub dry_run: bool,

    /// 目标表
    #[arg(long, default_value = crate::DEFAULT_TABLE)]
    pub table: String,

    /// 以 JSON 格式输出日志
    #[arg(long)]
    pub log_json: bool,
}

impl ImportArgs {
    pub fn to_options(&self) -> ImportOptions {
        ImportOptions::new(self.file.clone())
            .with_table(self.table.clone())
            .with_batch_size(self.batch_size)
            .clear_first(self.clear)
            .dry_run(self.dry_run)
    }
}

#[derive(Parser, Debug)]
#[command(name = "inspect_schema")]
#[command(version, about = "查看目标表的列与样例值类型")]
pub struct InspectArgs {
    /// 目标表
    #[arg(long, default_value = crate::DEFAULT_TABLE)]
    pub table: String,
}
