// ==========================================
// GCC 企业数据导入工具 - 核心库
// ==========================================
// 技术栈: Rust + tokio + reqwest (Supabase REST)
// 流程: 文件解析 → 字段映射/转换 → 分批 → 写入 → 校验
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 记录与结果类型
pub mod domain;

// 目标库层 - 远程数据访问
pub mod store;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 环境变量与运行参数
pub mod config;

// 表结构查看
pub mod schema;

// 表结构迁移助手（仅输出 SQL）
pub mod migration;

// 命令行参数
pub mod cli;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

pub use config::{ConfigError, ImportOptions, StoreConfig};
pub use domain::{
    Batch, BatchOutcome, BatchStatus, DestinationRecord, ImportOutcome, SourceRow, SourceTable,
    VerificationReport,
};
pub use importer::{
    ColumnMapping, CompanyImporter, ImportError, ImportPipeline, PipelineReport,
    RecordTransformer, UniversalFileParser,
};
pub use migration::{MigrationState, SchemaMigration};
pub use schema::{inspect_schema, SchemaReport};
pub use store::{DestinationStore, RestStore, StoreError};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "GCC 企业数据导入工具";

// 默认目标表
pub const DEFAULT_TABLE: &str = "gcc_companies";
