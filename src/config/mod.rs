// ==========================================
// GCC 企业数据导入工具 - 配置层
// ==========================================
// 职责: 读取目标库凭据（环境变量 / .env）与单次运行参数
// 红线: 凭据缺失在任何网络调用之前报错
// ==========================================

pub mod error;
pub mod import_options;
pub mod store_config;

// 重导出核心配置类型
pub use error::ConfigError;
pub use import_options::{ImportOptions, DEFAULT_BATCH_SIZE, DEFAULT_PREVIEW_ROWS};
pub use store_config::{StoreConfig, SERVICE_ROLE_KEY_VAR, SUPABASE_URL_VAR};
