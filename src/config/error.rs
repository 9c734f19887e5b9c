// ==========================================
// GCC 企业数据导入工具 - 配置错误类型
// ==========================================

use thiserror::Error;

/// 配置错误（致命,运行前检查）
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("缺少环境变量: {}（请在 .env 中配置 VITE_SUPABASE_URL 与 SUPABASE_SERVICE_ROLE_KEY）", .missing.join(", "))]
    MissingVar { missing: Vec<&'static str> },

    #[error("配置值格式错误 (key: {key}): {message}")]
    InvalidValue { key: String, message: String },
}
