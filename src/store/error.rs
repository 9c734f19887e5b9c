// ==========================================
// GCC 企业数据导入工具 - 目标库错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 目标库访问错误类型
#[derive(Error, Debug)]
pub enum StoreError {
    // ===== 传输错误 =====
    #[error("HTTP 请求失败: {0}")]
    Http(#[from] reqwest::Error),

    // ===== 服务端错误 =====
    #[error("目标库返回错误 (status={status}): {message}")]
    Api { status: u16, message: String },

    // ===== 数据错误 =====
    #[error("响应解析失败: {0}")]
    Decode(String),

    // ===== 配置错误 =====
    #[error("无效的目标库地址: {0}")]
    InvalidUrl(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Decode(err.to_string())
    }
}

/// Result 类型别名
pub type StoreResult<T> = Result<T, StoreError>;
