// ==========================================
// GCC 企业数据导入工具 - 目标库凭据配置
// ==========================================
// 来源: 环境变量（进程启动时先加载 .env）
// ==========================================

use crate::config::error::ConfigError;
use std::fmt;
use tracing::debug;

/// 目标库地址变量名
pub const SUPABASE_URL_VAR: &str = "VITE_SUPABASE_URL";

/// 特权访问密钥变量名（绕过行级安全策略）
pub const SERVICE_ROLE_KEY_VAR: &str = "SUPABASE_SERVICE_ROLE_KEY";

/// 目标库连接凭据
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub url: String,
    pub service_role_key: String,
}

impl StoreConfig {
    /// 从进程环境读取（先尝试加载 .env,文件不存在不报错）
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "已加载 .env"),
            Err(e) => debug!(error = %e, "未加载 .env"),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 通过任意查找函数读取,两个变量都必须存在且非空
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let url = read(SUPABASE_URL_VAR);
        let key = read(SERVICE_ROLE_KEY_VAR);

        match (url, key) {
            (Some(url), Some(service_role_key)) => Ok(Self {
                url,
                service_role_key,
            }),
            (url, key) => {
                let mut missing = Vec::new();
                if url.is_none() {
                    missing.push(SUPABASE_URL_VAR);
                }
                if key.is_none() {
                    missing.push(SERVICE_ROLE_KEY_VAR);
                }
                Err(ConfigError::MissingVar { missing })
            }
        }
    }
}

// 密钥不进日志
impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("url", &self.url)
            .field("service_role_key", &"<redacted>")
            .finish()
    }
}
