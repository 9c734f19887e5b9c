// ==========================================
// GCC 企业数据导入工具 - 单次导入运行参数
// ==========================================

use crate::config::error::ConfigError;
use std::path::PathBuf;

/// 默认每批记录数
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// 预演模式下预览的记录数
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// 导入管道运行参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    pub file: PathBuf,       // 数据文件路径
    pub table: String,       // 目标表
    pub batch_size: usize,   // 每批记录数（> 0）
    pub clear_first: bool,   // 导入前清空目标表
    pub dry_run: bool,       // 只解析+转换,不访问目标库
    pub preview_rows: usize, // 预演预览行数
}

impl ImportOptions {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            table: crate::DEFAULT_TABLE.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            clear_first: false,
            dry_run: false,
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub fn clear_first(mut self, clear_first: bool) -> Self {
        self.clear_first = clear_first;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// 校验表名（只允许 PostgREST 路径安全字符）
    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid = !self.table.is_empty()
            && self
                .table
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(ConfigError::InvalidValue {
                key: "table".to_string(),
                message: format!("表名只能包含字母、数字和下划线: {:?}", self.table),
            });
        }
        Ok(())
    }
}
