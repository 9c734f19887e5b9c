// ==========================================
// GCC 企业数据导入工具 - 领域模型层
// ==========================================
// 职责: 定义源表/目标记录、批次与导入结果类型
// 红线: 不含数据访问逻辑,不含转换逻辑
// ==========================================

pub mod company;
pub mod import;

// 重导出核心类型
pub use company::{DestinationRecord, SourceRow, SourceTable};
pub use import::{Batch, BatchOutcome, BatchStatus, ImportOutcome, VerificationReport};
