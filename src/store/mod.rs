// ==========================================
// GCC 企业数据导入工具 - 目标库访问层
// ==========================================
// 红线: 目标库层不含业务逻辑,只做 select/insert/delete
// ==========================================
// 职责: 提供目标库访问接口,屏蔽 REST 细节
// 实现: RestStore（Supabase/PostgREST,基于 reqwest）
// ==========================================

pub mod destination_store;
pub mod error;
pub mod rest_store;

// 重导出核心类型
pub use destination_store::{
    DestinationStore, Filter, InsertResponse, SelectQuery, SelectResponse,
};
pub use error::{StoreError, StoreResult};
pub use rest_store::RestStore;
