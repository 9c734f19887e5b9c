// ==========================================
// GCC 企业数据导入工具 - 导入层
// ==========================================
// 职责: 外部表格数据导入目标库
// 支持: Excel, JSON, CSV
// 流程: 解析 → 映射/转换 → 分批 → 写入 → 校验
// ==========================================

// 模块声明
pub mod batcher;
pub mod column_mapper;
pub mod company_importer;
pub mod error;
pub mod file_parser;
pub mod importer_trait;
pub mod pipeline;
pub mod transformer;

// 重导出核心类型
pub use batcher::batch;
pub use column_mapper::{ColumnMapping, GCC_COLUMN_MAPPING, GCC_NUMERIC_FIELDS};
pub use company_importer::{CompanyImporter, VERIFY_SAMPLE_COLUMNS, VERIFY_SAMPLE_LIMIT};
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, JsonParser, UniversalFileParser};
pub use pipeline::{preview_columns, ImportPipeline, PipelineReport, PREVIEW_COLUMNS};
pub use transformer::{coerce_integer, normalize_value, transform, RecordTransformer};

// 重导出 Trait 接口
pub use importer_trait::FileParser;
