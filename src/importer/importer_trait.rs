// ==========================================
// GCC 企业数据导入工具 - 导入组件 Trait
// ==========================================
// 职责: 定义文件解析接口（不包含实现）
// ==========================================

use crate::domain::SourceTable;
use crate::importer::error::ImportResult;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 1）
// 实现者: CsvParser, ExcelParser, JsonParser
pub trait FileParser: Send + Sync {
    /// 解析整个文件为行式内存表
    ///
    /// # 返回
    /// - Ok(SourceTable): 完整表（保持行序与列序）
    /// - Err: 文件不存在、格式不支持或解析失败（不返回部分结果）
    fn parse_to_table(&self, file_path: &Path) -> ImportResult<SourceTable>;

    /// 该解析器接受的扩展名（小写,不含点）
    fn extensions(&self) -> &'static [&'static str];
}
