// ==========================================
// 集成测试辅助工具
// ==========================================
// 职责: 内存目标库 MockStore + 临时数据文件
// ==========================================

#![allow(dead_code)]

pub mod mock_store;

use std::io::Write;
use tempfile::{Builder, NamedTempFile};

pub use mock_store::{MockStore, StoreCall};

/// 写入带指定后缀的临时数据文件
pub fn temp_data_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = Builder::new()
        .prefix("gcc_companies_")
        .suffix(suffix)
        .tempfile()
        .expect("创建临时文件失败");
    write!(file, "{}", content).expect("写入临时文件失败");
    file
}

/// 生成 n 行 CSV（Totoal GCC Centers 为行号）
pub fn csv_with_rows(n: usize) -> String {
    let mut content =
        String::from("Account Global Legal Name,Industry,Primary City,Totoal GCC Centers\n");
    for i in 1..=n {
        content.push_str(&format!("Company {},IT,Pune,{}\n", i, i));
    }
    content
}
