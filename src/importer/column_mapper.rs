// ==========================================
// GCC 企业数据导入工具 - 字段映射表
// ==========================================
// 职责: 源文件列名 → gcc_companies 字段名 + 整数字段集合
// 红线: 映射表是目标字段名的唯一来源,源列名中的拼写错误按原样保留
// ==========================================

use std::collections::{HashMap, HashSet};

/// gcc_companies 标准映射（源列名, 目标字段名）
///
/// "Totoal GCC Centers" 是源表头的原始拼写;
/// "Years Established in India " 末尾带空格。
pub const GCC_COLUMN_MAPPING: &[(&str, &str)] = &[
    ("Account Global Legal Name", "account_global_legal_name"),
    ("Revenue Range", "revenue_range"),
    ("HQ Country", "hq_country"),
    ("HQ Region", "hq_region"),
    ("Website", "website"),
    ("Industry", "industry"),
    ("Category", "category"),
    ("Total Centers", "total_centers"),
    ("Totoal GCC Centers", "total_gcc_centers"),
    ("Total Excl GCC Centers", "total_excl_gcc_centers"),
    (
        "Aggregate India Employees Range",
        "aggregate_india_employees_range",
    ),
    ("Location", "location"),
    ("Years Established in India ", "years_established_in_india"),
    ("Years in India", "years_in_india"),
    ("Primary City", "primary_city"),
    ("Secondary City", "secondary_city"),
    ("Services Offered", "services_offered"),
];

/// 必须为整数的目标字段
pub const GCC_NUMERIC_FIELDS: &[&str] =
    &["total_centers", "total_gcc_centers", "total_excl_gcc_centers"];

// ==========================================
// ColumnMapping - 字段映射（静态键值查找）
// ==========================================
#[derive(Debug, Clone)]
pub struct ColumnMapping {
    entries: Vec<(String, String)>,      // 声明顺序
    by_source: HashMap<String, usize>,   // 精确列名 → entries 下标
    by_trimmed: HashMap<String, usize>,  // 去空白列名 → entries 下标
    destinations: HashSet<String>,       // 目标字段集合
    numeric_fields: HashSet<String>,     // 整数字段集合
}

impl ColumnMapping {
    pub fn new<S, D, N>(entries: &[(S, D)], numeric_fields: &[N]) -> Self
    where
        S: AsRef<str>,
        D: AsRef<str>,
        N: AsRef<str>,
    {
        let entries: Vec<(String, String)> = entries
            .iter()
            .map(|(s, d)| (s.as_ref().to_string(), d.as_ref().to_string()))
            .collect();

        let mut by_source = HashMap::new();
        let mut by_trimmed = HashMap::new();
        for (idx, (source, _)) in entries.iter().enumerate() {
            by_source.entry(source.clone()).or_insert(idx);
            by_trimmed.entry(source.trim().to_string()).or_insert(idx);
        }

        let destinations = entries.iter().map(|(_, d)| d.clone()).collect();
        let numeric_fields = numeric_fields
            .iter()
            .map(|n| n.as_ref().to_string())
            .collect();

        Self {
            entries,
            by_source,
            by_trimmed,
            destinations,
            numeric_fields,
        }
    }

    /// gcc_companies 标准映射
    pub fn gcc_companies() -> Self {
        Self::new(GCC_COLUMN_MAPPING, GCC_NUMERIC_FIELDS)
    }

    /// 查找源列名对应的目标字段
    ///
    /// 先精确匹配;不命中时按去除首尾空白后的列名再匹配一次。
    pub fn destination_for(&self, source: &str) -> Option<&str> {
        self.by_source
            .get(source)
            .or_else(|| self.by_trimmed.get(source.trim()))
            .map(|&idx| self.entries[idx].1.as_str())
    }

    /// 源列名是否与映射表中的列名完全一致
    pub fn is_exact_source(&self, source: &str) -> bool {
        self.by_source.contains_key(source)
    }

    pub fn is_destination(&self, field: &str) -> bool {
        self.destinations.contains(field)
    }

    pub fn is_numeric(&self, field: &str) -> bool {
        self.numeric_fields.contains(field)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(s, d)| (s.as_str(), d.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self::gcc_companies()
    }
}
