// ==========================================
// GCC 企业数据导入工具 - REST 目标库实现
// ==========================================
// 协议: Supabase REST (PostgREST) - {url}/rest/v1/{table}
// 认证: apikey + Authorization: Bearer <service_role_key>
// ==========================================

use crate::config::StoreConfig;
use crate::domain::DestinationRecord;
use crate::store::destination_store::{
    DestinationStore, Filter, InsertResponse, SelectQuery, SelectResponse,
};
use crate::store::error::{StoreError, StoreResult};
use async_trait::async_trait;
use reqwest::header::CONTENT_RANGE;
use reqwest::{Client, Method, RequestBuilder, Response};
use tracing::{debug, instrument};

/// REST 目标库客户端
///
/// 每次调用只发出一个请求,不做重试;超时沿用 reqwest 默认值。
pub struct RestStore {
    base_url: String,
    api_key: String,
    http: Client,
}

impl RestStore {
    pub fn new(config: &StoreConfig) -> StoreResult<Self> {
        let base_url = config.url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(StoreError::InvalidUrl(config.url.clone()));
        }

        let http = Client::builder().build()?;

        Ok(Self {
            base_url,
            api_key: config.service_role_key.clone(),
            http,
        })
    }

    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.http
            .request(method, self.table_url(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// 非 2xx 响应转换为 StoreError::Api
    async fn check_status(response: Response) -> StoreResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Api {
            status: status.as_u16(),
            message: api_error_message(&body),
        })
    }
}

#[async_trait]
impl DestinationStore for RestStore {
    #[instrument(skip(self, query), fields(select = %query.select_clause()))]
    async fn select(&self, table: &str, query: &SelectQuery) -> StoreResult<SelectResponse> {
        let mut params = vec![("select".to_string(), query.select_clause())];
        if let Some(limit) = query.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }

        let mut request = self.request(Method::GET, table).query(&params);
        if query.count_exact {
            request = request.header("Prefer", "count=exact");
        }

        let response = Self::check_status(request.send().await?).await?;

        let count = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total);

        let body = response.text().await?;
        let rows: Vec<DestinationRecord> = parse_rows(&body)?;
        debug!(rows = rows.len(), count = ?count, "查询完成");

        Ok(SelectResponse { rows, count })
    }

    #[instrument(skip(self, records), fields(records = records.len()))]
    async fn insert(
        &self,
        table: &str,
        records: Vec<DestinationRecord>,
    ) -> StoreResult<InsertResponse> {
        let request = self
            .request(Method::POST, table)
            .header("Prefer", "return=representation")
            .json(&records);

        let response = Self::check_status(request.send().await?).await?;
        let body = response.text().await?;

        if body.trim().is_empty() {
            return Ok(InsertResponse { data: None });
        }

        Ok(InsertResponse {
            data: Some(parse_rows(&body)?),
        })
    }

    #[instrument(skip(self))]
    async fn delete(&self, table: &str, filter: &Filter) -> StoreResult<()> {
        let request = self
            .request(Method::DELETE, table)
            .query(&[filter.to_query_pair()]);

        Self::check_status(request.send().await?).await?;
        Ok(())
    }
}

// ==========================================
// 响应解析辅助函数
// ==========================================

/// 解析 Content-Range 中的总行数（"0-2/57" → 57, "*/0" → 0, "0-2/*" → None）
pub fn parse_content_range_total(header: &str) -> Option<u64> {
    let (_, total) = header.rsplit_once('/')?;
    total.trim().parse::<u64>().ok()
}

/// 提取错误响应中的 message 字段,非 JSON 时原样返回
pub fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

fn parse_rows(body: &str) -> StoreResult<Vec<DestinationRecord>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(body).map_err(|e| StoreError::Decode(format!("期望 JSON 数组: {}", e)))
}
