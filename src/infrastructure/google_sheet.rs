//! Google 试算表数据源 - 基础设施层
//!
//! 通过 Sheets API v4 的 values 接口按工作表名称读取格式化后的文本，
//! 遇到限流时按递增间隔重试。

use super::sheet_source::SheetSource;
use crate::config::Config;
use crate::error::SourceError;
use crate::models::{Cell, RawSheet};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

const SHEETS_API_BASE_URL: &str = "https://sheets.googleapis.com";

/// `Retry-After` 最多等待的时间
const MAX_RETRY_AFTER: Duration = Duration::from_secs(60);

/// values 接口的响应体
///
/// 工作表全空时不会返回 `values` 字段。
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

/// Google 试算表数据源
pub struct GoogleSheetSource {
    client: Client,
    base_url: String,
    spreadsheet_id: String,
    api_key: String,
    max_retries: usize,
    retry_base_delay: Duration,
}

impl GoogleSheetSource {
    /// 根据配置创建数据源
    pub fn new(config: &Config) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| SourceError::request_failed(SHEETS_API_BASE_URL, e))?;

        Ok(Self {
            client,
            base_url: SHEETS_API_BASE_URL.to_string(),
            spreadsheet_id: config.spreadsheet_id.clone(),
            api_key: config.google_api_key.clone(),
            max_retries: config.max_retries,
            retry_base_delay: Duration::from_millis(config.retry_base_delay_ms),
        })
    }

    /// 替换接口地址（用于自建代理）
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// 工作表对应的 values 地址（不含 API key）
    fn endpoint(&self, sheet_name: &str) -> Result<Url, SourceError> {
        let invalid = |reason: String| SourceError::InvalidEndpoint {
            endpoint: self.base_url.clone(),
            reason,
        };

        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("地址不能包含路径段".to_string()))?
            .pop_if_empty()
            .extend([
                "v4",
                "spreadsheets",
                self.spreadsheet_id.as_str(),
                "values",
                a1_sheet_range(sheet_name).as_str(),
            ]);
        Ok(url)
    }

    /// 第 `attempt` 次重试前的等待时间（从 1 开始递增）
    fn backoff(&self, attempt: usize, retry_after: Option<u64>) -> Duration {
        let linear = self.retry_base_delay * attempt as u32;
        match retry_after {
            Some(secs) => linear.max(Duration::from_secs(secs).min(MAX_RETRY_AFTER)),
            None => linear,
        }
    }

    async fn fetch_values(&self, sheet_name: &str) -> Result<ValueRange, SourceError> {
        let url = self.endpoint(sheet_name)?;
        let endpoint = url.to_string();
        let mut last_status = None;
        let mut retry_after = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.backoff(attempt, retry_after.take());
                debug!("第 {} 次重试前等待 {:?}", attempt, delay);
                sleep(delay).await;
            }

            let response = self
                .client
                .get(url.clone())
                .query(&[("key", self.api_key.as_str())])
                .send()
                .await
                .map_err(|e| SourceError::request_failed(&endpoint, e))?;

            let status = response.status();
            if status.is_success() {
                return response
                    .json::<ValueRange>()
                    .await
                    .map_err(|e| SourceError::request_failed(&endpoint, e));
            }

            if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                retry_after = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.trim().parse::<u64>().ok());
                warn!(
                    "工作表 {} 读取受限 (状态码 {}, 尝试 {}/{})",
                    sheet_name,
                    status.as_u16(),
                    attempt + 1,
                    self.max_retries + 1
                );
                last_status = Some(status);
                continue;
            }

            if status == StatusCode::NOT_FOUND {
                return Err(SourceError::WorksheetNotFound {
                    sheet: sheet_name.to_string(),
                });
            }

            // 不存在的工作表返回 400 "Unable to parse range"
            if status == StatusCode::BAD_REQUEST {
                let body = response.text().await.unwrap_or_default();
                if body.contains("Unable to parse range") {
                    return Err(SourceError::WorksheetNotFound {
                        sheet: sheet_name.to_string(),
                    });
                }
            }

            return Err(SourceError::BadStatus {
                endpoint,
                status: status.as_u16(),
            });
        }

        warn!("工作表 {} 读取失败，已重试 {} 次", sheet_name, self.max_retries);
        match last_status {
            Some(status) if status.is_server_error() => Err(SourceError::BadStatus {
                endpoint,
                status: status.as_u16(),
            }),
            _ => Err(SourceError::RateLimited {
                endpoint,
                attempts: self.max_retries + 1,
            }),
        }
    }
}

impl SheetSource for GoogleSheetSource {
    async fn read(&self, sheet_name: &str) -> Result<RawSheet, SourceError> {
        debug!("读取 Google 工作表: {}", sheet_name);
        let range = self.fetch_values(sheet_name).await?;
        Ok(values_to_sheet(range.values))
    }
}

/// 整张工作表的 A1 范围，名称中的单引号需要成对转义
fn a1_sheet_range(sheet_name: &str) -> String {
    format!("'{}'", sheet_name.replace('\'', "''"))
}

fn values_to_sheet(values: Vec<Vec<Value>>) -> RawSheet {
    RawSheet::from_rows(
        values
            .into_iter()
            .map(|row| row.into_iter().map(value_to_cell).collect())
            .collect(),
    )
}

fn value_to_cell(value: Value) -> Cell {
    match value {
        Value::String(s) => Cell::text(s),
        Value::Number(n) => n.as_f64().map(Cell::Number).unwrap_or_default(),
        Value::Bool(b) => Cell::Bool(b),
        Value::Null | Value::Array(_) | Value::Object(_) => Cell::Empty,
    }
}
