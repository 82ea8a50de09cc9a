//! 스프레드시트 값 API(v4 `values.get`) 공급자.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Url;
use serde::Deserialize;

use super::source::{InventorySource, SourceError};
use super::table::RawTable;

pub const DEFAULT_SHEETS_BASE_URL: &str = "https://sheets.googleapis.com";

/// `values.get` 응답 중 필요한 부분.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

/// 시트 ID와 탭 이름으로 탭 전체 행을 읽는다. 베어러 토큰이 필요하다.
pub struct SheetsApiSource {
    base_url: String,
    sheet_id: String,
    tab: String,
    token_env: String,
    token: Option<String>,
    client: Client,
}

impl SheetsApiSource {
    pub fn new(
        base_url: String,
        sheet_id: String,
        tab: String,
        token_env: String,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url,
            sheet_id,
            tab,
            token_env,
            token,
            client,
        })
    }

    fn values_url(&self) -> Result<Url, SourceError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| SourceError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| SourceError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.sheet_id.as_str(), "values", self.tab.as_str()]);
        Ok(url)
    }
}

fn cell_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// 응답의 첫 행을 헤더로, 나머지를 데이터 행으로 나눈다.
fn value_range_to_table(range: ValueRange) -> RawTable {
    let mut rows = range
        .values
        .into_iter()
        .map(|row| row.into_iter().map(cell_to_string).collect::<Vec<_>>());
    let headers = rows
        .next()
        .map(|h| h.into_iter().map(|c| c.trim().to_string()).collect())
        .unwrap_or_default();
    RawTable {
        headers,
        rows: rows.collect(),
    }
}

impl InventorySource for SheetsApiSource {
    fn describe(&self) -> String {
        format!("sheet {} / {}", self.sheet_id, self.tab)
    }

    fn fetch_table(&self) -> Result<RawTable, SourceError> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| SourceError::MissingToken(self.token_env.clone()))?;
        let url = self.values_url()?;
        let response = self.client.get(url).bearer_auth(token).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
            });
        }
        let body = response.text()?;
        let range: ValueRange = serde_json::from_str(&body)?;
        Ok(value_range_to_table(range))
    }
}
