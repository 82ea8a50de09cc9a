use std::time::Duration;

use thiserror::Error;

use super::csv_source::{CsvFileSource, CsvUrlSource};
use super::record::SlabRecord;
use super::sheets::SheetsApiSource;
use super::table::{ColumnAliases, RawTable};
use crate::config::SourceConfig;

/// 재고 피드를 가져오거나 해석하지 못한 경우.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("재고 요청 실패: {0}")]
    Http(#[from] reqwest::Error),

    #[error("재고 서버 응답 오류: HTTP {status}")]
    Status { status: u16 },

    #[error("CSV 해석 오류: {0}")]
    Csv(#[from] csv::Error),

    #[error("시트 응답 해석 오류: {0}")]
    Json(#[from] serde_json::Error),

    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),

    #[error("잘못된 주소: {0}")]
    InvalidUrl(String),

    #[error("환경 변수 {0} 에 시트 접근 토큰이 없습니다")]
    MissingToken(String),

    #[error("필수 열을 찾을 수 없습니다: {0}")]
    MissingColumn(&'static str),
}

/// 재고 표를 제공하는 공급자. CSV 주소, 스프레드시트 API, 로컬 파일 구현이 있다.
pub trait InventorySource {
    /// 로그와 화면에 보여줄 짧은 설명.
    fn describe(&self) -> String;

    /// 원본 표를 가져온다. 블로킹 호출이다.
    fn fetch_table(&self) -> Result<RawTable, SourceError>;

    /// 표를 가져와 슬랩 레코드로 정규화한다.
    fn fetch(&self, columns: &ColumnAliases) -> Result<Vec<SlabRecord>, SourceError> {
        self.fetch_table()?.into_records(columns)
    }
}

/// 설정에 맞는 공급자를 만든다.
pub fn build_source(
    cfg: &SourceConfig,
    timeout: Duration,
) -> Result<Box<dyn InventorySource>, SourceError> {
    let source: Box<dyn InventorySource> = match cfg {
        SourceConfig::CsvUrl { url } => Box::new(CsvUrlSource::new(url.clone(), timeout)?),
        SourceConfig::SheetsApi {
            base_url,
            sheet_id,
            tab,
            token_env,
        } => {
            let token = std::env::var(token_env).ok().filter(|t| !t.trim().is_empty());
            Box::new(SheetsApiSource::new(
                base_url.clone(),
                sheet_id.clone(),
                tab.clone(),
                token_env.clone(),
                token,
                timeout,
            )?)
        }
        SourceConfig::CsvFile { path } => Box::new(CsvFileSource::new(path.clone())),
    };
    tracing::debug!(source = %source.describe(), "inventory source configured");
    Ok(source)
}
