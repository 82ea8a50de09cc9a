//! 게시된 CSV 내보내기(HTTP)와 로컬 CSV 파일 공급자.

use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Url;

use super::source::{InventorySource, SourceError};
use super::table::RawTable;

/// CSV 본문을 표로 읽는다. 셀과 헤더의 앞뒤 공백은 제거하고 행 길이는 맞추지 않는다.
pub fn parse_csv_table<R: Read>(reader: R) -> Result<RawTable, SourceError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();
    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(RawTable { headers, rows })
}

/// 인증 없이 공개된 CSV 주소에서 재고를 읽는다.
pub struct CsvUrlSource {
    url: Url,
    client: Client,
}

impl CsvUrlSource {
    /// 주소 형식이 잘못되면 요청 전에 `InvalidUrl`로 실패한다.
    pub fn new(url: String, timeout: Duration) -> Result<Self, SourceError> {
        let url = Url::parse(url.trim()).map_err(|e| SourceError::InvalidUrl(format!("{url}: {e}")))?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { url, client })
    }
}

impl InventorySource for CsvUrlSource {
    fn describe(&self) -> String {
        format!("CSV {}", self.url)
    }

    fn fetch_table(&self) -> Result<RawTable, SourceError> {
        let response = self.client.get(self.url.clone()).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
            });
        }
        let body = response.bytes()?;
        parse_csv_table(body.as_ref())
    }
}

/// 로컬 CSV 파일 공급자. 오프라인 작업과 GUI의 파일 열기에 쓴다.
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl InventorySource for CsvFileSource {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    fn fetch_table(&self) -> Result<RawTable, SourceError> {
        let file = std::fs::File::open(&self.path)?;
        parse_csv_table(file)
    }
}
