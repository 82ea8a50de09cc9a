use super::record::SlabRecord;
use super::source::{InventorySource, SourceError};
use super::table::ColumnAliases;

/// 마지막으로 불러온 재고 표를 보관한다.
///
/// 한 번 불러와 여러 번 읽고, `reload`는 표를 통째로 교체한다. 가져오기에
/// 실패하면 표는 비고 마지막 오류 메시지만 남는다.
pub struct InventoryCache {
    source: Box<dyn InventorySource>,
    columns: ColumnAliases,
    records: Vec<SlabRecord>,
    loaded: bool,
    last_error: Option<String>,
}

impl InventoryCache {
    pub fn new(source: Box<dyn InventorySource>, columns: ColumnAliases) -> Self {
        Self {
            source,
            columns,
            records: Vec::new(),
            loaded: false,
            last_error: None,
        }
    }

    /// 공급자에서 다시 읽는다. 오류는 호출자가 메시지로 보여줄 수 있도록 그대로 돌려준다.
    pub fn reload(&mut self) -> Result<usize, SourceError> {
        self.loaded = true;
        match self.source.fetch(&self.columns) {
            Ok(records) => {
                tracing::info!(
                    source = %self.source.describe(),
                    rows = records.len(),
                    "inventory loaded"
                );
                self.records = records;
                self.last_error = None;
                Ok(self.records.len())
            }
            Err(err) => {
                tracing::warn!(source = %self.source.describe(), error = %err, "inventory load failed");
                self.records.clear();
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// 아직 불러오지 않았다면 불러온 뒤 레코드를 돌려준다. 실패해도 빈 표를 돌려준다.
    pub fn records(&mut self) -> &[SlabRecord] {
        if !self.loaded {
            let _ = self.reload();
        }
        &self.records
    }

    /// 이미 불러온 레코드. 불러오지 않았으면 빈 슬라이스.
    pub fn cached(&self) -> &[SlabRecord] {
        &self.records
    }

    /// 보관 중인 표를 버린다. 다음 `records` 호출 때 다시 불러온다.
    pub fn invalidate(&mut self) {
        self.records.clear();
        self.loaded = false;
        self.last_error = None;
    }

    /// 공급자를 교체한다. 표는 무효화된다.
    pub fn replace_source(&mut self, source: Box<dyn InventorySource>) {
        self.source = source;
        self.invalidate();
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn source_description(&self) -> String {
        self.source.describe()
    }
}
