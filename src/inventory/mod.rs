//! 재고 피드 로딩, 캐시, 단계별 슬랩 선택.

pub mod cache;
pub mod csv_source;
pub mod record;
pub mod selection;
pub mod sheets;
pub mod source;
pub mod table;

pub use cache::InventoryCache;
pub use csv_source::{parse_csv_table, CsvFileSource, CsvUrlSource};
pub use record::SlabRecord;
pub use selection::*;
pub use sheets::SheetsApiSource;
pub use source::{build_source, InventorySource, SourceError};
pub use table::{ColumnAliases, RawTable};
