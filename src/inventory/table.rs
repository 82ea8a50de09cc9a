use serde::{Deserialize, Serialize};

use super::record::{RawSlabFields, SlabRecord};
use super::source::SourceError;

/// 공급자가 돌려주는 가공 전 표. 첫 행은 헤더이다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// 필드별로 허용하는 열 이름 목록. 피드마다 열 이름이 달라서 별칭으로 맞춘다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnAliases {
    pub location: Vec<String>,
    pub thickness: Vec<String>,
    pub color: Vec<String>,
    pub unit_cost: Vec<String>,
    pub on_hand_cost: Vec<String>,
    pub available_area: Vec<String>,
    pub serial_number: Vec<String>,
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for ColumnAliases {
    fn default() -> Self {
        Self {
            location: names(&["Location", "Branch", "Warehouse"]),
            thickness: names(&["Thickness", "Thk"]),
            color: names(&["Color", "Colour"]),
            unit_cost: names(&["Unit Cost", "Cost/SqFt", "Price per SqFt", "unit_cost"]),
            on_hand_cost: names(&["Serialized On Hand Cost", "On Hand Cost", "on_hand_cost"]),
            available_area: names(&[
                "Available Qty",
                "Available Area",
                "Available SqFt",
                "available_area",
            ]),
            serial_number: names(&["Serial Number", "Serial", "serial_number"]),
        }
    }
}

/// 헤더에서 찾은 열 위치.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    location: usize,
    thickness: usize,
    color: usize,
    available_area: usize,
    unit_cost: Option<usize>,
    on_hand_cost: Option<usize>,
    serial_number: Option<usize>,
}

fn find_column(headers: &[String], aliases: &[String]) -> Option<usize> {
    aliases.iter().find_map(|alias| {
        let alias = alias.trim();
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(alias))
    })
}

fn require_column(
    headers: &[String],
    aliases: &[String],
    field: &'static str,
) -> Result<usize, SourceError> {
    find_column(headers, aliases).ok_or(SourceError::MissingColumn(field))
}

impl ColumnIndex {
    fn resolve(headers: &[String], aliases: &ColumnAliases) -> Result<Self, SourceError> {
        Ok(Self {
            location: require_column(headers, &aliases.location, "location")?,
            thickness: require_column(headers, &aliases.thickness, "thickness")?,
            color: require_column(headers, &aliases.color, "color")?,
            available_area: require_column(headers, &aliases.available_area, "available_area")?,
            unit_cost: find_column(headers, &aliases.unit_cost),
            on_hand_cost: find_column(headers, &aliases.on_hand_cost),
            serial_number: find_column(headers, &aliases.serial_number),
        })
    }
}

impl RawTable {
    /// 별칭으로 열을 찾아 슬랩 레코드로 정규화한다. 완전히 빈 행은 건너뛴다.
    pub fn into_records(self, aliases: &ColumnAliases) -> Result<Vec<SlabRecord>, SourceError> {
        if self.headers.is_empty() {
            return Ok(Vec::new());
        }
        let idx = ColumnIndex::resolve(&self.headers, aliases)?;
        let records = self
            .rows
            .iter()
            .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
            .map(|row| {
                // 시트 API는 뒤쪽 빈 셀을 잘라서 보내므로 행 길이가 짧을 수 있다.
                let cell = |i: usize| row.get(i).map(String::as_str).unwrap_or("");
                RawSlabFields {
                    location: cell(idx.location),
                    thickness: cell(idx.thickness),
                    color: cell(idx.color),
                    unit_cost: idx.unit_cost.map(cell),
                    on_hand_cost: idx.on_hand_cost.map(cell),
                    available_area: Some(cell(idx.available_area)),
                    serial_number: idx.serial_number.map(cell),
                }
                .into_record()
            })
            .collect();
        Ok(records)
    }
}
