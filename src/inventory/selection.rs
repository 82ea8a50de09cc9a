use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use thiserror::Error;

use super::record::SlabRecord;

/// 단계별 필터: 지점 → 두께 → 색상.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStage {
    Location,
    Thickness,
    Color,
}

impl fmt::Display for SelectionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SelectionStage::Location => "location",
            SelectionStage::Thickness => "thickness",
            SelectionStage::Color => "color",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// 재고 표가 비었거나 가용 면적이 있는 슬랩이 없다.
    #[error("선택 가능한 재고가 없습니다")]
    NoInventory,
    /// 해당 단계에서 일치하는 행이 없다.
    #[error("{stage} 조건 '{value}' 에 맞는 슬랩이 없습니다")]
    Empty { stage: SelectionStage, value: String },
}

/// 사용자가 고른 필터 값.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlabQuery {
    pub location: String,
    pub thickness: String,
    pub color: String,
}

/// 선택 결과. 첫 번째 일치 슬랩과 일치한 슬랩 전체의 요약을 담는다.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub slab: SlabRecord,
    pub matched: usize,
    pub total_available_area: f64,
}

fn selectable(records: &[SlabRecord]) -> impl Iterator<Item = &SlabRecord> {
    records.iter().filter(|r| r.has_area())
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// 지점 드롭다운 목록.
pub fn location_options(records: &[SlabRecord]) -> Vec<String> {
    distinct(selectable(records).map(|r| r.location.as_str()))
}

/// 선택된 지점에서 고를 수 있는 두께 목록.
pub fn thickness_options(records: &[SlabRecord], location: &str) -> Vec<String> {
    let location = location.trim();
    distinct(
        selectable(records)
            .filter(|r| r.location == location)
            .map(|r| r.thickness.as_str()),
    )
}

/// 선택된 지점/두께에서 고를 수 있는 색상 목록.
pub fn color_options(records: &[SlabRecord], location: &str, thickness: &str) -> Vec<String> {
    let (location, thickness) = (location.trim(), thickness.trim());
    distinct(
        selectable(records)
            .filter(|r| r.location == location && r.thickness == thickness)
            .map(|r| r.color.as_str()),
    )
}

/// 세 단계 필터를 차례로 적용해 슬랩을 고른다. 어느 단계든 비면 실패한다.
pub fn select_slab(records: &[SlabRecord], query: &SlabQuery) -> Result<Selection, SelectionError> {
    let pool: Vec<&SlabRecord> = selectable(records).collect();
    if pool.is_empty() {
        return Err(SelectionError::NoInventory);
    }

    let stages = [
        (SelectionStage::Location, query.location.trim()),
        (SelectionStage::Thickness, query.thickness.trim()),
        (SelectionStage::Color, query.color.trim()),
    ];
    let mut remaining = pool;
    for (stage, value) in stages {
        remaining.retain(|r| {
            let field = match stage {
                SelectionStage::Location => &r.location,
                SelectionStage::Thickness => &r.thickness,
                SelectionStage::Color => &r.color,
            };
            field == value
        });
        if remaining.is_empty() {
            tracing::debug!(%stage, value, "selection stage empty");
            return Err(SelectionError::Empty {
                stage,
                value: value.to_string(),
            });
        }
    }

    let total_available_area = remaining.iter().map(|r| r.available_area).sum();
    Ok(Selection {
        slab: remaining[0].clone(),
        matched: remaining.len(),
        total_available_area,
    })
}

/// 지점/두께/색상 조합별 재고 요약.
#[derive(Debug, Clone, PartialEq)]
pub struct StockSummary {
    pub location: String,
    pub thickness: String,
    pub color: String,
    pub slabs: usize,
    pub total_area: f64,
}

/// 선택 가능한 슬랩을 조합별로 묶는다. 지점 → 두께 → 색상 순으로 정렬된다.
pub fn summarize(records: &[SlabRecord]) -> Vec<StockSummary> {
    let mut groups: BTreeMap<(&str, &str, &str), (usize, f64)> = BTreeMap::new();
    for r in selectable(records) {
        let entry = groups
            .entry((r.location.as_str(), r.thickness.as_str(), r.color.as_str()))
            .or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += r.available_area;
    }
    groups
        .into_iter()
        .map(|((location, thickness, color), (slabs, total_area))| StockSummary {
            location: location.to_string(),
            thickness: thickness.to_string(),
            color: color.to_string(),
            slabs,
            total_area,
        })
        .collect()
}
