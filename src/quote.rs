//! 슬랩 선택 → 면적 검증 → 견적 계산을 한 번에 수행한다.

use thiserror::Error;

use crate::config::Config;
use crate::inventory::{select_slab, Selection, SelectionError, SlabQuery, SlabRecord};
use crate::pricing::{
    ensure_slab_has_area, exceeds_available, validate_requested_area, CostBreakdown, QuantityError,
};
use crate::units::AreaUnit;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuoteError {
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    Quantity(#[from] QuantityError),
}

/// 화면에서 받은 견적 요청.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRequest {
    pub query: SlabQuery,
    pub area: f64,
    pub unit: AreaUnit,
}

/// 화면에 그릴 견적 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub selection: Selection,
    pub plant: String,
    pub area_sq_ft: f64,
    pub breakdown: CostBreakdown,
    /// 요청 면적이 선택 슬랩의 가용 면적보다 크면 true (경고만 표시)
    pub exceeds_available: bool,
}

impl Quote {
    pub fn slab(&self) -> &SlabRecord {
        &self.selection.slab
    }
}

/// 재고 표에서 슬랩을 고르고 견적을 계산한다.
pub fn prepare_quote(
    records: &[SlabRecord],
    request: &QuoteRequest,
    cfg: &Config,
) -> Result<Quote, QuoteError> {
    let selection = select_slab(records, &request.query)?;
    ensure_slab_has_area(&selection.slab)?;
    let area = validate_requested_area(request.area, request.unit, cfg.min_area_sqft)?;

    let breakdown = CostBreakdown::for_slab(&selection.slab, area.sq_ft(), &cfg.rates);
    let plant = cfg.plants.plant_for(&selection.slab.location).to_string();
    let exceeds = exceeds_available(area, &selection.slab);
    tracing::info!(
        serial = selection.slab.serial_number,
        location = %selection.slab.location,
        plant = %plant,
        sq_ft = area.sq_ft(),
        total = breakdown.total_customer_base,
        "quote computed"
    );
    Ok(Quote {
        selection,
        plant,
        area_sq_ft: area.sq_ft(),
        breakdown,
        exceeds_available: exceeds,
    })
}
