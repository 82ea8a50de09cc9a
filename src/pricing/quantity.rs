use thiserror::Error;

use crate::inventory::SlabRecord;
use crate::units::{convert_area, AreaUnit};

/// 요청 면적 또는 슬랩 면적이 견적에 쓸 수 없는 경우.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantityError {
    /// 0 이하이거나 숫자가 아닌 요청 면적
    #[error("요청 면적은 0보다 커야 합니다: {0}")]
    NonPositive(f64),
    /// 최소 주문 면적 미만
    #[error("요청 면적 {requested} sqft 가 최소 {minimum} sqft 보다 작습니다")]
    BelowMinimum { requested: f64, minimum: f64 },
    /// 가용 면적이 없는 슬랩
    #[error("슬랩 #{serial} 의 가용 면적이 없습니다")]
    SlabWithoutArea { serial: u64 },
}

/// 검증을 통과한 요청 면적. 내부 단위는 sqft이다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequestedArea {
    sq_ft: f64,
}

impl RequestedArea {
    pub fn sq_ft(&self) -> f64 {
        self.sq_ft
    }
}

/// 입력 단위의 면적을 sqft로 환산하고 최소 면적 조건을 검사한다.
pub fn validate_requested_area(
    value: f64,
    unit: AreaUnit,
    min_sq_ft: f64,
) -> Result<RequestedArea, QuantityError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(QuantityError::NonPositive(value));
    }
    let sq_ft = convert_area(value, unit, AreaUnit::SquareFoot);
    if sq_ft < min_sq_ft {
        return Err(QuantityError::BelowMinimum {
            requested: sq_ft,
            minimum: min_sq_ft,
        });
    }
    Ok(RequestedArea { sq_ft })
}

/// 슬랩이 견적 대상이 될 수 있는지 검사한다.
pub fn ensure_slab_has_area(slab: &SlabRecord) -> Result<(), QuantityError> {
    if slab.has_area() {
        Ok(())
    } else {
        Err(QuantityError::SlabWithoutArea {
            serial: slab.serial_number,
        })
    }
}

/// 요청 면적이 슬랩 가용 면적을 넘는지 여부. 경고 표시에만 쓴다.
pub fn exceeds_available(area: RequestedArea, slab: &SlabRecord) -> bool {
    area.sq_ft > slab.available_area
}
