use serde::{Deserialize, Serialize};

use crate::inventory::SlabRecord;

/// 운영자가 설정하는 단가 파라미터. 세션 동안 변경되지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostParameters {
    /// 자재 단가에 곱하는 고객 판매용 마크업 배수
    pub markup_factor: f64,
    /// 가공비 [통화 / sqft]
    pub fabrication_cost_per_sqft: f64,
    /// 시공비 [통화 / sqft]
    pub install_cost_per_sqft: f64,
    /// 내부(IB) 원가 산정용 자재 마크업 배수
    pub ib_material_markup: f64,
}

impl Default for CostParameters {
    fn default() -> Self {
        Self {
            markup_factor: 1.3,
            fabrication_cost_per_sqft: 12.0,
            install_cost_per_sqft: 8.0,
            ib_material_markup: 1.1,
        }
    }
}

impl CostParameters {
    /// 음수이거나 유한하지 않은 값이 있으면 해당 필드 이름을 돌려준다.
    pub fn first_invalid_field(&self) -> Option<&'static str> {
        let fields = [
            ("markup_factor", self.markup_factor),
            ("fabrication_cost_per_sqft", self.fabrication_cost_per_sqft),
            ("install_cost_per_sqft", self.install_cost_per_sqft),
            ("ib_material_markup", self.ib_material_markup),
        ];
        fields
            .iter()
            .find(|(_, v)| !v.is_finite() || *v < 0.0)
            .map(|(name, _)| *name)
    }
}

/// 견적 결과. 네 항목 모두 입력 단가와 같은 통화 단위이다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostBreakdown {
    /// 자재 + 가공
    pub material_and_fab: f64,
    /// 시공
    pub install_cost: f64,
    /// 내부 원가. 고객 합계에 포함되지 않으며 고객 화면에 표시하면 안 된다.
    pub ib_cost: f64,
    /// 고객 기준 합계 = 자재+가공 + 시공
    pub total_customer_base: f64,
}

/// 고객에게 보여줄 수 있는 항목만 담은 견적.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CustomerQuote {
    pub material_and_fab: f64,
    pub install_cost: f64,
    pub total_customer_base: f64,
}

impl CostBreakdown {
    /// 슬랩 레코드의 단가로 견적을 계산한다.
    pub fn for_slab(slab: &SlabRecord, sq_ft: f64, params: &CostParameters) -> Self {
        compute_cost(Some(slab.unit_cost), sq_ft, params)
    }

    /// IB 원가를 제외한 고객용 견적.
    pub fn customer_view(&self) -> CustomerQuote {
        CustomerQuote {
            material_and_fab: self.material_and_fab,
            install_cost: self.install_cost,
            total_customer_base: self.total_customer_base,
        }
    }
}

/// 요청 면적에 대한 견적을 계산한다.
///
/// 순수 함수이며 반올림하지 않는다. 단가가 없으면 0으로 취급한다.
/// `sq_ft`는 검증하지 않으므로 호출 측에서 양수임을 보장해야 한다
/// ([`crate::pricing::validate_requested_area`]).
pub fn compute_cost(unit_cost: Option<f64>, sq_ft: f64, params: &CostParameters) -> CostBreakdown {
    let unit_cost = unit_cost.unwrap_or(0.0);
    let material_and_fab =
        unit_cost * params.markup_factor * sq_ft + params.fabrication_cost_per_sqft * sq_ft;
    let install_cost = params.install_cost_per_sqft * sq_ft;
    let ib_cost = (unit_cost * params.ib_material_markup + params.fabrication_cost_per_sqft) * sq_ft;
    CostBreakdown {
        material_and_fab,
        install_cost,
        ib_cost,
        total_customer_base: material_and_fab + install_cost,
    }
}

/// 금액을 소수 둘째 자리까지 표시한다. 표시 전용이며 계산에는 쓰지 않는다.
pub fn format_money(amount: f64) -> String {
    let cents = (amount * 100.0).round() / 100.0;
    let negative = cents < 0.0;
    let fixed = format!("{:.2}", cents.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if negative {
        format!("-${grouped}.{frac_part}")
    } else {
        format!("${grouped}.{frac_part}")
    }
}
