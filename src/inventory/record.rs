/// 재고 슬랩 한 장을 표현한다.
#[derive(Debug, Clone, PartialEq)]
pub struct SlabRecord {
    /// 지점/사이트
    pub location: String,
    pub thickness: String,
    pub color: String,
    /// 자재 단가 [통화 / sqft]. 값이 없거나 잘못되면 0.
    pub unit_cost: f64,
    /// 가용 면적 [sqft]. 0이면 견적 대상이 아니다.
    pub available_area: f64,
    /// 표시용 일련번호. 해석할 수 없으면 0.
    pub serial_number: u64,
    /// 슬랩 전체 보유 원가(피드가 제공하는 경우)
    pub on_hand_cost: Option<f64>,
}

impl SlabRecord {
    /// 가용 면적이 있어 선택 가능한 슬랩인지 여부.
    pub fn has_area(&self) -> bool {
        self.available_area > 0.0
    }
}

/// 피드 셀 문자열에서 원시 값을 뽑아 레코드를 만든다.
///
/// 단가 셀이 비었거나 해석되지 않으면 보유 원가 / 가용 면적으로 단가를 유도한다.
#[derive(Debug, Default, Clone)]
pub struct RawSlabFields<'a> {
    pub location: &'a str,
    pub thickness: &'a str,
    pub color: &'a str,
    pub unit_cost: Option<&'a str>,
    pub on_hand_cost: Option<&'a str>,
    pub available_area: Option<&'a str>,
    pub serial_number: Option<&'a str>,
}

impl<'a> RawSlabFields<'a> {
    pub fn into_record(self) -> SlabRecord {
        let available_area = non_negative_or_zero(self.available_area.and_then(parse_amount));
        let on_hand_cost = self
            .on_hand_cost
            .and_then(parse_amount)
            .filter(|v| *v >= 0.0);
        let unit_cost = match self.unit_cost.and_then(parse_amount) {
            Some(v) => non_negative_or_zero(Some(v)),
            None => derive_unit_cost(on_hand_cost, available_area),
        };
        SlabRecord {
            location: self.location.trim().to_string(),
            thickness: self.thickness.trim().to_string(),
            color: self.color.trim().to_string(),
            unit_cost,
            available_area,
            serial_number: self.serial_number.map(parse_serial).unwrap_or(0),
            on_hand_cost,
        }
    }
}

fn derive_unit_cost(on_hand_cost: Option<f64>, available_area: f64) -> f64 {
    match on_hand_cost {
        Some(cost) if cost > 0.0 && available_area > 0.0 => cost / available_area,
        _ => 0.0,
    }
}

/// 금액/수량 셀을 숫자로 해석한다. `$`, 천 단위 `,`, 앞뒤 공백을 허용한다.
/// 비었거나 숫자가 아니거나 유한하지 않으면 None.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let s = raw.trim();
    let s = s.strip_prefix('$').unwrap_or(s).trim();
    if s.is_empty() {
        return None;
    }
    let cleaned: String = s.chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// 음수/누락 값은 0으로 처리한다.
pub fn non_negative_or_zero(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v > 0.0 => v,
        _ => 0.0,
    }
}

/// 일련번호를 해석한다. 스프레드시트가 내보내는 "1234.0" 형태도 허용한다.
pub fn parse_serial(raw: &str) -> u64 {
    let s = raw.trim();
    if let Ok(n) = s.parse::<u64>() {
        return n;
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 => v as u64,
        _ => 0,
    }
}
