use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 1 sqft = 0.09290304 m² (정의값)
const SQ_M_PER_SQ_FT: f64 = 0.092_903_04;

/// 면적 단위. 견적 계산의 내부 기준은 제곱피트이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AreaUnit {
    #[default]
    SquareFoot,
    SquareMeter,
}

impl AreaUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            AreaUnit::SquareFoot => "sqft",
            AreaUnit::SquareMeter => "m2",
        }
    }
}

impl fmt::Display for AreaUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for AreaUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sqft" | "sq ft" | "ft2" | "sf" => Ok(AreaUnit::SquareFoot),
            "m2" | "m²" | "sqm" => Ok(AreaUnit::SquareMeter),
            other => Err(format!("알 수 없는 면적 단위: {other}")),
        }
    }
}

fn to_square_foot(value: f64, unit: AreaUnit) -> f64 {
    match unit {
        AreaUnit::SquareFoot => value,
        AreaUnit::SquareMeter => value / SQ_M_PER_SQ_FT,
    }
}

fn from_square_foot(value: f64, unit: AreaUnit) -> f64 {
    match unit {
        AreaUnit::SquareFoot => value,
        AreaUnit::SquareMeter => value * SQ_M_PER_SQ_FT,
    }
}

/// 면적을 변환한다. 같은 단위끼리는 값을 그대로 돌려준다.
pub fn convert_area(value: f64, from: AreaUnit, to: AreaUnit) -> f64 {
    if from == to {
        return value;
    }
    from_square_foot(to_square_foot(value, from), to)
}
