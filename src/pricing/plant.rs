use serde::{Deserialize, Serialize};

/// 지점(location) → 가공 공장 매핑 설정.
///
/// `west_coast_locations`에 포함된 지점은 `west_coast_plant`로, 그 외는 모두
/// `default_plant`로 보낸다. 비교는 앞뒤 공백을 무시하고 대소문자를 구분하지 않는다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlantMapping {
    pub west_coast_plant: String,
    pub default_plant: String,
    pub west_coast_locations: Vec<String>,
}

impl Default for PlantMapping {
    fn default() -> Self {
        Self {
            west_coast_plant: "Abbotsford".into(),
            default_plant: "Saskatoon".into(),
            west_coast_locations: [
                "Abbotsford",
                "Vancouver",
                "Burnaby",
                "Surrey",
                "Langley",
                "Coquitlam",
                "Victoria",
                "Nanaimo",
                "Kelowna",
                "Vernon",
                "Kamloops",
                "Penticton",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl PlantMapping {
    /// 지점에 대응하는 가공 공장 이름을 반환한다.
    pub fn plant_for(&self, location: &str) -> &str {
        let loc = location.trim();
        let west = self
            .west_coast_locations
            .iter()
            .any(|l| l.trim().eq_ignore_ascii_case(loc));
        if west {
            &self.west_coast_plant
        } else {
            &self.default_plant
        }
    }
}
