use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::inventory::sheets::DEFAULT_SHEETS_BASE_URL;
use crate::inventory::ColumnAliases;
use crate::pricing::{CostParameters, PlantMapping};
use crate::units::AreaUnit;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 재고 공급자 선택.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    /// 인증 없이 게시된 CSV 내보내기 주소
    CsvUrl { url: String },
    /// 스프레드시트 API. 토큰은 `token_env` 환경 변수에서 읽는다.
    SheetsApi {
        #[serde(default = "default_sheets_base_url")]
        base_url: String,
        sheet_id: String,
        tab: String,
        #[serde(default = "default_token_env")]
        token_env: String,
    },
    /// 로컬 CSV 파일
    CsvFile { path: PathBuf },
}

fn default_sheets_base_url() -> String {
    DEFAULT_SHEETS_BASE_URL.to_string()
}

fn default_token_env() -> String {
    "SHEETS_ACCESS_TOKEN".to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::CsvFile {
            path: PathBuf::from("inventory.csv"),
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드(auto/ko/en-us)
    pub language: String,
    /// RUST_LOG가 없을 때 쓰는 로그 필터
    pub log_level: String,
    /// 재고 요청 타임아웃 [초]
    pub request_timeout_secs: u64,
    /// 화면에서 받는 최소 요청 면적 [sqft]
    pub min_area_sqft: f64,
    /// 내부(IB) 원가 표시 여부. 운영자 화면에서만 켠다.
    pub show_internal_cost: bool,
    /// 면적 입력 기본 단위
    pub area_unit: AreaUnit,
    pub rates: CostParameters,
    pub plants: PlantMapping,
    pub source: SourceConfig,
    pub columns: ColumnAliases,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".into(),
            log_level: "warn".into(),
            request_timeout_secs: 15,
            min_area_sqft: 1.0,
            show_internal_cost: false,
            area_unit: AreaUnit::SquareFoot,
            rates: CostParameters::default(),
            plants: PlantMapping::default(),
            source: SourceConfig::default(),
            columns: ColumnAliases::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("단가 설정 {0} 은(는) 0 이상의 유한한 값이어야 합니다")]
    InvalidRate(&'static str),
    #[error("최소 면적은 0보다 커야 합니다: {0}")]
    InvalidMinimumArea(f64),
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// 단가와 최소 면적을 검사한다.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(field) = self.rates.first_invalid_field() {
            return Err(ConfigError::InvalidRate(field));
        }
        if !self.min_area_sqft.is_finite() || self.min_area_sqft <= 0.0 {
            return Err(ConfigError::InvalidMinimumArea(self.min_area_sqft));
        }
        Ok(())
    }

    /// 설정을 주어진 경로에 저장한다.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    let cfg = if path.exists() {
        let content = fs::read_to_string(path)?;
        toml::from_str::<Config>(&content)?
    } else {
        let cfg = Config::default();
        cfg.save_to(path)?;
        tracing::info!(path = %path.display(), "wrote default config");
        cfg
    };
    cfg.validate()?;
    Ok(cfg)
}
