use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const WARNING_PREFIX: &str = "general.warning_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_QUOTE: &str = "main_menu.quote";
    pub const MAIN_MENU_INVENTORY: &str = "main_menu.inventory";
    pub const MAIN_MENU_RELOAD: &str = "main_menu.reload";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const QUOTE_HEADING: &str = "quote.heading";
    pub const PROMPT_LOCATION: &str = "prompt.location";
    pub const PROMPT_THICKNESS: &str = "prompt.thickness";
    pub const PROMPT_COLOR: &str = "prompt.color";
    pub const PROMPT_AREA: &str = "prompt.area";

    pub const ERROR_NO_INVENTORY: &str = "error.no_inventory";
    pub const ERROR_SOURCE_UNAVAILABLE: &str = "error.source_unavailable";
    pub const ERROR_SELECTION_EMPTY: &str = "error.selection_empty";
    pub const ERROR_INVALID_QUANTITY: &str = "error.invalid_quantity";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const RESULT_SLAB: &str = "result.slab";
    pub const RESULT_MATCHED: &str = "result.matched";
    pub const RESULT_PLANT: &str = "result.plant";
    pub const RESULT_AREA: &str = "result.area";
    pub const RESULT_MATERIAL_FAB: &str = "result.material_fab";
    pub const RESULT_INSTALL: &str = "result.install";
    pub const RESULT_IB: &str = "result.ib";
    pub const RESULT_TOTAL: &str = "result.total";
    pub const WARN_EXCEEDS_AREA: &str = "result.warn_exceeds_area";

    pub const INVENTORY_HEADING: &str = "inventory.heading";
    pub const INVENTORY_SOURCE: &str = "inventory.source";
    pub const INVENTORY_ROWS: &str = "inventory.rows";
    pub const RELOAD_OK: &str = "inventory.reload_ok";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT: &str = "settings.current";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const GUI_RELOAD: &str = "gui.reload";
    pub const GUI_OPEN_FILE: &str = "gui.open_file";
    pub const GUI_OPERATOR_MODE: &str = "gui.operator_mode";
    pub const GUI_CHOOSE: &str = "gui.choose";
    pub const GUI_AREA_UNIT: &str = "gui.area_unit";
    pub const GUI_LOCATION: &str = "gui.location";
    pub const GUI_THICKNESS: &str = "gui.thickness";
    pub const GUI_COLOR: &str = "gui.color";
    pub const GUI_AREA: &str = "gui.area";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 순으로 찾고, 한국어 번역이 없으면 영어로 폴백한다.
    pub fn t<'a>(&'a self, key: &str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v.as_str();
        }
        match self.lang {
            Language::Ko => ko(key).unwrap_or_else(|| en(key)),
            Language::En => en(key),
        }
    }

    /// `{name}` 자리표시자를 채운 번역 문자열.
    pub fn fmt(&self, key: &str, vars: &[(&str, String)]) -> String {
        fill_template(self.t(key), vars)
    }
}

/// `{name}` 형태의 자리표시자를 값으로 바꾼다.
pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        "ko" => Some("ko".into()),
        "ko-kr" => Some("ko-kr".into()),
        "en" => Some("en".into()),
        "en-us" => Some("en-us".into()),
        "en-uk" | "en-gb" | "en-ca" => Some("en-us".into()),
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // en-us → en
    let (base, _) = lang.split_once(['-', '_'])?;
    try_load(base)
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        WARNING_PREFIX => "주의",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== Slab Quote Toolbox ===",
        MAIN_MENU_QUOTE => "1) 견적 계산",
        MAIN_MENU_INVENTORY => "2) 재고 현황",
        MAIN_MENU_RELOAD => "3) 재고 다시 불러오기",
        MAIN_MENU_SETTINGS => "4) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        QUOTE_HEADING => "\n-- 견적 계산 --",
        PROMPT_LOCATION => "지점 번호: ",
        PROMPT_THICKNESS => "두께 번호: ",
        PROMPT_COLOR => "색상 번호: ",
        PROMPT_AREA => "요청 면적 [{unit}] (최소 {min} sqft): ",
        ERROR_NO_INVENTORY => "선택 가능한 재고가 없습니다. 재고 피드를 확인한 뒤 다시 불러오세요.",
        ERROR_SOURCE_UNAVAILABLE => "재고를 불러오지 못했습니다: {error}",
        ERROR_SELECTION_EMPTY => "조건에 맞는 슬랩이 없습니다: {error}",
        ERROR_INVALID_QUANTITY => "면적 오류: {error}",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        RESULT_SLAB => "슬랩 #{serial} ({location} / {thickness} / {color}), 가용 {area} sqft",
        RESULT_MATCHED => "일치 슬랩 {count}장, 합계 가용 {area} sqft",
        RESULT_PLANT => "가공 공장:",
        RESULT_AREA => "요청 면적:",
        RESULT_MATERIAL_FAB => "자재 + 가공:",
        RESULT_INSTALL => "시공:",
        RESULT_IB => "내부 IB 원가:",
        RESULT_TOTAL => "고객 기준 합계:",
        WARN_EXCEEDS_AREA => "요청 면적이 선택 슬랩의 가용 면적({area} sqft)보다 큽니다.",
        INVENTORY_HEADING => "\n-- 재고 현황 --",
        INVENTORY_SOURCE => "재고 출처:",
        INVENTORY_ROWS => "불러온 행 수:",
        RELOAD_OK => "재고를 다시 불러왔습니다. 행 수:",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT => "현재: 면적 단위 {unit}, 내부 원가 표시 {internal}",
        SETTINGS_OPTIONS => "1) 면적 단위 sqft  2) 면적 단위 m2  3) 내부 원가 표시 전환",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "설정이 변경되었습니다.",
        GUI_RELOAD => "재고 다시 불러오기",
        GUI_OPEN_FILE => "CSV 파일 열기…",
        GUI_OPERATOR_MODE => "운영자 모드 (IB 원가 표시)",
        GUI_CHOOSE => "선택…",
        GUI_AREA_UNIT => "단위",
        GUI_LOCATION => "지점",
        GUI_THICKNESS => "두께",
        GUI_COLOR => "색상",
        GUI_AREA => "요청 면적",
        _ => return None,
    })
}

fn en(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "Error",
        WARNING_PREFIX => "Warning",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== Slab Quote Toolbox ===",
        MAIN_MENU_QUOTE => "1) Price a slab",
        MAIN_MENU_INVENTORY => "2) Inventory summary",
        MAIN_MENU_RELOAD => "3) Reload inventory",
        MAIN_MENU_SETTINGS => "4) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        QUOTE_HEADING => "\n-- Price a slab --",
        PROMPT_LOCATION => "Location #: ",
        PROMPT_THICKNESS => "Thickness #: ",
        PROMPT_COLOR => "Color #: ",
        PROMPT_AREA => "Requested area [{unit}] (min {min} sqft): ",
        ERROR_NO_INVENTORY => "No inventory available. Check the inventory feed and reload.",
        ERROR_SOURCE_UNAVAILABLE => "Could not load inventory: {error}",
        ERROR_SELECTION_EMPTY => "No matching slab: {error}",
        ERROR_INVALID_QUANTITY => "Invalid area: {error}",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        RESULT_SLAB => "Slab #{serial} ({location} / {thickness} / {color}), {area} sqft available",
        RESULT_MATCHED => "{count} matching slab(s), {area} sqft available in total",
        RESULT_PLANT => "Fabrication plant:",
        RESULT_AREA => "Requested area:",
        RESULT_MATERIAL_FAB => "Material + fabrication:",
        RESULT_INSTALL => "Installation:",
        RESULT_IB => "Internal IB cost:",
        RESULT_TOTAL => "Total customer base:",
        WARN_EXCEEDS_AREA => "Requested area exceeds the selected slab's available area ({area} sqft).",
        INVENTORY_HEADING => "\n-- Inventory --",
        INVENTORY_SOURCE => "Source:",
        INVENTORY_ROWS => "Rows loaded:",
        RELOAD_OK => "Inventory reloaded. Rows:",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT => "Current: area unit {unit}, internal cost shown {internal}",
        SETTINGS_OPTIONS => "1) Area unit sqft  2) Area unit m2  3) Toggle internal cost",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_INVALID => "Invalid input; settings unchanged.",
        SETTINGS_SAVED => "Settings updated.",
        GUI_RELOAD => "Reload inventory",
        GUI_OPEN_FILE => "Open CSV file…",
        GUI_OPERATOR_MODE => "Operator mode (show IB cost)",
        GUI_CHOOSE => "Choose…",
        GUI_AREA_UNIT => "Unit",
        GUI_LOCATION => "Location",
        GUI_THICKNESS => "Thickness",
        GUI_COLOR => "Color",
        GUI_AREA => "Requested area",
        _ => "[missing translation]",
    }
}
