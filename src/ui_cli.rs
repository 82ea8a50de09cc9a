use std::io::{self, Write};

use crate::app::AppError;
use crate::config::Config;
use crate::i18n::{keys, Translator};
use crate::inventory::{
    color_options, location_options, summarize, thickness_options, InventoryCache, SelectionError,
    SlabQuery,
};
use crate::pricing::format_money;
use crate::quote::{prepare_quote, Quote, QuoteError, QuoteRequest};
use crate::units::AreaUnit;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Quote,
    Inventory,
    Reload,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_QUOTE));
    println!("{}", tr.t(keys::MAIN_MENU_INVENTORY));
    println!("{}", tr.t(keys::MAIN_MENU_RELOAD));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Quote),
            "2" => return Ok(MenuChoice::Inventory),
            "3" => return Ok(MenuChoice::Reload),
            "4" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 견적 메뉴를 처리한다. 지점 → 두께 → 색상 → 면적 순으로 입력받는다.
pub fn handle_quote(
    tr: &Translator,
    cfg: &Config,
    cache: &mut InventoryCache,
    operator: bool,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::QUOTE_HEADING));
    load_records(tr, cache);
    let records = cache.cached();

    let locations = location_options(records);
    if locations.is_empty() {
        println!("{}: {}", tr.t(keys::ERROR_PREFIX), tr.t(keys::ERROR_NO_INVENTORY));
        return Ok(());
    }
    let Some(location) = pick_option(tr, keys::PROMPT_LOCATION, &locations)? else {
        return Ok(());
    };
    let thicknesses = thickness_options(records, &location);
    let Some(thickness) = pick_option(tr, keys::PROMPT_THICKNESS, &thicknesses)? else {
        return Ok(());
    };
    let colors = color_options(records, &location, &thickness);
    let Some(color) = pick_option(tr, keys::PROMPT_COLOR, &colors)? else {
        return Ok(());
    };

    let prompt = tr.fmt(
        keys::PROMPT_AREA,
        &[
            ("unit", cfg.area_unit.to_string()),
            ("min", format!("{}", cfg.min_area_sqft)),
        ],
    );
    let area = read_f64(tr, &prompt)?;
    let request = QuoteRequest {
        query: SlabQuery {
            location,
            thickness,
            color,
        },
        area,
        unit: cfg.area_unit,
    };
    match prepare_quote(records, &request, cfg) {
        Ok(quote) => {
            for line in render_quote(tr, &quote, internal_cost_visible(cfg, operator)) {
                println!("{line}");
            }
        }
        Err(err) => println!("{}: {}", tr.t(keys::ERROR_PREFIX), describe_quote_error(tr, &err)),
    }
    Ok(())
}

/// 재고 현황을 출력한다.
pub fn handle_inventory(tr: &Translator, cache: &mut InventoryCache) {
    println!("{}", tr.t(keys::INVENTORY_HEADING));
    load_records(tr, cache);
    for line in render_inventory(tr, cache) {
        println!("{line}");
    }
}

/// 재고를 다시 불러온다. 실패해도 메시지만 보여준다.
pub fn handle_reload(tr: &Translator, cache: &mut InventoryCache) {
    match cache.reload() {
        Ok(rows) => println!("{} {rows}", tr.t(keys::RELOAD_OK)),
        Err(err) => print_source_error(tr, &err.to_string()),
    }
}

/// 설정 메뉴를 처리한다. 값이 바뀌었으면 true.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<bool, AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{}",
        tr.fmt(
            keys::SETTINGS_CURRENT,
            &[
                ("unit", cfg.area_unit.to_string()),
                ("internal", cfg.show_internal_cost.to_string()),
            ],
        )
    );
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    match sel.trim() {
        "" => return Ok(false),
        "1" => cfg.area_unit = AreaUnit::SquareFoot,
        "2" => cfg.area_unit = AreaUnit::SquareMeter,
        "3" => cfg.show_internal_cost = !cfg.show_internal_cost,
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            return Ok(false);
        }
    }
    println!("{}", tr.t(keys::SETTINGS_SAVED));
    Ok(true)
}

/// 비대화형 `list` 명령.
pub fn print_inventory(tr: &Translator, cache: &mut InventoryCache) {
    load_records(tr, cache);
    for line in render_inventory(tr, cache) {
        println!("{line}");
    }
}

/// 비대화형 `quote` 명령. 견적 오류는 stderr에 한 번 출력하고 false를 돌려준다.
pub fn print_quote(
    tr: &Translator,
    cfg: &Config,
    cache: &mut InventoryCache,
    request: &QuoteRequest,
    operator: bool,
) -> bool {
    load_records(tr, cache);
    match prepare_quote(cache.cached(), request, cfg) {
        Ok(quote) => {
            for line in render_quote(tr, &quote, internal_cost_visible(cfg, operator)) {
                println!("{line}");
            }
            true
        }
        Err(err) => {
            eprintln!("{}: {}", tr.t(keys::ERROR_PREFIX), describe_quote_error(tr, &err));
            false
        }
    }
}

/// IB 원가 표시 여부. 저장된 설정 또는 이번 실행의 운영자 플래그 중 하나라도 켜져 있으면 true.
pub fn internal_cost_visible(cfg: &Config, operator: bool) -> bool {
    operator || cfg.show_internal_cost
}

/// 견적 결과를 출력용 줄로 만든다. `show_internal`이 false면 IB 원가 줄은 빠진다.
pub fn render_quote(tr: &Translator, quote: &Quote, show_internal: bool) -> Vec<String> {
    let slab = quote.slab();
    let mut lines = vec![
        tr.fmt(
            keys::RESULT_SLAB,
            &[
                ("serial", slab.serial_number.to_string()),
                ("location", slab.location.clone()),
                ("thickness", slab.thickness.clone()),
                ("color", slab.color.clone()),
                ("area", format!("{:.2}", slab.available_area)),
            ],
        ),
        tr.fmt(
            keys::RESULT_MATCHED,
            &[
                ("count", quote.selection.matched.to_string()),
                ("area", format!("{:.2}", quote.selection.total_available_area)),
            ],
        ),
        format!("{} {}", tr.t(keys::RESULT_PLANT), quote.plant),
        format!("{} {:.2} sqft", tr.t(keys::RESULT_AREA), quote.area_sq_ft),
    ];
    if quote.exceeds_available {
        lines.push(format!(
            "{}: {}",
            tr.t(keys::WARNING_PREFIX),
            tr.fmt(
                keys::WARN_EXCEEDS_AREA,
                &[("area", format!("{:.2}", slab.available_area))]
            )
        ));
    }
    let customer = quote.breakdown.customer_view();
    lines.push(format!(
        "{} {}",
        tr.t(keys::RESULT_MATERIAL_FAB),
        format_money(customer.material_and_fab)
    ));
    lines.push(format!(
        "{} {}",
        tr.t(keys::RESULT_INSTALL),
        format_money(customer.install_cost)
    ));
    if show_internal {
        lines.push(format!(
            "{} {}",
            tr.t(keys::RESULT_IB),
            format_money(quote.breakdown.ib_cost)
        ));
    }
    lines.push(format!(
        "{} {}",
        tr.t(keys::RESULT_TOTAL),
        format_money(customer.total_customer_base)
    ));
    lines
}

/// 재고 요약을 출력용 줄로 만든다.
pub fn render_inventory(tr: &Translator, cache: &InventoryCache) -> Vec<String> {
    let mut lines = vec![
        format!("{} {}", tr.t(keys::INVENTORY_SOURCE), cache.source_description()),
        format!("{} {}", tr.t(keys::INVENTORY_ROWS), cache.cached().len()),
    ];
    let summary = summarize(cache.cached());
    if summary.is_empty() {
        lines.push(format!("{}: {}", tr.t(keys::ERROR_PREFIX), tr.t(keys::ERROR_NO_INVENTORY)));
    }
    for s in summary {
        lines.push(format!(
            "  {:<14} {:<8} {:<24} {:>3} x  {:>9.2} sqft",
            s.location, s.thickness, s.color, s.slabs, s.total_area
        ));
    }
    lines
}

/// 견적 오류를 사용자 메시지로 바꾼다.
pub fn describe_quote_error(tr: &Translator, err: &QuoteError) -> String {
    match err {
        QuoteError::Selection(SelectionError::NoInventory) => {
            tr.t(keys::ERROR_NO_INVENTORY).to_string()
        }
        QuoteError::Selection(e) => tr.fmt(keys::ERROR_SELECTION_EMPTY, &[("error", e.to_string())]),
        QuoteError::Quantity(e) => tr.fmt(keys::ERROR_INVALID_QUANTITY, &[("error", e.to_string())]),
    }
}

/// 아직 불러오지 않았으면 불러온다. 표가 비었고 마지막 오류가 있으면 알린다.
fn load_records(tr: &Translator, cache: &mut InventoryCache) {
    if cache.records().is_empty() {
        if let Some(err) = cache.last_error() {
            print_source_error(tr, err);
        }
    }
}

fn print_source_error(tr: &Translator, error: &str) {
    println!(
        "{}: {}",
        tr.t(keys::ERROR_PREFIX),
        tr.fmt(keys::ERROR_SOURCE_UNAVAILABLE, &[("error", error.to_string())])
    );
}

/// 번호 목록을 보여주고 하나를 고르게 한다. 빈 입력이면 취소(None).
fn pick_option(
    tr: &Translator,
    prompt_key: &str,
    options: &[String],
) -> Result<Option<String>, AppError> {
    if options.is_empty() {
        println!("{}: {}", tr.t(keys::ERROR_PREFIX), tr.t(keys::ERROR_NO_INVENTORY));
        return Ok(None);
    }
    for (i, opt) in options.iter().enumerate() {
        println!("  {}) {opt}", i + 1);
    }
    loop {
        let sel = read_line(tr.t(prompt_key))?;
        let sel = sel.trim();
        if sel.is_empty() {
            return Ok(None);
        }
        match sel.parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => return Ok(Some(options[n - 1].clone())),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed").into());
    }
    Ok(buf)
}

fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}
