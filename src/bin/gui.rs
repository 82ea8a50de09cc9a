#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use image::GenericImageView;
use rfd::FileDialog;
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use slab_quote_toolbox::{
    config::{self, Config, DEFAULT_CONFIG_PATH},
    i18n::{self, keys, Language},
    inventory::{
        build_source, color_options, location_options, thickness_options, CsvFileSource,
        InventoryCache, SlabQuery,
    },
    logging,
    quote::{prepare_quote, QuoteRequest},
    ui_cli::{describe_quote_error, render_quote},
    units::AreaUnit,
};

fn main() -> Result<(), eframe::Error> {
    // CLI 옵션 처리: --lang xx / --lang=xx, --config path / --config=path
    let mut cli_lang: Option<String> = None;
    let mut config_path = PathBuf::from(DEFAULT_CONFIG_PATH);
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if let Some(val) = a.strip_prefix("--config=") {
            config_path = PathBuf::from(val);
        } else if (a == "--lang" || a == "-L") && i + 1 < args.len() {
            cli_lang = Some(args[i + 1].clone());
            i += 1;
        } else if (a == "--config" || a == "-c") && i + 1 < args.len() {
            config_path = PathBuf::from(&args[i + 1]);
            i += 1;
        }
        i += 1;
    }

    let app_cfg = match config::load_or_default(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Config error ({}): {e}", config_path.display());
            Config::default()
        }
    };
    logging::init_tracing(&app_cfg.log_level);
    let lang = i18n::resolve_language(
        cli_lang.as_deref().unwrap_or("auto"),
        Some(app_cfg.language.as_str()),
    );

    let mut viewport = egui::ViewportBuilder::default().with_inner_size([560.0, 520.0]);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "Slab Quote Toolbox",
        options,
        Box::new(move |cc| {
            let tr = i18n::Translator::new_with_pack(&lang, None);
            if tr.language() == Language::Ko {
                if let Err(e) = setup_fonts(&cc.egui_ctx) {
                    tracing::warn!("font setup failed: {e}");
                }
            }
            Box::new(GuiApp::new(app_cfg, tr))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .insert(0, font_name.clone());
    }
    ctx.set_fonts(fonts);
}

/// 한글 표시용 폰트를 찾아 적용한다. 프로젝트 assets → Windows → 리눅스 Noto CJK 순.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates = vec![PathBuf::from("assets/fonts/malgun.ttf")];
    if let Some(windir) = env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        candidates.extend(["malgun.ttf", "gulim.ttc"].iter().map(|f| fonts.join(f)));
    }
    candidates.push(PathBuf::from(
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    ));
    candidates.push(PathBuf::from(
        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    ));

    let found = candidates
        .iter()
        .find(|p| p.exists())
        .ok_or_else(|| "Korean font not found; falling back to default font".to_string())?;
    let bytes = fs::read(found).map_err(|e| format!("Failed to read {}: {e}", found.display()))?;
    apply_font_bytes(ctx, bytes, "korean_font");
    Ok(())
}

/// 선택 목록 콤보박스. 값이 바뀌면 true.
fn combo(
    ui: &mut egui::Ui,
    id: &str,
    label: &str,
    placeholder: &str,
    options: &[String],
    current: &mut Option<String>,
) -> bool {
    // 재고를 다시 불러오면 이전 선택이 목록에서 사라질 수 있다.
    if current.as_ref().is_some_and(|c| !options.contains(c)) {
        *current = None;
    }
    let before = current.clone();
    ui.horizontal(|ui| {
        ui.label(label);
        let text = current.clone().unwrap_or_else(|| placeholder.to_string());
        egui::ComboBox::from_id_source(id)
            .selected_text(text)
            .width(220.0)
            .show_ui(ui, |ui| {
                for opt in options {
                    ui.selectable_value(current, Some(opt.clone()), opt.as_str());
                }
            });
    });
    *current != before
}

struct GuiApp {
    config: Config,
    tr: i18n::Translator,
    /// 공급자 설정이 잘못되면 None. 파일 열기로만 새 공급자를 정할 수 있다.
    cache: Option<InventoryCache>,
    status: Option<String>,
    location: Option<String>,
    thickness: Option<String>,
    color: Option<String>,
    area: f64,
    unit: AreaUnit,
}

impl GuiApp {
    fn new(config: Config, tr: i18n::Translator) -> Self {
        let (cache, status) = match build_source(&config.source, config.request_timeout()) {
            Ok(source) => (Some(InventoryCache::new(source, config.columns.clone())), None),
            Err(e) => {
                tracing::warn!(error = %e, "inventory source not configured");
                let msg = tr.fmt(keys::ERROR_SOURCE_UNAVAILABLE, &[("error", e.to_string())]);
                (None, Some(msg))
            }
        };
        let area = config.min_area_sqft.max(1.0);
        let unit = config.area_unit;
        let mut app = Self {
            config,
            tr,
            cache,
            status,
            location: None,
            thickness: None,
            color: None,
            area,
            unit,
        };
        app.reload();
        app
    }

    fn reload(&mut self) {
        // 공급자가 없으면 설정 오류 메시지를 그대로 둔다.
        let Some(cache) = self.cache.as_mut() else {
            return;
        };
        self.status = match cache.reload() {
            Ok(_) => None,
            Err(e) => Some(self.tr.fmt(
                keys::ERROR_SOURCE_UNAVAILABLE,
                &[("error", e.to_string())],
            )),
        };
    }

    fn open_file(&mut self) {
        if let Some(path) = FileDialog::new().add_filter("CSV", &["csv"]).pick_file() {
            let source = Box::new(CsvFileSource::new(path));
            if let Some(cache) = self.cache.as_mut() {
                cache.replace_source(source);
            } else {
                self.cache = Some(InventoryCache::new(source, self.config.columns.clone()));
            }
            self.reload();
        }
    }

    fn toolbar_ui(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let reload = egui::Button::new(self.tr.t(keys::GUI_RELOAD));
            if ui.add_enabled(self.cache.is_some(), reload).clicked() {
                self.reload();
            }
            if ui.button(self.tr.t(keys::GUI_OPEN_FILE)).clicked() {
                self.open_file();
            }
            ui.checkbox(
                &mut self.config.show_internal_cost,
                self.tr.t(keys::GUI_OPERATOR_MODE),
            );
        });
        let source = self
            .cache
            .as_ref()
            .map(InventoryCache::source_description)
            .unwrap_or_else(|| "-".to_string());
        ui.small(format!("{} {source}", self.tr.t(keys::INVENTORY_SOURCE)));
    }

    fn quote_ui(&mut self, ui: &mut egui::Ui) {
        if let Some(status) = &self.status {
            ui.colored_label(egui::Color32::RED, status.as_str());
        }
        let tr = &self.tr;
        let records = self.cache.as_ref().map(InventoryCache::cached).unwrap_or(&[]);
        let choose = tr.t(keys::GUI_CHOOSE);

        let locations = location_options(records);
        if locations.is_empty() {
            ui.colored_label(egui::Color32::RED, tr.t(keys::ERROR_NO_INVENTORY));
            return;
        }
        if combo(ui, "location", tr.t(keys::GUI_LOCATION), choose, &locations, &mut self.location) {
            self.thickness = None;
            self.color = None;
        }
        let Some(location) = self.location.clone() else {
            return;
        };

        let thicknesses = thickness_options(records, &location);
        if combo(ui, "thickness", tr.t(keys::GUI_THICKNESS), choose, &thicknesses, &mut self.thickness) {
            self.color = None;
        }
        let Some(thickness) = self.thickness.clone() else {
            return;
        };

        let colors = color_options(records, &location, &thickness);
        combo(ui, "color", tr.t(keys::GUI_COLOR), choose, &colors, &mut self.color);
        let Some(color) = self.color.clone() else {
            return;
        };

        ui.horizontal(|ui| {
            ui.label(tr.t(keys::GUI_AREA));
            ui.add(
                egui::DragValue::new(&mut self.area)
                    .clamp_range(0.0..=f64::MAX)
                    .speed(0.5)
                    .max_decimals(2),
            );
            ui.label(tr.t(keys::GUI_AREA_UNIT));
            ui.radio_value(&mut self.unit, AreaUnit::SquareFoot, AreaUnit::SquareFoot.symbol());
            ui.radio_value(&mut self.unit, AreaUnit::SquareMeter, AreaUnit::SquareMeter.symbol());
        });
        ui.separator();

        let request = QuoteRequest {
            query: SlabQuery {
                location,
                thickness,
                color,
            },
            area: self.area,
            unit: self.unit,
        };
        match prepare_quote(records, &request, &self.config) {
            Ok(quote) => {
                for line in render_quote(tr, &quote, self.config.show_internal_cost) {
                    ui.label(line);
                }
            }
            Err(e) => {
                ui.colored_label(egui::Color32::RED, describe_quote_error(tr, &e));
            }
        }
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| self.toolbar_ui(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.quote_ui(ui));
    }
}
