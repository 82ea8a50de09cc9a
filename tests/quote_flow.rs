use std::io::Write;

use slab_quote_toolbox::{
    config::Config,
    i18n::{keys, Translator},
    inventory::{
        color_options, location_options, select_slab, summarize, thickness_options,
        ColumnAliases, CsvFileSource, InventoryCache, SelectionError, SelectionStage, SlabQuery,
        SlabRecord,
    },
    pricing::{compute_cost, QuantityError},
    quote::{prepare_quote, QuoteError, QuoteRequest},
    ui_cli::{print_quote, render_quote},
    units::AreaUnit,
};

fn slab(location: &str, thickness: &str, color: &str, cost: f64, area: f64, serial: u64) -> SlabRecord {
    SlabRecord {
        location: location.into(),
        thickness: thickness.into(),
        color: color.into(),
        unit_cost: cost,
        available_area: area,
        serial_number: serial,
        on_hand_cost: None,
    }
}

fn stock() -> Vec<SlabRecord> {
    vec![
        slab("Vernon", "3cm", "Calacatta", 50.0, 45.5, 101),
        slab("Vernon", "3cm", "Calacatta", 55.0, 30.0, 102),
        slab("Vernon", "2cm", "Nero", 38.0, 20.0, 103),
        slab("Calgary", "3cm", "Carrara", 42.0, 60.0, 104),
        slab("Calgary", "2cm", "Bianco", 30.0, 0.0, 105),
        slab("Regina", "3cm", "Onyx", 90.0, 0.0, 106),
    ]
}

fn query(location: &str, thickness: &str, color: &str) -> SlabQuery {
    SlabQuery {
        location: location.into(),
        thickness: thickness.into(),
        color: color.into(),
    }
}

fn request(location: &str, thickness: &str, color: &str, area: f64, unit: AreaUnit) -> QuoteRequest {
    QuoteRequest {
        query: query(location, thickness, color),
        area,
        unit,
    }
}

#[test]
fn options_cascade_and_skip_empty_slabs() {
    let records = stock();
    // Regina 은 가용 면적이 없어 목록에 나오지 않는다.
    assert_eq!(location_options(&records), vec!["Calgary", "Vernon"]);
    assert_eq!(thickness_options(&records, "Vernon"), vec!["2cm", "3cm"]);
    assert_eq!(thickness_options(&records, "Calgary"), vec!["3cm"]);
    assert_eq!(color_options(&records, "Vernon", "3cm"), vec!["Calacatta"]);
    assert!(color_options(&records, "Calgary", "2cm").is_empty());
}

#[test]
fn empty_table_has_no_choices() {
    let records: Vec<SlabRecord> = Vec::new();
    assert!(location_options(&records).is_empty());
    assert_eq!(
        select_slab(&records, &query("Vernon", "3cm", "Calacatta")),
        Err(SelectionError::NoInventory)
    );
}

#[test]
fn first_matching_slab_is_selected() {
    let sel = select_slab(&stock(), &query("Vernon", "3cm", "Calacatta")).expect("selection");
    assert_eq!(sel.slab.serial_number, 101);
    assert_eq!(sel.matched, 2);
    assert_eq!(sel.total_available_area, 75.5);
}

#[test]
fn empty_stage_is_named() {
    let err = select_slab(&stock(), &query("Vernon", "3cm", "Nero")).expect_err("no 3cm Nero");
    assert_eq!(
        err,
        SelectionError::Empty {
            stage: SelectionStage::Color,
            value: "Nero".into()
        }
    );
    let err = select_slab(&stock(), &query("Regina", "3cm", "Onyx")).expect_err("no area");
    assert!(matches!(
        err,
        SelectionError::Empty {
            stage: SelectionStage::Location,
            ..
        }
    ));
}

#[test]
fn west_coast_location_uses_abbotsford() {
    let cfg = Config::default();
    let quote = prepare_quote(
        &stock(),
        &request("Vernon", "3cm", "Calacatta", 20.0, AreaUnit::SquareFoot),
        &cfg,
    )
    .expect("quote");
    assert_eq!(quote.plant, "Abbotsford");
    assert_eq!(quote.breakdown, compute_cost(Some(50.0), 20.0, &cfg.rates));
    assert!((quote.breakdown.total_customer_base - 1700.0).abs() < 1e-9);
    assert!(!quote.exceeds_available);
}

#[test]
fn other_locations_use_saskatoon() {
    let quote = prepare_quote(
        &stock(),
        &request("Calgary", "3cm", "Carrara", 10.0, AreaUnit::SquareFoot),
        &Config::default(),
    )
    .expect("quote");
    assert_eq!(quote.plant, "Saskatoon");
}

#[test]
fn square_meters_are_priced_in_square_feet() {
    let cfg = Config::default();
    let quote = prepare_quote(
        &stock(),
        &request("Calgary", "3cm", "Carrara", 2.0, AreaUnit::SquareMeter),
        &cfg,
    )
    .expect("quote");
    assert!((quote.area_sq_ft - 21.527_820_833).abs() < 1e-6, "{}", quote.area_sq_ft);
    assert_eq!(
        quote.breakdown,
        compute_cost(Some(42.0), quote.area_sq_ft, &cfg.rates)
    );
}

#[test]
fn invalid_areas_are_rejected() {
    let cfg = Config::default();
    let err = prepare_quote(
        &stock(),
        &request("Vernon", "3cm", "Calacatta", 0.0, AreaUnit::SquareFoot),
        &cfg,
    )
    .expect_err("zero area");
    assert_eq!(err, QuoteError::Quantity(QuantityError::NonPositive(0.0)));

    let err = prepare_quote(
        &stock(),
        &request("Vernon", "3cm", "Calacatta", 0.5, AreaUnit::SquareFoot),
        &cfg,
    )
    .expect_err("below minimum");
    assert!(matches!(
        err,
        QuoteError::Quantity(QuantityError::BelowMinimum { .. })
    ));
}

#[test]
fn oversized_request_is_flagged_but_priced() {
    let quote = prepare_quote(
        &stock(),
        &request("Vernon", "2cm", "Nero", 25.0, AreaUnit::SquareFoot),
        &Config::default(),
    )
    .expect("quote");
    assert!(quote.exceeds_available);
    assert!(quote.breakdown.total_customer_base > 0.0);
}

#[test]
fn internal_cost_is_shown_only_to_operators() {
    let tr = Translator::new("en");
    let quote = prepare_quote(
        &stock(),
        &request("Vernon", "3cm", "Calacatta", 20.0, AreaUnit::SquareFoot),
        &Config::default(),
    )
    .expect("quote");
    let ib_label = tr.t(keys::RESULT_IB);

    let customer = render_quote(&tr, &quote, false);
    assert!(!customer.iter().any(|l| l.contains(ib_label)));
    assert!(customer.iter().any(|l| l.contains("$1,700.00")));

    let operator = render_quote(&tr, &quote, true);
    assert!(operator.iter().any(|l| l.contains(ib_label) && l.contains("$1,340.00")));
    assert_eq!(operator.len(), customer.len() + 1);
}

#[test]
fn summary_groups_selectable_slabs() {
    let summary = summarize(&stock());
    assert_eq!(summary.len(), 3);
    assert_eq!(summary[0].location, "Calgary");
    let calacatta = summary
        .iter()
        .find(|s| s.color == "Calacatta")
        .expect("calacatta row");
    assert_eq!(calacatta.slabs, 2);
    assert_eq!(calacatta.total_area, 75.5);
}

#[test]
fn one_shot_quote_reports_success_as_bool() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    writeln!(file, "Location,Thickness,Color,Unit Cost,Available Qty").expect("write");
    writeln!(file, "Vernon,3cm,Calacatta,50,45.5").expect("write");

    let mut cache = InventoryCache::new(
        Box::new(CsvFileSource::new(file.path().to_path_buf())),
        ColumnAliases::default(),
    );
    let tr = Translator::new("en");
    let cfg = Config::default();

    let ok = request("Vernon", "3cm", "Calacatta", 20.0, AreaUnit::SquareFoot);
    assert!(print_quote(&tr, &cfg, &mut cache, &ok, false));
    let missing = request("Vernon", "3cm", "Nero", 20.0, AreaUnit::SquareFoot);
    assert!(!print_quote(&tr, &cfg, &mut cache, &missing, false));
}
