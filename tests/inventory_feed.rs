use std::io::Write;
use std::time::Duration;

use httpmock::prelude::*;
use slab_quote_toolbox::config::SourceConfig;
use slab_quote_toolbox::inventory::{
    build_source, location_options, parse_csv_table, ColumnAliases, CsvFileSource, CsvUrlSource,
    InventoryCache, InventorySource, SheetsApiSource, SourceError,
};

const FEED: &str = "\
 Location ,Thickness,Color,Unit Cost,Available Qty,Serial Number
Vernon,3cm,Calacatta,\"$1,050.50\",45.5,10023
Calgary,2cm,Carrara,40,0,10024
Vernon,3cm,Nero,abc,-3,
,,,,,
Kelowna,2cm,Bianco,,12,10026.0
";

fn feed_source(server: &MockServer) -> CsvUrlSource {
    CsvUrlSource::new(server.url("/inventory.csv"), Duration::from_secs(5)).expect("client")
}

#[test]
fn csv_feed_is_normalized() {
    let records = parse_csv_table(FEED.as_bytes())
        .expect("csv")
        .into_records(&ColumnAliases::default())
        .expect("records");
    // 완전히 빈 행은 건너뛴다.
    assert_eq!(records.len(), 4);

    let vernon = &records[0];
    assert_eq!(vernon.location, "Vernon");
    assert_eq!(vernon.unit_cost, 1050.5);
    assert_eq!(vernon.available_area, 45.5);
    assert_eq!(vernon.serial_number, 10023);

    assert_eq!(records[1].available_area, 0.0);
    // 숫자가 아니거나 음수인 값은 0으로 본다.
    assert_eq!(records[2].unit_cost, 0.0);
    assert_eq!(records[2].available_area, 0.0);
    assert_eq!(records[2].serial_number, 0);
    assert_eq!(records[3].serial_number, 10026);
}

#[test]
fn missing_required_column_is_reported() {
    let body = "Location,Color,Available Qty\nVernon,Calacatta,10\n";
    let err = parse_csv_table(body.as_bytes())
        .expect("csv")
        .into_records(&ColumnAliases::default())
        .expect_err("thickness missing");
    assert!(matches!(err, SourceError::MissingColumn("thickness")), "{err}");
}

#[test]
fn on_hand_cost_schema_derives_unit_cost() {
    let body = "Branch,Thickness,Colour,Serialized On Hand Cost,Available Qty\n\
                Surrey,3cm,Calacatta,\"2,000\",40\n";
    let records = parse_csv_table(body.as_bytes())
        .expect("csv")
        .into_records(&ColumnAliases::default())
        .expect("records");
    assert_eq!(records[0].location, "Surrey");
    assert_eq!(records[0].on_hand_cost, Some(2000.0));
    assert_eq!(records[0].unit_cost, 50.0);
}

#[test]
fn csv_url_source_loads_into_cache() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/inventory.csv");
        then.status(200)
            .header("content-type", "text/csv")
            .body(FEED);
    });

    let mut cache = InventoryCache::new(Box::new(feed_source(&server)), ColumnAliases::default());
    assert!(!cache.is_loaded());
    assert_eq!(cache.records().len(), 4);
    // 두 번째 읽기는 보관된 표를 쓴다.
    assert_eq!(cache.records().len(), 4);
    mock.assert_hits(1);

    assert_eq!(location_options(cache.cached()), vec!["Kelowna", "Vernon"]);
    assert!(cache.last_error().is_none());
}

#[test]
fn server_error_leaves_cache_empty() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/inventory.csv");
        then.status(500).body("boom");
    });

    let mut cache = InventoryCache::new(Box::new(feed_source(&server)), ColumnAliases::default());
    let err = cache.reload().expect_err("500 should fail");
    assert!(matches!(err, SourceError::Status { status: 500 }), "{err}");
    assert!(cache.cached().is_empty());
    assert!(cache.last_error().is_some());
    assert!(location_options(cache.cached()).is_empty());
}

#[test]
fn slow_feed_times_out() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/inventory.csv");
        then.status(200)
            .body(FEED)
            .delay(Duration::from_secs(3));
    });

    let source = CsvUrlSource::new(server.url("/inventory.csv"), Duration::from_millis(200))
        .expect("client");
    let err = source.fetch_table().expect_err("timeout");
    assert!(matches!(err, SourceError::Http(_)), "{err}");
}

#[test]
fn sheets_api_sends_bearer_token() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v4/spreadsheets/abc/values/Inventory")
            .header("authorization", "Bearer tok");
        then.status(200)
            .header("content-type", "application/json")
            .body(
                r#"{
                    "range": "Inventory!A1:F3",
                    "majorDimension": "ROWS",
                    "values": [
                        ["Location", "Thickness", "Color", "Unit Cost", "Available Qty", "Serial Number"],
                        ["Vernon", "3cm", "Calacatta", "50", "45.5", 10023],
                        ["Calgary", "2cm", "Carrara", "40"]
                    ]
                }"#,
            );
    });

    let source = SheetsApiSource::new(
        server.base_url(),
        "abc".into(),
        "Inventory".into(),
        "SHEETS_ACCESS_TOKEN".into(),
        Some("tok".into()),
        Duration::from_secs(5),
    )
    .expect("client");
    let records = source.fetch(&ColumnAliases::default()).expect("records");
    mock.assert();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].serial_number, 10023);
    assert_eq!(records[0].unit_cost, 50.0);
    // 뒤쪽 빈 셀이 잘린 행은 가용 면적 0으로 남는다.
    assert_eq!(records[1].available_area, 0.0);
}

#[test]
fn sheets_api_without_token_fails_before_request() {
    let source = SheetsApiSource::new(
        "http://127.0.0.1:9".into(),
        "abc".into(),
        "Inventory".into(),
        "MY_TOKEN".into(),
        None,
        Duration::from_secs(1),
    )
    .expect("client");
    match source.fetch_table() {
        Err(SourceError::MissingToken(var)) => assert_eq!(var, "MY_TOKEN"),
        other => panic!("expected missing token, got {:?}", other.map(|t| t.rows.len())),
    }
}

#[test]
fn reload_replaces_previous_table() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    write!(file, "{FEED}").expect("write");

    let mut cache = InventoryCache::new(
        Box::new(CsvFileSource::new(file.path().to_path_buf())),
        ColumnAliases::default(),
    );
    assert_eq!(cache.reload().expect("load"), 4);

    let missing = file.path().with_extension("missing.csv");
    cache.replace_source(Box::new(CsvFileSource::new(missing)));
    let err = cache.reload().expect_err("missing file");
    assert!(matches!(err, SourceError::Io(_)), "{err}");
    // 실패한 뒤에는 이전 표를 쓰지 않는다.
    assert!(cache.cached().is_empty());
}

fn sheets_config(base_url: String, token_env: &str) -> SourceConfig {
    SourceConfig::SheetsApi {
        base_url,
        sheet_id: "abc".into(),
        tab: "Inventory".into(),
        token_env: token_env.into(),
    }
}

#[test]
fn configured_sheets_source_reads_token_from_env() {
    // 테스트마다 다른 변수 이름을 써서 병렬 실행과 섞이지 않게 한다.
    std::env::set_var("SLAB_QUOTE_FEED_TOKEN_SET", "env-tok");
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v4/spreadsheets/abc/values/Inventory")
            .header("authorization", "Bearer env-tok");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"values":[["Location","Thickness","Color","Available Qty"],["Vernon","3cm","Calacatta","12"]]}"#);
    });

    let source = build_source(
        &sheets_config(server.base_url(), "SLAB_QUOTE_FEED_TOKEN_SET"),
        Duration::from_secs(5),
    )
    .expect("source");
    assert_eq!(source.describe(), "sheet abc / Inventory");
    let records = source.fetch(&ColumnAliases::default()).expect("records");
    mock.assert();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].location, "Vernon");
}

#[test]
fn configured_sheets_source_without_env_token_fails() {
    std::env::remove_var("SLAB_QUOTE_FEED_TOKEN_UNSET");
    std::env::set_var("SLAB_QUOTE_FEED_TOKEN_BLANK", "   ");

    for var in ["SLAB_QUOTE_FEED_TOKEN_UNSET", "SLAB_QUOTE_FEED_TOKEN_BLANK"] {
        let source = build_source(
            &sheets_config("http://127.0.0.1:9".into(), var),
            Duration::from_secs(1),
        )
        .expect("source");
        match source.fetch_table() {
            Err(SourceError::MissingToken(name)) => assert_eq!(name, var),
            other => panic!("{var}: expected missing token, got {:?}", other.map(|t| t.rows.len())),
        }
    }
}

#[test]
fn configured_file_and_url_sources() {
    let file = build_source(
        &SourceConfig::CsvFile {
            path: "stock/inventory.csv".into(),
        },
        Duration::from_secs(1),
    )
    .expect("file source");
    assert_eq!(file.describe(), "file stock/inventory.csv");

    let url = build_source(
        &SourceConfig::CsvUrl {
            url: "https://example.com/export?format=csv".into(),
        },
        Duration::from_secs(1),
    )
    .expect("url source");
    assert_eq!(url.describe(), "CSV https://example.com/export?format=csv");

    let bad = build_source(
        &SourceConfig::CsvUrl {
            url: "not a url".into(),
        },
        Duration::from_secs(1),
    );
    assert!(matches!(bad, Err(SourceError::InvalidUrl(_))));
}
