use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use slab_quote_toolbox::{
    app,
    config::{self, DEFAULT_CONFIG_PATH},
    i18n::{self, Translator},
    inventory::{build_source, InventoryCache, SlabQuery},
    logging,
    quote::QuoteRequest,
    ui_cli,
    units::AreaUnit,
};

#[derive(Parser, Debug)]
#[command(name = "slab_quote_toolbox_cli", version, about = "Stone slab quote calculator")]
struct Cli {
    /// 설정 파일 경로
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, global = true)]
    config: PathBuf,

    /// 언어 (auto/ko/en-us)
    #[arg(short = 'L', long, default_value = "auto", global = true)]
    lang: String,

    /// 내부 IB 원가도 표시한다 (운영자 전용, 이번 실행에만 적용)
    #[arg(long, global = true)]
    internal: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 대화형 메뉴 (기본)
    Menu,
    /// 지점/두께/색상별 재고 요약
    List,
    /// 한 번의 견적 계산
    Quote {
        #[arg(long)]
        location: String,
        #[arg(long)]
        thickness: String,
        #[arg(long)]
        color: String,
        /// 요청 면적
        #[arg(long)]
        area: f64,
        /// 면적 단위 (sqft/m2)
        #[arg(long, default_value = "sqft")]
        unit: AreaUnit,
    },
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut cfg = config::load_or_default(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    logging::init_tracing(&cfg.log_level);

    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let tr = Translator::new_with_pack(&lang, None);

    let source = build_source(&cfg.source, cfg.request_timeout())
        .context("failed to configure inventory source")?;
    let mut cache = InventoryCache::new(source, cfg.columns.clone());

    match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => app::run(&mut cfg, &cli.config, &tr, &mut cache, cli.internal)?,
        Command::List => ui_cli::print_inventory(&tr, &mut cache),
        Command::Quote {
            location,
            thickness,
            color,
            area,
            unit,
        } => {
            let request = QuoteRequest {
                query: SlabQuery {
                    location,
                    thickness,
                    color,
                },
                area,
                unit,
            };
            if !ui_cli::print_quote(&tr, &cfg, &mut cache, &request, cli.internal) {
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
