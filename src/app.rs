use std::path::Path;

use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::i18n::{self, Translator};
use crate::inventory::InventoryCache;
use crate::ui_cli;
use crate::ui_cli::MenuChoice;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일/콘솔 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
///
/// 재고/선택/면적 오류는 메시지로 보여주고 메뉴로 돌아간다. 콘솔 입출력과
/// 설정 저장 오류만 호출자에게 전달된다.
///
/// `operator`는 이번 실행에만 적용되는 운영자 모드 플래그로, 설정 파일에는 저장되지 않는다.
pub fn run(
    config: &mut Config,
    config_path: &Path,
    tr: &Translator,
    cache: &mut InventoryCache,
    operator: bool,
) -> Result<(), AppError> {
    loop {
        match ui_cli::main_menu(tr)? {
            MenuChoice::Quote => ui_cli::handle_quote(tr, config, cache, operator)?,
            MenuChoice::Inventory => ui_cli::handle_inventory(tr, cache),
            MenuChoice::Reload => ui_cli::handle_reload(tr, cache),
            MenuChoice::Settings => {
                if ui_cli::handle_settings(tr, config)? {
                    config.save_to(config_path)?;
                }
            }
            MenuChoice::Exit => {
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
