//! 핵심 계산 로직을 라이브러리로 분리하여 CLI 와 GUI 가 같은 견적 흐름을 쓰도록 한다.

pub mod app;
pub mod config;
pub mod i18n;
pub mod inventory;
pub mod logging;
pub mod pricing;
pub mod quote;
pub mod ui_cli;
pub mod units;
