use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// 로그 구독자를 초기화한다. `RUST_LOG`가 있으면 설정값보다 우선한다.
///
/// 대화형 프롬프트와 섞이지 않도록 stderr로 출력한다. 두 번째 호출은 무시된다.
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .try_init();
}
