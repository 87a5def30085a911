//! ログ初期化
//!
//! RUST_LOG が設定されていればそれを優先し、なければ
//! `--verbose` で info、通常は warn を標準エラーに出す。

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "recipe_scanner=info,recipe_scanner_common=info"
    } else {
        "warn"
    }
}

pub fn init(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    // 二重初期化（テストなど）は無視
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}
