//! 日志初始化

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "tramites_wizard=info";
const VERBOSE_FILTER: &str = "tramites_wizard=debug";

/// 安装全局日志订阅者，`RUST_LOG` 优先
pub fn init() {
    init_with_verbose(false);
}

pub fn init_with_verbose(verbose: bool) {
    let default = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // 重复初始化（如多个测试）时忽略错误
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init();
}
