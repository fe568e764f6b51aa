//! Журналирование через tracing
//!
//! Библиотека только пишет события; подписчик ставит бинарник.

use tracing_subscriber::EnvFilter;

use crate::error::{ConfigError, Result};

/// Установить глобальный подписчик, пишущий в stderr.
///
/// `RUST_LOG` имеет приоритет; иначе уровень `warn`, с `verbose` - `debug`.
pub fn init(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| ConfigError::Other(format!("Не удалось настроить журналирование: {}", e)))
}
