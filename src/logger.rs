use log::{self, SetLoggerError};
use std::sync::Once;

use crate::progbase;

static INIT: Once = Once::new();

/// Installs an `env_logger` writing to stderr, so stdout carries only data.
/// The level comes from progbase; `RUST_LOG` can add per-module filters.
/// Only the first call has an effect.
pub fn init_logger() -> Result<(), SetLoggerError> {
    let mut result = Ok(());
    INIT.call_once(|| {
        let level = progbase::log_lvl();
        let logger = env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(level)
            .target(env_logger::Target::Stderr)
            .format_module_path(false)
            .build();
        result = log::set_boxed_logger(Box::new(logger)).map(|()| log::set_max_level(level));
        log::debug!("Logging for {} at {}", progbase::exe_name(), level);
    });
    result
}
