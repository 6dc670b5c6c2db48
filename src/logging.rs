use env_logger::{Builder, Env};
use log::LevelFilter;

use kreassign::constants::LOG_ENV_VAR;

/// Initialize logging, given a verbosity level.
///
/// The level can be overridden via the [`LOG_ENV_VAR`] environment variable.
///
/// # Arguments
///
/// * `verbosity_level` - `0` is `WARN`; every step above or below moves one level up or down
pub fn init(verbosity_level: i8) {
    let default_level = match verbosity_level {
        i8::MIN..=-2 => LevelFilter::Off,
        -1 => LevelFilter::Error,
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        3..=i8::MAX => LevelFilter::Trace,
    };

    Builder::new()
        .filter_level(default_level)
        .parse_env(Env::new().filter(LOG_ENV_VAR))
        .format_timestamp_millis()
        .init();
}
