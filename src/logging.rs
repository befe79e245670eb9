use log::{LevelFilter, Log, Metadata, Record};
use std::env;

/// Environment variable holding the log level filter.
pub const LOG_ENV: &str = "BATTLEBOATS_LOG";

const CRATE: &str = env!("CARGO_CRATE_NAME");

/// Writes this crate's records to stderr. Records from dependencies only
/// pass at `trace`.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
            && (metadata.target().starts_with(CRATE) || log::max_level() == LevelFilter::Trace)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let target = record.target();
        let module = target
            .strip_prefix(CRATE)
            .map(|rest| rest.trim_start_matches("::"))
            .filter(|rest| !rest.is_empty())
            .unwrap_or(target);
        eprintln!("[{:<5} {}] {}", record.level(), module, record.args());
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn level_from_env() -> LevelFilter {
    env::var(LOG_ENV)
        .ok()
        .and_then(|lvl| lvl.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Install the stderr logger with the level named by `BATTLEBOATS_LOG`
/// (`info` when unset or unparsable). Later calls are no-ops.
pub fn init_logging() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level_from_env());
    }
}
