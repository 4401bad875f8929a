use log::{Level, LevelFilter, Metadata, Record};
use wasm_bindgen::prelude::*;

/// Routes `log` records to the browser devtools console.
struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

fn level_filter(level: Option<&str>) -> LevelFilter {
    match level {
        None => LevelFilter::Info,
        Some(name) => name.parse().unwrap_or(LevelFilter::Info),
    }
}

/// Install the panic hook and console logger. `level` is a `log` level name
/// ("off", "error", ... "trace"); unknown names fall back to "info". Safe to
/// call more than once: later calls only change the level.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: Option<String>) {
    console_error_panic_hook::set_once();
    let filter = level_filter(level.as_deref());
    let first = log::set_logger(&LOGGER).is_ok();
    log::set_max_level(filter);
    if first {
        log::info!("scrubline logging at {filter}");
    }
}
