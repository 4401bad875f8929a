use scrubline_core::ConfigError;
use thiserror::Error;

/// Failures surfaced to JavaScript as `JsError`.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("unknown field: {0:?} (expected \"time\" or \"duration\")")]
    UnknownField(String),

    #[error("unknown axis: {0:?} (expected \"horizontal\" or \"vertical\")")]
    UnknownAxis(String),

    #[error("unknown key: {0:?}")]
    UnknownKey(String),

    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to serialize result: {0}")]
    Json(#[from] serde_json::Error),

    #[error("timeline is already handling an event")]
    Busy,
}
