pub mod config;
pub mod drag;
pub mod input;
pub mod panels;
pub mod quantize;
pub mod scroll_sync;
pub mod timeline;
pub mod views;

pub use config::{ConfigError, TimelineConfig};
pub use drag::{DragController, NoCapture, PointerCapture};
pub use input::{FieldEvent, FieldInput, FieldKey, FieldView, NumericField};
pub use quantize::{QuantizeError, quantize, quantize_value};
pub use scroll_sync::ScrollSynchronizer;
pub use timeline::{Field, RulerGeometry, TimelineController, TimelineState};
