pub mod commands;
pub mod presentation;
pub mod theme;
pub mod types;

pub use commands::RenderCommand;
pub use presentation::{Axis, PanelId, PanelScroll, Presentation, ScrollUpdate, SyncGroupId};
pub use theme::ThemeToken;
pub use types::{Bounds, Point, Rect};
