//! Browser bridge for the scrubline timeline widget.
//!
//! The host page owns the DOM: it measures the ruler, forwards `mousedown`,
//! `scroll` and number-input events to a [`TimelineWidget`], and renders the
//! JSON presentation and render commands it gets back. Drag tracking outside
//! the ruler is handled here with window-level listeners.

mod capture;
mod error;
mod logging;
mod names;
mod widget;

pub use error::BridgeError;
pub use logging::init_logging;
pub use widget::TimelineWidget;
