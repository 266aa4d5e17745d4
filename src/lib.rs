// ============================================================================
// CRATE LAYOUT
// ============================================================================
//
// Live cockpit display: a simulated telemetry stream drives four instrument
// panels, while three static charts reveal themselves once scrolled into view.

pub mod charts;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod host;
pub mod i18n;
pub mod layout;
pub mod logging;
pub mod panels;
pub mod raster;
pub mod scene;
pub mod telemetry;
pub mod tween;

// ============================================================================
// PUBLIC API
// ============================================================================

pub use charts::ChartKind;
pub use config::{Color, DisplayConfig};
pub use display::DisplayState;
pub use error::{CockpitError, Result};
pub use host::Cockpit;
pub use i18n::Locale;
pub use telemetry::{TelemetryGenerator, TelemetrySample};
