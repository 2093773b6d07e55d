#![forbid(unsafe_code)]

//! Grid model and geometry primitives for GridDeck dashboards.
//!
//! Everything here is caller-owned plain data: rectangles and points in
//! grid units, widget identity/bounds, and the pixel metrics of the fixed
//! column grid. The engine crate builds its algorithms on these types and
//! never holds on to a layout between calls.

pub mod geometry;
pub mod metrics;
pub mod widget;

pub use geometry::{GridPoint, GridRect, UnitPoint};
pub use metrics::{GridMetrics, GridMetricsError, round_half_up};
pub use widget::{InvalidWidgetId, SizeLimits, WidgetBounds, WidgetId};
