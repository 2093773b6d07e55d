#![forbid(unsafe_code)]

//! Layout engine for editable dashboard grids.
//!
//! Positions, snaps, auto-arranges, and collision-resolves widgets on a
//! fixed-column grid. The caller owns the authoritative layout; the engine
//! transforms snapshots into candidate layouts plus render metadata
//! (alignment guides, push previews, transition descriptors) and the caller
//! commits or discards.
//!
//! Entry point is [`LayoutEngine`], one per editing session:
//!
//! ```
//! use griddeck_core::{GridMetrics, GridRect, UnitPoint, WidgetBounds, WidgetId};
//! use griddeck_engine::{EngineConfig, LayoutEngine};
//!
//! let grid = GridMetrics::new(12, 1200.0, 40.0).unwrap();
//! let mut engine = LayoutEngine::new(EngineConfig::new(grid));
//!
//! let layout = vec![
//!     WidgetBounds::new(WidgetId::new(1).unwrap(), GridRect::new(0, 0, 4, 2)),
//!     WidgetBounds::new(WidgetId::new(2).unwrap(), GridRect::new(4, 0, 4, 2)),
//! ];
//! engine.layout_changed(&layout);
//!
//! let dragged = WidgetId::new(2).unwrap();
//! engine.begin_drag(&layout, dragged);
//! let update = engine.drag_move(&layout, dragged, UnitPoint::new(3.9, 0.1));
//! assert_eq!(update.dragged.w, 4);
//! engine.cancel_drag(); // discard the proposal
//! ```

pub mod animation;
pub mod arrange;
pub mod displace;
pub mod engine;
pub mod guides;
pub mod placement;
pub mod snap;

pub use animation::{
    AnimationConfig, AnimationSnapshot, AnimationTracker, EditPhase, Easing, HIGHLIGHT_LINGER,
    TransitionProperty, TransitionSpec,
};
pub use arrange::{ArrangeOptions, ArrangeOrder, ArrangeOutcome};
pub use displace::{Displacement, PushConfig, PushOutcome, PushStrategy, make_space};
pub use engine::{ArrangeUpdate, DragUpdate, EngineConfig, LayoutEngine, ResizeUpdate};
pub use guides::{GuideOrientation, SnapGuide, derive_guides};
pub use placement::{PlacementError, first_fit};
pub use snap::{SNAP_THRESHOLD_PX, SnapOutcome, resolve_snap};

pub use griddeck_core::{
    GridMetrics, GridMetricsError, GridPoint, GridRect, SizeLimits, UnitPoint, WidgetBounds,
    WidgetId,
};
