//! Session facade.
//!
//! One [`LayoutEngine`] per active editing session. The caller owns the
//! authoritative layout and feeds snapshots in; every operation returns a
//! candidate layout plus metadata and the caller commits or discards.
//! Nothing here mutates the committed layout, so cancelling a drag is
//! simply dropping the proposal.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use griddeck_core::{GridMetrics, GridPoint, GridRect, UnitPoint, WidgetBounds, WidgetId};

use crate::animation::{
    AnimationConfig, AnimationSnapshot, AnimationTracker, EditPhase, HIGHLIGHT_LINGER,
    TransitionSpec,
};
use crate::arrange::{self, ArrangeOptions};
use crate::displace::{Displacement, PushConfig, make_space};
use crate::guides::{SnapGuide, derive_guides};
use crate::placement::{PlacementError, first_fit};
use crate::snap::{SNAP_THRESHOLD_PX, resolve_snap};

/// Engine configuration for one editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// When false, every operation is the identity on its layout input.
    pub enabled: bool,
    pub grid: GridMetrics,
    /// Attraction distance for magnetic snapping, in pixels.
    pub snap_threshold_px: f64,
    pub push: PushConfig,
    pub animation: AnimationConfig,
}

impl EngineConfig {
    /// Config with defaults for the given grid.
    #[must_use]
    pub fn new(grid: GridMetrics) -> Self {
        Self {
            enabled: true,
            grid,
            snap_threshold_px: SNAP_THRESHOLD_PX,
            push: PushConfig::default(),
            animation: AnimationConfig::default(),
        }
    }

    /// Disable the engine (builder pattern).
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Override the snap threshold (builder pattern).
    #[must_use]
    pub fn with_snap_threshold(mut self, px: f64) -> Self {
        self.snap_threshold_px = px;
        self
    }

    /// Override the push configuration (builder pattern).
    #[must_use]
    pub fn with_push(mut self, push: PushConfig) -> Self {
        self.push = push;
        self
    }

    /// Override the animation defaults (builder pattern).
    #[must_use]
    pub fn with_animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }
}

/// Candidate produced by one drag move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragUpdate {
    /// Candidate layout: dragged widget at its snapped cell, neighbors
    /// pushed aside. Commit or discard.
    pub layout: Vec<WidgetBounds>,
    /// Snapped, clamped, rounded bounds of the dragged widget.
    pub dragged: GridRect,
    /// Pixel position of the vertical guide that engaged, if any.
    pub engaged_vertical: Option<f64>,
    /// Pixel position of the horizontal guide that engaged, if any.
    pub engaged_horizontal: Option<f64>,
    pub displaced: Vec<Displacement>,
}

/// Candidate produced by a resize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResizeUpdate {
    pub layout: Vec<WidgetBounds>,
    /// Resized bounds after limit and grid clamping.
    pub rect: GridRect,
    /// True when size limits or the grid cut the requested size down.
    pub limited: bool,
}

/// Result of an auto-arrange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrangeUpdate {
    pub layout: Vec<WidgetBounds>,
    /// Ids whose rectangle changed.
    pub moved: Vec<WidgetId>,
    /// Transition descriptors for the moved widgets.
    pub transitions: Vec<(WidgetId, TransitionSpec)>,
}

/// The dashboard layout engine for one editing session.
#[derive(Debug)]
pub struct LayoutEngine {
    config: EngineConfig,
    tracker: AnimationTracker,
    guides: Vec<SnapGuide>,
    dragging: Option<WidgetId>,
}

impl LayoutEngine {
    /// Create an engine. Call [`Self::layout_changed`] with the committed
    /// layout before the first drag so guides have something to attract to.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            tracker: AnimationTracker::new(),
            guides: Vec::new(),
            dragging: None,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current alignment guides (excluding the dragged widget while a drag
    /// is active).
    #[must_use]
    pub fn guides(&self) -> &[SnapGuide] {
        &self.guides
    }

    /// Transient highlight state for the rendering layer.
    #[must_use]
    pub fn animation(&self) -> AnimationSnapshot {
        self.tracker.snapshot()
    }

    #[must_use]
    pub fn phase(&self) -> EditPhase {
        self.tracker.phase()
    }

    /// Refresh the guide cache from a newly committed layout. Guides are
    /// derived here, not per pointer move.
    pub fn layout_changed(&mut self, layout: &[WidgetBounds]) {
        if !self.config.enabled {
            return;
        }
        self.guides = derive_guides(layout, self.dragging, &self.config.grid);
    }

    /// Enter a drag on `id`: cache guides that exclude the dragged widget's
    /// own edges and flip the tracker to `Dragging`.
    pub fn begin_drag(&mut self, layout: &[WidgetBounds], id: WidgetId) {
        if !self.config.enabled {
            return;
        }
        self.dragging = Some(id);
        self.guides = derive_guides(layout, Some(id), &self.config.grid);
        self.tracker.begin_drag(id);
        self.tracker.set_guides(self.guides.clone());
    }

    /// Resolve one drag move against the committed snapshot.
    ///
    /// Safe at pointer frequency: recomputes everything from `layout` and
    /// `proposed`, holds no per-move state. Calling without a preceding
    /// [`Self::begin_drag`] implicitly starts the drag.
    pub fn drag_move(
        &mut self,
        layout: &[WidgetBounds],
        id: WidgetId,
        proposed: UnitPoint,
    ) -> DragUpdate {
        let Some(current) = layout.iter().find(|b| b.id == id) else {
            warn!(id = id.get(), "drag update for a widget not in the layout");
            return self.identity_drag(layout, GridRect::default());
        };
        if !self.config.enabled {
            return self.identity_drag(layout, current.rect);
        }
        if self.dragging != Some(id) {
            self.begin_drag(layout, id);
        }

        let (sane, repaired) = current.sanitized(self.config.grid.columns());
        if repaired {
            warn!(id = id.get(), "repaired out-of-grid widget bounds");
        }

        let snap = resolve_snap(
            proposed,
            sane.rect.w,
            sane.rect.h,
            &self.guides,
            &self.config.grid,
            self.config.snap_threshold_px,
        );
        let push = make_space(
            layout,
            id,
            snap.rect,
            self.config.grid.columns(),
            &self.config.push,
        );
        self.tracker
            .set_displacements(push.displaced.clone(), push.active);

        DragUpdate {
            layout: push.layout,
            dragged: snap.rect,
            engaged_vertical: snap.engaged_vertical,
            engaged_horizontal: snap.engaged_horizontal,
            displaced: push.displaced,
        }
    }

    /// Drop the dragged widget. Clears drag state synchronously and hands
    /// back transition descriptors for the widgets that changed cells.
    pub fn end_drag(&mut self) -> Vec<(WidgetId, TransitionSpec)> {
        let mut transitions: Vec<(WidgetId, TransitionSpec)> = Vec::new();
        if self.config.enabled {
            let descriptor = self.config.animation.transition();
            if let Some(id) = self.dragging {
                transitions.push((id, descriptor.clone()));
            }
            for displacement in self.tracker.displaced() {
                if displacement.dx != 0 || displacement.dy != 0 {
                    transitions.push((displacement.id, descriptor.clone()));
                }
            }
        }
        self.dragging = None;
        self.tracker.finish_drag();
        transitions
    }

    /// Abort the drag: the caller discards the proposal and keeps the
    /// pre-drag layout. All transient state clears now, without a timer,
    /// so no stale highlight survives to the next frame.
    pub fn cancel_drag(&mut self) {
        self.dragging = None;
        self.tracker.cancel_all();
    }

    /// Find a slot for a new `w x h` widget.
    pub fn place_new(
        &self,
        layout: &[WidgetBounds],
        w: u16,
        h: u16,
        preferred: Option<GridPoint>,
    ) -> Result<GridRect, PlacementError> {
        let columns = self.config.grid.columns();
        let start = preferred.unwrap_or_default();
        if !self.config.enabled {
            let w = w.clamp(1, columns);
            let x = start.x.min(columns - w);
            return Ok(GridRect::new(x, start.y, w, h.max(1)));
        }
        first_fit(w, h, layout, columns, start, 0)
    }

    /// Resize `id` to `proposed`, clamped to its size limits and the grid.
    pub fn resize(
        &mut self,
        layout: &[WidgetBounds],
        id: WidgetId,
        proposed: GridRect,
    ) -> ResizeUpdate {
        let Some(current) = layout.iter().find(|b| b.id == id) else {
            warn!(id = id.get(), "resize for a widget not in the layout");
            return ResizeUpdate {
                layout: layout.to_vec(),
                rect: GridRect::default(),
                limited: false,
            };
        };
        if !self.config.enabled {
            return ResizeUpdate {
                layout: layout.to_vec(),
                rect: current.rect,
                limited: false,
            };
        }

        let candidate = WidgetBounds {
            rect: proposed,
            ..*current
        };
        let (fixed, _) = candidate.sanitized(self.config.grid.columns());
        let limited = fixed.rect.w != proposed.w || fixed.rect.h != proposed.h;

        let layout = layout
            .iter()
            .map(|b| if b.id == id { fixed } else { *b })
            .collect();
        ResizeUpdate {
            layout,
            rect: fixed.rect,
            limited,
        }
    }

    /// Repack the whole layout and start the arrange animation.
    pub fn arrange(&mut self, layout: &[WidgetBounds], options: &ArrangeOptions) -> ArrangeUpdate {
        if !self.config.enabled {
            return ArrangeUpdate {
                layout: layout.to_vec(),
                moved: Vec::new(),
                transitions: Vec::new(),
            };
        }

        let columns = self.config.grid.columns();
        for widget in layout {
            let (_, repaired) = widget.sanitized(columns);
            if repaired {
                warn!(id = widget.id.get(), "repaired out-of-grid widget bounds");
            }
        }

        let outcome = arrange::arrange(layout, columns, options);
        self.tracker.begin_arranging(
            outcome.layout.iter().map(|b| b.id),
            options.animation + HIGHLIGHT_LINGER,
        );

        let descriptor = TransitionSpec {
            duration: options.animation,
            easing: self.config.animation.easing,
            properties: self.config.animation.properties.clone(),
        };
        let transitions = outcome
            .moved
            .iter()
            .map(|&id| (id, descriptor.clone()))
            .collect();

        ArrangeUpdate {
            layout: outcome.layout,
            moved: outcome.moved,
            transitions,
        }
    }

    /// Advance the highlight clear. Returns true when highlight state
    /// changed and the renderer should repaint.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        self.tracker.tick(elapsed)
    }

    fn identity_drag(&self, layout: &[WidgetBounds], dragged: GridRect) -> DragUpdate {
        DragUpdate {
            layout: layout.to_vec(),
            dragged,
            engaged_vertical: None,
            engaged_horizontal: None,
            displaced: Vec::new(),
        }
    }
}
