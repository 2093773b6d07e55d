//! Space-making: pushing neighbors away from a dragged widget.
//!
//! Runs on every drag move against the latest snapshot, never an
//! incremental delta. Each neighbor overlapping the dragged widget's live
//! bounds is pushed along one axis, away from the dragged centroid, and
//! clamped into the grid. A clamped push is applied partially, never
//! rejected. Single pass: a pushed neighbor may still overlap a third
//! widget until drop or arrange resolves the committed layout.

use serde::{Deserialize, Serialize};

use griddeck_core::{GridRect, WidgetBounds, WidgetId};

/// How displaced neighbors pick their push axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PushStrategy {
    /// Push along the axis with the larger centroid delta, away from the
    /// dragged widget. Ties push horizontally.
    #[default]
    DominantAxis,
    /// Always push downward. Never reorders columns.
    DownOnly,
}

/// Space-making configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushConfig {
    pub enabled: bool,
    /// Push distance per drag move, in grid units.
    pub push_radius: u16,
    /// Hard cap on a single push, in grid units.
    pub max_push_distance: u16,
    pub strategy: PushStrategy,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            push_radius: 2,
            max_push_distance: 4,
            strategy: PushStrategy::DominantAxis,
        }
    }
}

/// One neighbor displaced by the drag, with post-clamp actual offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Displacement {
    pub id: WidgetId,
    /// Applied horizontal offset in grid units (may be zero when fully
    /// clamped at a grid edge).
    pub dx: i32,
    /// Applied vertical offset in grid units.
    pub dy: i32,
    /// The dragged widget that caused the push.
    pub caused_by: WidgetId,
}

/// Result of one space-making pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushOutcome {
    pub layout: Vec<WidgetBounds>,
    /// Neighbors the drag collided with, in layout order.
    pub displaced: Vec<Displacement>,
    /// True iff any neighbor was pushed this pass.
    pub active: bool,
}

/// Push every neighbor overlapping `dragged_rect` away from it.
///
/// `layout` is the committed snapshot; the entry for `dragged_id` is
/// carried through with `dragged_rect` substituted.
#[must_use]
pub fn make_space(
    layout: &[WidgetBounds],
    dragged_id: WidgetId,
    dragged_rect: GridRect,
    columns: u16,
    config: &PushConfig,
) -> PushOutcome {
    let mut result: Vec<WidgetBounds> = Vec::with_capacity(layout.len());
    let mut displaced: Vec<Displacement> = Vec::new();

    let step = i32::from(config.push_radius.min(config.max_push_distance));
    let dragged_center = dragged_rect.center();

    for widget in layout {
        if widget.id == dragged_id {
            result.push(WidgetBounds {
                rect: dragged_rect,
                ..*widget
            });
            continue;
        }
        if step == 0
            || !config.enabled
            || dragged_rect.overlap_area(&widget.rect) == 0
        {
            result.push(*widget);
            continue;
        }

        let (dx, dy) = push_offsets(config.strategy, dragged_center, widget.rect, step);
        let pushed = clamp_into_grid(widget.rect.translated(dx, dy), columns);
        displaced.push(Displacement {
            id: widget.id,
            dx: i32::from(pushed.x) - i32::from(widget.rect.x),
            dy: i32::from(pushed.y) - i32::from(widget.rect.y),
            caused_by: dragged_id,
        });
        result.push(WidgetBounds {
            rect: pushed,
            ..*widget
        });
    }

    let active = !displaced.is_empty();
    PushOutcome {
        layout: result,
        displaced,
        active,
    }
}

/// Pre-clamp push vector for one neighbor.
fn push_offsets(
    strategy: PushStrategy,
    dragged_center: (f64, f64),
    neighbor: GridRect,
    step: i32,
) -> (i32, i32) {
    match strategy {
        PushStrategy::DownOnly => (0, step),
        PushStrategy::DominantAxis => {
            let (cx, cy) = neighbor.center();
            let delta_x = dragged_center.0 - cx;
            let delta_y = dragged_center.1 - cy;
            if delta_x.abs() >= delta_y.abs() {
                // Away from the dragged centroid; concentric overlap falls
                // through to a rightward push.
                if delta_x > 0.0 { (-step, 0) } else { (step, 0) }
            } else if delta_y > 0.0 {
                (0, -step)
            } else {
                (0, step)
            }
        }
    }
}

/// Clamp a pushed rect to `x ∈ [0, columns − w]`, `y ≥ 0`. The grid has no
/// bottom edge.
fn clamp_into_grid(rect: GridRect, columns: u16) -> GridRect {
    let max_x = columns.saturating_sub(rect.w);
    GridRect {
        x: rect.x.min(max_x),
        ..rect
    }
}
