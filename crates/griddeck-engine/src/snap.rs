//! Magnetic snapping of a dragged widget against alignment guides.
//!
//! Each axis is resolved independently: the proposed leading and trailing
//! edges are converted to pixels and tested against the guide list. An edge
//! within [`SNAP_THRESHOLD_PX`] of a guide is replaced by the guide's
//! coordinate; the boundary is closed (a distance exactly equal to the
//! threshold snaps). When both edges are within threshold of distinct
//! guides, the leading edge wins. The result is clamped into the grid and
//! rounded half-up to whole cells.

use serde::{Deserialize, Serialize};

use griddeck_core::{GridMetrics, GridRect, UnitPoint, round_half_up};

use crate::guides::{GuideOrientation, SnapGuide};

/// Default attraction distance in pixels.
pub const SNAP_THRESHOLD_PX: f64 = 8.0;

/// Result of snapping one proposed drag position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapOutcome {
    /// Discrete position after snapping, clamping, and rounding.
    pub rect: GridRect,
    /// Pixel coordinate of the vertical guide that engaged, if any.
    pub engaged_vertical: Option<f64>,
    /// Pixel coordinate of the horizontal guide that engaged, if any.
    pub engaged_horizontal: Option<f64>,
}

/// Snap a proposed position for a widget of size `w x h`.
///
/// `proposed` is in fractional grid units as delivered by drag capture.
#[must_use]
pub fn resolve_snap(
    proposed: UnitPoint,
    w: u16,
    h: u16,
    guides: &[SnapGuide],
    metrics: &GridMetrics,
    threshold_px: f64,
) -> SnapOutcome {
    let col_width = metrics.col_width();
    let row_height = metrics.row_height();

    let (x_units, engaged_vertical) = snap_axis(
        proposed.x,
        f64::from(w),
        col_width,
        guides,
        GuideOrientation::Vertical,
        threshold_px,
    );
    let (y_units, engaged_horizontal) = snap_axis(
        proposed.y,
        f64::from(h),
        row_height,
        guides,
        GuideOrientation::Horizontal,
        threshold_px,
    );

    let max_x = f64::from(metrics.columns().saturating_sub(w));
    let x = round_half_up(x_units.clamp(0.0, max_x));
    let y = round_half_up(y_units.max(0.0));

    SnapOutcome {
        rect: GridRect::new(x, y, w, h),
        engaged_vertical,
        engaged_horizontal,
    }
}

/// Resolve one axis. Returns the adjusted coordinate in grid units and the
/// engaged guide position, if any.
fn snap_axis(
    position_units: f64,
    extent_units: f64,
    unit_px: f64,
    guides: &[SnapGuide],
    orientation: GuideOrientation,
    threshold_px: f64,
) -> (f64, Option<f64>) {
    let leading_px = position_units * unit_px;
    let trailing_px = (position_units + extent_units) * unit_px;

    // Leading edge wins over trailing when both are in range.
    if let Some(guide_px) = nearest_guide(guides, orientation, leading_px, threshold_px) {
        return (guide_px / unit_px, Some(guide_px));
    }
    if let Some(guide_px) = nearest_guide(guides, orientation, trailing_px, threshold_px) {
        return (guide_px / unit_px - extent_units, Some(guide_px));
    }
    (position_units, None)
}

/// Closest guide of the given orientation within the closed threshold.
fn nearest_guide(
    guides: &[SnapGuide],
    orientation: GuideOrientation,
    edge_px: f64,
    threshold_px: f64,
) -> Option<f64> {
    let mut best: Option<(f64, f64)> = None;
    for guide in guides {
        if guide.orientation != orientation {
            continue;
        }
        let distance = (guide.position_px - edge_px).abs();
        if distance > threshold_px {
            continue;
        }
        match best {
            Some((best_distance, _)) if distance >= best_distance => {}
            _ => best = Some((distance, guide.position_px)),
        }
    }
    best.map(|(_, position)| position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    use griddeck_core::{WidgetBounds, WidgetId};

    use crate::guides::derive_guides;

    fn id(raw: u64) -> WidgetId {
        WidgetId::new(raw).unwrap()
    }

    /// 12 columns, 16 px per column, 16 px rows: one grid unit is 16 px,
    /// so the 8 px threshold is half a cell and distinguishable from
    /// plain rounding.
    fn metrics() -> GridMetrics {
        GridMetrics::new(12, 192.0, 16.0).unwrap()
    }

    fn guide(orientation: GuideOrientation, position_px: f64) -> SnapGuide {
        SnapGuide {
            position_px,
            orientation,
            sources: BTreeSet::from([id(99)]),
        }
    }

    #[test]
    fn edge_within_threshold_snaps() {
        let stationary = vec![WidgetBounds::new(
            id(1),
            griddeck_core::GridRect::new(0, 0, 4, 2),
        )];
        let guides = derive_guides(&stationary, None, &metrics());

        // Right edge of the stationary widget sits at 64 px (4 units).
        // Leading edge proposed 5 px away: attracted, lands exactly at x=4.
        let proposed = UnitPoint::new((64.0 + 5.0) / 16.0, 0.0);
        let outcome = resolve_snap(proposed, 4, 2, &guides, &metrics(), SNAP_THRESHOLD_PX);
        assert_eq!(outcome.rect.x, 4);
        assert_eq!(outcome.engaged_vertical, Some(64.0));
    }

    #[test]
    fn boundary_is_closed() {
        let guides = vec![guide(GuideOrientation::Vertical, 64.0)];

        // Exactly at the threshold: snaps down to x=4.
        let at = UnitPoint::new((64.0 + SNAP_THRESHOLD_PX) / 16.0, 0.0);
        let outcome = resolve_snap(at, 4, 2, &guides, &metrics(), SNAP_THRESHOLD_PX);
        assert_eq!(outcome.rect.x, 4);
        assert!(outcome.engaged_vertical.is_some());

        // One pixel beyond: no snap, and half-up rounding pulls to x=5.
        let beyond = UnitPoint::new((64.0 + SNAP_THRESHOLD_PX + 1.0) / 16.0, 0.0);
        let outcome = resolve_snap(beyond, 4, 2, &guides, &metrics(), SNAP_THRESHOLD_PX);
        assert_eq!(outcome.rect.x, 5);
        assert_eq!(outcome.engaged_vertical, None);
    }

    #[test]
    fn leading_edge_wins_over_trailing() {
        // Widget is 4 units (64 px) wide. Proposed x = 1.25 units (20 px):
        // leading edge is 4 px from the guide at 16, trailing edge
        // (20 + 64 = 84 px) is 4 px from the guide at 80. Leading wins.
        let guides = vec![
            guide(GuideOrientation::Vertical, 16.0),
            guide(GuideOrientation::Vertical, 80.0),
        ];
        let outcome = resolve_snap(
            UnitPoint::new(1.25, 0.0),
            4,
            2,
            &guides,
            &metrics(),
            SNAP_THRESHOLD_PX,
        );
        assert_eq!(outcome.rect.x, 1);
        assert_eq!(outcome.engaged_vertical, Some(16.0));
    }

    #[test]
    fn trailing_edge_snaps_when_leading_misses() {
        // Proposed x = 0.75 units (12 px): leading edge is 12 px from the
        // guide at 0 (out of range), trailing (12 + 64 = 76 px) is 4 px
        // from the guide at 80. Trailing aligns: x = 80/16 - 4 = 1.
        let guides = vec![
            guide(GuideOrientation::Vertical, 0.0),
            guide(GuideOrientation::Vertical, 80.0),
        ];
        let outcome = resolve_snap(
            UnitPoint::new(0.75, 0.0),
            4,
            2,
            &guides,
            &metrics(),
            SNAP_THRESHOLD_PX,
        );
        assert_eq!(outcome.rect.x, 1);
        assert_eq!(outcome.engaged_vertical, Some(80.0));
    }

    #[test]
    fn axes_resolve_independently() {
        let guides = vec![
            guide(GuideOrientation::Vertical, 32.0),
            guide(GuideOrientation::Horizontal, 48.0),
        ];
        let outcome = resolve_snap(
            UnitPoint::new(2.2, 3.2),
            4,
            2,
            &guides,
            &metrics(),
            SNAP_THRESHOLD_PX,
        );
        assert_eq!(outcome.rect.x, 2);
        assert_eq!(outcome.rect.y, 3);
        assert_eq!(outcome.engaged_vertical, Some(32.0));
        assert_eq!(outcome.engaged_horizontal, Some(48.0));
    }

    #[test]
    fn result_is_clamped_into_the_grid() {
        let outcome = resolve_snap(
            UnitPoint::new(20.0, -3.0),
            4,
            2,
            &[],
            &metrics(),
            SNAP_THRESHOLD_PX,
        );
        assert_eq!(outcome.rect.x, 8); // columns - w
        assert_eq!(outcome.rect.y, 0);
    }

    #[test]
    fn no_guides_means_plain_rounding() {
        let outcome = resolve_snap(
            UnitPoint::new(2.5, 1.4),
            2,
            2,
            &[],
            &metrics(),
            SNAP_THRESHOLD_PX,
        );
        assert_eq!(outcome.rect, GridRect::new(3, 1, 2, 2));
    }
}
