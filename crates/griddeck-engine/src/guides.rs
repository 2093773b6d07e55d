//! Alignment-guide derivation.
//!
//! Every widget contributes a vertical guide at its left and right edge and
//! a horizontal guide at its top and bottom edge, in pixels. Guides with
//! identical coordinates merge into one, with the union of contributing
//! ids. The session facade recomputes guides only when the committed layout
//! changes, never per pointer move, so derivation stays O(n).

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use griddeck_core::{GridMetrics, WidgetBounds, WidgetId};

/// Which axis a guide constrains.
///
/// A vertical guide is a line of constant `x`; widgets snap their left or
/// right edge to it. Horizontal guides constrain `y`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum GuideOrientation {
    Vertical,
    Horizontal,
}

/// One alignment coordinate derived from committed widget edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapGuide {
    /// Coordinate along the constrained axis, in pixels.
    pub position_px: f64,
    pub orientation: GuideOrientation,
    /// Widgets whose edges produced this guide.
    pub sources: BTreeSet<WidgetId>,
}

/// Derive the guide list for a layout, optionally excluding one widget
/// (the one being dragged — its own edges must not attract it).
///
/// Output is sorted by orientation then position for deterministic
/// rendering and lookup.
#[must_use]
pub fn derive_guides(
    layout: &[WidgetBounds],
    exclude: Option<WidgetId>,
    metrics: &GridMetrics,
) -> Vec<SnapGuide> {
    // Edge coordinates are integer grid units times the cell size, so
    // duplicates compare equal; merging is keyed on centipixels.
    let mut index: FxHashMap<(GuideOrientation, i64), usize> = FxHashMap::default();
    let mut guides: Vec<SnapGuide> = Vec::with_capacity(layout.len() * 4);

    let mut push = |guides: &mut Vec<SnapGuide>,
                    orientation: GuideOrientation,
                    position_px: f64,
                    id: WidgetId| {
        let key = (orientation, (position_px * 100.0).round() as i64);
        match index.get(&key) {
            Some(&slot) => {
                guides[slot].sources.insert(id);
            }
            None => {
                index.insert(key, guides.len());
                guides.push(SnapGuide {
                    position_px,
                    orientation,
                    sources: BTreeSet::from([id]),
                });
            }
        }
    };

    for widget in layout {
        if Some(widget.id) == exclude {
            continue;
        }
        let rect = widget.rect;
        push(
            &mut guides,
            GuideOrientation::Vertical,
            metrics.col_to_px(f64::from(rect.x)),
            widget.id,
        );
        push(
            &mut guides,
            GuideOrientation::Vertical,
            metrics.col_to_px(f64::from(rect.right())),
            widget.id,
        );
        push(
            &mut guides,
            GuideOrientation::Horizontal,
            metrics.row_to_px(f64::from(rect.y)),
            widget.id,
        );
        push(
            &mut guides,
            GuideOrientation::Horizontal,
            metrics.row_to_px(f64::from(rect.bottom())),
            widget.id,
        );
    }

    guides.sort_by(|a, b| {
        a.orientation
            .cmp(&b.orientation)
            .then(a.position_px.total_cmp(&b.position_px))
    });
    guides
}
