//! First-fit placement search.
//!
//! Row-major scan for the earliest non-overlapping slot of a requested
//! size: smallest `y`, then smallest `x`. The scan is bounded by a ceiling
//! derived from the total placed area, so an impossible request returns
//! [`PlacementError::SearchExhausted`] instead of looping.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use griddeck_core::{GridPoint, GridRect, WidgetBounds};

/// Placement search failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementError {
    /// The scan hit its ceiling without finding a free slot. The caller
    /// decides whether to grow the grid or reject the change.
    SearchExhausted { rows_scanned: u32 },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SearchExhausted { rows_scanned } => {
                write!(f, "no free slot within {rows_scanned} scanned rows")
            }
        }
    }
}

impl std::error::Error for PlacementError {}

/// Find the earliest free `w x h` slot, scanning from `start` row-major.
///
/// On the starting row the scan begins at `start.x`; every later row is
/// scanned from column 0. `gutter` units of spacing are kept between the
/// candidate and every occupied rectangle (both sides of the test are
/// inflated on their trailing edges).
pub fn first_fit(
    w: u16,
    h: u16,
    occupied: &[WidgetBounds],
    columns: u16,
    start: GridPoint,
    gutter: u16,
) -> Result<GridRect, PlacementError> {
    let columns = columns.max(1);
    let w = w.clamp(1, columns);
    let h = h.max(1);

    // Worst case every occupied widget stacks in one column above the
    // candidate, so a slot always exists within this many rows.
    let ceiling: u32 = (u32::from(start.y)
        + occupied
            .iter()
            .map(|b| u32::from(b.rect.h) + u32::from(gutter))
            .sum::<u32>()
        + u32::from(h)
        + 1)
        .min(u32::from(u16::MAX));

    let max_x = columns - w;
    let mut y = u32::from(start.y);
    while y <= ceiling {
        let row_start = if y == u32::from(start.y) { start.x } else { 0 };
        for x in row_start..=max_x {
            let candidate = GridRect::new(x, y as u16, w, h);
            let inflated = candidate.inflated(gutter);
            let free = occupied
                .iter()
                .all(|b| !inflated.intersects(&b.rect.inflated(gutter)));
            if free {
                return Ok(candidate);
            }
        }
        y += 1;
    }

    debug!(w, h, columns, rows_scanned = ceiling, "placement search exhausted");
    Err(PlacementError::SearchExhausted {
        rows_scanned: ceiling,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use griddeck_core::WidgetId;

    fn widget(raw: u64, x: u16, y: u16, w: u16, h: u16) -> WidgetBounds {
        WidgetBounds::new(WidgetId::new(raw).unwrap(), GridRect::new(x, y, w, h))
    }

    #[test]
    fn empty_layout_places_at_start() {
        let rect = first_fit(4, 2, &[], 12, GridPoint::default(), 0).unwrap();
        assert_eq!(rect, GridRect::new(0, 0, 4, 2));
    }

    #[test]
    fn sequential_placement_packs_a_row() {
        let mut occupied = Vec::new();
        let mut raw = 1;
        for expected in [(0, 0), (4, 0), (8, 0)] {
            let rect = first_fit(4, 2, &occupied, 12, GridPoint::default(), 0).unwrap();
            assert_eq!((rect.x, rect.y), expected);
            occupied.push(widget(raw, rect.x, rect.y, rect.w, rect.h));
            raw += 1;
        }
    }

    #[test]
    fn wraps_to_next_row_when_full() {
        let occupied = vec![
            widget(1, 0, 0, 4, 2),
            widget(2, 4, 0, 4, 2),
            widget(3, 8, 0, 4, 2),
        ];
        let rect = first_fit(6, 2, &occupied, 12, GridPoint::default(), 0).unwrap();
        assert_eq!(rect, GridRect::new(0, 2, 6, 2));
    }

    #[test]
    fn fills_earlier_holes_first() {
        let occupied = vec![widget(1, 4, 0, 8, 1), widget(2, 0, 1, 12, 1)];
        let rect = first_fit(4, 1, &occupied, 12, GridPoint::default(), 0).unwrap();
        assert_eq!(rect, GridRect::new(0, 0, 4, 1));
    }

    #[test]
    fn preferred_start_skips_earlier_slots() {
        let rect = first_fit(4, 2, &[], 12, GridPoint::new(2, 1), 0).unwrap();
        assert_eq!(rect, GridRect::new(2, 1, 4, 2));
    }

    #[test]
    fn preferred_column_applies_to_first_row_only() {
        // Start column 10 can't hold w=4 on the start row; the next row
        // scans from column 0 again.
        let rect = first_fit(4, 2, &[], 12, GridPoint::new(10, 0), 0).unwrap();
        assert_eq!(rect, GridRect::new(0, 1, 4, 2));
    }

    #[test]
    fn gutter_keeps_spacing_between_widgets() {
        let occupied = vec![widget(1, 0, 0, 4, 2)];
        let rect = first_fit(4, 2, &occupied, 12, GridPoint::default(), 1).unwrap();
        assert_eq!(rect, GridRect::new(5, 0, 4, 2));
    }

    #[test]
    fn deterministic_for_identical_inputs() {
        let occupied = vec![widget(1, 0, 0, 5, 3), widget(2, 7, 1, 5, 2)];
        let a = first_fit(3, 2, &occupied, 12, GridPoint::default(), 0);
        let b = first_fit(3, 2, &occupied, 12, GridPoint::default(), 0);
        assert_eq!(a, b);
    }

    #[test]
    fn oversized_width_is_clamped_not_fatal() {
        let rect = first_fit(40, 2, &[], 12, GridPoint::default(), 0).unwrap();
        assert_eq!(rect.w, 12);
    }

    #[test]
    fn result_never_overlaps_occupied() {
        let occupied = vec![
            widget(1, 0, 0, 6, 4),
            widget(2, 6, 0, 6, 2),
            widget(3, 6, 2, 3, 5),
        ];
        let rect = first_fit(5, 3, &occupied, 12, GridPoint::default(), 0).unwrap();
        for b in &occupied {
            assert_eq!(rect.overlap_area(&b.rect), 0);
        }
    }
}
