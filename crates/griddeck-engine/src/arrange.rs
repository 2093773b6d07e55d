//! Whole-layout repacking.
//!
//! Items are optionally reordered, then re-placed one by one through the
//! first-fit search, each seeded only with the already-placed subset. Sizes
//! are preserved (after sanitation); only positions change. Arranging an
//! already-arranged layout is a fixpoint: the same order and sizes walk the
//! same scan and land in the same cells.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use griddeck_core::{GridPoint, GridRect, WidgetBounds, WidgetId};

use crate::placement::first_fit;

/// Item ordering applied before re-placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrangeOrder {
    /// Keep the caller's array order.
    #[default]
    PreserveOrder,
    /// Top row first, then left to right (stable for ties).
    ReadingOrder,
}

/// Auto-arrange preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrangeOptions {
    /// Spacing kept between widgets, in grid units.
    pub gutter: u16,
    pub order: ArrangeOrder,
    /// How long moved widgets animate to their new cells.
    pub animation: Duration,
}

impl Default for ArrangeOptions {
    fn default() -> Self {
        Self {
            gutter: 0,
            order: ArrangeOrder::PreserveOrder,
            animation: Duration::from_millis(200),
        }
    }
}

/// Result of repacking a layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrangeOutcome {
    pub layout: Vec<WidgetBounds>,
    /// Ids whose rectangle actually changed.
    pub moved: Vec<WidgetId>,
}

/// Repack `layout` into the earliest free slots, preserving sizes.
#[must_use]
pub fn arrange(layout: &[WidgetBounds], columns: u16, options: &ArrangeOptions) -> ArrangeOutcome {
    let mut items: Vec<WidgetBounds> = layout.to_vec();
    if options.order == ArrangeOrder::ReadingOrder {
        items.sort_by_key(|b| (b.rect.y, b.rect.x));
    }

    let mut placed: Vec<WidgetBounds> = Vec::with_capacity(items.len());
    let mut moved: Vec<WidgetId> = Vec::new();

    for item in &items {
        let (sane, _) = item.sanitized(columns);
        let rect = match first_fit(
            sane.rect.w,
            sane.rect.h,
            &placed,
            columns,
            GridPoint::default(),
            options.gutter,
        ) {
            Ok(rect) => rect,
            Err(error) => {
                // Backstop: drop the widget below everything already placed
                // rather than losing it.
                let bottom = placed.iter().map(|b| b.rect.bottom()).max().unwrap_or(0);
                debug!(id = sane.id.get(), %error, "arrange fallback to bottom row");
                GridRect::new(0, bottom.saturating_add(options.gutter), sane.rect.w, sane.rect.h)
            }
        };
        if rect != item.rect {
            moved.push(item.id);
        }
        placed.push(WidgetBounds {
            id: sane.id,
            rect,
            limits: sane.limits,
        });
    }

    ArrangeOutcome {
        layout: placed,
        moved,
    }
}
