//! Widget identity, bounds, and size limits.
//!
//! The authoritative `Vec<WidgetBounds>` is owned by the caller; engine
//! operations take it by reference and produce new vectors. Malformed
//! bounds are repaired, never rejected — a dashboard must always render
//! something.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::GridRect;

/// Stable identifier for dashboard widgets.
///
/// `0` is reserved/invalid so IDs are always non-zero. IDs are minted by
/// the persistence layer that owns widget records; the engine only carries
/// them through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(u64);

impl WidgetId {
    /// Lowest valid widget ID.
    pub const MIN: Self = Self(1);

    /// Create a new widget ID, rejecting 0.
    pub fn new(raw: u64) -> Result<Self, InvalidWidgetId> {
        if raw == 0 {
            return Err(InvalidWidgetId);
        }
        Ok(Self(raw))
    }

    /// Get the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Default for WidgetId {
    fn default() -> Self {
        Self::MIN
    }
}

/// Error for the zero widget ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidWidgetId;

impl fmt::Display for InvalidWidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "widget id 0 is reserved")
    }
}

impl std::error::Error for InvalidWidgetId {}

/// Optional size limits for a widget, in grid units.
///
/// When both a minimum and maximum are set and conflict, the minimum wins:
/// an undersized widget is worse than an oversized one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SizeLimits {
    #[serde(default)]
    pub min_w: Option<u16>,
    #[serde(default)]
    pub max_w: Option<u16>,
    #[serde(default)]
    pub min_h: Option<u16>,
    #[serde(default)]
    pub max_h: Option<u16>,
}

impl SizeLimits {
    /// No limits.
    pub const NONE: Self = Self {
        min_w: None,
        max_w: None,
        min_h: None,
        max_h: None,
    };

    /// Clamp a size to these limits. Maximums apply first, then minimums.
    #[must_use]
    pub fn clamp_size(&self, w: u16, h: u16) -> (u16, u16) {
        let mut w = w;
        let mut h = h;
        if let Some(max) = self.max_w {
            w = w.min(max);
        }
        if let Some(max) = self.max_h {
            h = h.min(max);
        }
        if let Some(min) = self.min_w {
            w = w.max(min);
        }
        if let Some(min) = self.min_h {
            h = h.max(min);
        }
        (w, h)
    }
}

/// Position and size of one widget on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetBounds {
    pub id: WidgetId,
    pub rect: GridRect,
    #[serde(default)]
    pub limits: SizeLimits,
}

impl WidgetBounds {
    /// Create bounds without size limits.
    #[must_use]
    pub const fn new(id: WidgetId, rect: GridRect) -> Self {
        Self {
            id,
            rect,
            limits: SizeLimits::NONE,
        }
    }

    /// Attach size limits (builder pattern).
    #[must_use]
    pub const fn with_limits(mut self, limits: SizeLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Repair bounds that violate the grid: zero sizes become 1, sizes are
    /// clamped to the limits and the column count, and the rectangle is
    /// shifted left so `x + w <= columns`.
    ///
    /// Returns the repaired bounds and whether anything changed, so callers
    /// can log the inconsistency.
    #[must_use]
    pub fn sanitized(&self, columns: u16) -> (Self, bool) {
        let columns = columns.max(1);
        let rect = self.rect;

        let mut w = rect.w.max(1);
        let mut h = rect.h.max(1);
        (w, h) = self.limits.clamp_size(w, h);
        w = w.clamp(1, columns);
        h = h.max(1);

        let x = if u32::from(rect.x) + u32::from(w) > u32::from(columns) {
            columns - w
        } else {
            rect.x
        };

        let repaired = Self {
            id: self.id,
            rect: GridRect::new(x, rect.y, w, h),
            limits: self.limits,
        };
        let changed = repaired.rect != self.rect;
        (repaired, changed)
    }
}
