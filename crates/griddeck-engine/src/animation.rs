//! Transient highlight and animation bookkeeping.
//!
//! One [`AnimationTracker`] lives inside each engine instance for the
//! duration of an editing session — never a global. It records which
//! widgets are animating, which guides and displacements the renderer
//! should draw, and drives the single pending highlight clear.
//!
//! The clear is tick-driven: no threads, no clocks. The facade schedules a
//! remaining [`Duration`]; the host calls [`AnimationTracker::tick`] with
//! elapsed time and the clear fires exactly once when the slot drains.
//! Scheduling replaces any prior slot, so overlapping arrangements can
//! never leak a stale clear. Timing affects highlighting only, never the
//! correctness of a returned layout.
//!
//! # Invariants
//!
//! 1. At most one pending clear per tracker.
//! 2. `cancel_all` and `finish_drag` clear synchronously; no later tick
//!    resurrects state from before them.
//! 3. Phase transitions: `Idle → Arranging → Idle` (by tick) and
//!    `Idle → Dragging → Idle` (by drop/cancel).

use std::collections::BTreeSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use griddeck_core::WidgetId;

use crate::displace::Displacement;
use crate::guides::SnapGuide;

/// Extra time highlights linger after the position animation ends.
pub const HIGHLIGHT_LINGER: Duration = Duration::from_millis(100);

/// What the editing session is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditPhase {
    #[default]
    Idle,
    /// An auto-arrange animation is in flight; cleared by the timer.
    Arranging,
    /// A pointer is down on a widget; cleared on drop or cancel.
    Dragging,
}

/// Animation curve for position/size transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
}

impl Easing {
    /// Progress mapping for `t` in `[0, 1]` (quadratic curves).
    #[must_use]
    pub fn progress(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => t * (2.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - 2.0 * (1.0 - t) * (1.0 - t)
                }
            }
        }
    }
}

/// Which visual properties a transition animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionProperty {
    Position,
    Size,
}

/// Per-widget transition descriptor handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionSpec {
    pub duration: Duration,
    pub easing: Easing,
    pub properties: BTreeSet<TransitionProperty>,
}

/// Animation defaults for an engine instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationConfig {
    pub duration: Duration,
    pub easing: Easing,
    pub properties: BTreeSet<TransitionProperty>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(200),
            easing: Easing::EaseInOut,
            properties: BTreeSet::from([TransitionProperty::Position]),
        }
    }
}

impl AnimationConfig {
    /// Transition descriptor with this config's defaults.
    #[must_use]
    pub fn transition(&self) -> TransitionSpec {
        TransitionSpec {
            duration: self.duration,
            easing: self.easing,
            properties: self.properties.clone(),
        }
    }
}

/// Serializable view of the transient state, for the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationSnapshot {
    pub phase: EditPhase,
    pub is_animating: bool,
    pub animating: BTreeSet<WidgetId>,
    pub guides: Vec<SnapGuide>,
    pub displaced: Vec<Displacement>,
    pub push_active: bool,
}

/// Single-slot pending highlight clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingClear {
    remaining: Duration,
    token: u64,
}

/// Engine-instance-owned transient state.
#[derive(Debug, Default)]
pub struct AnimationTracker {
    phase: EditPhase,
    animating: BTreeSet<WidgetId>,
    guides: Vec<SnapGuide>,
    displaced: Vec<Displacement>,
    push_active: bool,
    pending: Option<PendingClear>,
    next_token: u64,
}

impl AnimationTracker {
    /// Fresh tracker for a new editing session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn phase(&self) -> EditPhase {
        self.phase
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.animating.is_empty()
    }

    #[must_use]
    pub const fn animating(&self) -> &BTreeSet<WidgetId> {
        &self.animating
    }

    #[must_use]
    pub fn guides(&self) -> &[SnapGuide] {
        &self.guides
    }

    pub fn set_guides(&mut self, guides: Vec<SnapGuide>) {
        self.guides = guides;
    }

    #[must_use]
    pub fn displaced(&self) -> &[Displacement] {
        &self.displaced
    }

    pub fn set_displacements(&mut self, displaced: Vec<Displacement>, active: bool) {
        self.displaced = displaced;
        self.push_active = active;
    }

    #[must_use]
    pub const fn push_active(&self) -> bool {
        self.push_active
    }

    /// Token of the pending clear, if one is scheduled.
    #[must_use]
    pub fn pending_token(&self) -> Option<u64> {
        self.pending.map(|p| p.token)
    }

    /// Enter `Arranging`: mark `ids` animating and schedule the clear.
    ///
    /// Any previously pending clear is replaced; its token will never fire.
    /// Returns the new clear's token.
    pub fn begin_arranging(
        &mut self,
        ids: impl IntoIterator<Item = WidgetId>,
        clear_after: Duration,
    ) -> u64 {
        self.next_token += 1;
        let token = self.next_token;
        self.phase = EditPhase::Arranging;
        self.animating = ids.into_iter().collect();
        self.pending = Some(PendingClear {
            remaining: clear_after,
            token,
        });
        token
    }

    /// Enter `Dragging`. Cancels any pending clear and prior highlights.
    pub fn begin_drag(&mut self, id: WidgetId) {
        self.pending = None;
        self.phase = EditPhase::Dragging;
        self.animating = BTreeSet::from([id]);
        self.displaced.clear();
        self.push_active = false;
    }

    /// Leave `Dragging` on drop. Synchronous; no timer involved.
    pub fn finish_drag(&mut self) {
        self.clear_transient();
    }

    /// Synchronous clear for drag cancellation or session teardown. The
    /// caller discards the proposed layout; nothing else happens.
    pub fn cancel_all(&mut self) {
        self.clear_transient();
    }

    /// Advance the pending clear by `elapsed`. Returns true when the clear
    /// fired and highlight state changed.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        let Some(pending) = self.pending.as_mut() else {
            return false;
        };
        if let Some(remaining) = pending.remaining.checked_sub(elapsed) {
            if remaining > Duration::ZERO {
                pending.remaining = remaining;
                return false;
            }
        }
        self.pending = None;
        self.animating.clear();
        if self.phase == EditPhase::Arranging {
            self.phase = EditPhase::Idle;
        }
        true
    }

    /// Current transient state as a serializable snapshot.
    #[must_use]
    pub fn snapshot(&self) -> AnimationSnapshot {
        AnimationSnapshot {
            phase: self.phase,
            is_animating: self.is_animating(),
            animating: self.animating.clone(),
            guides: self.guides.clone(),
            displaced: self.displaced.clone(),
            push_active: self.push_active,
        }
    }

    fn clear_transient(&mut self) {
        self.pending = None;
        self.phase = EditPhase::Idle;
        self.animating.clear();
        self.guides.clear();
        self.displaced.clear();
        self.push_active = false;
    }
}
