//! Logical game clock and per-entity tick context.
//!
//! The combat core never reads the system clock. Every timed behavior
//! (weapon cooldowns, the elite alien's fire timer, the remote bomb's
//! explosion deadline) is measured against a [`GameTime`] value that the
//! surrounding loop accumulates and passes in. Two runs fed the same
//! sequence of tick contexts therefore behave identically, pauses and
//! real-time discontinuities included.
//!
//! # Example
//!
//! ```
//! use skyraid_core::clock::GameTime;
//!
//! let start = GameTime::from_millis(1_000);
//! let now = start.saturating_add(250);
//!
//! assert_eq!(now.as_millis(), 1_250);
//! assert_eq!(now.since(start), 250);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entity::EntityId;

/// A point on the logical game clock, in milliseconds.
///
/// `GameTime` is a newtype wrapper around `u64` milliseconds since an
/// arbitrary epoch chosen by the surrounding loop (typically "game
/// start"). It is totally ordered, so deadline checks are plain
/// comparisons.
///
/// # Example
///
/// ```
/// use skyraid_core::clock::GameTime;
///
/// let t0 = GameTime::ZERO;
/// let t1 = GameTime::from_millis(500);
///
/// assert!(t0 < t1);
/// assert_eq!(t1.since(t0), 500);
/// ```
#[derive(
    Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct GameTime(u64);

impl GameTime {
    /// The clock's origin.
    pub const ZERO: Self = Self(0);

    /// Creates a `GameTime` from raw milliseconds.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Returns the raw millisecond value.
    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Returns this time advanced by `millis`, saturating at the
    /// numeric limit.
    #[must_use]
    pub const fn saturating_add(self, millis: u64) -> Self {
        Self(self.0.saturating_add(millis))
    }

    /// Returns the milliseconds elapsed since `earlier`.
    ///
    /// Saturates to zero if `earlier` is in the future, so callers can
    /// compare elapsed time against an interval without underflow
    /// concerns.
    #[must_use]
    pub const fn since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Debug for GameTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GameTime({}ms)", self.0)
    }
}

impl fmt::Display for GameTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

impl From<u64> for GameTime {
    fn from(millis: u64) -> Self {
        Self::from_millis(millis)
    }
}

impl From<GameTime> for u64 {
    fn from(time: GameTime) -> Self {
        time.0
    }
}

/// Per-entity, per-frame context built by the surrounding loop.
///
/// Each frame, the loop constructs one `TickContext` per live entity
/// and hands it to [`Entity::step`](crate::entity::Entity::step) and,
/// after collision detection, to
/// [`Entity::collided_with`](crate::entity::Entity::collided_with).
/// The context is how an entity learns its own registry id (ids are
/// allocated by the loop, not by this crate) and the current logical
/// time.
///
/// Within one frame, all `step` calls must complete before any
/// `collided_with` call is dispatched: collision detection runs on
/// post-move positions only.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickContext {
    /// The registry id of the entity being ticked.
    pub entity_id: EntityId,
    /// Current logical time.
    pub now: GameTime,
    /// Milliseconds elapsed since the previous frame. Zero is valid
    /// and ticks nothing forward.
    pub delta_ms: u64,
}
