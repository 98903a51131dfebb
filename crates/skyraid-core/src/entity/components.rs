//! Component state for the entity variants.
//!
//! These structs hold all per-kind state; behavior that needs the
//! whole entity (sprite swaps, movement, collision dispatch) lives on
//! [`Entity`](super::Entity). Everything here is plain data with small
//! intrinsic operations, serde-serializable so a whole play field can
//! be snapshotted.

use bitflags::bitflags;
use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::clock::GameTime;
use crate::sprite::Sprite;
use crate::tuning::{AlienTunables, ShipTunables};
use crate::weapon::WeaponSystem;

// =============================================================================
// Shared kinematics and status
// =============================================================================

/// Shots that cross this screen-space y threshold (moving up and out
/// of the play field) request their own removal. Enemy shots move
/// downward and never trip it; the stage culls those past the bottom.
pub const OFF_SCREEN_CULL_Y: f32 = -100.0;

/// Spawn offset of an elite alien's shot relative to the alien.
pub const ALIEN_MUZZLE_OFFSET: Vec2 = Vec2::new(15.0, 30.0);

/// Position and velocity of a moving entity.
///
/// Positions are screen-space pixels with sub-pixel `f32` precision;
/// velocities are px/sec. [`Motion::integrate`] advances position by
/// `velocity * delta` and is safe at `delta_ms = 0`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    /// Current position.
    pub position: Vec2,
    /// Current velocity, px/sec.
    pub velocity: Vec2,
}

impl Motion {
    /// Creates a motion at `position` with zero velocity.
    #[must_use]
    pub const fn at(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
        }
    }

    /// Creates a motion at `position` with the given velocity.
    #[must_use]
    pub const fn with_velocity(position: Vec2, velocity: Vec2) -> Self {
        Self { position, velocity }
    }

    /// Advances position by `velocity * delta_ms`.
    #[allow(clippy::cast_precision_loss)]
    pub fn integrate(&mut self, delta_ms: u64) {
        self.position += self.velocity * (delta_ms as f32 / 1000.0);
    }
}

bitflags! {
    /// Compact per-entity status set.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct EntityStatus: u8 {
        /// A shot that has spent its hit budget (or an expired bomb).
        /// Used shots ignore all further collision notifications, so a
        /// single physical overlap reported across multiple detection
        /// passes is consumed once.
        const USED = 1 << 0;
        /// The ship has died (rammed, or health exhausted).
        const DESTROYED = 1 << 1;
    }
}

/// Who fired a projectile. Fixed at creation; decides which entity
/// kind the shot can damage.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Affiliation {
    /// Fired by the player's ship; damages aliens.
    Player,
    /// Fired by an alien; damages the ship.
    Enemy,
}

/// Converts a firing angle and speed into a velocity vector.
///
/// 0° is the firer's forward axis, which is vertical on this play
/// field — so sin feeds the x component and cos the y component, the
/// reverse of the usual screen-axis convention. The sign of `speed`
/// carries direction: player shots use a negative (upward) speed,
/// enemy shots a positive (downward) one.
#[must_use]
pub fn firing_velocity(speed: f32, angle_deg: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new(speed * rad.sin(), speed * rad.cos())
}

// =============================================================================
// Ship
// =============================================================================

/// State for the player's ship.
///
/// The ship owns its [`WeaponSystem`] exclusively for its lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipComponents {
    /// Remaining health against projectile damage.
    pub health: i32,
    /// Left lane bound; leftward movement below it is rejected.
    pub lane_min: f32,
    /// Right lane bound; rightward movement above it is rejected.
    pub lane_max: f32,
    /// Sprite shown once the ship dies.
    pub explosion: Sprite,
    /// The ship's weapon patterns and their cooldowns.
    pub weapons: WeaponSystem,
}

impl ShipComponents {
    /// Creates ship state from tuning, a pre-resolved explosion
    /// sprite, and the ship's weapon system.
    #[must_use]
    pub fn new(explosion: Sprite, weapons: WeaponSystem, tun: &ShipTunables) -> Self {
        Self {
            health: tun.health,
            lane_min: tun.lane_min,
            lane_max: tun.lane_max,
            explosion,
            weapons,
        }
    }
}

// =============================================================================
// Aliens
// =============================================================================

/// Autonomous fire timer carried by elite aliens.
///
/// The interval is redrawn uniformly at random after every shot. The
/// spawn-time draw comes from a shorter range than later draws, so an
/// elite opens fire early and then settles into a slower, wider
/// cadence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireControl {
    /// When this alien last fired (spawn time before the first shot).
    pub last_fire: GameTime,
    /// Current interval; the next shot waits at least this long.
    pub interval_ms: u64,
    /// Redraw range after each shot: minimum (ms).
    pub refire_min_ms: u64,
    /// Redraw range after each shot: exclusive maximum (ms).
    pub refire_max_ms: u64,
    /// Speed handed to spawned shots, px/sec (positive: downward).
    pub shot_speed: f32,
    /// Sprite handed to spawned shots.
    pub shot_sprite: Sprite,
}

impl FireControl {
    /// Creates a fire timer at spawn time, drawing the first interval
    /// from the tuning's initial range.
    pub fn new<R: Rng>(
        shot_sprite: Sprite,
        shot_speed: f32,
        now: GameTime,
        rng: &mut R,
        tun: &AlienTunables,
    ) -> Self {
        Self {
            last_fire: now,
            interval_ms: rng.gen_range(tun.initial_delay_min_ms..tun.initial_delay_max_ms),
            refire_min_ms: tun.refire_delay_min_ms,
            refire_max_ms: tun.refire_delay_max_ms,
            shot_speed,
            shot_sprite,
        }
    }

    /// Returns `true` once the current interval has elapsed.
    #[must_use]
    pub fn is_ready(&self, now: GameTime) -> bool {
        now.since(self.last_fire) >= self.interval_ms
    }

    /// Records a shot at `now` and redraws the interval from the
    /// sustained range.
    pub fn rearm<R: Rng>(&mut self, now: GameTime, rng: &mut R) {
        self.last_fire = now;
        self.interval_ms = rng.gen_range(self.refire_min_ms..self.refire_max_ms);
    }
}

/// State for an alien, standard or elite.
///
/// Elites carry a [`FireControl`]; standard aliens never fire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlienComponents {
    /// Remaining health. Decremented without a floor: negative values
    /// are a valid transient state, and removal at zero-or-below is
    /// the game loop's responsibility.
    pub health: i32,
    /// Present on elites only.
    pub fire_control: Option<FireControl>,
}

impl AlienComponents {
    /// Creates a standard (non-firing) alien.
    #[must_use]
    pub fn standard(tun: &AlienTunables) -> Self {
        Self {
            health: tun.standard_health,
            fire_control: None,
        }
    }

    /// Creates an elite alien with an armed fire timer.
    #[must_use]
    pub fn elite(fire_control: FireControl, tun: &AlienTunables) -> Self {
        Self {
            health: tun.elite_health,
            fire_control: Some(fire_control),
        }
    }
}

// =============================================================================
// Shots
// =============================================================================

/// Lifecycle state of a remote bomb.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BombState {
    /// Drifting, collision-transparent, waiting for [`detonate`]
    /// (`Entity::detonate`).
    Armed,
    /// Blast active; collisions against aliens consume the hit budget
    /// until `expires_at` passes.
    Exploding {
        /// Logical time past which the blast is removed.
        expires_at: GameTime,
    },
}

/// Detonation state and blast assets for a remote bomb.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BombFuse {
    /// Current lifecycle state.
    pub state: BombState,
    /// Blast sprite swapped in at detonation.
    pub blast: Sprite,
    /// Blast duration in milliseconds.
    pub explosion_ms: u64,
}

impl BombFuse {
    /// Creates an armed fuse.
    #[must_use]
    pub const fn armed(blast: Sprite, explosion_ms: u64) -> Self {
        Self {
            state: BombState::Armed,
            blast,
            explosion_ms,
        }
    }

    /// Armed → Exploding transition. Returns `true` if the transition
    /// happened; repeat calls are no-ops and never move the deadline.
    pub fn ignite(&mut self, now: GameTime) -> bool {
        match self.state {
            BombState::Armed => {
                self.state = BombState::Exploding {
                    expires_at: now.saturating_add(self.explosion_ms),
                };
                true
            }
            BombState::Exploding { .. } => false,
        }
    }

    /// Returns `true` once an active blast has outlived its duration.
    #[must_use]
    pub fn is_expired(&self, now: GameTime) -> bool {
        match self.state {
            BombState::Armed => false,
            BombState::Exploding { expires_at } => now > expires_at,
        }
    }
}

/// Subtype of a projectile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShotKind {
    /// A straight shot; behavior varies only through the hit budget.
    Standard,
    /// A remotely detonated bomb with an armed/exploding lifecycle.
    RemoteBomb(BombFuse),
}

/// State for a projectile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotComponents {
    /// Who fired it; fixed at creation.
    pub affiliation: Affiliation,
    /// Valid hits left before the shot is spent.
    pub hits_remaining: i32,
    /// Straight shot or remote bomb.
    pub kind: ShotKind,
}
