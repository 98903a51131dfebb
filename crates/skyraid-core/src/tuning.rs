//! Balance constants for the combat core.
//!
//! Every gameplay number — speeds, cooldowns, health pools, the bomb
//! fuse — lives in the [`Tunables`] tree. Constructors copy the values
//! they need at build time, so there is no global state and a running
//! entity is unaffected by later edits to the tree.
//!
//! The `Default` implementations reproduce the shipped balance
//! exactly; the structs deserialize with serde (every field defaulted)
//! so a partial JSON document can override individual values.

use serde::{Deserialize, Serialize};

/// Top-level tuning tree. See the per-group structs for field
/// meanings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tunables {
    /// Player ship balance.
    pub ship: ShipTunables,
    /// Alien balance, including the elite fire timer.
    pub alien: AlienTunables,
    /// Straight-shot projectile speeds.
    pub shot: ShotTunables,
    /// Weapon-pattern cooldown intervals.
    pub weapons: WeaponTunables,
    /// Remote bomb behavior.
    pub bomb: BombTunables,
}

/// Player ship balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipTunables {
    /// Starting health against projectile damage.
    pub health: i32,
    /// Leftward movement is rejected while `x` is below this bound.
    pub lane_min: f32,
    /// Rightward movement is rejected while `x` is above this bound.
    pub lane_max: f32,
}

impl Default for ShipTunables {
    fn default() -> Self {
        Self {
            health: 3,
            lane_min: 10.0,
            lane_max: 750.0,
        }
    }
}

/// Alien balance. Interval ranges are half-open: a draw from
/// `[min, max)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlienTunables {
    /// Starting health of a standard alien.
    pub standard_health: i32,
    /// Starting health of an elite alien.
    pub elite_health: i32,
    /// First fire interval, drawn at spawn: minimum (ms).
    pub initial_delay_min_ms: u64,
    /// First fire interval, drawn at spawn: exclusive maximum (ms).
    pub initial_delay_max_ms: u64,
    /// Interval redrawn after each shot: minimum (ms).
    pub refire_delay_min_ms: u64,
    /// Interval redrawn after each shot: exclusive maximum (ms).
    pub refire_delay_max_ms: u64,
}

impl Default for AlienTunables {
    fn default() -> Self {
        // The refire range is wider and slower than the spawn-time
        // range: aggression ramps over the encounter. Both ranges are
        // part of the observable difficulty curve.
        Self {
            standard_health: 1,
            elite_health: 2,
            initial_delay_min_ms: 1_000,
            initial_delay_max_ms: 3_000,
            refire_delay_min_ms: 2_500,
            refire_delay_max_ms: 12_500,
        }
    }
}

/// Straight-shot projectile speeds, px/sec along the firing angle.
///
/// Sign encodes direction on the vertical axis: the player fires
/// upward (negative), enemies fire downward (positive).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotTunables {
    /// Speed of player-fired shots.
    pub player_speed: f32,
    /// Speed of enemy-fired shots.
    pub enemy_speed: f32,
}

impl Default for ShotTunables {
    fn default() -> Self {
        Self {
            player_speed: -300.0,
            enemy_speed: 100.0,
        }
    }
}

/// Cooldown interval per weapon pattern, in milliseconds. The four
/// timers are independent; firing one pattern does not gate the
/// others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponTunables {
    /// Primary single shot.
    pub primary_interval_ms: u64,
    /// Three-way spread.
    pub spread_interval_ms: u64,
    /// Two-hit piercing shot.
    pub piercing_interval_ms: u64,
    /// Remotely detonated bomb.
    pub remote_bomb_interval_ms: u64,
}

impl Default for WeaponTunables {
    fn default() -> Self {
        Self {
            primary_interval_ms: 500,
            spread_interval_ms: 1_500,
            piercing_interval_ms: 1_000,
            remote_bomb_interval_ms: 2_500,
        }
    }
}

/// Remote bomb behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BombTunables {
    /// Vertical drift while armed, px/sec. Negative: the armed bomb
    /// floats upward.
    pub drift_speed: f32,
    /// Alien hits absorbed while exploding before the bomb is spent.
    pub hit_budget: i32,
    /// How long the explosion persists after detonation (ms).
    pub explosion_ms: u64,
}

impl Default for BombTunables {
    fn default() -> Self {
        Self {
            drift_speed: -150.0,
            hit_budget: 6,
            explosion_ms: 25,
        }
    }
}
