//! Weapon patterns, cooldown gating, and fire input codes.
//!
//! A [`WeaponSystem`] is a per-ship factory for the four fire
//! patterns. Each pattern has its own [`Cooldown`], tracked
//! independently — firing one pattern never gates the others. A fire
//! call either spawns the pattern's projectile(s) through the
//! [`Game`] collaborator and returns `true`, or does nothing and
//! returns `false`; cooldown rejection is the only failure mode.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::clock::GameTime;
use crate::entity::components::Affiliation;
use crate::entity::Entity;
use crate::game::Game;
use crate::sprite::{AssetError, Sprite, SpriteProvider};
use crate::tuning::{BombTunables, Tunables};

/// Asset path for player projectiles.
pub const SHOT_SPRITE_PATH: &str = "sprites/shot.gif";
/// Asset path for the remote bomb's blast.
pub const BLAST_SPRITE_PATH: &str = "sprites/big_boom.gif";

/// Spawn offset of straight shots relative to the owner's position.
const MUZZLE_OFFSET: Vec2 = Vec2::new(10.0, -30.0);
/// Spread pattern firing angles, degrees off the forward axis.
const SPREAD_ANGLES: [f32; 3] = [0.0, 30.0, -30.0];

// =============================================================================
// Input codes
// =============================================================================

/// An opaque, discrete fire input.
///
/// The mapping from physical keys to codes belongs to the input layer;
/// the core only matches codes against the four named constants and
/// treats everything else as "no weapon selected".
///
/// # Example
///
/// ```
/// use skyraid_core::weapon::InputCode;
///
/// assert_ne!(InputCode::FIRE_PRIMARY, InputCode::FIRE_SPREAD);
/// assert_ne!(InputCode::new(200), InputCode::FIRE_PRIMARY);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputCode(u8);

impl InputCode {
    /// Selects the primary single shot.
    pub const FIRE_PRIMARY: Self = Self(0);
    /// Selects the three-way spread.
    pub const FIRE_SPREAD: Self = Self(1);
    /// Selects the piercing shot.
    pub const FIRE_PIERCING: Self = Self(2);
    /// Selects the remote bomb.
    pub const FIRE_REMOTE_BOMB: Self = Self(3);

    /// Creates a code from a raw value.
    #[must_use]
    pub const fn new(code: u8) -> Self {
        Self(code)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }
}

// =============================================================================
// Cooldown
// =============================================================================

/// One pattern's fire-rate gate.
///
/// `last_fire` starts as `None`, so a fresh weapon fires on the first
/// attempt; afterwards an attempt succeeds once at least `interval_ms`
/// has elapsed since the previous success.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cooldown {
    /// Minimum gap between successful fires, ms.
    pub interval_ms: u64,
    /// When this pattern last fired; `None` before the first shot.
    pub last_fire: Option<GameTime>,
}

impl Cooldown {
    /// Creates a gate that is immediately ready.
    #[must_use]
    pub const fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_fire: None,
        }
    }

    /// Returns `true` if a fire attempt at `now` would be accepted.
    #[must_use]
    pub fn is_ready(&self, now: GameTime) -> bool {
        self.last_fire
            .map_or(true, |last| now.since(last) >= self.interval_ms)
    }

    /// Records a successful fire at `now`.
    pub fn stamp(&mut self, now: GameTime) {
        self.last_fire = Some(now);
    }
}

// =============================================================================
// Weapon system
// =============================================================================

/// The four fire patterns.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FirePattern {
    /// One straight shot, hit budget 1.
    Primary,
    /// Three simultaneous shots at 0°/+30°/−30°, hit budget 1 each.
    Spread,
    /// One straight shot that survives a first hit (budget 2).
    Piercing,
    /// One armed remote bomb (budget 6 once detonated).
    RemoteBomb,
}

impl std::fmt::Display for FirePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Spread => write!(f, "spread"),
            Self::Piercing => write!(f, "piercing"),
            Self::RemoteBomb => write!(f, "remote-bomb"),
        }
    }
}

/// Cooldown-gated projectile factory owned by the player's ship.
///
/// Holds no resources beyond the four timers and the pre-resolved
/// sprites: cooldown is the only ammunition. The owner is not stored —
/// its position arrives with each fire call, which keeps the system
/// free of entity references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponSystem {
    shot_sprite: Sprite,
    blast_sprite: Sprite,
    primary: Cooldown,
    spread: Cooldown,
    piercing: Cooldown,
    remote_bomb: Cooldown,
    shot_speed: f32,
    bomb_tun: BombTunables,
}

impl WeaponSystem {
    /// Creates a weapon system, resolving its projectile sprites.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError`] if [`SHOT_SPRITE_PATH`] or
    /// [`BLAST_SPRITE_PATH`] cannot be resolved.
    pub fn new(store: &dyn SpriteProvider, tun: &Tunables) -> Result<Self, AssetError> {
        Ok(Self {
            shot_sprite: store.get_sprite(SHOT_SPRITE_PATH)?,
            blast_sprite: store.get_sprite(BLAST_SPRITE_PATH)?,
            primary: Cooldown::new(tun.weapons.primary_interval_ms),
            spread: Cooldown::new(tun.weapons.spread_interval_ms),
            piercing: Cooldown::new(tun.weapons.piercing_interval_ms),
            remote_bomb: Cooldown::new(tun.weapons.remote_bomb_interval_ms),
            shot_speed: tun.shot.player_speed,
            bomb_tun: tun.bomb.clone(),
        })
    }

    /// Returns the gate for `pattern`.
    #[must_use]
    pub const fn cooldown(&self, pattern: FirePattern) -> &Cooldown {
        match pattern {
            FirePattern::Primary => &self.primary,
            FirePattern::Spread => &self.spread,
            FirePattern::Piercing => &self.piercing,
            FirePattern::RemoteBomb => &self.remote_bomb,
        }
    }

    /// Returns `true` if firing `pattern` at `now` would succeed.
    #[must_use]
    pub fn is_ready(&self, pattern: FirePattern, now: GameTime) -> bool {
        self.cooldown(pattern).is_ready(now)
    }

    /// Fires one straight shot (hit budget 1) from `origin`.
    ///
    /// Returns `false` without side effects while the pattern is on
    /// cooldown.
    pub fn fire_primary(&mut self, origin: Vec2, now: GameTime, game: &mut dyn Game) -> bool {
        if !self.primary.is_ready(now) {
            trace!(pattern = %FirePattern::Primary, "fire rejected: cooldown");
            return false;
        }

        game.add_entity(self.straight_shot(origin, 0.0, 1));
        self.primary.stamp(now);
        debug!(pattern = %FirePattern::Primary, origin = ?origin, "fired");
        true
    }

    /// Fires three shots in a spread: 0°, +30°, −30°, hit budget 1
    /// each. The three share nothing after creation.
    ///
    /// Returns `false` without side effects while the pattern is on
    /// cooldown.
    pub fn fire_spread(&mut self, origin: Vec2, now: GameTime, game: &mut dyn Game) -> bool {
        if !self.spread.is_ready(now) {
            trace!(pattern = %FirePattern::Spread, "fire rejected: cooldown");
            return false;
        }

        for angle in SPREAD_ANGLES {
            game.add_entity(self.straight_shot(origin, angle, 1));
        }
        self.spread.stamp(now);
        debug!(pattern = %FirePattern::Spread, origin = ?origin, "fired");
        true
    }

    /// Fires one piercing shot (hit budget 2) from `origin`.
    ///
    /// Returns `false` without side effects while the pattern is on
    /// cooldown.
    pub fn fire_piercing(&mut self, origin: Vec2, now: GameTime, game: &mut dyn Game) -> bool {
        if !self.piercing.is_ready(now) {
            trace!(pattern = %FirePattern::Piercing, "fire rejected: cooldown");
            return false;
        }

        game.add_entity(self.straight_shot(origin, 0.0, 2));
        self.piercing.stamp(now);
        debug!(pattern = %FirePattern::Piercing, origin = ?origin, "fired");
        true
    }

    /// Spawns one armed remote bomb at the owner's position (no muzzle
    /// offset — the bomb drops from the hull).
    ///
    /// Returns `false` without side effects while the pattern is on
    /// cooldown.
    pub fn fire_remote_bomb(&mut self, origin: Vec2, now: GameTime, game: &mut dyn Game) -> bool {
        if !self.remote_bomb.is_ready(now) {
            trace!(pattern = %FirePattern::RemoteBomb, "fire rejected: cooldown");
            return false;
        }

        game.add_entity(Entity::remote_bomb(
            self.shot_sprite.clone(),
            self.blast_sprite.clone(),
            origin,
            &self.bomb_tun,
        ));
        self.remote_bomb.stamp(now);
        debug!(pattern = %FirePattern::RemoteBomb, origin = ?origin, "fired");
        true
    }

    fn straight_shot(&self, origin: Vec2, angle_deg: f32, hit_budget: i32) -> Entity {
        Entity::shot(
            self.shot_sprite.clone(),
            origin + MUZZLE_OFFSET,
            angle_deg,
            hit_budget,
            Affiliation::Player,
            self.shot_speed,
        )
    }
}
