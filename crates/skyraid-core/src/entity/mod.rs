//! Entities of the play field and their behavior.
//!
//! This module provides the core entity model:
//! - [`EntityId`]: registry identifier, allocated by the game loop
//! - [`EntityKind`]: coarse classification used in collision rules
//! - [`Contact`]: the lightweight "other party" of a collision
//! - [`Entity`]: the complete entity container
//!
//! # Architecture
//!
//! One `Entity` struct holds the state every kind shares — the sprite
//! handle, kinematics, status flags — over an [`EntityInner`] enum
//! with the kind-specific components. Behavior methods on `Entity`
//! ([`step`](Entity::step), [`collided_with`](Entity::collided_with),
//! the fire attempts) dispatch on the variant, so a ship, an alien and
//! a shot present one interface to the loop while acting by their own
//! rules. Projectile subtypes go one level deeper: a
//! [`ShotKind`](components::ShotKind) field distinguishes straight
//! shots from the remote bomb and its armed/exploding lifecycle.
//!
//! Entities never call each other. Everything flows outward through
//! the [`Game`] collaborator: spawns, removal requests, hit and death
//! notifications.
//!
//! # Example
//!
//! ```
//! use skyraid_core::entity::{EntityId, EntityKind, Contact};
//!
//! let contact = Contact {
//!     id: EntityId::new(42),
//!     kind: EntityKind::Alien,
//! };
//!
//! assert_eq!(contact.id.as_u64(), 42);
//! assert_eq!(contact.kind.to_string(), "Alien");
//! ```

pub mod components;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

use crate::clock::{GameTime, TickContext};
use crate::game::Game;
use crate::sprite::{AssetError, Sprite, SpriteProvider};
use crate::tuning::{BombTunables, Tunables};
use crate::weapon::{InputCode, WeaponSystem};

use components::{
    firing_velocity, Affiliation, AlienComponents, BombState, EntityStatus, FireControl, Motion,
    ShipComponents, ShotComponents, ShotKind, ALIEN_MUZZLE_OFFSET, OFF_SCREEN_CULL_Y,
};

/// Asset path for the ship's death explosion.
pub const SHIP_EXPLOSION_SPRITE_PATH: &str = "sprites/boom.gif";
/// Asset path for enemy projectiles.
pub const ALIEN_SHOT_SPRITE_PATH: &str = "sprites/alien_shot.gif";

/// Unique identifier for an entity.
///
/// Ids are allocated by the game loop's registry, not by this crate;
/// an entity learns its own id from the
/// [`TickContext`](crate::clock::TickContext) it is called with.
/// Ordering follows the numeric value, which gives the loop a
/// deterministic iteration order.
///
/// # Example
///
/// ```
/// use skyraid_core::entity::EntityId;
///
/// let id1 = EntityId::new(1);
/// let id2 = EntityId::new(2);
///
/// assert!(id1 < id2);
/// assert_eq!(id1.as_u64(), 1);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates a new `EntityId` from a raw `u64` value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` value of this identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

impl From<EntityId> for u64 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

/// Coarse entity classification.
///
/// Collision rules branch on the *kind* of the other party: a player
/// shot only damages aliens, an enemy shot only damages the ship, the
/// ship dies on contact with any alien. Standard and elite aliens are
/// the same kind.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// The player's ship.
    Ship,
    /// An alien, standard or elite.
    Alien,
    /// A projectile (straight shot or remote bomb).
    Shot,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ship => write!(f, "Ship"),
            Self::Alien => write!(f, "Alien"),
            Self::Shot => write!(f, "Shot"),
        }
    }
}

/// The other party of a reported collision.
///
/// Collision *detection* happens outside this crate; once the loop has
/// a colliding pair it notifies each side with the other's id and
/// kind. Passing this small copyable summary instead of the entity
/// itself keeps the notification free of aliasing concerns — both
/// entities live in the loop's registry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Registry id of the other entity.
    pub id: EntityId,
    /// Kind of the other entity.
    pub kind: EntityKind,
}

/// Kind-specific component storage.
///
/// The variant decides how the entity moves, collides and fires; the
/// state every kind shares lives on [`Entity`] itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityInner {
    /// Player ship components (health, lane bounds, weapon system).
    Ship(ShipComponents),
    /// Alien components (health, optional fire control).
    Alien(AlienComponents),
    /// Projectile components (affiliation, hit budget, subtype).
    Shot(ShotComponents),
}

impl EntityInner {
    /// Returns the corresponding [`EntityKind`] for this storage.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Ship(_) => EntityKind::Ship,
            Self::Alien(_) => EntityKind::Alien,
            Self::Shot(_) => EntityKind::Shot,
        }
    }
}

/// A complete entity in the play field.
///
/// Combines the shared base state — sprite handle, [`Motion`], status
/// flags — with the kind-specific [`EntityInner`]. Construct entities
/// with the kind constructors ([`Entity::ship`], [`Entity::alien`],
/// [`Entity::elite_alien`], [`Entity::shot`], [`Entity::remote_bomb`])
/// and register them with the loop via
/// [`Game::add_entity`](crate::game::Game::add_entity).
///
/// # Tick protocol
///
/// Per frame, the loop calls [`step`](Self::step) on every live
/// entity, then runs collision detection on the post-move positions
/// and calls [`collided_with`](Self::collided_with) on each side of
/// each detected pair. Fire attempts
/// ([`try_to_fire`](Self::try_to_fire) for the ship,
/// [`try_autonomous_fire`](Self::try_autonomous_fire) for elites) may
/// be interleaved anywhere in the frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    sprite: Sprite,
    motion: Motion,
    status: EntityStatus,
    inner: EntityInner,
}

impl Entity {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Creates the player's ship at `position`, resolving its hull and
    /// explosion sprites and building its [`WeaponSystem`].
    ///
    /// # Errors
    ///
    /// Returns [`AssetError`] if `sprite_path`,
    /// [`SHIP_EXPLOSION_SPRITE_PATH`], or the weapon system's
    /// projectile sprites cannot be resolved.
    pub fn ship(
        store: &dyn SpriteProvider,
        sprite_path: &str,
        position: Vec2,
        tun: &Tunables,
    ) -> Result<Self, AssetError> {
        let weapons = WeaponSystem::new(store, tun)?;
        let explosion = store.get_sprite(SHIP_EXPLOSION_SPRITE_PATH)?;
        Ok(Self {
            sprite: store.get_sprite(sprite_path)?,
            motion: Motion::at(position),
            status: EntityStatus::empty(),
            inner: EntityInner::Ship(ShipComponents::new(explosion, weapons, &tun.ship)),
        })
    }

    /// Creates a standard (non-firing) alien at `position`.
    ///
    /// Its patrol velocity is the loop's to set via
    /// [`set_velocity`](Self::set_velocity).
    ///
    /// # Errors
    ///
    /// Returns [`AssetError`] if `sprite_path` cannot be resolved.
    pub fn alien(
        store: &dyn SpriteProvider,
        sprite_path: &str,
        position: Vec2,
        tun: &Tunables,
    ) -> Result<Self, AssetError> {
        Ok(Self {
            sprite: store.get_sprite(sprite_path)?,
            motion: Motion::at(position),
            status: EntityStatus::empty(),
            inner: EntityInner::Alien(AlienComponents::standard(&tun.alien)),
        })
    }

    /// Creates an elite alien at `position` with an armed fire timer.
    ///
    /// The first fire interval is drawn from the tuning's initial
    /// range against `now` (the spawn time), so a fresh elite holds
    /// fire briefly before opening up.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError`] if `sprite_path` or
    /// [`ALIEN_SHOT_SPRITE_PATH`] cannot be resolved.
    pub fn elite_alien<R: Rng>(
        store: &dyn SpriteProvider,
        sprite_path: &str,
        position: Vec2,
        now: GameTime,
        rng: &mut R,
        tun: &Tunables,
    ) -> Result<Self, AssetError> {
        let fire = FireControl::new(
            store.get_sprite(ALIEN_SHOT_SPRITE_PATH)?,
            tun.shot.enemy_speed,
            now,
            rng,
            &tun.alien,
        );
        Ok(Self {
            sprite: store.get_sprite(sprite_path)?,
            motion: Motion::at(position),
            status: EntityStatus::empty(),
            inner: EntityInner::Alien(AlienComponents::elite(fire, &tun.alien)),
        })
    }

    /// Creates a straight shot.
    ///
    /// Velocity derives from the firing angle (degrees off the firer's
    /// forward axis) and `speed` (px/sec, sign carries direction:
    /// negative is up/player, positive is down/enemy).
    #[must_use]
    pub fn shot(
        sprite: Sprite,
        position: Vec2,
        angle_deg: f32,
        hit_budget: i32,
        affiliation: Affiliation,
        speed: f32,
    ) -> Self {
        Self {
            sprite,
            motion: Motion::with_velocity(position, firing_velocity(speed, angle_deg)),
            status: EntityStatus::empty(),
            inner: EntityInner::Shot(ShotComponents {
                affiliation,
                hits_remaining: hit_budget,
                kind: ShotKind::Standard,
            }),
        }
    }

    /// Creates an armed remote bomb.
    ///
    /// Armed bombs drift straight up at the tuning's drift speed — the
    /// "remote" part is the detonation trigger, not placement. The
    /// blast sprite is resolved up front and swapped in by
    /// [`detonate`](Self::detonate).
    #[must_use]
    pub fn remote_bomb(sprite: Sprite, blast: Sprite, position: Vec2, tun: &BombTunables) -> Self {
        Self {
            sprite,
            motion: Motion::with_velocity(position, Vec2::new(0.0, tun.drift_speed)),
            status: EntityStatus::empty(),
            inner: EntityInner::Shot(ShotComponents {
                affiliation: Affiliation::Player,
                hits_remaining: tun.hit_budget,
                kind: ShotKind::RemoteBomb(components::BombFuse::armed(blast, tun.explosion_ms)),
            }),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the entity's kind.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.inner.kind()
    }

    /// Returns the current position.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.motion.position
    }

    /// Returns the current velocity, px/sec.
    #[must_use]
    pub const fn velocity(&self) -> Vec2 {
        self.motion.velocity
    }

    /// Sets the velocity. The loop uses this to steer aliens and to
    /// apply player movement input to the ship.
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.motion.velocity = velocity;
    }

    /// Sets the position directly (formation layout, respawns).
    pub fn set_position(&mut self, position: Vec2) {
        self.motion.position = position;
    }

    /// Returns the sprite currently representing this entity.
    #[must_use]
    pub const fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    /// Returns the status flag set.
    #[must_use]
    pub const fn status(&self) -> EntityStatus {
        self.status
    }

    /// Returns `true` if this is a spent shot.
    #[must_use]
    pub const fn is_used(&self) -> bool {
        self.status.contains(EntityStatus::USED)
    }

    /// Returns `true` if this is the ship and it has died.
    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        self.status.contains(EntityStatus::DESTROYED)
    }

    /// Returns the health counter for ships and aliens, `None` for
    /// shots.
    ///
    /// Alien health has no floor: it can read negative after
    /// over-damage, and removal at zero-or-below is the loop's call.
    #[must_use]
    pub const fn health(&self) -> Option<i32> {
        match &self.inner {
            EntityInner::Ship(ship) => Some(ship.health),
            EntityInner::Alien(alien) => Some(alien.health),
            EntityInner::Shot(_) => None,
        }
    }

    /// Returns a reference to the inner component storage.
    #[must_use]
    pub const fn inner(&self) -> &EntityInner {
        &self.inner
    }

    /// Returns a mutable reference to the inner component storage.
    #[must_use]
    pub fn inner_mut(&mut self) -> &mut EntityInner {
        &mut self.inner
    }

    /// Returns `true` if this entity is the ship.
    #[must_use]
    pub const fn is_ship(&self) -> bool {
        matches!(self.inner, EntityInner::Ship(_))
    }

    /// Returns `true` if this entity is an alien.
    #[must_use]
    pub const fn is_alien(&self) -> bool {
        matches!(self.inner, EntityInner::Alien(_))
    }

    /// Returns `true` if this entity is a shot.
    #[must_use]
    pub const fn is_shot(&self) -> bool {
        matches!(self.inner, EntityInner::Shot(_))
    }

    /// Returns the ship components if this is the ship.
    #[must_use]
    pub const fn as_ship(&self) -> Option<&ShipComponents> {
        match &self.inner {
            EntityInner::Ship(components) => Some(components),
            _ => None,
        }
    }

    /// Returns mutable ship components if this is the ship.
    #[must_use]
    pub fn as_ship_mut(&mut self) -> Option<&mut ShipComponents> {
        match &mut self.inner {
            EntityInner::Ship(components) => Some(components),
            _ => None,
        }
    }

    /// Returns the alien components if this is an alien.
    #[must_use]
    pub const fn as_alien(&self) -> Option<&AlienComponents> {
        match &self.inner {
            EntityInner::Alien(components) => Some(components),
            _ => None,
        }
    }

    /// Returns mutable alien components if this is an alien.
    #[must_use]
    pub fn as_alien_mut(&mut self) -> Option<&mut AlienComponents> {
        match &mut self.inner {
            EntityInner::Alien(components) => Some(components),
            _ => None,
        }
    }

    /// Returns the shot components if this is a shot.
    #[must_use]
    pub const fn as_shot(&self) -> Option<&ShotComponents> {
        match &self.inner {
            EntityInner::Shot(components) => Some(components),
            _ => None,
        }
    }

    /// Returns mutable shot components if this is a shot.
    #[must_use]
    pub fn as_shot_mut(&mut self) -> Option<&mut ShotComponents> {
        match &mut self.inner {
            EntityInner::Shot(components) => Some(components),
            _ => None,
        }
    }

    // =========================================================================
    // Behavior
    // =========================================================================

    /// Advances this entity by the frame's elapsed time.
    ///
    /// Safe at `delta_ms = 0` (no movement, no other effect). Kind
    /// rules:
    /// - The ship rejects the whole move while pushing leftward below
    ///   its left lane bound or rightward above its right bound.
    /// - Shots that cross the top cull line request their own removal,
    ///   whatever their remaining hit budget.
    /// - An exploding bomb whose blast has outlived its duration
    ///   requests removal and marks itself used, whatever its budget.
    pub fn step(&mut self, ctx: &TickContext, game: &mut dyn Game) {
        match &mut self.inner {
            EntityInner::Ship(ship) => {
                let motion = &mut self.motion;
                if (motion.velocity.x < 0.0 && motion.position.x < ship.lane_min)
                    || (motion.velocity.x > 0.0 && motion.position.x > ship.lane_max)
                {
                    return;
                }
                motion.integrate(ctx.delta_ms);
            }
            EntityInner::Alien(_) => self.motion.integrate(ctx.delta_ms),
            EntityInner::Shot(shot) => {
                self.motion.integrate(ctx.delta_ms);
                if self.motion.position.y < OFF_SCREEN_CULL_Y {
                    trace!(entity = %ctx.entity_id, "shot left the play field");
                    game.remove_entity(ctx.entity_id);
                }
                if let ShotKind::RemoteBomb(fuse) = &shot.kind {
                    if fuse.is_expired(ctx.now) {
                        debug!(entity = %ctx.entity_id, "blast expired");
                        game.remove_entity(ctx.entity_id);
                        self.status.insert(EntityStatus::USED);
                    }
                }
            }
        }
    }

    /// Notification that this entity overlapped `other` this frame.
    ///
    /// No return value; all effects flow through `game`. Kind rules:
    /// - Ship vs alien: instant death (notification plus explosion
    ///   sprite), independent of the health counter.
    /// - Straight shot: damages the opposing side only (player shots
    ///   hit aliens, enemy shots hit the ship), consuming one unit of
    ///   hit budget per valid collision; at zero the shot requests
    ///   removal and goes inert. A used shot ignores everything, so
    ///   one physical overlap reported twice cannot double-count.
    /// - Remote bomb: collision-transparent while armed; while
    ///   exploding, behaves like a player shot against aliens but
    ///   leaves removal to the blast timer.
    pub fn collided_with(&mut self, ctx: &TickContext, other: Contact, game: &mut dyn Game) {
        match &mut self.inner {
            EntityInner::Ship(ship) => {
                if other.kind == EntityKind::Alien {
                    debug!(entity = %ctx.entity_id, "ship rammed by alien");
                    game.notify_death();
                    self.sprite = ship.explosion.clone();
                    self.status.insert(EntityStatus::DESTROYED);
                }
            }
            EntityInner::Alien(_) => {}
            EntityInner::Shot(shot) => {
                if self.status.contains(EntityStatus::USED) {
                    return;
                }
                match &mut shot.kind {
                    ShotKind::Standard => {
                        let valid = match (shot.affiliation, other.kind) {
                            (Affiliation::Player, EntityKind::Alien) => {
                                game.notify_alien_hit(other.id);
                                true
                            }
                            (Affiliation::Enemy, EntityKind::Ship) => {
                                game.notify_player_damaged();
                                true
                            }
                            _ => false,
                        };
                        if valid {
                            shot.hits_remaining -= 1;
                            if shot.hits_remaining <= 0 {
                                game.remove_entity(ctx.entity_id);
                                self.status.insert(EntityStatus::USED);
                            }
                        }
                    }
                    ShotKind::RemoteBomb(fuse) => {
                        if matches!(fuse.state, BombState::Exploding { .. })
                            && other.kind == EntityKind::Alien
                        {
                            game.notify_alien_hit(other.id);
                            shot.hits_remaining -= 1;
                            if shot.hits_remaining <= 0 {
                                // Spent, but the blast stays on screen
                                // until its timer removes it.
                                self.status.insert(EntityStatus::USED);
                            }
                        }
                    }
                }
            }
        }
    }

    /// Ship fire attempt for one input code.
    ///
    /// Maps the code to exactly one weapon pattern and returns that
    /// pattern's fire result; unrecognized codes — and any entity that
    /// is not the ship — return `false` with no side effect.
    pub fn try_to_fire(&mut self, input: InputCode, ctx: &TickContext, game: &mut dyn Game) -> bool {
        let origin = self.motion.position;
        let EntityInner::Ship(ship) = &mut self.inner else {
            return false;
        };
        match input {
            InputCode::FIRE_PRIMARY => ship.weapons.fire_primary(origin, ctx.now, game),
            InputCode::FIRE_SPREAD => ship.weapons.fire_spread(origin, ctx.now, game),
            InputCode::FIRE_PIERCING => ship.weapons.fire_piercing(origin, ctx.now, game),
            InputCode::FIRE_REMOTE_BOMB => ship.weapons.fire_remote_bomb(origin, ctx.now, game),
            _ => false,
        }
    }

    /// Autonomous fire attempt for firing-capable aliens.
    ///
    /// No-op unless this is an elite whose current interval has
    /// elapsed; then it spawns one downward shot, stamps the timer and
    /// redraws the interval from the sustained range. Standard aliens,
    /// ships and shots ignore the call.
    pub fn try_autonomous_fire<R: Rng>(
        &mut self,
        ctx: &TickContext,
        rng: &mut R,
        game: &mut dyn Game,
    ) {
        let origin = self.motion.position;
        let EntityInner::Alien(alien) = &mut self.inner else {
            return;
        };
        let Some(fire) = alien.fire_control.as_mut() else {
            return;
        };
        if !fire.is_ready(ctx.now) {
            return;
        }

        game.add_entity(Entity::shot(
            fire.shot_sprite.clone(),
            origin + ALIEN_MUZZLE_OFFSET,
            0.0,
            1,
            Affiliation::Enemy,
            fire.shot_speed,
        ));
        fire.rearm(ctx.now, rng);
        debug!(entity = %ctx.entity_id, next_ms = fire.interval_ms, "alien fired");
    }

    /// Applies one point of projectile damage.
    ///
    /// The ship checks its own floor: at zero-or-below it raises the
    /// death notification and swaps to its explosion sprite. Aliens
    /// decrement without a floor — negative health is a valid
    /// transient state, and removing a dead alien is the loop's
    /// responsibility. Shots ignore the call.
    pub fn take_damage(&mut self, game: &mut dyn Game) {
        match &mut self.inner {
            EntityInner::Ship(ship) => {
                ship.health -= 1;
                if ship.health <= 0 {
                    debug!("ship destroyed");
                    game.notify_death();
                    self.sprite = ship.explosion.clone();
                    self.status.insert(EntityStatus::DESTROYED);
                }
            }
            EntityInner::Alien(alien) => {
                alien.health -= 1;
            }
            EntityInner::Shot(_) => {}
        }
    }

    /// Remote-detonation trigger.
    ///
    /// Armed bomb: transitions to exploding — blast sprite in, velocity
    /// zeroed, expiry deadline recorded at `now` plus the blast
    /// duration. Idempotent: repeat calls never reset the deadline.
    /// Anything that is not an armed bomb ignores the call.
    pub fn detonate(&mut self, now: GameTime) {
        if let EntityInner::Shot(shot) = &mut self.inner {
            if let ShotKind::RemoteBomb(fuse) = &mut shot.kind {
                if fuse.ignite(now) {
                    debug!("bomb detonated");
                    self.sprite = fuse.blast.clone();
                    self.motion.velocity = Vec2::ZERO;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{test_sprites, RecordingGame};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn tunables() -> Tunables {
        Tunables::default()
    }

    fn ctx(id: u64, now_ms: u64, delta_ms: u64) -> TickContext {
        TickContext {
            entity_id: EntityId::new(id),
            now: GameTime::from_millis(now_ms),
            delta_ms,
        }
    }

    mod entity_id_tests {
        use super::*;

        #[test]
        fn new_creates_id_with_value() {
            let id = EntityId::new(42);
            assert_eq!(id.as_u64(), 42);
        }

        #[test]
        fn ordering_follows_value() {
            let mut ids = vec![EntityId::new(3), EntityId::new(1), EntityId::new(2)];
            ids.sort();
            assert_eq!(ids, vec![EntityId::new(1), EntityId::new(2), EntityId::new(3)]);
        }

        #[test]
        fn debug_and_display_formats() {
            let id = EntityId::new(7);
            assert_eq!(format!("{id:?}"), "EntityId(7)");
            assert_eq!(format!("{id}"), "7");
        }

        #[test]
        fn conversions() {
            let id: EntityId = 9u64.into();
            assert_eq!(u64::from(id), 9);
        }
    }

    mod construction_tests {
        use super::*;

        #[test]
        fn ship_resolves_hull_and_explosion() {
            let ship = Entity::ship(
                &test_sprites(),
                "sprites/ship.gif",
                Vec2::new(370.0, 550.0),
                &tunables(),
            )
            .unwrap();

            assert!(ship.is_ship());
            assert_eq!(ship.kind(), EntityKind::Ship);
            assert_eq!(ship.sprite().path(), "sprites/ship.gif");
            assert_eq!(ship.health(), Some(3));
            assert!(!ship.is_destroyed());
        }

        #[test]
        fn ship_fails_without_weapon_sprites() {
            let mut store = crate::sprite::SpriteLibrary::new();
            store.insert("sprites/ship.gif", 32, 32);
            store.insert(SHIP_EXPLOSION_SPRITE_PATH, 32, 32);
            // Missing shot/blast sprites: weapon construction fails.
            let result = Entity::ship(&store, "sprites/ship.gif", Vec2::ZERO, &tunables());
            assert!(result.is_err());
        }

        #[test]
        fn standard_alien_cannot_fire() {
            let alien =
                Entity::alien(&test_sprites(), "sprites/alien.gif", Vec2::ZERO, &tunables())
                    .unwrap();
            assert!(alien.is_alien());
            assert_eq!(alien.health(), Some(1));
            assert!(alien.as_alien().unwrap().fire_control.is_none());
        }

        #[test]
        fn elite_alien_has_armed_fire_timer() {
            let mut rng = ChaCha8Rng::seed_from_u64(11);
            let elite = Entity::elite_alien(
                &test_sprites(),
                "sprites/alien.gif",
                Vec2::new(100.0, 50.0),
                GameTime::from_millis(400),
                &mut rng,
                &tunables(),
            )
            .unwrap();

            assert_eq!(elite.health(), Some(2));
            let fire = elite.as_alien().unwrap().fire_control.as_ref().unwrap();
            assert_eq!(fire.last_fire, GameTime::from_millis(400));
            assert!(fire.interval_ms >= 1_000 && fire.interval_ms < 3_000);
            assert_eq!(fire.shot_sprite.path(), ALIEN_SHOT_SPRITE_PATH);
        }

        #[test]
        fn shot_velocity_derives_from_angle_and_speed() {
            let sprite = test_sprites().get_sprite("sprites/shot.gif").unwrap();
            let shot = Entity::shot(
                sprite,
                Vec2::ZERO,
                30.0,
                1,
                Affiliation::Player,
                -300.0,
            );
            assert!(shot.is_shot());
            assert!((shot.velocity().x - -150.0).abs() < 1e-2);
            assert!(shot.velocity().y < -250.0);
            assert_eq!(shot.health(), None);
        }
    }

    mod step_tests {
        use super::*;

        #[test]
        fn zero_delta_is_safe_and_still() {
            let mut ship = Entity::ship(
                &test_sprites(),
                "sprites/ship.gif",
                Vec2::new(370.0, 550.0),
                &tunables(),
            )
            .unwrap();
            ship.set_velocity(Vec2::new(250.0, 0.0));
            let mut game = RecordingGame::new();

            ship.step(&ctx(1, 0, 0), &mut game);
            assert_eq!(ship.position(), Vec2::new(370.0, 550.0));
        }

        #[test]
        fn ship_clamps_leftward_at_lane_min() {
            let mut ship = Entity::ship(
                &test_sprites(),
                "sprites/ship.gif",
                Vec2::new(5.0, 550.0),
                &tunables(),
            )
            .unwrap();
            ship.set_velocity(Vec2::new(-100.0, 0.0));
            let mut game = RecordingGame::new();

            ship.step(&ctx(1, 0, 100), &mut game);
            assert_eq!(ship.position(), Vec2::new(5.0, 550.0));
        }

        #[test]
        fn ship_clamps_rightward_at_lane_max() {
            let mut ship = Entity::ship(
                &test_sprites(),
                "sprites/ship.gif",
                Vec2::new(760.0, 550.0),
                &tunables(),
            )
            .unwrap();
            ship.set_velocity(Vec2::new(100.0, 0.0));
            let mut game = RecordingGame::new();

            ship.step(&ctx(1, 0, 100), &mut game);
            assert_eq!(ship.position(), Vec2::new(760.0, 550.0));
        }

        #[test]
        fn ship_moves_inside_the_lane() {
            let mut ship = Entity::ship(
                &test_sprites(),
                "sprites/ship.gif",
                Vec2::new(370.0, 550.0),
                &tunables(),
            )
            .unwrap();
            ship.set_velocity(Vec2::new(-300.0, 0.0));
            let mut game = RecordingGame::new();

            ship.step(&ctx(1, 0, 100), &mut game);
            assert!((ship.position().x - 340.0).abs() < 1e-3);
        }

        #[test]
        fn ship_can_move_back_into_the_lane() {
            // Out past the right bound but pushing left: allowed.
            let mut ship = Entity::ship(
                &test_sprites(),
                "sprites/ship.gif",
                Vec2::new(760.0, 550.0),
                &tunables(),
            )
            .unwrap();
            ship.set_velocity(Vec2::new(-100.0, 0.0));
            let mut game = RecordingGame::new();

            ship.step(&ctx(1, 0, 100), &mut game);
            assert!(ship.position().x < 760.0);
        }

        #[test]
        fn shot_requests_removal_past_cull_line() {
            let sprite = test_sprites().get_sprite("sprites/shot.gif").unwrap();
            let mut shot = Entity::shot(
                sprite,
                Vec2::new(100.0, -99.0),
                0.0,
                1,
                Affiliation::Player,
                -300.0,
            );
            let mut game = RecordingGame::new();

            // Crosses y = -100 during this step.
            shot.step(&ctx(5, 0, 100), &mut game);
            assert_eq!(game.removed, vec![EntityId::new(5)]);
        }

        #[test]
        fn downward_shot_is_never_culled_here() {
            let sprite = test_sprites().get_sprite("sprites/alien_shot.gif").unwrap();
            let mut shot = Entity::shot(
                sprite,
                Vec2::new(100.0, 50.0),
                0.0,
                1,
                Affiliation::Enemy,
                100.0,
            );
            let mut game = RecordingGame::new();

            for frame in 0..100 {
                shot.step(&ctx(5, frame * 100, 100), &mut game);
            }
            assert!(game.removed.is_empty());
            assert!(shot.position().y > 50.0);
        }
    }

    mod damage_tests {
        use super::*;

        #[test]
        fn ship_survives_two_hits_then_dies_on_third() {
            let mut ship = Entity::ship(
                &test_sprites(),
                "sprites/ship.gif",
                Vec2::ZERO,
                &tunables(),
            )
            .unwrap();
            let mut game = RecordingGame::new();

            ship.take_damage(&mut game);
            ship.take_damage(&mut game);
            assert_eq!(ship.health(), Some(1));
            assert!(!ship.is_destroyed());
            assert!(game.deaths() == 0);

            ship.take_damage(&mut game);
            assert_eq!(ship.health(), Some(0));
            assert!(ship.is_destroyed());
            assert_eq!(game.deaths(), 1);
            assert_eq!(ship.sprite().path(), SHIP_EXPLOSION_SPRITE_PATH);
        }

        #[test]
        fn alien_health_is_not_clamped() {
            let mut alien =
                Entity::alien(&test_sprites(), "sprites/alien.gif", Vec2::ZERO, &tunables())
                    .unwrap();
            let mut game = RecordingGame::new();

            for _ in 0..3 {
                alien.take_damage(&mut game);
            }
            assert_eq!(alien.health(), Some(-2));
            // No notifications from the alien itself.
            assert!(game.notifications.is_empty());
        }

        #[test]
        fn ship_dies_instantly_on_alien_contact() {
            let mut ship = Entity::ship(
                &test_sprites(),
                "sprites/ship.gif",
                Vec2::ZERO,
                &tunables(),
            )
            .unwrap();
            let mut game = RecordingGame::new();

            ship.collided_with(
                &ctx(1, 0, 0),
                Contact {
                    id: EntityId::new(9),
                    kind: EntityKind::Alien,
                },
                &mut game,
            );

            // Health untouched; contact death bypasses the counter.
            assert_eq!(ship.health(), Some(3));
            assert!(ship.is_destroyed());
            assert_eq!(game.deaths(), 1);
            assert_eq!(ship.sprite().path(), SHIP_EXPLOSION_SPRITE_PATH);
        }

        #[test]
        fn ship_ignores_contact_with_shots() {
            // Shot-vs-ship damage is the shot's side to report.
            let mut ship = Entity::ship(
                &test_sprites(),
                "sprites/ship.gif",
                Vec2::ZERO,
                &tunables(),
            )
            .unwrap();
            let mut game = RecordingGame::new();

            ship.collided_with(
                &ctx(1, 0, 0),
                Contact {
                    id: EntityId::new(9),
                    kind: EntityKind::Shot,
                },
                &mut game,
            );
            assert!(!ship.is_destroyed());
            assert!(game.notifications.is_empty());
        }
    }

    mod detonate_tests {
        use super::*;
        use crate::entity::components::BombState;

        fn bomb() -> Entity {
            let store = test_sprites();
            Entity::remote_bomb(
                store.get_sprite("sprites/shot.gif").unwrap(),
                store.get_sprite("sprites/big_boom.gif").unwrap(),
                Vec2::new(200.0, 300.0),
                &BombTunables::default(),
            )
        }

        #[test]
        fn detonate_swaps_sprite_and_stops_motion() {
            let mut entity = bomb();
            assert_eq!(entity.velocity(), Vec2::new(0.0, -150.0));

            entity.detonate(GameTime::from_millis(1_000));

            assert_eq!(entity.sprite().path(), "sprites/big_boom.gif");
            assert_eq!(entity.velocity(), Vec2::ZERO);
            match &entity.as_shot().unwrap().kind {
                ShotKind::RemoteBomb(fuse) => assert_eq!(
                    fuse.state,
                    BombState::Exploding {
                        expires_at: GameTime::from_millis(1_025)
                    }
                ),
                ShotKind::Standard => panic!("expected a bomb"),
            }
        }

        #[test]
        fn repeat_detonation_keeps_the_first_deadline() {
            let mut entity = bomb();
            entity.detonate(GameTime::from_millis(1_000));
            entity.detonate(GameTime::from_millis(5_000));

            match &entity.as_shot().unwrap().kind {
                ShotKind::RemoteBomb(fuse) => assert_eq!(
                    fuse.state,
                    BombState::Exploding {
                        expires_at: GameTime::from_millis(1_025)
                    }
                ),
                ShotKind::Standard => panic!("expected a bomb"),
            }
        }

        #[test]
        fn detonate_on_a_straight_shot_is_a_no_op() {
            let sprite = test_sprites().get_sprite("sprites/shot.gif").unwrap();
            let mut shot =
                Entity::shot(sprite, Vec2::ZERO, 0.0, 1, Affiliation::Player, -300.0);
            let before = shot.clone();
            shot.detonate(GameTime::from_millis(1_000));
            assert_eq!(shot, before);
        }
    }

    mod serde_tests {
        use super::*;

        #[test]
        fn entity_tree_roundtrips() {
            let mut rng = ChaCha8Rng::seed_from_u64(5);
            let entities = vec![
                Entity::ship(
                    &test_sprites(),
                    "sprites/ship.gif",
                    Vec2::new(370.0, 550.0),
                    &tunables(),
                )
                .unwrap(),
                Entity::elite_alien(
                    &test_sprites(),
                    "sprites/alien.gif",
                    Vec2::new(100.0, 50.0),
                    GameTime::ZERO,
                    &mut rng,
                    &tunables(),
                )
                .unwrap(),
                Entity::remote_bomb(
                    test_sprites().get_sprite("sprites/shot.gif").unwrap(),
                    test_sprites().get_sprite("sprites/big_boom.gif").unwrap(),
                    Vec2::new(10.0, 20.0),
                    &BombTunables::default(),
                ),
            ];

            let json = serde_json::to_string(&entities).unwrap();
            let back: Vec<Entity> = serde_json::from_str(&json).unwrap();
            assert_eq!(entities, back);
        }
    }
}
