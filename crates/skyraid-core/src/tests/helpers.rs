//! Test doubles and factory functions shared across the test tree.

use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::clock::{GameTime, TickContext};
use crate::entity::{Entity, EntityId};
use crate::game::Game;
use crate::sprite::{SpriteLibrary, SpriteProvider};
use crate::tuning::Tunables;

/// One outward notification captured by [`RecordingGame`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Notification {
    /// `notify_alien_hit(id)`.
    AlienHit(EntityId),
    /// `notify_player_damaged()`.
    PlayerDamaged,
    /// `notify_death()`.
    Death,
}

/// A [`Game`] double that records everything the core pushes outward,
/// in call order.
#[derive(Debug, Default)]
pub struct RecordingGame {
    /// Entities handed to `add_entity`.
    pub added: Vec<Entity>,
    /// Ids handed to `remove_entity` (duplicates kept: idempotence is
    /// the collaborator's job, and tests want to see repeat requests).
    pub removed: Vec<EntityId>,
    /// Notifications in arrival order.
    pub notifications: Vec<Notification>,
}

impl RecordingGame {
    pub fn new() -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        Self::default()
    }

    pub fn alien_hits(&self) -> usize {
        self.notifications
            .iter()
            .filter(|n| matches!(n, Notification::AlienHit(_)))
            .count()
    }

    pub fn player_damage(&self) -> usize {
        self.notifications
            .iter()
            .filter(|n| matches!(n, Notification::PlayerDamaged))
            .count()
    }

    pub fn deaths(&self) -> usize {
        self.notifications
            .iter()
            .filter(|n| matches!(n, Notification::Death))
            .count()
    }
}

impl Game for RecordingGame {
    fn add_entity(&mut self, entity: Entity) {
        self.added.push(entity);
    }

    fn remove_entity(&mut self, id: EntityId) {
        self.removed.push(id);
    }

    fn notify_alien_hit(&mut self, id: EntityId) {
        self.notifications.push(Notification::AlienHit(id));
    }

    fn notify_player_damaged(&mut self) {
        self.notifications.push(Notification::PlayerDamaged);
    }

    fn notify_death(&mut self) {
        self.notifications.push(Notification::Death);
    }
}

/// A sprite library with every asset the core resolves, plus the hull
/// sprites tests pass in by path.
pub fn test_sprites() -> SpriteLibrary {
    let mut library = SpriteLibrary::new();
    library.insert("sprites/ship.gif", 32, 32);
    library.insert("sprites/alien.gif", 32, 32);
    library.insert("sprites/shot.gif", 8, 16);
    library.insert("sprites/alien_shot.gif", 8, 16);
    library.insert("sprites/boom.gif", 32, 32);
    library.insert("sprites/big_boom.gif", 64, 64);
    library
}

/// Builds the tick context for entity `id` at `now_ms` with the given
/// frame delta.
pub fn tick(id: u64, now_ms: u64, delta_ms: u64) -> TickContext {
    TickContext {
        entity_id: EntityId::new(id),
        now: GameTime::from_millis(now_ms),
        delta_ms,
    }
}

/// Spawns the player's ship at `position` with default tuning.
pub fn spawn_test_ship(position: Vec2) -> Entity {
    Entity::ship(&test_sprites(), "sprites/ship.gif", position, &Tunables::default()).unwrap()
}

/// Spawns an elite alien at `position` whose fire timer is seeded with
/// `seed`.
pub fn spawn_test_elite(position: Vec2, now: GameTime, seed: u64) -> Entity {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Entity::elite_alien(
        &test_sprites(),
        "sprites/alien.gif",
        position,
        now,
        &mut rng,
        &Tunables::default(),
    )
    .unwrap()
}

/// Spawns an armed remote bomb at `position` with default tuning.
pub fn spawn_test_bomb(position: Vec2) -> Entity {
    let store = test_sprites();
    Entity::remote_bomb(
        store.get_sprite("sprites/shot.gif").unwrap(),
        store.get_sprite("sprites/big_boom.gif").unwrap(),
        position,
        &crate::tuning::BombTunables::default(),
    )
}
