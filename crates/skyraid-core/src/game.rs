//! The outward-facing collaborator interface.
//!
//! The combat core does not own an entity registry, decide win/loss,
//! or detect collisions — the surrounding loop does. [`Game`] is the
//! channel through which entities report side effects back out:
//! spawning projectiles, requesting their own removal, and raising
//! hit/death notifications. All calls are fire-and-forget; the core
//! never observes a return value.

use crate::entity::{Entity, EntityId};

/// Receiver for entity side effects, implemented by the game loop.
///
/// Entity ids are allocated by the implementor: [`Game::add_entity`]
/// takes the spawned entity by value and registers it under whatever
/// id the loop chooses. A live entity learns its own id from the
/// [`TickContext`](crate::clock::TickContext) it is ticked with.
///
/// # Contract
///
/// - `remove_entity` must be idempotent: entities may request removal
///   more than once (a piercing shot culled off-screen in the same
///   frame its budget runs out, for example), and removal requests for
///   already-removed ids must be safe no-ops.
/// - Notifications carry no response; whatever the loop does with them
///   (scoring, despawning the hit alien, ending the game) is invisible
///   to the core.
pub trait Game {
    /// Registers a newly spawned entity for future ticking, rendering
    /// and collision detection.
    fn add_entity(&mut self, entity: Entity);

    /// Deregisters an entity. Must be idempotent.
    fn remove_entity(&mut self, id: EntityId);

    /// An alien-kind entity was hit by a player shot.
    fn notify_alien_hit(&mut self, id: EntityId);

    /// The player's ship was hit by an enemy shot.
    fn notify_player_damaged(&mut self);

    /// The player's ship is dead (rammed by an alien, or health
    /// exhausted).
    fn notify_death(&mut self);
}
