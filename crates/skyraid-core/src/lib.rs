//! # Skyraid Core
//!
//! Combat core simulation for Skyraid, a side-scrolling shooter.
//!
//! This crate owns the combat layer: entity movement, projectile
//! lifecycles (including the remotely detonated bomb's armed/exploding
//! state machine), the elite alien's autonomous fire timer, the
//! player ship's lane constraints, and the weapon-pattern system with
//! its per-pattern cooldowns.
//!
//! ## Architecture
//!
//! - **Entities** ([`entity`]): one [`Entity`] container over tagged
//!   per-kind components — ship, alien, shot.
//! - **Weapons** ([`weapon`]): the per-ship [`WeaponSystem`] factory
//!   for the four fire patterns.
//! - **Collaborators** ([`game`], [`sprite`]): the surrounding loop
//!   implements [`Game`] (registry + notifications) and
//!   [`SpriteProvider`] (asset lookup); this crate implements neither
//!   collision detection nor rendering.
//! - **Time** ([`clock`]): an injected logical clock. The core never
//!   reads system time, so a fixed tick script replays identically.
//!
//! The core is single-threaded and tick-driven: the loop calls
//! [`Entity::step`] on every live entity, then reports detected
//! collisions via [`Entity::collided_with`]. All `step` calls of a
//! frame must complete before any collision notification.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use skyraid_core::{Entity, InputCode, TickContext, Tunables};
//!
//! let tun = Tunables::default();
//! let mut ship = Entity::ship(&sprites, "sprites/ship.gif", spawn_point, &tun)?;
//!
//! // Each frame, with ctx built by the loop:
//! ship.step(&ctx, &mut game);
//! if fire_pressed {
//!     ship.try_to_fire(InputCode::FIRE_PRIMARY, &ctx, &mut game);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod clock;
pub mod entity;
pub mod game;
pub mod sprite;
pub mod tuning;
pub mod weapon;

pub use clock::{GameTime, TickContext};
pub use entity::{Contact, Entity, EntityId, EntityInner, EntityKind};
pub use game::Game;
pub use sprite::{AssetError, Sprite, SpriteData, SpriteLibrary, SpriteProvider};
pub use tuning::Tunables;
pub use weapon::{Cooldown, FirePattern, InputCode, WeaponSystem};

#[cfg(test)]
mod tests;
