//! Shared drawable handles and the asset-lookup seam.
//!
//! A [`Sprite`] carries no game state: it is the image reference plus
//! its pixel dimensions, shared by value across any number of
//! entities. Entities swap the handle they hold (for example to an
//! explosion image) without affecting other holders of the original;
//! the underlying [`SpriteData`] is never mutated.
//!
//! Asset decoding and caching live outside this crate. The core only
//! needs [`SpriteProvider`], the lookup seam through which
//! constructors resolve logical paths like `"sprites/shot.gif"` into
//! handles. Resolution is the crate's single fallible operation, and
//! it only happens at construction time — the per-tick hot path never
//! returns an error.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Error raised when a logical asset path cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    /// No sprite is registered under the requested path.
    #[error("sprite not found: {0}")]
    SpriteNotFound(String),
}

/// The immutable payload behind a [`Sprite`] handle.
///
/// Width and height are exposed because the external collision pass
/// needs entity extents; pixel data itself is a rendering concern and
/// stays outside this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteData {
    /// Logical asset path, e.g. `"sprites/shot.gif"`.
    pub path: String,
    /// Width of the drawn sprite in pixels.
    pub width: u32,
    /// Height of the drawn sprite in pixels.
    pub height: u32,
}

/// A cheap-to-clone, shared reference to an immutable drawable.
///
/// Cloning a `Sprite` clones the handle, not the data, so one image
/// can back every shot on screen. Equality is value equality on the
/// underlying data.
///
/// # Example
///
/// ```
/// use skyraid_core::sprite::{Sprite, SpriteData};
///
/// let shot = Sprite::new(SpriteData {
///     path: "sprites/shot.gif".into(),
///     width: 8,
///     height: 16,
/// });
/// let another = shot.clone();
///
/// assert_eq!(shot, another);
/// assert_eq!(another.path(), "sprites/shot.gif");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite(Arc<SpriteData>);

impl Sprite {
    /// Creates a new sprite handle over the given data.
    #[must_use]
    pub fn new(data: SpriteData) -> Self {
        Self(Arc::new(data))
    }

    /// Returns the logical asset path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.0.path
    }

    /// Returns the width of the drawn sprite in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.0.width
    }

    /// Returns the height of the drawn sprite in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.0.height
    }
}

impl fmt::Display for Sprite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.path)
    }
}

// Serde goes through the inner data by hand: the derive would require
// serde's `rc` feature for the Arc, which is not part of this stack.
impl Serialize for Sprite {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.as_ref().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Sprite {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        SpriteData::deserialize(deserializer).map(Self::new)
    }
}

/// Collaborator that resolves logical asset paths to sprite handles.
///
/// Implemented by the surrounding application (typically over its
/// image cache). The core calls it from entity and weapon-system
/// constructors only.
pub trait SpriteProvider {
    /// Resolves `path` to a shared sprite handle.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::SpriteNotFound`] if nothing is registered
    /// under `path`.
    fn get_sprite(&self, path: &str) -> Result<Sprite, AssetError>;
}

/// A plain lookup-table [`SpriteProvider`].
///
/// No decoding, no caching policy — just registered handles. Useful as
/// the provider in tests and headless tools, or as the front half of a
/// real asset store.
///
/// # Example
///
/// ```
/// use skyraid_core::sprite::{SpriteLibrary, SpriteProvider};
///
/// let mut library = SpriteLibrary::new();
/// library.insert("sprites/shot.gif", 8, 16);
///
/// let sprite = library.get_sprite("sprites/shot.gif").unwrap();
/// assert_eq!(sprite.width(), 8);
/// assert!(library.get_sprite("sprites/missing.gif").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SpriteLibrary {
    sprites: HashMap<String, Sprite>,
}

impl SpriteLibrary {
    /// Creates an empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a sprite under `path` with the given pixel size.
    ///
    /// Replaces any previous registration for the same path.
    pub fn insert(&mut self, path: &str, width: u32, height: u32) {
        self.sprites.insert(
            path.to_string(),
            Sprite::new(SpriteData {
                path: path.to_string(),
                width,
                height,
            }),
        );
    }

    /// Returns the number of registered sprites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    /// Returns `true` if no sprites are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

impl SpriteProvider for SpriteLibrary {
    fn get_sprite(&self, path: &str) -> Result<Sprite, AssetError> {
        self.sprites
            .get(path)
            .cloned()
            .ok_or_else(|| AssetError::SpriteNotFound(path.to_string()))
    }
}
