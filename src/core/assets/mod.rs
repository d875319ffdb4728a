//=========================================================================
// Asset Tree
//=========================================================================
//
// Named, recursively nested catalog of resource handles addressed by
// dotted path strings.
//
// Architecture:
//   Asset
//     ├─ name: String
//     ├─ children: HashMap<String, Asset>
//     └─ data: AssetData { image, font, sound, sprite_sheet }
//
// Query language:
//   ""             → the node itself
//   "a.b"          → child `a`, then its child `b`
//   "a.$"          → `a`'s AssetData bundle
//   "a.$image"     → `a`'s image handle
//   "a.$sprite"    → `a`'s sprite sheet (aliases: sprite_sheet, sheet)
//
// Handles are opaque: the tree stores and returns them but never decodes
// or renders them. Their concrete types are chosen by the application
// through the `Resources` trait.
//
//=========================================================================

//=== Module Declarations =================================================

mod asset;
mod data;
mod font;
mod sprite_sheet;

//=== Public API ==========================================================

pub use asset::{Asset, Resolved};
pub use data::{AssetData, DataProperty};
pub use font::{FontFace, TextExtent};
pub use sprite_sheet::{SpriteSheet, TileRect};

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Resources Trait =====================================================

/// Binds the opaque handle types stored in an asset tree.
///
/// Typically implemented by an application-level marker type.
///
/// # Example
///
/// ```
/// use stagehand::core::assets::{Asset, AssetData, Resources};
///
/// struct Game;
///
/// impl Resources for Game {
///     type Image = &'static str;
///     type Font = ();
///     type Sound = ();
///     type SpriteSheet = ();
/// }
///
/// let mut root = Asset::<Game>::new("root");
/// root.add(Asset::with_data("logo", AssetData::with_image("logo.png")));
///
/// assert_eq!(root.image("logo.$image").unwrap(), &"logo.png");
/// ```
pub trait Resources: 'static {
    /// Decoded image handle.
    type Image;

    /// Font handle (see [`FontFace`] for the narrow contract scenes use).
    type Font;

    /// Sound handle.
    type Sound;

    /// Sprite atlas handle (see [`SpriteSheet`]).
    type SpriteSheet;
}

//=== AssetError ==========================================================

/// Failures raised while resolving asset paths.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    /// A path segment matched neither a child nor the `$` data sentinel.
    #[error("query \"{segment}\" not found (from \"{path}\")")]
    NotFound { segment: String, path: String },

    /// An AssetData property is unknown or holds no handle.
    #[error("property \"{property}\" not found (from \"{path}\")")]
    PropertyNotFound { property: String, path: String },

    /// A typed lookup resolved to a different kind of value.
    #[error("expected {expected} at \"{path}\", found {found}")]
    UnexpectedKind {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A sprite sheet has no tile registered under this name.
    #[error("tile \"{0}\" not found in sprite sheet")]
    TileNotFound(String),

    /// A tile index lies beyond the addressable pixel range.
    #[error("tile ({column}, {row}) is outside the sprite sheet's pixel range")]
    TileOutOfRange { column: u32, row: u32 },
}
