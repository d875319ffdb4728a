//=========================================================================
// Sprite Sheet
//=========================================================================
//
// Uniform grid atlas over a single image handle.
//
// The sheet only computes source rectangles; cutting and blitting the
// image is left to the rendering backend that owns the handle type.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::AssetError;

//=== TileRect ============================================================

/// Source rectangle of one tile, in image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

//=== SpriteSheet =========================================================

/// Grid of equally sized tiles cut from `image`.
///
/// Tiles are addressed by `(column, row)` or by a name registered with
/// [`SpriteSheet::name_tile`].
#[derive(Debug, Clone)]
pub struct SpriteSheet<I> {
    image: I,
    tile_size: (u32, u32),
    names: HashMap<String, (u32, u32)>,
}

impl<I> SpriteSheet<I> {
    /// Creates a sheet with `tile_size` = (width, height).
    ///
    /// # Panics
    ///
    /// Panics if either tile dimension is zero.
    pub fn new(image: I, tile_size: (u32, u32)) -> Self {
        assert!(
            tile_size.0 > 0 && tile_size.1 > 0,
            "Tile size must be non-zero"
        );

        Self {
            image,
            tile_size,
            names: HashMap::new(),
        }
    }

    /// Registers `name` for the tile at `(column, row)` and returns self.
    pub fn with_name(mut self, name: impl Into<String>, index: (u32, u32)) -> Self {
        self.name_tile(name, index);
        self
    }

    /// Registers or replaces a tile name.
    pub fn name_tile(&mut self, name: impl Into<String>, index: (u32, u32)) {
        self.names.insert(name.into(), index);
    }

    pub fn image(&self) -> &I {
        &self.image
    }

    pub fn tile_size(&self) -> (u32, u32) {
        self.tile_size
    }

    /// Grid index registered under `name`.
    pub fn index_of(&self, name: &str) -> Option<(u32, u32)> {
        self.names.get(name).copied()
    }

    /// Rectangle of the tile at `(column, row)`.
    ///
    /// Fails with [`AssetError::TileOutOfRange`] when the tile origin does
    /// not fit in `u32` pixels.
    pub fn tile_rect(&self, column: u32, row: u32) -> Result<TileRect, AssetError> {
        let (width, height) = self.tile_size;
        match (column.checked_mul(width), row.checked_mul(height)) {
            (Some(x), Some(y)) => Ok(TileRect { x, y, width, height }),
            _ => Err(AssetError::TileOutOfRange { column, row }),
        }
    }

    /// Rectangle of the tile registered under `name`.
    pub fn named(&self, name: &str) -> Result<TileRect, AssetError> {
        let (column, row) = self
            .index_of(name)
            .ok_or_else(|| AssetError::TileNotFound(name.to_string()))?;
        self.tile_rect(column, row)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_rect_is_one_tile_wide() {
        let sheet = SpriteSheet::new("atlas.png", (16, 24));

        assert_eq!(
            sheet.tile_rect(0, 0),
            Ok(TileRect { x: 0, y: 0, width: 16, height: 24 })
        );
        assert_eq!(
            sheet.tile_rect(3, 2),
            Ok(TileRect { x: 48, y: 48, width: 16, height: 24 })
        );
    }

    #[test]
    fn named_tiles_resolve_to_their_index() {
        let sheet = SpriteSheet::new((), (8, 8))
            .with_name("player", (1, 0))
            .with_name("coin", (2, 3));

        assert_eq!(sheet.named("player"), sheet.tile_rect(1, 0));
        assert_eq!(sheet.named("coin").unwrap().y, 24);
    }

    #[test]
    fn unknown_name_fails() {
        let sheet = SpriteSheet::new((), (8, 8));
        assert_eq!(
            sheet.named("ghost"),
            Err(AssetError::TileNotFound("ghost".to_string()))
        );
    }

    #[test]
    fn far_tile_index_is_out_of_range() {
        let sheet = SpriteSheet::new((), (64, 64)).with_name("far", (u32::MAX / 32, 0));

        assert_eq!(
            sheet.named("far"),
            Err(AssetError::TileOutOfRange { column: u32::MAX / 32, row: 0 })
        );
        assert_eq!(
            sheet.tile_rect(0, u32::MAX),
            Err(AssetError::TileOutOfRange { column: 0, row: u32::MAX })
        );
    }

    #[test]
    #[should_panic(expected = "Tile size must be non-zero")]
    fn zero_tile_size_panics() {
        let _ = SpriteSheet::new((), (0, 8));
    }
}
