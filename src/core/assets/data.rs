//=========================================================================
// Asset Data
//=========================================================================
//
// Fixed bundle of four optional resource handles attached to every Asset,
// plus the property resolver used by `$` path segments.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use super::{AssetError, Resolved, Resources};

//=== DataProperty ========================================================

/// Recognized AssetData property names.
///
/// `sprite_sheet`, `sprite` and `sheet` are aliases of the same field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataProperty {
    /// Empty property: the bundle itself.
    Bundle,
    Image,
    Font,
    Sound,
    SpriteSheet,
}

impl DataProperty {
    /// Parses a property name, returning `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "" => Some(Self::Bundle),
            "image" => Some(Self::Image),
            "font" => Some(Self::Font),
            "sound" => Some(Self::Sound),
            "sprite_sheet" | "sprite" | "sheet" => Some(Self::SpriteSheet),
            _ => None,
        }
    }

    /// Canonical property name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bundle => "",
            Self::Image => "image",
            Self::Font => "font",
            Self::Sound => "sound",
            Self::SpriteSheet => "sprite_sheet",
        }
    }
}

//=== AssetData ===========================================================

/// Resource handles owned by one asset node.
///
/// Any subset of the fields may be populated.
pub struct AssetData<R: Resources> {
    pub image: Option<R::Image>,
    pub font: Option<R::Font>,
    pub sound: Option<R::Sound>,
    pub sprite_sheet: Option<R::SpriteSheet>,
}

impl<R: Resources> AssetData<R> {
    //--- Construction -----------------------------------------------------

    /// Creates an empty bundle.
    pub fn new() -> Self {
        Self {
            image: None,
            font: None,
            sound: None,
            sprite_sheet: None,
        }
    }

    /// Creates a bundle holding only an image.
    pub fn with_image(image: R::Image) -> Self {
        Self {
            image: Some(image),
            ..Self::new()
        }
    }

    /// Creates a bundle holding only a font.
    pub fn with_font(font: R::Font) -> Self {
        Self {
            font: Some(font),
            ..Self::new()
        }
    }

    /// Creates a bundle holding only a sound.
    pub fn with_sound(sound: R::Sound) -> Self {
        Self {
            sound: Some(sound),
            ..Self::new()
        }
    }

    /// Creates a bundle holding only a sprite sheet.
    pub fn with_sprite_sheet(sprite_sheet: R::SpriteSheet) -> Self {
        Self {
            sprite_sheet: Some(sprite_sheet),
            ..Self::new()
        }
    }

    /// Returns true when no handle is set.
    pub fn is_empty(&self) -> bool {
        self.image.is_none()
            && self.font.is_none()
            && self.sound.is_none()
            && self.sprite_sheet.is_none()
    }

    //--- Resolution -------------------------------------------------------

    /// Resolves a property name against this bundle.
    ///
    /// `""` yields the bundle itself. An unknown name, or a known name whose
    /// handle is unset, fails with [`AssetError::PropertyNotFound`].
    pub fn get(&self, property: &str) -> Result<Resolved<'_, R>, AssetError> {
        self.resolve(property, property)
    }

    /// Resolves `property`, reporting `path` as the originating query.
    pub(crate) fn resolve(&self, property: &str, path: &str) -> Result<Resolved<'_, R>, AssetError> {
        let resolved = match DataProperty::from_name(property) {
            Some(DataProperty::Bundle) => Some(Resolved::Data(self)),
            Some(DataProperty::Image) => self.image.as_ref().map(Resolved::Image),
            Some(DataProperty::Font) => self.font.as_ref().map(Resolved::Font),
            Some(DataProperty::Sound) => self.sound.as_ref().map(Resolved::Sound),
            Some(DataProperty::SpriteSheet) => {
                self.sprite_sheet.as_ref().map(Resolved::SpriteSheet)
            }
            None => None,
        };

        resolved.ok_or_else(|| AssetError::PropertyNotFound {
            property: property.to_string(),
            path: path.to_string(),
        })
    }
}

//--- Trait Implementations -----------------------------------------------

impl<R: Resources> Default for AssetData<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resources> fmt::Debug for AssetData<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetData")
            .field("image", &self.image.is_some())
            .field("font", &self.font.is_some())
            .field("sound", &self.sound.is_some())
            .field("sprite_sheet", &self.sprite_sheet.is_some())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
