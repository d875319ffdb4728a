//=========================================================================
// Asset
//=========================================================================
//
// Tree node and recursive-descent path resolver.
//
// Resolution walks the dot-split path left to right:
//   - empty path         → this node
//   - child name         → descend, resolve the rest in the child
//   - `$...`             → hand the remainder (minus `$`) to AssetData
//   - anything else      → NotFound, reporting the full requested path
//
// No caching: callers that resolve per frame should keep the handle.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt;

use log::debug;

//=== Internal Dependencies ===============================================

use super::{AssetData, AssetError, Resources};

//=== Resolved ============================================================

/// Result of resolving a dotted path.
pub enum Resolved<'a, R: Resources> {
    Asset(&'a Asset<R>),
    Data(&'a AssetData<R>),
    Image(&'a R::Image),
    Font(&'a R::Font),
    Sound(&'a R::Sound),
    SpriteSheet(&'a R::SpriteSheet),
}

impl<'a, R: Resources> Resolved<'a, R> {
    /// Short name of the resolved kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Asset(_) => "asset",
            Self::Data(_) => "asset data",
            Self::Image(_) => "image",
            Self::Font(_) => "font",
            Self::Sound(_) => "sound",
            Self::SpriteSheet(_) => "sprite sheet",
        }
    }
}

impl<R: Resources> fmt::Debug for Resolved<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asset(asset) => f.debug_tuple("Asset").field(&asset.name()).finish(),
            Self::Data(data) => f.debug_tuple("Data").field(data).finish(),
            other => f.write_str(other.kind_name()),
        }
    }
}

//=== Asset ===============================================================

/// Named node of the asset tree.
///
/// Each node exclusively owns its children and its data bundle, so the
/// tree is acyclic by construction and a removed subtree is dropped.
pub struct Asset<R: Resources> {
    name: String,
    children: HashMap<String, Asset<R>>,
    data: AssetData<R>,
}

impl<R: Resources> Asset<R> {
    //--- Construction -----------------------------------------------------

    /// Creates a leaf with an empty data bundle.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_data(name, AssetData::new())
    }

    /// Creates a leaf holding `data`.
    pub fn with_data(name: impl Into<String>, data: AssetData<R>) -> Self {
        Self {
            name: name.into(),
            children: HashMap::new(),
            data,
        }
    }

    /// Adds `child` and returns self, for building catalogs inline.
    pub fn with_child(mut self, child: Asset<R>) -> Self {
        self.add(child);
        self
    }

    //--- Accessors --------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &AssetData<R> {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut AssetData<R> {
        &mut self.data
    }

    /// Direct child lookup (no path parsing).
    pub fn child(&self, name: &str) -> Option<&Asset<R>> {
        self.children.get(name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Asset<R>> {
        self.children.get_mut(name)
    }

    /// Iterates over direct children in unspecified order.
    pub fn children(&self) -> impl Iterator<Item = &Asset<R>> {
        self.children.values()
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    //--- Mutation ---------------------------------------------------------

    /// Inserts `child` under its name.
    ///
    /// A previous child with the same name is replaced and returned.
    pub fn add(&mut self, child: Asset<R>) -> Option<Asset<R>> {
        let shadowed = self.children.insert(child.name.clone(), child);
        if let Some(previous) = &shadowed {
            debug!("Asset {:?} replaced child {:?}", self.name, previous.name);
        }
        shadowed
    }

    /// Removes and returns the child called `name`.
    pub fn remove(&mut self, name: &str) -> Result<Asset<R>, AssetError> {
        self.children.remove(name).ok_or_else(|| AssetError::NotFound {
            segment: name.to_string(),
            path: name.to_string(),
        })
    }

    /// Removes the child sharing `child`'s name.
    pub fn remove_child(&mut self, child: &Asset<R>) -> Result<Asset<R>, AssetError> {
        self.remove(&child.name)
    }

    //--- Resolution -------------------------------------------------------

    /// Resolves a dotted path relative to this node.
    ///
    /// # Errors
    ///
    /// [`AssetError::NotFound`] when a segment matches neither a child nor
    /// `$`; [`AssetError::PropertyNotFound`] when a `$` property is unknown
    /// or unset. Both carry the full path passed to this call.
    pub fn get(&self, path: &str) -> Result<Resolved<'_, R>, AssetError> {
        self.resolve(path, path)
    }

    fn resolve<'a>(&'a self, path: &str, origin: &str) -> Result<Resolved<'a, R>, AssetError> {
        if path.is_empty() {
            return Ok(Resolved::Asset(self));
        }

        let (segment, rest) = match path.split_once('.') {
            Some((segment, rest)) => (segment, Some(rest)),
            None => (path, None),
        };

        // Empty segment ("a..b", ".b") addresses this node and continues
        if segment.is_empty() {
            return match rest {
                Some(rest) => self.resolve(rest, origin),
                None => Ok(Resolved::Asset(self)),
            };
        }

        if let Some(child) = self.children.get(segment) {
            return match rest {
                Some(rest) => child.resolve(rest, origin),
                None => Ok(Resolved::Asset(child)),
            };
        }

        // `$` consumes everything after it; AssetData has no children
        if let Some(property) = path.strip_prefix('$') {
            return self.data.resolve(property, origin);
        }

        Err(AssetError::NotFound {
            segment: segment.to_string(),
            path: origin.to_string(),
        })
    }

    //--- Typed Lookups ----------------------------------------------------

    /// Resolves `path` and expects an asset node.
    pub fn get_asset(&self, path: &str) -> Result<&Asset<R>, AssetError> {
        match self.get(path)? {
            Resolved::Asset(asset) => Ok(asset),
            other => Err(unexpected(path, "asset", &other)),
        }
    }

    /// Resolves `path` and expects a data bundle.
    pub fn get_data(&self, path: &str) -> Result<&AssetData<R>, AssetError> {
        match self.get(path)? {
            Resolved::Data(data) => Ok(data),
            other => Err(unexpected(path, "asset data", &other)),
        }
    }

    /// Resolves `path` and expects an image handle.
    pub fn image(&self, path: &str) -> Result<&R::Image, AssetError> {
        match self.get(path)? {
            Resolved::Image(image) => Ok(image),
            other => Err(unexpected(path, "image", &other)),
        }
    }

    /// Resolves `path` and expects a font handle.
    pub fn font(&self, path: &str) -> Result<&R::Font, AssetError> {
        match self.get(path)? {
            Resolved::Font(font) => Ok(font),
            other => Err(unexpected(path, "font", &other)),
        }
    }

    /// Resolves `path` and expects a sound handle.
    pub fn sound(&self, path: &str) -> Result<&R::Sound, AssetError> {
        match self.get(path)? {
            Resolved::Sound(sound) => Ok(sound),
            other => Err(unexpected(path, "sound", &other)),
        }
    }

    /// Resolves `path` and expects a sprite sheet handle.
    pub fn sprite_sheet(&self, path: &str) -> Result<&R::SpriteSheet, AssetError> {
        match self.get(path)? {
            Resolved::SpriteSheet(sheet) => Ok(sheet),
            other => Err(unexpected(path, "sprite sheet", &other)),
        }
    }
}

//--- Internal Helpers ----------------------------------------------------

fn unexpected<R: Resources>(path: &str, expected: &'static str, found: &Resolved<'_, R>) -> AssetError {
    AssetError::UnexpectedKind {
        path: path.to_string(),
        expected,
        found: found.kind_name(),
    }
}

//--- Trait Implementations -----------------------------------------------

impl<R: Resources> fmt::Debug for Asset<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut children: Vec<&str> = self.children.keys().map(String::as_str).collect();
        children.sort_unstable();

        f.debug_struct("Asset")
            .field("name", &self.name)
            .field("children", &children)
            .field("data", &self.data)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct TestResources;

    impl Resources for TestResources {
        type Image = &'static str;
        type Font = &'static str;
        type Sound = &'static str;
        type SpriteSheet = &'static str;
    }

    type TestAsset = Asset<TestResources>;

    //--- Test Helpers -----------------------------------------------------

    fn catalog() -> TestAsset {
        let a_data = AssetData {
            image: Some("a.png"),
            font: None,
            sound: Some("a.wav"),
            sprite_sheet: Some("a-sheet"),
        };

        TestAsset::new("root").with_child(
            TestAsset::with_data("a", a_data)
                .with_child(TestAsset::with_data("b", AssetData::with_image("b.png"))),
        )
    }

    //--- Resolution Tests -------------------------------------------------

    #[test]
    fn empty_path_is_the_node_itself() {
        let root = catalog();
        let resolved = root.get_asset("").unwrap();
        assert_eq!(resolved.name(), "root");
    }

    #[test]
    fn dotted_path_descends_children() {
        let root = catalog();
        assert_eq!(root.get_asset("a").unwrap().name(), "a");
        assert_eq!(root.get_asset("a.b").unwrap().name(), "b");
    }

    #[test]
    fn dollar_segment_addresses_data() {
        let root = catalog();

        assert_eq!(root.image("a.$image").unwrap(), &"a.png");
        assert_eq!(root.sound("a.$sound").unwrap(), &"a.wav");
        assert_eq!(root.image("a.b.$image").unwrap(), &"b.png");
        assert!(root.get_data("a.$").is_ok());
    }

    #[test]
    fn sprite_aliases_resolve_identically() {
        let root = catalog();

        let canonical = root.sprite_sheet("a.$sprite_sheet").unwrap();
        assert_eq!(root.sprite_sheet("a.$sprite").unwrap(), canonical);
        assert_eq!(root.sprite_sheet("a.$sheet").unwrap(), canonical);
    }

    #[test]
    fn missing_segment_reports_full_path() {
        let root = catalog();

        let err = root.get("missing").unwrap_err();
        assert!(err.to_string().contains("missing"));

        let err = root.get("a.nope.$image").unwrap_err();
        assert_eq!(
            err,
            AssetError::NotFound {
                segment: "nope".to_string(),
                path: "a.nope.$image".to_string(),
            }
        );
    }

    #[test]
    fn unknown_or_unset_property_is_reported() {
        let root = catalog();

        let err = root.get("a.$music").unwrap_err();
        assert_eq!(
            err,
            AssetError::PropertyNotFound {
                property: "music".to_string(),
                path: "a.$music".to_string(),
            }
        );

        assert!(matches!(
            root.get("a.$font"),
            Err(AssetError::PropertyNotFound { .. })
        ));
    }

    #[test]
    fn data_terminates_descent() {
        let root = catalog();
        assert!(matches!(
            root.get("a.$image.b"),
            Err(AssetError::PropertyNotFound { .. })
        ));
    }

    #[test]
    fn empty_segments_are_skipped() {
        let root = catalog();
        assert_eq!(root.get_asset("a..b").unwrap().name(), "b");
        assert_eq!(root.get_asset("a.").unwrap().name(), "a");
    }

    #[test]
    fn typed_lookup_rejects_other_kinds() {
        let root = catalog();
        let err = root.image("a").unwrap_err();
        assert_eq!(
            err,
            AssetError::UnexpectedKind {
                path: "a".to_string(),
                expected: "image",
                found: "asset",
            }
        );
    }

    //--- Mutation Tests ---------------------------------------------------

    #[test]
    fn add_shadows_previous_child() {
        let mut root = catalog();

        let previous = root.add(TestAsset::new("a"));
        assert_eq!(previous.map(|asset| asset.len()), Some(1));

        // The replacement has no `b`, so the old subtree is gone
        assert!(root.get("a.b").is_err());
        assert_eq!(root.len(), 1);
    }

    #[test]
    fn remove_drops_subtree() {
        let mut root = catalog();

        let removed = root.remove("a").unwrap();
        assert_eq!(removed.name(), "a");
        assert!(root.is_empty());
        assert!(root.get("a.b").is_err());
    }

    #[test]
    fn remove_missing_child_fails() {
        let mut root = catalog();
        assert!(matches!(
            root.remove("ghost"),
            Err(AssetError::NotFound { .. })
        ));
    }

    #[test]
    fn remove_child_matches_by_name() {
        let mut root = catalog();
        let stand_in = TestAsset::new("a");

        let removed = root.remove_child(&stand_in).unwrap();
        assert!(removed.child("b").is_some());
        assert!(root.is_empty());
        assert!(matches!(
            root.remove_child(&stand_in),
            Err(AssetError::NotFound { .. })
        ));
    }

    #[test]
    fn data_mut_updates_handles() {
        let mut root = catalog();
        root.child_mut("a").unwrap().data_mut().font = Some("serif");
        assert_eq!(root.font("a.$font").unwrap(), &"serif");
    }
}
