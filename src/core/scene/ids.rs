//=========================================================================
// Scene Identity
//=========================================================================
//
// Instance and class identifiers handed out by the registry.
//
// Both are monotonic and never reused: a removed instance id stays dead,
// and the class table is append-only.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::{type_name, TypeId};
use std::fmt;

//=== InstanceId ==========================================================

/// Identifier of one live scene object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstanceId(pub u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

//=== ClassId =============================================================

/// Identifier of a registered scene type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassId(pub u32);

impl ClassId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "class {}", self.0)
    }
}

//=== ClassRef ============================================================

/// Scene class addressed either by id or by Rust type.
///
/// The registry resolves both forms to a [`ClassId`] before spawning, so
/// the two are interchangeable wherever a class is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassRef {
    Id(ClassId),
    Type(TypeId, &'static str),
}

impl ClassRef {
    /// Refers to the class registered for scene type `T`.
    pub fn of<T: 'static>() -> Self {
        Self::Type(TypeId::of::<T>(), type_name::<T>())
    }
}

impl From<ClassId> for ClassRef {
    fn from(id: ClassId) -> Self {
        Self::Id(id)
    }
}

impl fmt::Display for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{}", id),
            Self::Type(_, name) => f.write_str(name),
        }
    }
}

//=== SceneRef ============================================================

/// Identity of a scene, passed to redirect hooks in place of the object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneRef {
    pub instance_id: InstanceId,
    pub class_id: ClassId,
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Menu;

    #[test]
    fn class_ref_of_type_is_stable() {
        assert_eq!(ClassRef::of::<Menu>(), ClassRef::of::<Menu>());
        assert_ne!(ClassRef::of::<Menu>(), ClassRef::of::<u8>());
    }

    #[test]
    fn class_ref_displays_type_name() {
        let text = ClassRef::of::<Menu>().to_string();
        assert!(text.ends_with("Menu"), "got {text}");
        assert_eq!(ClassRef::from(ClassId(2)).to_string(), "class 2");
    }

    #[test]
    fn instance_ids_order_by_value() {
        assert!(InstanceId(0) < InstanceId(1));
        assert_eq!(InstanceId(7).to_string(), "#7");
    }
}
