//=========================================================================
// Scene Registry
//=========================================================================
//
// Arena-style tables for scene classes and live scene instances.
//
// Architecture:
//   SceneRegistry
//     ├─ classes: Vec<ClassEntry>            (index = ClassId, append-only)
//     ├─ class_ids: HashMap<TypeId, ClassId> (typed registrations)
//     └─ instances: BTreeMap<InstanceId, SceneInstance>
//
// Ids are monotonic and never reused. Owned by the SceneManager, so
// independent managers (and tests) never share state.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::{type_name, TypeId};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use log::debug;

//=== Internal Dependencies ===============================================

use super::{ClassId, ClassRef, InstanceId, Scene, SceneError, SceneRef, Surface};
use crate::core::input::EventPool;
use crate::core::time::FrameCounter;

//=== Types ===============================================================

type SceneFactory<S> = Box<dyn Fn() -> Box<dyn Scene<S>>>;

struct ClassEntry<S: Surface> {
    name: String,
    factory: SceneFactory<S>,
}

//=== SceneInstance =======================================================

/// A live scene plus the per-instance state the framework maintains.
pub struct SceneInstance<S: Surface> {
    pub(super) scene_ref: SceneRef,
    pub(super) scene: Box<dyn Scene<S>>,
    pub(super) events: EventPool,
    pub(super) frame_counter: FrameCounter,
    pub(super) initialized: bool,
}

impl<S: Surface> SceneInstance<S> {
    pub fn scene_ref(&self) -> SceneRef {
        self.scene_ref
    }

    pub fn instance_id(&self) -> InstanceId {
        self.scene_ref.instance_id
    }

    pub fn class_id(&self) -> ClassId {
        self.scene_ref.class_id
    }

    /// Pending events, in insertion order.
    pub fn events(&self) -> &EventPool {
        &self.events
    }

    pub fn frame_counter(&self) -> &FrameCounter {
        &self.frame_counter
    }

    /// Whether the one-shot `after_init` hook has fired.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl<S: Surface> fmt::Debug for SceneInstance<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneInstance")
            .field("scene_ref", &self.scene_ref)
            .field("events", &self.events.len())
            .field("frame", &self.frame_counter.frame())
            .field("initialized", &self.initialized)
            .finish()
    }
}

//=== SceneRegistry =======================================================

/// Class and instance tables of one scene manager.
pub struct SceneRegistry<S: Surface> {
    classes: Vec<ClassEntry<S>>,
    class_ids: HashMap<TypeId, ClassId>,
    instances: BTreeMap<InstanceId, SceneInstance<S>>,
    next_instance: u64,
}

impl<S: Surface> SceneRegistry<S> {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            classes: Vec::new(),
            class_ids: HashMap::new(),
            instances: BTreeMap::new(),
            next_instance: 0,
        }
    }

    //--- Class Registration -----------------------------------------------

    /// Registers scene type `T`, constructed through `Default`.
    ///
    /// Registering the same type again returns its existing id.
    pub fn register<T>(&mut self) -> ClassId
    where
        T: Scene<S> + Default,
    {
        let type_id = TypeId::of::<T>();
        if let Some(&id) = self.class_ids.get(&type_id) {
            return id;
        }

        let factory: SceneFactory<S> = Box::new(|| Box::new(T::default()) as Box<dyn Scene<S>>);
        let id = self.push_class(type_name::<T>().to_string(), factory);
        self.class_ids.insert(type_id, id);
        id
    }

    /// Registers an explicit factory under `name`.
    ///
    /// Every call creates a new class, even for a repeated name. Such
    /// classes are addressable only by the returned id.
    pub fn register_with<F>(&mut self, name: impl Into<String>, factory: F) -> ClassId
    where
        F: Fn() -> Box<dyn Scene<S>> + 'static,
    {
        self.push_class(name.into(), Box::new(factory))
    }

    fn push_class(&mut self, name: String, factory: SceneFactory<S>) -> ClassId {
        let id = ClassId(self.classes.len() as u32);
        debug!("Registered scene class {} as {}", name, id);
        self.classes.push(ClassEntry { name, factory });
        id
    }

    /// Resolves a class token to its id.
    pub fn resolve(&self, class: ClassRef) -> Result<ClassId, SceneError> {
        let id = match class {
            ClassRef::Id(id) => Some(id).filter(|id| id.index() < self.classes.len()),
            ClassRef::Type(type_id, _) => self.class_ids.get(&type_id).copied(),
        };
        id.ok_or(SceneError::ClassNotFound(class))
    }

    /// Id of the class registered for type `T`.
    pub fn class_id_of<T: 'static>(&self) -> Option<ClassId> {
        self.class_ids.get(&TypeId::of::<T>()).copied()
    }

    pub fn class_name(&self, id: ClassId) -> Option<&str> {
        self.classes.get(id.index()).map(|entry| entry.name.as_str())
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    //--- Instances --------------------------------------------------------

    /// Constructs and stores a new instance of `class`.
    ///
    /// The instance's frame counter targets `fps`.
    pub fn spawn(&mut self, class: impl Into<ClassRef>, fps: u32) -> Result<InstanceId, SceneError> {
        let class_id = self.resolve(class.into())?;
        let entry = &self.classes[class_id.index()];

        let instance_id = InstanceId(self.next_instance);
        self.next_instance += 1;

        let instance = SceneInstance {
            scene_ref: SceneRef {
                instance_id,
                class_id,
            },
            scene: (entry.factory)(),
            events: EventPool::new(),
            frame_counter: FrameCounter::new(fps),
            initialized: false,
        };

        debug!("Spawned scene {} ({})", instance_id, entry.name);
        self.instances.insert(instance_id, instance);
        Ok(instance_id)
    }

    /// Drops an instance. Returns false when the id is unknown.
    pub fn remove(&mut self, id: InstanceId) -> bool {
        let removed = self.instances.remove(&id).is_some();
        if removed {
            debug!("Removed scene {}", id);
        }
        removed
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.instances.contains_key(&id)
    }

    pub fn get(&self, id: InstanceId) -> Option<&SceneInstance<S>> {
        self.instances.get(&id)
    }

    pub(super) fn get_mut(&mut self, id: InstanceId) -> Option<&mut SceneInstance<S>> {
        self.instances.get_mut(&id)
    }

    pub fn scene_ref(&self, id: InstanceId) -> Option<SceneRef> {
        self.instances.get(&id).map(|instance| instance.scene_ref)
    }

    /// Live instance ids in ascending order.
    pub fn instance_ids(&self) -> impl Iterator<Item = InstanceId> + '_ {
        self.instances.keys().copied()
    }

    /// Number of live instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl<S: Surface> Default for SceneRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Menu;
    impl Scene<()> for Menu {}

    #[derive(Default)]
    struct Level;
    impl Scene<()> for Level {}

    //--- Class Tests ------------------------------------------------------

    #[test]
    fn class_ids_are_sequential_from_zero() {
        let mut registry = SceneRegistry::<()>::new();

        assert_eq!(registry.register::<Menu>(), ClassId(0));
        assert_eq!(registry.register::<Level>(), ClassId(1));
        assert_eq!(registry.class_count(), 2);
    }

    #[test]
    fn registering_a_type_twice_keeps_its_id() {
        let mut registry = SceneRegistry::<()>::new();

        let first = registry.register::<Menu>();
        let again = registry.register::<Menu>();

        assert_eq!(first, again);
        assert_eq!(registry.class_count(), 1);
        assert_eq!(registry.class_id_of::<Menu>(), Some(first));
        assert!(registry.class_name(first).unwrap().ends_with("Menu"));
    }

    #[test]
    fn factory_classes_resolve_by_id_only() {
        let mut registry = SceneRegistry::<()>::new();

        let id = registry.register_with("boss", || Box::new(Level));
        assert_eq!(registry.class_name(id), Some("boss"));
        assert_eq!(registry.resolve(id.into()), Ok(id));
        assert_eq!(registry.class_id_of::<Level>(), None);
    }

    #[test]
    fn resolve_rejects_unknown_classes() {
        let registry = SceneRegistry::<()>::new();

        assert_eq!(
            registry.resolve(ClassId(3).into()),
            Err(SceneError::ClassNotFound(ClassRef::Id(ClassId(3))))
        );
        assert!(registry.resolve(ClassRef::of::<Menu>()).is_err());
    }

    //--- Instance Tests ---------------------------------------------------

    #[test]
    fn spawn_assigns_increasing_instance_ids() {
        let mut registry = SceneRegistry::<()>::new();
        let menu = registry.register::<Menu>();

        let a = registry.spawn(menu, 30).unwrap();
        let b = registry.spawn(ClassRef::of::<Menu>(), 30).unwrap();

        assert!(a < b);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(a).unwrap().frame_counter().fps(), 30);
        assert_eq!(registry.scene_ref(b).map(|r| r.class_id), Some(menu));
    }

    #[test]
    fn spawn_unknown_class_fails() {
        let mut registry = SceneRegistry::<()>::new();
        assert!(matches!(
            registry.spawn(ClassId(0), 60),
            Err(SceneError::ClassNotFound(_))
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn instance_ids_are_never_reused() {
        let mut registry = SceneRegistry::<()>::new();
        let menu = registry.register::<Menu>();

        let a = registry.spawn(menu, 60).unwrap();
        assert!(registry.remove(a));
        let b = registry.spawn(menu, 60).unwrap();

        assert_ne!(a, b);
        assert!(!registry.contains(a));
        assert_eq!(registry.instance_ids().collect::<Vec<_>>(), vec![b]);
    }

    #[test]
    fn remove_unknown_instance_is_noop() {
        let mut registry = SceneRegistry::<()>::new();
        assert!(!registry.remove(InstanceId(42)));
    }

    #[test]
    fn new_instances_start_uninitialized() {
        let mut registry = SceneRegistry::<()>::new();
        let menu = registry.register::<Menu>();
        let id = registry.spawn(menu, 60).unwrap();

        let instance = registry.get(id).unwrap();
        assert!(!instance.is_initialized());
        assert!(instance.events().is_empty());
        assert_eq!(instance.instance_id(), id);
    }
}
