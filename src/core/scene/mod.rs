//=========================================================================
// Scene System
//=========================================================================
//
// Scene lifecycle, identity and the single-current-scene manager.
//
// Architecture:
//   SceneManager
//     ├─ registry: SceneRegistry
//     │    ├─ classes: ClassId → factory (append-only)
//     │    └─ instances: InstanceId → SceneInstance
//     │                    ├─ scene: Box<dyn Scene>
//     │                    ├─ events: EventPool
//     │                    └─ frame_counter: FrameCounter
//     ├─ current: Option<InstanceId>
//     └─ commands: TransitionQueue
//
// Flow (per frame):
//   handle_events() → update() → draw() → process_transitions()
//
// Scene hooks never touch the manager directly. They queue transitions
// through their SceneContext; the manager applies the queue in FIFO order
// once the operation that dispatched the hook has finished.
//
//=========================================================================

//=== Module Declarations =================================================

mod context;
mod ids;
mod registry;
mod scene_manager;
mod transition_queue;

//=== Public API ==========================================================

pub use context::SceneContext;
pub use ids::{ClassId, ClassRef, InstanceId, SceneRef};
pub use registry::{SceneInstance, SceneRegistry};
pub use scene_manager::SceneManager;
pub use transition_queue::{SceneCommand, TransitionQueue};

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::input::Event;

//=== Scene Arguments =====================================================

/// Free-form arguments passed to [`Scene::init`].
pub type SceneArgs = toml::Table;

//=== Surface Trait =======================================================

/// Marker trait for drawable targets handed to [`Scene::draw`].
///
/// `()` serves as the surface of headless runs.
pub trait Surface: 'static {}

impl Surface for () {}

//=== Scene Trait =========================================================

/// Defines scene behavior through lifecycle hooks.
///
/// Every hook has a no-op default; implement only what the scene needs.
///
/// ```rust
/// # use stagehand::prelude::*;
/// #[derive(Default)]
/// struct Title {
///     elapsed: u32,
/// }
///
/// impl Scene<()> for Title {
///     fn update(&mut self, _ctx: &mut SceneContext<'_>, delta_ms: u32) {
///         self.elapsed += delta_ms;
///     }
/// }
/// ```
pub trait Scene<S: Surface>: 'static {
    /// Called right after every spawn, and again when the manager itself
    /// initializes while this scene is current.
    fn init(&mut self, _ctx: &mut SceneContext<'_>, _args: &SceneArgs) {}

    /// Called at most once per instance, the first time the scene is
    /// current while the manager is initialized.
    fn after_init(&mut self, _ctx: &mut SceneContext<'_>) {}

    /// Called once per frame while current.
    fn update(&mut self, _ctx: &mut SceneContext<'_>, _delta_ms: u32) {}

    /// Called once per frame while current, after `update`.
    fn draw(&mut self, _ctx: &mut SceneContext<'_>, _surface: &mut S) {}

    /// Called for every event routed to this scene, after the event has
    /// been added to its pool.
    fn on_event(&mut self, _ctx: &mut SceneContext<'_>, _event: &Event) {}

    /// Called on the outgoing scene before `next` becomes current.
    fn on_redirect(&mut self, _ctx: &mut SceneContext<'_>, _next: SceneRef) {}

    /// Called on the incoming scene once it is current, with the scene it
    /// replaced. Skipped for silent activations.
    fn on_redirect_from(&mut self, _ctx: &mut SceneContext<'_>, _previous: Option<SceneRef>) {}
}

//=== SceneError ==========================================================

/// Failures of registry lookups and manager guards.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("scene class {0} is not registered")]
    ClassNotFound(ClassRef),

    #[error("scene instance {0} not found")]
    InstanceNotFound(InstanceId),

    #[error("scene manager is not initialized")]
    NotInitialized,

    #[error("scene manager is already initialized")]
    AlreadyInitialized,
}
