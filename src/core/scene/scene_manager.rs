//=========================================================================
// Scene Manager
//=========================================================================
//
// Owns the scene registry, tracks the single current scene, and drives
// its update/draw/event cycle.
//
// Redirect protocol (every activation path):
//   old.on_redirect(new) → current = new → new.on_redirect_from(old)
//   → after_init gate (only once the manager is initialized)
//
// Transitions requested from inside hooks are queued and applied by
// `process_transitions()` at the end of each public operation.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::{
    ClassId, ClassRef, InstanceId, Scene, SceneArgs, SceneCommand, SceneContext, SceneError,
    SceneRef, SceneRegistry, Surface, TransitionQueue,
};
use crate::core::audio::{AudioMixer, NullMixer};
use crate::core::input::Event;
use crate::core::platform_bridge::{Display, DisplayHandle, Frame, FrameHandler};
use crate::core::time::FrameCounter;

//=== Scene Manager =======================================================

/// Manages scene lifecycle and the current-scene pointer.
///
/// Scenes may be registered and spawned before [`init`](Self::init);
/// `update`, `draw` and `handle_events` require it.
pub struct SceneManager<S: Surface> {
    registry: SceneRegistry<S>,
    current: Option<InstanceId>,
    initialized: bool,
    fps: u32,
    screen_size: (u32, u32),
    global_counter: FrameCounter,
    mixer: Box<dyn AudioMixer>,
    display: Option<DisplayHandle>,
    commands: TransitionQueue,
}

impl<S: Surface> SceneManager<S> {
    //--- Construction -----------------------------------------------------

    /// Creates an uninitialized manager with an empty registry.
    pub fn new() -> Self {
        let fps = FrameCounter::default().fps();
        Self {
            registry: SceneRegistry::new(),
            current: None,
            initialized: false,
            fps,
            screen_size: (0, 0),
            global_counter: FrameCounter::new(fps),
            mixer: Box::new(NullMixer::new()),
            display: None,
            commands: TransitionQueue::new(),
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers scene type `T`. See [`SceneRegistry::register`].
    pub fn register<T>(&mut self) -> ClassId
    where
        T: Scene<S> + Default,
    {
        self.registry.register::<T>()
    }

    /// Registers a scene factory. See [`SceneRegistry::register_with`].
    pub fn register_with<F>(&mut self, name: impl Into<String>, factory: F) -> ClassId
    where
        F: Fn() -> Box<dyn Scene<S>> + 'static,
    {
        self.registry.register_with(name, factory)
    }

    //--- Accessors --------------------------------------------------------

    pub fn registry(&self) -> &SceneRegistry<S> {
        &self.registry
    }

    /// Instance id of the current scene.
    pub fn current(&self) -> Option<InstanceId> {
        self.current
    }

    pub fn current_ref(&self) -> Option<SceneRef> {
        self.current.and_then(|id| self.registry.scene_ref(id))
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Target frame rate taken from the display at init.
    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn screen_size(&self) -> (u32, u32) {
        self.screen_size
    }

    /// Counter ticked on every `update`, independent of the current scene.
    pub fn global_counter(&self) -> &FrameCounter {
        &self.global_counter
    }

    pub fn mixer(&mut self) -> &mut dyn AudioMixer {
        self.mixer.as_mut()
    }

    //--- Initialization ---------------------------------------------------

    /// Binds the manager to its display and audio mixer.
    ///
    /// If a scene is already current, its `init` runs again with `args`.
    /// Its `after_init` waits for [`start`](Self::start).
    ///
    /// # Errors
    ///
    /// [`SceneError::AlreadyInitialized`] on a second call.
    pub fn init(
        &mut self,
        display: &dyn Display,
        mixer: Box<dyn AudioMixer>,
        args: SceneArgs,
    ) -> Result<(), SceneError> {
        if self.initialized {
            warn!("Scene manager init called twice");
            return Err(SceneError::AlreadyInitialized);
        }

        self.bind(display, mixer, args);
        Ok(())
    }

    /// Initialization without the double-init guard.
    pub(crate) fn bind(&mut self, display: &dyn Display, mixer: Box<dyn AudioMixer>, args: SceneArgs) {
        self.fps = display.max_fps();
        self.screen_size = display.size();
        self.global_counter = FrameCounter::new(self.fps);
        self.mixer = mixer;
        self.display = Some(display.handle());
        self.initialized = true;

        info!(
            "Scene manager initialized ({} fps, {}x{})",
            self.fps, self.screen_size.0, self.screen_size.1
        );

        if let Some(id) = self.current {
            self.with_scene(id, |scene, ctx| scene.init(ctx, &args));
        }

        self.process_transitions();
    }

    /// Runs the `after_init` gate on the current scene.
    ///
    /// Called by display drivers right before the first frame.
    pub fn start(&mut self) -> Result<(), SceneError> {
        self.ensure_initialized()?;

        if let Some(id) = self.current {
            debug!("Starting scene manager with current scene {}", id);
            self.run_after_init(id);
        }

        self.process_transitions();
        Ok(())
    }

    //--- Scene Operations -------------------------------------------------

    /// Spawns a scene of `class`, makes it current, then calls its `init`.
    pub fn spawn_scene(
        &mut self,
        class: impl Into<ClassRef>,
        args: SceneArgs,
    ) -> Result<InstanceId, SceneError> {
        let id = self.spawn_internal(class.into(), false, args)?;
        self.process_transitions();
        Ok(id)
    }

    /// Like [`spawn_scene`](Self::spawn_scene) without `on_redirect_from`.
    pub fn spawn_scene_silent(
        &mut self,
        class: impl Into<ClassRef>,
        args: SceneArgs,
    ) -> Result<InstanceId, SceneError> {
        let id = self.spawn_internal(class.into(), true, args)?;
        self.process_transitions();
        Ok(id)
    }

    /// Makes an existing instance current.
    pub fn set_active_scene(&mut self, id: InstanceId) -> Result<(), SceneError> {
        self.activate_internal(id, false)?;
        self.process_transitions();
        Ok(())
    }

    /// Like [`set_active_scene`](Self::set_active_scene) without
    /// `on_redirect_from`.
    pub fn set_active_scene_silent(&mut self, id: InstanceId) -> Result<(), SceneError> {
        self.activate_internal(id, true)?;
        self.process_transitions();
        Ok(())
    }

    /// Removes the current scene (if any), then spawns `class`.
    pub fn spawn_remove_scene(
        &mut self,
        class: impl Into<ClassRef>,
        args: SceneArgs,
    ) -> Result<InstanceId, SceneError> {
        let id = self.spawn_remove_internal(class.into(), args)?;
        self.process_transitions();
        Ok(id)
    }

    /// Removes an instance. Returns false when the id is unknown.
    ///
    /// Removing the current scene leaves the manager without one.
    pub fn remove_scene(&mut self, id: InstanceId) -> bool {
        self.remove_internal(id)
    }

    //--- Frame Loop -------------------------------------------------------

    /// Updates the current scene and ticks the frame counters.
    pub fn update(&mut self, delta_ms: u32) -> Result<(), SceneError> {
        self.ensure_initialized()?;
        self.global_counter.tick(delta_ms);

        if let Some(id) = self.current {
            self.with_scene(id, |scene, ctx| scene.update(ctx, delta_ms));

            if let Some(instance) = self.registry.get_mut(id) {
                instance.frame_counter.tick(delta_ms);
            }
        }

        self.process_transitions();
        Ok(())
    }

    /// Draws the current scene onto `surface`.
    pub fn draw(&mut self, surface: &mut S) -> Result<(), SceneError> {
        self.ensure_initialized()?;

        if let Some(id) = self.current {
            self.with_scene(id, |scene, ctx| scene.draw(ctx, surface));
        }

        self.process_transitions();
        Ok(())
    }

    /// Routes `event` to the current scene.
    ///
    /// The event is added to the scene's pool and then passed to its
    /// `on_event`, so it is seen both immediately and by the next drain.
    pub fn handle_events(&mut self, event: Event) -> Result<(), SceneError> {
        self.ensure_initialized()?;

        if let Some(id) = self.current {
            self.with_scene(id, |scene, ctx| {
                ctx.add_event_to_pool(event.clone());
                scene.on_event(ctx, &event);
            });
        }

        self.process_transitions();
        Ok(())
    }

    /// Runs one display frame: events, then update, then draw.
    ///
    /// A [`Event::Quit`] stops the display instead of reaching the scene.
    pub fn run_frame(&mut self, frame: &mut Frame<'_, S>) -> Result<(), SceneError> {
        self.ensure_initialized()?;

        for event in frame.take_events() {
            if event.is_quit() {
                info!("Quit event received, stopping display");
                frame.stop();
                continue;
            }
            self.handle_events(event)?;
        }

        self.update(frame.delta_ms())?;
        self.draw(frame.surface())
    }

    //--- Transition Processing --------------------------------------------

    /// Applies all queued scene transitions in FIFO order.
    ///
    /// Transitions queued by hooks that run during processing are applied
    /// in the same call. Failures are logged and skipped.
    pub fn process_transitions(&mut self) {
        loop {
            let commands = self.commands.take();
            if commands.is_empty() {
                break;
            }

            for command in commands {
                if let Err(e) = self.apply(command) {
                    warn!("Skipping queued scene transition: {}", e);
                }
            }
        }
    }

    fn apply(&mut self, command: SceneCommand) -> Result<(), SceneError> {
        match command {
            SceneCommand::Spawn { class, args, silent } => {
                self.spawn_internal(class, silent, args).map(drop)
            }
            SceneCommand::Activate { instance_id, silent } => {
                self.activate_internal(instance_id, silent)
            }
            SceneCommand::Remove(id) => {
                if !self.remove_internal(id) {
                    debug!("Scene {} not found, skipping removal", id);
                }
                Ok(())
            }
            SceneCommand::SpawnRemove { class, args } => {
                self.spawn_remove_internal(class, args).map(drop)
            }
            SceneCommand::StopDisplay => {
                match &self.display {
                    Some(display) => display.stop(),
                    None => warn!("Display stop requested before init"),
                }
                Ok(())
            }
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn ensure_initialized(&self) -> Result<(), SceneError> {
        if self.initialized {
            Ok(())
        } else {
            Err(SceneError::NotInitialized)
        }
    }

    fn spawn_internal(
        &mut self,
        class: ClassRef,
        silent: bool,
        args: SceneArgs,
    ) -> Result<InstanceId, SceneError> {
        let id = self.registry.spawn(class, self.fps)?;
        self.activate_internal(id, silent)?;
        self.with_scene(id, |scene, ctx| scene.init(ctx, &args));
        Ok(id)
    }

    fn activate_internal(&mut self, target: InstanceId, silent: bool) -> Result<(), SceneError> {
        let target_ref = self
            .registry
            .scene_ref(target)
            .ok_or(SceneError::InstanceNotFound(target))?;

        let previous = self.current_ref();
        if let Some(old) = previous {
            self.with_scene(old.instance_id, |scene, ctx| scene.on_redirect(ctx, target_ref));
        }

        debug!(
            "Redirecting {} -> {}",
            previous.map_or_else(|| "none".to_string(), |old| old.instance_id.to_string()),
            target
        );
        self.current = Some(target);

        if !silent {
            self.with_scene(target, |scene, ctx| scene.on_redirect_from(ctx, previous));
        }

        if self.initialized {
            self.run_after_init(target);
        }

        Ok(())
    }

    fn remove_internal(&mut self, id: InstanceId) -> bool {
        let removed = self.registry.remove(id);
        if removed && self.current == Some(id) {
            debug!("Removed current scene {}", id);
            self.current = None;
        }
        removed
    }

    fn spawn_remove_internal(
        &mut self,
        class: ClassRef,
        args: SceneArgs,
    ) -> Result<InstanceId, SceneError> {
        if let Some(current) = self.current {
            self.remove_internal(current);
        }
        self.spawn_internal(class, false, args)
    }

    /// One-shot `after_init` gate.
    fn run_after_init(&mut self, id: InstanceId) {
        let Some(instance) = self.registry.get_mut(id) else {
            return;
        };
        if instance.initialized {
            return;
        }
        instance.initialized = true;

        self.with_scene(id, |scene, ctx| scene.after_init(ctx));
    }

    /// Runs `f` with a scene and its context, if the instance exists.
    fn with_scene<R>(
        &mut self,
        id: InstanceId,
        f: impl FnOnce(&mut dyn Scene<S>, &mut SceneContext<'_>) -> R,
    ) -> Option<R> {
        let instance = self.registry.get_mut(id)?;
        let mut ctx = SceneContext::new(
            instance.scene_ref,
            &mut instance.events,
            &instance.frame_counter,
            &self.global_counter,
            self.screen_size,
            self.mixer.as_mut(),
            &mut self.commands,
        );
        Some(f(instance.scene.as_mut(), &mut ctx))
    }
}

impl<S: Surface> Default for SceneManager<S> {
    fn default() -> Self {
        Self::new()
    }
}

//--- Trait Implementations -----------------------------------------------

impl<S: Surface> FrameHandler<S> for SceneManager<S> {
    fn on_start(&mut self) -> Result<(), SceneError> {
        self.start()
    }

    fn frame(&mut self, frame: &mut Frame<'_, S>) -> Result<(), SceneError> {
        self.run_frame(frame)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
