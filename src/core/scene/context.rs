//=========================================================================
// Scene Context
//=========================================================================
//
// Per-hook view of the framework handed to every Scene callback.
//
// Borrows the instance's own state (event pool, frame counter), read-only
// manager state (global counter, screen size), the audio mixer, and the
// manager's transition queue. Transition requests are deferred; see
// `TransitionQueue`.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{ClassRef, InstanceId, SceneArgs, SceneCommand, SceneRef, TransitionQueue};
use crate::core::audio::AudioMixer;
use crate::core::input::{Event, EventPool};
use crate::core::time::FrameCounter;

//=== SceneContext ========================================================

/// Framework access for a scene hook.
pub struct SceneContext<'a> {
    scene: SceneRef,
    events: &'a mut EventPool,
    frame_counter: &'a FrameCounter,
    global_counter: &'a FrameCounter,
    screen_size: (u32, u32),
    mixer: &'a mut dyn AudioMixer,
    commands: &'a mut TransitionQueue,
}

impl<'a> SceneContext<'a> {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(
        scene: SceneRef,
        events: &'a mut EventPool,
        frame_counter: &'a FrameCounter,
        global_counter: &'a FrameCounter,
        screen_size: (u32, u32),
        mixer: &'a mut dyn AudioMixer,
        commands: &'a mut TransitionQueue,
    ) -> Self {
        Self {
            scene,
            events,
            frame_counter,
            global_counter,
            screen_size,
            mixer,
            commands,
        }
    }

    //--- Identity ---------------------------------------------------------

    /// Identity of the scene this hook runs on.
    pub fn scene(&self) -> SceneRef {
        self.scene
    }

    pub fn instance_id(&self) -> InstanceId {
        self.scene.instance_id
    }

    //--- Event Pool -------------------------------------------------------

    /// Appends an event to this scene's pool.
    pub fn add_event_to_pool(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Drains this scene's pool, most recently added event first.
    pub fn get_events(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.events.drain()
    }

    /// Number of events waiting in this scene's pool.
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    //--- Time -------------------------------------------------------------

    /// This scene's frame counter (ticked by the manager after `update`).
    pub fn frame_counter(&self) -> &FrameCounter {
        self.frame_counter
    }

    /// The manager's counter, ticked every frame regardless of scene.
    pub fn global_counter(&self) -> &FrameCounter {
        self.global_counter
    }

    //--- Collaborators ----------------------------------------------------

    /// Display size in pixels, `(0, 0)` before the manager is initialized.
    pub fn screen_size(&self) -> (u32, u32) {
        self.screen_size
    }

    pub fn mixer(&mut self) -> &mut dyn AudioMixer {
        &mut *self.mixer
    }

    //--- Transitions ------------------------------------------------------

    /// Requests a new current scene of `class`, initialized with `args`.
    pub fn spawn_scene(&mut self, class: impl Into<ClassRef>, args: SceneArgs) {
        self.commands.push(SceneCommand::Spawn {
            class: class.into(),
            args,
            silent: false,
        });
    }

    /// Like [`spawn_scene`](Self::spawn_scene) without `on_redirect_from`.
    pub fn spawn_scene_silent(&mut self, class: impl Into<ClassRef>, args: SceneArgs) {
        self.commands.push(SceneCommand::Spawn {
            class: class.into(),
            args,
            silent: true,
        });
    }

    /// Requests that an existing instance become current.
    pub fn set_active_scene(&mut self, instance_id: InstanceId) {
        self.commands.push(SceneCommand::Activate {
            instance_id,
            silent: false,
        });
    }

    pub fn set_active_scene_silent(&mut self, instance_id: InstanceId) {
        self.commands.push(SceneCommand::Activate {
            instance_id,
            silent: true,
        });
    }

    /// Requests removal of an instance; removing the current scene leaves
    /// the manager without one.
    pub fn remove_scene(&mut self, instance_id: InstanceId) {
        self.commands.push(SceneCommand::Remove(instance_id));
    }

    /// Requests removal of the current scene followed by a spawn.
    pub fn spawn_remove_scene(&mut self, class: impl Into<ClassRef>, args: SceneArgs) {
        self.commands.push(SceneCommand::SpawnRemove {
            class: class.into(),
            args,
        });
    }

    /// Asks the display driver to stop.
    pub fn stop_display(&mut self) {
        self.commands.push(SceneCommand::StopDisplay);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
