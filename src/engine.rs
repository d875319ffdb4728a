//=========================================================================
// Engine
//
// Main entry point tying the scene manager to a window display.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [winit loop]
//         │                          │
//         ├─ with_fps()              ├─ init(|manager| ...)
//         ├─ with_size()             └─ WindowDisplay drives
//         ├─ with_config()              SceneManager per frame
//         └─ with_mixer()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use crate::config::AppConfig;
use crate::core::audio::{AudioMixer, NullMixer};
use crate::core::platform_bridge::{Display, DisplayError, DisplayHandle};
use crate::core::scene::{SceneArgs, SceneError, SceneManager};
use crate::platform::{WindowDisplay, WindowSurface};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **FPS**: 60
/// - **Window**: 800x600, titled "Stagehand"
/// - **Mixer**: [`NullMixer`]
///
/// # Examples
///
/// ```no_run
/// use stagehand::prelude::*;
///
/// #[derive(Default)]
/// struct Title;
/// impl Scene<WindowSurface> for Title {}
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     EngineBuilder::new()
///         .with_fps(30)
///         .with_title("Demo")
///         .build()
///         .init(|manager| {
///             let title = manager.register::<Title>();
///             manager.spawn_scene(title, SceneArgs::new())?;
///             Ok(())
///         })?
///         .run()?;
///     Ok(())
/// }
/// ```
pub struct EngineBuilder {
    config: AppConfig,
    mixer: Option<Box<dyn AudioMixer>>,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            mixer: None,
        }
    }

    /// Sets the target frame rate.
    ///
    /// # Panics
    ///
    /// Panics if `fps == 0`.
    pub fn with_fps(mut self, fps: u32) -> Self {
        assert!(fps > 0, "FPS must be positive, got {}", fps);
        self.config.timing.max_fps = fps;
        self
    }

    /// Sets the window size in logical pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        assert!(
            width > 0 && height > 0,
            "Window size must be non-zero, got {}x{}",
            width,
            height
        );
        self.config.window.width = width;
        self.config.window.height = height;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.window.title = title.into();
        self
    }

    /// Replaces all settings with `config`.
    ///
    /// # Panics
    ///
    /// Panics if `config` fails [`AppConfig::validate`].
    pub fn with_config(mut self, config: AppConfig) -> Self {
        if let Err(e) = config.validate() {
            panic!("{}", e);
        }
        self.config = config;
        self
    }

    /// Sets the audio backend handed to scenes.
    pub fn with_mixer(mut self, mixer: impl AudioMixer + 'static) -> Self {
        self.mixer = Some(Box::new(mixer));
        self
    }

    /// Sets the arguments passed to the current scene when the manager
    /// initializes.
    pub fn with_scene_args(mut self, args: SceneArgs) -> Self {
        self.config.scene_args = args;
        self
    }

    /// Builds the engine with an initialized scene manager.
    ///
    /// The window itself is created once [`Engine::run`] starts the event
    /// loop.
    pub fn build(self) -> Engine {
        let AppConfig {
            window,
            timing,
            scene_args,
            ..
        } = self.config;

        info!(
            "Building engine ({} fps, {}x{})",
            timing.max_fps, window.width, window.height
        );

        let mut display =
            WindowDisplay::new(window.title, (window.width, window.height), timing.max_fps);
        display.init();

        let mixer = self.mixer.unwrap_or_else(|| Box::new(NullMixer::new()));
        let mut manager = SceneManager::new();
        manager.bind(&display, mixer, scene_args);

        Engine { manager, display }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Window-backed runtime: a [`SceneManager`] driven by a [`WindowDisplay`].
///
/// Create via [`EngineBuilder`].
pub struct Engine {
    manager: SceneManager<WindowSurface>,
    display: WindowDisplay,
}

impl Engine {
    //--- Initialization ---------------------------------------------------

    /// Registers and spawns scenes before the loop starts.
    ///
    /// The manager is already initialized, so spawned scenes get their
    /// `after_init` immediately.
    pub fn init<F>(mut self, init_fn: F) -> Result<Self, SceneError>
    where
        F: FnOnce(&mut SceneManager<WindowSurface>) -> Result<(), SceneError>,
    {
        info!("Initializing scenes");
        init_fn(&mut self.manager)?;
        Ok(self)
    }

    pub fn manager(&mut self) -> &mut SceneManager<WindowSurface> {
        &mut self.manager
    }

    /// Handle for injecting events or stopping the loop from elsewhere.
    pub fn handle(&self) -> DisplayHandle {
        self.display.handle()
    }

    //--- Execution --------------------------------------------------------

    /// Runs the window loop and blocks until the application exits.
    ///
    /// # Errors
    ///
    /// See [`WindowDisplay::run`].
    pub fn run(mut self) -> Result<(), DisplayError> {
        info!("Starting engine runtime");
        let result = self.display.run(&mut self.manager);
        info!("Engine shutdown complete");
        result
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::audio::Channel;
    use crate::core::scene::{Scene, SceneContext};

    #[derive(Default)]
    struct Idle;
    impl Scene<WindowSurface> for Idle {}

    /// Mixer that only keeps its volume.
    #[derive(Default)]
    struct RecordingMixer {
        volume: f32,
    }

    impl AudioMixer for RecordingMixer {
        fn play(&mut self, _channel: Channel, _sound: &str) {}

        fn stop(&mut self, _channel: Channel) {}

        fn set_volume(&mut self, volume: f32) {
            self.volume = volume;
        }

        fn volume(&self) -> f32 {
            self.volume
        }
    }

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::new();
        assert_eq!(builder.config, AppConfig::default());
        assert!(builder.mixer.is_none());
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let builder = EngineBuilder::new()
            .with_fps(120)
            .with_size(1024, 768)
            .with_title("Chained");

        assert_eq!(builder.config.timing.max_fps, 120);
        assert_eq!(builder.config.window.width, 1024);
        assert_eq!(builder.config.window.title, "Chained");
    }

    #[test]
    #[should_panic(expected = "FPS must be positive")]
    fn builder_with_fps_panics_on_zero() {
        EngineBuilder::new().with_fps(0);
    }

    #[test]
    #[should_panic(expected = "Window size must be non-zero")]
    fn builder_with_size_panics_on_zero() {
        EngineBuilder::new().with_size(0, 600);
    }

    #[test]
    #[should_panic(expected = "timing.max_fps must be positive")]
    fn builder_with_invalid_config_panics() {
        let mut config = AppConfig::default();
        config.timing.max_fps = 0;
        EngineBuilder::new().with_config(config);
    }

    //=====================================================================
    // Engine Tests
    //=====================================================================

    #[test]
    fn build_initializes_manager_from_config() {
        let mut config = AppConfig::default();
        config.timing.max_fps = 24;
        config.window.width = 640;
        config.window.height = 360;

        let mut engine = EngineBuilder::new().with_config(config).build();
        let manager = engine.manager();

        assert!(manager.is_initialized());
        assert_eq!(manager.fps(), 24);
        assert_eq!(manager.screen_size(), (640, 360));
    }

    #[test]
    fn build_installs_mixer() {
        let mut engine = EngineBuilder::new().with_mixer(RecordingMixer::default()).build();

        engine.manager().mixer().set_volume(0.3);
        assert_eq!(engine.manager().mixer().volume(), 0.3);
    }

    #[test]
    fn init_spawns_with_after_init() {
        #[derive(Default)]
        struct Greeter;
        impl Scene<WindowSurface> for Greeter {
            fn after_init(&mut self, ctx: &mut SceneContext<'_>) {
                ctx.mixer().play(Channel::Music, "theme");
                ctx.mixer().set_volume(0.5);
            }
        }

        let mut engine = EngineBuilder::new()
            .with_mixer(RecordingMixer::default())
            .build()
            .init(|manager| {
                manager.register::<Idle>();
                let greeter = manager.register::<Greeter>();
                manager.spawn_scene(greeter, SceneArgs::new())?;
                Ok(())
            })
            .unwrap();

        let manager = engine.manager();
        assert!(manager.current().is_some());
        assert_eq!(manager.registry().class_count(), 2);
        assert_eq!(manager.mixer().volume(), 0.5);
    }

    #[test]
    fn init_propagates_scene_errors() {
        let result = EngineBuilder::new().build().init(|manager| {
            manager.spawn_scene(crate::core::scene::ClassId(9), SceneArgs::new())?;
            Ok(())
        });

        assert!(matches!(result, Err(SceneError::ClassNotFound(_))));
    }
}
