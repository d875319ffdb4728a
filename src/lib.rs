//=========================================================================
// Stagehand — Library Root
//
// Scene lifecycle management and dotted-path asset addressing for small
// real-time games.
//
// Responsibilities:
// - Expose the window-backed entry point (`Engine`, `EngineBuilder`)
// - Expose the scene layer and asset tree under `core`
// - Provide configuration loading and logger setup
//
// Typical usage:
// ```no_run
// use stagehand::prelude::*;
//
// #[derive(Default)]
// struct Title;
// impl Scene<WindowSurface> for Title {}
//
// fn main() -> Result<(), Box<dyn std::error::Error>> {
//     init_logging(LoggingConfig::default());
//     EngineBuilder::new()
//         .build()
//         .init(|manager| {
//             let title = manager.register::<Title>();
//             manager.spawn_scene(title, SceneArgs::new())?;
//             Ok(())
//         })?
//         .run()?;
//     Ok(())
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the platform-independent systems: scenes, assets, input,
// time, audio and the display contract. `platform` holds the winit
// window driver.
//
pub mod config;
pub mod core;
pub mod logging;
pub mod platform;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------

mod engine;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
