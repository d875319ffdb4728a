//=========================================================================
// Core Systems
//
// Platform-independent building blocks of the runtime.
//
// Components:
// - `scene`: Scene trait, registry, manager and transition queue
// - `assets`: Dotted-path asset tree over opaque resource handles
// - `input`: Portable events and the per-scene event pool
// - `time`: Frame counters ticked by the display driver
// - `audio`: Mixer contract handed to scenes
// - `platform_bridge`: Contract between display drivers and scenes
//
// Nothing here depends on winit; the window driver lives in `platform`.
//
//=========================================================================

pub mod assets;
pub mod audio;
pub mod input;
pub mod platform_bridge;
pub mod scene;
pub mod time;
