//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use stagehand::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder};

// Scene system
pub use crate::core::scene::{
    ClassId, ClassRef, InstanceId, Scene, SceneArgs, SceneContext, SceneError, SceneManager,
    SceneRef, Surface,
};

// Input
pub use crate::core::input::{Event, EventKind, KeyCode, Modifiers, MouseButton};

// Assets
pub use crate::core::assets::{Asset, AssetData, AssetError, Resolved, Resources};

// Audio
pub use crate::core::audio::{AudioMixer, Channel, NullMixer};

// Display drivers
pub use crate::core::platform_bridge::{Display, DisplayError, Frame, FrameHandler, HeadlessDisplay};
pub use crate::platform::{WindowDisplay, WindowSurface};

// Configuration and logging
pub use crate::config::{AppConfig, ConfigError};
pub use crate::logging::{init_logging, LoggingConfig};
