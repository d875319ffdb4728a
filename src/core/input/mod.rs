//=========================================================================
// Input
//
// Portable input events and the per-scene event pool.
//
// Responsibilities:
// - Represent keyboard, mouse and window events independently of the
//   platform backend
// - Queue events per scene for deferred, batch processing
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event;
mod event_pool;

//=== Public API ==========================================================

pub use event::{Event, EventKind, KeyCode, Modifiers, MouseButton};
pub use event_pool::EventPool;
