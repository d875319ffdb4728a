//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges display drivers (winit window, headless loop) with the scene
// layer.
//
// This module defines the contract between drivers and core logic, so a
// driver can be swapped without changing scene code.
//
// Components:
// - `interface`: Display trait, signals, Frame, FrameHandler, errors
// - `event_collector`: Driver-side signal collection and buffering
// - `headless`: Fixed-delta driver without a window
//
//=========================================================================

//=== Module Declarations =================================================

mod event_collector;
mod headless;
mod interface;

//=== Public API ==========================================================

pub use event_collector::{EventCollector, TickControl};
pub use headless::HeadlessDisplay;
pub use interface::{Display, DisplayError, DisplayHandle, DisplaySignal, Frame, FrameHandler};
