//=========================================================================
// Time
//=========================================================================
//
// Frame-driven time accumulation.
//
// Scenes and the scene manager each own a `FrameCounter` that is ticked
// once per frame with the delta reported by the display driver.
//
//=========================================================================

//=== Module Declarations =================================================

mod frame_counter;

//=== Public API ==========================================================

pub use frame_counter::FrameCounter;
