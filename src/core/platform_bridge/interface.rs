//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Contract between display drivers and the scene layer.
//
// Architecture:
//   DisplayHandle ──Sender<DisplaySignal>──> driver's EventCollector
//   driver ──Frame { surface, delta_ms, events }──> FrameHandler::frame
//
// Drivers own the loop and the clock; handlers own everything else.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::Sender;
use log::warn;
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::input::Event;
use crate::core::scene::{SceneError, Surface};

//=== DisplaySignal =======================================================

/// Messages delivered to a running driver through its [`DisplayHandle`].
#[derive(Debug, Clone, PartialEq)]
pub enum DisplaySignal {
    /// Injects an input event into the next frame.
    Input(Event),

    /// Ends the run loop before the next frame.
    Stop,
}

//=== DisplayHandle =======================================================

/// Cloneable remote control for a display driver.
#[derive(Debug, Clone)]
pub struct DisplayHandle {
    sender: Sender<DisplaySignal>,
}

impl DisplayHandle {
    pub fn new(sender: Sender<DisplaySignal>) -> Self {
        Self { sender }
    }

    /// Queues an event for the next frame.
    pub fn push_event(&self, event: Event) {
        if self.sender.send(DisplaySignal::Input(event)).is_err() {
            warn!(target: "display", "Display disconnected, dropping event");
        }
    }

    /// Asks the driver to stop.
    pub fn stop(&self) {
        if self.sender.send(DisplaySignal::Stop).is_err() {
            warn!(target: "display", "Display disconnected, stop ignored");
        }
    }
}

//=== Display Trait =======================================================

/// Properties every display driver exposes to the manager at init time.
pub trait Display {
    /// Target frame rate.
    fn max_fps(&self) -> u32;

    /// Drawable size in pixels.
    fn size(&self) -> (u32, u32);

    /// Handle for injecting events and stopping the driver.
    fn handle(&self) -> DisplayHandle;
}

//=== Frame ===============================================================

/// One invocation of the frame callback.
pub struct Frame<'a, S> {
    surface: &'a mut S,
    delta_ms: u32,
    events: Vec<Event>,
    stop_requested: bool,
}

impl<'a, S> Frame<'a, S> {
    pub fn new(surface: &'a mut S, delta_ms: u32, events: Vec<Event>) -> Self {
        Self {
            surface,
            delta_ms,
            events,
            stop_requested: false,
        }
    }

    pub fn surface(&mut self) -> &mut S {
        self.surface
    }

    /// Milliseconds since the previous frame.
    pub fn delta_ms(&self) -> u32 {
        self.delta_ms
    }

    /// Events collected for this frame, in arrival order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Ends the run loop once this frame returns.
    pub fn stop(&mut self) {
        self.stop_requested = true;
    }

    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested
    }
}

//=== FrameHandler ========================================================

/// Receiver of a display driver's callbacks.
///
/// Implemented by [`SceneManager`](crate::core::scene::SceneManager) and by
/// any `FnMut(&mut Frame<'_, S>) -> Result<(), SceneError>` closure.
pub trait FrameHandler<S: Surface> {
    /// Called once, before the first frame.
    fn on_start(&mut self) -> Result<(), SceneError> {
        Ok(())
    }

    /// Called once per frame. An error ends the run.
    fn frame(&mut self, frame: &mut Frame<'_, S>) -> Result<(), SceneError>;
}

impl<S, F> FrameHandler<S> for F
where
    S: Surface,
    F: FnMut(&mut Frame<'_, S>) -> Result<(), SceneError>,
{
    fn frame(&mut self, frame: &mut Frame<'_, S>) -> Result<(), SceneError> {
        self(frame)
    }
}

//=== DisplayError ========================================================

/// Display driver failures.
#[derive(Debug, Error)]
pub enum DisplayError {
    /// `run` was called before `init`.
    #[error("display is not initialized")]
    NotInitialized,

    /// The frame handler failed; the run was aborted.
    #[error("frame failed: {0}")]
    Frame(#[from] SceneError),

    /// Event loop creation or execution failed (OS-level issue).
    #[error("event loop error: {0}")]
    EventLoop(String),

    #[error("window creation failed: {0}")]
    WindowCreation(String),
}

//=========================================================================
// Unit Tests
//=========================================================================
