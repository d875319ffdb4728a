//=========================================================================
// Headless Display
//=========================================================================
//
// Window-less display driver with a fixed frame delta.
//
// Used for tests, tools and servers: the loop runs as fast as the handler
// returns, reporting `delta_ms` per frame instead of measuring wall time.
//
// Lifecycle:
//   new() → init() → run(handler)
//                       ├─ handler.on_start()
//                       └─ loop: collect signals → handler.frame()
//                            until Stop / Frame::stop / frame limit
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use super::{
    Display, DisplayError, DisplayHandle, DisplaySignal, EventCollector, Frame, FrameHandler,
    TickControl,
};
use crate::core::scene::Surface;

//=== HeadlessDisplay =====================================================

/// Fixed-timestep display driver without a window.
pub struct HeadlessDisplay<S: Surface> {
    surface: S,
    max_fps: u32,
    size: (u32, u32),
    delta_ms: u32,
    frame_limit: Option<u64>,
    frames_run: u64,
    initialized: bool,
    sender: Sender<DisplaySignal>,
    collector: EventCollector,
}

impl<S: Surface> HeadlessDisplay<S> {
    //--- Construction -----------------------------------------------------

    /// Creates a driver drawing onto `surface` at `max_fps`.
    ///
    /// The frame delta defaults to `1000 / max_fps` milliseconds.
    ///
    /// # Panics
    ///
    /// Panics if `max_fps == 0`.
    pub fn new(surface: S, max_fps: u32) -> Self {
        assert!(max_fps > 0, "FPS must be positive");

        let (sender, receiver) = unbounded();
        Self {
            surface,
            max_fps,
            size: (0, 0),
            delta_ms: 1000 / max_fps,
            frame_limit: None,
            frames_run: 0,
            initialized: false,
            sender,
            collector: EventCollector::new(receiver),
        }
    }

    /// Sets the reported drawable size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Overrides the per-frame delta.
    pub fn with_delta_ms(mut self, delta_ms: u32) -> Self {
        self.delta_ms = delta_ms;
        self
    }

    /// Stops the run after `limit` frames.
    pub fn with_frame_limit(mut self, limit: u64) -> Self {
        self.frame_limit = Some(limit);
        self
    }

    /// Prepares the driver; must precede [`run`](Self::run).
    pub fn init(&mut self) {
        info!(target: "display", "Headless display initialized ({} fps)", self.max_fps);
        self.initialized = true;
    }

    //--- Accessors --------------------------------------------------------

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn delta_ms(&self) -> u32 {
        self.delta_ms
    }

    /// Frames completed by the last run.
    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }

    //--- Execution --------------------------------------------------------

    /// Drives `handler` until stopped.
    ///
    /// # Errors
    ///
    /// [`DisplayError::NotInitialized`] before [`init`](Self::init), and
    /// [`DisplayError::Frame`] when the handler fails.
    pub fn run<H>(&mut self, handler: &mut H) -> Result<(), DisplayError>
    where
        H: FrameHandler<S> + ?Sized,
    {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }

        self.frames_run = 0;
        info!(target: "display", "Headless run started");
        handler.on_start()?;

        loop {
            if self.frame_limit.is_some_and(|limit| self.frames_run >= limit) {
                break;
            }

            if self.collector.collect_frame() == TickControl::Exit {
                break;
            }

            let mut frame = Frame::new(&mut self.surface, self.delta_ms, self.collector.take_events());
            if let Err(e) = handler.frame(&mut frame) {
                error!(target: "display", "Frame {} failed: {}", self.frames_run, e);
                return Err(e.into());
            }
            self.frames_run += 1;

            if frame.is_stop_requested() {
                break;
            }
        }

        info!(target: "display", "Headless run finished after {} frames", self.frames_run);
        Ok(())
    }
}

impl<S: Surface> Display for HeadlessDisplay<S> {
    fn max_fps(&self) -> u32 {
        self.max_fps
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn handle(&self) -> DisplayHandle {
        DisplayHandle::new(self.sender.clone())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
