//=========================================================================
// Platform Subsystem
//
// Winit-backed display driver.
//
// Architecture:
// ```text
//  Main Thread (winit event loop)
//  ┌──────────────────────────────────────────────┐
//  │  WindowEvent                                 │
//  │   ↓                                          │
//  │  InputProcessor ── Event ──┐                 │
//  │                            ↓                 │
//  │  DisplayHandle ─────> signal channel         │
//  │  (scenes, other threads)   ↓                 │
//  │  RedrawRequested ──> EventCollector          │
//  │                            ↓                 │
//  │                 FrameHandler::frame(Frame)   │
//  │                                              │
//  │  about_to_wait ──> WaitUntil(next frame)     │
//  └──────────────────────────────────────────────┘
// ```
//
// Key Design Decisions:
// - **RedrawRequested = frame boundary**: all input that arrived since
//   the previous frame is handed to the handler in one Frame
// - **Close → Event::Quit**: the close button becomes an ordinary event;
//   the handler decides to stop (the SceneManager does)
// - **Lazy window**: created in `resumed()` for mobile compatibility
// - **Main thread requirement**: winit mandates the main thread on
//   macOS/iOS, so `run()` must be called from it
//
//=========================================================================

//=== Submodules ==========================================================

mod input_processor;

//=== External Crates =====================================================

use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Sender};
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::input::Event;
use crate::core::platform_bridge::{
    Display, DisplayError, DisplayHandle, DisplaySignal, EventCollector, Frame, FrameHandler,
    TickControl,
};
use crate::core::scene::Surface;
use input_processor::InputProcessor;

//=== WindowSurface =======================================================

/// Drawing target handed to scenes by [`WindowDisplay`].
///
/// Wraps the OS window; rendering backends attach to it through
/// [`window`](Self::window).
pub struct WindowSurface {
    window: Window,
}

impl WindowSurface {
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Current drawable size in physical pixels.
    pub fn size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }
}

impl Surface for WindowSurface {}

//=== WindowDisplay =======================================================

/// Window display driver paced to a target frame rate.
///
/// # Lifecycle
///
/// 1. **Construction**: `WindowDisplay::new(title, size, fps)`
/// 2. **Init**: `display.init()`; the manager reads fps/size/handle here
/// 3. **Execution**: `display.run(&mut handler)` blocks on the event loop
/// 4. **Shutdown**: a stop signal, `Frame::stop` or a frame error exits
pub struct WindowDisplay {
    title: String,
    size: (u32, u32),
    max_fps: u32,
    initialized: bool,
    sender: Sender<DisplaySignal>,
    collector: EventCollector,
}

impl WindowDisplay {
    //--- Construction -----------------------------------------------------

    /// Creates a driver for a `size` (logical pixels) window.
    ///
    /// # Panics
    ///
    /// Panics if `max_fps == 0`.
    pub fn new(title: impl Into<String>, size: (u32, u32), max_fps: u32) -> Self {
        assert!(max_fps > 0, "FPS must be positive");

        let (sender, receiver) = unbounded();
        Self {
            title: title.into(),
            size,
            max_fps,
            initialized: false,
            sender,
            collector: EventCollector::new(receiver),
        }
    }

    /// Prepares the driver; must precede [`run`](Self::run).
    pub fn init(&mut self) {
        info!(target: "platform", "Window display initialized ({} fps)", self.max_fps);
        self.initialized = true;
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    fn frame_interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.max_fps))
    }

    //--- Execution --------------------------------------------------------

    /// Runs the winit event loop, calling `handler` once per redraw.
    ///
    /// # Errors
    ///
    /// Returns [`DisplayError::NotInitialized`] before [`init`](Self::init),
    /// [`DisplayError::EventLoop`] if the loop cannot be created or fails,
    /// [`DisplayError::WindowCreation`] if the OS refuses the window, and
    /// [`DisplayError::Frame`] if the handler fails.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS winit requirement).
    pub fn run<H>(&mut self, handler: &mut H) -> Result<(), DisplayError>
    where
        H: FrameHandler<WindowSurface> + ?Sized,
    {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }

        debug!(target: "platform", "Starting winit event loop");
        let event_loop = EventLoop::new().map_err(|e| DisplayError::EventLoop(e.to_string()))?;

        let mut app = WindowApp::new(self, handler);
        event_loop
            .run_app(&mut app)
            .map_err(|e| DisplayError::EventLoop(e.to_string()))?;

        info!(target: "platform", "Winit event loop exited after {} frames", app.frames);
        app.failure.map_or(Ok(()), Err)
    }
}

impl Display for WindowDisplay {
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

//=== WindowApp ===========================================================

/// Per-run winit application state.
struct WindowApp<'a, H: ?Sized> {
    display: &'a mut WindowDisplay,
    handler: &'a mut H,
    surface: Option<WindowSurface>,
    input: InputProcessor,
    frame_interval: Duration,
    last_frame: Option<Instant>,
    next_frame: Instant,
    frames: u64,
    started: bool,
    failure: Option<DisplayError>,
}

impl<'a, H> WindowApp<'a, H>
where
    H: FrameHandler<WindowSurface> + ?Sized,
{
    fn new(display: &'a mut WindowDisplay, handler: &'a mut H) -> Self {
        let frame_interval = display.frame_interval();
        Self {
            display,
            handler,
            surface: None,
            input: InputProcessor::new(),
            frame_interval,
            last_frame: None,
            next_frame: Instant::now(),
            frames: 0,
            started: false,
            failure: None,
        }
    }

    /// Queues an input event for the next frame.
    fn push_input(&self, event: Event) {
        trace!(target: "platform::input", "Queued {:?}", event);
        // The display owns a receiver for the whole run, so this cannot fail
        let _ = self.display.sender.send(DisplaySignal::Input(event));
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, failure: DisplayError) {
        error!(target: "platform", "{}", failure);
        self.failure = Some(failure);
        event_loop.exit();
    }

    /// Frame boundary: collect signals, measure delta, call the handler.
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if self.display.collector.collect_frame() == TickControl::Exit {
            info!(target: "platform", "Stop signal received");
            event_loop.exit();
            return;
        }

        let now = Instant::now();
        let delta_ms = self.last_frame.map_or(0, |last| {
            u32::try_from(now.duration_since(last).as_millis()).unwrap_or(u32::MAX)
        });
        self.last_frame = Some(now);
        self.next_frame = now + self.frame_interval;

        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        let mut frame = Frame::new(surface, delta_ms, self.display.collector.take_events());
        let result = self.handler.frame(&mut frame);
        let stop_requested = frame.is_stop_requested();

        match result {
            Ok(()) => {
                self.frames += 1;
                if stop_requested {
                    info!(target: "platform", "Frame requested stop");
                    event_loop.exit();
                }
            }
            Err(e) => self.fail(event_loop, DisplayError::Frame(e)),
        }
    }
}

//=== Winit Integration ===================================================

impl<H> ApplicationHandler for WindowApp<'_, H>
where
    H: FrameHandler<WindowSurface> + ?Sized,
{
    /// Called when app becomes active (startup or mobile resume).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.surface.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let (width, height) = self.display.size;
        let attrs = WindowAttributes::default()
            .with_title(self.display.title.clone())
            .with_inner_size(LogicalSize::new(width, height));

        let window = match event_loop.create_window(attrs) {
            Ok(window) => window,
            Err(e) => {
                self.fail(event_loop, DisplayError::WindowCreation(e.to_string()));
                return;
            }
        };

        info!(
            target: "platform",
            "Window created: {}x{} @ {}x DPI",
            window.inner_size().width,
            window.inner_size().height,
            window.scale_factor()
        );
        window.request_redraw();
        self.surface = Some(WindowSurface { window });

        if !self.started {
            self.started = true;
            if let Err(e) = self.handler.on_start() {
                self.fail(event_loop, DisplayError::Frame(e));
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.push_input(Event::Quit);
            }

            WindowEvent::ModifiersChanged(state) => {
                trace!(target: "platform::input", "Modifiers changed: {:?}", state);
                self.input.update_modifiers(state.state());
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.push_input(self.input.process_mouse_move(position.x, position.y));
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                match self.input.process_key_event(&key_event) {
                    Some(event) => self.push_input(event),
                    None => trace!(target: "platform::input", "Unmapped key ignored"),
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                self.push_input(self.input.process_mouse_button(button, state));
            }

            WindowEvent::Resized(size) => {
                self.push_input(self.input.process_resize(size.width, size.height));
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    /// Paces redraws to the target frame rate.
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(surface) = &self.surface else {
            return;
        };

        if Instant::now() >= self.next_frame {
            surface.window.request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::SceneError;

    // The event loop itself is never started in tests; these cover the
    // parts of the driver that run before it.

    #[test]
    fn display_reports_configuration() {
        let display = WindowDisplay::new("demo", (800, 600), 30);

        assert_eq!(display.title(), "demo");
        assert_eq!(display.size(), (800, 600));
        assert_eq!(display.max_fps(), 30);
    }

    #[test]
    fn frame_interval_follows_fps() {
        let display = WindowDisplay::new("demo", (1, 1), 50);
        assert_eq!(display.frame_interval(), Duration::from_millis(20));
    }

    #[test]
    fn run_before_init_fails() {
        let mut display = WindowDisplay::new("demo", (800, 600), 60);
        let mut handler = |_: &mut Frame<'_, WindowSurface>| Ok::<(), SceneError>(());

        assert!(matches!(
            display.run(&mut handler),
            Err(DisplayError::NotInitialized)
        ));
    }

    #[test]
    fn handle_feeds_the_collector() {
        let mut display = WindowDisplay::new("demo", (800, 600), 60);

        display.handle().push_event(Event::User(3));
        assert_eq!(display.collector.collect_frame(), TickControl::Continue);
        assert_eq!(display.collector.take_events(), vec![Event::User(3)]);

        display.handle().stop();
        assert_eq!(display.collector.collect_frame(), TickControl::Exit);
    }

    #[test]
    #[should_panic(expected = "FPS must be positive")]
    fn zero_fps_panics() {
        let _ = WindowDisplay::new("demo", (800, 600), 0);
    }
}
