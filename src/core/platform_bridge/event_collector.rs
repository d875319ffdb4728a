//=========================================================================
// Event Collector
//=========================================================================
//
// Display signal collector with bounded polling and shutdown detection.
//
// Architecture:
//   Receiver<DisplaySignal> → collect_frame() → events → TickControl
//
// Bounded polling prevents a flooding producer from starving the frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::DisplaySignal;
use crate::core::input::Event;

//=== TickControl =========================================================

/// Run loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Collects pending display signals into the next frame's event list.
#[derive(Debug)]
pub struct EventCollector {
    receiver: Receiver<DisplaySignal>,
    events: Vec<Event>,
}

impl EventCollector {
    /// Signals drained per frame; the rest wait for the next one.
    pub const MAX_SIGNALS_PER_FRAME: usize = 100;

    pub fn new(receiver: Receiver<DisplaySignal>) -> Self {
        Self {
            receiver,
            events: Vec::with_capacity(16),
        }
    }

    /// Collects pending signals (bounded to prevent starvation).
    ///
    /// Returns [`TickControl::Exit`] on a stop signal or when every
    /// sender is gone. Events already collected this frame are kept.
    pub fn collect_frame(&mut self) -> TickControl {
        let mut drained = 0;

        while drained < Self::MAX_SIGNALS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(DisplaySignal::Input(event)) => {
                    self.events.push(event);
                    drained += 1;
                }
                Ok(DisplaySignal::Stop) => return TickControl::Exit,
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= Self::MAX_SIGNALS_PER_FRAME {
            warn!(target: "display", "Signal backlog: drained {} events this frame", drained);
        }

        TickControl::Continue
    }

    /// Returns the events collected so far.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Takes the collected events, leaving an empty list for the next frame.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use crate::core::input::KeyCode;

    #[test]
    fn collect_handles_empty_queue() {
        let (_tx, rx) = unbounded::<DisplaySignal>();
        let mut collector = EventCollector::new(rx);

        let result = collector.collect_frame();

        assert_eq!(result, TickControl::Continue);
        assert!(collector.events().is_empty());
    }

    #[test]
    fn collect_keeps_arrival_order() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(DisplaySignal::Input(Event::key_down(KeyCode::KeyA))).unwrap();
        tx.send(DisplaySignal::Input(Event::MouseMoved { x: 10.0, y: 20.0 })).unwrap();

        let result = collector.collect_frame();

        assert_eq!(result, TickControl::Continue);
        assert_eq!(
            collector.take_events(),
            vec![
                Event::key_down(KeyCode::KeyA),
                Event::MouseMoved { x: 10.0, y: 20.0 },
            ]
        );
        assert!(collector.events().is_empty());
    }

    #[test]
    fn collect_returns_exit_on_stop() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(DisplaySignal::Stop).unwrap();

        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }

    #[test]
    fn collect_is_bounded_per_frame() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        for i in 0..(EventCollector::MAX_SIGNALS_PER_FRAME as u32 + 5) {
            tx.send(DisplaySignal::Input(Event::User(i))).unwrap();
        }

        collector.collect_frame();
        assert_eq!(collector.take_events().len(), EventCollector::MAX_SIGNALS_PER_FRAME);

        collector.collect_frame();
        assert_eq!(collector.take_events().len(), 5);
    }

    #[test]
    fn collect_returns_exit_on_disconnect() {
        let (tx, rx) = unbounded::<DisplaySignal>();
        let mut collector = EventCollector::new(rx);

        drop(tx);

        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }
}
