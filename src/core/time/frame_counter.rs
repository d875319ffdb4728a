//=========================================================================
// Frame Counter
//=========================================================================
//
// Accumulates per-frame deltas into frames / seconds / minutes.
//
// Edge flags (`new_second`, `new_minute`) are raised only by the tick that
// crossed the boundary and are cleared at the start of every tick, so they
// must be read before the next call to `tick()`.
//
//=========================================================================

//=== Constants ===========================================================

const MILLIS_PER_SECOND: u32 = 1000;
const SECONDS_PER_MINUTE: u32 = 60;

//=== FrameCounter ========================================================

/// Wall-clock accumulator driven by frame deltas.
///
/// # Example
///
/// ```
/// use stagehand::core::time::FrameCounter;
///
/// let mut counter = FrameCounter::new(60);
/// counter.tick(600);
/// counter.tick(600);
///
/// assert_eq!(counter.frame(), 2);
/// assert_eq!(counter.seconds(), 1);
/// assert_eq!(counter.milliseconds(), 200);
/// assert!(counter.new_second());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameCounter {
    fps: u32,
    frame: u64,
    milliseconds: u32,
    seconds: u32,
    minutes: u64,
    new_second: bool,
    new_minute: bool,
}

impl FrameCounter {
    //--- Construction -----------------------------------------------------

    /// Creates a zeroed counter for an owner running at `fps`.
    ///
    /// `fps` is informational only; accumulation uses the deltas passed
    /// to [`FrameCounter::tick`].
    pub fn new(fps: u32) -> Self {
        Self {
            fps,
            frame: 0,
            milliseconds: 0,
            seconds: 0,
            minutes: 0,
            new_second: false,
            new_minute: false,
        }
    }

    //--- Mutation ---------------------------------------------------------

    /// Advances the counter by one frame of `delta_ms` milliseconds.
    ///
    /// Carries are applied repeatedly, so a single large delta (several
    /// seconds or minutes) is folded in completely.
    pub fn tick(&mut self, delta_ms: u32) {
        self.new_second = false;
        self.new_minute = false;
        self.frame += 1;

        // Fold whole seconds in one step; the remainder stays below 1000.
        let total_ms = u64::from(self.milliseconds) + u64::from(delta_ms);
        let carried_seconds = total_ms / u64::from(MILLIS_PER_SECOND);
        self.milliseconds = (total_ms % u64::from(MILLIS_PER_SECOND)) as u32;

        if carried_seconds > 0 {
            self.new_second = true;
        }

        let total_seconds = u64::from(self.seconds) + carried_seconds;
        let carried_minutes = total_seconds / u64::from(SECONDS_PER_MINUTE);
        self.seconds = (total_seconds % u64::from(SECONDS_PER_MINUTE)) as u32;

        if carried_minutes > 0 {
            self.minutes += carried_minutes;
            self.new_minute = true;
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Target frame rate of the owner.
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Number of ticks processed so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Milliseconds past the current second (always `< 1000`).
    pub fn milliseconds(&self) -> u32 {
        self.milliseconds
    }

    /// Seconds past the current minute (always `< 60`).
    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    /// Whole minutes accumulated.
    pub fn minutes(&self) -> u64 {
        self.minutes
    }

    /// True only during the tick that crossed a second boundary.
    pub fn new_second(&self) -> bool {
        self.new_second
    }

    /// True only during the tick that crossed a minute boundary.
    pub fn new_minute(&self) -> bool {
        self.new_minute
    }

    /// Total accumulated time in milliseconds.
    pub fn elapsed_ms(&self) -> u64 {
        self.minutes * u64::from(SECONDS_PER_MINUTE * MILLIS_PER_SECOND)
            + u64::from(self.seconds) * u64::from(MILLIS_PER_SECOND)
            + u64::from(self.milliseconds)
    }
}

impl Default for FrameCounter {
    fn default() -> Self {
        Self::new(60)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //--- Accumulation -----------------------------------------------------

    #[test]
    fn new_counter_is_zeroed() {
        let counter = FrameCounter::new(30);
        assert_eq!(counter.fps(), 30);
        assert_eq!(counter.frame(), 0);
        assert_eq!(counter.elapsed_ms(), 0);
        assert!(!counter.new_second());
        assert!(!counter.new_minute());
    }

    #[test]
    fn sum_of_deltas_is_preserved() {
        let deltas = [16, 17, 16, 999, 1, 2500, 61_000, 0, 33, 125_000];
        let mut counter = FrameCounter::new(60);

        for delta in deltas {
            counter.tick(delta);
        }

        let expected: u64 = deltas.iter().map(|&d| u64::from(d)).sum();
        assert_eq!(counter.frame(), deltas.len() as u64);
        assert_eq!(
            counter.minutes() * 60_000
                + u64::from(counter.seconds()) * 1000
                + u64::from(counter.milliseconds()),
            expected
        );
        assert_eq!(counter.elapsed_ms(), expected);
        assert!(counter.milliseconds() < 1000);
        assert!(counter.seconds() < 60);
    }

    //--- Edge Flags -------------------------------------------------------

    #[test]
    fn new_second_is_raised_only_on_crossing_tick() {
        let mut counter = FrameCounter::new(60);

        counter.tick(500);
        assert!(!counter.new_second());

        counter.tick(500);
        assert!(counter.new_second(), "crossing 1000ms raises the flag");
        assert_eq!(counter.seconds(), 1);
        assert_eq!(counter.milliseconds(), 0);

        counter.tick(10);
        assert!(!counter.new_second(), "flag is cleared on the next tick");
    }

    #[test]
    fn large_delta_carries_more_than_once() {
        let mut counter = FrameCounter::new(60);

        counter.tick(2500);

        assert!(counter.new_second());
        assert_eq!(counter.seconds(), 2);
        assert_eq!(counter.milliseconds(), 500);
    }

    #[test]
    fn new_minute_is_raised_only_on_crossing_tick() {
        let mut counter = FrameCounter::new(60);

        for _ in 0..59 {
            counter.tick(1000);
            assert!(!counter.new_minute());
        }

        counter.tick(1000);
        assert!(counter.new_minute());
        assert!(counter.new_second());
        assert_eq!(counter.minutes(), 1);
        assert_eq!(counter.seconds(), 0);

        counter.tick(1);
        assert!(!counter.new_minute());
        assert!(!counter.new_second());
    }

    #[test]
    fn multi_minute_delta_carries_twice() {
        let mut counter = FrameCounter::new(60);

        counter.tick(125_250);

        assert!(counter.new_second());
        assert!(counter.new_minute());
        assert_eq!(counter.minutes(), 2);
        assert_eq!(counter.seconds(), 5);
        assert_eq!(counter.milliseconds(), 250);
    }
}
