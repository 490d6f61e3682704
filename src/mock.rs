// Mock pins and delay for testing without hardware

use core::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, ErrorKind, ErrorType, InputPin, OutputPin, StatefulOutputPin};

use crate::domain::{ChannelGain, DATA_BITS};

/// Something observable that happened on the mock bus
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    ClockHigh,
    ClockLow,
    DataRead(bool),
    DelayNs(u32),
}

/// Injected pin failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MockPinError;

impl digital::Error for MockPinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

#[derive(Default)]
struct State {
    events: Vec<Event>,
    clock_high: bool,
    /// Levels the data line will report, consumed one per read
    levels: VecDeque<bool>,
    /// Level reported once `levels` runs dry
    idle_level: bool,
    /// Number of data reads that succeed before reads start failing
    data_reads_before_failure: Option<usize>,
}

/// Shared state behind the mock clock pin, data pin and delay
#[derive(Clone, Default)]
pub struct MockBus {
    state: Rc<RefCell<State>>,
}

impl MockBus {
    /// Create a new bus with the data line idling low
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the three peripherals, all recording into this bus
    pub fn parts(&self) -> (MockClock, MockData, MockDelay) {
        (
            MockClock { bus: self.clone() },
            MockData { bus: self.clone() },
            MockDelay { bus: self.clone() },
        )
    }

    /// Queue raw data-line levels
    pub fn push_levels(&self, levels: &[bool]) {
        self.state.borrow_mut().levels.extend(levels.iter().copied());
    }

    /// Queue `polls` busy (high) readings of the data line
    pub fn push_busy(&self, polls: usize) {
        let mut state = self.state.borrow_mut();
        state.levels.extend(core::iter::repeat(true).take(polls));
    }

    /// Queue one complete conversion as seen by a reader at `gain`
    ///
    /// `busy_polls` high readings, one ready (low) reading, the 24 bits of
    /// `word` MSB first, then low levels for the gain-select pulses.
    pub fn push_conversion(&self, busy_polls: usize, word: u32, gain: ChannelGain) {
        self.push_busy(busy_polls);
        let mut state = self.state.borrow_mut();
        state.levels.push_back(false);
        for bit in (0..DATA_BITS).rev() {
            state.levels.push_back(word & (1 << bit) != 0);
        }
        state
            .levels
            .extend(core::iter::repeat(false).take(gain.select_pulses() as usize));
    }

    /// Level the data line reports when nothing is queued
    pub fn set_idle_level(&self, high: bool) {
        self.state.borrow_mut().idle_level = high;
    }

    /// Make every data read after the next `n` fail
    pub fn fail_data_reads_after(&self, n: usize) {
        self.state.borrow_mut().data_reads_before_failure = Some(n);
    }

    /// Everything recorded so far
    pub fn events(&self) -> Vec<Event> {
        self.state.borrow().events.clone()
    }

    /// Forget recorded events (queued levels are kept)
    pub fn clear_events(&self) {
        self.state.borrow_mut().events.clear();
    }

    /// Number of rising edges on the clock line
    pub fn rising_edges(&self) -> usize {
        self.count(|e| matches!(e, Event::ClockHigh))
    }

    /// Number of times the data line was sampled
    pub fn data_reads(&self) -> usize {
        self.count(|e| matches!(e, Event::DataRead(_)))
    }

    /// Sum of all requested delays
    pub fn total_delay_ns(&self) -> u64 {
        self.state
            .borrow()
            .events
            .iter()
            .map(|e| match e {
                Event::DelayNs(ns) => u64::from(*ns),
                _ => 0,
            })
            .sum()
    }

    /// Queued levels not yet consumed
    pub fn pending_levels(&self) -> usize {
        self.state.borrow().levels.len()
    }

    /// Current clock level
    pub fn clock_is_high(&self) -> bool {
        self.state.borrow().clock_high
    }

    fn count(&self, pred: impl Fn(&Event) -> bool) -> usize {
        self.state.borrow().events.iter().filter(|e| pred(*e)).count()
    }

    fn record(&self, event: Event) {
        self.state.borrow_mut().events.push(event);
    }
}

/// Mock PD_SCK output
pub struct MockClock {
    bus: MockBus,
}

impl ErrorType for MockClock {
    type Error = MockPinError;
}

impl OutputPin for MockClock {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.bus.state.borrow_mut().clock_high = false;
        self.bus.record(Event::ClockLow);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.bus.state.borrow_mut().clock_high = true;
        self.bus.record(Event::ClockHigh);
        Ok(())
    }
}

impl StatefulOutputPin for MockClock {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.bus.clock_is_high())
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.bus.clock_is_high())
    }
}

/// Mock DOUT input
pub struct MockData {
    bus: MockBus,
}

impl ErrorType for MockData {
    type Error = MockPinError;
}

impl InputPin for MockData {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let level = {
            let mut state = self.bus.state.borrow_mut();
            if let Some(remaining) = state.data_reads_before_failure.as_mut() {
                if *remaining == 0 {
                    return Err(MockPinError);
                }
                *remaining -= 1;
            }
            let idle = state.idle_level;
            state.levels.pop_front().unwrap_or(idle)
        };
        self.bus.record(Event::DataRead(level));
        Ok(level)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

/// Mock delay that records instead of waiting
pub struct MockDelay {
    bus: MockBus,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.bus.record(Event::DelayNs(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.bus.record(Event::DelayNs(us.saturating_mul(1_000)));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.bus.record(Event::DelayNs(ms.saturating_mul(1_000_000)));
    }
}
