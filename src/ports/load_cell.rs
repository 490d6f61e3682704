//! Load cell port - abstraction for reading load cell amplifiers
//!
//! This trait lets the application take weight samples without knowing
//! which amplifier or bus sits underneath (bit-banged HX711, mock, ...).

use crate::domain::{ChannelGain, LoadCellReading, Tare};

/// Error type for load cell operations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadCellError {
    /// Failed to read from the amplifier
    ReadFailed,
    /// Timeout waiting for a conversion
    Timeout,
    /// Hardware error (e.g. power control pin)
    HardwareError,
}

/// Configuration for load cell acquisition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadCellConfig {
    /// Channel and gain used by [`LoadCellPort::read`]
    pub gain: ChannelGain,
    /// Upper bound on the wait for a conversion (microseconds)
    ///
    /// `None` waits for as long as the device stays busy.
    pub ready_timeout_us: Option<u32>,
    /// Spacing between ready polls during a bounded wait (microseconds)
    pub ready_poll_us: u32,
}

impl Default for LoadCellConfig {
    fn default() -> Self {
        Self {
            gain: ChannelGain::ChannelA128,
            ready_timeout_us: None,
            ready_poll_us: 10,
        }
    }
}

impl LoadCellConfig {
    /// Create config that gives up after 100ms without a conversion
    ///
    /// At the 10 SPS rate a conversion takes ~100ms, at 80 SPS ~12.5ms.
    pub const fn bounded() -> Self {
        Self {
            gain: ChannelGain::ChannelA128,
            ready_timeout_us: Some(100_000),
            ready_poll_us: 10,
        }
    }

    /// Same config with a different channel and gain
    pub const fn with_gain(self, gain: ChannelGain) -> Self {
        Self { gain, ..self }
    }
}

/// Port for reading load cell data
///
/// # Example Implementation
///
/// ```ignore
/// struct FixedCell(i32);
///
/// impl LoadCellPort for FixedCell {
///     fn read(&mut self) -> Result<LoadCellReading, LoadCellError> {
///         Ok(LoadCellReading::from_raw(self.0 as u32, ChannelGain::ChannelA128, &Tare::ZERO))
///     }
///     fn is_ready(&mut self) -> Result<bool, LoadCellError> { Ok(true) }
///     fn tare(&self) -> Tare { Tare::ZERO }
///     fn set_tare(&mut self, _tare: Tare) {}
/// }
/// ```
pub trait LoadCellPort {
    /// Take one settled reading at the configured channel and gain
    fn read(&mut self) -> Result<LoadCellReading, LoadCellError>;

    /// Whether a conversion is available right now
    fn is_ready(&mut self) -> Result<bool, LoadCellError>;

    /// Current tare offsets
    fn tare(&self) -> Tare;

    /// Replace the tare offsets
    fn set_tare(&mut self, tare: Tare);

    /// Get the last raw word read (for diagnostics)
    ///
    /// Returns `None` if nothing has been read yet.
    fn last_raw_value(&self) -> Option<u32> {
        None
    }
}
