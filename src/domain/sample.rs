//! Sample conversion domain service
//!
//! Turns the right-justified 24-bit words clocked out of the HX711 into
//! signed counts and applies per-channel tare offsets.

use super::gain::{Channel, ChannelGain};

/// Mask of the 24 significant bits in a raw sample
pub const RAW_MASK: u32 = 0x00FF_FFFF;

/// Sign bit of a 24-bit two's-complement sample
pub const SIGN_BIT: u32 = 0x0080_0000;

/// Largest positive count the ADC reports
pub const MAX_VALUE: i32 = (1 << 23) - 1;

/// Most negative count the ADC reports
pub const MIN_VALUE: i32 = -(1 << 23);

/// Reinterpret a 24-bit two's-complement word as `i32`
///
/// Bits above bit 23 are ignored.
#[inline]
pub const fn sign_extend_24(raw: u32) -> i32 {
    let raw = raw & RAW_MASK;
    if raw & SIGN_BIT != 0 {
        (raw | !RAW_MASK) as i32
    } else {
        raw as i32
    }
}

/// Tare offsets, one per input channel
///
/// The channel A offset is shared by both channel A gains.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tare {
    /// Offset subtracted from channel A readings
    pub a: i32,
    /// Offset subtracted from channel B readings
    pub b: i32,
}

impl Tare {
    /// No offset on either channel
    pub const ZERO: Self = Self { a: 0, b: 0 };

    /// Create tare offsets for both channels
    pub const fn new(a: i32, b: i32) -> Self {
        Self { a, b }
    }

    /// Offset that applies to readings taken at `gain`
    #[inline]
    pub const fn offset_for(&self, gain: ChannelGain) -> i32 {
        match gain.channel() {
            Channel::A => self.a,
            Channel::B => self.b,
        }
    }

    /// Subtract the matching offset from a signed count
    ///
    /// Uses 32-bit two's-complement arithmetic, so extreme offsets wrap.
    #[inline]
    pub const fn apply(&self, gain: ChannelGain, value: i32) -> i32 {
        value.wrapping_sub(self.offset_for(gain))
    }
}

/// A single conversion result
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LoadCellReading {
    /// Right-justified 24-bit word as clocked out
    pub raw: u32,
    /// Sign-extended count with tare subtracted
    pub value: i32,
    /// Channel and gain the conversion was taken at
    pub gain: ChannelGain,
}

impl LoadCellReading {
    /// Build a reading from a raw word, applying sign extension and tare
    pub const fn from_raw(raw: u32, gain: ChannelGain, tare: &Tare) -> Self {
        Self {
            raw,
            value: tare.apply(gain, sign_extend_24(raw)),
            gain,
        }
    }

    /// Whether the ADC reported an out-of-range input
    ///
    /// The HX711 clamps to `0x7FFFFF` / `0x800000` when saturated.
    pub const fn is_saturated(&self) -> bool {
        let raw = self.raw & RAW_MASK;
        raw == MAX_VALUE as u32 || raw == SIGN_BIT
    }
}
