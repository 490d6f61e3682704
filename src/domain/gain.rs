//! Channel and gain selection
//!
//! The HX711 has no registers. The input channel and PGA gain used for the
//! *next* conversion are selected by how many clock pulses the host issues
//! while reading the current one: 24 data pulses plus 1, 2 or 3 extra.

/// Number of data bits in one conversion result
pub const DATA_BITS: u8 = 24;

/// Input channel of the HX711
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Channel {
    /// Differential input A (gain 128 or 64)
    A,
    /// Differential input B (fixed gain 32)
    B,
}

/// Channel and gain configuration for a conversion
///
/// Each variant maps to the total number of clock pulses issued during a read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChannelGain {
    /// Channel A, gain 128 (25 pulses)
    #[default]
    ChannelA128,
    /// Channel A, gain 64 (27 pulses)
    ChannelA64,
    /// Channel B, gain 32 (26 pulses)
    ChannelB32,
}

impl ChannelGain {
    /// All supported configurations
    pub const ALL: [ChannelGain; 3] = [
        ChannelGain::ChannelA128,
        ChannelGain::ChannelA64,
        ChannelGain::ChannelB32,
    ];

    /// Total clock pulses for one read at this setting
    #[inline]
    pub const fn pulses(self) -> u8 {
        match self {
            ChannelGain::ChannelA128 => 25,
            ChannelGain::ChannelA64 => 27,
            ChannelGain::ChannelB32 => 26,
        }
    }

    /// Pulses beyond the 24 data bits
    #[inline]
    pub const fn select_pulses(self) -> u8 {
        self.pulses() - DATA_BITS
    }

    /// Input channel this setting reads from
    pub const fn channel(self) -> Channel {
        match self {
            ChannelGain::ChannelA128 | ChannelGain::ChannelA64 => Channel::A,
            ChannelGain::ChannelB32 => Channel::B,
        }
    }

    /// PGA gain factor
    pub const fn gain_factor(self) -> u8 {
        match self {
            ChannelGain::ChannelA128 => 128,
            ChannelGain::ChannelA64 => 64,
            ChannelGain::ChannelB32 => 32,
        }
    }

    /// Get the string representation of this setting
    pub const fn as_str(self) -> &'static str {
        match self {
            ChannelGain::ChannelA128 => "A/128",
            ChannelGain::ChannelA64 => "A/64",
            ChannelGain::ChannelB32 => "B/32",
        }
    }
}
