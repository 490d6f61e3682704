//! Domain layer - pure conversion logic independent of hardware
//!
//! This module contains the channel/gain model and the conversion from
//! raw ADC words to signed, tared counts.

pub mod gain;
pub mod sample;

pub use gain::{Channel, ChannelGain, DATA_BITS};
pub use sample::{sign_extend_24, LoadCellReading, Tare, MAX_VALUE, MIN_VALUE};
