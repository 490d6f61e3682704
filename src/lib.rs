//! HX711 Load Cell Driver
//!
//! This library drives the HX711 24-bit load cell ADC by bit-banging its
//! two-wire interface through `embedded-hal` 1.0 traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Domain Layer                                 │
//! │  - ChannelGain: channel/gain as clock-pulse count               │
//! │  - Tare, sign extension, LoadCellReading                        │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Ports (Traits)                               │
//! │  - LoadCellPort: take settled, tared samples                    │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Adapters                                     │
//! │  - Hx711: power control, gain selection, tare                   │
//! │  - read_bits: interrupt-free bit-banged transfer                │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let mut scale = Hx711::new(sck, dout, delay)?;
//! scale.set_tare_a(scale.read(ChannelGain::ChannelA128)?);
//! let counts = scale.read(ChannelGain::ChannelA128)?;
//! ```
//!
//! The transfer masks interrupts through `critical-section`; the final
//! binary must link a `critical-section` implementation for its target.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[macro_use]
mod fmt;

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;

#[cfg(test)]
mod mock;

// Re-export key domain types
pub use domain::{sign_extend_24, Channel, ChannelGain, LoadCellReading, Tare};

// Re-export port trait
pub use ports::{LoadCellConfig, LoadCellError, LoadCellPort};

// Re-export adapters
pub use adapters::{read_bits, Hx711};

pub use error::Error;
