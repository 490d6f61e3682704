//! Adapters - concrete implementations of ports
//!
//! Adapters connect the domain to the hardware by implementing the port
//! traits on top of `embedded-hal` pins and delays.
//!
//! # Available Adapters
//!
//! - **hx711**: HX711 load cell amplifier over two GPIOs
//! - **bitstream**: the bit-banged transfer the HX711 adapter is built on

pub mod bitstream;
pub mod hx711;

pub use self::hx711::{Hx711, RESET_HOLD_US};
pub use bitstream::read_bits;
