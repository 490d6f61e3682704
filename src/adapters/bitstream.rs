//! Bit-banged serial transfer from the HX711
//!
//! The chip presents the next bit on DOUT after each rising edge of PD_SCK,
//! MSB first. Holding PD_SCK high for more than 60us powers the chip down,
//! so the whole transfer runs inside a critical section.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, StatefulOutputPin};

/// Clock half-period in microseconds
///
/// The datasheet allows 0.2us to 50us for each clock phase.
pub const HALF_PERIOD_US: u32 = 1;

/// Widest transfer the accumulator can hold
pub const MAX_BITS: u8 = 32;

/// Clock `size` bits out of the device, MSB first
///
/// Runs `size + 1` iterations. The first one only burns the same time as a
/// real pulse (no rising edge, no sample) so its extra loop overhead never
/// lands inside a sampled period. Returns the bits right-justified; bit 0 is
/// the last bit sampled.
///
/// Interrupts stay masked from before the first iteration until after the
/// last, and are restored on every exit path, including a pin error.
///
/// # Panics
///
/// In debug builds, if `size` is outside `1..=32` or the clock is not low.
pub fn read_bits<CLK, DATA, D, E>(
    clock: &mut CLK,
    data: &mut DATA,
    delay: &mut D,
    size: u8,
) -> Result<u32, E>
where
    CLK: StatefulOutputPin<Error = E>,
    DATA: InputPin<Error = E>,
    D: DelayNs,
{
    debug_assert!(size > 0, "transfer size must be positive");
    debug_assert!(size <= MAX_BITS, "transfer size exceeds 32 bits");
    #[cfg(debug_assertions)]
    {
        let clock_low = clock.is_set_low()?;
        debug_assert!(clock_low, "clock must be low before a transfer");
    }

    critical_section::with(|_cs| {
        let mut value = 0u32;
        for pulse in 0..=size {
            let sampling = pulse > 0;
            if sampling {
                clock.set_high()?;
            }
            delay.delay_us(HALF_PERIOD_US);
            if sampling {
                value = (value << 1) | u32::from(data.is_high()?);
            }
            clock.set_low()?;
            delay.delay_us(HALF_PERIOD_US);
        }
        Ok(value)
    })
}
