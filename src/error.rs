//! Driver error type

use core::fmt;

/// Errors returned by the HX711 driver
///
/// `E` is the error type of the HAL's GPIO pins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Reading or driving a pin failed
    Pin(E),
    /// The data line stayed high longer than the bounded wait allowed
    Timeout,
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Pin(e) => write!(f, "pin error: {e:?}"),
            Error::Timeout => f.write_str("timed out waiting for conversion"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug> std::error::Error for Error<E> {}
