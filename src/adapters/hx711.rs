//! HX711 load cell amplifier adapter
//!
//! This adapter drives the HX711 over two GPIOs and implements the
//! LoadCellPort trait on top of the bit-banged transfer.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, StatefulOutputPin};

use super::bitstream;
use crate::domain::{sign_extend_24, ChannelGain, LoadCellReading, Tare};
use crate::error::Error;
use crate::ports::load_cell::{LoadCellConfig, LoadCellError, LoadCellPort};

/// How long PD_SCK is held high for the power-on reset (microseconds)
///
/// The chip powers down after 60us of clock high; 1ms guarantees it.
pub const RESET_HOLD_US: u32 = 1_000;

/// HX711 driver
///
/// Owns the clock (PD_SCK) and data (DOUT) pins plus a delay provider.
/// The data line stays high while a conversion is in progress and drops
/// low once a result can be clocked out; each read starts the next
/// conversion.
pub struct Hx711<CLK, DATA, D> {
    clock: CLK,
    data: DATA,
    delay: D,
    tare: Tare,
    config: LoadCellConfig,
    /// Last raw word clocked out (for diagnostics)
    last_raw: Option<u32>,
}

impl<CLK, DATA, D, E> Hx711<CLK, DATA, D>
where
    CLK: StatefulOutputPin<Error = E>,
    DATA: InputPin<Error = E>,
    D: DelayNs,
{
    /// Create a new driver and power-cycle the chip
    ///
    /// # Arguments
    ///
    /// * `clock` - PD_SCK, configured as push-pull output
    /// * `data` - DOUT, configured as input
    /// * `delay` - microsecond-capable delay
    pub fn new(clock: CLK, data: DATA, delay: D) -> Result<Self, Error<E>> {
        Self::with_config(clock, data, delay, LoadCellConfig::default())
    }

    /// Create with custom acquisition config
    pub fn with_config(
        clock: CLK,
        data: DATA,
        delay: D,
        config: LoadCellConfig,
    ) -> Result<Self, Error<E>> {
        let mut hx711 = Self {
            clock,
            data,
            delay,
            tare: Tare::ZERO,
            config,
            last_raw: None,
        };
        hx711.initialize()?;
        Ok(hx711)
    }

    /// Hold the chip in power-down long enough to reset it, then wake it
    fn initialize(&mut self) -> Result<(), Error<E>> {
        self.power_down(true)?;
        self.delay.delay_us(RESET_HOLD_US);
        self.power_down(false)?;
        debug!("hx711: power-on reset complete");
        Ok(())
    }

    /// Power the chip down (`true`) or wake it (`false`)
    ///
    /// After waking, the chip resets to channel A, gain 128.
    pub fn power_down(&mut self, down: bool) -> Result<(), Error<E>> {
        let result = if down {
            self.clock.set_high()
        } else {
            self.clock.set_low()
        };
        result.map_err(Error::Pin)
    }

    /// Whether a conversion is still in progress (DOUT high)
    pub fn is_busy(&mut self) -> Result<bool, Error<E>> {
        self.data.is_high().map_err(Error::Pin)
    }

    /// Spin until a conversion is available
    ///
    /// Never returns if the chip stays busy.
    pub fn wait_ready(&mut self) -> Result<(), Error<E>> {
        while self.is_busy()? {
            core::hint::spin_loop();
        }
        Ok(())
    }

    /// Poll every `poll_us` until a conversion is available, giving up
    /// after `timeout_us`
    pub fn wait_ready_timeout(&mut self, timeout_us: u32, poll_us: u32) -> Result<(), Error<E>> {
        let poll_us = poll_us.max(1);
        let mut waited_us = 0u32;
        while self.is_busy()? {
            if waited_us >= timeout_us {
                warn!("hx711: no conversion after {=u32} us", waited_us);
                return Err(Error::Timeout);
            }
            self.delay.delay_us(poll_us);
            waited_us = waited_us.saturating_add(poll_us);
        }
        Ok(())
    }

    /// Read the raw 24-bit word at `gain`, waiting as long as needed
    ///
    /// The gain-select pulses only take effect for the *next* conversion.
    pub fn read_channel_raw(&mut self, gain: ChannelGain) -> Result<u32, Error<E>> {
        self.wait_ready()?;
        self.transfer(gain)
    }

    /// Like [`read_channel_raw`](Self::read_channel_raw) with a bounded wait
    ///
    /// Polls at the configured `ready_poll_us` spacing.
    pub fn read_channel_raw_timeout(
        &mut self,
        gain: ChannelGain,
        timeout_us: u32,
    ) -> Result<u32, Error<E>> {
        let poll_us = self.config.ready_poll_us;
        self.wait_ready_timeout(timeout_us, poll_us)?;
        self.transfer(gain)
    }

    /// Clock out one conversion and keep the 24 data bits
    fn transfer(&mut self, gain: ChannelGain) -> Result<u32, Error<E>> {
        self.clock.set_low().map_err(Error::Pin)?;
        let bits = bitstream::read_bits(
            &mut self.clock,
            &mut self.data,
            &mut self.delay,
            gain.pulses(),
        )
        .map_err(Error::Pin)?;

        let raw = bits >> gain.select_pulses();
        self.last_raw = Some(raw);
        trace!("hx711: raw {=u32:x} at {}", raw, gain.as_str());
        Ok(raw)
    }

    /// Read a signed, tared count at `gain`
    ///
    /// This is the conversion started by the *previous* read; use
    /// [`read_channel_blocking`](Self::read_channel_blocking) after
    /// switching gains.
    pub fn read_channel(&mut self, gain: ChannelGain) -> Result<i32, Error<E>> {
        let raw = self.read_channel_raw(gain)?;
        Ok(self.tare.apply(gain, sign_extend_24(raw)))
    }

    /// Read a signed, tared count converted at `gain`
    ///
    /// Performs two transfers: the first selects `gain` and is discarded,
    /// the second returns a conversion taken at that gain.
    pub fn read_channel_blocking(&mut self, gain: ChannelGain) -> Result<i32, Error<E>> {
        self.read_channel(gain)?;
        self.read_channel(gain)
    }

    /// Same as [`read_channel_blocking`](Self::read_channel_blocking)
    ///
    /// Pass `ChannelGain::default()` for channel A, gain 128.
    pub fn read(&mut self, gain: ChannelGain) -> Result<i32, Error<E>> {
        self.read_channel_blocking(gain)
    }
}

impl<CLK, DATA, D> Hx711<CLK, DATA, D> {
    /// Channel A tare offset
    pub fn tare_a(&self) -> i32 {
        self.tare.a
    }

    /// Set the channel A tare offset (applies to both A gains)
    pub fn set_tare_a(&mut self, tare: i32) {
        debug!("hx711: tare A = {=i32}", tare);
        self.tare.a = tare;
    }

    /// Channel B tare offset
    pub fn tare_b(&self) -> i32 {
        self.tare.b
    }

    /// Set the channel B tare offset
    pub fn set_tare_b(&mut self, tare: i32) {
        debug!("hx711: tare B = {=i32}", tare);
        self.tare.b = tare;
    }

    /// Both tare offsets
    pub fn tare(&self) -> Tare {
        self.tare
    }

    /// Replace both tare offsets
    pub fn set_tare(&mut self, tare: Tare) {
        self.set_tare_a(tare.a);
        self.set_tare_b(tare.b);
    }

    /// Get current acquisition config
    pub fn config(&self) -> LoadCellConfig {
        self.config
    }

    /// Update acquisition config
    pub fn set_config(&mut self, config: LoadCellConfig) {
        self.config = config;
    }

    /// Last raw word clocked out, if any
    pub fn last_raw(&self) -> Option<u32> {
        self.last_raw
    }

    /// Release the pins and delay
    pub fn release(self) -> (CLK, DATA, D) {
        (self.clock, self.data, self.delay)
    }
}

impl<E> From<Error<E>> for LoadCellError {
    fn from(err: Error<E>) -> Self {
        match err {
            Error::Pin(_) => LoadCellError::ReadFailed,
            Error::Timeout => LoadCellError::Timeout,
        }
    }
}

impl<CLK, DATA, D, E> LoadCellPort for Hx711<CLK, DATA, D>
where
    CLK: StatefulOutputPin<Error = E>,
    DATA: InputPin<Error = E>,
    D: DelayNs,
{
    fn read(&mut self) -> Result<LoadCellReading, LoadCellError> {
        let gain = self.config.gain;

        // First transfer selects the gain, second returns a conversion at it
        let raw = match self.config.ready_timeout_us {
            Some(timeout_us) => {
                self.read_channel_raw_timeout(gain, timeout_us)?;
                self.read_channel_raw_timeout(gain, timeout_us)?
            }
            None => {
                self.read_channel_raw(gain)?;
                self.read_channel_raw(gain)?
            }
        };

        let reading = LoadCellReading::from_raw(raw, gain, &self.tare);
        if reading.is_saturated() {
            warn!("hx711: input saturated on {}", gain.as_str());
        }
        Ok(reading)
    }

    fn is_ready(&mut self) -> Result<bool, LoadCellError> {
        let busy = self.is_busy()?;
        Ok(!busy)
    }

    fn tare(&self) -> Tare {
        self.tare
    }

    fn set_tare(&mut self, tare: Tare) {
        Hx711::set_tare(self, tare);
    }

    fn last_raw_value(&self) -> Option<u32> {
        self.last_raw
    }
}
