//! Board pin table and the hardware seam used by the initializer.
//!
//! [`pins`] holds the display wiring of the LILYGO TTGO T8 ESP32-S2
//! (display revision v1.1). [`Board`] is implemented once per HAL and
//! opens GPIOs and the SPI peripheral by [`PinId`], so the initializer can
//! be driven from a plain configuration record.

use embassy_embedded_hal::SetConfig;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::error::TftError;

/// A GPIO number on the target chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId(u8);

impl PinId {
    /// Wrap a raw GPIO number.
    pub const fn new(gpio: u8) -> Self {
        Self(gpio)
    }

    /// The raw GPIO number.
    pub const fn number(self) -> u8 {
        self.0
    }
}

/// Display pin assignments of the T8 ESP32-S2 board.
pub mod pins {
    use super::PinId;

    /// Backlight enable, active high.
    pub const LCD_BCKL: PinId = PinId::new(33);
    /// SPI chip select, active low.
    pub const LCD_CS: PinId = PinId::new(34);
    /// SPI data out (MOSI).
    pub const LCD_MOSI: PinId = PinId::new(35);
    /// SPI clock.
    pub const LCD_CLK: PinId = PinId::new(36);
    /// Data/command select.
    pub const LCD_D_C: PinId = PinId::new(37);
    /// Controller reset, active low.
    pub const LCD_RST: PinId = PinId::new(38);
}

/// Hardware access needed to bring up the display.
///
/// Implementations map HAL-specific errors to [`TftError::Pin`] and
/// [`TftError::Bus`]; the initializer never sees them.
///
/// Claim bookkeeping is not the board's job: the initializer records every
/// pin in a [`PinRegistry`](crate::PinRegistry) before asking the board to
/// open it.
pub trait Board {
    /// Push-pull output used for backlight, D/C, CS and reset.
    type Output: OutputPin;
    /// SPI bus driving the controller. Must accept clock reconfiguration.
    type Spi: SpiBus + SetConfig;
    /// Blocking delay source for the controller's reset and init sequence.
    type Delay: DelayNs;

    /// Open `pin` as a push-pull output.
    fn output(&mut self, pin: PinId) -> Result<Self::Output, TftError>;

    /// Open the SPI bus on `clock` and `data_out` (no data-in line).
    fn spi(&mut self, clock: PinId, data_out: PinId) -> Result<Self::Spi, TftError>;

    /// Bus configuration for a clock of `frequency_hz`.
    fn spi_config(&self, frequency_hz: u32) -> <Self::Spi as SetConfig>::Config;

    /// A delay source for driver initialisation.
    fn delay(&mut self) -> Self::Delay;
}
