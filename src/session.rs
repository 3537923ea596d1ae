//! The display initializer and the session it produces.
//!
//! [`DisplaySession::new`] performs the whole bring-up: it clears stale
//! display claims, claims and darkens the backlight, locks the SPI bus to
//! set its clock, builds the four-wire interface, constructs the ST7789
//! driver with the configured calibration and finally lights the panel.

use display_interface_spi::SPIInterface;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_hal::delay::DelayNs;
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use mipidsi::models::ST7789;
use mipidsi::options::Orientation;
use mipidsi::{Builder, Display};

use crate::backlight::Backlight;
use crate::board::Board;
use crate::bus::SpiBusLock;
use crate::config::DisplayConfig;
use crate::error::TftError;
use crate::registry::{Owner, PinRegistry};

/// Four-wire bus for a given board: SPI with chip select, plus D/C.
pub type TftInterface<B> = SPIInterface<
    ExclusiveDevice<<B as Board>::Spi, <B as Board>::Output, NoDelay>,
    <B as Board>::Output,
>;

/// Concrete driver type produced for a given board.
pub type TftDisplay<B> = Display<TftInterface<B>, ST7789, <B as Board>::Output>;

/// A lit, initialised panel and its backlight.
///
/// # Lifecycle
///
/// 1. [`DisplaySession::new()`] brings the panel up; the backlight is on
///    when it returns.
/// 2. Draw through [`display_mut()`](Self::display_mut) with any
///    `embedded-graphics` drawable.
/// 3. Toggle the backlight through [`backlight_mut()`](Self::backlight_mut).
///
/// There is no teardown. A later `new()` releases this session's pin
/// claims before claiming them again.
pub struct DisplaySession<B: Board> {
    backlight: Backlight<B::Output>,
    display: TftDisplay<B>,
    config: DisplayConfig,
}

impl<B: Board> DisplaySession<B> {
    /// Bring up the panel described by `config` on `board`.
    ///
    /// # Errors
    ///
    /// * [`TftError::InvalidGeometry`] if the panel does not fit the
    ///   controller frame memory (checked before any pin is touched).
    /// * [`TftError::PinInUse`] / [`TftError::InvalidPin`] if a pin cannot
    ///   be claimed in `registry`.
    /// * [`TftError::Pin`] / [`TftError::Bus`] if the board cannot open a
    ///   pin or the bus.
    /// * [`TftError::BusConfig`] if the bus rejects the clock rate.
    /// * [`TftError::InitializationFailed`] if the driver fails.
    ///
    /// Claims taken before a failure stay registered as display claims and
    /// are dropped by the next call.
    pub fn new(
        board: &mut B,
        registry: &PinRegistry,
        config: DisplayConfig,
    ) -> Result<Self, TftError> {
        registry.release_displays();
        config.validate()?;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "TFT init: {}x{} at {} Hz",
            config.panel_width,
            config.panel_height,
            config.spi_clock_rate
        );

        // Dark until the controller holds a valid frame.
        registry.claim(config.backlight_pin, Owner::Display)?;
        let mut backlight = Backlight::new(board.output(config.backlight_pin)?)?;

        registry.claim(config.clock_pin, Owner::Display)?;
        registry.claim(config.data_out_pin, Owner::Display)?;
        let bus = SpiBusLock::new(board.spi(config.clock_pin, config.data_out_pin)?);
        bus.configure(&board.spi_config(config.spi_clock_rate))?;
        let bus = bus.into_inner();

        registry.claim(config.data_command_pin, Owner::Display)?;
        registry.claim(config.chip_select_pin, Owner::Display)?;
        registry.claim(config.reset_pin, Owner::Display)?;
        let dc = board.output(config.data_command_pin)?;
        let cs = board.output(config.chip_select_pin)?;
        let rst = board.output(config.reset_pin)?;

        let device = ExclusiveDevice::new_no_delay(bus, cs).map_err(|_| TftError::Pin)?;
        let interface = SPIInterface::new(device, dc);

        let (width, height) = config.native_size();
        let (offset_x, offset_y) = config.native_offset();
        let mut delay = board.delay();
        let display = Builder::new(ST7789, interface)
            .display_size(width, height)
            .display_offset(offset_x, offset_y)
            .orientation(Orientation::new().rotate(config.rotation))
            .invert_colors(config.color_inversion())
            .reset_pin(rst)
            .init(&mut delay)
            .map_err(|_| TftError::InitializationFailed)?;

        backlight.on()?;

        #[cfg(feature = "defmt")]
        defmt::info!("TFT ready");

        Ok(Self {
            backlight,
            display,
            config,
        })
    }

    /// Visible width in pixels, as reported by the driver.
    pub fn width(&self) -> u32 {
        self.display.size().width
    }

    /// Visible height in pixels, as reported by the driver.
    pub fn height(&self) -> u32 {
        self.display.size().height
    }

    /// The configuration this session was built from.
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    pub fn backlight(&self) -> &Backlight<B::Output> {
        &self.backlight
    }

    pub fn backlight_mut(&mut self) -> &mut Backlight<B::Output> {
        &mut self.backlight
    }

    pub fn display(&self) -> &TftDisplay<B> {
        &self.display
    }

    /// The driver as an `embedded-graphics` [`DrawTarget`].
    pub fn display_mut(&mut self) -> &mut TftDisplay<B> {
        &mut self.display
    }

    /// Fill the whole panel with `color`.
    pub fn clear(&mut self, color: Rgb565) -> Result<(), TftError> {
        self.display.clear(color)?;
        Ok(())
    }

    /// Blink the backlight; see [`Backlight::blink`].
    pub fn blink<D: DelayNs>(
        &mut self,
        delay: &mut D,
        period_ms: u32,
        times: u32,
    ) -> Result<(), TftError> {
        self.backlight.blink(delay, period_ms, times)
    }

    /// Split into backlight and driver.
    pub fn into_parts(self) -> (Backlight<B::Output>, TftDisplay<B>) {
        (self.backlight, self.display)
    }
}
