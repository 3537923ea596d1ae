//! Green screen blink demo
//!
//! Standalone hardware demonstration for the LILYGO TTGO T8 ESP32-S2 with
//! the v1.1 display. Brings the panel up through [`DisplaySession`], paints
//! it green and then blinks the backlight once a second, verifying the pin
//! table, the SPI clock and the panel calibration on real hardware.
//!
//! # Wiring (on-board)
//!
//! | Signal    | ESP32-S2 Pin | Notes            |
//! |-----------|--------------|------------------|
//! | LCD_BCKL  | GPIO33       | active high      |
//! | LCD_CS    | GPIO34       |                  |
//! | LCD_MOSI  | GPIO35       | SPI2 data out    |
//! | LCD_CLK   | GPIO36       | SPI2 clock       |
//! | LCD_D_C   | GPIO37       |                  |
//! | LCD_RST   | GPIO38       |                  |

#![no_std]
#![no_main]

use defmt::*;
use esp_hal::delay::Delay;
use esp_hal::gpio::{AnyPin, Level, Output, OutputConfig};
use esp_hal::peripherals::SPI2;
use esp_hal::spi::master::{Config, Spi};
use esp_hal::time::Rate;
use esp_hal::Blocking;
use {esp_backtrace as _, esp_println as _};

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

use t8_tft_display_rs::{pins, Board, DisplayConfig, DisplaySession, PinId, TftError, DISPLAY_PINS};

esp_bootloader_esp_idf::esp_app_desc!();

// ---------------------------------------------------------------------------
// Board glue
// ---------------------------------------------------------------------------

/// The display pins and SPI2, handed out once each by GPIO number.
struct T8Board {
    pins: [(PinId, Option<AnyPin<'static>>); 6],
    spi: Option<SPI2<'static>>,
}

impl T8Board {
    fn take(&mut self, pin: PinId) -> Result<AnyPin<'static>, TftError> {
        self.pins
            .iter_mut()
            .find(|(id, _)| *id == pin)
            .and_then(|(_, slot)| slot.take())
            .ok_or(TftError::Pin)
    }
}

impl Board for T8Board {
    type Output = Output<'static>;
    type Spi = Spi<'static, Blocking>;
    type Delay = Delay;

    fn output(&mut self, pin: PinId) -> Result<Self::Output, TftError> {
        let pin = self.take(pin)?;
        Ok(Output::new(pin, Level::Low, OutputConfig::default()))
    }

    fn spi(&mut self, clock: PinId, data_out: PinId) -> Result<Self::Spi, TftError> {
        let sck = self.take(clock)?;
        let mosi = self.take(data_out)?;
        let spi = self.spi.take().ok_or(TftError::Bus)?;
        let bus = Spi::new(spi, Config::default()).map_err(|_| TftError::Bus)?;
        Ok(bus.with_sck(sck).with_mosi(mosi))
    }

    fn spi_config(&self, frequency_hz: u32) -> Config {
        Config::default().with_frequency(Rate::from_hz(frequency_hz))
    }

    fn delay(&mut self) -> Delay {
        Delay::new()
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[esp_hal::main]
fn main() -> ! {
    let p = esp_hal::init(esp_hal::Config::default());
    info!("T8 blink demo starting");

    let mut board = T8Board {
        pins: [
            (pins::LCD_BCKL, Some(p.GPIO33.into())),
            (pins::LCD_CS, Some(p.GPIO34.into())),
            (pins::LCD_MOSI, Some(p.GPIO35.into())),
            (pins::LCD_CLK, Some(p.GPIO36.into())),
            (pins::LCD_D_C, Some(p.GPIO37.into())),
            (pins::LCD_RST, Some(p.GPIO38.into())),
        ],
        spi: Some(p.SPI2),
    };

    let mut session = match DisplaySession::new(&mut board, &DISPLAY_PINS, DisplayConfig::default()) {
        Ok(session) => session,
        Err(e) => panic!("TFT init failed: {}", e),
    };
    info!("TFT {}x{} ready", session.width(), session.height());

    session.clear(Rgb565::GREEN).ok();

    let mut delay = Delay::new();
    loop {
        if let Err(e) = session.blink(&mut delay, 1000, 1) {
            warn!("backlight error: {}", e);
        }
    }
}
