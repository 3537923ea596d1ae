//! Blocking ST7789 TFT initializer for the LILYGO TTGO T8 ESP32-S2 board.
//!
//! This crate provides [`DisplaySession`], a one-call bring-up of the
//! board's 240×135 ST7789 panel on top of the [`mipidsi`] driver, and
//! [`Backlight`], the on/off handle for the panel's illumination. The
//! driver and [`embedded_graphics`] do all of the drawing; this crate only
//! claims the pins, clocks the SPI bus and builds the driver with the
//! board's panel calibration.
//!
//! # Quick Start
//!
//! ```ignore
//! use t8_tft_display_rs::{DisplayConfig, DisplaySession, DISPLAY_PINS};
//!
//! // `board` implements `t8_tft_display_rs::Board` for your HAL.
//! let mut session = DisplaySession::new(&mut board, &DISPLAY_PINS, DisplayConfig::default())?;
//! session.clear(Rgb565::GREEN)?;
//!
//! loop {
//!     session.blink(&mut delay, 1000, 1)?;
//! }
//! ```
//!
//! # Crate Features
//!
//! - **`defmt`** — structured logging via [`defmt`], plus [`defmt::Format`]
//!   on the error and pin types.

#![cfg_attr(not(test), no_std)]

pub mod backlight;
pub mod board;
pub mod bus;
pub mod config;
pub mod error;
pub mod registry;
pub mod session;

#[cfg(test)]
mod testing;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use backlight::Backlight;
pub use board::{pins, Board, PinId};
pub use bus::SpiBusLock;
pub use config::DisplayConfig;
pub use error::TftError;
pub use registry::{release_displays, Owner, PinRegistry, DISPLAY_PINS};
pub use session::{DisplaySession, TftDisplay, TftInterface};
