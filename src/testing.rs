//! Host-side fakes for the board, pins, SPI bus and delay.
//!
//! Every fake shares an [`EventLog`] so tests can assert on the order in
//! which the initializer touches the hardware.

use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use embassy_embedded_hal::SetConfig;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, OutputPin};
use embedded_hal::spi::{self, SpiBus};

use crate::board::{Board, PinId};
use crate::error::TftError;

/// One observable hardware action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Pin driven to the given level.
    Pin(PinId, bool),
    /// Bus clock set to the given rate.
    BusConfigured(u32),
    /// Bytes written on the bus.
    BusWrite(usize),
}

pub type EventLog = Rc<RefCell<Vec<Event>>>;

/// Levels written to `pin`, in order.
pub fn backlight_levels(log: &EventLog, pin: PinId) -> Vec<bool> {
    log.borrow()
        .iter()
        .filter_map(|event| match event {
            Event::Pin(p, level) if *p == pin => Some(*level),
            _ => None,
        })
        .collect()
}

/// Index of the first event matching `pred`.
pub fn position(log: &EventLog, pred: impl Fn(&Event) -> bool) -> Option<usize> {
    log.borrow().iter().position(pred)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeError;

impl digital::Error for FakeError {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

impl spi::Error for FakeError {
    fn kind(&self) -> spi::ErrorKind {
        spi::ErrorKind::Other
    }
}

// ── Pin ──────────────────────────────────────────────────────────────────

pub struct FakePin {
    pub id: PinId,
    pub broken: bool,
    log: EventLog,
}

impl FakePin {
    pub fn new(id: PinId, log: EventLog) -> Self {
        Self {
            id,
            broken: false,
            log,
        }
    }

    fn drive(&mut self, level: bool) -> Result<(), FakeError> {
        if self.broken {
            return Err(FakeError);
        }
        self.log.borrow_mut().push(Event::Pin(self.id, level));
        Ok(())
    }
}

impl digital::ErrorType for FakePin {
    type Error = FakeError;
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true)
    }
}

// ── SPI bus ──────────────────────────────────────────────────────────────

pub struct FakeSpi {
    pub log: EventLog,
    pub frequency: u32,
    pub max_frequency: u32,
}

impl FakeSpi {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            frequency: 0,
            max_frequency: 80_000_000,
        }
    }
}

impl spi::ErrorType for FakeSpi {
    type Error = FakeError;
}

impl SpiBus for FakeSpi {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        words.fill(0);
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::BusWrite(words.len()));
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        read.fill(0);
        self.write(write)
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        self.write(words)?;
        words.fill(0);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl SetConfig for FakeSpi {
    type Config = u32;
    type ConfigError = ();

    fn set_config(&mut self, config: &u32) -> Result<(), ()> {
        if *config > self.max_frequency {
            return Err(());
        }
        self.frequency = *config;
        self.log.borrow_mut().push(Event::BusConfigured(*config));
        Ok(())
    }
}

// ── Delay ────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct FakeDelay {
    pub elapsed_ns: u64,
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += u64::from(ns);
    }
}

// ── Board ────────────────────────────────────────────────────────────────

/// Board whose pins and bus all report into one log.
#[derive(Default)]
pub struct FakeBoard {
    pub log: EventLog,
    /// Pin the HAL refuses to open.
    pub unavailable: Option<PinId>,
    /// Makes `spi()` fail.
    pub no_bus: bool,
    /// Highest clock the bus accepts; `None` for the fake's default.
    pub max_frequency: Option<u32>,
}

impl Board for FakeBoard {
    type Output = FakePin;
    type Spi = FakeSpi;
    type Delay = FakeDelay;

    fn output(&mut self, pin: PinId) -> Result<FakePin, TftError> {
        if self.unavailable == Some(pin) {
            return Err(TftError::Pin);
        }
        Ok(FakePin::new(pin, self.log.clone()))
    }

    fn spi(&mut self, clock: PinId, data_out: PinId) -> Result<FakeSpi, TftError> {
        if self.no_bus || self.unavailable == Some(clock) || self.unavailable == Some(data_out) {
            return Err(TftError::Bus);
        }
        let mut spi = FakeSpi::new(self.log.clone());
        if let Some(max) = self.max_frequency {
            spi.max_frequency = max;
        }
        Ok(spi)
    }

    fn spi_config(&self, frequency_hz: u32) -> u32 {
        frequency_hz
    }

    fn delay(&mut self) -> FakeDelay {
        FakeDelay::default()
    }
}
