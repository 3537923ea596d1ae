//! Exclusive access to the display SPI bus while it is reconfigured.
//!
//! The bus lives in a blocking mutex around a `RefCell`, the same shape
//! `embassy-embedded-hal` uses for its shared blocking SPI devices. An
//! outstanding borrow means another code path owns the bus; access is
//! granted only through a closure, so the borrow is always released when
//! the closure returns.

use core::cell::RefCell;

use embassy_embedded_hal::SetConfig;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::error::TftError;

/// An SPI bus that must be locked before it is touched.
pub struct SpiBusLock<BUS> {
    bus: Mutex<NoopRawMutex, RefCell<BUS>>,
}

impl<BUS> SpiBusLock<BUS> {
    /// Wrap an opened bus.
    pub fn new(bus: BUS) -> Self {
        Self {
            bus: Mutex::new(RefCell::new(bus)),
        }
    }

    /// Run `f` with exclusive access to the bus if it is free right now.
    ///
    /// Returns `None` without calling `f` if the bus is held elsewhere.
    pub fn try_with_bus<R>(&self, f: impl FnOnce(&mut BUS) -> R) -> Option<R> {
        self.bus.lock(|bus| {
            let mut bus = bus.try_borrow_mut().ok()?;
            Some(f(&mut *bus))
        })
    }

    /// Run `f` with exclusive access to the bus, spinning until it is free.
    ///
    /// There is no timeout: if the bus is never released this call never
    /// returns.
    pub fn with_bus<R>(&self, f: impl FnOnce(&mut BUS) -> R) -> R {
        let mut f = Some(f);
        loop {
            let granted = self.bus.lock(|bus| {
                let mut bus = bus.try_borrow_mut().ok()?;
                f.take().map(|f| f(&mut *bus))
            });
            if let Some(result) = granted {
                return result;
            }
            core::hint::spin_loop();
        }
    }

    /// Give the bus back once configuration is done.
    pub fn into_inner(self) -> BUS {
        self.bus.into_inner().into_inner()
    }
}

impl<BUS: SetConfig> SpiBusLock<BUS> {
    /// Lock the bus, apply `config`, unlock.
    ///
    /// # Errors
    ///
    /// Returns [`TftError::BusConfig`] if the bus rejects `config`.
    pub fn configure(&self, config: &BUS::Config) -> Result<(), TftError> {
        self.with_bus(|bus| bus.set_config(config))
            .map_err(|_| TftError::BusConfig)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("SPI bus reconfigured");

        Ok(())
    }
}
