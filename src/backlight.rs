//! Backlight on/off control.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::error::TftError;

/// Digital backlight control for the panel.
///
/// Tracks the last level written so callers can read the state back
/// without touching the pin. Construction drives the pin low, so the panel
/// stays dark until the controller holds a valid frame.
pub struct Backlight<P> {
    pin: P,
    value: bool,
}

impl<P> Backlight<P>
where
    P: OutputPin,
{
    /// Take ownership of `pin` and switch the backlight off.
    ///
    /// # Errors
    ///
    /// Returns [`TftError::Pin`] if the pin cannot be driven.
    pub fn new(mut pin: P) -> Result<Self, TftError> {
        pin.set_low().map_err(|_| TftError::Pin)?;
        Ok(Self { pin, value: false })
    }

    /// Current state: `true` when lit.
    pub fn value(&self) -> bool {
        self.value
    }

    /// Alias of [`value`](Self::value).
    pub fn is_on(&self) -> bool {
        self.value
    }

    /// Switch the backlight on (`true`) or off (`false`).
    ///
    /// The tracked state only changes if the pin write succeeds.
    pub fn set(&mut self, on: bool) -> Result<(), TftError> {
        if on {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        }
        .map_err(|_| TftError::Pin)?;
        self.value = on;
        Ok(())
    }

    pub fn on(&mut self) -> Result<(), TftError> {
        self.set(true)
    }

    pub fn off(&mut self) -> Result<(), TftError> {
        self.set(false)
    }

    /// Invert the current state.
    pub fn toggle(&mut self) -> Result<(), TftError> {
        self.set(!self.value)
    }

    /// Blink `times` times: off for `period_ms`, then on for `period_ms`.
    ///
    /// Leaves the backlight on.
    pub fn blink<D: DelayNs>(
        &mut self,
        delay: &mut D,
        period_ms: u32,
        times: u32,
    ) -> Result<(), TftError> {
        for _ in 0..times {
            self.off()?;
            delay.delay_ms(period_ms);
            self.on()?;
            delay.delay_ms(period_ms);
        }
        Ok(())
    }

    /// Give the pin back.
    pub fn release(self) -> P {
        self.pin
    }
}
