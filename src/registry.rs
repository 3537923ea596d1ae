//! Process-wide pin claim registry.
//!
//! Every pin the initializer opens is first claimed here. A claim is owned
//! either by a display session or by some other consumer. Starting a new
//! session calls [`PinRegistry::release_displays`], which drops every
//! display-owned claim in one step, so a failed or abandoned bring-up never
//! blocks the next one. Claims owned by anybody else survive, which is how
//! "the backlight pin is already in use" is detected.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::board::PinId;
use crate::error::TftError;

/// Highest GPIO number the registry can track (bitmask width).
pub const MAX_PIN: u8 = 63;

/// Who holds a pin claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Owner {
    /// Claimed by a display session; cleared by `release_displays`.
    Display,
    /// Claimed by application code; only cleared by `release`.
    User,
}

#[derive(Clone, Copy, Default)]
struct ClaimTable {
    claimed: u64,
    display: u64,
    generation: u32,
}

/// Claim table shared by everything that opens display pins.
///
/// Interior mutability goes through a critical-section mutex, so the
/// registry can live in a `static` (see [`DISPLAY_PINS`]).
pub struct PinRegistry {
    table: Mutex<CriticalSectionRawMutex, RefCell<ClaimTable>>,
}

/// The global registry used by firmware.
pub static DISPLAY_PINS: PinRegistry = PinRegistry::new();

/// Release every display claim in [`DISPLAY_PINS`].
///
/// Returns the number of pins released.
pub fn release_displays() -> u32 {
    DISPLAY_PINS.release_displays()
}

impl Default for PinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PinRegistry {
    /// An empty registry.
    pub const fn new() -> Self {
        Self {
            table: Mutex::new(RefCell::new(ClaimTable {
                claimed: 0,
                display: 0,
                generation: 0,
            })),
        }
    }

    fn mask(pin: PinId) -> Result<u64, TftError> {
        if pin.number() > MAX_PIN {
            return Err(TftError::InvalidPin(pin));
        }
        Ok(1u64 << pin.number())
    }

    /// Claim `pin` for `owner`.
    ///
    /// # Errors
    ///
    /// * [`TftError::PinInUse`] if anybody, including `owner`, already
    ///   holds the pin.
    /// * [`TftError::InvalidPin`] if the pin number exceeds [`MAX_PIN`].
    pub fn claim(&self, pin: PinId, owner: Owner) -> Result<(), TftError> {
        let bit = Self::mask(pin)?;
        self.table.lock(|table| {
            let mut table = table.borrow_mut();
            if table.claimed & bit != 0 {
                #[cfg(feature = "defmt")]
                defmt::warn!("claim: {} already in use", pin);
                return Err(TftError::PinInUse(pin));
            }
            table.claimed |= bit;
            if owner == Owner::Display {
                table.display |= bit;
            }
            Ok(())
        })
    }

    /// Drop the claim on `pin`, whoever holds it. No-op if unclaimed.
    pub fn release(&self, pin: PinId) {
        if let Ok(bit) = Self::mask(pin) {
            self.table.lock(|table| {
                let mut table = table.borrow_mut();
                table.claimed &= !bit;
                table.display &= !bit;
            });
        }
    }

    /// Drop every claim owned by a display session.
    ///
    /// Idempotent. Bumps [`generation`](Self::generation) on every call and
    /// returns the number of pins released.
    pub fn release_displays(&self) -> u32 {
        self.table.lock(|table| {
            let mut table = table.borrow_mut();
            let released = table.display.count_ones();
            table.claimed &= !table.display;
            table.display = 0;
            table.generation = table.generation.wrapping_add(1);
            released
        })
    }

    /// `true` if anybody holds `pin`.
    pub fn is_claimed(&self, pin: PinId) -> bool {
        self.owner(pin).is_some()
    }

    /// Current owner of `pin`, if claimed.
    pub fn owner(&self, pin: PinId) -> Option<Owner> {
        let bit = Self::mask(pin).ok()?;
        self.table.lock(|table| {
            let table = table.borrow();
            if table.claimed & bit == 0 {
                None
            } else if table.display & bit != 0 {
                Some(Owner::Display)
            } else {
                Some(Owner::User)
            }
        })
    }

    /// Number of `release_displays` calls so far.
    pub fn generation(&self) -> u32 {
        self.table.lock(|table| table.borrow().generation)
    }
}
