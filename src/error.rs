//! Error types for the TFT initializer.

use core::fmt;

use display_interface::DisplayError;

use crate::board::PinId;

/// Errors that can occur while bringing up or drawing to the TFT.
///
/// HAL pin and bus errors are discarded at the [`Board`](crate::Board)
/// boundary, so this enum is non-generic. The variants fall into two
/// groups: resource acquisition (pins and the SPI bus) and driver
/// construction; see [`TftError::is_resource_failure`].
#[derive(Debug)]
pub enum TftError {
    /// The pin is already claimed in the [`PinRegistry`](crate::PinRegistry).
    PinInUse(PinId),
    /// The pin number is outside the range the registry can track.
    InvalidPin(PinId),
    /// A GPIO could not be opened or driven.
    Pin,
    /// The SPI bus could not be opened on the requested pins.
    Bus,
    /// The SPI bus rejected the requested clock configuration.
    BusConfig,
    /// Panel size plus offsets does not fit the controller frame memory.
    InvalidGeometry,
    /// The display driver failed to initialise the controller.
    InitializationFailed,
    /// Display interface error after initialisation (wraps SPI and D/C
    /// failures while drawing).
    Display(DisplayError),
}

impl TftError {
    /// `true` for pin and bus acquisition failures, `false` for failures
    /// raised while constructing or driving the display.
    pub fn is_resource_failure(&self) -> bool {
        matches!(
            self,
            TftError::PinInUse(_)
                | TftError::InvalidPin(_)
                | TftError::Pin
                | TftError::Bus
                | TftError::BusConfig
        )
    }
}

impl From<DisplayError> for TftError {
    fn from(e: DisplayError) -> Self {
        TftError::Display(e)
    }
}

impl fmt::Display for TftError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TftError::PinInUse(pin) => write!(f, "GPIO{} is already in use", pin.number()),
            TftError::InvalidPin(pin) => write!(f, "GPIO{} is not a valid pin", pin.number()),
            TftError::Pin => write!(f, "GPIO error"),
            TftError::Bus => write!(f, "SPI bus unavailable"),
            TftError::BusConfig => write!(f, "SPI bus rejected configuration"),
            TftError::InvalidGeometry => write!(f, "Panel geometry exceeds controller memory"),
            TftError::InitializationFailed => write!(f, "Display initialization failed"),
            TftError::Display(e) => write!(f, "Display interface error: {:?}", e),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TftError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            TftError::PinInUse(pin) => defmt::write!(f, "Pin in use: {}", pin),
            TftError::InvalidPin(pin) => defmt::write!(f, "Invalid pin: {}", pin),
            TftError::Pin => defmt::write!(f, "GPIO error"),
            TftError::Bus => defmt::write!(f, "SPI bus unavailable"),
            TftError::BusConfig => defmt::write!(f, "SPI bus configuration rejected"),
            TftError::InvalidGeometry => defmt::write!(f, "Invalid panel geometry"),
            TftError::InitializationFailed => defmt::write!(f, "Initialization failed"),
            TftError::Display(_e) => defmt::write!(f, "Display interface error"),
        }
    }
}
