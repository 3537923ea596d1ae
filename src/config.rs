//! Initializer configuration.

use mipidsi::options::{ColorInversion, Rotation};

use crate::board::{pins, PinId};
use crate::error::TftError;

/// ST7789 frame memory size in the controller's native (portrait)
/// orientation, as `(columns, rows)`.
pub const FRAME_MEMORY: (u16, u16) = (240, 320);

/// Everything the initializer needs to bring up the panel.
///
/// [`DisplayConfig::default()`] reproduces the T8 ESP32-S2 wiring and the
/// v1.1 panel calibration (240×135 landscape, 40 MHz SPI, rotated 90°,
/// rows start at 40, columns at 53). Callers fitting a different panel
/// revision override the calibration fields instead of patching the crate.
#[derive(Debug, Clone, Copy)]
pub struct DisplayConfig {
    // ── Wiring ───────────────────────────────────────────────────────
    /// Backlight enable. Default: GPIO33.
    pub backlight_pin: PinId,
    /// SPI clock. Default: GPIO36.
    pub clock_pin: PinId,
    /// SPI data out. Default: GPIO35.
    pub data_out_pin: PinId,
    /// SPI chip select. Default: GPIO34.
    pub chip_select_pin: PinId,
    /// Data/command select. Default: GPIO37.
    pub data_command_pin: PinId,
    /// Controller reset. Default: GPIO38.
    pub reset_pin: PinId,

    // ── Panel ────────────────────────────────────────────────────────
    /// Visible width in pixels after rotation. Default: 240.
    pub panel_width: u16,
    /// Visible height in pixels after rotation. Default: 135.
    pub panel_height: u16,
    /// SPI clock rate in Hz. Default: 40 MHz.
    pub spi_clock_rate: u32,

    // ── Calibration ──────────────────────────────────────────────────
    /// Panel rotation. Default: 90°.
    pub rotation: Rotation,
    /// First visible controller row, in native orientation. Default: 40.
    pub row_start: u16,
    /// First visible controller column, in native orientation. Default: 53.
    pub col_start: u16,
    /// Whether the panel needs inverted colours (IPS panels do). Default: true.
    pub invert_colors: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            backlight_pin: pins::LCD_BCKL,
            clock_pin: pins::LCD_CLK,
            data_out_pin: pins::LCD_MOSI,
            chip_select_pin: pins::LCD_CS,
            data_command_pin: pins::LCD_D_C,
            reset_pin: pins::LCD_RST,
            panel_width: 240,
            panel_height: 135,
            spi_clock_rate: 40_000_000,
            rotation: Rotation::Deg90,
            row_start: 40,
            col_start: 53,
            invert_colors: true,
        }
    }
}

impl DisplayConfig {
    /// Same configuration with a different visible size.
    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.panel_width = width;
        self.panel_height = height;
        self
    }

    /// Same configuration with different panel offsets.
    pub fn with_offsets(mut self, row_start: u16, col_start: u16) -> Self {
        self.row_start = row_start;
        self.col_start = col_start;
        self
    }

    /// `true` when the rotation swaps width and height.
    pub fn is_quarter_turn(&self) -> bool {
        matches!(self.rotation, Rotation::Deg90 | Rotation::Deg270)
    }

    /// Panel size in the controller's native orientation, `(width, height)`.
    ///
    /// This is what the driver expects; it reports the rotated size back.
    pub fn native_size(&self) -> (u16, u16) {
        if self.is_quarter_turn() {
            (self.panel_height, self.panel_width)
        } else {
            (self.panel_width, self.panel_height)
        }
    }

    /// Frame memory offset in native orientation, `(x, y)`.
    pub fn native_offset(&self) -> (u16, u16) {
        (self.col_start, self.row_start)
    }

    /// Colour inversion option for the driver.
    pub fn color_inversion(&self) -> ColorInversion {
        if self.invert_colors {
            ColorInversion::Inverted
        } else {
            ColorInversion::Normal
        }
    }

    /// Every pin the session claims, backlight first.
    pub fn pins(&self) -> [PinId; 6] {
        [
            self.backlight_pin,
            self.clock_pin,
            self.data_out_pin,
            self.chip_select_pin,
            self.data_command_pin,
            self.reset_pin,
        ]
    }

    /// Check the geometry against the controller frame memory.
    ///
    /// # Errors
    ///
    /// Returns [`TftError::InvalidGeometry`] for a zero-sized panel or when
    /// size plus offset overruns [`FRAME_MEMORY`] on either axis.
    pub fn validate(&self) -> Result<(), TftError> {
        let (width, height) = self.native_size();
        let (x, y) = self.native_offset();
        let (max_width, max_height) = FRAME_MEMORY;

        let fits = width > 0
            && height > 0
            && u32::from(width) + u32::from(x) <= u32::from(max_width)
            && u32::from(height) + u32::from(y) <= u32::from(max_height);

        if fits {
            Ok(())
        } else {
            Err(TftError::InvalidGeometry)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_board() {
        let config = DisplayConfig::default();
        assert_eq!(config.backlight_pin, pins::LCD_BCKL);
        assert_eq!(config.clock_pin, pins::LCD_CLK);
        assert_eq!(config.data_out_pin, pins::LCD_MOSI);
        assert_eq!(config.chip_select_pin, pins::LCD_CS);
        assert_eq!(config.data_command_pin, pins::LCD_D_C);
        assert_eq!(config.reset_pin, pins::LCD_RST);
        assert_eq!((config.panel_width, config.panel_height), (240, 135));
        assert_eq!(config.spi_clock_rate, 40_000_000);
        assert_eq!((config.row_start, config.col_start), (40, 53));
        assert!(config.is_quarter_turn());
    }

    #[test]
    fn native_geometry_swaps_on_quarter_turn() {
        let config = DisplayConfig::default();
        assert_eq!(config.native_size(), (135, 240));
        assert_eq!(config.native_offset(), (53, 40));

        let upright = DisplayConfig {
            rotation: Rotation::Deg180,
            ..DisplayConfig::default()
        }
        .with_size(135, 240);
        assert_eq!(upright.native_size(), (135, 240));
    }

    #[test]
    fn default_geometry_is_valid() {
        assert!(DisplayConfig::default().validate().is_ok());
    }

    #[test]
    fn oversized_panel_rejected() {
        // 320 rows plus the default 40-row offset overruns the frame memory.
        let config = DisplayConfig::default().with_size(320, 170);
        assert!(matches!(config.validate(), Err(TftError::InvalidGeometry)));

        // Same size fits once the offsets match a 170×320 panel.
        assert!(config.with_offsets(0, 35).validate().is_ok());
    }

    #[test]
    fn zero_size_rejected() {
        let config = DisplayConfig::default().with_size(0, 135);
        assert!(matches!(config.validate(), Err(TftError::InvalidGeometry)));
    }

    #[test]
    fn pins_lists_backlight_first() {
        let claimed = DisplayConfig::default().pins();
        assert_eq!(claimed[0], pins::LCD_BCKL);
        assert_eq!(claimed[5], pins::LCD_RST);
    }
}
