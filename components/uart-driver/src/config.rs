//! Clock and baud-rate configuration

use crate::{Result, UartError};

/// Peripheral clock feeding the baud divisor (25 MHz)
pub const CLOCK_HZ: u32 = 25_000_000;

/// Baud rate used by the platform console
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Smallest divisor the baud generator accepts
pub const BAUDDIV_MIN: u32 = 16;

/// Largest divisor that fits the 20-bit BAUDDIV field
pub const BAUDDIV_MAX: u32 = 0xF_FFFF;

/// Baud divisor for `baud_rate` at [`CLOCK_HZ`]
///
/// # Panics
/// Panics if `baud_rate` is zero.
pub const fn baud_divisor(baud_rate: u32) -> u32 {
    CLOCK_HZ / baud_rate
}

/// UART line configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UartConfig {
    pub baud_rate: u32,
    pub clock_hz: u32,
}

impl UartConfig {
    /// Configuration for `baud_rate` at the fixed peripheral clock
    pub const fn new(baud_rate: u32) -> Self {
        Self {
            baud_rate,
            clock_hz: CLOCK_HZ,
        }
    }

    /// Compute and range-check the divisor for this configuration
    pub fn divisor(&self) -> Result<u32> {
        let divisor = self
            .clock_hz
            .checked_div(self.baud_rate)
            .ok_or(UartError::InvalidBaudRate {
                baud_rate: self.baud_rate,
            })?;

        if !(BAUDDIV_MIN..=BAUDDIV_MAX).contains(&divisor) {
            return Err(UartError::DivisorOutOfRange {
                divisor,
                min: BAUDDIV_MIN,
                max: BAUDDIV_MAX,
            });
        }

        Ok(divisor)
    }
}

impl Default for UartConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BAUD_RATE)
    }
}
