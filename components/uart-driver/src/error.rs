//! Error types for the checked and bounded driver entry points
//!
//! The core primitives (`init`, `put_char`, `get_char`) never fail; these
//! errors only come out of `try_init`, `try_put_char` and `try_get_char`.

use core::fmt;
use thiserror::Error;

/// Condition a bounded poll was waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollCondition {
    /// Transmit buffer to drain (TX_BUF_FULL clear)
    TxReady,
    /// A received byte (RX_BUF_FULL set)
    RxReady,
}

impl fmt::Display for PollCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollCondition::TxReady => f.write_str("transmit buffer space"),
            PollCondition::RxReady => f.write_str("received data"),
        }
    }
}

/// UART driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UartError {
    #[error("Invalid baud rate: {baud_rate}")]
    InvalidBaudRate { baud_rate: u32 },

    #[error("Baud divisor {divisor} out of range ({min}..={max})")]
    DivisorOutOfRange { divisor: u32, min: u32, max: u32 },

    #[error("Timed out after {spins} polls waiting for {condition}")]
    Timeout { condition: PollCondition, spins: usize },
}

pub type Result<T> = core::result::Result<T, UartError>;
