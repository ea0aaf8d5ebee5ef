//! Polled UART driver
//!
//! Initialization plus the two blocking transfer primitives. Every transfer
//! polls the state register immediately before touching the data register;
//! nothing is buffered in software and interrupts are never enabled.
//!
//! Overflow bits are never consulted by `put_char`/`get_char`, so a receive
//! overflow goes unnoticed unless the caller inspects [`Uart::status`].

use crate::config::{baud_divisor, UartConfig};
use crate::regs::{Control, Isr, State, UartRegisters};
use crate::{PollCondition, Result, UartError};

const CR: u8 = b'\r';
const LF: u8 = b'\n';

/// CMSDK UART driver over a register block `R`
pub struct Uart<R> {
    regs: R,
}

impl<R: UartRegisters> Uart<R> {
    /// Create a driver for the given register block
    ///
    /// The hardware is untouched until [`init`](Self::init) runs.
    pub const fn new(regs: R) -> Self {
        Self { regs }
    }

    /// Underlying register block
    pub fn registers(&self) -> &R {
        &self.regs
    }

    /// Program the baud divisor and enable the receiver and transmitter
    ///
    /// All interrupt enables are cleared. Must run once before any transfer;
    /// running it again with the same rate rewrites identical values.
    ///
    /// # Panics
    /// Panics if `baud_rate` is zero.
    pub fn init(&self, baud_rate: u32) {
        let divisor = baud_divisor(baud_rate);
        self.program(divisor);
        log::debug!("uart: {} baud, bauddiv={}", baud_rate, divisor);
    }

    /// Checked variant of [`init`](Self::init)
    ///
    /// Rejects a zero baud rate or an unrepresentable divisor before any
    /// register is written. Returns the programmed divisor.
    pub fn try_init(&self, config: &UartConfig) -> Result<u32> {
        let divisor = config.divisor().inspect_err(|e| {
            log::warn!("uart: rejecting {:?}: {}", config, e);
        })?;

        self.program(divisor);
        log::debug!(
            "uart: {} baud from {} Hz, bauddiv={}",
            config.baud_rate,
            config.clock_hz,
            divisor
        );
        Ok(divisor)
    }

    fn program(&self, divisor: u32) {
        self.regs.write_bauddiv(divisor);
        self.regs.write_control((Control::RX_EN | Control::TX_EN).bits());
    }

    /// Current state register contents
    pub fn status(&self) -> State {
        State::from_bits_retain(self.regs.read_state())
    }

    /// Current control register contents
    pub fn control(&self) -> Control {
        Control::from_bits_retain(self.regs.read_control())
    }

    /// Current interrupt status register contents
    pub fn interrupt_status(&self) -> Isr {
        Isr::from_bits_retain(self.regs.read_isr())
    }

    /// Check if the transmit buffer is full
    #[inline]
    pub fn tx_full(&self) -> bool {
        self.status().contains(State::TX_BUF_FULL)
    }

    /// Check if a received byte is waiting
    #[inline]
    pub fn rx_ready(&self) -> bool {
        self.status().contains(State::RX_BUF_FULL)
    }

    /// Spin until the transmit buffer has room
    ///
    /// No timeout: a transmitter that never drains blocks forever.
    #[inline]
    pub fn wait_tx_ready(&self) {
        while self.tx_full() {
            core::hint::spin_loop();
        }
    }

    /// Spin until a received byte is available
    ///
    /// No timeout: a line that never delivers blocks forever.
    #[inline]
    pub fn wait_rx_ready(&self) {
        while !self.rx_ready() {
            core::hint::spin_loop();
        }
    }

    /// Write a byte to the UART (blocking)
    ///
    /// A line feed is preceded by a carriage return on the wire. Returns
    /// the byte written.
    pub fn put_char(&self, c: u8) -> u8 {
        if c == LF {
            self.put_char(CR);
        }

        self.wait_tx_ready();
        self.regs.write_data(u32::from(c));
        c
    }

    /// Read a byte from the UART (blocking)
    ///
    /// A carriage return is delivered as a line feed. The delivered byte is
    /// echoed through [`put_char`](Self::put_char).
    pub fn get_char(&self) -> u8 {
        self.wait_rx_ready();
        let c = translate_input(self.regs.read_data() as u8);

        self.put_char(c);
        c
    }

    /// Bounded variant of [`wait_tx_ready`](Self::wait_tx_ready)
    pub fn poll_tx_ready(&self, max_spins: usize) -> Result<()> {
        for _ in 0..max_spins {
            if !self.tx_full() {
                return Ok(());
            }
            core::hint::spin_loop();
        }
        Err(UartError::Timeout {
            condition: PollCondition::TxReady,
            spins: max_spins,
        })
    }

    /// Bounded variant of [`wait_rx_ready`](Self::wait_rx_ready)
    pub fn poll_rx_ready(&self, max_spins: usize) -> Result<()> {
        for _ in 0..max_spins {
            if self.rx_ready() {
                return Ok(());
            }
            core::hint::spin_loop();
        }
        Err(UartError::Timeout {
            condition: PollCondition::RxReady,
            spins: max_spins,
        })
    }

    /// [`put_char`](Self::put_char) with each poll capped at `max_spins`
    ///
    /// On timeout nothing further is written; a CR already sent for a line
    /// feed stays sent.
    pub fn try_put_char(&self, c: u8, max_spins: usize) -> Result<u8> {
        if c == LF {
            self.try_put_char(CR, max_spins)?;
        }

        self.poll_tx_ready(max_spins)?;
        self.regs.write_data(u32::from(c));
        Ok(c)
    }

    /// [`get_char`](Self::get_char) with each poll capped at `max_spins`
    ///
    /// The received byte is consumed even if its echo times out.
    pub fn try_get_char(&self, max_spins: usize) -> Result<u8> {
        self.poll_rx_ready(max_spins)?;
        let c = translate_input(self.regs.read_data() as u8);

        self.try_put_char(c, max_spins)?;
        Ok(c)
    }
}

#[inline]
fn translate_input(c: u8) -> u8 {
    if c == CR {
        LF
    } else {
        c
    }
}
