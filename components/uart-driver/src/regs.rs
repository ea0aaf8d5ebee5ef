//! CMSDK APB UART Register Interface
//!
//! Register layout, bit indices and flag sets for the UART, plus the
//! [`UartRegisters`] access trait the driver is generic over.
//! Reference: ARM Cortex-M System Design Kit Technical Reference Manual

use bitflags::bitflags;
use static_assertions::{assert_eq_size, const_assert, const_assert_eq};
use volatile::{ReadOnly, Volatile, WriteOnly};

/// Register offsets
pub const DATA: usize = 0x00;
pub const STATE: usize = 0x04;
pub const CONTROL: usize = 0x08;
pub const ISR: usize = 0x0C;
pub const BAUDDIV: usize = 0x10;

/// Size of the register window in bytes
pub const REGISTER_BLOCK_SIZE: usize = 0x14;

/// State register bit indices
pub mod state {
    pub const TX_BUF_FULL: u32 = 0;
    pub const RX_BUF_FULL: u32 = 1;
    pub const TX_OVERFLOW: u32 = 2;
    pub const RX_OVERFLOW: u32 = 3;
}

/// Control register bit indices
pub mod control {
    pub const TX_EN: u32 = 0;
    pub const RX_EN: u32 = 1;
    pub const TX_IRQ_EN: u32 = 2;
    pub const RX_IRQ_EN: u32 = 3;
    pub const TX_OVERFLOW_IRQ_EN: u32 = 4;
    pub const RX_OVERFLOW_IRQ_EN: u32 = 5;
    pub const HALF_DUPLEX_TX_TIMING: u32 = 6;
}

/// Interrupt status register bit indices
pub mod isr {
    pub const TX_IRQ: u32 = 0;
    pub const RX_IRQ: u32 = 1;
    pub const TX_OVERFLOW_IRQ: u32 = 2;
    pub const RX_OVERFLOW_IRQ: u32 = 3;
}

bitflags! {
    /// Contents of the state register
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct State: u32 {
        const TX_BUF_FULL = 1 << state::TX_BUF_FULL;
        const RX_BUF_FULL = 1 << state::RX_BUF_FULL;
        const TX_OVERFLOW = 1 << state::TX_OVERFLOW;
        const RX_OVERFLOW = 1 << state::RX_OVERFLOW;
    }

    /// Contents of the control register
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Control: u32 {
        const TX_EN = 1 << control::TX_EN;
        const RX_EN = 1 << control::RX_EN;
        const TX_IRQ_EN = 1 << control::TX_IRQ_EN;
        const RX_IRQ_EN = 1 << control::RX_IRQ_EN;
        const TX_OVERFLOW_IRQ_EN = 1 << control::TX_OVERFLOW_IRQ_EN;
        const RX_OVERFLOW_IRQ_EN = 1 << control::RX_OVERFLOW_IRQ_EN;
        const HALF_DUPLEX_TX_TIMING = 1 << control::HALF_DUPLEX_TX_TIMING;
    }

    /// Contents of the interrupt status register
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Isr: u32 {
        const TX_IRQ = 1 << isr::TX_IRQ;
        const RX_IRQ = 1 << isr::RX_IRQ;
        const TX_OVERFLOW_IRQ = 1 << isr::TX_OVERFLOW_IRQ;
        const RX_OVERFLOW_IRQ = 1 << isr::RX_OVERFLOW_IRQ;
    }
}

/// UART registers as laid out in device memory
#[repr(C)]
pub struct RegisterBlock {
    /// Received byte on read, byte to send on write
    pub data: Volatile<u32>,
    pub state: ReadOnly<u32>,
    pub control: Volatile<u32>,
    /// Interrupt status (never serviced, interrupts stay disabled)
    pub isr: ReadOnly<u32>,
    pub bauddiv: WriteOnly<u32>,
}

assert_eq_size!(RegisterBlock, [u32; 5]);
const_assert_eq!(core::mem::size_of::<RegisterBlock>(), REGISTER_BLOCK_SIZE);
const_assert_eq!(core::mem::offset_of!(RegisterBlock, data), DATA);
const_assert_eq!(core::mem::offset_of!(RegisterBlock, state), STATE);
const_assert_eq!(core::mem::offset_of!(RegisterBlock, control), CONTROL);
const_assert_eq!(core::mem::offset_of!(RegisterBlock, isr), ISR);
const_assert_eq!(core::mem::offset_of!(RegisterBlock, bauddiv), BAUDDIV);

const fn distinct_bits(bits: &[u32]) -> bool {
    let mut i = 0;
    while i < bits.len() {
        if bits[i] >= u32::BITS {
            return false;
        }
        let mut j = i + 1;
        while j < bits.len() {
            if bits[i] == bits[j] {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const_assert!(distinct_bits(&[
    state::TX_BUF_FULL,
    state::RX_BUF_FULL,
    state::TX_OVERFLOW,
    state::RX_OVERFLOW,
]));
const_assert!(distinct_bits(&[
    control::TX_EN,
    control::RX_EN,
    control::TX_IRQ_EN,
    control::RX_IRQ_EN,
    control::TX_OVERFLOW_IRQ_EN,
    control::RX_OVERFLOW_IRQ_EN,
    control::HALF_DUPLEX_TX_TIMING,
]));
const_assert!(distinct_bits(&[
    isr::TX_IRQ,
    isr::RX_IRQ,
    isr::TX_OVERFLOW_IRQ,
    isr::RX_OVERFLOW_IRQ,
]));

/// Volatile access to the five UART registers
///
/// Every call must reach the device: implementations may not cache a
/// value or reorder one access relative to another.
pub trait UartRegisters {
    fn read_data(&self) -> u32;
    fn write_data(&self, value: u32);
    fn read_state(&self) -> u32;
    fn read_control(&self) -> u32;
    fn write_control(&self, value: u32);
    fn read_isr(&self) -> u32;
    fn write_bauddiv(&self, value: u32);
}

/// Memory-mapped UART registers at a fixed physical address
///
/// Deliberately not `Clone`: one handle per device.
#[derive(Debug)]
pub struct MmioRegisters {
    base: usize,
}

impl MmioRegisters {
    /// Create a register handle for the block at `base`
    ///
    /// # Safety
    /// The caller must ensure that `base` points to a CMSDK UART register
    /// block that stays mapped for the life of the handle, and that no
    /// other handle to the same block exists.
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }

    /// Base address of the register block
    pub fn base(&self) -> usize {
        self.base
    }

    #[inline]
    fn block(&self) -> *mut RegisterBlock {
        self.base as *mut RegisterBlock
    }
}

// SAFETY for every access below: `new` guarantees `base` addresses a live
// register block owned by this handle; the driver runs on a single thread
// of control, so the temporary `&mut` formed for a write is never aliased.
impl UartRegisters for MmioRegisters {
    #[inline]
    fn read_data(&self) -> u32 {
        unsafe { (*self.block()).data.read() }
    }

    #[inline]
    fn write_data(&self, value: u32) {
        unsafe { (*self.block()).data.write(value) }
    }

    #[inline]
    fn read_state(&self) -> u32 {
        unsafe { (*self.block()).state.read() }
    }

    #[inline]
    fn read_control(&self) -> u32 {
        unsafe { (*self.block()).control.read() }
    }

    #[inline]
    fn write_control(&self, value: u32) {
        unsafe { (*self.block()).control.write(value) }
    }

    #[inline]
    fn read_isr(&self) -> u32 {
        unsafe { (*self.block()).isr.read() }
    }

    #[inline]
    fn write_bauddiv(&self, value: u32) {
        unsafe { (*self.block()).bauddiv.write(value) }
    }
}

impl<R: UartRegisters + ?Sized> UartRegisters for &R {
    fn read_data(&self) -> u32 {
        (**self).read_data()
    }

    fn write_data(&self, value: u32) {
        (**self).write_data(value)
    }

    fn read_state(&self) -> u32 {
        (**self).read_state()
    }

    fn read_control(&self) -> u32 {
        (**self).read_control()
    }

    fn write_control(&self, value: u32) {
        (**self).write_control(value)
    }

    fn read_isr(&self) -> u32 {
        (**self).read_isr()
    }

    fn write_bauddiv(&self, value: u32) {
        (**self).write_bauddiv(value)
    }
}
