//! CMSDK UART - Polled character-stream driver
//!
//! # Purpose
//! Blocking, polled driver for the ARM CMSDK APB UART, exposed as the
//! standard input/output/error character streams.
//!
//! # Integration Points
//! - Depends on: the UART register block at a fixed physical address
//! - Provides to: applications via [`Stdio`] and the `uart_print!` family
//! - Capabilities required: MMIO access to the register block
//!
//! # Architecture
//! - [`regs`]: register layout, bit indices, volatile access trait
//! - [`Uart`]: initializer and the `put_char`/`get_char` primitives
//! - [`stdio`]: one read-write [`Stream`] shared by stdin/stdout/stderr
//! - [`StreamLogger`]: `log` backend on top of a stream
//!
//! Transfers busy-wait on the state register with no timeout. Interrupts and
//! DMA are never used; overflow bits are left for the caller to inspect.
//!
//! # Testing Strategy
//! - Unit tests: register layout, init sequence, translation and echo rules
//! - Integration tests: console sessions against [`mock::SimulatedUart`]
//! - Hardware sim tests: poll-budgeted simulator for liveness

#![no_std]

#[cfg(test)]
#[macro_use]
extern crate std;

#[cfg(any(test, feature = "mock"))]
extern crate alloc;

pub mod config;
mod error;
pub mod logger;
pub mod regs;
pub mod stdio;
mod uart;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[cfg(feature = "mps2")]
pub mod platform;

pub use config::{UartConfig, CLOCK_HZ, DEFAULT_BAUD_RATE};
pub use error::{PollCondition, Result, UartError};
pub use logger::StreamLogger;
pub use regs::{Control, Isr, MmioRegisters, RegisterBlock, State, UartRegisters};
pub use stdio::{Stdio, Stream, StreamMode};
pub use uart::Uart;
