//! MPS2 console binding
//!
//! UART0 of the MPS2 CMSDK peripheral set, wired up as the process-wide
//! stdin/stdout/stderr. Nothing here touches the hardware until [`init`].

use log::LevelFilter;

use crate::config::DEFAULT_BAUD_RATE;
use crate::logger::StreamLogger;
use crate::regs::MmioRegisters;
use crate::stdio::{Stdio, Stream};
use crate::uart::Uart;

/// UART0 base address on MPS2 boards
pub const UART0_BASE: usize = 0x4000_4000;

/// The console stream
// SAFETY: UART0_BASE is the fixed UART0 register block and this is the only
// handle created for it.
pub static UART0: Stream<MmioRegisters> =
    Stream::new(Uart::new(unsafe { MmioRegisters::new(UART0_BASE) }));

/// stdin, stdout and stderr, all aliasing [`UART0`]
pub static STDIO: Stdio<'static, MmioRegisters> = Stdio::shared(&UART0);

static LOGGER: StreamLogger<'static, MmioRegisters> =
    StreamLogger::new(&UART0, LevelFilter::Trace);

/// Configure UART0 for the console baud rate
///
/// Call once at startup, before any console I/O.
pub fn init() {
    STDIO.stdout.uart().init(DEFAULT_BAUD_RATE);
}

/// Route `log` records to stderr, filtered at `level`
///
/// Has no effect if a logger is already installed.
pub fn init_logger(level: LevelFilter) {
    // SAFETY: single thread of control, nothing else is installing a
    // logger or logging concurrently.
    if unsafe { log::set_logger_racy(&LOGGER) }.is_ok() {
        log::set_max_level(level);
    }
}

#[doc(hidden)]
pub fn _print(args: core::fmt::Arguments) {
    use core::fmt::Write;
    let mut out = STDIO.stdout;
    let _ = out.write_fmt(args);
}

#[doc(hidden)]
pub fn _eprint(args: core::fmt::Arguments) {
    use core::fmt::Write;
    let mut out = STDIO.stderr;
    let _ = out.write_fmt(args);
}

/// Print to the console
#[macro_export]
macro_rules! uart_print {
    ($($arg:tt)*) => ($crate::platform::_print(format_args!($($arg)*)));
}

/// Print a line to the console
#[macro_export]
macro_rules! uart_println {
    () => ($crate::uart_print!("\n"));
    ($($arg:tt)*) => ($crate::uart_print!("{}\n", format_args!($($arg)*)));
}

/// Print a line to the console's stderr role
#[macro_export]
macro_rules! uart_eprintln {
    () => ($crate::platform::_eprint(format_args!("\n")));
    ($($arg:tt)*) => ($crate::platform::_eprint(format_args!("{}\n", format_args!($($arg)*))));
}
