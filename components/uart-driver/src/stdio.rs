//! Character streams over the UART
//!
//! A [`Stream`] is a read-write character stream whose write and read
//! operations are the driver's `put_char` and `get_char`. [`Stdio`] exposes
//! one stream under the three standard roles.
//!
//! The roles alias a single stream: there is no separate buffering, mode or
//! close state per role, and anything done through `stdout` is done through
//! `stdin` and `stderr` as well.

use core::fmt;

use bitflags::bitflags;

use crate::regs::UartRegisters;
use crate::uart::Uart;

bitflags! {
    /// Directions a stream supports
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StreamMode: u8 {
        const READ = 1 << 0;
        const WRITE = 1 << 1;
        const READ_WRITE = Self::READ.bits() | Self::WRITE.bits();
    }
}

/// Read-write character stream bound to a UART
pub struct Stream<R> {
    uart: Uart<R>,
    mode: StreamMode,
}

impl<R: UartRegisters> Stream<R> {
    /// Bind `uart` as a read-write stream
    pub const fn new(uart: Uart<R>) -> Self {
        Self {
            uart,
            mode: StreamMode::READ_WRITE,
        }
    }

    pub fn mode(&self) -> StreamMode {
        self.mode
    }

    /// Driver behind this stream
    pub fn uart(&self) -> &Uart<R> {
        &self.uart
    }

    /// Write one character, returning it
    #[inline]
    pub fn put(&self, c: u8) -> u8 {
        self.uart.put_char(c)
    }

    /// Read one character (echoed, CR delivered as LF)
    #[inline]
    pub fn get(&self) -> u8 {
        self.uart.get_char()
    }

    /// Write every byte of `bytes`
    pub fn write_bytes(&self, bytes: &[u8]) {
        for &byte in bytes {
            self.put(byte);
        }
    }

    /// Read a line into `buf`
    ///
    /// Stops once a line feed has been stored or `buf` is full. Returns
    /// the number of bytes stored; an empty `buf` reads nothing.
    pub fn read_line(&self, buf: &mut [u8]) -> usize {
        let mut count = 0;
        for slot in buf.iter_mut() {
            let c = self.get();
            *slot = c;
            count += 1;
            if c == b'\n' {
                break;
            }
        }
        count
    }
}

impl<R: UartRegisters> fmt::Write for &Stream<R> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_bytes(s.as_bytes());
        Ok(())
    }
}

/// The standard stream roles, all bound to one shared [`Stream`]
pub struct Stdio<'a, R> {
    pub stdin: &'a Stream<R>,
    pub stdout: &'a Stream<R>,
    pub stderr: &'a Stream<R>,
}

impl<'a, R> Stdio<'a, R> {
    /// Alias `stream` as stdin, stdout and stderr
    pub const fn shared(stream: &'a Stream<R>) -> Self {
        Self {
            stdin: stream,
            stdout: stream,
            stderr: stream,
        }
    }

    /// True when all three roles refer to the same stream
    pub fn is_shared(&self) -> bool {
        core::ptr::eq(self.stdin, self.stdout) && core::ptr::eq(self.stdout, self.stderr)
    }
}

impl<R> Clone for Stdio<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Stdio<'_, R> {}
