//! `log` backend writing to a UART stream
//!
//! Records are formatted as `[LEVEL target] message` lines. Output goes
//! through the same blocking primitives as everything else, so a record is
//! fully on the wire when `log` returns.

use core::fmt::Write;

use log::{LevelFilter, Log, Metadata, Record};

use crate::regs::UartRegisters;
use crate::stdio::Stream;

/// Logger bound to one stream (normally the `stderr` role)
pub struct StreamLogger<'a, R> {
    stream: &'a Stream<R>,
    level: LevelFilter,
}

impl<'a, R> StreamLogger<'a, R> {
    pub const fn new(stream: &'a Stream<R>, level: LevelFilter) -> Self {
        Self { stream, level }
    }

    /// Stream records are written to
    pub fn stream(&self) -> &'a Stream<R> {
        self.stream
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }
}

impl<R: UartRegisters + Sync> Log for StreamLogger<'_, R> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut out = self.stream;
        // Writing to a stream cannot fail
        let _ = writeln!(out, "[{} {}] {}", record.level(), record.target(), record.args());
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::SimulatedUart;
    use crate::uart::Uart;
    use log::Level;

    #[test]
    fn test_log_line_format() {
        let sim = SimulatedUart::new();
        let stream = Stream::new(Uart::new(&sim));
        let logger = StreamLogger::new(&stream, LevelFilter::Info);

        logger.log(
            &Record::builder()
                .args(format_args!("bauddiv={}", 217))
                .level(Level::Info)
                .target("uart")
                .build(),
        );

        assert_eq!(sim.transmitted(), b"[INFO uart] bauddiv=217\r\n");
    }

    #[test]
    fn test_log_respects_level() {
        let sim = SimulatedUart::new();
        let stream = Stream::new(Uart::new(&sim));
        let logger = StreamLogger::new(&stream, LevelFilter::Warn);

        assert!(!logger.enabled(&Metadata::builder().level(Level::Debug).build()));
        assert!(logger.enabled(&Metadata::builder().level(Level::Error).build()));

        logger.log(
            &Record::builder()
                .args(format_args!("hidden"))
                .level(Level::Debug)
                .target("uart")
                .build(),
        );
        assert!(sim.transmitted().is_empty());
        assert_eq!(logger.level(), LevelFilter::Warn);
    }
}
