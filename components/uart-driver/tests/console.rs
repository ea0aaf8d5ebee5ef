//! Integration tests for a console session over the simulated UART
//!
//! These tests drive the public API the way firmware does:
//! - Initialization before first use
//! - Prompt output through stdout
//! - Line input with echo through stdin
//! - Log records on stderr

use core::fmt::Write;

use cmsdk_uart::mock::{Access, SimulatedUart};
use cmsdk_uart::{Control, Stdio, Stream, StreamLogger, Uart, UartConfig, UartError};
use log::{Level, LevelFilter, Log, Record};

/// Feeding H, i, CR through three reads yields H, i, LF and echoes H i CR LF
#[test]
fn test_end_to_end_echo() {
    let sim = SimulatedUart::new().with_rx(b"Hi\r");
    let uart = Uart::new(&sim);
    uart.init(115_200);
    sim.clear_log();

    let received = [uart.get_char(), uart.get_char(), uart.get_char()];

    assert_eq!(&received, b"Hi\n");
    assert_eq!(sim.transmitted(), b"Hi\r\n");
}

/// Full prompt/answer cycle the console application performs
#[test]
fn test_prompt_and_greeting() {
    let sim = SimulatedUart::new().with_tx_latency(2).with_rx(b"Ada\r");
    let stream = Stream::new(Uart::new(&sim));
    let stdio = Stdio::shared(&stream);

    stdio.stdout.uart().init(115_200);
    assert_eq!(sim.bauddiv(), Some(217));
    assert_eq!(sim.control(), Control::TX_EN | Control::RX_EN);

    let mut out = stdio.stdout;
    write!(out, "What is your name? ").unwrap();

    let mut buf = [0u8; 512];
    let n = stdio.stdin.read_line(&mut buf);
    let name = core::str::from_utf8(&buf[..n]).unwrap();
    assert_eq!(name, "Ada\n");

    write!(out, "Good to meet you, {}", name).unwrap();

    assert_eq!(
        sim.transmitted(),
        b"What is your name? Ada\r\nGood to meet you, Ada\r\n".to_vec()
    );
}

/// Nothing is written to the data register without a fresh state read
#[test]
fn test_every_data_access_is_guarded() {
    let sim = SimulatedUart::new()
        .with_tx_latency(3)
        .with_rx_latency(2)
        .with_rx(b"a\rb");
    let stream = Stream::new(Uart::new(&sim));

    let mut buf = [0u8; 8];
    stream.read_line(&mut buf);
    stream.write_bytes(b"\n\n");

    let accesses = sim.accesses();
    let data_accesses = accesses
        .iter()
        .enumerate()
        .filter(|(_, a)| matches!(a, Access::WriteData(_) | Access::ReadData(_)));

    for (i, access) in data_accesses {
        let previous = accesses[i - 1];
        match access {
            Access::WriteData(_) => {
                assert!(matches!(previous, Access::ReadState(s) if !s.contains(cmsdk_uart::State::TX_BUF_FULL)))
            }
            _ => assert!(matches!(previous, Access::ReadState(s) if s.contains(cmsdk_uart::State::RX_BUF_FULL))),
        }
    }
    assert_eq!(sim.transmitted(), b"a\r\n\r\n\r\n");
    assert_eq!(sim.rx_remaining(), 1);
}

/// Checked init leaves hardware alone on bad input, then works
#[test]
fn test_checked_init() {
    let sim = SimulatedUart::new();
    let uart = Uart::new(&sim);

    let err = uart.try_init(&UartConfig::new(0)).unwrap_err();
    assert_eq!(err, UartError::InvalidBaudRate { baud_rate: 0 });
    assert_eq!(err.to_string(), "Invalid baud rate: 0");
    assert_eq!(sim.bauddiv(), None);

    assert_eq!(uart.try_init(&UartConfig::new(9_600)), Ok(2_604));
    assert_eq!(sim.bauddiv(), Some(2_604));
}

/// Bounded reads report a timeout instead of spinning forever
#[test]
fn test_bounded_read_timeout_message() {
    let sim = SimulatedUart::new();
    let uart = Uart::new(&sim);

    let err = uart.try_get_char(100).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Timed out after 100 polls waiting for received data"
    );
}

/// Log records land on the shared stream as CRLF-terminated lines
#[test]
fn test_logger_on_stderr() {
    let sim = SimulatedUart::new();
    let stream = Stream::new(Uart::new(&sim));
    let stdio = Stdio::shared(&stream);
    let logger = StreamLogger::new(stdio.stderr, LevelFilter::Debug);

    logger.log(
        &Record::builder()
            .args(format_args!("console ready"))
            .level(Level::Warn)
            .target("init")
            .build(),
    );
    stdio.stdout.write_bytes(b"ok\n");

    assert_eq!(sim.transmitted(), b"[WARN init] console ready\r\nok\r\n".to_vec());
}
