//! Stream throughput against the simulated UART
//!
//! Measures driver overhead per character (polling, translation, echo);
//! the simulator's bookkeeping is included in every figure.

use std::hint::black_box;

use cmsdk_uart::mock::SimulatedUart;
use cmsdk_uart::{Stream, Uart};
use criterion::{criterion_group, criterion_main, Criterion, Throughput};

const LINE: &[u8] = b"The quick brown fox jumps over the lazy dog\n";

fn bench_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("stream_write");
    group.throughput(Throughput::Bytes(LINE.len() as u64));

    group.bench_function("write_bytes", |b| {
        let sim = SimulatedUart::new();
        let stream = Stream::new(Uart::new(&sim));
        b.iter(|| {
            stream.write_bytes(black_box(LINE));
            sim.clear_log();
        });
    });

    group.bench_function("write_bytes_tx_latency", |b| {
        let sim = SimulatedUart::new().with_tx_latency(4);
        let stream = Stream::new(Uart::new(&sim));
        b.iter(|| {
            stream.write_bytes(black_box(LINE));
            sim.clear_log();
        });
    });

    group.finish();
}

fn bench_read_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("stream_read");
    group.throughput(Throughput::Bytes(LINE.len() as u64));

    group.bench_function("read_line", |b| {
        let sim = SimulatedUart::new();
        let stream = Stream::new(Uart::new(&sim));
        let mut buf = [0u8; 128];
        b.iter(|| {
            sim.push_rx(LINE);
            let n = stream.read_line(&mut buf);
            sim.clear_log();
            black_box(n)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_write, bench_read_line);
criterion_main!(benches);
