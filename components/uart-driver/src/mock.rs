//! Simulated UART register block
//!
//! Stands in for the hardware in host-side tests. Every register access is
//! recorded in order, received bytes are queued by the test, transmitted
//! bytes are captured, and the state register can be made to stall.
//!
//! A poll budget turns "spins forever" into a panic so liveness tests stay
//! bounded without the driver itself knowing about timeouts.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use spin::Mutex;

use crate::regs::{Control, Isr, State, UartRegisters};

/// One register access, in the order the driver issued it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    ReadData(u8),
    WriteData(u8),
    ReadState(State),
    ReadControl,
    WriteControl(Control),
    ReadIsr,
    WriteBaudDiv(u32),
}

struct SimState {
    rx: VecDeque<u8>,
    tx: Vec<u8>,
    control: u32,
    bauddiv: Option<u32>,
    isr: u32,
    forced_state: u32,
    accesses: Vec<Access>,
    /// State reads that report TX_BUF_FULL after each data write
    tx_latency: usize,
    tx_busy: usize,
    tx_stuck: bool,
    /// State reads that report an empty receiver before queued data shows
    rx_latency: usize,
    rx_pending: usize,
    state_polls: usize,
    poll_budget: Option<usize>,
}

/// Simulated CMSDK UART
pub struct SimulatedUart {
    inner: Mutex<SimState>,
}

impl SimulatedUart {
    /// Idle UART: transmitter ready, nothing received
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(SimState {
                rx: VecDeque::new(),
                tx: Vec::new(),
                control: 0,
                bauddiv: None,
                isr: 0,
                forced_state: 0,
                accesses: Vec::new(),
                tx_latency: 0,
                tx_busy: 0,
                tx_stuck: false,
                rx_latency: 0,
                rx_pending: 0,
                state_polls: 0,
                poll_budget: None,
            }),
        }
    }

    /// Queue bytes on the receive line
    pub fn with_rx(self, bytes: &[u8]) -> Self {
        self.push_rx(bytes);
        self
    }

    /// Keep TX_BUF_FULL set for `polls` state reads after every write
    pub fn with_tx_latency(self, polls: usize) -> Self {
        self.inner.lock().tx_latency = polls;
        self
    }

    /// Report an empty receiver for `polls` state reads before each byte
    pub fn with_rx_latency(self, polls: usize) -> Self {
        {
            let mut sim = self.inner.lock();
            sim.rx_latency = polls;
            sim.rx_pending = polls;
        }
        self
    }

    /// Transmitter that never drains
    pub fn with_stuck_tx(self) -> Self {
        self.inner.lock().tx_stuck = true;
        self
    }

    /// Panic once the state register has been read more than `polls` times
    pub fn with_poll_budget(self, polls: usize) -> Self {
        self.inner.lock().poll_budget = Some(polls);
        self
    }

    /// Bits always reported in the state register (e.g. overflow flags)
    pub fn with_forced_state(self, state: State) -> Self {
        self.inner.lock().forced_state = state.bits();
        self
    }

    /// Initial control register contents
    pub fn with_control(self, control: Control) -> Self {
        self.inner.lock().control = control.bits();
        self
    }

    /// Interrupt status register contents
    pub fn with_isr(self, isr: Isr) -> Self {
        self.inner.lock().isr = isr.bits();
        self
    }

    /// Queue more bytes on the receive line
    pub fn push_rx(&self, bytes: &[u8]) {
        self.inner.lock().rx.extend(bytes.iter().copied());
    }

    /// Bytes written to the data register so far
    pub fn transmitted(&self) -> Vec<u8> {
        self.inner.lock().tx.clone()
    }

    /// Every register access so far
    pub fn accesses(&self) -> Vec<Access> {
        self.inner.lock().accesses.clone()
    }

    /// Last value written to BAUDDIV
    pub fn bauddiv(&self) -> Option<u32> {
        self.inner.lock().bauddiv
    }

    /// Control register contents
    pub fn control(&self) -> Control {
        Control::from_bits_retain(self.inner.lock().control)
    }

    /// Number of state register reads so far
    pub fn state_polls(&self) -> usize {
        self.inner.lock().state_polls
    }

    /// Bytes still waiting on the receive line
    pub fn rx_remaining(&self) -> usize {
        self.inner.lock().rx.len()
    }

    /// Forget recorded accesses and transmitted bytes
    pub fn clear_log(&self) {
        let mut sim = self.inner.lock();
        sim.accesses.clear();
        sim.tx.clear();
    }
}

impl Default for SimulatedUart {
    fn default() -> Self {
        Self::new()
    }
}

impl UartRegisters for SimulatedUart {
    fn read_data(&self) -> u32 {
        let mut sim = self.inner.lock();
        let byte = sim.rx.pop_front().unwrap_or(0);
        sim.rx_pending = sim.rx_latency;
        sim.accesses.push(Access::ReadData(byte));
        u32::from(byte)
    }

    fn write_data(&self, value: u32) {
        let mut sim = self.inner.lock();
        let byte = value as u8;
        sim.tx.push(byte);
        sim.tx_busy = sim.tx_latency;
        sim.accesses.push(Access::WriteData(byte));
    }

    fn read_state(&self) -> u32 {
        let mut sim = self.inner.lock();
        sim.state_polls += 1;
        if let Some(budget) = sim.poll_budget {
            if sim.state_polls > budget {
                drop(sim);
                panic!("simulated UART poll budget of {} exhausted", budget);
            }
        }

        let mut state = State::from_bits_retain(sim.forced_state);
        if sim.tx_stuck || sim.tx_busy > 0 {
            state |= State::TX_BUF_FULL;
            sim.tx_busy = sim.tx_busy.saturating_sub(1);
        }
        if !sim.rx.is_empty() {
            if sim.rx_pending == 0 {
                state |= State::RX_BUF_FULL;
            } else {
                sim.rx_pending -= 1;
            }
        }

        sim.accesses.push(Access::ReadState(state));
        state.bits()
    }

    fn read_control(&self) -> u32 {
        let mut sim = self.inner.lock();
        sim.accesses.push(Access::ReadControl);
        sim.control
    }

    fn write_control(&self, value: u32) {
        let mut sim = self.inner.lock();
        sim.control = value;
        sim.accesses
            .push(Access::WriteControl(Control::from_bits_retain(value)));
    }

    fn read_isr(&self) -> u32 {
        let mut sim = self.inner.lock();
        sim.accesses.push(Access::ReadIsr);
        sim.isr
    }

    fn write_bauddiv(&self, value: u32) {
        let mut sim = self.inner.lock();
        sim.bauddiv = Some(value);
        sim.accesses.push(Access::WriteBaudDiv(value));
    }
}
