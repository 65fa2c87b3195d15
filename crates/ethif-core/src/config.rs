pub(crate) const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Timing constants and budgets for one interface.
///
/// These are load-time configuration; nothing reads them after
/// [`Driver::initialize`](crate::Driver::initialize) except by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Period of the TX poll timer.
    pub poll_period_ns: u64,

    /// Half-second units handed to the stack's periodic clock advance on
    /// each poll-timer expiry. Two units per one-second period keeps the
    /// stack's retransmit clocks in real time.
    pub poll_half_seconds: u32,

    /// How long an admitted transmit may stay uncompleted before the
    /// watchdog resets the hardware.
    pub tx_timeout_ns: u64,

    /// Capacity of the shared RX/TX frame buffer. Defaults to the maximum
    /// untagged Ethernet frame.
    pub buffer_capacity: usize,

    /// Upper bound on frames drained from the adapter per interrupt. The RX
    /// loop terminates on the adapter's "more frames pending" predicate;
    /// the budget additionally bounds an adapter that never clears it.
    pub max_rx_frames_per_interrupt: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_period_ns: NANOS_PER_SEC,
            poll_half_seconds: 2,
            tx_timeout_ns: 60 * NANOS_PER_SEC,
            buffer_capacity: 1518,
            max_rx_frames_per_interrupt: 256,
        }
    }
}
