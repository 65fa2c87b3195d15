/// Cumulative per-interface counters.
///
/// This is the driver's whole observability surface: frames in/out, drops,
/// and watchdog firings. Malformed inbound frames and failed submissions
/// are counted here and never surfaced as errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverStats {
    /// Frames dispatched to the network stack.
    pub rx_frames: u64,
    /// Frames consumed but not dispatched (link down, bad size, unknown
    /// ethertype).
    pub rx_dropped: u64,
    /// Adapter errors while copying a frame out.
    pub rx_errors: u64,
    /// Frames accepted by the hardware.
    pub tx_frames: u64,
    /// Submissions the hardware refused.
    pub tx_errors: u64,
    /// TX watchdog expiries (each one is a hardware reset).
    pub tx_timeouts: u64,
}

/// Work performed by a single interrupt invocation.
#[must_use]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IrqCounts {
    /// Frames drained from the adapter during this invocation.
    pub rx_frames: usize,
    /// Whether a TX completion was handled.
    pub tx_completed: bool,
}
