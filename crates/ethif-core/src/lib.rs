//! Interrupt-driven control core of an Ethernet interface driver.
//!
//! [`Driver`] coordinates three actors that all touch one shared packet
//! buffer and one piece of device state: the hardware interrupt handler
//! (RX-ready / TX-done), a periodic poll timer that gives the network stack
//! transmit opportunities and advances its retransmit clocks, and a TX
//! watchdog that resets a stalled transmitter. There is no scheduler and no
//! blocking: every entry point runs to completion, and the only concurrency
//! primitive is masking the device's interrupt line.
//!
//! The hardware registers and the IP/ARP stack sit behind the
//! [`HardwareAdapter`] and [`NetworkStack`] traits from `ethif-hal`; time is
//! virtual nanoseconds passed into every entry point, so the whole driver is
//! deterministic under test.
//!
//! [`HardwareAdapter`]: ethif_hal::HardwareAdapter
//! [`NetworkStack`]: ethif_hal::NetworkStack
#![forbid(unsafe_code)]

mod config;
mod driver;
mod error;
mod registry;
mod stats;

pub use config::Config;
pub use driver::{Driver, DriverTimer, NetInterface};
pub use error::{DriverError, Result};
pub use registry::{InterfaceId, Registry};
pub use stats::{DriverStats, IrqCounts};
