//! Boundary contracts between the interface driver core and its two
//! collaborators: the hardware adapter (register access, DMA, IRQ line) and
//! the network stack (IP/ARP packet processing).
//!
//! This crate is intentionally minimal: it deals exclusively with raw
//! Ethernet frames held in a single shared [`FrameBuffer`] and defines the
//! traits the driver core is generic over. Keeping the contracts here means
//! hardware models and stack implementations do not need to depend on the
//! driver crate itself.
#![forbid(unsafe_code)]

pub mod adapter;
pub mod buffer;
pub mod ethernet;
pub mod stack;

pub use adapter::{AdapterError, HardwareAdapter, IrqStatus};
pub use buffer::FrameBuffer;
pub use ethernet::{EtherType, EthernetHeader, MacAddr};
pub use stack::NetworkStack;
