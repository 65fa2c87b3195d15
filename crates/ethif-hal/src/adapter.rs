use thiserror::Error;

use crate::ethernet::MacAddr;

/// Errors surfaced by a hardware adapter.
///
/// The driver core recovers from all of these locally (skip the frame, count
/// it, or reset the hardware); only [`AdapterError::IrqAttach`] is surfaced
/// to the caller of initialization, as a retryable condition.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AdapterError {
    #[error("adapter cannot accept another outgoing frame")]
    Busy,

    #[error("inbound frame failed the adapter's validity check")]
    BadFrame,

    #[error("adapter hardware fault")]
    Hardware,

    #[error("interrupt line could not be attached")]
    IrqAttach,
}

/// Interrupt causes read-and-cleared from the adapter in a single operation.
///
/// The read must clear the hardware's status bits atomically with respect to
/// the hardware itself, so a cause raised between two reads is never lost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IrqStatus {
    /// At least one inbound frame is pending.
    pub rx_ready: bool,
    /// The previously submitted transmit completed.
    pub tx_done: bool,
    /// The adapter reported a hardware error condition.
    pub error: bool,
}

impl IrqStatus {
    pub fn any(&self) -> bool {
        self.rx_ready || self.tx_done || self.error
    }
}

/// Register-level access to one physical interface.
///
/// This is the entire surface the driver core needs from the hardware:
/// frame copy in/out, the interrupt line, and a reset to a known-good state.
/// Implementations are device-specific; tests use recording mocks.
pub trait HardwareAdapter {
    /// Attach the device's interrupt line. The only failure surfaced out of
    /// driver initialization; retryable.
    fn attach_irq(&mut self) -> Result<(), AdapterError>;

    /// Bring the hardware to an operational state (called on interface up).
    fn init(&mut self) -> Result<(), AdapterError>;

    /// Reset the hardware to a known-good quiescent state.
    fn reset(&mut self);

    /// Read the factory MAC address.
    fn read_mac(&mut self) -> MacAddr;

    /// Whether at least one inbound frame is waiting to be copied out.
    fn rx_pending(&mut self) -> bool;

    /// Copy the next pending frame into `buf`, returning its full length.
    ///
    /// A returned length larger than `buf.len()` means the frame did not
    /// fit and was truncated; callers treat that as a drop.
    fn receive_into(&mut self, buf: &mut [u8]) -> Result<usize, AdapterError>;

    /// Whether the hardware can accept one more outgoing frame (admission).
    fn tx_ready(&mut self) -> bool;

    /// Hand one outgoing frame to the hardware.
    fn submit_tx(&mut self, frame: &[u8]) -> Result<(), AdapterError>;

    /// Read and clear the pending interrupt causes.
    fn ack_interrupts(&mut self) -> IrqStatus;

    /// Unmask this device's interrupt line.
    fn enable_irq(&mut self);

    /// Mask this device's interrupt line.
    fn disable_irq(&mut self);

    /// Enable or suppress TX-done cause reporting.
    ///
    /// The driver suppresses it while no transmit is outstanding to avoid
    /// spurious wakeups. Adapters without that granularity keep the default
    /// no-op.
    fn set_tx_done_reporting(&mut self, _enabled: bool) {}
}

impl<T: HardwareAdapter + ?Sized> HardwareAdapter for &mut T {
    fn attach_irq(&mut self) -> Result<(), AdapterError> {
        <T as HardwareAdapter>::attach_irq(&mut **self)
    }

    fn init(&mut self) -> Result<(), AdapterError> {
        <T as HardwareAdapter>::init(&mut **self)
    }

    fn reset(&mut self) {
        <T as HardwareAdapter>::reset(&mut **self);
    }

    fn read_mac(&mut self) -> MacAddr {
        <T as HardwareAdapter>::read_mac(&mut **self)
    }

    fn rx_pending(&mut self) -> bool {
        <T as HardwareAdapter>::rx_pending(&mut **self)
    }

    fn receive_into(&mut self, buf: &mut [u8]) -> Result<usize, AdapterError> {
        <T as HardwareAdapter>::receive_into(&mut **self, buf)
    }

    fn tx_ready(&mut self) -> bool {
        <T as HardwareAdapter>::tx_ready(&mut **self)
    }

    fn submit_tx(&mut self, frame: &[u8]) -> Result<(), AdapterError> {
        <T as HardwareAdapter>::submit_tx(&mut **self, frame)
    }

    fn ack_interrupts(&mut self) -> IrqStatus {
        <T as HardwareAdapter>::ack_interrupts(&mut **self)
    }

    fn enable_irq(&mut self) {
        <T as HardwareAdapter>::enable_irq(&mut **self);
    }

    fn disable_irq(&mut self) {
        <T as HardwareAdapter>::disable_irq(&mut **self);
    }

    fn set_tx_done_reporting(&mut self, enabled: bool) {
        <T as HardwareAdapter>::set_tx_done_reporting(&mut **self, enabled);
    }
}

impl<T: HardwareAdapter + ?Sized> HardwareAdapter for Box<T> {
    fn attach_irq(&mut self) -> Result<(), AdapterError> {
        <T as HardwareAdapter>::attach_irq(&mut **self)
    }

    fn init(&mut self) -> Result<(), AdapterError> {
        <T as HardwareAdapter>::init(&mut **self)
    }

    fn reset(&mut self) {
        <T as HardwareAdapter>::reset(&mut **self);
    }

    fn read_mac(&mut self) -> MacAddr {
        <T as HardwareAdapter>::read_mac(&mut **self)
    }

    fn rx_pending(&mut self) -> bool {
        <T as HardwareAdapter>::rx_pending(&mut **self)
    }

    fn receive_into(&mut self, buf: &mut [u8]) -> Result<usize, AdapterError> {
        <T as HardwareAdapter>::receive_into(&mut **self, buf)
    }

    fn tx_ready(&mut self) -> bool {
        <T as HardwareAdapter>::tx_ready(&mut **self)
    }

    fn submit_tx(&mut self, frame: &[u8]) -> Result<(), AdapterError> {
        <T as HardwareAdapter>::submit_tx(&mut **self, frame)
    }

    fn ack_interrupts(&mut self) -> IrqStatus {
        <T as HardwareAdapter>::ack_interrupts(&mut **self)
    }

    fn enable_irq(&mut self) {
        <T as HardwareAdapter>::enable_irq(&mut **self);
    }

    fn disable_irq(&mut self) {
        <T as HardwareAdapter>::disable_irq(&mut **self);
    }

    fn set_tx_done_reporting(&mut self, enabled: bool) {
        <T as HardwareAdapter>::set_tx_done_reporting(&mut **self, enabled);
    }
}
