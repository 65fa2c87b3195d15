use ethif_hal::{HardwareAdapter, NetworkStack};

use crate::driver::Driver;
use crate::stats::IrqCounts;

/// Identifies one registered interface; doubles as the IRQ routing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InterfaceId(pub usize);

/// Owned collection of interface drivers, indexed by [`InterfaceId`].
///
/// Replaces a process-wide device array: the binding layer registers each
/// driver here and routes the hardware interrupt for a given line to the
/// owning instance. One instance per interrupt line.
#[derive(Debug)]
pub struct Registry<H, S> {
    interfaces: Vec<Driver<H, S>>,
}

impl<H, S> Default for Registry<H, S> {
    fn default() -> Self {
        Self {
            interfaces: Vec::new(),
        }
    }
}

impl<H: HardwareAdapter, S: NetworkStack> Registry<H, S> {
    pub fn new() -> Self {
        Self {
            interfaces: Vec::new(),
        }
    }

    pub fn register(&mut self, driver: Driver<H, S>) -> InterfaceId {
        self.interfaces.push(driver);
        InterfaceId(self.interfaces.len() - 1)
    }

    pub fn get(&self, id: InterfaceId) -> Option<&Driver<H, S>> {
        self.interfaces.get(id.0)
    }

    pub fn get_mut(&mut self, id: InterfaceId) -> Option<&mut Driver<H, S>> {
        self.interfaces.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }

    /// Route a hardware interrupt to the owning interface.
    pub fn interrupt(&mut self, id: InterfaceId, now_ns: u64) -> Option<IrqCounts> {
        Some(self.interfaces.get_mut(id.0)?.interrupt(now_ns))
    }

    /// Fire due timers on every registered interface.
    pub fn run_timers(&mut self, now_ns: u64) {
        for driver in &mut self.interfaces {
            driver.run_timers(now_ns);
        }
    }

    /// Earliest timer deadline across all interfaces.
    pub fn next_timer_deadline(&self) -> Option<u64> {
        self.interfaces
            .iter()
            .filter_map(|driver| driver.next_timer_deadline())
            .min()
    }
}
