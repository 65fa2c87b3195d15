use ethif_hal::{
    ethernet, AdapterError, EtherType, EthernetHeader, FrameBuffer, HardwareAdapter, MacAddr,
    NetworkStack,
};
use ethif_time::{TimerId, TimerQueue};

use crate::config::Config;
use crate::error::{DriverError, Result};
use crate::stats::{DriverStats, IrqCounts};

/// Payloads of the two timers an interface arms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverTimer {
    /// Periodic transmit poll; re-arms itself on every expiry.
    Poll,
    /// TX stall watchdog; armed only while a transmit is outstanding.
    TxTimeout,
}

/// The registration boundary an interface exposes to the stack/OS binding
/// layer: bring-up, tear-down, an out-of-band transmit nudge, and the MAC
/// address. Everything else on [`Driver`] is internal plumbing.
pub trait NetInterface {
    /// Bring the interface up. The interface must currently be down.
    fn if_up(&mut self, now_ns: u64) -> Result<()>;

    /// Stop the interface. Safe to call in any state, any number of times.
    fn if_down(&mut self);

    /// Out-of-band notification that the stack has data to send, so the
    /// driver can poll immediately instead of waiting for the next periodic
    /// timer. No-op while the interface is down.
    fn tx_available(&mut self, now_ns: u64);

    /// The interface's MAC address.
    fn mac(&self) -> MacAddr;
}

/// State and control flow of one physical interface.
///
/// One instance per interrupt line. All entry points run to completion;
/// entry points that can arm a timer take the current virtual time in
/// nanoseconds.
#[derive(Debug)]
pub struct Driver<H, S> {
    adapter: H,
    stack: S,
    cfg: Config,

    /// Adapter interrupts are enabled if and only if this is true.
    link_up: bool,
    mac: MacAddr,

    /// The shared packet buffer. Exclusively owned by whichever call path
    /// currently runs; every hand-off to the adapter or the stack is a
    /// `&mut` borrow bounded by the call.
    buf: FrameBuffer,

    timers: TimerQueue<DriverTimer>,
    poll_timer: Option<TimerId>,
    /// `Some` exactly while a transmit has been admitted to hardware and
    /// neither completed nor been reset away.
    tx_timeout: Option<TimerId>,

    stats: DriverStats,
}

impl<H: HardwareAdapter, S: NetworkStack> Driver<H, S> {
    /// Attach the interrupt line, read the MAC, and build the driver state.
    ///
    /// The interface starts down; the IRQ-attach failure is the only error
    /// surfaced here and is retryable.
    pub fn initialize(mut adapter: H, stack: S, cfg: Config) -> Result<Self> {
        adapter.attach_irq()?;
        let mac = adapter.read_mac();
        Ok(Self {
            adapter,
            stack,
            cfg,
            link_up: false,
            mac,
            buf: FrameBuffer::new(cfg.buffer_capacity),
            timers: TimerQueue::new(),
            poll_timer: None,
            tx_timeout: None,
            stats: DriverStats::default(),
        })
    }

    pub fn is_up(&self) -> bool {
        self.link_up
    }

    pub fn stats(&self) -> DriverStats {
        self.stats
    }

    pub fn config(&self) -> Config {
        self.cfg
    }

    /// Whether a transmit is currently outstanding (watchdog armed).
    pub fn tx_outstanding(&self) -> bool {
        self.tx_timeout.is_some()
    }

    /// Earliest armed timer deadline; the embedding sleeps until then.
    pub fn next_timer_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    pub fn adapter(&self) -> &H {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut H {
        &mut self.adapter
    }

    pub fn stack(&self) -> &S {
        &self.stack
    }

    pub fn stack_mut(&mut self) -> &mut S {
        &mut self.stack
    }

    /// Hardware interrupt entry point. Runs with the device's line masked:
    /// RX is fully drained before the TX completion is handled, so the
    /// watchdog cancel always precedes the re-poll.
    pub fn interrupt(&mut self, now_ns: u64) -> IrqCounts {
        self.with_irq_masked(|drv| {
            let mut counts = IrqCounts::default();

            // Single read-and-clear against the hardware.
            let status = drv.adapter.ack_interrupts();

            if status.rx_ready {
                counts.rx_frames = drv.receive(now_ns);
            }

            if status.tx_done {
                counts.tx_completed = true;
                // The in-flight transmit completed: disarm the watchdog
                // before offering the stack another send opportunity.
                if let Some(id) = drv.tx_timeout.take() {
                    drv.timers.cancel(id);
                }
                if drv.link_up {
                    drv.poll_stack(now_ns);
                }
            }

            // No outstanding transmit means TX-done causes are noise.
            drv.adapter
                .set_tx_done_reporting(drv.tx_timeout.is_some());

            counts
        })
    }

    /// Fire every timer due at `now_ns`. The embedding calls this from its
    /// timer interrupt (or test harness) with the same virtual clock it
    /// passes to [`interrupt`](Self::interrupt).
    pub fn run_timers(&mut self, now_ns: u64) {
        while let Some(ev) = self.timers.pop_due(now_ns) {
            match ev.payload {
                DriverTimer::Poll => {
                    self.poll_timer = None;
                    self.poll_timer_expired(now_ns);
                }
                DriverTimer::TxTimeout => {
                    // The arm is consumed by firing; re-armed only by a
                    // fresh successful transmit.
                    self.tx_timeout = None;
                    self.tx_timeout_expired(now_ns);
                }
            }
        }
    }

    /// Scoped critical section for this device's interrupt line.
    ///
    /// The line is unmasked on exit only while the interface is up, which
    /// both preserves the `link_up` ⇔ interrupts-enabled invariant and lets
    /// tear-down leave the line masked without a special case.
    fn with_irq_masked<R>(&mut self, body: impl FnOnce(&mut Self) -> R) -> R {
        self.adapter.disable_irq();
        let out = body(self);
        if self.link_up {
            self.adapter.enable_irq();
        }
        out
    }

    /// Drain every pending inbound frame and route it by ethertype.
    ///
    /// Per-frame failures (adapter error, bad size, unknown type) are
    /// counted and skipped; nothing propagates out of the drain loop.
    fn receive(&mut self, now_ns: u64) -> usize {
        let mut drained = 0;

        for _ in 0..self.cfg.max_rx_frames_per_interrupt {
            // Explicit terminal condition: the adapter reports no more
            // pending frames.
            if !self.adapter.rx_pending() {
                break;
            }

            self.buf.clear();
            let len = match self.adapter.receive_into(self.buf.storage_mut()) {
                Ok(len) => len,
                Err(_) => {
                    self.stats.rx_errors += 1;
                    continue;
                }
            };
            drained += 1;

            if len < EthernetHeader::LEN || len > self.buf.capacity() {
                self.stats.rx_dropped += 1;
                continue;
            }
            self.buf.set_len(len);

            // Link gate: frames that arrive while the interface is down are
            // consumed but never reach the stack.
            if !self.link_up {
                self.stats.rx_dropped += 1;
                continue;
            }

            let ethertype = ethernet::ethertype(self.buf.frame());
            if ethertype == Some(EtherType::IPV4) {
                self.stats.rx_frames += 1;
                // Buffer hand-off: the stack owns the contents until input
                // returns; a non-empty buffer afterwards is its reply.
                self.stack.arp_ipin(&mut self.buf);
                self.stack.ipv4_input(&mut self.buf);
                if !self.buf.is_empty() {
                    self.stack.arp_out(&mut self.buf);
                    let _ = self.transmit(now_ns);
                }
            } else if ethertype == Some(EtherType::ARP) {
                self.stats.rx_frames += 1;
                self.stack.arp_input(&mut self.buf);
                if !self.buf.is_empty() {
                    // An ARP reply is already link-layer framed.
                    let _ = self.transmit(now_ns);
                }
            } else {
                self.stats.rx_dropped += 1;
            }
        }

        drained
    }

    /// Hand the buffered frame to the hardware and arm the stall watchdog.
    ///
    /// On a refused submission nothing is in flight, so the watchdog is
    /// left alone; arming it would guarantee a spurious reset.
    fn transmit(&mut self, now_ns: u64) -> std::result::Result<(), AdapterError> {
        match self.adapter.submit_tx(self.buf.frame()) {
            Ok(()) => {
                self.stats.tx_frames += 1;
                if let Some(id) = self.tx_timeout.take() {
                    self.timers.cancel(id);
                }
                self.tx_timeout = Some(
                    self.timers
                        .schedule(now_ns + self.cfg.tx_timeout_ns, DriverTimer::TxTimeout),
                );
                // The hardware owns the frame now.
                self.buf.clear();
                Ok(())
            }
            Err(err) => {
                self.stats.tx_errors += 1;
                self.buf.clear();
                Err(err)
            }
        }
    }

    /// One poll pass: offer the buffer to each active connection until the
    /// stack runs out of connections or the hardware runs out of room.
    fn poll_stack(&mut self, now_ns: u64) {
        // Admission: don't bother the stack if nothing can go out.
        if !self.adapter.tx_ready() {
            return;
        }

        self.buf.clear();
        while self.stack.poll_next(&mut self.buf) {
            if !self.buf.is_empty() {
                self.stack.arp_out(&mut self.buf);
                let _ = self.transmit(now_ns);
                // Only the transmit path ends the pass early: no room for
                // another frame means stop offering.
                if !self.adapter.tx_ready() {
                    break;
                }
            }
            self.buf.clear();
        }
    }

    /// Periodic poll expiry: give the stack its timing tick and a transmit
    /// opportunity, then re-arm. The re-arm is unconditional; skipping it
    /// would silently end all future polling.
    fn poll_timer_expired(&mut self, now_ns: u64) {
        self.with_irq_masked(|drv| {
            if drv.adapter.tx_ready() {
                drv.stack.advance_clocks(drv.cfg.poll_half_seconds);
                drv.poll_stack(now_ns);
            }
            drv.arm_poll_timer(now_ns);
        });
    }

    /// TX watchdog expiry: the admitted transmit never completed. Reset the
    /// hardware to a known-good state and poll once so pending data goes
    /// out again; a fresh transmit re-arms the watchdog.
    fn tx_timeout_expired(&mut self, now_ns: u64) {
        self.with_irq_masked(|drv| {
            drv.stats.tx_timeouts += 1;
            drv.adapter.reset();
            drv.poll_stack(now_ns);
        });
    }

    fn arm_poll_timer(&mut self, now_ns: u64) {
        if let Some(id) = self.poll_timer.take() {
            self.timers.cancel(id);
        }
        self.poll_timer = Some(
            self.timers
                .schedule(now_ns + self.cfg.poll_period_ns, DriverTimer::Poll),
        );
    }
}

impl<H: HardwareAdapter, S: NetworkStack> NetInterface for Driver<H, S> {
    fn if_up(&mut self, now_ns: u64) -> Result<()> {
        if self.link_up {
            return Err(DriverError::AlreadyUp);
        }

        self.adapter.init()?;
        self.arm_poll_timer(now_ns);
        self.link_up = true;
        self.adapter.enable_irq();
        Ok(())
    }

    fn if_down(&mut self) {
        self.with_irq_masked(|drv| {
            // Masked for the whole body so the interrupt handler can never
            // observe half-torn-down state. The guard leaves the line
            // masked because `link_up` is false on exit.
            if let Some(id) = drv.poll_timer.take() {
                drv.timers.cancel(id);
            }
            if let Some(id) = drv.tx_timeout.take() {
                drv.timers.cancel(id);
            }
            if drv.link_up {
                // Quiesce exactly once per up→down transition.
                drv.adapter.reset();
                drv.link_up = false;
            }
        });
    }

    fn tx_available(&mut self, now_ns: u64) {
        // Ignore the notification while the interface is down, without
        // touching the hardware at all. `link_up` is only flipped from task
        // context, so the unmasked read cannot race the handler.
        if !self.link_up {
            return;
        }
        self.with_irq_masked(|drv| {
            if drv.adapter.tx_ready() {
                drv.poll_stack(now_ns);
            }
        });
    }

    fn mac(&self) -> MacAddr {
        self.mac
    }
}
