//! Recording mocks shared by the driver integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;

use ethif_core::{Config, Driver, NetInterface};
use ethif_hal::{
    AdapterError, EtherType, EthernetHeader, FrameBuffer, HardwareAdapter, IrqStatus, MacAddr,
    NetworkStack,
};

pub const NS_PER_SEC: u64 = 1_000_000_000;
pub const TEST_MAC: MacAddr = MacAddr([0x52, 0x54, 0x00, 0x12, 0x34, 0x56]);

/// Build an Ethernet frame with fixed test addresses.
pub fn eth_frame(ethertype: u16, payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(EthernetHeader::LEN + payload.len());
    frame.extend_from_slice(&[0x02, 0x00, 0x00, 0x00, 0x00, 0x01]);
    frame.extend_from_slice(&[0x02, 0x00, 0x00, 0x00, 0x00, 0x02]);
    frame.extend_from_slice(&ethertype.to_be_bytes());
    frame.extend_from_slice(payload);
    frame
}

/// The link-layer framing `TestStack::arp_out` prepends to an outgoing IP
/// packet, so tests can assert the exact bytes handed to the adapter.
pub fn resolved(ip_packet: &[u8]) -> Vec<u8> {
    eth_frame(EtherType::IPV4, ip_packet)
}

pub enum RxSlot {
    Frame(Vec<u8>),
    Fault,
}

/// Recording hardware adapter. Inbound frames are queued by the test;
/// everything the driver does to the hardware is logged.
pub struct TestAdapter {
    pub rx: VecDeque<RxSlot>,
    pub tx: Vec<Vec<u8>>,

    /// Admission answer; `tx_room_after_submit` overrides it after each
    /// accepted frame (to model a device filling up).
    pub tx_room: bool,
    pub tx_room_after_submit: Option<bool>,
    pub fail_submit: bool,
    pub fail_attach: bool,

    /// Causes returned (and cleared) by the next `ack_interrupts`.
    pub pending: IrqStatus,

    pub irq_enabled: bool,
    /// Every `enable_irq` (true) / `disable_irq` (false) in call order.
    pub irq_transitions: Vec<bool>,
    pub tx_done_reporting: Vec<bool>,

    pub inits: usize,
    pub resets: usize,
    pub attach_calls: usize,
}

impl TestAdapter {
    pub fn new() -> Self {
        Self {
            rx: VecDeque::new(),
            tx: Vec::new(),
            tx_room: true,
            tx_room_after_submit: None,
            fail_submit: false,
            fail_attach: false,
            pending: IrqStatus::default(),
            irq_enabled: false,
            irq_transitions: Vec::new(),
            tx_done_reporting: Vec::new(),
            inits: 0,
            resets: 0,
            attach_calls: 0,
        }
    }

    pub fn push_rx_frame(&mut self, frame: Vec<u8>) {
        self.rx.push_back(RxSlot::Frame(frame));
    }

    pub fn push_rx_fault(&mut self) {
        self.rx.push_back(RxSlot::Fault);
    }
}

impl HardwareAdapter for TestAdapter {
    fn attach_irq(&mut self) -> Result<(), AdapterError> {
        self.attach_calls += 1;
        if self.fail_attach {
            Err(AdapterError::IrqAttach)
        } else {
            Ok(())
        }
    }

    fn init(&mut self) -> Result<(), AdapterError> {
        self.inits += 1;
        Ok(())
    }

    fn reset(&mut self) {
        self.resets += 1;
    }

    fn read_mac(&mut self) -> MacAddr {
        TEST_MAC
    }

    fn rx_pending(&mut self) -> bool {
        !self.rx.is_empty()
    }

    fn receive_into(&mut self, buf: &mut [u8]) -> Result<usize, AdapterError> {
        match self.rx.pop_front() {
            Some(RxSlot::Frame(frame)) => {
                let n = frame.len().min(buf.len());
                buf[..n].copy_from_slice(&frame[..n]);
                Ok(frame.len())
            }
            Some(RxSlot::Fault) => Err(AdapterError::Hardware),
            None => Err(AdapterError::Hardware),
        }
    }

    fn tx_ready(&mut self) -> bool {
        self.tx_room
    }

    fn submit_tx(&mut self, frame: &[u8]) -> Result<(), AdapterError> {
        if self.fail_submit {
            return Err(AdapterError::Busy);
        }
        self.tx.push(frame.to_vec());
        if let Some(room) = self.tx_room_after_submit {
            self.tx_room = room;
        }
        Ok(())
    }

    fn ack_interrupts(&mut self) -> IrqStatus {
        std::mem::take(&mut self.pending)
    }

    fn enable_irq(&mut self) {
        self.irq_enabled = true;
        self.irq_transitions.push(true);
    }

    fn disable_irq(&mut self) {
        self.irq_enabled = false;
        self.irq_transitions.push(false);
    }

    fn set_tx_done_reporting(&mut self, enabled: bool) {
        self.tx_done_reporting.push(enabled);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackEvent {
    ArpIpin,
    Ipv4Input(Vec<u8>),
    ArpInput(Vec<u8>),
    ArpOut,
    PollNext,
    AdvanceClocks(u32),
}

/// Scripted network stack. Replies and outbound packets are queued by the
/// test; every entry point invocation is recorded in order.
pub struct TestStack {
    pub events: Vec<StackEvent>,

    /// Reply left in the buffer by the next `ipv4_input` (an unframed IP
    /// packet; the driver must `arp_out` it).
    pub ipv4_reply: Option<Vec<u8>>,
    /// Reply left in the buffer by the next `arp_input` (already framed).
    pub arp_reply: Option<Vec<u8>>,
    /// Outgoing IP packets offered one per `poll_next` call.
    pub outbound: VecDeque<Vec<u8>>,
}

impl TestStack {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            ipv4_reply: None,
            arp_reply: None,
            outbound: VecDeque::new(),
        }
    }

    /// Entry points that hand a frame *into* the stack, in call order.
    pub fn inputs(&self) -> Vec<&StackEvent> {
        self.events
            .iter()
            .filter(|ev| matches!(ev, StackEvent::Ipv4Input(_) | StackEvent::ArpInput(_)))
            .collect()
    }

    pub fn count(&self, wanted: impl Fn(&StackEvent) -> bool) -> usize {
        self.events.iter().filter(|ev| wanted(ev)).count()
    }
}

impl NetworkStack for TestStack {
    fn ipv4_input(&mut self, buf: &mut FrameBuffer) {
        self.events.push(StackEvent::Ipv4Input(buf.frame().to_vec()));
        match self.ipv4_reply.take() {
            Some(reply) => buf.load(&reply),
            None => buf.clear(),
        }
    }

    fn arp_input(&mut self, buf: &mut FrameBuffer) {
        self.events.push(StackEvent::ArpInput(buf.frame().to_vec()));
        match self.arp_reply.take() {
            Some(reply) => buf.load(&reply),
            None => buf.clear(),
        }
    }

    fn arp_ipin(&mut self, _buf: &mut FrameBuffer) {
        self.events.push(StackEvent::ArpIpin);
    }

    fn arp_out(&mut self, buf: &mut FrameBuffer) {
        self.events.push(StackEvent::ArpOut);
        let framed = resolved(buf.frame());
        buf.load(&framed);
    }

    fn poll_next(&mut self, buf: &mut FrameBuffer) -> bool {
        self.events.push(StackEvent::PollNext);
        match self.outbound.pop_front() {
            Some(packet) => {
                buf.load(&packet);
                true
            }
            None => false,
        }
    }

    fn advance_clocks(&mut self, half_second_units: u32) {
        self.events.push(StackEvent::AdvanceClocks(half_second_units));
    }
}

pub fn new_driver() -> Driver<TestAdapter, TestStack> {
    new_driver_with(Config::default())
}

pub fn new_driver_with(cfg: Config) -> Driver<TestAdapter, TestStack> {
    Driver::initialize(TestAdapter::new(), TestStack::new(), cfg).unwrap()
}

/// A driver already brought up at t=0.
pub fn up_driver() -> Driver<TestAdapter, TestStack> {
    let mut driver = new_driver();
    driver.if_up(0).unwrap();
    driver
}

pub fn up_driver_with(cfg: Config) -> Driver<TestAdapter, TestStack> {
    let mut driver = new_driver_with(cfg);
    driver.if_up(0).unwrap();
    driver
}
