use crate::buffer::FrameBuffer;

/// Packet-processing entry points of the IP/ARP stack above the driver.
///
/// The contract for every `*_input` call: the buffer holds the inbound frame
/// on entry, and whatever the stack leaves in it on return (`len > 0`) is an
/// outgoing packet the driver must transmit. A cleared buffer means nothing
/// to send.
///
/// Outgoing traffic is pulled rather than pushed: the driver repeatedly
/// offers the buffer to the stack via [`poll_next`] whenever the hardware
/// can take a frame (after a TX completion, after a stall recovery, on the
/// periodic poll, and on an out-of-band TX-available nudge).
///
/// [`poll_next`]: NetworkStack::poll_next
pub trait NetworkStack {
    /// Process an inbound IPv4 frame. May leave a reply in the buffer.
    fn ipv4_input(&mut self, buf: &mut FrameBuffer);

    /// Process an inbound ARP frame. A reply left in the buffer is already
    /// link-layer framed and must be transmitted as-is.
    fn arp_input(&mut self, buf: &mut FrameBuffer);

    /// Record the sender's link-layer mapping from an inbound IP frame
    /// before it is handed to [`ipv4_input`](NetworkStack::ipv4_input).
    fn arp_ipin(&mut self, buf: &mut FrameBuffer);

    /// Resolve the destination of the outgoing IP packet in the buffer and
    /// prepend its link-layer framing.
    fn arp_out(&mut self, buf: &mut FrameBuffer);

    /// Offer the buffer to the next active connection with outgoing data.
    ///
    /// Returns `false` once every connection has been examined, ending the
    /// driver's poll pass. A `true` return with a non-empty buffer hands
    /// over one outgoing packet (not yet link-layer framed); the driver
    /// resolves and transmits it, and stops the pass early only when the
    /// hardware reports no room for another frame.
    fn poll_next(&mut self, buf: &mut FrameBuffer) -> bool;

    /// Advance the stack's periodic timing state (retransmit clocks and the
    /// like) by the given number of half-second units.
    fn advance_clocks(&mut self, half_second_units: u32);
}

impl<T: NetworkStack + ?Sized> NetworkStack for &mut T {
    fn ipv4_input(&mut self, buf: &mut FrameBuffer) {
        <T as NetworkStack>::ipv4_input(&mut **self, buf);
    }

    fn arp_input(&mut self, buf: &mut FrameBuffer) {
        <T as NetworkStack>::arp_input(&mut **self, buf);
    }

    fn arp_ipin(&mut self, buf: &mut FrameBuffer) {
        <T as NetworkStack>::arp_ipin(&mut **self, buf);
    }

    fn arp_out(&mut self, buf: &mut FrameBuffer) {
        <T as NetworkStack>::arp_out(&mut **self, buf);
    }

    fn poll_next(&mut self, buf: &mut FrameBuffer) -> bool {
        <T as NetworkStack>::poll_next(&mut **self, buf)
    }

    fn advance_clocks(&mut self, half_second_units: u32) {
        <T as NetworkStack>::advance_clocks(&mut **self, half_second_units);
    }
}

impl<T: NetworkStack + ?Sized> NetworkStack for Box<T> {
    fn ipv4_input(&mut self, buf: &mut FrameBuffer) {
        <T as NetworkStack>::ipv4_input(&mut **self, buf);
    }

    fn arp_input(&mut self, buf: &mut FrameBuffer) {
        <T as NetworkStack>::arp_input(&mut **self, buf);
    }

    fn arp_ipin(&mut self, buf: &mut FrameBuffer) {
        <T as NetworkStack>::arp_ipin(&mut **self, buf);
    }

    fn arp_out(&mut self, buf: &mut FrameBuffer) {
        <T as NetworkStack>::arp_out(&mut **self, buf);
    }

    fn poll_next(&mut self, buf: &mut FrameBuffer) -> bool {
        <T as NetworkStack>::poll_next(&mut **self, buf)
    }

    fn advance_clocks(&mut self, half_second_units: u32) {
        <T as NetworkStack>::advance_clocks(&mut **self, half_second_units);
    }
}
