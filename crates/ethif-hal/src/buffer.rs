/// The single packet buffer an interface shares between its receive path,
/// transmit path, and network stack.
///
/// Exactly one frame is in flight at a time. Ownership is transferred by
/// call sequencing, not by reference counting: whoever was handed a
/// `&mut FrameBuffer` owns its contents until the call returns. A non-zero
/// `len` after a stack entry point returns means "a frame is ready to go
/// out"; `clear` hands an empty buffer back.
#[derive(Debug)]
pub struct FrameBuffer {
    data: Box<[u8]>,
    len: usize,
}

impl FrameBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity].into_boxed_slice(),
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Set the length of the frame currently held.
    ///
    /// # Panics
    ///
    /// Panics if `len` exceeds the buffer capacity; callers must bound the
    /// length before handing the frame over.
    pub fn set_len(&mut self, len: usize) {
        assert!(
            len <= self.data.len(),
            "frame length {len} exceeds buffer capacity {}",
            self.data.len()
        );
        self.len = len;
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// The frame currently held.
    pub fn frame(&self) -> &[u8] {
        &self.data[..self.len]
    }

    pub fn frame_mut(&mut self) -> &mut [u8] {
        &mut self.data[..self.len]
    }

    /// The full backing storage, for the adapter to copy an inbound frame
    /// into before the length is known.
    pub fn storage_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Replace the held frame with `bytes`.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is longer than the buffer capacity.
    pub fn load(&mut self, bytes: &[u8]) {
        self.data[..bytes.len()].copy_from_slice(bytes);
        self.len = bytes.len();
    }
}
