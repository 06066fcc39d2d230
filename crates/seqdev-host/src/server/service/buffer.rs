use bytes::{BufMut, Bytes, BytesMut};
use seqdev::{TransferError, session::UserBuffer};

/// Collects the bytes a read delivers, up to the client's requested
/// capacity, ready to be sent back as a response payload.
#[derive(Debug)]
pub struct FrameBuffer {
    bytes: BytesMut,
    limit: usize,
}

impl FrameBuffer {
    pub fn new(limit: usize) -> Self {
        Self {
            bytes: BytesMut::with_capacity(limit.min(seqdev::session::SCRATCH_LEN)),
            limit,
        }
    }

    pub fn into_bytes(self) -> Bytes {
        self.bytes.freeze()
    }
}

impl UserBuffer for FrameBuffer {
    fn capacity(&self) -> usize {
        self.limit - self.bytes.len()
    }

    fn copy_to_user(&mut self, src: &[u8]) -> Result<(), TransferError> {
        if src.len() > UserBuffer::capacity(self) {
            return Err(TransferError::Rejected);
        }
        self.bytes.put_slice(src);
        Ok(())
    }
}
