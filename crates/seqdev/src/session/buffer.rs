use crate::error::TransferError;

/// A caller-supplied destination for delivered bytes.
///
/// This is the copy-to-caller primitive the read protocol relies on: it must
/// report failure through [`TransferError`] instead of panicking.
pub trait UserBuffer {
    /// The maximum number of bytes a single copy may write.
    fn capacity(&self) -> usize;

    /// Copies `src` into the destination.
    ///
    /// Callers never pass more than [`Self::capacity`] bytes.
    ///
    /// # Errors
    /// Returns a [`TransferError`] when the destination cannot accept the
    /// bytes. Implementations must not have written a partial result that the
    /// caller is expected to observe.
    fn copy_to_user(&mut self, src: &[u8]) -> Result<(), TransferError>;
}

/// Writes into the prefix of the slice.
impl UserBuffer for [u8] {
    fn capacity(&self) -> usize {
        self.len()
    }

    fn copy_to_user(&mut self, src: &[u8]) -> Result<(), TransferError> {
        self.get_mut(..src.len())
            .ok_or(TransferError::Rejected)?
            .copy_from_slice(src);
        Ok(())
    }
}

impl<const N: usize> UserBuffer for [u8; N] {
    fn capacity(&self) -> usize {
        N
    }

    fn copy_to_user(&mut self, src: &[u8]) -> Result<(), TransferError> {
        self.as_mut_slice().copy_to_user(src)
    }
}

/// Appends to the vector without growing its allocation.
impl UserBuffer for Vec<u8> {
    fn capacity(&self) -> usize {
        Vec::capacity(self) - self.len()
    }

    fn copy_to_user(&mut self, src: &[u8]) -> Result<(), TransferError> {
        if src.len() > <Self as UserBuffer>::capacity(self) {
            return Err(TransferError::Rejected);
        }
        self.extend_from_slice(src);
        Ok(())
    }
}

impl<B> UserBuffer for &mut B
where
    B: UserBuffer + ?Sized,
{
    fn capacity(&self) -> usize {
        (**self).capacity()
    }

    fn copy_to_user(&mut self, src: &[u8]) -> Result<(), TransferError> {
        (**self).copy_to_user(src)
    }
}
