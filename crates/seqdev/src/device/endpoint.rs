use crate::{
    error::TransferError,
    generator::{AtomicSequenceGenerator, SequenceGenerator},
    session::{SessionCursor, UserBuffer, deliver},
};

/// The handler table a host routes reads to.
///
/// Only reads are exposed. Opening a session means creating a
/// [`SessionCursor`]; closing it means dropping the cursor.
pub trait ReadHandler: Send + Sync {
    /// Serves one read of a session.
    ///
    /// # Errors
    /// Returns a [`TransferError`] when `dest` refuses the bytes.
    fn read(
        &self,
        cursor: &mut SessionCursor,
        dest: &mut dyn UserBuffer,
    ) -> Result<usize, TransferError>;
}

/// A counter endpoint: one generator behind the session read protocol.
///
/// Each endpoint owns its own generator, so bringing up a new endpoint is
/// what resets the count to `0`.
#[derive(Debug, Default)]
pub struct Endpoint<G = AtomicSequenceGenerator> {
    generator: G,
}

impl Endpoint {
    /// Creates an endpoint whose first delivered value is `0`.
    pub const fn new() -> Self {
        Self {
            generator: AtomicSequenceGenerator::new(),
        }
    }
}

impl<G> Endpoint<G>
where
    G: SequenceGenerator,
{
    /// Creates an endpoint around an existing generator.
    pub const fn with_generator(generator: G) -> Self {
        Self { generator }
    }

    /// The generator backing this endpoint.
    pub const fn generator(&self) -> &G {
        &self.generator
    }
}

impl<G> ReadHandler for Endpoint<G>
where
    G: SequenceGenerator + Send + Sync,
{
    fn read(
        &self,
        cursor: &mut SessionCursor,
        dest: &mut dyn UserBuffer,
    ) -> Result<usize, TransferError> {
        deliver(&self.generator, cursor, dest)
    }
}
