use std::{fmt, io, sync::Arc};

use crate::{
    device::ReadHandler,
    error::Result,
    session::{SessionCursor, UserBuffer},
};

/// One open session on an endpoint.
///
/// The session owns its cursor, so it yields exactly one value: the first
/// successful read returns the formatted number and every later read returns
/// `0` bytes.
pub struct Session {
    handler: Arc<dyn ReadHandler>,
    cursor: SessionCursor,
}

impl Session {
    /// Opens a session directly on a handler.
    pub fn new(handler: Arc<dyn ReadHandler>) -> Self {
        Self {
            handler,
            cursor: SessionCursor::default(),
        }
    }

    /// Reads into `dest`, returning the number of bytes written.
    ///
    /// # Errors
    /// Returns [`Error::Transfer`] when `dest` refuses the bytes. See
    /// [`deliver`] for what happens to the value drawn for that read.
    ///
    /// [`Error::Transfer`]: crate::error::Error::Transfer
    /// [`deliver`]: crate::session::deliver
    pub fn read(&mut self, dest: &mut dyn UserBuffer) -> Result<usize> {
        Ok(self.handler.read(&mut self.cursor, dest)?)
    }

    /// Whether the session has already delivered its value.
    pub const fn is_exhausted(&self) -> bool {
        self.cursor.is_delivered()
    }

    /// The current cursor state.
    pub const fn cursor(&self) -> SessionCursor {
        self.cursor
    }
}

impl io::Read for Session {
    fn read(&mut self, mut buf: &mut [u8]) -> io::Result<usize> {
        self.handler
            .read(&mut self.cursor, &mut buf)
            .map_err(io::Error::other)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}
