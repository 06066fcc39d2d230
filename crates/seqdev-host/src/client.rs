//! Reading sessions from a running `seqdev-server`.

use crate::common::{
    error::{Error, Result},
    protocol::{Request, Response, codec},
};
use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{Framed, LengthDelimitedCodec};

/// Largest response frame the client accepts. Payloads are at most one
/// formatted value or a short error message.
const MAX_RESPONSE_LEN: usize = 1024;

/// An open session on a remote counter device.
///
/// Like a file opened on the device node: the first read yields the value,
/// later reads yield nothing.
pub struct RemoteSession<IO> {
    framed: Framed<IO, LengthDelimitedCodec>,
}

impl<IO> RemoteSession<IO>
where
    IO: AsyncRead + AsyncWrite + Unpin,
{
    /// Opens a session on `name` over an established connection.
    ///
    /// # Errors
    /// Returns [`Error::Remote`] if the server refuses the device name.
    pub async fn open(io: IO, name: &str) -> Result<Self> {
        let mut session = Self {
            framed: Framed::new(io, codec(MAX_RESPONSE_LEN)),
        };
        session
            .request(Request::Open {
                name: name.to_owned(),
            })
            .await?
            .into_payload()?;
        Ok(session)
    }

    /// Performs one read with a buffer of `capacity` bytes. An empty result
    /// is end of session.
    ///
    /// # Errors
    /// Returns [`Error::Remote`] when the server reports a failed transfer.
    pub async fn read(&mut self, capacity: u32) -> Result<Bytes> {
        self.request(Request::Read { capacity })
            .await?
            .into_payload()
    }

    /// Reads until end of session, concatenating every chunk.
    ///
    /// # Errors
    /// See [`Self::read`].
    pub async fn read_to_end(&mut self, capacity: u32) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        loop {
            let chunk = self.read(capacity).await?;
            if chunk.is_empty() {
                return Ok(out);
            }
            out.extend_from_slice(&chunk);
        }
    }

    async fn request(&mut self, request: Request) -> Result<Response> {
        self.framed.send(request.encode()).await?;
        let frame = self
            .framed
            .next()
            .await
            .ok_or(Error::ConnectionClosed)??;
        Response::decode(frame.freeze())
    }
}
