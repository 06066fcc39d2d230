//! Session service for the counter device.
//!
//! [`DeviceService`] serves one device session per connection:
//!
//! 1. The first frame must be `Open { name }`. The service looks the name up
//!    in the shared [`LocalRegistry`] and acknowledges, or answers
//!    `NoSuchDevice` and closes.
//! 2. Every following `Read { capacity }` frame is one read on the session.
//!    The first read returns the formatted value, truncated to the
//!    capacity; every later read returns an empty payload (end of session).
//! 3. The session ends when the client disconnects or the service shuts
//!    down.
//!
//! The registry lock is only taken to open the session; reads go straight to
//! the endpoint.

use crate::{
    common::{
        error::Result,
        protocol::{MAX_REQUEST_LEN, Request, Response, Status, codec},
    },
    server::{config::ServerConfig, service::buffer::FrameBuffer},
};
use bytes::Bytes;
use core::time::Duration;
use futures::{SinkExt, StreamExt};
use seqdev::registry::{LocalRegistry, Session};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use tokio::{
    io::{AsyncRead, AsyncWrite},
    time::{sleep, timeout},
};
use tokio_util::{
    codec::{Framed, LengthDelimitedCodec},
    sync::CancellationToken,
};

/// Shared state of a running service.
struct ServiceState {
    shutdown: CancellationToken,
    sessions_inflight: AtomicUsize,
}

/// Serves counter sessions over framed connections.
///
/// Cloning is cheap; all clones share the registry and shutdown state.
#[derive(Clone)]
pub struct DeviceService {
    config: ServerConfig,
    registry: Arc<LocalRegistry>,
    state: Arc<ServiceState>,
}

/// Keeps the in-flight session count accurate however a session ends.
struct InflightGuard<'a>(&'a AtomicUsize);

impl<'a> InflightGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::Relaxed);
        Self(counter)
    }
}

impl Drop for InflightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }
}

impl DeviceService {
    pub fn new(config: ServerConfig, registry: Arc<LocalRegistry>) -> Self {
        Self {
            config,
            registry,
            state: Arc::new(ServiceState {
                shutdown: CancellationToken::new(),
                sessions_inflight: AtomicUsize::new(0),
            }),
        }
    }

    /// Number of connections currently being served.
    pub fn sessions_inflight(&self) -> usize {
        self.state.sessions_inflight.load(Ordering::Relaxed)
    }

    pub fn is_shutting_down(&self) -> bool {
        self.state.shutdown.is_cancelled()
    }

    /// Serves one connection as one session until the client disconnects or
    /// the service shuts down.
    ///
    /// # Errors
    /// Returns an error if the socket fails or a frame exceeds
    /// [`MAX_REQUEST_LEN`]. Malformed requests are answered with
    /// [`Status::BadRequest`] instead.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, _connection, io), fields(connection = _connection))
    )]
    pub async fn serve<IO>(&self, _connection: u64, io: IO) -> Result<()>
    where
        IO: AsyncRead + AsyncWrite + Unpin,
    {
        if self.is_shutting_down() {
            return Ok(());
        }

        let _inflight = InflightGuard::enter(&self.state.sessions_inflight);
        let mut framed = Framed::new(io, codec(MAX_REQUEST_LEN));

        let Some(mut session) = self.open_session(&mut framed).await? else {
            return Ok(());
        };

        loop {
            let frame = tokio::select! {
                () = self.state.shutdown.cancelled() => break,
                frame = framed.next() => frame,
            };
            let Some(frame) = frame.transpose()? else {
                break;
            };

            let response = match Request::decode(&frame) {
                Ok(Request::Read { capacity }) => self.read(&mut session, capacity),
                Ok(Request::Open { .. }) => {
                    Response::failure(Status::BadRequest, "a session is already open")
                }
                Err(err) => Response::failure(Status::BadRequest, err.to_string()),
            };
            framed.send(response.encode()).await?;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(exhausted = session.is_exhausted(), "session closed");
        Ok(())
    }

    async fn open_session<IO>(
        &self,
        framed: &mut Framed<IO, LengthDelimitedCodec>,
    ) -> Result<Option<Session>>
    where
        IO: AsyncRead + AsyncWrite + Unpin,
    {
        let frame = tokio::select! {
            () = self.state.shutdown.cancelled() => return Ok(None),
            frame = framed.next() => frame,
        };
        let Some(frame) = frame.transpose()? else {
            return Ok(None);
        };

        let (response, session) = match Request::decode(&frame) {
            Ok(Request::Open { name }) => match self.registry.open(&name) {
                Ok(session) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(device = %name, "session opened");
                    (Response::ok(Bytes::new()), Some(session))
                }
                Err(err) => (
                    Response::failure(Status::NoSuchDevice, err.to_string()),
                    None,
                ),
            },
            Ok(Request::Read { .. }) => (
                Response::failure(Status::BadRequest, "open a device before reading"),
                None,
            ),
            Err(err) => (Response::failure(Status::BadRequest, err.to_string()), None),
        };

        framed.send(response.encode()).await?;
        Ok(session)
    }

    fn read(&self, session: &mut Session, capacity: u32) -> Response {
        let limit = (capacity as usize).min(self.config.max_read_capacity);
        let mut dest = FrameBuffer::new(limit);

        match session.read(&mut dest) {
            Ok(_) => Response::ok(dest.into_bytes()),
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %err, "read failed, issued value lost");
                Response::failure(Status::TransferFailed, err.to_string())
            }
        }
    }

    /// Stops serving and waits for open sessions to drain.
    ///
    /// Cancels every session loop, then waits up to the configured shutdown
    /// timeout for their connections to finish.
    pub async fn shutdown(&self) {
        #[cfg(feature = "tracing")]
        tracing::info!(
            "Closing sessions ({} active)",
            self.sessions_inflight()
        );
        self.state.shutdown.cancel();

        let drain = timeout(Duration::from_secs(self.config.shutdown_timeout), async {
            while self.sessions_inflight() > 0 {
                sleep(Duration::from_millis(50)).await;
            }
        })
        .await;

        match drain {
            Ok(()) => {
                #[cfg(feature = "tracing")]
                tracing::debug!("All sessions drained");
            }
            Err(_) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    "Graceful drain timed out ({} sessions still active)",
                    self.sessions_inflight()
                );
            }
        }
    }
}
