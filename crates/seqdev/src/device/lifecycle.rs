use std::sync::Arc;

use crate::{
    device::{Endpoint, ReadHandler, Registrar},
    error::{Error, Result},
};

/// Name the counter endpoint is registered under unless configured otherwise.
pub const DEFAULT_DEVICE_NAME: &str = "test-counter";

/// The counter component and its load/unload lifecycle.
///
/// A device starts inactive. [`Self::init`] registers a fresh endpoint whose
/// count starts at `0`; [`Self::teardown`] removes it. Dropping the device
/// tears it down.
///
/// Sessions opened before a teardown hold their own reference to the old
/// endpoint and keep working; new sessions can no longer reach it.
///
/// # Example
/// ```
/// use seqdev::{device::CounterDevice, registry::LocalRegistry};
/// use std::io::read_to_string;
///
/// let registry = LocalRegistry::new();
/// let mut device = CounterDevice::new(&registry);
/// device.init()?;
///
/// let session = registry.open(device.name())?;
/// assert_eq!(read_to_string(session).unwrap(), "0\n");
/// # Ok::<(), seqdev::Error>(())
/// ```
#[derive(Debug)]
pub struct CounterDevice<R>
where
    R: Registrar,
{
    name: String,
    registrar: R,
    active: bool,
}

impl<R> CounterDevice<R>
where
    R: Registrar,
{
    /// Creates an inactive device named [`DEFAULT_DEVICE_NAME`].
    pub fn new(registrar: R) -> Self {
        Self::with_name(DEFAULT_DEVICE_NAME, registrar)
    }

    /// Creates an inactive device that registers under `name`.
    pub fn with_name(name: impl Into<String>, registrar: R) -> Self {
        Self {
            name: name.into(),
            registrar,
            active: false,
        }
    }

    /// The endpoint name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the endpoint is currently registered.
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Brings the counter to `0` and registers the endpoint.
    ///
    /// Calling this on an active device replaces its endpoint with a fresh
    /// one, so the next session again receives `0`.
    ///
    /// # Errors
    /// Returns [`Error::Registration`] if the registrar refuses the name. The
    /// device is left inactive.
    pub fn init(&mut self) -> Result<()> {
        #[cfg(feature = "tracing")]
        tracing::info!(device = %self.name, "loading counter device");

        if self.active {
            self.registrar.deregister(&self.name);
            self.active = false;
        }

        let endpoint: Arc<dyn ReadHandler> = Arc::new(Endpoint::new());
        self.registrar
            .register(&self.name, endpoint)
            .map_err(|source| {
                #[cfg(feature = "tracing")]
                tracing::error!(device = %self.name, error = %source, "registration failed");
                Error::Registration {
                    name: self.name.clone(),
                    source,
                }
            })?;

        self.active = true;
        Ok(())
    }

    /// Deregisters the endpoint. Does nothing on an inactive device.
    pub fn teardown(&mut self) {
        if !self.active {
            return;
        }

        #[cfg(feature = "tracing")]
        tracing::info!(device = %self.name, "unloading counter device");

        self.registrar.deregister(&self.name);
        self.active = false;
    }
}

impl<R> Drop for CounterDevice<R>
where
    R: Registrar,
{
    fn drop(&mut self) {
        self.teardown();
    }
}
