use std::{collections::HashMap, fmt, sync::Arc};

use parking_lot::RwLock;

use crate::{
    device::{ReadHandler, Registrar},
    error::{Error, RegistrationError, Result},
    registry::Session,
};

/// A name-to-endpoint table shared by everyone in the process.
///
/// The lock is held only while looking up or changing the table, never while
/// a session reads.
#[derive(Default)]
pub struct LocalRegistry {
    endpoints: RwLock<HashMap<String, Arc<dyn ReadHandler>>>,
}

impl LocalRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new session on the endpoint registered as `name`.
    ///
    /// # Errors
    /// Returns [`Error::NoSuchDevice`] if nothing is registered under `name`.
    pub fn open(&self, name: &str) -> Result<Session> {
        let handler = self
            .endpoints
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::NoSuchDevice(name.to_owned()))?;
        Ok(Session::new(handler))
    }

    /// Whether an endpoint is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.endpoints.read().contains_key(name)
    }

    /// Number of registered endpoints.
    pub fn len(&self) -> usize {
        self.endpoints.read().len()
    }

    /// Whether no endpoint is registered.
    pub fn is_empty(&self) -> bool {
        self.endpoints.read().is_empty()
    }
}

impl Registrar for LocalRegistry {
    fn register(
        &self,
        name: &str,
        handler: Arc<dyn ReadHandler>,
    ) -> core::result::Result<(), RegistrationError> {
        if name.is_empty() || name.contains('/') {
            return Err(RegistrationError::InvalidName);
        }

        let mut endpoints = self.endpoints.write();
        if endpoints.contains_key(name) {
            return Err(RegistrationError::NameTaken);
        }
        endpoints.insert(name.to_owned(), handler);

        #[cfg(feature = "tracing")]
        tracing::debug!(device = name, "endpoint registered");
        Ok(())
    }

    fn deregister(&self, name: &str) {
        let _removed = self.endpoints.write().remove(name);

        #[cfg(feature = "tracing")]
        if _removed.is_some() {
            tracing::debug!(device = name, "endpoint deregistered");
        }
    }
}

impl fmt::Debug for LocalRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let endpoints = self.endpoints.read();
        let mut names: Vec<&str> = endpoints.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("LocalRegistry")
            .field("endpoints", &names)
            .finish()
    }
}
