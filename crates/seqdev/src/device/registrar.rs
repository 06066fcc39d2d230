use std::sync::Arc;

use crate::{device::ReadHandler, error::RegistrationError};

/// The host's device registration capability.
///
/// A registrar binds a name to a [`ReadHandler`] so that sessions opened on
/// that name are routed to it. How the name becomes visible (a device node,
/// a socket, an in-process map) is up to the implementation.
pub trait Registrar {
    /// Binds `name` to `handler`.
    ///
    /// # Errors
    /// Returns a [`RegistrationError`] when the host cannot bind the name.
    fn register(
        &self,
        name: &str,
        handler: Arc<dyn ReadHandler>,
    ) -> Result<(), RegistrationError>;

    /// Removes the binding for `name`. Unknown names are ignored.
    fn deregister(&self, name: &str);
}

impl<R> Registrar for &R
where
    R: Registrar + ?Sized,
{
    fn register(
        &self,
        name: &str,
        handler: Arc<dyn ReadHandler>,
    ) -> Result<(), RegistrationError> {
        (**self).register(name, handler)
    }

    fn deregister(&self, name: &str) {
        (**self).deregister(name);
    }
}

impl<R> Registrar for Arc<R>
where
    R: Registrar + ?Sized,
{
    fn register(
        &self,
        name: &str,
        handler: Arc<dyn ReadHandler>,
    ) -> Result<(), RegistrationError> {
        (**self).register(name, handler)
    }

    fn deregister(&self, name: &str) {
        (**self).deregister(name);
    }
}
