/// Per-session delivery state.
///
/// Created as [`SessionCursor::Pending`] when a session starts and moved to
/// [`SessionCursor::Delivered`] exactly once, by a successful
/// [`deliver`](crate::session::deliver). Cursors are never shared between
/// sessions and need no synchronization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SessionCursor {
    /// No value has been delivered in this session yet.
    #[default]
    Pending,
    /// A value was delivered; every further read is end of session.
    Delivered,
}

impl SessionCursor {
    /// Returns `true` once the session has handed out its value.
    pub const fn is_delivered(self) -> bool {
        matches!(self, Self::Delivered)
    }
}
