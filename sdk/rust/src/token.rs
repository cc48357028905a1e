//! Where bearer tokens come from.
//!
//! The client never reaches for a global; whoever builds a [`RelayClient`]
//! decides which provider it gets.
//!
//! [`RelayClient`]: crate::client::RelayClient

/// Capability to fetch the caller's current bearer token.
pub trait TokenProvider: Send + Sync {
    /// The token to send right now, or `None` for an anonymous request.
    fn current_token(&self) -> Option<String>;
}

/// Anonymous caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoToken;

impl TokenProvider for NoToken {
    fn current_token(&self) -> Option<String> {
        None
    }
}

/// A fixed token, e.g. from the command line.
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

impl TokenProvider for StaticToken {
    fn current_token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Any closure works, e.g. one reading the identity provider's live session.
impl<F> TokenProvider for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn current_token(&self) -> Option<String> {
        self()
    }
}
