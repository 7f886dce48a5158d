use {async_trait::async_trait, secrecy::Secret};

/// Failure reported by a session provider.
///
/// The variant records which step failed so the pool builder can log it and
/// skip the account without inspecting error text.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The credential was rejected.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The platform could not be reached or the connection dropped.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The account's identity could not be fetched.
    #[error("identity query failed: {0}")]
    Query(String),

    /// A message could not be delivered.
    #[error("send failed: {0}")]
    Send(String),
}

impl SessionError {
    /// Short label for the failing step, used as a log field.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Auth(_) => "auth",
            Self::Connection(_) => "connection",
            Self::Query(_) => "query",
            Self::Send(_) => "send",
        }
    }
}

/// Produces account sessions from opaque credentials. Each chat platform
/// implements this.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Platform identifier (e.g. "discord").
    fn id(&self) -> &str;

    /// Validate a credential and build a session handle. The handle is not
    /// connected until [`AccountSession::open`] succeeds.
    async fn authenticate(
        &self,
        token: &Secret<String>,
    ) -> Result<Box<dyn AccountSession>, SessionError>;
}

/// One authenticated account on a chat platform.
#[async_trait]
pub trait AccountSession: Send + Sync {
    /// Establish the connection.
    async fn open(&mut self) -> Result<(), SessionError>;

    /// Display name of the account behind this session.
    async fn whoami(&self) -> Result<String, SessionError>;

    /// Post `text` to `channel_id`.
    async fn send_text(&self, channel_id: &str, text: &str) -> Result<(), SessionError>;

    /// Release the connection. Calling this on a closed session is a no-op.
    async fn close(&mut self) -> Result<(), SessionError>;
}
