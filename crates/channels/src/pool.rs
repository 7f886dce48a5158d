//! Session pool: the accounts that authenticated successfully, in credential
//! order.

use {
    secrecy::Secret,
    tracing::{debug, info, warn},
};

use crate::provider::{AccountSession, SessionError, SessionProvider};

/// Pool construction failure.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("no usable accounts ({attempted} credentials tried)")]
    NoUsableAccounts { attempted: usize },
}

/// An open account session together with its display name.
pub struct PooledSession {
    handle: Box<dyn AccountSession>,
    display_name: String,
    released: bool,
}

impl PooledSession {
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub async fn send_text(&self, channel_id: &str, text: &str) -> Result<(), SessionError> {
        self.handle.send_text(channel_id, text).await
    }

    /// Close the connection once; later calls do nothing.
    async fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        match self.handle.close().await {
            Ok(()) => debug!(account = %self.display_name, "session closed"),
            Err(e) => warn!(account = %self.display_name, error = %e, "failed to close session"),
        }
    }
}

impl std::fmt::Debug for PooledSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PooledSession")
            .field("display_name", &self.display_name)
            .field("released", &self.released)
            .finish()
    }
}

/// Ordered, non-empty set of open sessions.
#[derive(Debug)]
pub struct SessionPool {
    sessions: Vec<PooledSession>,
}

impl SessionPool {
    /// Authenticate every credential in order and keep the ones that work.
    ///
    /// Accounts failing authentication, connection, or the identity query are
    /// logged and skipped; a session that opened but could not identify itself
    /// is closed before moving on.
    pub async fn build(
        provider: &dyn SessionProvider,
        credentials: &[Secret<String>],
    ) -> Result<Self, PoolError> {
        let mut sessions = Vec::with_capacity(credentials.len());

        for (index, token) in credentials.iter().enumerate() {
            match connect(provider, token).await {
                Ok(session) => {
                    info!(
                        provider = provider.id(),
                        index,
                        account = %session.display_name,
                        "logged in"
                    );
                    sessions.push(session);
                },
                Err(e) => {
                    warn!(
                        provider = provider.id(),
                        index,
                        stage = e.stage(),
                        error = %e,
                        "skipping account"
                    );
                },
            }
        }

        if sessions.is_empty() {
            return Err(PoolError::NoUsableAccounts {
                attempted: credentials.len(),
            });
        }

        info!(
            accounts = sessions.len(),
            skipped = credentials.len() - sessions.len(),
            "session pool ready"
        );
        Ok(Self { sessions })
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Always false for a built pool; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PooledSession> {
        self.sessions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PooledSession> {
        self.sessions.iter()
    }

    pub fn display_names(&self) -> Vec<&str> {
        self.sessions.iter().map(PooledSession::display_name).collect()
    }

    /// Close every session. Best-effort: a failing close is logged and the
    /// rest are still closed. Safe to call more than once.
    pub async fn release(&mut self) {
        for session in &mut self.sessions {
            session.release().await;
        }
    }
}

async fn connect(
    provider: &dyn SessionProvider,
    token: &Secret<String>,
) -> Result<PooledSession, SessionError> {
    let mut handle = provider.authenticate(token).await?;

    if let Err(e) = handle.open().await {
        // Partially opened handles still get a chance to clean up.
        if let Err(close_err) = handle.close().await {
            debug!(error = %close_err, "close after failed open");
        }
        return Err(e);
    }

    match handle.whoami().await {
        Ok(display_name) => Ok(PooledSession {
            handle,
            display_name,
            released: false,
        }),
        Err(e) => {
            if let Err(close_err) = handle.close().await {
                debug!(error = %close_err, "close after failed identity query");
            }
            Err(e)
        },
    }
}
