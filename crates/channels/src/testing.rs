//! In-memory provider used by the unit tests.
//!
//! The token doubles as the display name. Prefixes select failure modes:
//! `bad*` fails authentication, `offline*` fails to open, `anon*` fails the
//! identity query, `mute*` fails every send, `*sticky*` fails to close.

use std::sync::{Arc, Mutex};

use {
    async_trait::async_trait,
    secrecy::{ExposeSecret, Secret},
};

use crate::provider::{AccountSession, SessionError, SessionProvider};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Attempt {
    pub account: String,
    pub channel: String,
    pub text: String,
    pub delivered: bool,
    pub at: tokio::time::Instant,
}

#[derive(Debug, Default)]
pub(crate) struct Journal {
    pub attempts: Vec<Attempt>,
    pub opened: Vec<String>,
    pub closed: Vec<String>,
}

#[derive(Clone, Default)]
pub(crate) struct FakeProvider {
    pub journal: Arc<Mutex<Journal>>,
    /// Message texts that fail regardless of sender.
    pub failing_texts: Vec<String>,
}

impl FakeProvider {
    pub fn failing_on(texts: &[&str]) -> Self {
        Self {
            failing_texts: texts.iter().map(|t| t.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn attempts(&self) -> Vec<Attempt> {
        self.journal.lock().unwrap().attempts.clone()
    }

    pub fn senders(&self) -> Vec<String> {
        self.attempts().into_iter().map(|a| a.account).collect()
    }

    pub fn opened(&self) -> Vec<String> {
        self.journal.lock().unwrap().opened.clone()
    }

    pub fn closed(&self) -> Vec<String> {
        self.journal.lock().unwrap().closed.clone()
    }
}

pub(crate) fn tokens(raw: &[&str]) -> Vec<Secret<String>> {
    raw.iter().map(|t| Secret::new(t.to_string())).collect()
}

#[async_trait]
impl SessionProvider for FakeProvider {
    fn id(&self) -> &str {
        "fake"
    }

    async fn authenticate(
        &self,
        token: &Secret<String>,
    ) -> Result<Box<dyn AccountSession>, SessionError> {
        let name = token.expose_secret().clone();
        if name.starts_with("bad") {
            return Err(SessionError::Auth(format!("token {name} rejected")));
        }
        Ok(Box::new(FakeSession {
            name,
            open: false,
            provider: self.clone(),
        }))
    }
}

struct FakeSession {
    name: String,
    open: bool,
    provider: FakeProvider,
}

#[async_trait]
impl AccountSession for FakeSession {
    async fn open(&mut self) -> Result<(), SessionError> {
        if self.name.starts_with("offline") {
            return Err(SessionError::Connection("gateway unreachable".into()));
        }
        self.open = true;
        self.provider
            .journal
            .lock()
            .unwrap()
            .opened
            .push(self.name.clone());
        Ok(())
    }

    async fn whoami(&self) -> Result<String, SessionError> {
        if self.name.starts_with("anon") {
            return Err(SessionError::Query("user lookup failed".into()));
        }
        Ok(self.name.clone())
    }

    async fn send_text(&self, channel_id: &str, text: &str) -> Result<(), SessionError> {
        assert!(self.open, "send on a closed session");
        let delivered = !self.name.starts_with("mute")
            && !self.provider.failing_texts.iter().any(|t| t == text);
        self.provider.journal.lock().unwrap().attempts.push(Attempt {
            account: self.name.clone(),
            channel: channel_id.to_string(),
            text: text.to_string(),
            delivered,
            at: tokio::time::Instant::now(),
        });
        if delivered {
            Ok(())
        } else {
            Err(SessionError::Send("missing permissions".into()))
        }
    }

    async fn close(&mut self) -> Result<(), SessionError> {
        // Recorded even for sessions that never opened.
        self.open = false;
        self.provider
            .journal
            .lock()
            .unwrap()
            .closed
            .push(self.name.clone());
        if self.name.contains("sticky") {
            return Err(SessionError::Connection("close handshake timed out".into()));
        }
        Ok(())
    }
}
