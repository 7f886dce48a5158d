//! Recording provider and a pool/config harness for the command tests.

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use {
    async_trait::async_trait,
    herald_channels::{AccountSession, SessionError, SessionPool, SessionProvider},
    herald_config::HeraldConfig,
    secrecy::{ExposeSecret, Secret},
};

/// `(account, channel, text)` per delivered message.
pub type Sent = Arc<Mutex<Vec<(String, String, String)>>>;

struct RecordingProvider {
    sent: Sent,
}

struct RecordingSession {
    name: String,
    sent: Sent,
}

#[async_trait]
impl SessionProvider for RecordingProvider {
    fn id(&self) -> &str {
        "recording"
    }

    async fn authenticate(
        &self,
        token: &Secret<String>,
    ) -> Result<Box<dyn AccountSession>, SessionError> {
        Ok(Box::new(RecordingSession {
            name: token.expose_secret().clone(),
            sent: Arc::clone(&self.sent),
        }))
    }
}

#[async_trait]
impl AccountSession for RecordingSession {
    async fn open(&mut self) -> Result<(), SessionError> {
        Ok(())
    }

    async fn whoami(&self) -> Result<String, SessionError> {
        Ok(self.name.clone())
    }

    async fn send_text(&self, channel_id: &str, text: &str) -> Result<(), SessionError> {
        self.sent.lock().unwrap().push((
            self.name.clone(),
            channel_id.to_string(),
            text.to_string(),
        ));
        Ok(())
    }

    async fn close(&mut self) -> Result<(), SessionError> {
        Ok(())
    }
}

pub struct Harness {
    pub pool: SessionPool,
    pub config: HeraldConfig,
    pub sent: Sent,
    _dir: tempfile::TempDir,
}

impl Harness {
    pub fn texts(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(_, _, t)| t.clone())
            .collect()
    }
}

/// Pool of `alice` and `bob`, with `messages` as the message file.
pub async fn harness(messages: &str) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let messages_file: PathBuf = dir.path().join("msg.txt");
    std::fs::write(&messages_file, messages).unwrap();

    let mut config = HeraldConfig::default();
    config.sources.messages_file = messages_file;

    let sent: Sent = Arc::default();
    let provider = RecordingProvider {
        sent: Arc::clone(&sent),
    };
    let tokens: Vec<Secret<String>> = ["alice", "bob"]
        .iter()
        .map(|t| Secret::new(t.to_string()))
        .collect();
    let pool = SessionPool::build(&provider, &tokens).await.unwrap();

    Harness {
        pool,
        config,
        sent,
        _dir: dir,
    }
}
