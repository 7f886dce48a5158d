use std::sync::Arc;

use {
    async_trait::async_trait,
    herald_channels::{AccountSession, SessionError, SessionProvider},
    secrecy::{ExposeSecret, Secret},
    serenity::{http::Http, model::id::ChannelId},
    tracing::debug,
};

use crate::error::classify_open;

/// Discord rejects message content longer than this many characters.
pub const MAX_MESSAGE_LEN: usize = 2000;

/// Builds Discord sessions from account tokens.
#[derive(Debug, Clone, Default)]
pub struct DiscordProvider;

impl DiscordProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SessionProvider for DiscordProvider {
    fn id(&self) -> &str {
        "discord"
    }

    async fn authenticate(
        &self,
        token: &Secret<String>,
    ) -> Result<Box<dyn AccountSession>, SessionError> {
        let raw = token.expose_secret().trim();
        if raw.is_empty() {
            return Err(SessionError::Auth("empty token".into()));
        }
        Ok(Box::new(DiscordSession {
            http: Some(Arc::new(Http::new(raw))),
            connected: false,
        }))
    }
}

/// One Discord account, backed by a REST client carrying its token.
pub struct DiscordSession {
    /// `None` once closed.
    http: Option<Arc<Http>>,
    connected: bool,
}

impl std::fmt::Debug for DiscordSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordSession")
            .field("token", &"[REDACTED]")
            .field("connected", &self.connected)
            .field("closed", &self.http.is_none())
            .finish()
    }
}

impl DiscordSession {
    fn http(&self) -> Result<&Arc<Http>, SessionError> {
        self.http
            .as_ref()
            .ok_or_else(|| SessionError::Connection("session is closed".into()))
    }
}

#[async_trait]
impl AccountSession for DiscordSession {
    async fn open(&mut self) -> Result<(), SessionError> {
        let http = self.http()?;
        // The bot gateway endpoint requires a valid token, so it doubles as
        // a credential check.
        let gateway = http.get_bot_gateway().await.map_err(|e| classify_open(&e))?;
        debug!(shards = gateway.shards, "discord gateway reachable");
        self.connected = true;
        Ok(())
    }

    async fn whoami(&self) -> Result<String, SessionError> {
        let user = self
            .http()?
            .get_current_user()
            .await
            .map_err(|e| SessionError::Query(e.to_string()))?;
        Ok(user.name.clone())
    }

    async fn send_text(&self, channel_id: &str, text: &str) -> Result<(), SessionError> {
        let channel = parse_channel_id(channel_id)?;
        check_content(text)?;
        let http = self.http()?;
        channel
            .say(&**http, text)
            .await
            .map_err(|e| SessionError::Send(e.to_string()))?;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), SessionError> {
        if self.http.take().is_some() {
            debug!("discord session closed");
        }
        self.connected = false;
        Ok(())
    }
}

/// Discord channel ids are non-zero 64-bit snowflakes.
pub fn parse_channel_id(raw: &str) -> Result<ChannelId, SessionError> {
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => Err(SessionError::Send(format!("invalid channel id {raw:?}"))),
        Ok(id) => Ok(ChannelId::new(id)),
    }
}

fn check_content(text: &str) -> Result<(), SessionError> {
    let len = text.chars().count();
    if len == 0 {
        return Err(SessionError::Send("message is empty".into()));
    }
    if len > MAX_MESSAGE_LEN {
        return Err(SessionError::Send(format!(
            "message is {len} characters, limit is {MAX_MESSAGE_LEN}"
        )));
    }
    Ok(())
}
