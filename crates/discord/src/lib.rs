//! Discord session provider.
//!
//! Accounts are driven through Discord's REST API with `serenity::http::Http`;
//! no gateway shard is started since the dispatcher only posts messages.

pub mod error;
pub mod provider;

pub use provider::{DiscordProvider, DiscordSession, MAX_MESSAGE_LEN};
