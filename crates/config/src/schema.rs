/// Config schema types (sources, dispatch defaults).
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeraldConfig {
    pub sources: SourcesConfig,
    pub dispatch: DispatchDefaults,
}

/// Where credentials and messages are read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// One account token per line.
    pub tokens_file: PathBuf,

    /// One message per line, re-read on every dispatch.
    pub messages_file: PathBuf,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            tokens_file: PathBuf::from("tokens.txt"),
            messages_file: PathBuf::from("msg.txt"),
        }
    }
}

/// Defaults for non-interactive dispatch runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchDefaults {
    /// Destination channel used when none is given on the command line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,

    /// Seconds to wait after every message.
    pub delay_secs: u64,

    /// Keep cycling through the pool instead of stopping after one rotation.
    pub loop_forever: bool,
}

impl Default for DispatchDefaults {
    fn default() -> Self {
        Self {
            channel_id: None,
            delay_secs: 5,
            loop_forever: false,
        }
    }
}
