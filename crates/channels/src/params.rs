use std::time::Duration;

/// Rejected run parameter.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParamError {
    #[error("invalid delay {0:?}: expected a whole number of seconds")]
    InvalidDelay(String),

    #[error("channel id must not be empty")]
    EmptyChannel,
}

/// Fixed inputs of one dispatch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchParams {
    pub channel_id: String,
    pub delay: Duration,
    pub loop_forever: bool,
}

impl DispatchParams {
    pub fn new(
        channel_id: impl Into<String>,
        delay: Duration,
        loop_forever: bool,
    ) -> Result<Self, ParamError> {
        let channel_id = channel_id.into().trim().to_string();
        if channel_id.is_empty() {
            return Err(ParamError::EmptyChannel);
        }
        Ok(Self {
            channel_id,
            delay,
            loop_forever,
        })
    }

    /// Parse a delay typed by the user: non-negative whole seconds.
    pub fn parse_delay(input: &str) -> Result<Duration, ParamError> {
        input
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| ParamError::InvalidDelay(input.trim().to_string()))
    }

    /// `y` / `yes` in any case means loop.
    pub fn parse_loop_flag(input: &str) -> bool {
        matches!(input.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}
