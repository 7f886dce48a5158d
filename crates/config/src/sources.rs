//! Line-oriented input files: account tokens and message text.

use std::path::Path;

use {
    anyhow::{Context, Result},
    secrecy::Secret,
    tracing::debug,
};

/// Read a file as trimmed, non-blank lines in file order.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect())
}

/// Load account tokens, one per line.
///
/// An unreadable file or one without any token is an error: there is nothing
/// to authenticate with.
pub fn load_credentials(path: &Path) -> Result<Vec<Secret<String>>> {
    let tokens = read_lines(path).context("failed to read tokens")?;
    if tokens.is_empty() {
        anyhow::bail!("no tokens found in {}", path.display());
    }
    debug!(path = %path.display(), count = tokens.len(), "loaded credentials");
    Ok(tokens.into_iter().map(Secret::new).collect())
}

/// Load the message list. An empty list is returned as-is; the dispatcher
/// decides what an empty run means.
pub fn load_messages(path: &Path) -> Result<Vec<String>> {
    let messages = read_lines(path).context("failed to read messages")?;
    debug!(path = %path.display(), count = messages.len(), "loaded messages");
    Ok(messages)
}
