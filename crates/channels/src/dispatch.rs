//! Round-robin message loop.
//!
//! The dispatcher alternates between two states. While *passing* it sends
//! every message, in order, through one active session and sleeps the
//! configured delay after each attempt. While *rotating* it advances the
//! cursor to the next pooled session and decides whether to stop.
//!
//! Without `loop_forever` the run stops once the cursor wraps back to 0, i.e.
//! after exactly one pass per pooled account. With `loop_forever` the run
//! never stops on its own: only a cancelled token (checked at the pass
//! boundary) or process termination ends it.

use {
    tokio_util::sync::CancellationToken,
    tracing::{debug, info, warn},
};

use crate::{params::DispatchParams, pool::SessionPool};

/// Dispatch failure raised before any message is sent.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("no messages to send")]
    NoMessages,

    #[error("session pool is empty")]
    EmptyPool,
}

/// Callback for progress events out of the dispatcher.
pub type OnDispatchEvent = Box<dyn Fn(DispatchEvent) + Send + Sync>;

/// Progress events, emitted in order. Passes are numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchEvent {
    PassStarted {
        pass: usize,
        cursor: usize,
        account: String,
    },
    MessageSent {
        pass: usize,
        index: usize,
        account: String,
    },
    MessageFailed {
        pass: usize,
        index: usize,
        account: String,
        error: String,
    },
    PassCompleted {
        pass: usize,
        next_cursor: usize,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Every pooled account finished its pass.
    #[default]
    Completed,
    /// The cancellation token fired; the run stopped at a pass boundary.
    Cancelled,
}

/// Summary of a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub passes: usize,
    pub sent: usize,
    pub failed: usize,
    pub outcome: DispatchOutcome,
}

/// Send `messages` to `params.channel_id`, one full pass per active session.
///
/// Send failures are logged and counted, never retried, and never rotate the
/// session mid-pass. The delay follows every attempt, including the last
/// message of a pass.
pub async fn run(
    pool: &SessionPool,
    messages: &[String],
    params: &DispatchParams,
    cancel: &CancellationToken,
    on_event: Option<&OnDispatchEvent>,
) -> Result<DispatchReport, DispatchError> {
    if messages.is_empty() {
        return Err(DispatchError::NoMessages);
    }
    if pool.is_empty() {
        return Err(DispatchError::EmptyPool);
    }

    let emit = |event: DispatchEvent| {
        if let Some(cb) = on_event {
            cb(event);
        }
    };
    let delay_secs = params.delay.as_secs();

    info!(
        channel = %params.channel_id,
        accounts = pool.len(),
        messages = messages.len(),
        delay_secs,
        loop_forever = params.loop_forever,
        "dispatch started"
    );

    let mut report = DispatchReport::default();
    let mut cursor = 0;

    loop {
        let active = pool.get(cursor).ok_or(DispatchError::EmptyPool)?;
        report.passes += 1;
        let pass = report.passes;
        let account = active.display_name();

        debug!(pass, cursor, account, "pass started");
        emit(DispatchEvent::PassStarted {
            pass,
            cursor,
            account: account.to_string(),
        });

        for (index, text) in messages.iter().enumerate() {
            match active.send_text(&params.channel_id, text).await {
                Ok(()) => {
                    report.sent += 1;
                    info!(message = %text, account, delay_secs, "message sent");
                    emit(DispatchEvent::MessageSent {
                        pass,
                        index,
                        account: account.to_string(),
                    });
                },
                Err(e) => {
                    report.failed += 1;
                    warn!(account, error = %e, "failed to send message");
                    emit(DispatchEvent::MessageFailed {
                        pass,
                        index,
                        account: account.to_string(),
                        error: e.to_string(),
                    });
                },
            }
            tokio::time::sleep(params.delay).await;
        }

        cursor = (cursor + 1) % pool.len();
        emit(DispatchEvent::PassCompleted {
            pass,
            next_cursor: cursor,
        });

        if !params.loop_forever && cursor == 0 {
            report.outcome = DispatchOutcome::Completed;
            break;
        }
        if cancel.is_cancelled() {
            report.outcome = DispatchOutcome::Cancelled;
            break;
        }
    }

    info!(
        passes = report.passes,
        sent = report.sent,
        failed = report.failed,
        outcome = ?report.outcome,
        "dispatch finished"
    );
    Ok(report)
}
