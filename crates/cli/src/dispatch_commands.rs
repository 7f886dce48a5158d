use std::{path::Path, time::Duration};

use {
    anyhow::{Context, Result},
    herald_channels::{DispatchParams, DispatchReport, SessionPool, dispatch},
    herald_config::HeraldConfig,
    tokio_util::sync::CancellationToken,
    tracing::warn,
};

use crate::signals::Interrupts;

/// Options of the non-interactive `send` command. `None` falls back to the
/// config.
pub struct SendArgs {
    pub channel: Option<String>,
    pub delay: Option<u64>,
    pub loop_forever: Option<bool>,
}

pub async fn handle_send(
    pool: &SessionPool,
    config: &HeraldConfig,
    args: SendArgs,
    interrupts: &Interrupts,
) -> Result<()> {
    let params = send_params(config, args)?;
    match dispatch_from_file(pool, &config.sources.messages_file, &params, interrupts).await? {
        Some(report) => println!("{}", format_report(&report)),
        None => println!("Run aborted."),
    }
    Ok(())
}

fn send_params(config: &HeraldConfig, args: SendArgs) -> Result<DispatchParams> {
    let channel = args
        .channel
        .or_else(|| config.dispatch.channel_id.clone())
        .context("no channel given: pass --channel or set dispatch.channel_id")?;
    let delay = Duration::from_secs(args.delay.unwrap_or(config.dispatch.delay_secs));
    let loop_forever = args.loop_forever.unwrap_or(config.dispatch.loop_forever);
    Ok(DispatchParams::new(channel, delay, loop_forever)?)
}

pub fn handle_accounts(pool: &SessionPool) {
    println!("{} account(s) logged in:", pool.len());
    for (index, name) in pool.display_names().iter().enumerate() {
        println!("{index:>3}  {name}");
    }
}

pub fn format_report(report: &DispatchReport) -> String {
    format!(
        "Finished ({:?}): {} sent, {} failed over {} pass{}.",
        report.outcome,
        report.sent,
        report.failed,
        report.passes,
        if report.passes == 1 {
            ""
        } else {
            "es"
        }
    )
}

/// Re-read the message file and run the dispatcher on it.
///
/// The first Ctrl-C stops the run at the end of the current pass; a second
/// one abandons it immediately, in which case `None` is returned.
pub async fn dispatch_from_file(
    pool: &SessionPool,
    messages_file: &Path,
    params: &DispatchParams,
    interrupts: &Interrupts,
) -> Result<Option<DispatchReport>> {
    let messages = herald_config::load_messages(messages_file)?;
    let cancel = CancellationToken::new();
    let mut interrupts = interrupts.subscribe();

    let run = dispatch::run(pool, &messages, params, &cancel, None);
    tokio::pin!(run);

    loop {
        tokio::select! {
            result = &mut run => return Ok(Some(result?)),
            () = interrupts.next() => {
                if cancel.is_cancelled() {
                    warn!("second interrupt, abandoning run");
                    return Ok(None);
                }
                cancel.cancel();
                warn!("interrupt received, stopping after the current pass (Ctrl-C again to abort)");
            },
        }
    }
}
