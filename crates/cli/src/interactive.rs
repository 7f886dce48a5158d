//! Prompt-driven menu: pick a channel, delay and loop mode, then dispatch.

use {
    anyhow::Result,
    herald_channels::{DispatchParams, SessionPool},
    herald_config::HeraldConfig,
    tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt},
    tracing::{info, warn},
};

use crate::{
    dispatch_commands::{dispatch_from_file, format_report},
    signals::Interrupts,
};

/// Line-based prompt over any async reader/writer pair. Ctrl-C while waiting
/// for a line counts as end of input.
pub struct Prompter<R, W> {
    input: R,
    output: W,
    interrupts: Interrupts,
}

impl<R, W> Prompter<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, output: W, interrupts: Interrupts) -> Self {
        Self {
            input,
            output,
            interrupts,
        }
    }

    /// Print `prompt` and read one trimmed line. `None` on end of input or
    /// Ctrl-C.
    pub async fn ask(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        self.output.write_all(prompt.as_bytes()).await?;
        self.output.flush().await?;
        self.interrupts.reset();

        let mut line = String::new();
        tokio::select! {
            read = self.input.read_line(&mut line) => {
                if read? == 0 {
                    return Ok(None);
                }
            },
            () = self.interrupts.next() => {
                info!("interrupted at prompt");
                self.say("\nInterrupted.").await?;
                return Ok(None);
            },
        }
        Ok(Some(line.trim().to_string()))
    }

    pub async fn say(&mut self, text: &str) -> std::io::Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await
    }
}

enum Step {
    Continue,
    Quit,
}

/// Run the menu until the user exits or input ends.
pub async fn run<R, W>(
    pool: &SessionPool,
    config: &HeraldConfig,
    prompter: &mut Prompter<R, W>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    prompter
        .say(&format!(
            "Welcome to herald ({} account(s): {})",
            pool.len(),
            pool.display_names().join(", ")
        ))
        .await?;

    loop {
        prompter
            .say("\nChoose option:\n1. Send message to channel\n2. Exit")
            .await?;
        let Some(choice) = prompter.ask("Your choice: ").await? else {
            return Ok(());
        };

        match choice.as_str() {
            "1" => {
                if let Step::Quit = send(pool, config, prompter).await? {
                    return Ok(());
                }
            },
            "2" => {
                prompter.say("Exiting program. Goodbye!").await?;
                return Ok(());
            },
            _ => prompter.say("Invalid choice. Please try again.").await?,
        }
    }
}

async fn send<R, W>(
    pool: &SessionPool,
    config: &HeraldConfig,
    prompter: &mut Prompter<R, W>,
) -> Result<Step>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let Some(channel) = prompter.ask("Input channel ID: ").await? else {
        return Ok(Step::Quit);
    };
    let Some(raw_delay) = prompter.ask("Input delay (sec): ").await? else {
        return Ok(Step::Quit);
    };
    let delay = match DispatchParams::parse_delay(&raw_delay) {
        Ok(delay) => delay,
        Err(e) => {
            warn!(error = %e, "invalid delay input");
            prompter.say(&e.to_string()).await?;
            return Ok(Step::Continue);
        },
    };
    let Some(raw_loop) = prompter.ask("loop ? (y/n): ").await? else {
        return Ok(Step::Quit);
    };

    let loop_forever = DispatchParams::parse_loop_flag(&raw_loop);
    let params = match DispatchParams::new(channel, delay, loop_forever) {
        Ok(params) => params,
        Err(e) => {
            warn!(error = %e, "invalid run parameters");
            prompter.say(&e.to_string()).await?;
            return Ok(Step::Continue);
        },
    };

    let outcome = dispatch_from_file(
        pool,
        &config.sources.messages_file,
        &params,
        &prompter.interrupts,
    )
    .await;
    match outcome {
        Ok(Some(report)) => prompter.say(&format_report(&report)).await?,
        Ok(None) => prompter.say("Run aborted.").await?,
        Err(e) => {
            warn!(error = %e, "error in message loop");
            prompter.say(&format!("Error: {e:#}")).await?;
        },
    }
    Ok(Step::Continue)
}
