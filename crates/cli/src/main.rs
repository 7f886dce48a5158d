mod dispatch_commands;
mod interactive;
mod signals;
#[cfg(test)]
mod testing;

use std::path::PathBuf;

use {
    clap::{Parser, Subcommand},
    herald_channels::SessionPool,
    herald_discord::DiscordProvider,
    tokio::io::BufReader,
    tracing::info,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

use crate::{dispatch_commands::SendArgs, interactive::Prompter, signals::Interrupts};

#[derive(Parser)]
#[command(
    name = "herald",
    about = "Herald: round-robin message sender for multiple Discord accounts"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Only look for herald.{toml,yaml,yml,json} in this directory.
    #[arg(long, global = true, env = "HERALD_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Token file, overrides `sources.tokens_file`.
    #[arg(long, global = true)]
    tokens: Option<PathBuf>,

    /// Message file, overrides `sources.messages_file`.
    #[arg(long, global = true)]
    messages: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Menu-driven session (the default).
    Interactive,
    /// Run the message loop once and exit.
    Send {
        /// Destination channel id; falls back to `dispatch.channel_id`.
        #[arg(long)]
        channel: Option<String>,
        /// Seconds to wait after each message; falls back to `dispatch.delay_secs`.
        #[arg(long)]
        delay: Option<u64>,
        /// Keep rotating through the accounts until interrupted.
        #[arg(long = "loop", conflicts_with = "no_loop")]
        loop_forever: bool,
        /// Stop after one pass per account even if `dispatch.loop_forever` is set.
        #[arg(long)]
        no_loop: bool,
    },
    /// Log in with every token and list the usable accounts.
    Accounts,
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    info!(version = env!("CARGO_PKG_VERSION"), "herald starting");

    if let Some(dir) = &cli.config_dir {
        herald_config::set_config_dir(dir.clone());
    }
    let mut config = herald_config::discover_and_load();
    if let Some(path) = cli.tokens {
        config.sources.tokens_file = path;
    }
    if let Some(path) = cli.messages {
        config.sources.messages_file = path;
    }

    let credentials = herald_config::load_credentials(&config.sources.tokens_file)?;
    let provider = DiscordProvider::new();
    let mut pool = SessionPool::build(&provider, &credentials).await?;
    let interrupts = Interrupts::listen();

    let result = match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => {
            let mut prompter = Prompter::new(
                BufReader::new(tokio::io::stdin()),
                tokio::io::stdout(),
                interrupts,
            );
            interactive::run(&pool, &config, &mut prompter).await
        },
        Commands::Send {
            channel,
            delay,
            loop_forever,
            no_loop,
        } => {
            let args = SendArgs {
                channel,
                delay,
                loop_forever: match (loop_forever, no_loop) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                },
            };
            dispatch_commands::handle_send(&pool, &config, args, &interrupts).await
        },
        Commands::Accounts => {
            dispatch_commands::handle_accounts(&pool);
            Ok(())
        },
    };

    pool.release().await;
    info!("all sessions closed");
    result
}
