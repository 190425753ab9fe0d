// stdout carries only the conversation: transcript lines by default, one
// event per line with --json. Logs and the typing indicator go to stderr.
#![deny(clippy::print_stdout)]

mod cli;
mod human_output;
mod input;
pub mod jsonl_output;
mod output;

pub use cli::Cli;
pub use cli::Color;

use anyhow::Context;
use concierge_client::ReqwestTransport;
use concierge_client::build_reqwest_client;
use concierge_core::ChatPanel;
use concierge_core::ConciergeConfig;
use concierge_core::ConversationObserver;
use concierge_core::SessionController;
use std::sync::Arc;
use supports_color::Stream;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tracing::debug;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use crate::human_output::HumanOutput;
use crate::input::InputCommand;
use crate::input::parse_input;
use crate::input::suggestion;
use crate::jsonl_output::JsonlOutput;
use crate::output::TranscriptOutput;

pub async fn run_main(cli: Cli) -> anyhow::Result<()> {
    let (stdout_with_ansi, stderr_with_ansi) = match cli.color {
        Color::Always => (true, true),
        Color::Never => (false, false),
        Color::Auto => (
            supports_color::on_cached(Stream::Stdout).is_some(),
            supports_color::on_cached(Stream::Stderr).is_some(),
        ),
    };

    let default_level = "error";
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(stderr_with_ansi)
        .with_writer(std::io::stderr)
        .with_filter(env_filter);
    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();

    let config = resolve_config(&cli).await?;
    let base_url = config.base_url.clone();
    let user_agent = format!("concierge-cli/{}", env!("CARGO_PKG_VERSION"));
    let transport = ReqwestTransport::new(build_reqwest_client(&user_agent)?);

    let (output, observer) = if cli.json {
        shared_output(JsonlOutput::new())
    } else {
        shared_output(HumanOutput::create_with_ansi(stdout_with_ansi))
    };

    let mut panel = ChatPanel::new(transport, config).with_observer(observer);
    let suggested_prompts = panel.suggested_prompts().to_vec();
    let controller = panel.open();
    info!(session_id = %controller.session_id(), %base_url, "chat session opened");

    match cli.prompt {
        Some(prompt) => {
            output.session_started(&controller.snapshot(), &[]);
            send(controller, output.as_ref(), &prompt).await;
        }
        None => {
            output.session_started(&controller.snapshot(), &suggested_prompts);
            run_interactive(controller, output.as_ref(), &suggested_prompts).await?;
        }
    }
    Ok(())
}

fn shared_output<O: TranscriptOutput + 'static>(
    output: O,
) -> (Arc<dyn TranscriptOutput>, Arc<dyn ConversationObserver>) {
    let output = Arc::new(output);
    (output.clone(), output)
}

/// Loads the config file when one was given, then applies flag overrides.
async fn resolve_config(cli: &Cli) -> anyhow::Result<ConciergeConfig> {
    let mut config = match &cli.config_file {
        Some(path) => ConciergeConfig::load(path)
            .await
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ConciergeConfig::default(),
    };
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.request_timeout_ms = timeout_ms;
    }
    config.validate().context("invalid concierge settings")?;
    Ok(config)
}

async fn send(
    controller: &SessionController<ReqwestTransport>,
    output: &dyn TranscriptOutput,
    text: &str,
) {
    if let Err(err) = controller.submit(text).await {
        output.notice(&err.to_string());
    }
}

async fn run_interactive(
    controller: &SessionController<ReqwestTransport>,
    output: &dyn TranscriptOutput,
    suggested_prompts: &[String],
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("failed to read from stdin")?,
            _ = tokio::signal::ctrl_c() => {
                debug!("interrupted while waiting for input");
                break;
            }
        };
        let Some(line) = line else {
            break;
        };

        let text = match parse_input(&line) {
            InputCommand::Ignore => continue,
            InputCommand::Quit => break,
            InputCommand::Send(text) => text,
            InputCommand::Suggestion(index) => match suggestion(suggested_prompts, index) {
                Some(prompt) => prompt.to_string(),
                None => {
                    output.notice(&format!(
                        "No quick question /{index}; pick 1 to {}.",
                        suggested_prompts.len()
                    ));
                    continue;
                }
            },
        };

        tokio::select! {
            () = send(controller, output, &text) => {}
            _ = tokio::signal::ctrl_c() => {
                debug!("interrupted while waiting for a reply");
                break;
            }
        }
    }
    Ok(())
}
