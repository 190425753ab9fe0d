use clap::Parser;
use clap::ValueEnum;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Chat with the property concierge from a terminal.")]
pub struct Cli {
    /// TOML file with concierge settings. Flags below override its values.
    #[arg(long = "config", short = 'c', value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Base URL of the chat backend, e.g. `http://localhost:5000`.
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// How long to wait for a reply before answering with the timeout message.
    #[arg(long = "timeout-ms", value_name = "MILLIS")]
    pub timeout_ms: Option<u64>,

    /// Specifies color settings for use in the output.
    #[arg(long = "color", value_enum, default_value_t = Color::Auto)]
    pub color: Color,

    /// Print the conversation to stdout as JSONL.
    #[arg(long = "json", default_value_t = false)]
    pub json: bool,

    /// Send this one message and exit. Without it, messages are read from
    /// stdin line by line.
    #[arg(value_name = "PROMPT", value_hint = clap::ValueHint::Other)]
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum Color {
    Always,
    Never,
    #[default]
    Auto,
}
