//! Entry-point for the `concierge` binary.
use clap::Parser;
use concierge_cli::Cli;
use concierge_cli::run_main;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_main(cli).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_cli::Color;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn parses_one_shot_prompt_with_overrides() {
        let cli = Cli::parse_from([
            "concierge",
            "--config",
            "concierge.toml",
            "--base-url",
            "https://chat.example.com",
            "--timeout-ms",
            "50000",
            "--json",
            "What are the prices?",
        ]);

        assert_eq!(cli.config_file, Some(PathBuf::from("concierge.toml")));
        assert_eq!(cli.base_url.as_deref(), Some("https://chat.example.com"));
        assert_eq!(cli.timeout_ms, Some(50_000));
        assert!(cli.json);
        assert_eq!(cli.color, Color::Auto);
        assert_eq!(cli.prompt.as_deref(), Some("What are the prices?"));
    }

    #[test]
    fn no_prompt_means_interactive() {
        let cli = Cli::parse_from(["concierge", "--color", "never"]);
        assert_eq!(cli.prompt, None);
        assert_eq!(cli.color, Color::Never);
        assert!(!cli.json);
    }
}
