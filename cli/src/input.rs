/// What a line typed at the interactive prompt asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum InputCommand {
    Send(String),
    /// `/N`, 1-based index into the suggested prompts.
    Suggestion(usize),
    Quit,
    Ignore,
}

pub(crate) fn parse_input(line: &str) -> InputCommand {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return InputCommand::Ignore;
    }
    if let Some(rest) = trimmed.strip_prefix('/') {
        match rest {
            "quit" | "exit" => return InputCommand::Quit,
            _ => {
                if let Ok(index) = rest.parse::<usize>() {
                    return InputCommand::Suggestion(index);
                }
            }
        }
    }
    InputCommand::Send(trimmed.to_string())
}

/// Resolves a `/N` selection against the configured suggestions.
pub(crate) fn suggestion(prompts: &[String], index: usize) -> Option<&str> {
    index
        .checked_sub(1)
        .and_then(|i| prompts.get(i))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_commands_and_text() {
        assert_eq!(parse_input("   "), InputCommand::Ignore);
        assert_eq!(parse_input("/quit"), InputCommand::Quit);
        assert_eq!(parse_input(" /exit\n"), InputCommand::Quit);
        assert_eq!(parse_input("/2"), InputCommand::Suggestion(2));
        assert_eq!(
            parse_input("  What are the prices?\n"),
            InputCommand::Send("What are the prices?".to_string())
        );
        assert_eq!(
            parse_input("/villas"),
            InputCommand::Send("/villas".to_string())
        );
    }

    #[test]
    fn suggestions_are_one_based() {
        let prompts = vec!["first".to_string(), "second".to_string()];
        assert_eq!(suggestion(&prompts, 1), Some("first"));
        assert_eq!(suggestion(&prompts, 2), Some("second"));
        assert_eq!(suggestion(&prompts, 0), None);
        assert_eq!(suggestion(&prompts, 3), None);
    }
}
