//! Slash-command grammar for chat mode.
//!
//! Commands arrive either typed at the chat prompt or emitted by the pager
//! command line. Parsing maps them onto [`ChatCommand`]; malformed input
//! yields a usage message instead of a command.

/// A parsed chat-level command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// Open the scrollable message viewer.
    View,
    /// Print the last `n` messages.
    Read(usize),
    /// Summarize the last `n` messages with the LLM.
    Summarize(usize),
    /// Add the last `n` messages to the prompting context.
    Add(usize),
    /// Show the accumulated context.
    Show,
    /// Ask the LLM a question grounded in the accumulated context.
    Prompt,
    /// Clear the accumulated context.
    Clear,
    /// Send a message to the current chat.
    Send,
    /// Return to the dialog list.
    Back,
    /// Print the command list.
    Help,
}

/// Outcome of parsing one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Command(ChatCommand),
    /// Recognized command with bad arguments; contains the usage line.
    Usage(&'static str),
    Unknown,
}

/// Parse one line of chat-mode input.
pub fn parse(input: &str) -> ParseOutcome {
    let mut parts = input.trim().split_whitespace();
    let head = parts.next().unwrap_or("");
    let arg = parts.next();

    match head {
        "/view" => ParseOutcome::Command(ChatCommand::View),
        "/read" => parse_count(arg, "Usage: /read x (where x is a number)", ChatCommand::Read),
        "/summarize" => {
            parse_count(arg, "Usage: /summarize x (where x is a number)", ChatCommand::Summarize)
        }
        "/add" => parse_count(arg, "Usage: /add x (where x is a number)", ChatCommand::Add),
        "/show" => ParseOutcome::Command(ChatCommand::Show),
        "/prompt" => ParseOutcome::Command(ChatCommand::Prompt),
        "/clear" => ParseOutcome::Command(ChatCommand::Clear),
        "/send" => ParseOutcome::Command(ChatCommand::Send),
        "/back" => ParseOutcome::Command(ChatCommand::Back),
        "/help" => ParseOutcome::Command(ChatCommand::Help),
        _ => ParseOutcome::Unknown,
    }
}

fn parse_count(
    arg: Option<&str>,
    usage: &'static str,
    build: impl FnOnce(usize) -> ChatCommand,
) -> ParseOutcome {
    match arg.and_then(|a| a.parse::<usize>().ok()) {
        Some(n) if n > 0 => ParseOutcome::Command(build(n)),
        _ => ParseOutcome::Usage(usage),
    }
}

/// Help text listing the chat-level commands.
pub fn help_text() -> &'static str {
    "\nChat-Level Commands:\n\
     /view         - View messages in this chat\n\
     /read x       - Read the last x messages from this chat\n\
     /summarize x  - Get an AI summary of the last x messages\n\
     /add x        - Add last x messages to the prompting context\n\
     /show         - Show current context\n\
     /prompt       - Send a prompt to the LLM with current context\n\
     /clear        - Clear all stored context\n\
     /send         - Send a message to this chat\n\
     /back         - Return to the main chat selection menu\n\
     /help         - Show this help message\n"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse("/view"), ParseOutcome::Command(ChatCommand::View));
        assert_eq!(parse("/show"), ParseOutcome::Command(ChatCommand::Show));
        assert_eq!(parse("/back"), ParseOutcome::Command(ChatCommand::Back));
        assert_eq!(parse("/help"), ParseOutcome::Command(ChatCommand::Help));
        assert_eq!(parse("  /clear  "), ParseOutcome::Command(ChatCommand::Clear));
    }

    #[test]
    fn test_commands_with_count() {
        assert_eq!(parse("/read 10"), ParseOutcome::Command(ChatCommand::Read(10)));
        assert_eq!(parse("/summarize 25"), ParseOutcome::Command(ChatCommand::Summarize(25)));
        assert_eq!(parse("/add 5"), ParseOutcome::Command(ChatCommand::Add(5)));
    }

    #[test]
    fn test_missing_or_bad_count_reports_usage() {
        assert!(matches!(parse("/read"), ParseOutcome::Usage(u) if u.contains("/read")));
        assert!(matches!(parse("/read ten"), ParseOutcome::Usage(_)));
        assert!(matches!(parse("/summarize -3"), ParseOutcome::Usage(_)));
        assert!(matches!(parse("/add 0"), ParseOutcome::Usage(_)));
    }

    #[test]
    fn test_unknown_commands() {
        assert_eq!(parse("/frobnicate"), ParseOutcome::Unknown);
        assert_eq!(parse("hello"), ParseOutcome::Unknown);
        assert_eq!(parse(""), ParseOutcome::Unknown);
    }

    #[test]
    fn test_help_text_mentions_every_command() {
        let help = help_text();
        for cmd in ["/view", "/read", "/summarize", "/add", "/show", "/prompt", "/clear", "/send", "/back", "/help"] {
            assert!(help.contains(cmd), "help text missing {cmd}");
        }
    }
}
