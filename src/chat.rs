use serde::Serialize;

use crate::error::WatchError;

/// The commands registered with the chat host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlashCommand {
    Datasets,
    Watch,
    Watchlist,
}

impl SlashCommand {
    pub const ALL: [SlashCommand; 3] = [
        SlashCommand::Datasets,
        SlashCommand::Watch,
        SlashCommand::Watchlist,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().trim_start_matches('/');
        Self::ALL
            .into_iter()
            .find(|command| command.name().eq_ignore_ascii_case(name))
    }

    pub fn name(self) -> &'static str {
        match self {
            SlashCommand::Datasets => "datasets",
            SlashCommand::Watch => "watch",
            SlashCommand::Watchlist => "watchlist",
        }
    }

    pub fn definition(self) -> SlashCommandDefinition {
        let (description, params_example) = match self {
            SlashCommand::Datasets => ("List available datasets from Hugging Face", ""),
            SlashCommand::Watch => ("Add a dataset to your watch list", "<dataset_id>"),
            SlashCommand::Watchlist => ("Show your watched datasets", ""),
        };
        SlashCommandDefinition {
            command: self.name(),
            description,
            params_example,
            provides_preview: false,
        }
    }
}

/// What the host needs to register a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlashCommandDefinition {
    pub command: &'static str,
    pub description: &'static str,
    pub params_example: &'static str,
    pub provides_preview: bool,
}

pub fn definitions() -> Vec<SlashCommandDefinition> {
    SlashCommand::ALL
        .into_iter()
        .map(SlashCommand::definition)
        .collect()
}

/// One invocation as delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandContext {
    pub sender: String,
    pub room: String,
    pub command: String,
    pub arguments: Vec<String>,
}

impl CommandContext {
    pub fn new(
        sender: impl Into<String>,
        room: impl Into<String>,
        command: impl Into<String>,
        arguments: Vec<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            room: room.into(),
            command: command.into(),
            arguments,
        }
    }

    /// Parses a raw chat line such as `/watch org/dataset`.
    pub fn parse(
        sender: impl Into<String>,
        room: impl Into<String>,
        line: &str,
    ) -> Result<Self, WatchError> {
        let trimmed = line.trim();
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Err(WatchError::InvalidCommand(trimmed.to_string()));
        };
        let mut parts = rest.split_whitespace();
        let command = parts
            .next()
            .ok_or_else(|| WatchError::InvalidCommand(trimmed.to_string()))?;
        let arguments = parts.map(str::to_string).collect();
        Ok(Self::new(sender, room, command, arguments))
    }
}

/// A rendered reply addressed to the invoking sender and room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingMessage {
    pub sender: String,
    pub room: String,
    pub text: String,
}

/// Delivers rendered replies to the chat host.
pub trait MessageSink {
    fn send(&self, message: &OutgoingMessage) -> Result<(), WatchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_slash_line() {
        let context = CommandContext::parse("alice", "general", "  /watch org/ds extra ").unwrap();
        assert_eq!(context.command, "watch");
        assert_eq!(context.arguments, vec!["org/ds".to_string(), "extra".to_string()]);
    }

    #[test]
    fn parse_rejects_plain_text() {
        assert!(CommandContext::parse("alice", "general", "watch org/ds").is_err());
        assert!(CommandContext::parse("alice", "general", "/").is_err());
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(SlashCommand::from_name("/WatchList"), Some(SlashCommand::Watchlist));
        assert_eq!(SlashCommand::from_name("unwatch"), None);
    }
}
