use std::io::{self, Write};

use serde::Serialize;

use crate::chat::{MessageSink, OutgoingMessage, SlashCommandDefinition};
use crate::error::WatchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Text,
    Json,
}

/// Stands in for the chat host's message renderer when running from a terminal.
pub struct ConsoleSink {
    mode: OutputMode,
}

impl ConsoleSink {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }
}

impl MessageSink for ConsoleSink {
    fn send(&self, message: &OutgoingMessage) -> Result<(), WatchError> {
        let result = match self.mode {
            OutputMode::Text => print_text(&message.text),
            OutputMode::Json => JsonOutput::print_message(message),
        };
        result.map_err(|err| WatchError::Delivery(err.to_string()))
    }
}

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_message(message: &OutgoingMessage) -> io::Result<()> {
        Self::print_json(message)
    }

    pub fn print_definitions(definitions: &[SlashCommandDefinition]) -> io::Result<()> {
        Self::print_json(&definitions)
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

pub fn print_definitions_text(definitions: &[SlashCommandDefinition]) -> io::Result<()> {
    let mut stdout = io::stdout();
    for definition in definitions {
        let usage = if definition.params_example.is_empty() {
            format!("/{}", definition.command)
        } else {
            format!("/{} {}", definition.command, definition.params_example)
        };
        writeln!(stdout, "{usage:<28} {}", definition.description)?;
    }
    Ok(())
}

fn print_text(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    stdout.write_all(text.as_bytes())?;
    stdout.write_all(b"\n")?;
    Ok(())
}
