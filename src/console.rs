use anyhow::Result;
use cmdtree_core::{CommandDispatcher, CommandSource};
use std::io::{self, BufRead, Write};
use tokio::runtime::Runtime;
use tracing::info;

/// The operator typing at the terminal.
pub struct ConsoleSource {
    name: String,
    principal: Option<String>,
}

impl ConsoleSource {
    pub fn new(name: impl Into<String>, principal: Option<String>) -> ConsoleSource {
        ConsoleSource {
            name: name.into(),
            principal,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reply(&self, message: impl AsRef<str>) {
        println!("{}", message.as_ref());
    }

    pub fn error(&self, message: impl AsRef<str>) {
        eprintln!("{}", message.as_ref());
    }
}

impl CommandSource for ConsoleSource {
    type Principal = String;

    fn principal(&self) -> Option<String> {
        self.principal.clone()
    }
}

/// Reads command lines from stdin until it is closed. A line starting with
/// `?` prints completions for the rest of the line instead of executing it.
pub fn run(
    dispatcher: &CommandDispatcher<ConsoleSource>,
    source: &ConsoleSource,
    runtime: &Runtime,
    log_commands: bool,
) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(partial) = line.strip_prefix('?') {
            let suggestions = runtime.block_on(dispatcher.suggestions(partial, source));
            source.reply(suggestions.join("  "));
            continue;
        }

        if log_commands {
            info!("{} issued command: {}", source.name(), line);
        }
        handle_command(dispatcher, source, line);
    }

    Ok(())
}

fn handle_command(dispatcher: &CommandDispatcher<ConsoleSource>, source: &ConsoleSource, line: &str) {
    if let Err(err) = dispatcher.execute(line, source) {
        source.error(err.to_string());
        if let Some(usage) = dispatcher.usage(line, source) {
            source.error(format!("Usage: {}", usage));
        }
    }
}
