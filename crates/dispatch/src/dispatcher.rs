use crate::{
    argument_set::ArgumentSet,
    builder::{CommandBuilder, NodeKind},
    context::{CommandContext, SuggestionContext},
    error::DispatchError,
    parser::{self, ParseResult},
    usage,
};
use itertools::Itertools;
use tracing::debug;

/// Which kind of host a command is meant to be available on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationEnvironment {
    All,
    Dedicated,
    Integrated,
}

impl RegistrationEnvironment {
    pub fn includes(self, other: RegistrationEnvironment) -> bool {
        self == RegistrationEnvironment::All || other == RegistrationEnvironment::All || self == other
    }
}

pub struct CommandDispatcher<S> {
    environment: RegistrationEnvironment,
    roots: Vec<CommandBuilder<S>>,
}

impl<S> CommandDispatcher<S> {
    pub fn new(environment: RegistrationEnvironment) -> Self {
        Self {
            environment,
            roots: Vec::new(),
        }
    }

    pub fn environment(&self) -> RegistrationEnvironment {
        self.environment
    }

    /// Adds a top-level command. Only literal nodes can be roots; a root with
    /// the same name as an existing one is merged into it.
    pub fn register(
        &mut self,
        command: CommandBuilder<S>,
        environment: RegistrationEnvironment,
    ) -> Result<(), DispatchError> {
        if !command.is_literal() {
            return Err(DispatchError::NotLiteralRoot {
                name: command.name().to_string(),
            });
        }

        if !environment.includes(self.environment) {
            debug!(
                "Skipping /{} registered for {:?} on a {:?} dispatcher",
                command.name(),
                environment,
                self.environment
            );
            return Ok(());
        }

        match self
            .roots
            .iter_mut()
            .find(|root| root.name() == command.name())
        {
            Some(existing) => existing.merge(command),
            None => self.roots.push(command),
        }
        Ok(())
    }

    pub fn roots(&self) -> &[CommandBuilder<S>] {
        &self.roots
    }

    pub fn root(&self, name: &str) -> Option<&CommandBuilder<S>> {
        self.roots.iter().find(|root| root.name() == name)
    }

    pub fn parse<'a>(&'a self, command_line: &str, source: &S) -> ParseResult<'a, S> {
        parser::parse(&self.roots, source, strip_slash(command_line))
    }

    pub fn execute(&self, command_line: &str, source: &S) -> Result<i32, DispatchError> {
        let command_line = strip_slash(command_line.trim());

        match parser::parse(&self.roots, source, command_line) {
            ParseResult::Success {
                node, arguments, ..
            } => {
                let Some(command) = node.command() else {
                    unreachable!("Node must have executor to be parsed successfully")
                };
                let ctx = CommandContext::new(source, command_line, ArgumentSet::new(arguments));
                Ok(command(&ctx))
            }
            ParseResult::Partial { path, .. } => Err(DispatchError::Incomplete {
                path: usage::generate_base_name(&path),
            }),
            ParseResult::TooManyArguments { remaining, .. } => {
                Err(DispatchError::TooManyArguments { remaining })
            }
            ParseResult::InvalidArgument { remaining, .. } => {
                Err(DispatchError::InvalidArgument { remaining })
            }
            ParseResult::NothingMatched => Err(DispatchError::UnknownCommand),
        }
    }

    /// Usage for the deepest node `command_line` reaches, if it reaches any.
    pub fn usage(&self, command_line: &str, source: &S) -> Option<String> {
        let result = self.parse(command_line.trim(), source);
        let path = result.path();
        if path.is_empty() {
            return None;
        }
        Some(usage::generate_usage(path, source))
    }

    /// Completions for the last token of `command_line`.
    pub async fn suggestions(&self, command_line: &str, source: &S) -> Vec<String> {
        let command_line = strip_slash(command_line.trim_start());
        let split = command_line
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map_or(0, |(idx, c)| idx + c.len_utf8());
        let (consumed, partial) = command_line.split_at(split);

        let candidates: &[CommandBuilder<S>] = if consumed.trim().is_empty() {
            &self.roots
        } else {
            match parser::parse(&self.roots, source, consumed) {
                ParseResult::Success {
                    path, arguments, ..
                }
                | ParseResult::Partial {
                    path, arguments, ..
                } => {
                    let path = parser::backtrack_overgreedy_matches(path, &arguments);
                    match path.last().copied() {
                        Some(node) => &node.children,
                        None => &self.roots,
                    }
                }
                _ => return Vec::new(),
            }
        };

        let mut suggestions = Vec::new();
        for child in candidates.iter().filter(|child| child.can_use(source)) {
            match &child.kind {
                NodeKind::Literal { name } => {
                    if matches_prefix(name, partial) {
                        suggestions.push(name.clone());
                    }
                }
                NodeKind::Argument {
                    suggestions: Some(provider),
                    ..
                } => {
                    let pending = {
                        let context = SuggestionContext::new(source, command_line, partial);
                        provider(&context)
                    };
                    suggestions.extend(
                        pending
                            .await
                            .into_iter()
                            .filter(|suggestion| matches_prefix(suggestion, partial)),
                    );
                }
                NodeKind::Argument { .. } => {}
            }
        }

        suggestions.into_iter().unique().collect()
    }
}

fn strip_slash(command_line: &str) -> &str {
    command_line.strip_prefix('/').unwrap_or(command_line)
}

fn matches_prefix(candidate: &str, partial: &str) -> bool {
    candidate.to_lowercase().starts_with(&partial.to_lowercase())
}
