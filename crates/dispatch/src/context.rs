use crate::argument_set::ArgumentSet;

/// Handed to an executor when its node is invoked.
pub struct CommandContext<'a, S> {
    source: &'a S,
    input: &'a str,
    arguments: ArgumentSet,
}

impl<'a, S> CommandContext<'a, S> {
    pub fn new(source: &'a S, input: &'a str, arguments: ArgumentSet) -> Self {
        Self {
            source,
            input,
            arguments,
        }
    }

    pub fn source(&self) -> &S {
        self.source
    }

    /// The full command line that was dispatched.
    pub fn input(&self) -> &str {
        self.input
    }

    pub fn args(&self) -> &ArgumentSet {
        &self.arguments
    }
}

/// Handed to a suggestion provider while completing an argument.
pub struct SuggestionContext<'a, S> {
    source: &'a S,
    input: &'a str,
    remaining: &'a str,
}

impl<'a, S> SuggestionContext<'a, S> {
    pub fn new(source: &'a S, input: &'a str, remaining: &'a str) -> Self {
        Self {
            source,
            input,
            remaining,
        }
    }

    pub fn source(&self) -> &S {
        self.source
    }

    pub fn input(&self) -> &str {
        self.input
    }

    /// The partially typed token being completed.
    pub fn remaining(&self) -> &str {
        self.remaining
    }
}
