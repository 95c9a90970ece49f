//! The command-processing runtime compiled command trees are handed to.
//!
//! A [`CommandDispatcher`] owns literal-rooted [`CommandBuilder`] trees. It
//! tokenizes a command line, walks the tree while honouring each node's
//! reachability gate, runs the matched executor, and offers completions and
//! usage strings.

#![deny(rust_2018_idioms)]

mod argument;
mod argument_parser;
mod argument_set;
mod builder;
mod context;
mod dispatcher;
mod error;
mod parser;
mod usage;
mod value;

pub use argument::ArgumentType;
pub use argument_set::ArgumentSet;
pub use builder::{
    Command, CommandBuilder, NodeKind, Predicate, SuggestionFuture, SuggestionProvider,
};
pub use context::{CommandContext, SuggestionContext};
pub use dispatcher::{CommandDispatcher, RegistrationEnvironment};
pub use error::{ArgumentError, DispatchError};
pub use parser::ParseResult;
pub use value::Value;
