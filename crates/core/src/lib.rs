//! Declarative command trees compiled into a [`CommandDispatcher`].
//!
//! Registrants obtain nodes from a [`CommandRegistry`] and configure them
//! through [`CommandNode`] handles while the program starts up. Asking for
//! the same root or child twice yields the same node, so independent code
//! can extend a shared subtree. Once every registrant has run, a single call
//! to [`CommandRegistry::register_all`] compiles the tree and hands it to the
//! dispatcher.
//!
//! [`CommandDispatcher`]: cmdtree_dispatch::CommandDispatcher

#![deny(rust_2018_idioms)]

mod compile;
mod error;
mod node;
mod permission;
mod registry;
mod requirement;
pub mod suggestion;

pub use compile::{CompileContext, FAILURE_RESULT};
pub use error::{CommandError, CommandResult, InternalError, RegistrationError, RuntimeError};
pub use node::{CommandNode, Executor};
pub use permission::{CommandSource, PermissionProvider};
pub use registry::{CommandRegistry, RegistrationReport, RegistryConfig};

pub use cmdtree_dispatch::{
    ArgumentType, CommandContext, CommandDispatcher, RegistrationEnvironment, SuggestionContext,
    SuggestionFuture,
};
