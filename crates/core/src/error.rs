use cmdtree_dispatch::{ArgumentError, DispatchError};
use thiserror::Error;

/// Failures a user is expected to see, e.g. a missing permission.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Permission denied: {permission}")]
    PermissionDenied { permission: String },
    #[error("This command can only be executed by a known principal")]
    PrincipalRequired,
    #[error("{0}")]
    Message(String),
}

/// Failures that point at a bug in how a command was registered.
#[derive(Debug, Error)]
pub enum InternalError {
    #[error("Internal error: {0}")]
    Argument(#[from] ArgumentError),
    #[error("Internal error: command panicked: {message}")]
    Panic { message: String },
    #[error("Internal error (bug): {message}")]
    Message { message: String },
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl CommandError {
    pub fn runtime(message: impl Into<String>) -> Self {
        CommandError::Runtime(RuntimeError::Message(message.into()))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CommandError::Internal(InternalError::Message {
            message: message.into(),
        })
    }
}

impl From<ArgumentError> for CommandError {
    fn from(err: ArgumentError) -> Self {
        CommandError::Internal(err.into())
    }
}

pub type CommandResult<T> = Result<T, CommandError>;

/// Why a root could not be handed to the dispatcher.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Command '{path}' has a literal name that can not be typed: {name:?}")]
    InvalidLiteral { path: String, name: String },
    #[error("Command '{path}' has an empty name")]
    EmptyName { path: String },
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
