use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Command not found!")]
    UnknownCommand,
    #[error("Not enough arguments for {path}")]
    Incomplete { path: String },
    #[error("Too many arguments: {remaining}")]
    TooManyArguments { remaining: String },
    #[error("Invalid argument: {remaining}")]
    InvalidArgument { remaining: String },
    #[error("Command '{name}' is not a literal and can not be registered at the top level")]
    NotLiteralRoot { name: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("Argument '{name}' not found (command registration bug)")]
    Missing { name: String },
    #[error("Argument '{name}' has wrong type, expected {expected} (command registration bug)")]
    WrongType { name: String, expected: String },
}
