use crate::argument_parser::*;
use std::fmt;

/// The typed value a required argument node accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentType {
    /// A single whitespace delimited word.
    String,
    /// Everything left on the line, including whitespace.
    GreedyString,
    Integer { min: i32, max: i32 },
    Float { min: f32, max: f32 },
    Boolean,
}

impl ArgumentType {
    pub(crate) fn parse<'a>(&self, input: &'a str) -> ArgumentParseResult<'a> {
        match self {
            ArgumentType::String => parse_string(input),
            ArgumentType::GreedyString => parse_greedy_string(input),
            ArgumentType::Integer { min, max } => {
                let (value, rest) = parse_integer(input)?;
                if let Ok(value) = value.as_integer() {
                    if !(*min..=*max).contains(&value) {
                        return Err(());
                    }
                }
                Ok((value, rest))
            }
            ArgumentType::Float { min, max } => {
                let (value, rest) = parse_float(input)?;
                if let Ok(value) = value.as_float() {
                    if !(*min..=*max).contains(&value) {
                        return Err(());
                    }
                }
                Ok((value, rest))
            }
            ArgumentType::Boolean => parse_boolean(input),
        }
    }

    pub(crate) fn is_greedy(&self) -> bool {
        matches!(self, ArgumentType::GreedyString)
    }

    pub fn string() -> Self {
        ArgumentType::String
    }

    pub fn greedy_string() -> Self {
        ArgumentType::GreedyString
    }

    pub fn integer(min: i32, max: i32) -> Self {
        ArgumentType::Integer { min, max }
    }

    pub fn float(min: f32, max: f32) -> Self {
        ArgumentType::Float { min, max }
    }

    pub fn boolean() -> Self {
        ArgumentType::Boolean
    }
}

impl fmt::Display for ArgumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentType::String => write!(f, "string"),
            ArgumentType::GreedyString => write!(f, "greedy_string"),
            ArgumentType::Integer { min, max } => write!(f, "integer({min}..={max})"),
            ArgumentType::Float { min, max } => write!(f, "float({min}..={max})"),
            ArgumentType::Boolean => write!(f, "boolean"),
        }
    }
}
