use crate::error::ArgumentError;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    GreedyString(String),
    Integer(i32),
    Float(f32),
    Boolean(bool),
}

impl Value {
    fn type_error(&self, expected: &str) -> ArgumentError {
        ArgumentError::WrongType {
            name: format!("{:?}", self),
            expected: expected.to_string(),
        }
    }

    pub(crate) fn as_string(&self) -> Result<&String, ArgumentError> {
        match self {
            Value::String(s) => Ok(s),
            _ => Err(self.type_error("String")),
        }
    }

    pub(crate) fn as_greedy(&self) -> Result<&String, ArgumentError> {
        match self {
            Value::GreedyString(s) => Ok(s),
            _ => Err(self.type_error("Greedy")),
        }
    }

    pub(crate) fn as_integer(&self) -> Result<i32, ArgumentError> {
        match self {
            Value::Integer(i) => Ok(*i),
            _ => Err(self.type_error("Integer")),
        }
    }

    pub(crate) fn as_float(&self) -> Result<f32, ArgumentError> {
        match self {
            Value::Float(f) => Ok(*f),
            _ => Err(self.type_error("Float")),
        }
    }

    pub(crate) fn as_boolean(&self) -> Result<bool, ArgumentError> {
        match self {
            Value::Boolean(b) => Ok(*b),
            _ => Err(self.type_error("Boolean")),
        }
    }

    pub(crate) fn is_empty_greedy(&self) -> bool {
        matches!(self, Value::GreedyString(s) if s.is_empty())
    }
}
