use crate::{error::ArgumentError, value::Value};
use rustc_hash::FxHashMap;

/// Arguments parsed along the path to the executed node, keyed by node name.
#[derive(Debug, Default)]
pub struct ArgumentSet {
    args: FxHashMap<String, Value>,
}

impl ArgumentSet {
    pub(crate) fn new(args: Vec<(String, Value)>) -> Self {
        Self {
            args: args.into_iter().collect(),
        }
    }

    fn get(&self, name: &str) -> Result<&Value, ArgumentError> {
        self.args.get(name).ok_or_else(|| ArgumentError::Missing {
            name: name.to_string(),
        })
    }

    pub fn get_string(&self, name: &str) -> Result<String, ArgumentError> {
        Ok(self.get(name)?.as_string()?.clone())
    }

    pub fn get_greedy(&self, name: &str) -> Result<String, ArgumentError> {
        Ok(self.get(name)?.as_greedy()?.clone())
    }

    pub fn get_integer(&self, name: &str) -> Result<i32, ArgumentError> {
        self.get(name)?.as_integer()
    }

    pub fn get_float(&self, name: &str) -> Result<f32, ArgumentError> {
        self.get(name)?.as_float()
    }

    pub fn get_boolean(&self, name: &str) -> Result<bool, ArgumentError> {
        self.get(name)?.as_boolean()
    }
}
