use crate::error::EngineError;
use crate::error::ErrorKind;

/// the tagged value carried between compiled steps.
///
/// values are immutable once placed into a context slot; a later step
/// overwrites the slot rather than mutating the value in place.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(f64),
    Vector(Vec<f64>),
    Bool(bool),
    String(String),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::Vector(_) => "vector",
            Value::Bool(_) => "boolean",
            Value::String(_) => "string",
        }
    }

    pub fn as_scalar(&self) -> Result<f64, EngineError> {
        match self {
            Value::Scalar(v) => Ok(*v),
            other => Err(mismatched("scalar", other)),
        }
    }

    pub fn as_vector(&self) -> Result<&[f64], EngineError> {
        match self {
            Value::Vector(v) => Ok(v),
            other => Err(mismatched("vector", other)),
        }
    }

    pub fn as_bool(&self) -> Result<bool, EngineError> {
        match self {
            Value::Bool(v) => Ok(*v),
            other => Err(mismatched("boolean", other)),
        }
    }

    pub fn as_string(&self) -> Result<&str, EngineError> {
        match self {
            Value::String(v) => Ok(v),
            other => Err(mismatched("string", other)),
        }
    }
}

fn mismatched(expected: &str, got: &Value) -> EngineError {
    EngineError::new(
        ErrorKind::MismatchedArgumentType,
        format!("expected a {expected} argument, got a {}", got.type_name()),
    )
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Scalar(v)
    }
}

impl From<Vec<f64>> for Value {
    fn from(v: Vec<f64>) -> Self {
        Value::Vector(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}
