use crate::error::EngineResult;
use crate::value::Value;

/// uniform contract every built-in function implements.
///
/// one input list, one output list. most functions return exactly one
/// value; a few (`capitalize_expense`, `SirModel`) return several and
/// must be bound to a step whose result slots match that arity.
pub trait Executable: Send + Sync {
    fn execute(&self, args: &[Value]) -> EngineResult<Vec<Value>>;
}

/// helper for the common case of a function that always returns exactly
/// one value -- most of the library.
pub(crate) fn single(value: Value) -> Vec<Value> {
    vec![value]
}
