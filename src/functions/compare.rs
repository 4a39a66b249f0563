use crate::error::EngineError;
use crate::error::EngineResult;
use crate::error::ErrorKind;
use crate::executable::single;
use crate::executable::Executable;
use crate::registry::FunctionRegistry;
use crate::value::Value;

pub fn register(registry: &mut FunctionRegistry) {
    registry.register("__eq__", || Box::new(Comparison(CompareOp::Eq)));
    registry.register("__neq__", || Box::new(Comparison(CompareOp::Neq)));
    registry.register("__gt__", || Box::new(Comparison(CompareOp::Gt)));
    registry.register("__lt__", || Box::new(Comparison(CompareOp::Lt)));
    registry.register("__gte__", || Box::new(Comparison(CompareOp::Gte)));
    registry.register("__lte__", || Box::new(Comparison(CompareOp::Lte)));

    registry.register("__and__", || Box::new(Logical(LogicalOp::And)));
    registry.register("__or__", || Box::new(Logical(LogicalOp::Or)));
    registry.register("__not__", || Box::new(Logical(LogicalOp::Not)));
}

#[derive(Clone, Copy)]
enum CompareOp {
    Eq,
    Neq,
    Gt,
    Lt,
    Gte,
    Lte,
}

struct Comparison(CompareOp);

impl Executable for Comparison {
    fn execute(&self, args: &[Value]) -> EngineResult<Vec<Value>> {
        if args.len() != 2 {
            return Err(EngineError::new(
                ErrorKind::IncorrectArgumentCount,
                "comparison requires exactly 2 arguments",
            ));
        }
        let result = match (&args[0], &args[1]) {
            (Value::Scalar(a), Value::Scalar(b)) => match self.0 {
                CompareOp::Eq => a == b,
                CompareOp::Neq => a != b,
                CompareOp::Gt => a > b,
                CompareOp::Lt => a < b,
                CompareOp::Gte => a >= b,
                CompareOp::Lte => a <= b,
            },
            (Value::Bool(a), Value::Bool(b)) => match self.0 {
                CompareOp::Eq => a == b,
                CompareOp::Neq => a != b,
                _ => {
                    return Err(EngineError::new(
                        ErrorKind::MismatchedArgumentType,
                        "booleans only support equality comparisons",
                    ))
                }
            },
            (Value::String(a), Value::String(b)) => match self.0 {
                CompareOp::Eq => a == b,
                CompareOp::Neq => a != b,
                _ => {
                    return Err(EngineError::new(
                        ErrorKind::MismatchedArgumentType,
                        "strings only support equality comparisons",
                    ))
                }
            },
            (left, right) => match self.0 {
                CompareOp::Eq => false,
                CompareOp::Neq => true,
                _ => {
                    return Err(EngineError::new(
                        ErrorKind::MismatchedArgumentType,
                        format!(
                            "cannot order values of different types ({} vs {})",
                            left.type_name(),
                            right.type_name()
                        ),
                    ))
                }
            },
        };
        Ok(single(Value::Bool(result)))
    }
}

#[derive(Clone, Copy)]
enum LogicalOp {
    And,
    Or,
    Not,
}

struct Logical(LogicalOp);

impl Executable for Logical {
    fn execute(&self, args: &[Value]) -> EngineResult<Vec<Value>> {
        match self.0 {
            LogicalOp::Not => {
                if args.len() != 1 {
                    return Err(EngineError::new(
                        ErrorKind::IncorrectArgumentCount,
                        "'__not__' requires exactly 1 argument",
                    ));
                }
                let a = require_bool(&args[0])?;
                Ok(single(Value::Bool(!a)))
            }
            LogicalOp::And | LogicalOp::Or => {
                if args.is_empty() {
                    return Err(EngineError::new(
                        ErrorKind::IncorrectArgumentCount,
                        "requires at least 1 argument",
                    ));
                }
                let short_circuit_on = matches!(self.0, LogicalOp::Or);
                let mut result = !short_circuit_on;
                for arg in args {
                    let value = require_bool(arg)?;
                    if value == short_circuit_on {
                        result = short_circuit_on;
                        break;
                    }
                }
                Ok(single(Value::Bool(result)))
            }
        }
    }
}

fn require_bool(value: &Value) -> EngineResult<bool> {
    value.as_bool().map_err(|_| {
        EngineError::new(
            ErrorKind::LogicalOperatorRequiresBoolean,
            format!("logical operators require boolean arguments, got {}", value.type_name()),
        )
    })
}
