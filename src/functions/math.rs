use crate::error::EngineError;
use crate::error::EngineResult;
use crate::error::ErrorKind;
use crate::executable::single;
use crate::executable::Executable;
use crate::registry::FunctionRegistry;
use crate::value::Value;

pub fn register(registry: &mut FunctionRegistry) {
    registry.register("add", || Box::new(Variadic(VariadicOp::Add)));
    registry.register("subtract", || Box::new(Variadic(VariadicOp::Subtract)));
    registry.register("multiply", || Box::new(Variadic(VariadicOp::Multiply)));
    registry.register("divide", || Box::new(Variadic(VariadicOp::Divide)));
    registry.register("power", || Box::new(Variadic(VariadicOp::Power)));

    registry.register("log", || Box::new(Unary(UnaryOp::Log)));
    registry.register("log10", || Box::new(Unary(UnaryOp::Log10)));
    registry.register("exp", || Box::new(Unary(UnaryOp::Exp)));
    registry.register("sin", || Box::new(Unary(UnaryOp::Sin)));
    registry.register("cos", || Box::new(Unary(UnaryOp::Cos)));
    registry.register("tan", || Box::new(Unary(UnaryOp::Tan)));
    registry.register("identity", || Box::new(Unary(UnaryOp::Identity)));
}

#[derive(Clone, Copy)]
enum VariadicOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

fn apply_scalar(op: VariadicOp, a: f64, b: f64) -> EngineResult<f64> {
    match op {
        VariadicOp::Add => Ok(a + b),
        VariadicOp::Subtract => Ok(a - b),
        VariadicOp::Multiply => Ok(a * b),
        VariadicOp::Divide => {
            if b == 0.0 {
                Err(EngineError::new(ErrorKind::DivisionByZero, "division by zero"))
            } else {
                Ok(a / b)
            }
        }
        VariadicOp::Power => {
            let result = a.powf(b);
            if result.is_nan() {
                Err(EngineError::new(
                    ErrorKind::InvalidPowerOperation,
                    format!("{a} raised to the power {b} is not a real number"),
                ))
            } else {
                Ok(result)
            }
        }
    }
}

/// left-fold `op(x1, x2, ..., xn)` with scalar/vector broadcasting at
/// each fold step.
struct Variadic(VariadicOp);

impl Executable for Variadic {
    fn execute(&self, args: &[Value]) -> EngineResult<Vec<Value>> {
        if args.is_empty() {
            return Err(EngineError::new(
                ErrorKind::IncorrectArgumentCount,
                "requires at least one argument",
            ));
        }
        let mut acc = args[0].clone();
        for next in &args[1..] {
            acc = broadcast(self.0, &acc, next)?;
        }
        Ok(single(acc))
    }
}

fn broadcast(op: VariadicOp, left: &Value, right: &Value) -> EngineResult<Value> {
    match (left, right) {
        (Value::Scalar(a), Value::Scalar(b)) => Ok(Value::Scalar(apply_scalar(op, *a, *b)?)),
        (Value::Vector(v), Value::Scalar(b)) => {
            let out: Result<Vec<f64>, _> = v.iter().map(|a| apply_scalar(op, *a, *b)).collect();
            Ok(Value::Vector(out?))
        }
        (Value::Scalar(a), Value::Vector(v)) => {
            let out: Result<Vec<f64>, _> = v.iter().map(|b| apply_scalar(op, *a, *b)).collect();
            Ok(Value::Vector(out?))
        }
        (Value::Vector(a), Value::Vector(b)) => {
            if a.len() != b.len() {
                return Err(EngineError::new(
                    ErrorKind::VectorSizeMismatch,
                    format!("vector size mismatch: {} vs {}", a.len(), b.len()),
                ));
            }
            let out: Result<Vec<f64>, _> = a.iter().zip(b).map(|(x, y)| apply_scalar(op, *x, *y)).collect();
            Ok(Value::Vector(out?))
        }
        (left, right) => Err(EngineError::new(
            ErrorKind::MismatchedArgumentType,
            format!(
                "arithmetic requires scalar or vector arguments, got {} and {}",
                left.type_name(),
                right.type_name()
            ),
        )),
    }
}

#[derive(Clone, Copy)]
enum UnaryOp {
    Log,
    Log10,
    Exp,
    Sin,
    Cos,
    Tan,
    Identity,
}

struct Unary(UnaryOp);

impl Executable for Unary {
    fn execute(&self, args: &[Value]) -> EngineResult<Vec<Value>> {
        if args.len() != 1 {
            return Err(EngineError::new(
                ErrorKind::IncorrectArgumentCount,
                "requires exactly 1 argument",
            ));
        }
        let x = args[0].as_scalar()?;
        let result = match self.0 {
            UnaryOp::Log => {
                if x <= 0.0 {
                    return Err(EngineError::new(
                        ErrorKind::LogOfNonPositive,
                        format!("log of non-positive value {x}"),
                    ));
                }
                x.ln()
            }
            UnaryOp::Log10 => {
                if x <= 0.0 {
                    return Err(EngineError::new(
                        ErrorKind::LogOfNonPositive,
                        format!("log10 of non-positive value {x}"),
                    ));
                }
                x.log10()
            }
            UnaryOp::Exp => x.exp(),
            UnaryOp::Sin => x.sin(),
            UnaryOp::Cos => x.cos(),
            UnaryOp::Tan => x.tan(),
            UnaryOp::Identity => x,
        };
        Ok(single(Value::Scalar(result)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_argument_is_returned_unchanged() {
        let op = Variadic(VariadicOp::Add);
        let out = op.execute(&[Value::Scalar(7.0)]).unwrap();
        assert_eq!(out, vec![Value::Scalar(7.0)]);
    }

    #[test]
    fn left_folds_scalars() {
        let op = Variadic(VariadicOp::Add);
        let out = op
            .execute(&[Value::Scalar(1.0), Value::Scalar(2.0), Value::Scalar(3.0)])
            .unwrap();
        assert_eq!(out, vec![Value::Scalar(6.0)]);
    }

    #[test]
    fn broadcasts_scalar_over_vector() {
        let op = Variadic(VariadicOp::Add);
        let out = op
            .execute(&[Value::Vector(vec![10.0, 20.0, 30.0]), Value::Scalar(5.0)])
            .unwrap();
        assert_eq!(out, vec![Value::Vector(vec![15.0, 25.0, 35.0])]);
    }

    #[test]
    fn vector_size_mismatch_fails() {
        let op = Variadic(VariadicOp::Add);
        let err = op
            .execute(&[Value::Vector(vec![1.0, 2.0]), Value::Vector(vec![1.0])])
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::VectorSizeMismatch);
    }

    #[test]
    fn divide_by_zero_fails() {
        let op = Variadic(VariadicOp::Divide);
        let err = op.execute(&[Value::Scalar(1.0), Value::Scalar(0.0)]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DivisionByZero);
    }

    #[test]
    fn string_operands_are_mismatched() {
        let op = Variadic(VariadicOp::Add);
        let err = op
            .execute(&[Value::Scalar(1.0), Value::String("x".into())])
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::MismatchedArgumentType);
    }

    #[test]
    fn identity_returns_its_argument() {
        let op = Unary(UnaryOp::Identity);
        let out = op.execute(&[Value::Scalar(42.0)]).unwrap();
        assert_eq!(out, vec![Value::Scalar(42.0)]);
    }
}
