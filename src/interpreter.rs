//! executes a compiled [`Program`]'s steps against a [`Context`].
//!
//! the pre-trial phase and each trial's per-trial phase both run through
//! [`run_steps`]; the only difference is which step list and which context
//! (the snapshot, or a clone of it) gets passed in.

use crate::compiler::ArgPlan;
use crate::compiler::Step;
use crate::context::Context;
use crate::error::EngineError;
use crate::error::EngineResult;
use crate::error::ErrorKind;
use crate::value::Value;

pub fn run_steps(steps: &[Step], context: &mut Context) -> EngineResult<()> {
    for step in steps {
        run_step(step, context)?;
    }
    Ok(())
}

fn run_step(step: &Step, context: &mut Context) -> EngineResult<()> {
    match step {
        Step::LiteralAssign { slot, value } => {
            context.set(*slot, value.clone());
            Ok(())
        }
        Step::CallAssign { slots, function_name, line, logic, args } => {
            let result = (|| {
                let resolved: Vec<Value> =
                    args.iter().map(|a| eval_arg(a, context)).collect::<EngineResult<_>>()?;
                let outputs = logic.execute(&resolved)?;
                if outputs.len() != slots.len() {
                    return Err(EngineError::new(
                        ErrorKind::IncorrectArgumentCount,
                        format!(
                            "function '{function_name}' returned {} value(s), expected {}",
                            outputs.len(),
                            slots.len()
                        ),
                    ));
                }
                Ok(outputs)
            })()
            .map_err(|e| e.in_function(function_name, *line))?;
            for (slot, value) in slots.iter().zip(result) {
                context.set(*slot, value);
            }
            Ok(())
        }
        Step::CondAssign { slot, condition, then_branch, else_branch, line } => {
            let taken = eval_condition(condition, context, *line)?;
            let value = if taken { eval_arg(then_branch, context)? } else { eval_arg(else_branch, context)? };
            context.set(*slot, value);
            Ok(())
        }
    }
}

fn eval_condition(plan: &ArgPlan, context: &Context, line: Option<i64>) -> EngineResult<bool> {
    let value = eval_arg(plan, context)?;
    value
        .as_bool()
        .map_err(|_| {
            EngineError::new(
                ErrorKind::ConditionNotBoolean,
                format!("condition must evaluate to a boolean, got a {}", value.type_name()),
            )
        })
        .map_err(|e| e.with_line(line))
}

fn eval_arg(plan: &ArgPlan, context: &Context) -> EngineResult<Value> {
    match plan {
        ArgPlan::Literal(value) => Ok(value.clone()),
        ArgPlan::SlotRef(slot) => context.get(*slot).map(Value::clone),
        ArgPlan::Nested { function_name, line, logic, args } => (|| {
            let resolved: Vec<Value> = args.iter().map(|a| eval_arg(a, context)).collect::<EngineResult<_>>()?;
            let mut outputs = logic.execute(&resolved)?;
            if outputs.len() != 1 {
                return Err(EngineError::new(
                    ErrorKind::IncorrectArgumentCount,
                    format!("function '{function_name}' cannot be used as a nested expression: it returns {} values", outputs.len()),
                ));
            }
            Ok(outputs.remove(0))
        })()
        .map_err(|e| e.in_nested_function(function_name, *line)),
        ArgPlan::Conditional { condition, then_branch, else_branch, line } => {
            if eval_condition(condition, context, *line)? {
                eval_arg(then_branch, context)
            } else {
                eval_arg(else_branch, context)
            }
        }
    }
}
