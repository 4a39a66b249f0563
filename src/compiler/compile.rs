use super::plan::ArgPlan;
use super::plan::Step;
use super::recipe::RawArg;
use super::recipe::RawLiteral;
use super::recipe::RawRecipe;
use super::recipe::RawStep;
use super::recipe::RawTarget;
use super::recipe::RawTypedArg;
use super::recipe::RawVarRef;
use crate::context::VariableRegistry;
use crate::error::EngineError;
use crate::error::EngineResult;
use crate::error::ErrorKind;
use crate::program::Program;
use crate::registry::FunctionRegistry;
use crate::value::Value;

/// compiles a parsed recipe into a [`Program`] plus the registry mapping
/// variable names to their slot indices.
///
/// two passes over the step list, mirroring how the interpreter this engine
/// is modeled on builds its context: the first pass walks every assignment
/// target (in both phases) to size the context and assign slots; the second
/// builds the actual execution plan, where variable references must resolve
/// against slots already claimed in the first pass.
pub fn compile(recipe: RawRecipe, functions: &FunctionRegistry) -> EngineResult<(Program, VariableRegistry)> {
    let mut registry = VariableRegistry::new();
    let mut max_slot = 0usize;

    for step in recipe.pre_trial_steps.iter().chain(recipe.per_trial_steps.iter()) {
        for slot in register_target(&mut registry, target_of(step))? {
            max_slot = max_slot.max(slot);
        }
    }

    let output_slot = match (&recipe.output_variable, recipe.output_variable_index) {
        (Some(name), _) => registry.resolve(name).ok_or_else(|| {
            EngineError::new(ErrorKind::RecipeConfigError, format!("output variable '{name}' is not defined in any step"))
        })?,
        (None, Some(index)) => index,
        (None, None) => {
            return Err(EngineError::new(
                ErrorKind::RecipeConfigError,
                "recipe must set either 'output_variable' or 'output_variable_index'",
            ))
        }
    };
    max_slot = max_slot.max(output_slot);

    let pre_trial_steps = compile_steps(&recipe.pre_trial_steps, &mut registry, functions, &mut max_slot)?;
    let per_trial_steps = compile_steps(&recipe.per_trial_steps, &mut registry, functions, &mut max_slot)?;

    let context_len = max_slot + 1;
    let program = Program {
        pre_trial_steps,
        per_trial_steps,
        context_len,
        output_slot,
        num_trials: recipe.simulation_config.num_trials,
        output_file_path: recipe.simulation_config.output_file,
    };
    Ok((program, registry))
}

fn target_of(step: &RawStep) -> &RawTarget {
    match step {
        RawStep::LiteralAssignment { result, .. } => result,
        RawStep::ExecutionAssignment { result, .. } => result,
        RawStep::ConditionalAssignment { result, .. } => result,
    }
}

fn register_target(registry: &mut VariableRegistry, target: &RawTarget) -> EngineResult<Vec<usize>> {
    let refs: &[RawVarRef] = match target {
        RawTarget::Single(r) => std::slice::from_ref(r),
        RawTarget::Multi(rs) => rs,
    };
    Ok(refs.iter().map(|r| resolve_for_registration(registry, r)).collect())
}

fn resolve_for_registration(registry: &mut VariableRegistry, r: &RawVarRef) -> usize {
    match r {
        RawVarRef::Index(i) => *i,
        RawVarRef::Name(name) => registry.intern(name),
    }
}

fn resolve_existing(registry: &VariableRegistry, r: &RawVarRef) -> EngineResult<usize> {
    match r {
        RawVarRef::Index(i) => Ok(*i),
        RawVarRef::Name(name) => registry.resolve(name).ok_or_else(|| {
            EngineError::new(ErrorKind::RecipeConfigError, format!("reference to undefined variable '{name}'"))
        }),
    }
}

fn compile_steps(
    steps: &[RawStep],
    registry: &mut VariableRegistry,
    functions: &FunctionRegistry,
    max_slot: &mut usize,
) -> EngineResult<Vec<Step>> {
    steps.iter().map(|step| compile_step(step, registry, functions, max_slot)).collect()
}

fn compile_step(
    step: &RawStep,
    registry: &mut VariableRegistry,
    functions: &FunctionRegistry,
    max_slot: &mut usize,
) -> EngineResult<Step> {
    match step {
        RawStep::LiteralAssignment { result, value, .. } => {
            let slot = single_target(registry, result)?;
            *max_slot = (*max_slot).max(slot);
            Ok(Step::LiteralAssign { slot, value: literal_value(value) })
        }
        RawStep::ExecutionAssignment { result, function, args, line } => {
            let slots = register_target(registry, result)?;
            for &slot in &slots {
                *max_slot = (*max_slot).max(slot);
            }
            let logic = functions.build(function)?;
            let compiled_args = args
                .iter()
                .map(|a| build_arg_plan(a, registry, functions, max_slot))
                .collect::<EngineResult<Vec<_>>>()?;
            Ok(Step::CallAssign { slots, function_name: function.clone(), line: *line, logic, args: compiled_args })
        }
        RawStep::ConditionalAssignment { result, condition, then_expr, else_expr, line } => {
            let slot = single_target(registry, result)?;
            *max_slot = (*max_slot).max(slot);
            Ok(Step::CondAssign {
                slot,
                condition: build_arg_plan(condition, registry, functions, max_slot)?,
                then_branch: build_arg_plan(then_expr, registry, functions, max_slot)?,
                else_branch: build_arg_plan(else_expr, registry, functions, max_slot)?,
                line: *line,
            })
        }
    }
}

fn single_target(registry: &mut VariableRegistry, target: &RawTarget) -> EngineResult<usize> {
    match target {
        RawTarget::Single(r) => Ok(resolve_for_registration(registry, r)),
        RawTarget::Multi(_) => Err(EngineError::new(
            ErrorKind::RecipeConfigError,
            "this step produces a single value and cannot target multiple variables",
        )),
    }
}

fn literal_value(value: &RawLiteral) -> Value {
    match value {
        RawLiteral::Scalar(v) => Value::Scalar(*v),
        RawLiteral::Vector(v) => Value::Vector(v.clone()),
    }
}

fn build_arg_plan(
    arg: &RawArg,
    registry: &VariableRegistry,
    functions: &FunctionRegistry,
    max_slot: &mut usize,
) -> EngineResult<ArgPlan> {
    match arg {
        RawArg::Scalar(v) => Ok(ArgPlan::Literal(Value::Scalar(*v))),
        RawArg::Vector(v) => Ok(ArgPlan::Literal(Value::Vector(v.clone()))),
        RawArg::Typed(typed) => build_typed_arg_plan(typed, registry, functions, max_slot),
    }
}

fn build_typed_arg_plan(
    typed: &RawTypedArg,
    registry: &VariableRegistry,
    functions: &FunctionRegistry,
    max_slot: &mut usize,
) -> EngineResult<ArgPlan> {
    match typed {
        RawTypedArg::ScalarLiteral { value } => Ok(ArgPlan::Literal(Value::Scalar(*value))),
        RawTypedArg::VectorLiteral { value } => Ok(ArgPlan::Literal(Value::Vector(value.clone()))),
        RawTypedArg::BooleanLiteral { value } => Ok(ArgPlan::Literal(Value::Bool(*value))),
        RawTypedArg::StringLiteral { value } => Ok(ArgPlan::Literal(Value::String(value.clone()))),
        RawTypedArg::VariableIndex { value } => {
            let slot = resolve_existing(registry, value)?;
            *max_slot = (*max_slot).max(slot);
            Ok(ArgPlan::SlotRef(slot))
        }
        RawTypedArg::ExecutionAssignment { function, args, line } => {
            let logic = functions.build(function)?;
            let compiled_args = args
                .iter()
                .map(|a| build_arg_plan(a, registry, functions, max_slot))
                .collect::<EngineResult<Vec<_>>>()?;
            Ok(ArgPlan::Nested { function_name: function.clone(), line: *line, logic, args: compiled_args })
        }
        RawTypedArg::ConditionalExpression { condition, then_expr, else_expr, line } => Ok(ArgPlan::Conditional {
            condition: Box::new(build_arg_plan(condition, registry, functions, max_slot)?),
            then_branch: Box::new(build_arg_plan(then_expr, registry, functions, max_slot)?),
            else_branch: Box::new(build_arg_plan(else_expr, registry, functions, max_slot)?),
            line: *line,
        }),
    }
}
