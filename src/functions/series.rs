use crate::error::EngineError;
use crate::error::EngineResult;
use crate::error::ErrorKind;
use crate::executable::single;
use crate::executable::Executable;
use crate::registry::FunctionRegistry;
use crate::value::Value;

pub fn register(registry: &mut FunctionRegistry) {
    registry.register("grow_series", || Box::new(GrowSeries));
    registry.register("compound_series", || Box::new(CompoundSeries));
    registry.register("npv", || Box::new(Npv));
    registry.register("sum_series", || Box::new(SumSeries));
    registry.register("get_element", || Box::new(GetElement));
    registry.register("delete_element", || Box::new(DeleteElement));
    registry.register("series_delta", || Box::new(SeriesDelta));
    registry.register("compose_vector", || Box::new(ComposeVector));
    registry.register("interpolate_series", || Box::new(InterpolateSeries));
    registry.register("capitalize_expense", || Box::new(CapitalizeExpense));
}

fn arity(args: &[Value], expected: usize, name: &str) -> EngineResult<()> {
    if args.len() != expected {
        return Err(EngineError::new(
            ErrorKind::IncorrectArgumentCount,
            format!("'{name}' requires {expected} argument(s), got {}", args.len()),
        ));
    }
    Ok(())
}

fn resolve_index(raw: i64, len: usize) -> Option<usize> {
    let index = if raw < 0 { raw + len as i64 } else { raw };
    if index < 0 || index as usize >= len {
        None
    } else {
        Some(index as usize)
    }
}

struct GrowSeries;

impl Executable for GrowSeries {
    fn execute(&self, args: &[Value]) -> EngineResult<Vec<Value>> {
        arity(args, 3, "grow_series")?;
        let base = args[0].as_scalar()?;
        let rate = args[1].as_scalar()?;
        let num_years = args[2].as_scalar()? as i64;
        if num_years < 1 {
            return Ok(single(Value::Vector(Vec::new())));
        }
        let mut series = Vec::with_capacity(num_years as usize);
        let mut current = base;
        let factor = 1.0 + rate;
        for _ in 0..num_years {
            current *= factor;
            series.push(current);
        }
        Ok(single(Value::Vector(series)))
    }
}

struct CompoundSeries;

impl Executable for CompoundSeries {
    fn execute(&self, args: &[Value]) -> EngineResult<Vec<Value>> {
        arity(args, 2, "compound_series")?;
        let base = args[0].as_scalar()?;
        let rates = args[1].as_vector()?;
        let mut series = Vec::with_capacity(rates.len());
        let mut current = base;
        for rate in rates {
            current *= 1.0 + rate;
            series.push(current);
        }
        Ok(single(Value::Vector(series)))
    }
}

struct Npv;

impl Executable for Npv {
    fn execute(&self, args: &[Value]) -> EngineResult<Vec<Value>> {
        arity(args, 2, "npv")?;
        let rate = args[0].as_scalar()?;
        let cashflows = args[1].as_vector()?;
        let mut discount_factor = 1.0 + rate;
        if discount_factor == 0.0 {
            return Err(EngineError::new(
                ErrorKind::InvalidSamplerParameters,
                "discount rate cannot be -100% (-1.0)",
            ));
        }
        let mut npv = 0.0;
        for cashflow in cashflows {
            npv += cashflow / discount_factor;
            discount_factor *= 1.0 + rate;
        }
        Ok(single(Value::Scalar(npv)))
    }
}

struct SumSeries;

impl Executable for SumSeries {
    fn execute(&self, args: &[Value]) -> EngineResult<Vec<Value>> {
        arity(args, 1, "sum_series")?;
        let series = args[0].as_vector()?;
        Ok(single(Value::Scalar(series.iter().sum())))
    }
}

struct GetElement;

impl Executable for GetElement {
    fn execute(&self, args: &[Value]) -> EngineResult<Vec<Value>> {
        arity(args, 2, "get_element")?;
        let series = args[0].as_vector()?;
        let raw_index = args[1].as_scalar()? as i64;
        if series.is_empty() {
            return Err(EngineError::new(ErrorKind::EmptyVectorOperation, "cannot get element from empty series"));
        }
        let index = resolve_index(raw_index, series.len())
            .ok_or_else(|| EngineError::new(ErrorKind::IndexOutOfBounds, "index out of bounds"))?;
        Ok(single(Value::Scalar(series[index])))
    }
}

struct DeleteElement;

impl Executable for DeleteElement {
    fn execute(&self, args: &[Value]) -> EngineResult<Vec<Value>> {
        arity(args, 2, "delete_element")?;
        let series = args[0].as_vector()?;
        let raw_index = args[1].as_scalar()? as i64;
        if series.is_empty() {
            return Err(EngineError::new(
                ErrorKind::EmptyVectorOperation,
                "cannot delete element from an empty vector",
            ));
        }
        let index = resolve_index(raw_index, series.len()).ok_or_else(|| {
            EngineError::new(ErrorKind::IndexOutOfBounds, "index out of bounds for delete_element")
        })?;
        let result: Vec<f64> = series
            .iter()
            .enumerate()
            .filter_map(|(i, v)| if i != index { Some(*v) } else { None })
            .collect();
        Ok(single(Value::Vector(result)))
    }
}

struct SeriesDelta;

impl Executable for SeriesDelta {
    fn execute(&self, args: &[Value]) -> EngineResult<Vec<Value>> {
        arity(args, 1, "series_delta")?;
        let series = args[0].as_vector()?;
        if series.len() < 2 {
            return Ok(single(Value::Vector(Vec::new())));
        }
        let deltas: Vec<f64> = series.windows(2).map(|w| w[1] - w[0]).collect();
        Ok(single(Value::Vector(deltas)))
    }
}

struct ComposeVector;

impl Executable for ComposeVector {
    fn execute(&self, args: &[Value]) -> EngineResult<Vec<Value>> {
        let mut composed = Vec::new();
        for arg in args {
            match arg {
                Value::Scalar(v) => composed.push(*v),
                Value::Vector(v) => composed.extend_from_slice(v),
                other => {
                    return Err(EngineError::new(
                        ErrorKind::MismatchedArgumentType,
                        format!("'compose_vector' can only accept scalars and vectors, got {}", other.type_name()),
                    ))
                }
            }
        }
        Ok(single(Value::Vector(composed)))
    }
}

struct InterpolateSeries;

impl Executable for InterpolateSeries {
    fn execute(&self, args: &[Value]) -> EngineResult<Vec<Value>> {
        arity(args, 3, "interpolate_series")?;
        let start = args[0].as_scalar()?;
        let end = args[1].as_scalar()?;
        let num_steps = args[2].as_scalar()? as i64;
        let series = if num_steps < 1 {
            Vec::new()
        } else if num_steps == 1 {
            vec![end]
        } else {
            let step = (end - start) / (num_steps - 1) as f64;
            (0..num_steps).map(|i| start + i as f64 * step).collect()
        };
        Ok(single(Value::Vector(series)))
    }
}

struct CapitalizeExpense;

impl Executable for CapitalizeExpense {
    fn execute(&self, args: &[Value]) -> EngineResult<Vec<Value>> {
        arity(args, 3, "capitalize_expense")?;
        let current_expense = args[0].as_scalar()?;
        let past_expenses = args[1].as_vector()?;
        let period = args[2].as_scalar()? as i64;
        if period <= 0 {
            return Err(EngineError::new(ErrorKind::InvalidSamplerParameters, "amortization period must be positive"));
        }
        let period_f = period as f64;
        let mut research_asset = current_expense;
        for (i, expense) in past_expenses.iter().enumerate() {
            let year_ago = i as i64 + 1;
            if year_ago < period {
                research_asset += expense * ((period - year_ago) as f64 / period_f);
            }
        }
        let mut amortization_this_year = 0.0;
        for (i, expense) in past_expenses.iter().enumerate() {
            let year_ago = i as i64 + 1;
            if year_ago <= period {
                amortization_this_year += expense / period_f;
            }
        }
        Ok(vec![Value::Scalar(research_asset), Value::Scalar(amortization_this_year)])
    }
}
