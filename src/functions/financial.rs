use statrs::function::erf::erfc;

use crate::error::EngineError;
use crate::error::EngineResult;
use crate::error::ErrorKind;
use crate::executable::single;
use crate::executable::Executable;
use crate::registry::FunctionRegistry;
use crate::value::Value;

pub fn register(registry: &mut FunctionRegistry) {
    registry.register("BlackScholes", || Box::new(BlackScholes));
}

/// cumulative standard normal distribution, via the complementary error
/// function so large |x| stays numerically stable.
fn cndf(x: f64) -> f64 {
    0.5 * erfc(-x / std::f64::consts::SQRT_2)
}

struct BlackScholes;

impl Executable for BlackScholes {
    fn execute(&self, args: &[Value]) -> EngineResult<Vec<Value>> {
        if args.len() != 6 {
            return Err(EngineError::new(
                ErrorKind::IncorrectArgumentCount,
                "'BlackScholes' requires 6 arguments: spot, strike, rate, time_to_maturity, volatility, option_type",
            ));
        }
        let spot = args[0].as_scalar()?;
        let strike = args[1].as_scalar()?;
        let rate = args[2].as_scalar()?;
        let time = args[3].as_scalar()?;
        let vol = args[4].as_scalar()?;
        let option_type = args[5].as_string()?;

        if spot <= 0.0 || strike <= 0.0 || time <= 0.0 || vol <= 0.0 {
            return Err(EngineError::new(
                ErrorKind::InvalidSamplerParameters,
                "Black-Scholes inputs (spot, strike, time, volatility) must be positive",
            ));
        }

        let d1 = ((spot / strike).ln() + (rate + vol * vol / 2.0) * time) / (vol * time.sqrt());
        let d2 = d1 - vol * time.sqrt();

        let price = match option_type.to_lowercase().as_str() {
            "call" => spot * cndf(d1) - strike * (-rate * time).exp() * cndf(d2),
            "put" => strike * (-rate * time).exp() * cndf(-d2) - spot * cndf(-d1),
            other => {
                return Err(EngineError::new(
                    ErrorKind::MismatchedArgumentType,
                    format!("invalid option_type for BlackScholes, expected 'call' or 'put', got '{other}'"),
                ))
            }
        };
        Ok(single(Value::Scalar(price)))
    }
}
