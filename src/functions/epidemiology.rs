use crate::error::EngineError;
use crate::error::EngineResult;
use crate::error::ErrorKind;
use crate::executable::Executable;
use crate::registry::FunctionRegistry;
use crate::value::Value;

pub fn register(registry: &mut FunctionRegistry) {
    registry.register("SirModel", || Box::new(SirModel));
}

struct SirModel;

impl Executable for SirModel {
    fn execute(&self, args: &[Value]) -> EngineResult<Vec<Value>> {
        if args.len() != 7 {
            return Err(EngineError::new(
                ErrorKind::IncorrectArgumentCount,
                "'SirModel' requires 7 arguments: s0, i0, r0, beta, gamma, periods, dt",
            ));
        }
        let s0 = args[0].as_scalar()?;
        let i0 = args[1].as_scalar()?;
        let r0 = args[2].as_scalar()?;
        let beta = args[3].as_scalar()?;
        let gamma = args[4].as_scalar()?;
        let periods = args[5].as_scalar()? as i64;
        let dt = args[6].as_scalar()?;

        if periods <= 0 {
            return Ok(vec![
                Value::Vector(Vec::new()),
                Value::Vector(Vec::new()),
                Value::Vector(Vec::new()),
            ]);
        }

        let population = s0 + i0 + r0;
        if population == 0.0 {
            return Err(EngineError::new(ErrorKind::InvalidSamplerParameters, "total population in SirModel cannot be zero"));
        }

        let periods = periods as usize;
        let mut s = vec![0.0; periods];
        let mut i = vec![0.0; periods];
        let mut r = vec![0.0; periods];
        s[0] = s0;
        i[0] = i0;
        r[0] = r0;

        for t in 0..periods - 1 {
            let s_t = s[t];
            let i_t = i[t];

            let d_s = (-beta * s_t * i_t / population) * dt;
            let d_i = (beta * s_t * i_t / population - gamma * i_t) * dt;
            let d_r = (gamma * i_t) * dt;

            s[t + 1] = (s_t + d_s).max(0.0);
            i[t + 1] = (i_t + d_i).max(0.0);
            r[t + 1] = (r[t] + d_r).max(0.0);
        }

        Ok(vec![Value::Vector(s), Value::Vector(i), Value::Vector(r)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_period_returns_initial_conditions_only() {
        let args = [
            Value::Scalar(990.0),
            Value::Scalar(10.0),
            Value::Scalar(0.0),
            Value::Scalar(0.3),
            Value::Scalar(0.1),
            Value::Scalar(1.0),
            Value::Scalar(1.0),
        ];
        let out = SirModel.execute(&args).unwrap();
        assert_eq!(out[0].as_vector().unwrap(), &[990.0]);
        assert_eq!(out[1].as_vector().unwrap(), &[10.0]);
        assert_eq!(out[2].as_vector().unwrap(), &[0.0]);
    }

    #[test]
    fn infection_grows_over_second_step() {
        let args = [
            Value::Scalar(990.0),
            Value::Scalar(10.0),
            Value::Scalar(0.0),
            Value::Scalar(0.3),
            Value::Scalar(0.1),
            Value::Scalar(2.0),
            Value::Scalar(1.0),
        ];
        let out = SirModel.execute(&args).unwrap();
        let infected = out[1].as_vector().unwrap();
        assert!(infected[1] > infected[0]);
    }

    #[test]
    fn zero_population_is_rejected() {
        let args = [
            Value::Scalar(0.0),
            Value::Scalar(0.0),
            Value::Scalar(0.0),
            Value::Scalar(0.3),
            Value::Scalar(0.1),
            Value::Scalar(5.0),
            Value::Scalar(1.0),
        ];
        let err = SirModel.execute(&args).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidSamplerParameters);
    }

    #[test]
    fn non_positive_periods_returns_three_empty_vectors() {
        let args = [
            Value::Scalar(990.0),
            Value::Scalar(10.0),
            Value::Scalar(0.0),
            Value::Scalar(0.3),
            Value::Scalar(0.1),
            Value::Scalar(0.0),
            Value::Scalar(1.0),
        ];
        let out = SirModel.execute(&args).unwrap();
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|v| v.as_vector().unwrap().is_empty()));
    }
}
