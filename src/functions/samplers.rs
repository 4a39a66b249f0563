use std::cell::RefCell;

use rand::rngs::SmallRng;
use rand::Rng;
use rand::SeedableRng;
use rand_distr::Bernoulli;
use rand_distr::Distribution;
use rand_distr::Gamma;
use rand_distr::LogNormal;
use rand_distr::Normal;
use rand_distr::Uniform;

use crate::error::EngineError;
use crate::error::EngineResult;
use crate::error::ErrorKind;
use crate::executable::single;
use crate::executable::Executable;
use crate::registry::FunctionRegistry;
use crate::value::Value;

pub fn register(registry: &mut FunctionRegistry) {
    registry.register("Normal", || Box::new(NormalSampler));
    registry.register("Uniform", || Box::new(UniformSampler));
    registry.register("Bernoulli", || Box::new(BernoulliSampler));
    registry.register("Lognormal", || Box::new(LognormalSampler));
    registry.register("Beta", || Box::new(BetaSampler));
    registry.register("Pert", || Box::new(PertSampler));
    registry.register("Triangular", || Box::new(TriangularSampler));
}

thread_local! {
    /// seeded once per thread from a nondeterministic source; never shared
    /// across threads, so trials on different shards draw independent streams.
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_os_rng());
}

fn with_rng<T>(f: impl FnOnce(&mut SmallRng) -> T) -> T {
    RNG.with(|cell| f(&mut cell.borrow_mut()))
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

struct NormalSampler;

impl Executable for NormalSampler {
    fn execute(&self, args: &[Value]) -> EngineResult<Vec<Value>> {
        arity(args, 2, "Normal")?;
        let mean = args[0].as_scalar()?;
        let stddev = args[1].as_scalar()?;
        let dist = Normal::new(mean, stddev)
            .map_err(|e| EngineError::new(ErrorKind::InvalidSamplerParameters, e.to_string()))?;
        let sample = with_rng(|rng| dist.sample(rng));
        Ok(single(Value::Scalar(sample)))
    }
}

struct UniformSampler;

impl Executable for UniformSampler {
    fn execute(&self, args: &[Value]) -> EngineResult<Vec<Value>> {
        arity(args, 2, "Uniform")?;
        let min = args[0].as_scalar()?;
        let max = args[1].as_scalar()?;
        let dist = Uniform::new(min, max)
            .map_err(|e| EngineError::new(ErrorKind::InvalidSamplerParameters, e.to_string()))?;
        let sample = with_rng(|rng| dist.sample(rng));
        Ok(single(Value::Scalar(sample)))
    }
}

struct BernoulliSampler;

impl Executable for BernoulliSampler {
    fn execute(&self, args: &[Value]) -> EngineResult<Vec<Value>> {
        arity(args, 1, "Bernoulli")?;
        let p = args[0].as_scalar()?;
        let dist =
            Bernoulli::new(p).map_err(|e| EngineError::new(ErrorKind::InvalidSamplerParameters, e.to_string()))?;
        let sample = with_rng(|rng| dist.sample(rng));
        Ok(single(Value::Scalar(if sample { 1.0 } else { 0.0 })))
    }
}

struct LognormalSampler;

impl Executable for LognormalSampler {
    fn execute(&self, args: &[Value]) -> EngineResult<Vec<Value>> {
        arity(args, 2, "Lognormal")?;
        let log_mean = args[0].as_scalar()?;
        let log_stddev = args[1].as_scalar()?;
        let dist = LogNormal::new(log_mean, log_stddev)
            .map_err(|e| EngineError::new(ErrorKind::InvalidSamplerParameters, e.to_string()))?;
        let sample = with_rng(|rng| dist.sample(rng));
        Ok(single(Value::Scalar(sample)))
    }
}

/// draws `g1 / (g1 + g2)` where `g1 ~ Gamma(alpha, 1)`, `g2 ~ Gamma(beta, 1)`.
fn sample_beta_ratio(alpha: f64, beta: f64) -> EngineResult<f64> {
    if alpha <= 0.0 || beta <= 0.0 {
        return Err(EngineError::new(ErrorKind::InvalidSamplerParameters, "Beta distribution parameters must be positive"));
    }
    let gamma1 = Gamma::new(alpha, 1.0)
        .map_err(|e| EngineError::new(ErrorKind::InvalidSamplerParameters, e.to_string()))?;
    let gamma2 = Gamma::new(beta, 1.0)
        .map_err(|e| EngineError::new(ErrorKind::InvalidSamplerParameters, e.to_string()))?;
    let (g1, g2) = with_rng(|rng| (gamma1.sample(rng), gamma2.sample(rng)));
    if g1 + g2 == 0.0 {
        Ok(0.0)
    } else {
        Ok(g1 / (g1 + g2))
    }
}

struct BetaSampler;

impl Executable for BetaSampler {
    fn execute(&self, args: &[Value]) -> EngineResult<Vec<Value>> {
        arity(args, 2, "Beta")?;
        let alpha = args[0].as_scalar()?;
        let beta = args[1].as_scalar()?;
        let sample = sample_beta_ratio(alpha, beta)?;
        Ok(single(Value::Scalar(sample)))
    }
}

struct PertSampler;

impl Executable for PertSampler {
    fn execute(&self, args: &[Value]) -> EngineResult<Vec<Value>> {
        arity(args, 3, "Pert")?;
        let min = args[0].as_scalar()?;
        let most_likely = args[1].as_scalar()?;
        let max = args[2].as_scalar()?;
        if min > most_likely || most_likely > max || min == max {
            return Err(EngineError::new(
                ErrorKind::InvalidSamplerParameters,
                "invalid PERT parameters: must be min <= mostLikely <= max and min != max",
            ));
        }
        const GAMMA: f64 = 4.0;
        let alpha = 1.0 + GAMMA * (most_likely - min) / (max - min);
        let beta = 1.0 + GAMMA * (max - most_likely) / (max - min);
        let beta_sample = sample_beta_ratio(alpha, beta)?;
        Ok(single(Value::Scalar(min + beta_sample * (max - min))))
    }
}

struct TriangularSampler;

impl Executable for TriangularSampler {
    fn execute(&self, args: &[Value]) -> EngineResult<Vec<Value>> {
        arity(args, 3, "Triangular")?;
        let min = args[0].as_scalar()?;
        let most_likely = args[1].as_scalar()?;
        let max = args[2].as_scalar()?;
        if min > most_likely || most_likely > max {
            return Err(EngineError::new(
                ErrorKind::InvalidSamplerParameters,
                "invalid Triangular parameters: must be min <= mostLikely <= max",
            ));
        }
        let u: f64 = with_rng(|rng| rng.random_range(0.0..1.0));
        let fc = (most_likely - min) / (max - min);
        let result = if u < fc {
            min + (u * (max - min) * (most_likely - min)).sqrt()
        } else {
            max - ((1.0 - u) * (max - min) * (max - most_likely)).sqrt()
        };
        Ok(single(Value::Scalar(result)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_sample_lies_in_range() {
        let out = UniformSampler.execute(&[Value::Scalar(1.0), Value::Scalar(2.0)]).unwrap();
        let v = out[0].as_scalar().unwrap();
        assert!((1.0..2.0).contains(&v));
    }

    #[test]
    fn bernoulli_sample_is_zero_or_one() {
        let out = BernoulliSampler.execute(&[Value::Scalar(0.5)]).unwrap();
        let v = out[0].as_scalar().unwrap();
        assert!(v == 0.0 || v == 1.0);
    }

    #[test]
    fn beta_requires_positive_parameters() {
        let err = BetaSampler.execute(&[Value::Scalar(0.0), Value::Scalar(1.0)]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidSamplerParameters);
    }

    #[test]
    fn pert_rejects_degenerate_range() {
        let err = PertSampler
            .execute(&[Value::Scalar(5.0), Value::Scalar(5.0), Value::Scalar(5.0)])
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidSamplerParameters);
    }

    #[test]
    fn triangular_sample_lies_in_range() {
        let out = TriangularSampler
            .execute(&[Value::Scalar(0.0), Value::Scalar(5.0), Value::Scalar(10.0)])
            .unwrap();
        let v = out[0].as_scalar().unwrap();
        assert!((0.0..=10.0).contains(&v));
    }
}
