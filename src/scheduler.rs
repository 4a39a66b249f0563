//! partitions trials across OS threads, clones the snapshot context once per
//! trial, and reassembles results in shard order.

use std::sync::Arc;

use crate::context::Context;
use crate::error::EngineError;
use crate::interpreter;
use crate::program::Program;
use crate::value::Value;

/// progress is reported via this hook once per completed trial, invoked from
/// whichever worker thread finished it; implementations must be `Sync`.
pub trait ProgressReporter: Send + Sync {
    fn trial_finished(&self);
}

impl ProgressReporter for () {
    fn trial_finished(&self) {}
}

/// runs every trial in `program` across `std::thread::available_parallelism()`
/// worker threads and returns the output values in trial order.
///
/// trials are split into contiguous shards; any remainder lands entirely on
/// shard 0. each worker clones the pre-trial snapshot context once per trial
/// -- the only per-trial allocation in the hot loop. the first error observed
/// across any shard is returned after every thread has joined.
pub fn run(program: &Program, snapshot: &Context, progress: Arc<dyn ProgressReporter>) -> Result<Vec<Value>, EngineError> {
    let num_threads = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1).max(1);
    let trials_per_thread = program.num_trials / num_threads;
    let remainder = program.num_trials % num_threads;

    let results: Vec<Result<Vec<Value>, EngineError>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..num_threads)
            .map(|shard| trials_per_thread + if shard == 0 { remainder } else { 0 })
            .filter(|trials_for_shard| *trials_for_shard > 0)
            .map(|trials_for_shard| {
                let progress = Arc::clone(&progress);
                scope.spawn(move || run_shard(program, snapshot, trials_for_shard, progress.as_ref()))
            })
            .collect();
        handles.into_iter().map(|h| h.join().expect("worker thread panicked")).collect()
    });

    let mut all = Vec::with_capacity(program.num_trials);
    for shard_result in results {
        all.extend(shard_result?);
    }
    Ok(all)
}

fn run_shard(
    program: &Program,
    snapshot: &Context,
    num_trials: usize,
    progress: &dyn ProgressReporter,
) -> Result<Vec<Value>, EngineError> {
    let mut results = Vec::with_capacity(num_trials);
    for _ in 0..num_trials {
        let mut trial_context = snapshot.clone();
        interpreter::run_steps(&program.per_trial_steps, &mut trial_context)?;
        results.push(trial_context.get(program.output_slot)?.clone());
        progress.trial_finished();
    }
    Ok(results)
}
