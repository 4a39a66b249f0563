pub mod compiler;
pub mod context;
pub mod csv_cache;
pub mod error;
pub mod executable;
pub mod functions;
pub mod interpreter;
pub mod io;
pub mod program;
pub mod registry;
pub mod scheduler;
pub mod value;

use std::path::Path;
use std::sync::Arc;

pub use error::EngineError;
pub use error::EngineResult;
pub use error::ErrorKind;
pub use value::Value;

use context::Context;
use program::Program;
use registry::FunctionRegistry;

/// compiles the recipe at `path` and runs its pre-trial phase, returning the
/// program and the snapshot context every trial clones from.
pub fn prepare(path: &Path) -> EngineResult<(Program, Context)> {
    let raw = io::read_recipe(path)?;
    let functions = FunctionRegistry::with_builtins();
    let (program, registry) = compiler::compile(raw, &functions)?;
    log::debug!(
        "compiled program: {} pre-trial step(s), {} per-trial step(s), {} variable slot(s)",
        program.pre_trial_steps.len(),
        program.per_trial_steps.len(),
        registry.len(),
    );

    let mut snapshot = Context::new(program.context_len);
    interpreter::run_steps(&program.pre_trial_steps, &mut snapshot)?;
    log::debug!("pre-trial phase complete, {} variable slot(s) allocated", snapshot.len());

    Ok((program, snapshot))
}

/// runs every trial of `program` against `snapshot`, reporting progress
/// through `progress` as each trial completes.
pub fn run(program: &Program, snapshot: &Context, progress: Arc<dyn scheduler::ProgressReporter>) -> EngineResult<Vec<Value>> {
    log::info!("running {} trial(s)", program.num_trials);
    let results = scheduler::run(program, snapshot, progress)?;
    log::info!("simulation finished, {} result(s) collected", results.len());
    Ok(results)
}

/// a progress bar driven by one tick per finished trial, matching this
/// crate's other long-running operations.
pub fn progress_bar(num_trials: usize) -> indicatif::ProgressBar {
    let tick = std::time::Duration::from_millis(100);
    let style = "{spinner:.cyan} {elapsed} ~ {percent:>3}% {wide_bar:.cyan} {pos}/{len} trials";
    let style = indicatif::ProgressStyle::with_template(style).unwrap();
    let bar = indicatif::ProgressBar::new(num_trials as u64);
    bar.set_style(style);
    bar.enable_steady_tick(tick);
    bar
}

/// initializes global logging at the given verbosity. `RUST_LOG` is honored
/// only when neither `-v` nor `-q` was passed on the command line.
pub fn init_logging(level: log::LevelFilter) {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    simplelog::TermLogger::init(level, config, simplelog::TerminalMode::Mixed, simplelog::ColorChoice::Auto)
        .expect("initialize logger");
}

impl scheduler::ProgressReporter for indicatif::ProgressBar {
    fn trial_finished(&self) {
        self.inc(1);
    }
}
