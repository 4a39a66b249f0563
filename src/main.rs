use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser;
use monte_carlo_engine::io;
use monte_carlo_engine::scheduler::ProgressReporter;

/// Runs a declarative JSON recipe as a parallel Monte Carlo simulation.
#[derive(Parser, Debug)]
#[command(name = "engine", version, about)]
struct Cli {
    /// path to the recipe JSON file
    recipe: PathBuf,

    /// print a single-line JSON summary instead of the full run
    #[arg(long)]
    preview: bool,

    /// increase log verbosity (repeatable: -v, -vv)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// suppress all logging below warnings
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    monte_carlo_engine::init_logging(log_level(&cli));

    let (program, snapshot) =
        monte_carlo_engine::prepare(&cli.recipe).with_context(|| format!("preparing recipe '{}'", cli.recipe.display()))?;

    let progress: Arc<dyn ProgressReporter> = if cli.preview || cli.quiet {
        Arc::new(())
    } else {
        Arc::new(monte_carlo_engine::progress_bar(program.num_trials))
    };

    let results = monte_carlo_engine::run(&program, &snapshot, progress)
        .with_context(|| format!("running recipe '{}'", cli.recipe.display()))?;

    if cli.preview {
        println!("{}", io::summarize(&results));
        return Ok(());
    }

    io::print_statistics(&results);

    if let Some(output_path) = &program.output_file_path {
        io::write_results_csv(std::path::Path::new(output_path), &results)
            .with_context(|| format!("writing results to '{output_path}'"))?;
        println!("\n--- Wrote {} trial(s) to {output_path} ---", results.len());
    }

    println!("\nExecution finished.");
    Ok(())
}

fn log_level(cli: &Cli) -> log::LevelFilter {
    if cli.quiet {
        return log::LevelFilter::Warn;
    }
    match cli.verbose {
        0 => std::env::var("RUST_LOG")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}
