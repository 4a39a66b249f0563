//! the boundary adapters: reading a recipe from disk, writing results back
//! out, and summarising a run for a human or for `--preview` scripting.

mod preview;
mod recipe_reader;
mod result_writer;
mod summary;

pub use preview::summarize;
pub use recipe_reader::read_recipe;
pub use result_writer::write_results_csv;
pub use summary::print_statistics;
