//! turns recipe JSON into a [`crate::program::Program`]: parsing, then
//! compiling names and nested calls down to slot indices and constructed
//! [`crate::executable::Executable`]s.

mod compile;
mod plan;
mod recipe;

pub use compile::compile;
pub use plan::ArgPlan;
pub use plan::Step;
pub use recipe::RawRecipe;

use crate::error::EngineError;
use crate::error::ErrorKind;

/// parses recipe JSON text into its raw, uninterpreted shape.
pub fn parse_recipe(text: &str) -> Result<RawRecipe, EngineError> {
    serde_json::from_str(text)
        .map_err(|e| EngineError::new(ErrorKind::RecipeParseError, format!("failed to parse recipe JSON: {e}")))
}
