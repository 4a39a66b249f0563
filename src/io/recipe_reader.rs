use std::path::Path;

use crate::compiler::RawRecipe;
use crate::error::EngineError;
use crate::error::ErrorKind;

/// reads and parses a recipe JSON file from disk.
pub fn read_recipe(path: &Path) -> Result<RawRecipe, EngineError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        EngineError::new(ErrorKind::RecipeFileNotFound, format!("failed to open recipe file '{}': {e}", path.display()))
    })?;
    crate::compiler::parse_recipe(&text)
}
