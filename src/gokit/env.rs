use crate::utils::error::{KitError, Result};
use std::path::Path;

/// `[package].name` of the `Cargo.toml` in `dir`.
pub fn get_module_name<P: AsRef<Path>>(dir: P) -> Result<String> {
    let manifest = dir.as_ref().join("Cargo.toml");
    let content = std::fs::read_to_string(&manifest)?;
    let table: toml::Table = toml::from_str(&content)?;

    table
        .get("package")
        .and_then(|package| package.get("name"))
        .and_then(|name| name.as_str())
        .map(str::to_string)
        .ok_or_else(|| KitError::MissingConfigError {
            field: format!("{}: package.name", manifest.display()),
        })
}
