//! Compilation-unit loading.
//!
//! Paths name unit JSON files produced by the front-end bridge, or
//! directories scanned recursively for `*.json`. Every failing unit is
//! collected; loading fails as a whole with all failures reported at once
//! rather than stopping at the first.

use std::path::{Path, PathBuf};

use outguard_ir::ast::Unit;
use walkdir::WalkDir;

#[derive(Debug, thiserror::Error)]
#[error("failed to load compilation units:\n{}", .failures.join("\n"))]
pub struct LoadError {
    pub failures: Vec<String>,
}

/// Load every unit named by `paths`. Directory entries are discovered in
/// file-name order so runs are reproducible.
pub fn load_units(paths: &[PathBuf]) -> Result<Vec<Unit>, LoadError> {
    let mut files = Vec::new();
    let mut failures = Vec::new();

    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path).sort_by_file_name() {
                match entry {
                    Ok(entry)
                        if entry.file_type().is_file()
                            && entry.path().extension().is_some_and(|e| e == "json") =>
                    {
                        files.push(entry.into_path());
                    }
                    Ok(_) => {}
                    Err(err) => failures.push(format!("{}: {err}", path.display())),
                }
            }
        } else {
            files.push(path.clone());
        }
    }

    let mut units = Vec::new();
    for file in &files {
        match load_unit(file) {
            Ok(unit) => units.push(unit),
            Err(failure) => failures.push(failure),
        }
    }

    if failures.is_empty() {
        Ok(units)
    } else {
        Err(LoadError { failures })
    }
}

fn load_unit(path: &Path) -> Result<Unit, String> {
    let data =
        std::fs::read_to_string(path).map_err(|err| format!("{}: {err}", path.display()))?;
    Unit::from_json(&data).map_err(|err| format!("{}: {err}", path.display()))
}
