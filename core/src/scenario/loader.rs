//! Scenario files
//!
//! Loads [`ScenarioDescriptor`]s from JSON files

use super::ScenarioDescriptor;
use std::fs;
use std::path::Path;

/// Scenario loader result
pub type LoadResult<T> = Result<T, LoadError>;

/// Scenario loading errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// File or directory not found
    FileNotFound(String),

    /// JSON parsing error
    ParseError(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::FileNotFound(path) => write!(f, "File not found: {}", path),
            LoadError::ParseError(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for LoadError {}

/// Load a single scenario from a JSON file
pub fn load_scenario<P: AsRef<Path>>(path: P) -> LoadResult<ScenarioDescriptor> {
    let path = path.as_ref();

    let contents = fs::read_to_string(path)
        .map_err(|e| LoadError::FileNotFound(format!("{}: {}", path.display(), e)))?;

    serde_json::from_str(&contents)
        .map_err(|e| LoadError::ParseError(format!("{}: {}", path.display(), e)))
}

/// Load every `*.json` scenario in a directory, sorted by file name
///
/// Stops at the first file that fails to load.
pub fn load_scenarios<P: AsRef<Path>>(dir: P) -> LoadResult<Vec<ScenarioDescriptor>> {
    let dir = dir.as_ref();

    if !dir.is_dir() {
        return Err(LoadError::FileNotFound(format!(
            "{} is not a directory",
            dir.display()
        )));
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)
        .map_err(|e| LoadError::FileNotFound(format!("{}: {}", dir.display(), e)))?
    {
        let entry = entry.map_err(|e| LoadError::FileNotFound(e.to_string()))?;
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("json") {
            paths.push(path);
        }
    }
    paths.sort();

    paths.iter().map(load_scenario).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let err = load_scenario("does/not/exist.json").unwrap_err();
        assert!(matches!(err, LoadError::FileNotFound(_)));
        assert!(err.to_string().starts_with("File not found"));
    }

    #[test]
    fn test_not_a_directory() {
        assert!(matches!(
            load_scenarios("does/not/exist"),
            Err(LoadError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_parse_error() {
        let path = std::env::temp_dir().join("bombe_loader_parse_error.json");
        fs::write(&path, "{ \"id\": 3 }").unwrap();
        assert!(matches!(load_scenario(&path), Err(LoadError::ParseError(_))));
        fs::remove_file(&path).ok();
    }
}
