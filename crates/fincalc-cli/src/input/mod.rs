pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Resolve a typed input from `--input <file>` or piped stdin JSON.
/// Returns None when neither is present so the caller can fall back to
/// individual flags.
pub fn resolve<T: DeserializeOwned>(
    input_path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = input_path {
        return Ok(Some(file::read_json(path)?));
    }
    if let Some(value) = stdin::read_stdin()? {
        return Ok(Some(serde_json::from_value(value)?));
    }
    Ok(None)
}
