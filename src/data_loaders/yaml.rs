// ~/src/data_loaders/yaml.rs

use std::{fs, path::Path};

use serde_yaml::Value;

use crate::error::{Result, StitchError};

/// Reads and parses one YAML document. An empty file yields `Value::Null`.
pub fn load_yaml(path: &Path) -> Result<Value> {
    let txt = fs::read_to_string(path)
        .map_err(|e| StitchError::io(format!("could not read config {}", path.display()), e))?;

    if txt.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_yaml::from_str(&txt).map_err(|e| StitchError::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
