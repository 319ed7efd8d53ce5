use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use oax_core::values::InputValues;

/// Values the user entered on earlier runs, keyed by input key.
#[derive(Debug, Default)]
pub struct InputStore {
    path: PathBuf,
    values: IndexMap<String, String>,
}

impl InputStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_yaml_ng::from_str::<Option<IndexMap<String, String>>>(&content)
                .with_context(|| format!("failed to parse {}", path.display()))?
                .unwrap_or_default()
        } else {
            IndexMap::new()
        };
        log::debug!("{} stored inputs in {}", values.len(), path.display());
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn values(&self) -> &IndexMap<String, String> {
        &self.values
    }

    /// Stored values overridden by `overrides`.
    pub fn merged(&self, overrides: &IndexMap<String, String>) -> IndexMap<String, String> {
        let mut merged = self.values.clone();
        merged.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }

    /// Remember `values` and write the store back to disk.
    pub fn remember(&mut self, values: &IndexMap<String, String>) -> Result<()> {
        self.values = self.merged(values);
        let content = serde_yaml_ng::to_string(&self.values)?;
        fs::write(&self.path, content)
            .with_context(|| format!("failed to write {}", self.path.display()))
    }
}

impl InputValues for InputStore {
    fn value(&self, key: &str) -> Option<&str> {
        self.values.value(key)
    }
}

/// Parse `key=value` pairs given on the command line. The value may be empty.
pub fn parse_assignments(pairs: &[String]) -> Result<IndexMap<String, String>> {
    pairs
        .iter()
        .map(|pair| {
            let (key, value) = pair
                .split_once('=')
                .with_context(|| format!("expected key=value, got '{pair}'"))?;
            Ok((key.to_string(), value.to_string()))
        })
        .collect()
}
