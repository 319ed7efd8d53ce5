use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Explorer configuration loaded from `.oax.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Document loaded when no input is given on the command line.
    pub input: String,
    /// File that remembers the values entered for each input key.
    pub inputs_file: String,
    /// Base URL used for documents without servers.
    pub fallback_base_url: String,
    /// Timeout for a whole call, in seconds.
    pub timeout_secs: u64,
    /// Directory searched for API documents to pick from.
    pub api_dir: String,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            input: "openapi.yaml".to_string(),
            inputs_file: ".oax-inputs.yaml".to_string(),
            fallback_base_url: "https://developer.telekom.com".to_string(),
            timeout_secs: 10,
            api_dir: ".".to_string(),
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".oax.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<ExplorerConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: ExplorerConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# oax configuration
input: openapi.yaml

# previously entered values, keyed by input key (baseUrl.0.region, id, application/json.name, ...)
inputs_file: .oax-inputs.yaml

# used when the document declares no servers
fallback_base_url: https://developer.telekom.com

# whole-call timeout in seconds
timeout_secs: 10

# where `oax apis` looks for .yml/.yaml documents
api_dir: .
"#
}
