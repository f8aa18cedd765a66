//! Rule configuration loading.
//!
//! The configuration parameter is either a JSON object literal mapping
//! identity suffixes to argument indices, or `@` followed by the path of a
//! file containing that JSON. The user table is merged under the built-in
//! defaults; the engine only ever sees the merged table.

use std::path::{Path, PathBuf};

use outguard_check::rules::{default_rules, RuleTable};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config JSON {input:?}")]
    Parse {
        input: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Build the final rule table from the CLI configuration parameter.
/// An empty parameter yields the defaults alone.
pub fn load_rules(param: &str) -> Result<RuleTable, ConfigError> {
    let user = if param.is_empty() {
        RuleTable::new()
    } else if let Some(path) = param.strip_prefix('@') {
        load_user_rules_file(Path::new(path))?
    } else {
        parse_user_rules(param)?
    };
    Ok(RuleTable::merge(default_rules(), user))
}

fn load_user_rules_file(path: &Path) -> Result<RuleTable, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_user_rules(&contents)
}

fn parse_user_rules(json: &str) -> Result<RuleTable, ConfigError> {
    serde_json::from_str(json).map_err(|source| ConfigError::Parse {
        input: json.to_string(),
        source,
    })
}
