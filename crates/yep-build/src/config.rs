use crate::ThisError;
use serde::Deserialize;
use std::path::PathBuf;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid generator config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid generator config: '{field}' must be a Rust path, got '{value}'")]
    InvalidPath { field: &'static str, value: String },
}

///
/// GenerateConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateConfig {
    /// Directory the pool files are written to; it is created when missing.
    pub output_dir: PathBuf,

    /// Module path the generated pool is compiled under.
    pub pool_path: String,

    /// Module path of the recordset runtime the generated code calls into.
    pub runtime_path: String,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("pool"),
            pool_path: "crate::pool".to_string(),
            runtime_path: "yep::models".to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    generate: GenerateConfig,
}

impl GenerateConfig {
    /// Read the `[generate]` table of a TOML document; missing keys keep their defaults.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(source)?;
        file.generate.validate()?;

        Ok(file.generate)
    }

    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("pool_path", &self.pool_path),
            ("runtime_path", &self.runtime_path),
        ] {
            if syn::parse_str::<syn::Path>(value).is_err() {
                return Err(ConfigError::InvalidPath {
                    field,
                    value: value.clone(),
                });
            }
        }

        Ok(())
    }

    /// Last segment of the runtime path, the name generated code refers to it by.
    #[must_use]
    pub fn runtime_alias(&self) -> &str {
        last_segment(&self.runtime_path)
    }
}

pub(crate) fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}
