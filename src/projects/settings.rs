use crate::omp_frontend::Flag;
use crate::omp_frontend::compiler_errors::CompilerError;
use crate::{return_config_error, return_file_error};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "omp_lower.toml";
pub const FIXTURE_FILE_EXTENSION: &str = "toml";

// Rough guesses to avoid reallocating while a fixture is loaded.
// Most test programs have a handful of scopes and a few dozen names.
pub const MINIMUM_STRING_TABLE_CAPACITY: usize = 32;
pub const MINIMUM_LIKELY_SYMBOLS: usize = 16;

/// What to do with a clause item that can't be lowered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingObjectPolicy {
    /// Stop lowering the directive and report the item
    #[default]
    Error,

    /// Leave the item out and keep going, with a warning
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoweringConfig {
    /// In data clauses, treat `a(N)` as `a(N:N)`
    pub treat_index_as_section: bool,
    pub missing_objects: MissingObjectPolicy,
}

impl Default for LoweringConfig {
    fn default() -> Self {
        LoweringConfig {
            treat_index_as_section: true,
            missing_objects: MissingObjectPolicy::Error,
        }
    }
}

impl LoweringConfig {
    /// Reads the config file at `path`.
    /// A missing file means every setting keeps its default.
    pub fn load(path: &Path) -> Result<Self, CompilerError> {
        if !path.exists() {
            return Ok(LoweringConfig::default());
        }

        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => return_file_error!(path, format!("Could not read config file: {e}")),
        };

        Self::parse(&source).map_err(|e| e.with_file_path(path.to_path_buf()))
    }

    pub fn parse(source: &str) -> Result<Self, CompilerError> {
        match toml::from_str(source) {
            Ok(config) => Ok(config),
            Err(e) => return_config_error!(format!("Invalid config: {e}")),
        }
    }

    /// CLI flags win over whatever the config file says.
    pub fn with_flags(mut self, flags: &[Flag]) -> Self {
        for flag in flags {
            match flag {
                Flag::SkipMissingObjects => self.missing_objects = MissingObjectPolicy::Skip,
                Flag::IndexAsElement => self.treat_index_as_section = false,
                Flag::DisableWarnings | Flag::JsonOutput => {}
            }
        }
        self
    }
}
