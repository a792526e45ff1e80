//! Build configuration
//!
//! Output paths come from three environment variables, which may also be
//! declared in a `.env` file in the working directory. Everything is
//! resolved once at startup into a [`BuildConfig`]; renderers never look at
//! the environment.

use std::collections::BTreeMap;
use std::io;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// Definition file read from the working directory
pub const DEFAULT_INPUT: &str = "snippets.yaml";

/// Optional file of `KEY=VALUE` environment defaults
pub const ENV_FILE: &str = ".env";

pub const OBSIDIAN_SNIPPETS_VAR: &str = "OBSIDIAN_SNIPPETS_PATH";
pub const OBSIDIAN_VARIABLES_VAR: &str = "OBSIDIAN_VARIABLES_PATH";
pub const LATEX_SNIPPETS_VAR: &str = "LATEX_SNIPPETS_PATH";

pub const DEFAULT_OBSIDIAN_SNIPPETS: &str = "obsidian_snippets.js";
pub const DEFAULT_OBSIDIAN_VARIABLES: &str = "obsidian_variables.json";
pub const DEFAULT_LATEX_SNIPPETS: &str = "latex.hsnips";

/// Errors that can occur while assembling the configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read env file '{}': {source}", path.display())]
    EnvFile {
        path: PathBuf,
        source: dotenvy::Error,
    },

    #[error("cannot determine working directory: {0}")]
    WorkingDirectory(#[source] io::Error),
}

/// Values parsed from a `.env` file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvFile {
    values: BTreeMap<String, String>,
}

impl EnvFile {
    /// Load an env file. A missing file is the same as an empty one.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let to_config_error = |source: dotenvy::Error| ConfigError::EnvFile {
            path: path.to_path_buf(),
            source,
        };
        match dotenvy::from_path_iter(path) {
            Ok(iter) => Self::collect(iter).map_err(to_config_error),
            Err(e) if e.not_found() => Ok(Self::default()),
            Err(e) => Err(to_config_error(e)),
        }
    }

    /// Parse env file contents
    ///
    /// Quoting, escapes, `export` prefixes, comments and `${VAR}`
    /// expansion follow the usual dotenv rules. Malformed lines are skipped
    /// with a warning.
    pub fn parse(content: &str) -> Result<Self, dotenvy::Error> {
        Self::collect(dotenvy::from_read_iter(content.as_bytes()))
    }

    fn collect<R: io::Read>(iter: dotenvy::Iter<R>) -> Result<Self, dotenvy::Error> {
        let mut values = BTreeMap::new();
        for item in iter {
            match item {
                Ok((key, value)) => {
                    values.insert(key, value);
                }
                Err(dotenvy::Error::LineParse(line, index)) => {
                    log::warn!("skipping malformed env line at {}: {}", index, line);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(Self { values })
    }

    /// Value declared in the file, ignoring the process environment
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Process environment first, then the file
    pub fn lookup(&self, key: &str) -> Option<String> {
        std::env::var(key)
            .ok()
            .or_else(|| self.get(key).map(str::to_string))
    }
}

/// Resolved locations of the three generated files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub obsidian_snippets: PathBuf,
    pub obsidian_variables: PathBuf,
    pub latex_snippets: PathBuf,
}

impl OutputPaths {
    /// Resolve output paths from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>, cwd: &Path) -> Self {
        let path = |var: &str, default: &str| {
            let raw = lookup(var).unwrap_or_else(|| default.to_string());
            resolve_path(&raw, cwd)
        };

        Self {
            obsidian_snippets: path(OBSIDIAN_SNIPPETS_VAR, DEFAULT_OBSIDIAN_SNIPPETS),
            obsidian_variables: path(OBSIDIAN_VARIABLES_VAR, DEFAULT_OBSIDIAN_VARIABLES),
            latex_snippets: path(LATEX_SNIPPETS_VAR, DEFAULT_LATEX_SNIPPETS),
        }
    }

    /// Resolve output paths from the process environment and `env_file`
    pub fn from_env(env_file: &EnvFile, cwd: &Path) -> Self {
        Self::from_lookup(|key| env_file.lookup(key), cwd)
    }

    /// Every path, in write order
    pub fn all(&self) -> [&Path; 3] {
        [
            &self.obsidian_snippets,
            &self.obsidian_variables,
            &self.latex_snippets,
        ]
    }
}

/// Configuration for a build or clean run
#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    /// Definition file to read
    pub input: PathBuf,
    /// Where generated files are written
    pub outputs: OutputPaths,
}

impl BuildConfig {
    /// Create a configuration reading `snippets.yaml` from `cwd`
    pub fn new(outputs: OutputPaths, cwd: &Path) -> Self {
        Self {
            input: cwd.join(DEFAULT_INPUT),
            outputs,
        }
    }

    /// Assemble the configuration from the working directory, its `.env`
    /// file and the process environment
    pub fn from_environment() -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(ConfigError::WorkingDirectory)?;
        let env_file = EnvFile::load(&cwd.join(ENV_FILE))?;
        Ok(Self::new(OutputPaths::from_env(&env_file, &cwd), &cwd))
    }

    /// Set the definition file
    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = input.into();
        self
    }

    /// Set the output paths
    pub fn with_outputs(mut self, outputs: OutputPaths) -> Self {
        self.outputs = outputs;
        self
    }
}

/// Expand a leading `~`, anchor relative paths at `cwd` and normalize
/// `.` and `..` components
pub fn resolve_path(raw: &str, cwd: &Path) -> PathBuf {
    let path = expand_home(raw);
    let absolute = if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    };
    normalize(&absolute)
}

fn expand_home(input: &str) -> PathBuf {
    if input == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }

    if let Some(rest) = input.strip_prefix("~/").or_else(|| input.strip_prefix("~\\")) {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }

    PathBuf::from(input)
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
