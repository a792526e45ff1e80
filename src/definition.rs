//! Snippet definition file model and loader
//!
//! A definition file is a YAML document with three optional top-level keys:
//! `snippets` (list of records), `variables` (name to literal value) and
//! `verbatim_snippets` (platform name to a list of pre-formatted entries).

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{de, Deserialize, Deserializer};
use thiserror::Error;

use crate::platform::Platform;

/// Errors that can occur when loading a definition file
#[derive(Error, Debug)]
pub enum DefinitionError {
    #[error("failed to read definition file '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid definition file '{}': {source}", path.display())]
    Invalid {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("invalid definition YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// The whole contents of a definition file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Definition {
    #[serde(default, deserialize_with = "null_as_default")]
    pub snippets: Vec<Snippet>,

    /// Variables in source order
    #[serde(default, deserialize_with = "null_as_default")]
    pub variables: IndexMap<String, String>,

    /// Pre-formatted entries per platform name, appended without processing
    #[serde(
        default,
        rename = "verbatim_snippets",
        deserialize_with = "null_as_default"
    )]
    pub verbatim: BTreeMap<String, Vec<String>>,
}

/// A single trigger/replacement record
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Snippet {
    pub trigger: String,
    pub replacement: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: SnippetOptions,
    #[serde(default)]
    pub priority: Option<i64>,

    /// Platforms this record is restricted to. Empty means every platform.
    #[serde(default, deserialize_with = "null_as_default")]
    pub target_platforms: Vec<String>,

    /// Per-platform partial records applied on top of this one
    #[serde(default, deserialize_with = "null_as_default")]
    pub platforms: BTreeMap<String, SnippetOverride>,
}

/// A partial record for one platform. Unset fields keep the base value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SnippetOverride {
    #[serde(default)]
    pub trigger: Option<String>,
    #[serde(default)]
    pub replacement: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: SnippetOptions,
    #[serde(default)]
    pub priority: Option<i64>,
}

/// Boolean expansion options.
///
/// Every known option is tri-state so that an override can tell "not
/// mentioned" apart from "explicitly disabled". Besides YAML booleans the
/// YAML 1.1 words (`yes`/`no`/`on`/`off` and capitalised forms) are accepted.
/// Keys this tool does not know are kept in `extra` and merged like the
/// known ones, but never rendered.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SnippetOptions {
    /// Accepted and merged, but no target currently emits a flag for it
    #[serde(deserialize_with = "yaml_bool")]
    pub regex: Option<bool>,
    #[serde(deserialize_with = "yaml_bool")]
    pub math: Option<bool>,
    #[serde(deserialize_with = "yaml_bool")]
    pub inline_math: Option<bool>,
    #[serde(deserialize_with = "yaml_bool")]
    pub display_math: Option<bool>,
    #[serde(deserialize_with = "yaml_bool")]
    pub text: Option<bool>,
    #[serde(deserialize_with = "yaml_bool")]
    pub code: Option<bool>,
    #[serde(deserialize_with = "yaml_bool")]
    pub auto: Option<bool>,
    #[serde(deserialize_with = "yaml_bool")]
    pub visual: Option<bool>,
    #[serde(deserialize_with = "yaml_bool")]
    pub word_boundary: Option<bool>,
    #[serde(deserialize_with = "yaml_bool")]
    pub in_word: Option<bool>,
    #[serde(deserialize_with = "yaml_bool")]
    pub beginning_of_line: Option<bool>,
    #[serde(deserialize_with = "yaml_bool")]
    pub multi_line: Option<bool>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Snippet {
    /// Create a record with no options or overrides
    pub fn new(trigger: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into(),
            replacement: replacement.into(),
            description: None,
            options: SnippetOptions::default(),
            priority: None,
            target_platforms: Vec::new(),
            platforms: BTreeMap::new(),
        }
    }

    /// Whether this record should be rendered for `platform`
    pub fn targets(&self, platform: Platform) -> bool {
        self.target_platforms.is_empty()
            || self
                .target_platforms
                .iter()
                .any(|name| name == platform.name())
    }

    /// The override declared for `platform`, if any
    pub fn override_for(&self, platform: Platform) -> Option<&SnippetOverride> {
        self.platforms.get(platform.name())
    }
}

impl Definition {
    /// Load a definition from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, DefinitionError> {
        let content = std::fs::read_to_string(path).map_err(|source| DefinitionError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&content).map_err(|e| match e {
            DefinitionError::Parse(source) => DefinitionError::Invalid {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Load a definition from a YAML string
    ///
    /// An empty document yields an empty definition. Merge keys
    /// (`<<: *anchor`) are applied before the records are read.
    pub fn from_str(content: &str) -> Result<Self, DefinitionError> {
        let mut value: serde_yaml::Value = serde_yaml::from_str(content)?;
        if value.is_null() {
            return Ok(Self::default());
        }
        value.apply_merge()?;
        Ok(serde_yaml::from_value(value)?)
    }

    /// Verbatim entries for `platform`, empty if none are declared
    pub fn verbatim_for(&self, platform: Platform) -> &[String] {
        self.verbatim
            .get(platform.name())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Treat an explicit YAML `null` the same as a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum YamlBool {
    Bool(bool),
    Word(String),
}

/// Accept YAML 1.1 boolean words alongside real booleans
fn yaml_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<YamlBool>::deserialize(deserializer)? {
        None => Ok(None),
        Some(YamlBool::Bool(b)) => Ok(Some(b)),
        Some(YamlBool::Word(word)) => match word.as_str() {
            "yes" | "Yes" | "YES" | "on" | "On" | "ON" | "true" | "True" | "TRUE" => Ok(Some(true)),
            "no" | "No" | "NO" | "off" | "Off" | "OFF" | "false" | "False" | "FALSE" => {
                Ok(Some(false))
            }
            _ => Err(de::Error::invalid_value(
                de::Unexpected::Str(&word),
                &"a boolean",
            )),
        },
    }
}
