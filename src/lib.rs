//! Snippet Builder - one snippet definition, two editors
//!
//! This library turns a YAML snippet definition into an Obsidian LaTeX Suite
//! snippet file, its variable map, and a VS Code HyperSnips file.
//!
//! # Example
//!
//! ```rust
//! use snippet_builder::{render_all, Definition};
//!
//! let definition = Definition::from_str(r#"
//! snippets:
//!   - trigger: "mk"
//!     replacement: "$$0$"
//!     options: { math: true, auto: true }
//! "#).unwrap();
//!
//! let outputs = render_all(&definition).unwrap();
//! assert!(outputs.obsidian_snippets.contains(r#"options: "mA""#));
//! assert!(outputs.latex_snippets.contains("context math(context)"));
//! ```

pub mod clean;
pub mod config;
pub mod definition;
pub mod platform;
pub mod renderer;

pub use clean::{clean_files, CleanEntry, CleanOutcome};
pub use config::{BuildConfig, ConfigError, EnvFile, OutputPaths};
pub use definition::{Definition, DefinitionError, Snippet, SnippetOptions, SnippetOverride};
pub use platform::{resolve, resolve_all, Platform, ResolvedSnippet};
pub use renderer::{render_all, RenderedOutputs};

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur during a build
#[derive(Debug, Error)]
pub enum BuildError {
    /// Error loading the definition file
    #[error(transparent)]
    Definition(#[from] DefinitionError),

    /// Error assembling the configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Error serializing the variable map
    #[error("failed to serialize variables: {0}")]
    Variables(#[from] serde_json::Error),

    /// Error writing an output file
    #[error("failed to write '{}': {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Read the definition file and write all three outputs
///
/// Files are written in order; a failed write leaves earlier files in place.
pub fn build(config: &BuildConfig) -> Result<(), BuildError> {
    let definition = Definition::from_file(&config.input)?;
    build_definition(&definition, &config.outputs)
}

/// Render `definition` and write all three outputs
pub fn build_definition(definition: &Definition, outputs: &OutputPaths) -> Result<(), BuildError> {
    let rendered = render_all(definition)?;

    write_output(&outputs.obsidian_snippets, &rendered.obsidian_snippets)?;
    write_output(&outputs.obsidian_variables, &rendered.obsidian_variables)?;
    write_output(&outputs.latex_snippets, &rendered.latex_snippets)?;

    log::info!("Snippet build process completed.");
    Ok(())
}

/// Delete the generated files named by `config`
pub fn clean(config: &BuildConfig) -> Vec<CleanEntry> {
    clean_files(config.outputs.all())
}

fn write_output(path: &Path, content: &str) -> Result<(), BuildError> {
    std::fs::write(path, content).map_err(|source| BuildError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Successfully built {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_error_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing_dir = dir.path().join("no/such/dir/out.js");
        let err = write_output(&missing_dir, "[]").unwrap_err();
        assert!(matches!(err, BuildError::Write { .. }));
        assert!(err.to_string().contains("no/such/dir/out.js"));
    }

    #[test]
    fn test_missing_definition_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let outputs = OutputPaths::from_lookup(|_| None, dir.path());
        let config = BuildConfig::new(outputs, dir.path());
        let err = build(&config).unwrap_err();
        assert!(matches!(
            err,
            BuildError::Definition(DefinitionError::Read { .. })
        ));
    }

    #[test]
    fn test_later_write_failure_keeps_earlier_files() {
        let dir = tempfile::tempdir().unwrap();
        let outputs = OutputPaths {
            obsidian_snippets: dir.path().join("obsidian_snippets.js"),
            obsidian_variables: dir.path().join("obsidian_variables.json"),
            latex_snippets: dir.path().join("missing/latex.hsnips"),
        };

        let result = build_definition(&Definition::default(), &outputs);
        assert!(matches!(result, Err(BuildError::Write { .. })));
        assert!(outputs.obsidian_snippets.exists());
        assert!(outputs.obsidian_variables.exists());
    }
}
