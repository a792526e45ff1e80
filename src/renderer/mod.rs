//! Renderers for the generated snippet files
//!
//! Each renderer is a pure function from resolved records (plus variables
//! and verbatim entries) to the text of one output file.

pub mod hsnips;
pub mod obsidian;
pub mod variables;

use crate::definition::Definition;
use crate::platform::{resolve_all, Platform};

/// Text of the three output files, in write order
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedOutputs {
    pub obsidian_snippets: String,
    pub obsidian_variables: String,
    pub latex_snippets: String,
}

/// Render every output file for `definition`
pub fn render_all(definition: &Definition) -> Result<RenderedOutputs, serde_json::Error> {
    let obsidian = resolve_all(&definition.snippets, Platform::Obsidian);
    let vscode = resolve_all(&definition.snippets, Platform::Vscode);
    log::debug!(
        "resolved {} of {} snippets for {}, {} for {}",
        obsidian.len(),
        definition.snippets.len(),
        Platform::Obsidian,
        vscode.len(),
        Platform::Vscode
    );

    Ok(RenderedOutputs {
        obsidian_snippets: obsidian::render(
            &obsidian,
            definition.verbatim_for(Platform::Obsidian),
        ),
        obsidian_variables: variables::render(&definition.variables)?,
        latex_snippets: hsnips::render(
            &vscode,
            &definition.variables,
            definition.verbatim_for(Platform::Vscode),
        ),
    })
}
