//! Line-block snippet file for the VS Code HyperSnips engine

use indexmap::IndexMap;

use crate::definition::SnippetOptions;
use crate::platform::ResolvedSnippet;

/// Helper predicates referenced by `context math(context)` and
/// `context notmath(context)` guard lines. A position is in math mode when
/// the last `meta.math` scope is nested deeper than the last comment or
/// normal-text scope.
pub const PREAMBLE: &str = r#"global
function math(context) {
    return context.scopes.findLastIndex(s => s.startsWith("meta.math")) > context.scopes.findLastIndex(s => s.startsWith("comment") || s.startsWith("meta.text.normal.tex"));
}
function notmath(context) {
    return context.scopes.findLastIndex(s => s.startsWith("meta.math")) <= context.scopes.findLastIndex(s => s.startsWith("comment") || s.startsWith("meta.text.normal.tex"));
}
endglobal

"#;

/// Render resolved snippets followed by verbatim entries
pub fn render(
    snippets: &[ResolvedSnippet],
    variables: &IndexMap<String, String>,
    verbatim: &[String],
) -> String {
    let mut out = String::from(PREAMBLE);

    for snippet in snippets {
        out.push_str(&render_snippet(snippet, variables));
    }

    for entry in verbatim {
        out.push_str(entry.trim());
        out.push_str("\n\n");
    }

    out
}

fn render_snippet(snippet: &ResolvedSnippet, variables: &IndexMap<String, String>) -> String {
    let mut block = String::new();

    if let Some(priority) = snippet.priority {
        block.push_str(&format!("priority {}\n", priority));
    }
    if let Some(guard) = context_guard(&snippet.options) {
        block.push_str(guard);
        block.push('\n');
    }

    block.push_str(&format!(
        "snippet `{}` \"{}\" {}\n",
        substitute_variables(&snippet.trigger, variables),
        snippet.description.as_deref().unwrap_or(""),
        flag_string(&snippet.options)
    ));
    block.push_str(&escape_body(&snippet.replacement));
    block.push_str("\nendsnippet\n\n");

    block
}

/// Expansion flags in HyperSnips order
pub fn flag_string(options: &SnippetOptions) -> String {
    [
        (options.auto, 'A'),
        (options.in_word, 'i'),
        (options.word_boundary, 'w'),
        (options.beginning_of_line, 'b'),
        (options.multi_line, 'M'),
    ]
    .into_iter()
    .filter(|(option, _)| *option == Some(true))
    .map(|(_, flag)| flag)
    .collect()
}

/// `math` takes precedence over `text` when both are set
pub fn context_guard(options: &SnippetOptions) -> Option<&'static str> {
    if options.math == Some(true) {
        Some("context math(context)")
    } else if options.text == Some(true) {
        Some("context notmath(context)")
    } else {
        None
    }
}

/// Replace each `{{NAME}}` with the literal value of `NAME`, in variable
/// order. Unknown placeholders are left as they are.
pub fn substitute_variables(trigger: &str, variables: &IndexMap<String, String>) -> String {
    variables
        .iter()
        .fold(trigger.to_string(), |acc, (name, value)| {
            acc.replace(&format!("{{{{{}}}}}", name), value)
        })
}

/// Backslash is an escape character in snippet bodies
pub fn escape_body(replacement: &str) -> String {
    replacement.replace('\\', "\\\\")
}
