//! Array-literal snippet file for Obsidian LaTeX Suite
//!
//! Output is a JavaScript array with one object literal per snippet:
//!
//! ```text
//! [
//!     { trigger: /mk/, replacement: "$$0$", options: "mA", description: "" },
//!     { trigger: /sr/, replacement: "^{2}", options: "mA", description: "", priority: 1 }
//! ]
//! ```

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::definition::SnippetOptions;
use crate::platform::ResolvedSnippet;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("placeholder pattern should compile"));

/// Render resolved snippets followed by verbatim entries
pub fn render(snippets: &[ResolvedSnippet], verbatim: &[String]) -> String {
    let elements: Vec<String> = snippets
        .iter()
        .map(render_snippet)
        .chain(verbatim.iter().map(|entry| format!("    {}", entry.trim())))
        .collect();

    format!("[\n{}\n]\n", elements.join(",\n"))
}

fn render_snippet(snippet: &ResolvedSnippet) -> String {
    let trigger = translate_placeholders(&snippet.trigger);
    if has_unescaped_slash(&trigger) {
        log::warn!(
            "trigger /{}/ contains an unescaped '/', the generated regex literal will be invalid",
            trigger
        );
    }

    let mut parts = vec![
        format!("trigger: /{}/", trigger),
        format!("replacement: {}", js_string(&snippet.replacement)),
        format!("options: {}", js_string(&flag_string(&snippet.options))),
        format!(
            "description: {}",
            js_string(snippet.description.as_deref().unwrap_or(""))
        ),
    ];
    if let Some(priority) = snippet.priority {
        parts.push(format!("priority: {}", priority));
    }

    format!("    {{ {} }}", parts.join(", "))
}

/// Option flags in LaTeX Suite order. `regex` is deliberately not emitted.
pub fn flag_string(options: &SnippetOptions) -> String {
    [
        (options.math, 'm'),
        (options.inline_math, 'n'),
        (options.display_math, 'M'),
        (options.text, 't'),
        (options.code, 'c'),
        (options.auto, 'A'),
        (options.visual, 'v'),
        (options.word_boundary, 'w'),
    ]
    .into_iter()
    .filter(|(option, _)| *option == Some(true))
    .map(|(_, flag)| flag)
    .collect()
}

/// Rewrite `{{NAME}}` to the native `${NAME}` variable reference
pub fn translate_placeholders(trigger: &str) -> String {
    PLACEHOLDER
        .replace_all(trigger, |caps: &Captures| format!("${{{}}}", &caps[1]))
        .into_owned()
}

fn js_string(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

fn has_unescaped_slash(trigger: &str) -> bool {
    let mut escaped = false;
    for c in trigger.chars() {
        match c {
            '\\' => escaped = !escaped,
            '/' if !escaped => return true,
            _ => escaped = false,
        }
    }
    false
}
