//! Per-platform resolution of snippet records
//!
//! A record reaches a platform unless its `target_platforms` list excludes
//! it. The effective record is the base record with the platform override
//! applied: plain fields are replaced when the override sets them, and the
//! `options` mapping is merged key by key.

use std::fmt;

use crate::definition::{Snippet, SnippetOptions, SnippetOverride};

/// Output platforms this tool renders for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Obsidian LaTeX Suite, array-literal snippet file
    Obsidian,
    /// VS Code HyperSnips, line-block snippet file
    Vscode,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::Obsidian, Platform::Vscode];

    /// The name used for this platform in definition files
    pub fn name(self) -> &'static str {
        match self {
            Platform::Obsidian => "obsidian",
            Platform::Vscode => "vscode",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A snippet record after its platform override has been applied
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSnippet {
    pub trigger: String,
    pub replacement: String,
    pub description: Option<String>,
    pub options: SnippetOptions,
    pub priority: Option<i64>,
}

impl From<&Snippet> for ResolvedSnippet {
    fn from(snippet: &Snippet) -> Self {
        Self {
            trigger: snippet.trigger.clone(),
            replacement: snippet.replacement.clone(),
            description: snippet.description.clone(),
            options: snippet.options.clone(),
            priority: snippet.priority,
        }
    }
}

/// Compute the effective record of `snippet` for `platform`
///
/// Returns `None` when the record is restricted to other platforms.
pub fn resolve(snippet: &Snippet, platform: Platform) -> Option<ResolvedSnippet> {
    if !snippet.targets(platform) {
        return None;
    }

    let base = ResolvedSnippet::from(snippet);
    Some(match snippet.override_for(platform) {
        Some(over) => apply_override(base, over),
        None => base,
    })
}

/// Effective records of every snippet reaching `platform`, in source order
pub fn resolve_all(snippets: &[Snippet], platform: Platform) -> Vec<ResolvedSnippet> {
    snippets
        .iter()
        .filter_map(|snippet| resolve(snippet, platform))
        .collect()
}

/// Shallow field replacement, with `options` merged one level down
fn apply_override(base: ResolvedSnippet, over: &SnippetOverride) -> ResolvedSnippet {
    ResolvedSnippet {
        trigger: over.trigger.clone().unwrap_or(base.trigger),
        replacement: over.replacement.clone().unwrap_or(base.replacement),
        description: over.description.clone().or(base.description),
        options: merge_options(&base.options, &over.options),
        priority: over.priority.or(base.priority),
    }
}

/// Merge `over` onto `base` key by key; keys set in `over` win
pub fn merge_options(base: &SnippetOptions, over: &SnippetOptions) -> SnippetOptions {
    let mut extra = base.extra.clone();
    extra.extend(over.extra.iter().map(|(k, v)| (k.clone(), v.clone())));

    SnippetOptions {
        regex: over.regex.or(base.regex),
        math: over.math.or(base.math),
        inline_math: over.inline_math.or(base.inline_math),
        display_math: over.display_math.or(base.display_math),
        text: over.text.or(base.text),
        code: over.code.or(base.code),
        auto: over.auto.or(base.auto),
        visual: over.visual.or(base.visual),
        word_boundary: over.word_boundary.or(base.word_boundary),
        in_word: over.in_word.or(base.in_word),
        beginning_of_line: over.beginning_of_line.or(base.beginning_of_line),
        multi_line: over.multi_line.or(base.multi_line),
        extra,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::Definition;

    fn load(yaml: &str) -> Definition {
        Definition::from_str(yaml).expect("Should parse")
    }

    #[test]
    fn test_no_override_equals_base() {
        let def = load(
            r#"
snippets:
  - trigger: "sr"
    replacement: "^{2}"
    description: "squared"
    priority: 1
    options: { math: true, auto: true }
"#,
        );
        let snippet = &def.snippets[0];
        for platform in Platform::ALL {
            let resolved = resolve(snippet, platform).expect("targets all");
            assert_eq!(resolved, ResolvedSnippet::from(snippet));
        }
    }

    #[test]
    fn test_override_replaces_only_set_fields() {
        let def = load(
            r#"
snippets:
  - trigger: "dm"
    replacement: "$$ $0 $$"
    description: "display math"
    platforms:
      vscode:
        replacement: "\\[ $0 \\]"
"#,
        );
        let resolved = resolve(&def.snippets[0], Platform::Vscode).unwrap();
        assert_eq!(resolved.trigger, "dm");
        assert_eq!(resolved.replacement, "\\[ $0 \\]");
        assert_eq!(resolved.description.as_deref(), Some("display math"));

        let obsidian = resolve(&def.snippets[0], Platform::Obsidian).unwrap();
        assert_eq!(obsidian.replacement, "$$ $0 $$");
    }

    #[test]
    fn test_options_merge_key_by_key() {
        let def = load(
            r#"
snippets:
  - trigger: "a"
    replacement: "b"
    options: { math: true, auto: true, word_boundary: true }
    platforms:
      obsidian:
        options: { auto: false, visual: true }
"#,
        );
        let resolved = resolve(&def.snippets[0], Platform::Obsidian).unwrap();
        assert_eq!(resolved.options.math, Some(true));
        assert_eq!(resolved.options.word_boundary, Some(true));
        assert_eq!(resolved.options.auto, Some(false));
        assert_eq!(resolved.options.visual, Some(true));
        assert_eq!(resolved.options.text, None);
    }

    #[test]
    fn test_merge_keeps_unknown_keys() {
        let def = load(
            r#"
snippets:
  - trigger: "a"
    replacement: "b"
    options: { base_only: 1, shared: 1 }
    platforms:
      vscode:
        options: { shared: 2 }
"#,
        );
        let resolved = resolve(&def.snippets[0], Platform::Vscode).unwrap();
        assert_eq!(resolved.options.extra.len(), 2);
        assert_eq!(
            resolved.options.extra.get("shared"),
            Some(&serde_yaml::Value::Number(2i64.into()))
        );
    }

    #[test]
    fn test_override_priority() {
        let def = load(
            r#"
snippets:
  - trigger: "a"
    replacement: "b"
    platforms:
      vscode:
        priority: 5
"#,
        );
        assert_eq!(
            resolve(&def.snippets[0], Platform::Vscode).unwrap().priority,
            Some(5)
        );
        assert_eq!(
            resolve(&def.snippets[0], Platform::Obsidian).unwrap().priority,
            None
        );
    }

    #[test]
    fn test_excluded_platform() {
        let def = load(
            r#"
snippets:
  - trigger: "only"
    replacement: "obsidian"
    target_platforms: [obsidian]
  - trigger: "both"
    replacement: "x"
"#,
        );
        assert!(resolve(&def.snippets[0], Platform::Vscode).is_none());

        let vscode = resolve_all(&def.snippets, Platform::Vscode);
        assert_eq!(vscode.len(), 1);
        assert_eq!(vscode[0].trigger, "both");

        let obsidian = resolve_all(&def.snippets, Platform::Obsidian);
        let triggers: Vec<&str> = obsidian.iter().map(|s| s.trigger.as_str()).collect();
        assert_eq!(triggers, ["only", "both"]);
    }

    #[test]
    fn test_platform_names() {
        assert_eq!(Platform::Obsidian.to_string(), "obsidian");
        assert_eq!(Platform::Vscode.name(), "vscode");
    }
}
