//! Declarative text rewrite rules.
//!
//! A [`RewriteRule`] is a pure function of one file's content: a pattern, a
//! replacement, and the single relative path it is allowed to touch. Every
//! rule matches only the *pre-rewrite* form of its target, so running a rule
//! over its own output is a no-op. Each rule records that precondition in its
//! `idempotence` note.

use std::borrow::Cow;
use std::fmt;

use regex::{Captures, NoExpand, Regex};

use crate::domain::{
    entities::common::RelativePath, error::DomainError, value_objects::ProjectName,
};

/// Placeholder slug used throughout the static template.
pub const TEMPLATE_SLUG: &str = "nest-react-template";

/// Placeholder title used in the static template's readme.
pub const TEMPLATE_TITLE: &str = "NestJS + React Monorepo Template";

/// Generated client config rewritten by the import normalization rule.
pub const VITE_CONFIG_PATH: &str = "client/vite.config.ts";

/// How matched text is replaced.
#[derive(Clone)]
pub enum Replacement {
    /// Inserted verbatim; `$` has no special meaning.
    Literal(String),
    /// Built from the match's capture groups.
    Computed(fn(&Captures<'_>) -> String),
    /// Inserted verbatim, but only where the match is a whole slug: a match
    /// touching another slug character (`[a-z0-9-]`) is left alone.
    Standalone(String),
}

impl fmt::Debug for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(s) => f.debug_tuple("Literal").field(s).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
            Self::Standalone(s) => f.debug_tuple("Standalone").field(s).finish(),
        }
    }
}

/// A pattern/replacement pair scoped to one file.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    pub name: &'static str,
    pub target: RelativePath,
    pub pattern: Regex,
    pub replacement: Replacement,
    /// Why applying this rule twice equals applying it once.
    pub idempotence: &'static str,
}

impl RewriteRule {
    pub fn new(
        name: &'static str,
        target: RelativePath,
        pattern: &str,
        replacement: Replacement,
        idempotence: &'static str,
    ) -> Result<Self, DomainError> {
        let pattern = Regex::new(pattern).map_err(|e| DomainError::InvalidRewritePattern {
            rule: name,
            reason: e.to_string(),
        })?;
        Ok(Self {
            name,
            target,
            pattern,
            replacement,
            idempotence,
        })
    }

    /// Apply to `content`. Returns `None` when nothing matched.
    pub fn apply<'a>(&self, content: &'a str) -> Option<String> {
        let rewritten: Cow<'a, str> = match &self.replacement {
            Replacement::Literal(text) => self.pattern.replace_all(content, NoExpand(text)),
            Replacement::Computed(f) => self.pattern.replace_all(content, |caps: &Captures<'_>| f(caps)),
            Replacement::Standalone(text) => replace_standalone(&self.pattern, content, text),
        };
        match rewritten {
            Cow::Borrowed(_) => None,
            Cow::Owned(s) if s == content => None,
            Cow::Owned(s) => Some(s),
        }
    }
}

fn is_slug_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'
}

fn replace_standalone<'a>(pattern: &Regex, content: &'a str, text: &str) -> Cow<'a, str> {
    let mut out = String::new();
    let mut last = 0;
    let mut replaced = false;
    for m in pattern.find_iter(content) {
        let before = content[..m.start()].chars().next_back();
        let after = content[m.end()..].chars().next();
        if before.is_some_and(is_slug_char) || after.is_some_and(is_slug_char) {
            continue;
        }
        out.push_str(&content[last..m.start()]);
        out.push_str(text);
        last = m.end();
        replaced = true;
    }
    if !replaced {
        return Cow::Borrowed(content);
    }
    out.push_str(&content[last..]);
    Cow::Owned(out)
}

// ── Identity substitution ─────────────────────────────────────────────────────

/// Replace the template placeholders with the project name.
///
/// Covers both readme tokens and the slug wherever it appears in the manifest.
/// A name may itself contain the slug (`nest-react-template-v2`); the slug
/// rules only fire on a standalone slug, so the inserted name never matches.
pub fn identity_rules(name: &ProjectName) -> Result<Vec<RewriteRule>, DomainError> {
    let readme = RelativePath::from_static("README.md");
    let manifest = RelativePath::from_static("package.json");
    let slug_note = "matches only a slug not adjacent to [a-z0-9-]; a name containing \
                     the slug always has neighbouring slug characters, or equals it";
    let title_note = "the title has spaces and capitals, which a project name cannot";

    Ok(vec![
        RewriteRule::new(
            "readme-slug",
            readme.clone(),
            &regex::escape(TEMPLATE_SLUG),
            Replacement::Standalone(name.to_string()),
            slug_note,
        )?,
        RewriteRule::new(
            "readme-title",
            readme,
            &regex::escape(TEMPLATE_TITLE),
            Replacement::Literal(name.to_string()),
            title_note,
        )?,
        RewriteRule::new(
            "manifest-slug",
            manifest,
            &regex::escape(TEMPLATE_SLUG),
            Replacement::Standalone(name.to_string()),
            slug_note,
        )?,
    ])
}

// ── Module-style normalization ────────────────────────────────────────────────

// Anchored on the whole file: the `vite` helper import, then the static
// plugin import, then a `defineConfig({ ... });` object literal at the end.
const VITE_LEGACY_PATTERN: &str = concat!(
    r"(?s)\A(?P<head>.*?import \{ defineConfig \} from 'vite';[ \t]*\r?\n)",
    r"(?P<between>.*?)",
    r"import react from '@vitejs/plugin-react';[ \t]*\r?\n",
    r"(?P<middle>.*?)",
    r"export default defineConfig\(\{(?P<body>.*)\}\);[ \t]*(?:\r?\n)?\z",
);

/// Rewrite the static plugin import in the generated vite config into the
/// canonical async form that loads the ESM-only plugin with `import()`.
pub fn vite_import_normalization() -> Result<RewriteRule, DomainError> {
    RewriteRule::new(
        "vite-plugin-import",
        RelativePath::from_static(VITE_CONFIG_PATH),
        VITE_LEGACY_PATTERN,
        Replacement::Computed(render_async_vite_config),
        "matches only while the static `import react from '@vitejs/plugin-react'` line exists; \
         the canonical form has no such line",
    )
}

fn render_async_vite_config(caps: &Captures<'_>) -> String {
    static PLUGIN_CALL: std::sync::LazyLock<Regex> =
        std::sync::LazyLock::new(|| Regex::new(r"\breact\(\)").expect("static plugin call pattern"));

    let head = &caps["head"];
    let between = &caps["between"];
    let middle = &caps["middle"];
    let body = PLUGIN_CALL.replace_all(&caps["body"], "react.default()");

    let indented = body
        .split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                line.to_string()
            } else {
                format!("  {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{head}{between}{middle}export default defineConfig(async () => {{\n  \
         const react = await import('@vitejs/plugin-react');\n\n  \
         return {{{indented}  }};\n}});\n"
    )
}
