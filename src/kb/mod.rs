//! Command knowledge base for LaTeX/Beamer completion.
//!
//! The knowledge base is a flat, ordered collection of [`CommandEntry`]
//! values keyed by token (`\frac`, `\begin`, ...). Iteration order is
//! insertion order and is part of the contract: the suggestion resolver
//! presents candidates in exactly this order and never re-sorts them.
//!
//! The base is built from the built-in tables in [`builtin`] and may be
//! extended at startup with user-defined macros loaded from a JSON file
//! (see [`file`]). After startup it is shared read-only behind an `Arc`;
//! nothing in the completion hot path mutates it.

use std::collections::HashMap;

pub mod builtin;
pub mod file;

pub use file::{load_user_entries, parse_user_commands};

/// One second-level choice offered after `\begin{`.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentVariant {
    /// Environment name as shown in the candidate list (`itemize`, `frame`, ...).
    pub name: String,
    /// Full replacement text for the environment skeleton. May span lines.
    pub template: String,
    /// One-line summary.
    pub description: String,
}

impl EnvironmentVariant {
    pub fn new(name: &str, template: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            template: template.to_string(),
            description: description.to_string(),
        }
    }
}

/// How a command token behaves when completed.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandKind {
    /// Ordinary macro insertion.
    Plain,
    /// Opens an environment; carries the ordered variant table offered
    /// once the user has typed the opening brace.
    EnvironmentStarter { variants: Vec<EnvironmentVariant> },
    /// Closes an environment.
    EnvironmentEnder,
}

/// One completable LaTeX construct.
///
/// `token` is the unique key within the knowledge base. Macro tokens carry
/// the escape character (`\section`); bare tokens are allowed for
/// structural helpers defined in user files.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandEntry {
    pub token: String,
    /// Insertion text. `$1` and `$2` mark cursor stops; markers beyond the
    /// first resolved stop stay in the text literally.
    pub template: String,
    pub description: String,
    /// Free-form grouping label ("math", "beamer", ...), display only.
    pub category: String,
    pub kind: CommandKind,
}

impl CommandEntry {
    /// Create a plain macro entry.
    pub fn plain(token: &str, template: &str, description: &str, category: &str) -> Self {
        Self {
            token: token.to_string(),
            template: template.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            kind: CommandKind::Plain,
        }
    }

    /// Create an environment-starter entry with its variant table.
    pub fn starter(
        token: &str,
        template: &str,
        description: &str,
        category: &str,
        variants: Vec<EnvironmentVariant>,
    ) -> Self {
        Self {
            token: token.to_string(),
            template: template.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            kind: CommandKind::EnvironmentStarter { variants },
        }
    }

    /// Create an environment-ender entry.
    pub fn ender(token: &str, template: &str, description: &str, category: &str) -> Self {
        Self {
            token: token.to_string(),
            template: template.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            kind: CommandKind::EnvironmentEnder,
        }
    }

    /// Variant table for starters, empty slice otherwise.
    pub fn variants(&self) -> &[EnvironmentVariant] {
        match &self.kind {
            CommandKind::EnvironmentStarter { variants } => variants,
            _ => &[],
        }
    }

    pub fn is_starter(&self) -> bool {
        matches!(self.kind, CommandKind::EnvironmentStarter { .. })
    }
}

/// Ordered, token-keyed command collection.
///
/// Internally a vector plus a token index. The vector preserves insertion
/// order; the index gives O(1) lookup. [`merge`](Self::merge) keeps an
/// overridden token at its original position so the display order stays
/// stable when user files shadow built-ins.
#[derive(Debug, Default)]
pub struct CommandKnowledgeBase {
    entries: Vec<CommandEntry>,
    index: HashMap<String, usize>,
}

impl CommandKnowledgeBase {
    /// Create an empty knowledge base.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Create a knowledge base seeded with the built-in LaTeX/Beamer tables.
    pub fn builtin() -> Self {
        let mut kb = Self::new();
        kb.merge(builtin::entries());
        kb
    }

    /// Look up an entry by exact token.
    pub fn lookup(&self, token: &str) -> Option<&CommandEntry> {
        self.index.get(token).map(|&i| &self.entries[i])
    }

    /// Entries satisfying `predicate`, in insertion order.
    pub fn search<P>(&self, predicate: P) -> Vec<&CommandEntry>
    where
        P: Fn(&CommandEntry) -> bool,
    {
        self.entries.iter().filter(|e| predicate(e)).collect()
    }

    /// Merge additional entries. Last write wins per token: an existing
    /// token is replaced in place (keeping its position), a new token is
    /// appended. No entry is ever silently dropped.
    pub fn merge(&mut self, additional: Vec<CommandEntry>) {
        for entry in additional {
            match self.index.get(&entry.token) {
                Some(&i) => self.entries[i] = entry,
                None => {
                    self.index.insert(entry.token.clone(), self.entries.len());
                    self.entries.push(entry);
                }
            }
        }
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CommandEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Check the placeholder discipline for a template: no `$0`, and markers
/// numbered contiguously from `$1` (a template using `$2` must also use
/// `$1`). Cursor logic only ever resolves `$1`/`$2`, so higher markers are
/// accepted but must still be contiguous.
pub fn template_is_well_formed(template: &str) -> bool {
    if template.contains("$0") {
        return false;
    }
    let mut seen = [false; 9];
    let bytes = template.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'$' && i + 1 < bytes.len() && bytes[i + 1].is_ascii_digit() {
            let digit = (bytes[i + 1] - b'0') as usize;
            if digit >= 1 && digit <= 9 {
                seen[digit - 1] = true;
            }
        }
    }
    let highest = seen.iter().rposition(|&s| s).map(|p| p + 1).unwrap_or(0);
    (0..highest).all(|i| seen[i])
}
