//! A parsed command invocation: command path, positionals and flags

use std::collections::{BTreeMap, BTreeSet};

/// One command-line invocation after tokenizing
///
/// A value flag can be absent, given bare (no value token at all), or given
/// a value that may be empty (`--base ""`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    path: Vec<String>,
    positionals: Vec<String>,
    values: BTreeMap<String, String>,
    bare: BTreeSet<String>,
    switches: BTreeSet<String>,
}

impl Invocation {
    /// Start an invocation of the command at `path`
    pub fn new<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Append a positional argument (builder pattern)
    #[must_use]
    pub fn with_arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.positionals.push(arg.into());
        self
    }

    /// Record a value flag (builder pattern)
    #[must_use]
    pub fn with_value<S: Into<String>>(mut self, flag: &str, value: S) -> Self {
        self.values.insert(flag.to_owned(), value.into());
        self
    }

    /// Record a value flag given without any value (builder pattern)
    #[must_use]
    pub fn with_bare_flag(mut self, flag: &str) -> Self {
        self.bare.insert(flag.to_owned());
        self
    }

    /// Record a boolean flag (builder pattern)
    #[must_use]
    pub fn with_switch(mut self, flag: &str) -> Self {
        self.switches.insert(flag.to_owned());
        self
    }

    #[must_use]
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Command path joined with spaces, e.g. `artifacts put`
    #[must_use]
    pub fn command_name(&self) -> String {
        self.path.join(" ")
    }

    #[must_use]
    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    #[must_use]
    pub fn positional(&self, index: usize) -> Option<&str> {
        self.positionals.get(index).map(String::as_str)
    }

    /// Value of a flag, `None` when it is absent or bare
    #[must_use]
    pub fn value(&self, flag: &str) -> Option<&str> {
        self.values.get(flag).map(String::as_str)
    }

    /// Value of a flag, `None` when it is absent or blank
    #[must_use]
    pub fn non_blank_value(&self, flag: &str) -> Option<&str> {
        self.value(flag).filter(|value| !value.trim().is_empty())
    }

    /// Whether a value flag was given with no value following it
    #[must_use]
    pub fn is_bare(&self, flag: &str) -> bool {
        self.bare.contains(flag)
    }

    /// Whether a boolean flag was given
    #[must_use]
    pub fn is_set(&self, flag: &str) -> bool {
        self.switches.contains(flag)
    }
}
