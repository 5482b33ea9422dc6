//! Merge configuration (defaults reproduce the libyuri build)

use std::path::{Path, PathBuf};

use crate::error::{MergeError, Result};
use crate::filter::LineFilter;

/// Headers that make up libyuri, in dependency order.
pub const DEFAULT_SOURCES: [&str; 3] = ["reflect.h", "serializer.h", "deserializer.h"];

/// The single header lands one level above the split sources.
pub const DEFAULT_OUTPUT: &str = "../yuri.h";

pub const DEFAULT_GUARD: &str = "LIBYURI_YURI_H_";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeConfig {
    base_dir: PathBuf,
    sources: Vec<PathBuf>,
    output: PathBuf,
    guard: String,
    filter: LineFilter,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            sources: DEFAULT_SOURCES.iter().map(PathBuf::from).collect(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            guard: DEFAULT_GUARD.to_string(),
            filter: LineFilter::default(),
        }
    }
}

impl MergeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory that relative source and output paths are resolved against.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    pub fn with_sources<I, P>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.sources = sources.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_guard(mut self, guard: impl Into<String>) -> Self {
        self.guard = guard.into();
        self
    }

    pub fn with_filter(mut self, filter: LineFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn guard(&self) -> &str {
        &self.guard
    }

    pub fn filter(&self) -> &LineFilter {
        &self.filter
    }

    /// Source paths as configured, before resolution.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Source paths joined onto the base directory, in merge order.
    pub fn source_paths(&self) -> Vec<PathBuf> {
        self.sources.iter().map(|s| self.resolve(s)).collect()
    }

    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.output)
    }

    /// Reject configurations that could never yield a usable header.
    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(MergeError::EmptySourceList);
        }

        if !is_guard_symbol(&self.guard) {
            return Err(MergeError::InvalidGuard(self.guard.clone()));
        }

        Ok(())
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

/// A preprocessor identifier: `[A-Za-z_][A-Za-z0-9_]*`.
fn is_guard_symbol(symbol: &str) -> bool {
    let mut chars = symbol.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
