//! Prefix-based line filter for header amalgamation

/// Lines that become redundant once every header lives in one file.
///
/// Guard open, guard define and guard close of the individual headers, plus
/// the cross-header include of `reflect.h`.
pub const DEFAULT_DROP_PREFIXES: [&str; 4] = [
    "#ifndef LIB",
    "#define LIB",
    "#include \"reflect.h\"",
    "#endif",
];

/// Prefix of the include line that only makes sense while the headers are split.
pub const REFLECT_INCLUDE: &str = "#include \"reflect.h\"";

/// Decides which source lines are left out of the merged header.
///
/// Matching is a literal byte-prefix test on the raw line; leading
/// whitespace is not trimmed, so an indented `  #endif` survives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFilter {
    prefixes: Vec<String>,
}

impl Default for LineFilter {
    fn default() -> Self {
        Self {
            prefixes: DEFAULT_DROP_PREFIXES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl LineFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add more prefixes on top of the defaults. Empty prefixes are ignored,
    /// they would otherwise drop every line.
    pub fn with_extra_prefixes<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for prefix in extra {
            let prefix = prefix.into();
            if !prefix.is_empty() && !self.prefixes.contains(&prefix) {
                self.prefixes.push(prefix);
            }
        }
        self
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn is_dropped(&self, line: &[u8]) -> bool {
        self.prefixes
            .iter()
            .any(|prefix| line.starts_with(prefix.as_bytes()))
    }
}
