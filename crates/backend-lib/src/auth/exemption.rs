// ============================
// authgate-lib/src/auth/exemption.rs
// ============================
//! Path exemption rules.
//!
//! An exemption entry is either an exact path or a prefix ending in `*`.
//! Paths and entries are compared with a trailing `/`, so `/api/v1/status`
//! and `/api/v1/status/` are the same path. Absent input always means
//! authentication is required.

const SEPARATOR: char = '/';
const WILDCARD: char = '*';

/// A single parsed exemption entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExemptionPattern {
    /// Exempts exactly this normalized path
    Exact(String),
    /// Exempts every normalized path starting with this prefix
    Prefix(String),
    /// `*` or `/*`: exempts every path
    Any,
}

impl ExemptionPattern {
    /// Parse a raw entry; empty entries yield `None`
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        let pattern = match raw.strip_suffix(WILDCARD) {
            Some(prefix) => {
                let prefix = normalize(prefix);
                if prefix.len() <= 1 {
                    ExemptionPattern::Any
                } else {
                    ExemptionPattern::Prefix(prefix)
                }
            },
            None => ExemptionPattern::Exact(normalize(raw)),
        };
        Some(pattern)
    }

    /// `path` must already be normalized
    fn matches(&self, path: &str) -> bool {
        match self {
            ExemptionPattern::Exact(exact) => path == exact,
            ExemptionPattern::Prefix(prefix) => path.starts_with(prefix.as_str()),
            ExemptionPattern::Any => true,
        }
    }
}

/// A parsed list of exemption entries, built once from configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExemptionList {
    patterns: Vec<ExemptionPattern>,
}

impl ExemptionList {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = entries
            .into_iter()
            .filter_map(|e| ExemptionPattern::parse(e.as_ref()))
            .collect();
        Self { patterns }
    }

    pub fn patterns(&self) -> &[ExemptionPattern] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Whether a request to `path` must be authenticated
    pub fn requires_auth(&self, path: Option<&str>) -> bool {
        let Some(path) = path.filter(|p| !p.is_empty()) else {
            return true;
        };
        if self.patterns.is_empty() {
            return true;
        }
        let path = normalize(path);
        !self.patterns.iter().any(|p| p.matches(&path))
    }
}

/// Whether a request to `path` must be authenticated given raw `exemptions`
///
/// Fails safe: an absent or empty path, or an absent or empty exemption
/// list, requires authentication.
pub fn requires_auth<S: AsRef<str>>(path: Option<&str>, exemptions: Option<&[S]>) -> bool {
    match exemptions {
        Some(entries) if !entries.is_empty() => ExemptionList::new(entries).requires_auth(path),
        _ => true,
    }
}

/// Copy of `value` guaranteed to end with `/`
fn normalize(value: &str) -> String {
    let mut normalized = value.to_string();
    if !normalized.ends_with(SEPARATOR) {
        normalized.push(SEPARATOR);
    }
    normalized
}
