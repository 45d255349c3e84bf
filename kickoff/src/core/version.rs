//! Dotted-version parsing and requirement checks for tool preflight.
//!
//! Only the small subset the preflight needs: numeric dotted versions pulled
//! out of `rails --version` / `ruby --version` output, and requirement
//! strings like `>= 6.0.2`.

use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

use anyhow::{Result, anyhow};
use regex::Regex;

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)+").expect("version pattern should be valid"));

/// A numeric dotted version (`6.0.2`). Trailing non-numeric garbage such as
/// the patch suffix in `ruby 2.6.3p62` is ignored by [`Version::extract`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    parts: Vec<u64>,
}

impl Version {
    pub fn parse(text: &str) -> Result<Self> {
        let parts = text
            .trim()
            .split('.')
            .map(|part| {
                part.parse::<u64>()
                    .map_err(|_| anyhow!("invalid version `{text}`"))
            })
            .collect::<Result<Vec<u64>>>()?;
        if parts.is_empty() {
            return Err(anyhow!("empty version"));
        }
        Ok(Self { parts })
    }

    /// Pull the first dotted version out of arbitrary tool output.
    pub fn extract(output: &str) -> Result<Self> {
        let matched = VERSION_RE
            .find(output)
            .ok_or_else(|| anyhow!("no version found in `{}`", output.trim()))?;
        Self::parse(matched.as_str())
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        // Lexicographic on segments; a missing segment compares as zero so
        // 6.0 == 6.0.0.
        let len = self.parts.len().max(other.parts.len());
        for i in 0..len {
            let a = self.parts.get(i).copied().unwrap_or(0);
            let b = other.parts.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.parts.iter().map(u64::to_string).collect();
        write!(f, "{}", rendered.join("."))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Ge,
    Gt,
    Eq,
    Le,
    Lt,
}

/// A version requirement such as `>= 6.0.2`. A bare version means exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    op: Op,
    version: Version,
}

impl Requirement {
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let (op, rest) = if let Some(rest) = trimmed.strip_prefix(">=") {
            (Op::Ge, rest)
        } else if let Some(rest) = trimmed.strip_prefix("<=") {
            (Op::Le, rest)
        } else if let Some(rest) = trimmed.strip_prefix('>') {
            (Op::Gt, rest)
        } else if let Some(rest) = trimmed.strip_prefix('<') {
            (Op::Lt, rest)
        } else if let Some(rest) = trimmed.strip_prefix('=') {
            (Op::Eq, rest)
        } else {
            (Op::Eq, trimmed)
        };
        Ok(Self {
            op,
            version: Version::parse(rest)?,
        })
    }

    pub fn satisfied_by(&self, version: &Version) -> bool {
        match self.op {
            Op::Ge => version >= &self.version,
            Op::Gt => version > &self.version,
            Op::Eq => version == &self.version,
            Op::Le => version <= &self.version,
            Op::Lt => version < &self.version,
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.op {
            Op::Ge => ">= ",
            Op::Gt => "> ",
            Op::Eq => "",
            Op::Le => "<= ",
            Op::Lt => "< ",
        };
        write!(f, "{op}{}", self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_from_rails_output() {
        let v = Version::extract("Rails 6.0.2.1\n").expect("extract");
        assert_eq!(v, Version::parse("6.0.2.1").expect("parse"));
    }

    #[test]
    fn extracts_from_ruby_output_with_patch_suffix() {
        let v = Version::extract("ruby 2.6.3p62 (2019-04-16 revision 67580)").expect("extract");
        assert_eq!(v, Version::parse("2.6.3").expect("parse"));
    }

    #[test]
    fn extract_fails_without_a_version() {
        assert!(Version::extract("command not found").is_err());
    }

    #[test]
    fn shorter_versions_compare_with_zero_padding() {
        let a = Version::parse("6.0").expect("a");
        let b = Version::parse("6.0.0").expect("b");
        let c = Version::parse("6.0.2").expect("c");
        assert_eq!(a.cmp(&b), Ordering::Equal);
        assert!(a < c);
    }

    #[test]
    fn ge_requirement_boundaries() {
        let req = Requirement::parse(">= 6.0.2").expect("req");
        assert!(req.satisfied_by(&Version::parse("6.0.2").expect("v")));
        assert!(req.satisfied_by(&Version::parse("7.1.0").expect("v")));
        assert!(!req.satisfied_by(&Version::parse("6.0.1").expect("v")));
        assert!(!req.satisfied_by(&Version::parse("5.2.4").expect("v")));
    }

    #[test]
    fn bare_version_means_exact() {
        let req = Requirement::parse("2.6.3").expect("req");
        assert!(req.satisfied_by(&Version::parse("2.6.3").expect("v")));
        assert!(!req.satisfied_by(&Version::parse("2.6.4").expect("v")));
    }

    #[test]
    fn displays_round_trip() {
        let req = Requirement::parse(">= 6.0.2").expect("req");
        assert_eq!(req.to_string(), ">= 6.0.2");
    }
}
