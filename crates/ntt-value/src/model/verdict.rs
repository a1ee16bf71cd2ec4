//! Test verdicts.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Outcome of a test case.
///
/// Carried on the wire as a 32-bit ordinal. Ordinals outside the named set
/// are kept as [`Verdict::Unknown`] so they pass through unchanged; equality
/// and hashing compare ordinals, so `Unknown(1)` equals `Pass`.
#[derive(Debug, Clone, Copy, Default)]
pub enum Verdict {
    #[default]
    None,
    Pass,
    Inconc,
    Fail,
    Error,
    Unknown(i32),
}

impl Verdict {
    /// Converts an ordinal, mapping unnamed ordinals to `Unknown`.
    pub const fn from_ordinal(ordinal: i32) -> Verdict {
        match ordinal {
            0 => Verdict::None,
            1 => Verdict::Pass,
            2 => Verdict::Inconc,
            3 => Verdict::Fail,
            4 => Verdict::Error,
            other => Verdict::Unknown(other),
        }
    }

    /// Returns the wire ordinal.
    pub const fn ordinal(self) -> i32 {
        match self {
            Verdict::None => 0,
            Verdict::Pass => 1,
            Verdict::Inconc => 2,
            Verdict::Fail => 3,
            Verdict::Error => 4,
            Verdict::Unknown(ordinal) => ordinal,
        }
    }

    /// Returns true if the ordinal is one of the named verdicts.
    pub const fn is_known(self) -> bool {
        matches!(self.ordinal(), 0..=4)
    }

    /// Returns the schema name (`"PASS"`, ...), or `None` for unknown ordinals.
    pub fn as_str_name(self) -> Option<&'static str> {
        match Verdict::from_ordinal(self.ordinal()) {
            Verdict::None => Some("NONE"),
            Verdict::Pass => Some("PASS"),
            Verdict::Inconc => Some("INCONC"),
            Verdict::Fail => Some("FAIL"),
            Verdict::Error => Some("ERROR"),
            Verdict::Unknown(_) => None,
        }
    }

    /// Parses a schema name.
    pub fn from_str_name(name: &str) -> Option<Verdict> {
        match name {
            "NONE" => Some(Verdict::None),
            "PASS" => Some(Verdict::Pass),
            "INCONC" => Some(Verdict::Inconc),
            "FAIL" => Some(Verdict::Fail),
            "ERROR" => Some(Verdict::Error),
            _ => None,
        }
    }

    /// Returns the verdict that results from applying `other` after `self`
    /// under TTCN-3 overwriting rules: a verdict can only get worse
    /// (none < pass < inconc < fail < error). Unknown ordinals rank above
    /// `error` so they are never hidden.
    pub fn overwrite(self, other: Verdict) -> Verdict {
        if other.severity() > self.severity() { other } else { self }
    }

    fn severity(self) -> i64 {
        if self.is_known() {
            self.ordinal() as i64
        } else {
            i64::MAX
        }
    }
}

impl PartialEq for Verdict {
    fn eq(&self, other: &Self) -> bool {
        self.ordinal() == other.ordinal()
    }
}

impl Eq for Verdict {}

impl Hash for Verdict {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ordinal().hash(state);
    }
}

impl From<i32> for Verdict {
    fn from(ordinal: i32) -> Self {
        Verdict::from_ordinal(ordinal)
    }
}

impl From<Verdict> for i32 {
    fn from(verdict: Verdict) -> Self {
        verdict.ordinal()
    }
}

/// Formats as the TTCN-3 verdict literal (`pass`, `inconc`, ...).
impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match Verdict::from_ordinal(self.ordinal()) {
            Verdict::None => f.write_str("none"),
            Verdict::Pass => f.write_str("pass"),
            Verdict::Inconc => f.write_str("inconc"),
            Verdict::Fail => f.write_str("fail"),
            Verdict::Error => f.write_str("error"),
            Verdict::Unknown(ordinal) => write!(f, "verdict({})", ordinal),
        }
    }
}

/// Error returned when parsing a verdict literal fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown verdict {0:?}")]
pub struct ParseVerdictError(String);

impl FromStr for Verdict {
    type Err = ParseVerdictError;

    /// Accepts TTCN-3 literals (`pass`) and schema names (`PASS`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Verdict::None),
            "pass" => Ok(Verdict::Pass),
            "inconc" => Ok(Verdict::Inconc),
            "fail" => Ok(Verdict::Fail),
            "error" => Ok(Verdict::Error),
            other => Verdict::from_str_name(other).ok_or_else(|| ParseVerdictError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinals() {
        for ordinal in 0..5 {
            let verdict = Verdict::from_ordinal(ordinal);
            assert!(verdict.is_known());
            assert_eq!(verdict.ordinal(), ordinal);
        }
        assert_eq!(Verdict::from_ordinal(99), Verdict::Unknown(99));
        assert!(!Verdict::Unknown(99).is_known());
        assert_eq!(Verdict::Unknown(-3).ordinal(), -3);
    }

    #[test]
    fn test_equality_by_ordinal() {
        assert_eq!(Verdict::Unknown(1), Verdict::Pass);
        assert!(Verdict::Unknown(1).is_known());
        assert_ne!(Verdict::Unknown(5), Verdict::Error);
    }

    #[test]
    fn test_names() {
        assert_eq!(Verdict::Inconc.as_str_name(), Some("INCONC"));
        assert_eq!(Verdict::Unknown(7).as_str_name(), None);
        assert_eq!(Verdict::from_str_name("FAIL"), Some(Verdict::Fail));
        assert_eq!(Verdict::from_str_name("fail"), None);
    }

    #[test]
    fn test_display_and_parse() {
        assert_eq!(Verdict::Pass.to_string(), "pass");
        assert_eq!(Verdict::Unknown(99).to_string(), "verdict(99)");
        assert_eq!("inconc".parse::<Verdict>(), Ok(Verdict::Inconc));
        assert_eq!("ERROR".parse::<Verdict>(), Ok(Verdict::Error));
        assert!("passed".parse::<Verdict>().is_err());
    }

    #[test]
    fn test_overwrite() {
        assert_eq!(Verdict::None.overwrite(Verdict::Pass), Verdict::Pass);
        assert_eq!(Verdict::Fail.overwrite(Verdict::Pass), Verdict::Fail);
        assert_eq!(Verdict::Inconc.overwrite(Verdict::Error), Verdict::Error);
        assert_eq!(Verdict::Error.overwrite(Verdict::Unknown(42)), Verdict::Unknown(42));
        assert_eq!(Verdict::Unknown(42).overwrite(Verdict::Fail), Verdict::Unknown(42));
    }
}
