//! Boot version parsing and dependency compatibility ranges

use semver::Version;
use std::fmt;

/// Parse a boot version id, normalising the legacy `2.7.0.RELEASE`,
/// `3.2.0.M1` and `2.5.0.BUILD-SNAPSHOT` forms into semver
pub fn parse_boot_version(id: &str) -> Option<Version> {
    let cleaned = id.trim();
    let cleaned = cleaned.strip_prefix('v').unwrap_or(cleaned);
    if let Ok(version) = Version::parse(cleaned) {
        return Some(version);
    }

    let mut parts = cleaned.splitn(4, '.');
    let base = format!("{}.{}.{}", parts.next()?, parts.next()?, parts.next()?);
    let normalized = match parts.next() {
        None | Some("RELEASE") => base,
        Some("BUILD-SNAPSHOT") => format!("{}-SNAPSHOT", base),
        Some(qualifier) => format!("{}-{}", base, qualifier),
    };
    Version::parse(&normalized).ok()
}

/// A dependency's supported boot versions.
///
/// Written either as a bare lower bound (`2.7.0`) or as an interval
/// (`[2.7.0,3.2.0-M1)`, `(3.0.0,3.3.0]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    lower: Version,
    lower_inclusive: bool,
    upper: Option<(Version, bool)>,
}

impl VersionRange {
    pub fn parse(range: &str) -> Option<Self> {
        let range = range.trim();
        let open = range.chars().next()?;

        if open != '[' && open != '(' {
            return Some(Self {
                lower: parse_boot_version(range)?,
                lower_inclusive: true,
                upper: None,
            });
        }

        let close = range.chars().last()?;
        if (close != ']' && close != ')') || range.len() < 2 {
            return None;
        }
        let (lower, upper) = range[1..range.len() - 1].split_once(',')?;

        Some(Self {
            lower: parse_boot_version(lower)?,
            lower_inclusive: open == '[',
            upper: Some((parse_boot_version(upper)?, close == ']')),
        })
    }

    pub fn contains(&self, version: &Version) -> bool {
        let above_lower = if self.lower_inclusive {
            *version >= self.lower
        } else {
            *version > self.lower
        };
        let below_upper = match &self.upper {
            Some((upper, true)) => version <= upper,
            Some((upper, false)) => version < upper,
            None => true,
        };
        above_lower && below_upper
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lower_op = if self.lower_inclusive { ">=" } else { ">" };
        write!(f, "{}{}", lower_op, self.lower)?;
        if let Some((upper, inclusive)) = &self.upper {
            let upper_op = if *inclusive { "<=" } else { "<" };
            write!(f, " and {}{}", upper_op, upper)?;
        }
        Ok(())
    }
}

/// Check a dependency range against a boot version id.
/// Returns None when either side cannot be parsed.
pub fn check_compatibility(range: &str, boot_version: &str) -> Option<bool> {
    let range = VersionRange::parse(range)?;
    let version = parse_boot_version(boot_version)?;
    Some(range.contains(&version))
}
