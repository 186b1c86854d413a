use std::fmt;
use std::str::FromStr;

/// Release channel of a format version.
///
/// Declaration order is the ordering used when comparing versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReleaseType {
    Alpha,
    Beta,
    Final,
    Patch,
}

impl ReleaseType {
    fn from_char(c: char) -> Option<Self> {
        match c {
            'a' => Some(ReleaseType::Alpha),
            'b' => Some(ReleaseType::Beta),
            'f' => Some(ReleaseType::Final),
            'p' => Some(ReleaseType::Patch),
            _ => None,
        }
    }

    fn as_char(self) -> char {
        match self {
            ReleaseType::Alpha => 'a',
            ReleaseType::Beta => 'b',
            ReleaseType::Final => 'f',
            ReleaseType::Patch => 'p',
        }
    }
}

/// Error returned when a version string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid version string {input:?}: {reason}")]
pub struct VersionParseError {
    input: String,
    reason: &'static str,
}

impl VersionParseError {
    fn new(input: &str, reason: &'static str) -> Self {
        VersionParseError {
            input: input.to_string(),
            reason,
        }
    }
}

/// Format version of the container a record was written by.
///
/// Versions follow the engine release scheme, e.g. `2017.3.1f1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u16,
    pub minor: u16,
    pub build: u16,
    pub release: ReleaseType,
    pub number: u16,
}

impl Version {
    /// Oldest version this crate knows how to read.
    pub const MIN_SUPPORTED: Version = Version::lowest(3, 0, 0);

    /// First version past the known range.
    pub const MAX_UNSUPPORTED: Version = Version::lowest(7000, 0, 0);

    /// Curve keyframe arrays are followed by 4-byte alignment from here on.
    pub const CURVE_ALIGNMENT: Version = Version::lowest(2017, 0, 0);

    /// Object identifiers inside weak references widen to 64 bits from here on.
    pub const LONG_PATH_ID: Version = Version::lowest(5, 0, 0);

    /// Creates a final release version (`major.minor.buildf1`).
    pub const fn new(major: u16, minor: u16, build: u16) -> Self {
        Version {
            major,
            minor,
            build,
            release: ReleaseType::Final,
            number: 1,
        }
    }

    /// Earliest possible release of `major.minor.build` (the first alpha).
    pub const fn lowest(major: u16, minor: u16, build: u16) -> Self {
        Version {
            major,
            minor,
            build,
            release: ReleaseType::Alpha,
            number: 0,
        }
    }

    /// Returns true if this version falls inside the known range.
    pub fn is_supported(&self) -> bool {
        *self >= Self::MIN_SUPPORTED && *self < Self::MAX_UNSUPPORTED
    }
}

/// Returns true if a curve's keyframe array must be followed by alignment
/// to the next 4-byte boundary.
///
/// Decoding, encoding and the type tree all consult this predicate.
pub fn requires_alignment(version: Version) -> bool {
    version >= Version::CURVE_ALIGNMENT
}

/// Returns true if weak references store a 64-bit object identifier.
pub fn has_long_path_id(version: Version) -> bool {
    version >= Version::LONG_PATH_ID
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}{}{}",
            self.major,
            self.minor,
            self.build,
            self.release.as_char(),
            self.number
        )
    }
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(VersionParseError::new(s, "empty"));
        }

        let mut parts = input.splitn(3, '.');
        let major = parse_component(s, parts.next())?;
        let minor = match parts.next() {
            Some(part) => parse_component(s, Some(part))?,
            None => return Ok(Version::new(major, 0, 0)),
        };
        let Some(tail) = parts.next() else {
            return Ok(Version::new(major, minor, 0));
        };

        // tail is "1", "1f1", "0b4", ...
        let split = tail.find(|c: char| !c.is_ascii_digit());
        let Some(idx) = split else {
            return Ok(Version::new(major, minor, parse_component(s, Some(tail))?));
        };

        let build = parse_component(s, Some(&tail[..idx]))?;
        let mut rest = tail[idx..].chars();
        let release = rest
            .next()
            .and_then(ReleaseType::from_char)
            .ok_or_else(|| VersionParseError::new(s, "unknown release type"))?;
        let number = parse_component(s, Some(rest.as_str()))?;

        Ok(Version {
            major,
            minor,
            build,
            release,
            number,
        })
    }
}

fn parse_component(input: &str, part: Option<&str>) -> Result<u16, VersionParseError> {
    let part = part.ok_or_else(|| VersionParseError::new(input, "missing component"))?;
    if part.is_empty() {
        return Err(VersionParseError::new(input, "missing component"));
    }
    part.parse()
        .map_err(|_| VersionParseError::new(input, "component is not a number"))
}
