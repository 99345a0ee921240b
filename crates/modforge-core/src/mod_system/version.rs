use semver::Version;
use thiserror::Error;

/// Error type for version parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("Invalid version format: '{0}'")]
    InvalidFormat(String),
    #[error("Version parse error: {0}")]
    ParseError(String),
}

/// Parses a version string, accepting the partial forms mod authors tend to
/// write ("2", "1.4") by padding missing components with zeros.
pub fn parse_version(raw: &str) -> Result<Version, VersionError> {
    let trimmed = raw.trim().trim_start_matches('v');
    if trimmed.is_empty() {
        return Err(VersionError::InvalidFormat(raw.to_string()));
    }

    // Pre-release/build suffixes only make sense on a full triple
    let core_end = trimmed.find(['-', '+']).unwrap_or(trimmed.len());
    let (core, suffix) = trimmed.split_at(core_end);
    let parts: Vec<&str> = core.split('.').collect();
    if parts.len() > 3 || parts.iter().any(|p| p.is_empty()) {
        return Err(VersionError::InvalidFormat(raw.to_string()));
    }

    let mut padded = parts.join(".");
    for _ in parts.len()..3 {
        padded.push_str(".0");
    }
    padded.push_str(suffix);

    Version::parse(&padded).map_err(|e| VersionError::ParseError(format!("'{}': {}", raw, e)))
}

/// Checks `found >= minimum`, both given as (possibly partial) version strings.
pub fn satisfies_minimum(found: &str, minimum: &str) -> Result<bool, VersionError> {
    let found = parse_version(found)?;
    let minimum = parse_version(minimum)?;
    Ok(found >= minimum)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_and_partial_versions() {
        assert_eq!(parse_version("1.2.3").unwrap(), Version::new(1, 2, 3));
        assert_eq!(parse_version("1.2").unwrap(), Version::new(1, 2, 0));
        assert_eq!(parse_version("4").unwrap(), Version::new(4, 0, 0));
        assert_eq!(parse_version(" v0.9.1 ").unwrap(), Version::new(0, 9, 1));
    }

    #[test]
    fn test_parse_prerelease() {
        let v = parse_version("2.0.0-beta.1").unwrap();
        assert_eq!(v.major, 2);
        assert!(!v.pre.is_empty());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse_version(""), Err(VersionError::InvalidFormat(_))));
        assert!(matches!(parse_version("1..2"), Err(VersionError::InvalidFormat(_))));
        assert!(matches!(parse_version("1.2.3.4"), Err(VersionError::InvalidFormat(_))));
        assert!(matches!(parse_version("abc"), Err(VersionError::ParseError(_))));
    }

    #[test]
    fn test_satisfies_minimum() {
        assert!(satisfies_minimum("1.2.0", "1.2").unwrap());
        assert!(satisfies_minimum("2.0.0", "1.9.9").unwrap());
        assert!(!satisfies_minimum("1.1.9", "1.2").unwrap());
        assert!(satisfies_minimum("x", "1.0").is_err());
    }
}
