//! Version and range-expression parsing.

use semver::{Version, VersionReq};

use crate::error::{ConfigError, ConfigResult};

/// Parse a semantic version string.
pub(crate) fn parse_version(version: &str) -> ConfigResult<Version> {
    Version::parse(version).map_err(|e| ConfigError::InvalidVersion {
        version: version.to_string(),
        message: e.to_string(),
    })
}

/// Parse a range expression into a requirement.
///
/// Accepts comma-separated comparator lists (`>=1.0.0, <2.0.0`) as well as
/// the space-separated form (`>=1.0.0 <2.0.0`). Whitespace between
/// comparators is normalized to commas before parsing; a bare operator token
/// is rejoined with the version that follows it.
pub(crate) fn parse_range(range: &str) -> Result<VersionReq, semver::Error> {
    let cleaned = range.replace(',', " ");
    let mut comparators: Vec<String> = Vec::new();
    for token in cleaned.split_whitespace() {
        match comparators.last_mut() {
            Some(last) if last.ends_with(['=', '<', '>', '~', '^']) => last.push_str(token),
            _ => comparators.push(token.to_string()),
        }
    }

    if comparators.is_empty() {
        // Empty input: let the semver parser produce the error.
        return VersionReq::parse(range);
    }

    VersionReq::parse(&comparators.join(", "))
}
