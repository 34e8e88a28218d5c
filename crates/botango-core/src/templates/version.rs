//! Template pack version compatibility

use semver::Version;

/// Warn when the pack was written for a newer CLI than the one running.
/// Versions that do not parse are ignored.
pub fn check_compatibility(cli_version: &str, pack_version: &str) -> Option<String> {
    let cli = parse_version(cli_version)?;
    let pack = parse_version(pack_version)?;

    (cli < pack).then(|| {
        format!(
            "templates target botango {} but this is botango {}; \
             consider updating: cargo install botango-cli --force",
            pack, cli
        )
    })
}

/// Parse a version, accepting a leading `v`
fn parse_version(version: &str) -> Option<Version> {
    let cleaned = version.trim();
    Version::parse(cleaned.strip_prefix('v').unwrap_or(cleaned)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_older_cli_warns() {
        let warning = check_compatibility("0.1.0", "0.2.0").unwrap();
        assert!(warning.contains("0.2.0"));
        assert!(warning.contains("0.1.0"));
    }

    #[test]
    fn test_same_or_newer_cli_is_silent() {
        assert!(check_compatibility("0.1.0", "0.1.0").is_none());
        assert!(check_compatibility("0.3.0", "v0.2.5").is_none());
    }

    #[test]
    fn test_unparsable_versions_ignored() {
        assert!(check_compatibility("dev", "0.1.0").is_none());
        assert!(check_compatibility("0.1.0", "latest").is_none());
    }
}
