//! Reading a tool's version and checking it against the requested one

use super::error::{ShimError, ShimResult};
use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Digits-and-dots followed by a build/pre-release tail: `8.0.0`, `1.2.3-rc1`, `22.02`
pub const VERSION_PATTERN: &str = r"((?:\d+\.)+[\d+_\+\-a-z]+)";

/// How an expected version is compared with the installed one
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum VersionPolicy {
    /// Expected must be the start of the actual version (`14` accepts `14.0.6`)
    #[default]
    Prefix,
    /// Expected may appear anywhere in the actual version
    Contains,
}

impl VersionPolicy {
    pub fn matches(self, actual: &str, expected: &str) -> bool {
        match self {
            Self::Prefix => actual.starts_with(expected),
            Self::Contains => actual.contains(expected),
        }
    }
}

/// Pull the version number out of `--version` output
///
/// `look_behind` is a regex placed right before the version capture so tools
/// that print several numbers (LLVM, OCLint) pick the right one.
pub fn parse_version(command: &str, look_behind: &str, output: &str) -> ShimResult<String> {
    let regex = Regex::new(&format!("{look_behind}{VERSION_PATTERN}")).map_err(|source| {
        ShimError::InvalidLookBehind {
            command: command.to_string(),
            source,
        }
    })?;

    regex
        .captures(output)
        .and_then(|captures| captures.get(1))
        .map(|version| version.as_str().to_string())
        .ok_or_else(|| ShimError::VersionFormatUnrecognized {
            command: command.to_string(),
            output: output.to_string(),
        })
}

/// Fail unless `actual` satisfies `expected` under `policy`
pub fn assert_version(
    command: &str,
    actual: &str,
    expected: &str,
    policy: VersionPolicy,
) -> ShimResult<()> {
    if policy.matches(actual, expected) {
        tracing::debug!("{command} version {actual} satisfies {expected} ({policy:?})");
        return Ok(());
    }
    Err(ShimError::VersionMismatch {
        command: command.to_string(),
        expected: expected.to_string(),
        actual: actual.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_common_outputs() {
        let cases = [
            (
                "clang-format version ",
                "Ubuntu clang-format version 14.0.0-1ubuntu1\n",
                "14.0.0-1ubuntu1",
            ),
            (
                "LLVM version ",
                "LLVM (http://llvm.org/):\n  LLVM version 15.0.7\n  Optimized build.\n",
                "15.0.7",
            ),
            ("Cppcheck ", "Cppcheck 2.7\n", "2.7"),
            (
                "cpplint ",
                "Cpplint fork (https://github.com/cpplint/cpplint)\ncpplint 1.6.1\nPython 3.11.4\n",
                "1.6.1",
            ),
            (
                "OCLint version ",
                "OCLint (http://oclint.org/):\nOCLint version 22.02.\nBuilt Feb 22 2022.\n",
                "22.02",
            ),
            ("", "CLI 1.0.0\n", "1.0.0"),
            ("", "tool 1.2.3-rc1 (build 7)", "1.2.3-rc1"),
        ];

        for (look_behind, output, expected) in cases {
            let version = parse_version("tool", look_behind, output).unwrap();
            assert_eq!(version, expected, "output: {output:?}");
        }
    }

    #[test]
    fn test_look_behind_skips_earlier_numbers() {
        let output = "Python 3.11.4\ncpplint 1.6.1\n";

        assert_eq!(parse_version("cpplint", "", output).unwrap(), "3.11.4");
        assert_eq!(parse_version("cpplint", "cpplint ", output).unwrap(), "1.6.1");
    }

    #[test]
    fn test_unrecognized_format() {
        let err = parse_version("tool", "", "no version here\n").unwrap_err();

        assert!(matches!(err, ShimError::VersionFormatUnrecognized { .. }));
        let report = String::from_utf8(err.report()).unwrap();
        assert!(report.starts_with("Problem with tool: getting version\n"));
        assert!(report.contains("The version format for this command has changed."));
    }

    #[test]
    fn test_invalid_look_behind() {
        let err = parse_version("tool", "version (", "version (1.0.0").unwrap_err();
        assert!(matches!(err, ShimError::InvalidLookBehind { .. }));
    }

    #[test]
    fn test_same_version_always_passes() {
        for version in ["1.0.0", "14.0.0-1ubuntu1", "2.7", "22.02."] {
            assert!(assert_version("tool", version, version, VersionPolicy::Prefix).is_ok());
            assert!(assert_version("tool", version, version, VersionPolicy::Contains).is_ok());
        }
    }

    #[test]
    fn test_prefix_policy() {
        assert!(assert_version("tool", "1.0.0", "1.0", VersionPolicy::Prefix).is_ok());
        assert!(assert_version("tool", "1.0.0", "1.0.1", VersionPolicy::Prefix).is_err());
        assert!(assert_version("tool", "11.0.0", "1.0", VersionPolicy::Prefix).is_err());
    }

    #[test]
    fn test_contains_policy() {
        assert!(assert_version("tool", "11.0.0", "1.0", VersionPolicy::Contains).is_ok());
        assert!(assert_version("tool", "1.0.0", "1.0.1", VersionPolicy::Contains).is_err());
    }

    #[test]
    fn test_mismatch_error_fields() {
        let err = assert_version("tool", "1.0.0", "1.0.1", VersionPolicy::Prefix).unwrap_err();

        match err {
            ShimError::VersionMismatch {
                command,
                expected,
                actual,
            } => {
                assert_eq!(command, "tool");
                assert_eq!(expected, "1.0.1");
                assert_eq!(actual, "1.0.0");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
