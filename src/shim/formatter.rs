//! Formatters in check mode
//!
//! For each file the formatted form is produced (from the tool's stdout, or by
//! letting the tool rewrite the file and reading it back) and compared with
//! the original. Every differing file adds a unified diff to one report; the
//! run fails only after all files have been looked at.

use super::ShimCommand;
use super::error::{ShimError, ShimResult};
use similar::{DiffTag, TextDiff};
use std::path::{Path, PathBuf};

const HEADER_RULE_WIDTH: usize = 20;

pub struct FormatterVerifier {
    command: ShimCommand,
    report: Vec<u8>,
    exit_code: i32,
    failed_files: usize,
}

impl FormatterVerifier {
    pub fn new(command: ShimCommand) -> Self {
        Self {
            command,
            report: Vec::new(),
            exit_code: 0,
            failed_files: 0,
        }
    }

    /// 0 until some file differs from its formatted form, then 1
    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Accumulated per-file diffs
    pub fn report(&self) -> &[u8] {
        &self.report
    }

    /// Compare every path from the hook arguments, then [`finish`](Self::finish)
    pub async fn verify_all(mut self) -> ShimResult<()> {
        let paths = self.command.args.paths.clone();
        for path in &paths {
            self.compare_to_formatted(path).await?;
        }
        self.finish()
    }

    /// Check one file, recording a diff if formatting would change it
    pub async fn compare_to_formatted(&mut self, path: &str) -> ShimResult<()> {
        let original = self.read_file(path).await?;
        let expected = if self.command.args.edit_in_place {
            self.formatted_output(path).await?;
            self.read_file(path).await?
        } else {
            self.formatted_output(path).await?
        };

        if let Some(diff) = unified_diff(&original, &expected) {
            tracing::info!("{path} is not formatted according to {}", self.command.name());
            self.report.extend_from_slice(path.as_bytes());
            self.report.push(b'\n');
            self.report
                .extend_from_slice("=".repeat(HEADER_RULE_WIDTH).as_bytes());
            self.report.push(b'\n');
            self.report.extend_from_slice(&diff);
            if !diff.ends_with(b"\n") {
                self.report.push(b'\n');
            }
            self.exit_code = 1;
            self.failed_files += 1;
        }
        Ok(())
    }

    /// Turn the accumulated state into the run's outcome
    pub fn finish(self) -> ShimResult<()> {
        if self.exit_code == 0 {
            return Ok(());
        }
        Err(ShimError::FormattingDiff {
            command: self.command.name().to_string(),
            files: self.failed_files,
            report: self.report,
        })
    }

    /// Run `<tool> <tool args...> <path>` and return its stdout
    ///
    /// Anything on stderr or a non-zero exit means the formatter itself is
    /// unhappy, which is reported as such rather than as a diff.
    async fn formatted_output(&self, path: &str) -> ShimResult<Vec<u8>> {
        let mut argv = self.command.args.tool_args.clone();
        argv.push(path.to_string());

        let result = self.command.execute(&argv).await?;
        if !result.stderr.is_empty() || !result.success() {
            return Err(ShimError::ToolExecution {
                command: self.command.name().to_string(),
                problem: format!(
                    "Unexpected Stderr/return code received when analyzing {path}.\nArgs: {}",
                    self.command.describe(&argv)
                ),
                details: String::from_utf8_lossy(&result.combined_output()).into_owned(),
            });
        }
        Ok(result.stdout)
    }

    async fn read_file(&self, path: &str) -> ShimResult<Vec<u8>> {
        if !Path::new(path).is_file() {
            return Err(ShimError::FileNotFound {
                command: self.command.name().to_string(),
                path: PathBuf::from(path),
            });
        }
        tokio::fs::read(path)
            .await
            .map_err(|err| ShimError::ToolExecution {
                command: self.command.name().to_string(),
                problem: format!("Unable to read {path}."),
                details: err.to_string(),
            })
    }
}

/// Unified line diff labelled `original`/`formatted`, or `None` if equal
///
/// Works on raw bytes so encodings other than UTF-8 are compared exactly and
/// written to the report untouched. Lines keep their terminator, so `\r\n`
/// against `\n` is a change and an empty input is zero lines.
pub fn unified_diff(original: &[u8], formatted: &[u8]) -> Option<Vec<u8>> {
    let diff = TextDiff::from_lines(original, formatted);
    if diff.ops().iter().all(|op| op.tag() == DiffTag::Equal) {
        return None;
    }

    let mut out = b"--- original\n+++ formatted\n".to_vec();
    let mut unified = diff.unified_diff();
    for hunk in unified.context_radius(3).iter_hunks() {
        out.extend_from_slice(format!("{}\n", hunk.header()).as_bytes());
        for change in hunk.iter_changes() {
            out.extend_from_slice(change.tag().to_string().as_bytes());
            out.extend_from_slice(change.value());
            if change.missing_newline() {
                out.extend_from_slice(b"\n\\ No newline at end of file\n");
            }
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diff_text(original: &[u8], formatted: &[u8]) -> String {
        String::from_utf8(unified_diff(original, formatted).unwrap()).unwrap()
    }

    #[test]
    fn test_identical_content_has_no_diff() {
        let source = b"int main() {\n  return 0;\n}\n";
        assert!(unified_diff(source, source).is_none());
        assert!(unified_diff(b"", b"").is_none());
    }

    #[test]
    fn test_changed_line_is_reported() {
        let diff = diff_text(b"int main(){return 0;}\n", b"int main() { return 0; }\n");

        assert!(diff.starts_with("--- original\n+++ formatted\n@@ -1 +1 @@\n"));
        assert!(diff.contains("-int main(){return 0;}\n"));
        assert!(diff.contains("+int main() { return 0; }\n"));
    }

    #[test]
    fn test_empty_formatted_output_differs_from_content() {
        let diff = diff_text(b"a\nb\n", b"");
        assert!(diff.contains("-a\n-b\n"));
    }

    #[test]
    fn test_trailing_newline_difference_is_a_diff() {
        let diff = diff_text(b"a\nb", b"a\nb\n");
        assert!(diff.contains("\\ No newline at end of file"));
    }

    #[test]
    fn test_crlf_against_lf_is_a_diff() {
        let diff = unified_diff(b"a\r\nb\n", b"a\nb\n").unwrap();

        assert!(diff.windows(4).any(|w| w == b"-a\r\n"));
        assert!(diff.windows(3).any(|w| w == b"+a\n"));
    }

    #[test]
    fn test_non_utf8_bytes_are_compared_exactly() {
        // Latin-1 e-acute against e-grave: both decode to U+FFFD lossily
        let original = b"// caf\xe9\nint x;\n";
        let formatted = b"// caf\xe8\nint x;\n";

        let diff = unified_diff(original, formatted).unwrap();

        assert!(diff.windows(8).any(|w| w == b"-// caf\xe9"));
        assert!(diff.windows(8).any(|w| w == b"+// caf\xe8"));
        assert!(unified_diff(original, original).is_none());
    }
}
