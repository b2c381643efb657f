//! Known tool profiles
//!
//! A profile records what the shim needs to know about a particular tool:
//! whether it analyzes or formats, where its version number sits in
//! `--version` output, where its documentation lives, which of its flags
//! make it edit files in place, and which arguments it should always get.
//! Built-in profiles cover the usual C/C++ tooling; configuration can
//! override them or add new ones.

use crate::shim::{CommandSpec, InvocationArgs};
use clap::ValueEnum;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[cfg(test)]
mod tests;

/// What the shim does with a tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    /// Reports problems and never touches files
    Analyzer,
    /// Produces formatted source, checked against the original
    Formatter,
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Self::Analyzer => "analyzer",
            Self::Formatter => "formatter",
        })
    }
}

/// Everything the shim knows about one tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolProfile {
    pub name: String,
    pub kind: ToolKind,
    #[serde(default)]
    pub look_behind: String,
    #[serde(default)]
    pub help_url: Option<String>,
    #[serde(default)]
    pub in_place_flags: Vec<String>,
    #[serde(default)]
    pub default_args: Vec<String>,
}

/// Configured changes to a profile; unset fields keep the built-in value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ToolKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub look_behind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_place_flags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_args: Option<Vec<String>>,
}

fn profile(
    name: &str,
    kind: ToolKind,
    look_behind: &str,
    help_url: &str,
    in_place_flags: &[&str],
    default_args: &[&str],
) -> ToolProfile {
    ToolProfile {
        name: name.to_string(),
        kind,
        look_behind: look_behind.to_string(),
        help_url: Some(help_url.to_string()),
        in_place_flags: in_place_flags.iter().map(|s| s.to_string()).collect(),
        default_args: default_args.iter().map(|s| s.to_string()).collect(),
    }
}

lazy_static! {
    static ref BUILTIN_PROFILES: Vec<ToolProfile> = vec![
        profile(
            "clang-format",
            ToolKind::Formatter,
            "clang-format version ",
            "https://clang.llvm.org/docs/ClangFormat.html",
            &["-i"],
            &[],
        ),
        profile(
            "clang-tidy",
            ToolKind::Analyzer,
            "LLVM version ",
            "https://clang.llvm.org/extra/clang-tidy/",
            &[],
            &[],
        ),
        profile(
            "cppcheck",
            ToolKind::Analyzer,
            "Cppcheck ",
            "https://cppcheck.sourceforge.io/",
            &[],
            &["-q", "--error-exitcode=1"],
        ),
        profile(
            "cpplint",
            ToolKind::Analyzer,
            "cpplint ",
            "https://github.com/cpplint/cpplint",
            &[],
            &[],
        ),
        profile(
            "oclint",
            ToolKind::Analyzer,
            "OCLint version ",
            "https://oclint.org/",
            &[],
            &[],
        ),
    ];
}

/// Profiles shipped with the shim
pub fn builtin_profiles() -> &'static [ToolProfile] {
    &BUILTIN_PROFILES
}

impl ToolProfile {
    /// Profile for a tool nothing is known about
    pub fn generic(name: &str, kind: ToolKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            look_behind: String::new(),
            help_url: None,
            in_place_flags: Vec::new(),
            default_args: Vec::new(),
        }
    }

    pub fn apply(&mut self, changes: &ToolOverride) {
        if let Some(kind) = changes.kind {
            self.kind = kind;
        }
        if let Some(look_behind) = &changes.look_behind {
            self.look_behind = look_behind.clone();
        }
        if let Some(help_url) = &changes.help_url {
            self.help_url = Some(help_url.clone());
        }
        if let Some(flags) = &changes.in_place_flags {
            self.in_place_flags = flags.clone();
        }
        if let Some(args) = &changes.default_args {
            self.default_args = args.clone();
        }
    }

    pub fn command_spec(&self) -> CommandSpec {
        let mut spec = CommandSpec::new(&self.name).with_look_behind(&self.look_behind);
        if let Some(url) = &self.help_url {
            spec = spec.with_help_url(url);
        }
        spec
    }

    /// Apply default arguments and in-place detection to split hook arguments
    pub fn configure(&self, args: &mut InvocationArgs) {
        for default in &self.default_args {
            args.add_if_missing(&[default]);
        }
        if self.kind == ToolKind::Formatter {
            args.detect_in_place(&self.in_place_flags);
        }
    }
}

/// Looks up profiles, layering configuration over the built-ins
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    overrides: BTreeMap<String, ToolOverride>,
}

impl ToolRegistry {
    pub fn new(overrides: BTreeMap<String, ToolOverride>) -> Self {
        Self { overrides }
    }

    /// Profile for `name`
    ///
    /// Versioned executables such as `clang-format-15` share the profile of
    /// their unversioned name but keep their own executable name.
    pub fn profile(&self, name: &str) -> ToolProfile {
        let mut found = builtin_profiles()
            .iter()
            .find(|p| p.name == name || is_versioned_name(name, &p.name))
            .cloned()
            .map(|mut p| {
                p.name = name.to_string();
                p
            })
            .unwrap_or_else(|| ToolProfile::generic(name, ToolKind::Analyzer));

        if let Some(changes) = self.overrides.get(name) {
            found.apply(changes);
        }
        found
    }

    /// Every built-in profile plus tools that only exist in configuration
    pub fn profiles(&self) -> Vec<ToolProfile> {
        let mut all: Vec<ToolProfile> = builtin_profiles()
            .iter()
            .map(|p| self.profile(&p.name))
            .collect();
        for name in self.overrides.keys() {
            if !all.iter().any(|p| &p.name == name) {
                all.push(self.profile(name));
            }
        }
        all
    }
}

fn is_versioned_name(name: &str, base: &str) -> bool {
    name.strip_prefix(base)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|version| {
            !version.is_empty() && version.chars().all(|c| c.is_ascii_digit() || c == '.')
        })
}
