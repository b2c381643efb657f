//! # hookshim - one adapter for every analyzer and formatter hook
//!
//! hookshim sits between a pre-commit framework and external command-line
//! tools such as clang-format, clang-tidy, cppcheck, cpplint and oclint. It
//! gives them all the same hook interface:
//!
//! - **Uniform arguments**: paths, `--install-dir`, `--version` and pass-through
//!   tool options, split the same way for every tool
//! - **Version pinning**: fail early when the installed tool is not the one the
//!   repository asked for
//! - **Analyzers**: run once over all files, pass the exit code and output through
//! - **Formatters**: report a unified diff for every file that is not
//!   formatted; in-place tools leave the rewritten file behind
//!
//! ## Quick Start
//!
//! ```bash
//! # Check formatting of two files with a pinned clang-format
//! hookshim format clang-format --version 18 --style=file src/a.c src/b.c
//!
//! # Run cppcheck over the files added in this commit
//! hookshim analyze cppcheck --enable=warning
//! ```

pub mod cli;
pub mod config;
pub mod git;
pub mod shim;
pub mod tools;

pub use cli::{Cli, Output};
pub use config::ShimConfig;

