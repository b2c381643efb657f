//! Configuration management for hookshim
//!
//! Settings are layered with figment: embedded defaults, then the user's
//! config file, then the repository's, then `HOOKSHIM_*` environment
//! variables. A file given with `--config` replaces the user and repository
//! layers.

pub mod core;

pub use self::core::ShimConfig;

#[cfg(test)]
mod tests;
