//! Tool profile tests

use super::*;
use crate::shim::ArgSplitter;

#[test]
fn test_builtin_profiles_are_unique() {
    let profiles = builtin_profiles();
    assert!(!profiles.is_empty());

    for (i, profile) in profiles.iter().enumerate() {
        assert!(
            profiles[i + 1..].iter().all(|other| other.name != profile.name),
            "duplicate profile {}",
            profile.name
        );
        assert!(profile.help_url.is_some());
        assert!(!profile.look_behind.is_empty());
    }
}

#[test]
fn test_unknown_tool_is_generic_analyzer() {
    let registry = ToolRegistry::default();
    let profile = registry.profile("my-linter");

    assert_eq!(profile, ToolProfile::generic("my-linter", ToolKind::Analyzer));
}

#[test]
fn test_versioned_executable_uses_base_profile() {
    let registry = ToolRegistry::default();
    let profile = registry.profile("clang-format-15");

    assert_eq!(profile.name, "clang-format-15");
    assert_eq!(profile.kind, ToolKind::Formatter);
    assert_eq!(profile.look_behind, "clang-format version ");

    assert_eq!(registry.profile("clang-format-diff").kind, ToolKind::Analyzer);
}

#[test]
fn test_override_replaces_only_given_fields() {
    let mut overrides = BTreeMap::new();
    overrides.insert(
        "cppcheck".to_string(),
        ToolOverride {
            default_args: Some(vec!["--enable=all".to_string()]),
            ..Default::default()
        },
    );
    let registry = ToolRegistry::new(overrides);
    let profile = registry.profile("cppcheck");

    assert_eq!(profile.default_args, vec!["--enable=all"]);
    assert_eq!(profile.look_behind, "Cppcheck ");
    assert_eq!(profile.kind, ToolKind::Analyzer);
}

#[test]
fn test_configured_only_tools_are_listed() {
    let mut overrides = BTreeMap::new();
    overrides.insert(
        "black".to_string(),
        ToolOverride {
            kind: Some(ToolKind::Formatter),
            look_behind: Some("black, ".to_string()),
            ..Default::default()
        },
    );
    let registry = ToolRegistry::new(overrides);
    let profiles = registry.profiles();

    assert_eq!(profiles.len(), builtin_profiles().len() + 1);
    let black = profiles.iter().find(|p| p.name == "black").unwrap();
    assert_eq!(black.kind, ToolKind::Formatter);
    assert_eq!(black.look_behind, "black, ");
}

#[test]
fn test_command_spec_from_profile() {
    let spec = ToolRegistry::default().profile("oclint").command_spec();

    assert_eq!(spec.name, "oclint");
    assert_eq!(spec.look_behind, "OCLint version ");
    assert_eq!(spec.help_url.as_deref(), Some("https://oclint.org/"));
    assert!(spec.install_dir.is_none());
}

#[test]
fn test_configure_adds_defaults_and_detects_in_place() {
    let registry = ToolRegistry::default();

    let mut cppcheck_args = ArgSplitter::new("cppcheck")
        .split(["--error-exitcode=3", "main.c"])
        .unwrap();
    registry.profile("cppcheck").configure(&mut cppcheck_args);
    assert_eq!(cppcheck_args.tool_args, vec!["--error-exitcode=3", "-q"]);
    assert_eq!(cppcheck_args.paths, vec!["main.c"]);

    let mut format_args = ArgSplitter::new("clang-format")
        .split(["-i", "main.c"])
        .unwrap();
    registry.profile("clang-format").configure(&mut format_args);
    assert!(format_args.edit_in_place);
}
