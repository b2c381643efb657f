use super::ShimConfig;
use super::core::DEFAULT_CONFIG;
use crate::shim::VersionPolicy;
use crate::tools::ToolKind;
use figment::{
    Figment, Jail,
    providers::{Format, Toml},
};
use std::time::Duration;

#[test]
fn test_embedded_defaults_match_default_impl() {
    let config: ShimConfig = Figment::from(Toml::string(DEFAULT_CONFIG))
        .extract()
        .expect("Should parse embedded defaults");

    assert_eq!(config, ShimConfig::default());
}

#[test]
fn test_repo_config_overrides_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "hookshim.toml",
            r#"
            version_policy = "contains"
            timeout_secs = 30

            [interpreters]
            py = "python3.12"

            [tools.cppcheck]
            default_args = ["--enable=all"]
            "#,
        )?;

        let config: ShimConfig = ShimConfig::figment(None, jail.directory(), None).extract()?;

        assert_eq!(config.version_policy, VersionPolicy::Contains);
        assert_eq!(config.timeout_secs, Some(30));
        assert_eq!(config.interpreters["py"], "python3.12");
        // Untouched defaults survive the merge
        assert_eq!(config.interpreters["sh"], "sh");

        let cppcheck = config.registry().profile("cppcheck");
        assert_eq!(cppcheck.default_args, vec!["--enable=all"]);
        assert_eq!(cppcheck.look_behind, "Cppcheck ");
        Ok(())
    });
}

#[test]
fn test_yaml_repo_config() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "hookshim.yaml",
            "tools:\n  black:\n    kind: formatter\n    look_behind: \"black, \"\n",
        )?;

        let config: ShimConfig = ShimConfig::figment(None, jail.directory(), None).extract()?;
        let black = config.registry().profile("black");

        assert_eq!(black.kind, ToolKind::Formatter);
        assert_eq!(black.look_behind, "black, ");
        Ok(())
    });
}

#[test]
fn test_user_config_is_below_repo_config() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "timeout_secs = 10\nversion_policy = \"contains\"")?;
        jail.create_file("hookshim.toml", "timeout_secs = 20")?;

        let user_dir = jail.directory().to_path_buf();
        let config: ShimConfig =
            ShimConfig::figment(Some(&user_dir), jail.directory(), None).extract()?;

        assert_eq!(config.timeout_secs, Some(20));
        assert_eq!(config.version_policy, VersionPolicy::Contains);
        Ok(())
    });
}

#[test]
fn test_custom_config_replaces_repo_config() {
    Jail::expect_with(|jail| {
        jail.create_file("hookshim.toml", "timeout_secs = 20")?;
        jail.create_file("ci.json", r#"{ "version_policy": "contains" }"#)?;

        let custom = jail.directory().join("ci.json");
        let config: ShimConfig =
            ShimConfig::figment(None, jail.directory(), Some(&custom)).extract()?;

        assert_eq!(config.version_policy, VersionPolicy::Contains);
        assert_eq!(config.timeout_secs, None);
        Ok(())
    });
}

#[test]
fn test_environment_has_highest_priority() {
    Jail::expect_with(|jail| {
        jail.create_file("hookshim.toml", "timeout_secs = 20")?;
        jail.set_env("HOOKSHIM_TIMEOUT_SECS", "45");
        jail.set_env("HOOKSHIM_TOOLS__OCLINT__HELP_URL", "https://example.test/oclint");

        let config: ShimConfig = ShimConfig::figment(None, jail.directory(), None).extract()?;

        assert_eq!(config.timeout_secs, Some(45));
        assert_eq!(
            config.registry().profile("oclint").help_url.as_deref(),
            Some("https://example.test/oclint")
        );
        Ok(())
    });
}

#[test]
fn test_missing_custom_config_is_an_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let missing = dir.path().join("missing.toml");

    let err = ShimConfig::load(dir.path(), Some(&missing)).unwrap_err();
    assert!(err.to_string().contains("Config file not found"));
}

#[test]
fn test_shim_options_from_config() {
    let mut config = ShimConfig::default();
    assert_eq!(config.shim_options().timeout, None);

    config.timeout_secs = Some(0);
    assert_eq!(config.shim_options().timeout, None);

    config.timeout_secs = Some(5);
    config.version_policy = VersionPolicy::Contains;
    let options = config.shim_options();
    assert_eq!(options.timeout, Some(Duration::from_secs(5)));
    assert_eq!(options.version_policy, VersionPolicy::Contains);
}

#[test]
fn test_config_renders_as_toml() {
    let rendered = ShimConfig::default().to_toml().unwrap();

    assert!(rendered.contains("version_policy = \"prefix\""));
    assert!(rendered.contains("[interpreters]"));
    assert!(!rendered.contains("timeout_secs"));
}
