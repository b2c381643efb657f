use crate::shim::{ShimOptions, VersionPolicy, default_interpreters};
use crate::tools::{ToolOverride, ToolRegistry};
use anyhow::{Context, Result, bail};
use figment::{
    Figment,
    providers::{Env, Format, Json, Toml, Yaml},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

// Embed the default config at compile time
pub(crate) const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

const ENV_PREFIX: &str = "HOOKSHIM_";
const REPO_CONFIG_STEM: &str = "hookshim";

/// Merged hookshim settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShimConfig {
    /// How `--version <EXPECTED>` is compared with the installed version
    pub version_policy: VersionPolicy,

    /// Seconds a tool may run before it is killed; unset or 0 waits forever
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Script suffix to interpreter
    pub interpreters: BTreeMap<String, String>,

    /// Per-tool profile overrides
    pub tools: BTreeMap<String, ToolOverride>,
}

impl Default for ShimConfig {
    fn default() -> Self {
        Self {
            version_policy: VersionPolicy::default(),
            timeout_secs: None,
            interpreters: default_interpreters(),
            tools: BTreeMap::new(),
        }
    }
}

impl ShimConfig {
    /// Load configuration for a repository rooted at `root`
    pub fn load(root: &Path, custom_config: Option<&Path>) -> Result<Self> {
        if let Some(path) = custom_config {
            if !path.is_file() {
                bail!("Config file not found: {}", path.display());
            }
        }

        let figment = Self::figment(Self::user_config_dir().as_deref(), root, custom_config);
        let config: ShimConfig = figment
            .extract()
            .context("Failed to load hookshim configuration")?;

        tracing::debug!("Loaded configuration: {config:?}");
        Ok(config)
    }

    /// Provider stack without reading anything yet
    pub(crate) fn figment(
        user_dir: Option<&Path>,
        root: &Path,
        custom_config: Option<&Path>,
    ) -> Figment {
        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));

        // A custom config stands in for the user and repository files
        if let Some(custom_path) = custom_config {
            figment = merge_file(figment, custom_path);
        } else {
            if let Some(dir) = user_dir {
                figment = merge_stem(figment, &dir.join("config"));
            }
            figment = merge_stem(figment, &root.join(REPO_CONFIG_STEM));
        }

        // Environment variables always have highest priority
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn shim_options(&self) -> ShimOptions {
        ShimOptions {
            version_policy: self.version_policy,
            timeout: self
                .timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            interpreters: self.interpreters.clone(),
        }
    }

    pub fn registry(&self) -> ToolRegistry {
        ToolRegistry::new(self.tools.clone())
    }

    /// TOML rendering for `config show`
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    fn user_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("hookshim"))
    }
}

/// Merge every supported format of `<stem>.{toml,json,yaml,yml}`
fn merge_stem(figment: Figment, stem: &Path) -> Figment {
    figment
        .merge(Toml::file(stem.with_extension("toml")))
        .merge(Json::file(stem.with_extension("json")))
        .merge(Yaml::file(stem.with_extension("yaml")))
        .merge(Yaml::file(stem.with_extension("yml")))
}

/// Merge one file, picking the format from its extension (TOML otherwise)
fn merge_file(figment: Figment, path: &Path) -> Figment {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => figment.merge(Json::file(path)),
        Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
        _ => figment.merge(Toml::file(path)),
    }
}
