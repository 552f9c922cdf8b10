//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/blackroad/blackroad.toml`
//! 3. Local config: `<project_dir>/.blackroad.toml`
//! 4. Environment variables: `BLACKROAD_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{Catalog, DomainError};

pub const DEFAULT_DASHBOARD_URL: &str = "https://admin.blackroad.io/products";
pub const DEFAULT_REVENUE_POTENTIAL: &str = "$35.9M/year";

const GLOBAL_CONFIG_FILE: &str = "blackroad.toml";
const LOCAL_CONFIG_FILE: &str = ".blackroad.toml";

/// Prefix of environment overrides (`BLACKROAD_STRICT`, ...).
pub const ENV_PREFIX: &str = "BLACKROAD";

/// Catalog adjustments.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Products appended after the built-in waves; `!name` removes a product
    pub extra_products: Vec<String>,
}

/// Raw catalog config for intermediate parsing (arrays are Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawCatalogConfig {
    pub extra_products: Option<Vec<String>>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub dashboard_url: Option<String>,
    pub revenue_potential: Option<String>,
    pub strict: Option<bool>,
    #[serde(default)]
    pub catalog: RawCatalogConfig,
}

impl CatalogConfig {
    /// Ordered union with negation support.
    ///
    /// - New items are appended in overlay order
    /// - `!name` cancels an inherited `name`; otherwise it is kept so it can
    ///   remove a built-in product
    /// - Adding `name` cancels an inherited `!name`
    ///
    /// # Examples
    /// ```ignore
    /// merge_array(&["a", "b"], &["c"])       // → ["a", "b", "c"]
    /// merge_array(&["a", "b"], &["!a", "c"]) // → ["b", "c"]
    /// merge_array(&["a"], &["!vllm"])        // → ["a", "!vllm"]
    /// ```
    pub fn merge_array(base: &[String], overlay: &[String]) -> Vec<String> {
        let mut result: Vec<String> = Vec::with_capacity(base.len() + overlay.len());
        for item in base {
            if !result.contains(item) {
                result.push(item.clone());
            }
        }

        for item in overlay {
            let (opposite, is_negation) = match item.strip_prefix('!') {
                Some(name) => (name.to_string(), true),
                None => (format!("!{item}"), false),
            };
            if let Some(pos) = result.iter().position(|x| *x == opposite) {
                result.remove(pos);
                if is_negation {
                    continue;
                }
            }
            if !result.contains(item) {
                result.push(item.clone());
            }
        }
        result
    }

    /// Merge overlay config onto self (base) with union semantics.
    pub fn merge(&self, overlay: &RawCatalogConfig) -> Self {
        Self {
            extra_products: overlay
                .extra_products
                .as_ref()
                .map(|o| Self::merge_array(&self.extra_products, o))
                .unwrap_or_else(|| self.extra_products.clone()),
        }
    }

    /// Apply global config onto defaults with REPLACE semantics.
    pub fn apply_global(&self, global: &RawCatalogConfig) -> Self {
        Self {
            extra_products: global
                .extra_products
                .clone()
                .unwrap_or_else(|| self.extra_products.clone()),
        }
    }
}

/// Unified configuration for blackroad.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Base URL that product names are appended to in deploy output
    pub dashboard_url: String,
    /// Revenue text shown by `list` and help
    pub revenue_potential: String,
    /// Reject product names missing from the catalog
    pub strict: bool,
    pub catalog: CatalogConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dashboard_url: DEFAULT_DASHBOARD_URL.to_string(),
            revenue_potential: DEFAULT_REVENUE_POTENTIAL.to_string(),
            strict: false,
            catalog: CatalogConfig::default(),
        }
    }
}

/// Get the XDG config directory for blackroad.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "blackroad").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join(GLOBAL_CONFIG_FILE))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(LOCAL_CONFIG_FILE)
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> ApplicationResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Build the catalog these settings describe.
    pub fn catalog(&self) -> Result<Catalog, DomainError> {
        if self.catalog.extra_products.is_empty() {
            return Ok(Catalog::builtin());
        }
        Catalog::with_overrides(&self.catalog.extra_products)
    }

    fn normalize(&mut self) {
        let trimmed = self.dashboard_url.trim_end_matches('/').len();
        self.dashboard_url.truncate(trimmed);
    }

    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            dashboard_url: overlay
                .dashboard_url
                .clone()
                .unwrap_or_else(|| self.dashboard_url.clone()),
            revenue_potential: overlay
                .revenue_potential
                .clone()
                .unwrap_or_else(|| self.revenue_potential.clone()),
            strict: overlay.strict.unwrap_or(self.strict),
            catalog: self.catalog.merge(&overlay.catalog),
        }
    }

    fn apply_global(&self, global: &RawSettings) -> Self {
        Self {
            dashboard_url: global
                .dashboard_url
                .clone()
                .unwrap_or_else(|| self.dashboard_url.clone()),
            revenue_potential: global
                .revenue_potential
                .clone()
                .unwrap_or_else(|| self.revenue_potential.clone()),
            strict: global.strict.unwrap_or(self.strict),
            catalog: self.catalog.apply_global(&global.catalog),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config (arrays REPLACE defaults)
    /// 3. Local config in `project_dir` (arrays UNION with global)
    /// 4. Environment variables: `BLACKROAD_*` (REPLACES)
    pub fn load(project_dir: Option<&Path>) -> ApplicationResult<Self> {
        Self::load_from(
            global_config_path().as_deref(),
            project_dir,
            Some(ENV_PREFIX),
        )
    }

    /// Load settings from explicit sources.
    ///
    /// Any layer passed as `None` is skipped; a missing file is not an error.
    pub fn load_from(
        global_path: Option<&Path>,
        project_dir: Option<&Path>,
        env_prefix: Option<&str>,
    ) -> ApplicationResult<Self> {
        let mut current = Self::default();

        if let Some(global_path) = global_path.filter(|p| p.exists()) {
            debug!("load: global config {}", global_path.display());
            let raw = load_raw_settings(global_path)?;
            current = current.apply_global(&raw);
        }

        if let Some(dir) = project_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("load: local config {}", local_path.display());
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(prefix) = env_prefix {
            current = Self::apply_env_overrides(current, prefix)?;
        }
        current.normalize();

        Ok(current)
    }

    /// Apply `<prefix>_*` environment variables as explicit overrides.
    ///
    /// Lists are comma separated: `BLACKROAD_CATALOG__EXTRA_PRODUCTS=wiki,forgejo`.
    fn apply_env_overrides(mut settings: Self, prefix: &str) -> ApplicationResult<Self> {
        let builder = Config::builder().add_source(
            Environment::with_prefix(prefix)
                .prefix_separator("_")
                .separator("__"),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("dashboard_url") {
            settings.dashboard_url = val;
        }
        if let Ok(val) = config.get_string("revenue_potential") {
            settings.revenue_potential = val;
        }
        if config.get_string("strict").is_ok() {
            settings.strict = config.get_bool("strict").map_err(config_err)?;
        }
        if let Ok(val) = config.get_string("catalog.extra_products") {
            settings.catalog.extra_products = val
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> ApplicationResult<String> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Write the config template to `path`, creating parent directories.
    ///
    /// Never overwrites an existing file.
    pub fn write_template(path: &Path) -> ApplicationResult<()> {
        if path.exists() {
            return Err(ApplicationError::AlreadyExists(path.to_path_buf()));
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_path_context("create directory", parent)?;
        }
        std::fs::write(path, Self::template()).with_path_context("write config", path)
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# blackroad configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/blackroad/blackroad.toml  (defines your baseline)
#   Local:  <project_dir>/.blackroad.toml      (project-specific additions)
#   Env:    BLACKROAD_* environment variables  (explicit overrides)
#
# Array Merge Semantics:
#   Global config REPLACES compiled defaults.
#   Local config UNIONS with global, keeping order.
#   "!name" removes a product (built-in or inherited).

# Base URL for the dashboard link printed by `deploy`
# dashboard_url = "https://admin.blackroad.io/products"

# Revenue text printed by `list` and the help banner
# revenue_potential = "$35.9M/year"

# Reject product names that are not in the catalog (exit code 64)
# strict = false

[catalog]
# Products appended after the built-in waves
# extra_products = ["forgejo", "!tts"]
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
