use crate::core::ids::DEFAULT_MAX_ID_ATTEMPTS;
use crate::domain::model::{GameSelector, SelectorResolution};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{CartError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

pub const DEFAULT_DATA_ROOT: &str = "./content";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub carts: CartsConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub root: String,
    pub carts_dir: String,
    pub games_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: DEFAULT_DATA_ROOT.to_string(),
            carts_dir: "carts".to_string(),
            games_dir: "games".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CartsConfig {
    pub max_id_attempts: usize,
}

impl Default for CartsConfig {
    fn default() -> Self {
        Self {
            max_id_attempts: DEFAULT_MAX_ID_ATTEMPTS,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub resolution: SelectorResolution,
    /// Selector name (e.g. `LOL`) to catalog game id.
    pub selectors: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// Reads and parses a TOML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parses TOML after expanding `${VAR}` references.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content)
            .map_err(|e| CartError::config(format!("TOML parsing error: {}", e)))
    }

    fn placeholder_pattern() -> Result<Regex> {
        Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| CartError::config(format!("invalid substitution pattern: {}", e)))
    }

    /// Unset variables are left as written; `validate_config` reports them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Self::placeholder_pattern()?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// A `${VAR}` still present after substitution means the variable was unset.
    fn reject_unresolved(field: &str, value: &str) -> Result<()> {
        if let Some(caps) = Self::placeholder_pattern()?.captures(value) {
            return Err(CartError::MissingConfig {
                field: format!("{} (environment variable {} is not set)", field, &caps[1]),
            });
        }
        Ok(())
    }

    pub fn validate_config(&self) -> Result<()> {
        Self::reject_unresolved("storage.root", &self.storage.root)?;
        Self::reject_unresolved("storage.carts_dir", &self.storage.carts_dir)?;
        Self::reject_unresolved("storage.games_dir", &self.storage.games_dir)?;

        validation::validate_path("storage.root", &self.storage.root)?;
        validation::validate_dir_name("storage.carts_dir", &self.storage.carts_dir)?;
        validation::validate_dir_name("storage.games_dir", &self.storage.games_dir)?;

        if self.storage.carts_dir == self.storage.games_dir {
            return Err(CartError::InvalidConfigValue {
                field: "storage.games_dir".to_string(),
                value: self.storage.games_dir.clone(),
                reason: "Carts and games must live in different directories".to_string(),
            });
        }

        validation::validate_positive_number(
            "carts.max_id_attempts",
            self.carts.max_id_attempts,
            1,
        )?;

        let mut seen = HashSet::new();
        for (selector, key) in &self.catalog.selectors {
            let field = format!("catalog.selectors.{}", selector);
            let parsed =
                selector
                    .parse::<GameSelector>()
                    .map_err(|_| CartError::InvalidConfigValue {
                        field: field.clone(),
                        value: selector.clone(),
                        reason: "Unknown game selector".to_string(),
                    })?;
            // `LOL` and `lol` name the same selector.
            if !seen.insert(parsed) {
                return Err(CartError::InvalidConfigValue {
                    field,
                    value: selector.clone(),
                    reason: format!("{} is mapped more than once", parsed),
                });
            }
            Self::reject_unresolved(&field, key)?;
            validation::validate_non_empty_string(&field, key)?;
            validation::validate_record_id(key).map_err(|_| CartError::InvalidConfigValue {
                field: field.clone(),
                value: key.clone(),
                reason: "Not a usable game id".to_string(),
            })?;
        }

        if let Some(level) = self.log_level() {
            let valid_levels = ["trace", "debug", "info", "warn", "error"];
            if !valid_levels.contains(&level.to_ascii_lowercase().as_str()) {
                return Err(CartError::InvalidConfigValue {
                    field: "logging.level".to_string(),
                    value: level.to_string(),
                    reason: format!("Valid levels: {}", valid_levels.join(", ")),
                });
            }
        }

        Ok(())
    }

    pub fn with_data_root(mut self, root: impl Into<String>) -> Self {
        self.storage.root = root.into();
        self
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn data_root(&self) -> &str {
        &self.storage.root
    }

    fn carts_dir(&self) -> &str {
        &self.storage.carts_dir
    }

    fn games_dir(&self) -> &str {
        &self.storage.games_dir
    }

    fn max_id_attempts(&self) -> usize {
        self.carts.max_id_attempts
    }

    fn selector_resolution(&self) -> SelectorResolution {
        self.catalog.resolution
    }

    /// Exact-case entry first, then any spelling; duplicates fail validation.
    fn catalog_key(&self, selector: GameSelector) -> String {
        let selectors = &self.catalog.selectors;
        selectors
            .get(selector.as_str())
            .or_else(|| {
                let mut names: Vec<&String> = selectors
                    .keys()
                    .filter(|name| name.eq_ignore_ascii_case(selector.as_str()))
                    .collect();
                names.sort();
                names.first().and_then(|name| selectors.get(*name))
            })
            .cloned()
            .unwrap_or_else(|| selector.default_catalog_key().to_string())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
