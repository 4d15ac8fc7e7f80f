use crate::error::{FarmLogError, Result};
use crate::logic::compatibility::diversity::DEFAULT_MAX_DISTINCT_TYPES;
use crate::logic::compatibility::RuleTable;
use crate::models::CompatibilityRule;
use dialoguer::{Confirm, Input};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub compatibility: CompatibilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    /// JSON document holding the treatment records.
    pub treatments_file: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            treatments_file: PathBuf::from("data/treatments.json"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompatibilityConfig {
    #[serde(default = "default_max_distinct_types")]
    pub max_distinct_types: usize,
    #[serde(default = "default_true")]
    pub use_builtin_rules: bool,
    /// Farm-specific rules; they shadow built-in rules for the same pair.
    #[serde(default)]
    pub rules: Vec<CompatibilityRule>,
}

fn default_max_distinct_types() -> usize {
    DEFAULT_MAX_DISTINCT_TYPES
}

fn default_true() -> bool {
    true
}

impl Default for CompatibilityConfig {
    fn default() -> Self {
        Self {
            max_distinct_types: DEFAULT_MAX_DISTINCT_TYPES,
            use_builtin_rules: true,
            rules: Vec::new(),
        }
    }
}

impl CompatibilityConfig {
    pub fn rule_table(&self) -> RuleTable {
        let builtin = if self.use_builtin_rules {
            RuleTable::builtin().rules().cloned().collect()
        } else {
            Vec::new()
        };

        RuleTable::with_rules(self.rules.iter().cloned().chain(builtin))
    }
}

impl Config {
    /// Load the config file if one exists, otherwise fall back to defaults.
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => {
                if !p.exists() {
                    return Err(FarmLogError::Config(format!(
                        "Config file not found at {:?}",
                        p
                    )));
                }
                p
            }
            None => match Self::find_config_path() {
                Some(p) => p,
                None => {
                    tracing::debug!("No config file found, using defaults");
                    return Ok(Self::default().with_env_overrides());
                }
            },
        };

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| FarmLogError::Config(format!("Failed to read config: {}", e)))?;

        let config = Self::parse(&config_str)?;
        tracing::debug!(path = %config_path.display(), "Loaded configuration");

        Ok(config.with_env_overrides())
    }

    pub fn parse(content: &str) -> Result<Self> {
        // Substitute environment variables
        let content = Self::substitute_env_vars(content);

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| FarmLogError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(path) = std::env::var("FARMLOG_DATA_FILE") {
            self.data.treatments_file = PathBuf::from(path);
        }
        self
    }

    /// Search for config.yaml in standard locations.
    fn find_config_path() -> Option<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        // Try XDG config directory
        dirs::config_dir()
            .map(|dir| dir.join("farmlog").join("config.yaml"))
            .filter(|p| p.exists())
    }

    /// Default path for writing new config files (~/.config/farmlog/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| FarmLogError::Config("Cannot determine config directory".into()))?
            .join("farmlog");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up FarmLog!");
        println!();

        let treatments_file: String = Input::new()
            .with_prompt("  Treatments JSON file")
            .default("data/treatments.json".into())
            .interact_text()
            .map_err(|e| FarmLogError::Config(format!("Input error: {}", e)))?;

        let max_distinct_types: usize = Input::new()
            .with_prompt("  Max distinct product types per tank mix")
            .default(DEFAULT_MAX_DISTINCT_TYPES)
            .interact_text()
            .map_err(|e| FarmLogError::Config(format!("Input error: {}", e)))?;

        let use_builtin_rules = Confirm::new()
            .with_prompt("  Use built-in compatibility rules?")
            .default(true)
            .interact()
            .map_err(|e| FarmLogError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            data: DataConfig {
                treatments_file: PathBuf::from(treatments_file),
            },
            compatibility: CompatibilityConfig {
                max_distinct_types,
                use_builtin_rules,
                rules: Vec::new(),
            },
        };

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)?;

        // Write with a header comment
        let content = format!(
            "# FarmLog Configuration\n# Generated by `farmlog init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .expect("static env var pattern is valid");

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }
}
