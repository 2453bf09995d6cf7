use crate::core::calculator::summary::MAX_WINDOW_DAYS;
use crate::errors::{AppError, AppResult};
use chrono::format::{Item, StrftimeItems};
use crate::utils::path::expand_tilde_string;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_user")]
    pub default_user: i64,
    #[serde(default = "default_window_days")]
    pub summary_window_days: u32,
    #[serde(default = "default_include_open_shift")]
    pub include_open_shift: bool,
    #[serde(default = "default_time_format")]
    pub time_format: String,
    #[serde(default = "default_source")]
    pub source: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_user() -> i64 {
    1
}
fn default_window_days() -> u32 {
    7
}
fn default_include_open_shift() -> bool {
    true
}
fn default_time_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}
fn default_source() -> String {
    "cli".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            default_user: default_user(),
            summary_window_days: default_window_days(),
            include_open_shift: default_include_open_shift(),
            time_format: default_time_format(),
            source: default_source(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory (`~/.rattendance`)
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rattendance")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rattendance.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rattendance.sqlite")
    }

    /// Load configuration from the default file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_yaml(&content).map_err(|e| match e {
            AppError::Config(msg) => AppError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// Parse and validate a YAML document; `~` in `database` is expanded.
    pub fn from_yaml(content: &str) -> AppResult<Self> {
        let mut cfg: Config = serde_yaml::from_str(content)
            .map_err(|e| AppError::Config(format!("cannot parse: {}", e)))?;
        cfg.database = expand_tilde_string(&cfg.database);
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values that would only fail later, while formatting or summing.
    pub fn validate(&self) -> AppResult<()> {
        if !(1..=MAX_WINDOW_DAYS).contains(&self.summary_window_days) {
            return Err(AppError::Config(format!(
                "summary_window_days must be between 1 and {}, got {}",
                MAX_WINDOW_DAYS, self.summary_window_days
            )));
        }

        if StrftimeItems::new(&self.time_format).any(|item| matches!(item, Item::Error)) {
            return Err(AppError::Config(format!(
                "time_format '{}' is not a valid strftime format",
                self.time_format
            )));
        }

        Ok(())
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Initialize configuration and database files.
    /// In test mode the config file is left untouched.
    /// Returns the database path that was configured.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<String> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = match custom_db {
            Some(name) => {
                let p = PathBuf::from(expand_tilde_string(&name));
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            fs::write(Self::config_file(), config.to_yaml()?)?;
        }

        Ok(config.database)
    }
}
