use crate::errors::{AppError, AppResult};
use chrono::{FixedOffset, NaiveTime};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// One attendance category and its (optional) role gate.
///
/// A category with an empty `required_roles` list is open to every
/// member; a non-empty list is satisfied by holding ANY listed role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRule {
    pub name: String,
    #[serde(default)]
    pub required_roles: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    /// Organizational timezone as a fixed UTC offset, e.g. "+09:00".
    /// Every cycle date and elapsed-seconds computation uses this offset,
    /// never the server-local timezone.
    #[serde(default = "default_utc_offset")]
    pub utc_offset: String,
    /// Scheduled start of every category, org-local wall clock (HH:MM).
    #[serde(default = "default_start_time")]
    pub start_time: String,
    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryRule>,
}

fn default_utc_offset() -> String {
    "+09:00".to_string()
}

fn default_start_time() -> String {
    "10:00".to_string()
}

fn default_categories() -> Vec<CategoryRule> {
    vec![
        CategoryRule {
            name: "general".to_string(),
            required_roles: Vec::new(),
        },
        CategoryRule {
            name: "officers".to_string(),
            required_roles: vec![
                "leader".to_string(),
                "assistant_leader".to_string(),
                "secretary".to_string(),
                "treasurer".to_string(),
            ],
        },
    ]
}

impl Default for Config {
    fn default() -> Self {
        let db_path = Self::database_file();
        Self {
            database: db_path.to_string_lossy().to_string(),
            utc_offset: default_utc_offset(),
            start_time: default_start_time(),
            categories: default_categories(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rollcall")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rollcall")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rollcall.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rollcall.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    /// A malformed file falls back to defaults with a warning rather
    /// than aborting: the `--db` override still has to work.
    pub fn load() -> Self {
        let path = Self::config_file();

        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
                    crate::ui::messages::warning(format!(
                        "Could not parse {} ({}), using defaults.",
                        path.display(),
                        e
                    ));
                    Config::default()
                }),
                Err(_) => Config::default(),
            }
        } else {
            Config::default()
        }
    }

    /// Parsed organizational UTC offset.
    pub fn org_offset(&self) -> AppResult<FixedOffset> {
        crate::utils::time::parse_utc_offset(&self.utc_offset)
            .ok_or_else(|| AppError::InvalidOffset(self.utc_offset.clone()))
    }

    /// Parsed scheduled start time-of-day.
    pub fn scheduled_start(&self) -> AppResult<NaiveTime> {
        crate::utils::time::parse_time(&self.start_time)
            .ok_or_else(|| AppError::InvalidTime(self.start_time.clone()))
    }

    pub fn category(&self, name: &str) -> Option<&CategoryRule> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> io::Result<()> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = std::path::Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            dir.join("rollcall.sqlite")
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| io::Error::other(format!("serialize config: {}", e)))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_gated_officers_category() {
        let cfg = Config::default();
        let officers = cfg.category("officers").unwrap();
        assert!(!officers.required_roles.is_empty());
        let general = cfg.category("general").unwrap();
        assert!(general.required_roles.is_empty());
    }

    #[test]
    fn default_offset_and_start_parse() {
        let cfg = Config::default();
        assert_eq!(cfg.org_offset().unwrap().local_minus_utc(), 9 * 3600);
        assert_eq!(
            cfg.scheduled_start().unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap()
        );
    }

    #[test]
    fn yaml_without_optional_fields_still_loads() {
        let cfg: Config = serde_yaml::from_str("database: /tmp/x.sqlite\n").unwrap();
        assert_eq!(cfg.utc_offset, "+09:00");
        assert_eq!(cfg.start_time, "10:00");
        assert_eq!(cfg.categories.len(), 2);
    }
}
