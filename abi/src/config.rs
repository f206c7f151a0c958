use std::fs;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub db: DbConfig,
    #[serde(default)]
    pub console: ConsoleConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
    pub user: String,
    #[serde(default)]
    pub password: String,
    pub dbname: String,
    #[serde(default = "default_pool_size")]
    pub max_connections: u32,
}

/// Knobs for the menu handlers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// hotels farther than this from the given place are not listed
    #[serde(default = "default_distance_threshold")]
    pub distance_threshold: f64,
    /// how many rows the "recent" views show
    #[serde(default = "default_history_limit")]
    pub history_limit: i64,
}

fn default_host() -> String {
    "localhost".to_string()
}

// the console only ever runs one statement at a time
fn default_pool_size() -> u32 {
    1
}

fn default_distance_threshold() -> f64 {
    30.0
}

fn default_history_limit() -> i64 {
    5
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            distance_threshold: default_distance_threshold(),
            history_limit: default_history_limit(),
        }
    }
}

impl Config {
    pub fn load(filename: &str) -> Result<Self> {
        let config = fs::read_to_string(filename)
            .with_context(|| format!("failed to read config file {}", filename))?;
        serde_yaml::from_str(&config)
            .with_context(|| format!("failed to parse config file {}", filename))
    }

    /// Config for the `<dbname> <port> <user>` invocation: local server, empty password.
    pub fn from_args(dbname: impl Into<String>, port: u16, user: impl Into<String>) -> Self {
        Self {
            db: DbConfig {
                host: default_host(),
                port,
                user: user.into(),
                password: String::new(),
                dbname: dbname.into(),
                max_connections: default_pool_size(),
            },
            console: ConsoleConfig::default(),
        }
    }
}

impl DbConfig {
    pub fn to_url(&self) -> String {
        format!("{}/{}", self.server_url(), self.dbname)
    }

    pub fn server_url(&self) -> String {
        if self.password.is_empty() {
            format!("postgres://{}@{}:{}", self.user, self.host, self.port)
        } else {
            format!(
                "postgres://{}:{}@{}:{}",
                self.user, self.password, self.host, self.port
            )
        }
    }

    /// Same as `to_url` with the password masked, for printing.
    pub fn redacted_url(&self) -> String {
        if self.password.is_empty() {
            self.to_url()
        } else {
            format!(
                "postgres://{}:***@{}:{}/{}",
                self.user, self.host, self.port, self.dbname
            )
        }
    }
}
