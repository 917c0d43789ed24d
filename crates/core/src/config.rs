//! Configuration types shared across crates.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Enable the /metrics endpoint for Prometheus scraping (default: true).
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,
    /// Maximum accepted request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_metrics_enabled() -> bool {
    true
}

fn default_max_body_bytes() -> usize {
    1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            metrics_enabled: default_metrics_enabled(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerConfig {
    /// Validate server configuration invariants.
    pub fn validate(&self) -> Result<(), String> {
        if self.bind.parse::<std::net::SocketAddr>().is_err() {
            return Err(format!("server.bind is not a socket address: {}", self.bind));
        }
        if self.max_body_bytes == 0 {
            return Err("server.max_body_bytes must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Metadata store configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MetadataConfig {
    /// SQLite database file.
    Sqlite {
        /// Database file path.
        path: PathBuf,
        /// Query timeout in seconds (advisory only - SQLite cannot force-cancel queries).
        #[serde(default = "default_sqlite_query_timeout_secs")]
        query_timeout_secs: Option<u64>,
    },
}

fn default_sqlite_query_timeout_secs() -> Option<u64> {
    Some(600)
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self::Sqlite {
            path: PathBuf::from("./data/catalog.db"),
            query_timeout_secs: default_sqlite_query_timeout_secs(),
        }
    }
}

impl MetadataConfig {
    /// Validate metadata configuration invariants.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            MetadataConfig::Sqlite { path, .. } => {
                if path.as_os_str().is_empty() {
                    return Err("sqlite config requires a non-empty 'path'".to_string());
                }
                Ok(())
            }
        }
    }
}

/// Category policy configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CategoryPolicyConfig {
    /// Longest accepted category name, in characters.
    #[serde(default = "default_category_max_name_len")]
    pub max_name_len: usize,
    /// Department names under which no category may be placed.
    #[serde(default = "default_reserved_departments")]
    pub reserved_departments: Vec<String>,
}

fn default_category_max_name_len() -> usize {
    20
}

fn default_reserved_departments() -> Vec<String> {
    vec!["Bakery".to_string()]
}

impl Default for CategoryPolicyConfig {
    fn default() -> Self {
        Self {
            max_name_len: default_category_max_name_len(),
            reserved_departments: default_reserved_departments(),
        }
    }
}

impl CategoryPolicyConfig {
    /// Validate category policy invariants.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_name_len == 0 {
            return Err("policy.category.max_name_len must be greater than zero".to_string());
        }
        if self.max_name_len > crate::NAME_MAX_LEN {
            return Err(format!(
                "policy.category.max_name_len ({}) exceeds the name column limit ({})",
                self.max_name_len,
                crate::NAME_MAX_LEN
            ));
        }
        Ok(())
    }
}

/// Business policy configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PolicyConfig {
    #[serde(default)]
    pub category: CategoryPolicyConfig,
}

/// Complete application configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Metadata store configuration.
    #[serde(default)]
    pub metadata: MetadataConfig,
    /// Business policy configuration.
    #[serde(default)]
    pub policy: PolicyConfig,
}

impl AppConfig {
    /// Create a test configuration with sensible defaults.
    ///
    /// **For testing only.** Binds an ephemeral port and keeps the SQLite
    /// default path; tests override `metadata` with a temporary file.
    pub fn for_testing() -> Self {
        Self {
            server: ServerConfig {
                bind: "127.0.0.1:0".to_string(),
                ..ServerConfig::default()
            },
            metadata: MetadataConfig::default(),
            policy: PolicyConfig::default(),
        }
    }

    /// Validate every section.
    pub fn validate(&self) -> crate::Result<()> {
        self.server.validate().map_err(crate::Error::Config)?;
        self.metadata.validate().map_err(crate::Error::Config)?;
        self.policy
            .category
            .validate()
            .map_err(crate::Error::Config)?;
        Ok(())
    }
}
