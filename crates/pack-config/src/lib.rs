#![cfg_attr(test, allow(unused_crate_dependencies))]

pub mod cors;

use std::{fs, net::SocketAddr, path::Path, time::Duration};

pub use cors::*;
use pack_sizing::{PackSize, DEFAULT_PACK_SIZES};

/// Errors raised while loading the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML or does not match the expected shape
    #[error("parsing configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// The values parse but cannot be used
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Configuration struct to define settings for the pack sizer service.
pub struct Config {
    /// Server bind settings
    pub network: NetworkConfig,
    /// Where the pack API is mounted
    pub api: ApiConfig,
    /// Pack sizes the registry starts with
    pub pack_sizes: PackSizesConfig,
    /// Limits applied before requests reach the optimizer
    pub limits: LimitsConfig,
    /// Health endpoint settings
    pub health: HealthConfig,
    /// Cross-origin resource sharing settings
    pub cors: Option<CorsConfig>,
}

impl Config {
    /// Reads and validates the configuration at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml(&contents)
    }

    /// Parses and validates a configuration document.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.pack_sizes.defaults.is_empty() {
            return Err(ConfigError::Invalid(
                "pack_sizes.defaults must contain at least one pack size".to_string(),
            ));
        }

        if self.limits.max_order_quantity == 0 {
            return Err(ConfigError::Invalid(
                "limits.max_order_quantity must be a positive integer".to_string(),
            ));
        }

        if self.limits.max_pack_size == 0 {
            return Err(ConfigError::Invalid(
                "limits.max_pack_size must be a positive integer".to_string(),
            ));
        }

        if let Some(size) = self
            .pack_sizes
            .defaults
            .iter()
            .find(|size| size.get() > self.limits.max_pack_size)
        {
            return Err(ConfigError::Invalid(format!(
                "pack size {size} in pack_sizes.defaults exceeds limits.max_pack_size ({})",
                self.limits.max_pack_size
            )));
        }

        if let Some(ref cors) = self.cors {
            let wildcard = matches!(cors.allow_origins, Some(AnyOrUrlArray::Any))
                || matches!(cors.allow_methods, Some(AnyOrHttpMethodArray::Any))
                || matches!(cors.allow_headers, Some(AnyOrStringArray::Any));

            if cors.allow_credentials && wildcard {
                return Err(ConfigError::Invalid(
                    "cors.allow_credentials cannot be combined with \"any\" origins, methods or headers".to_string(),
                ));
            }
        }

        Ok(())
    }
}

#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkConfig {
    pub listen_address: Option<SocketAddr>,
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Route prefix for the pack endpoints. Default: `/api`.
    pub path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            path: "/api".to_string(),
        }
    }
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackSizesConfig {
    /// Initial pack sizes. Every value must be a positive integer; duplicates collapse.
    pub defaults: Vec<PackSize>,
}

impl Default for PackSizesConfig {
    fn default() -> Self {
        Self {
            defaults: DEFAULT_PACK_SIZES.into_iter().filter_map(PackSize::new).collect(),
        }
    }
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    /// Largest order quantity accepted by the calculate endpoint.
    pub max_order_quantity: u64,
    /// Largest pack size the registry accepts. Together with `max_order_quantity`
    /// it bounds the memory one calculation may use.
    pub max_pack_size: u64,
    /// Time allowed for a single request before it is answered with a timeout.
    #[serde(deserialize_with = "duration_str::deserialize_duration")]
    pub request_timeout: Duration,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_order_quantity: 1_000_000,
            max_pack_size: 1_000_000,
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HealthConfig {
    pub enabled: bool,
    pub path: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/health".to_string(),
        }
    }
}
