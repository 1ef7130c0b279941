use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Name of the configuration file looked up in the registry root.
pub const CONFIG_FILE: &str = "address-registry.toml";

/// Configuration for locating the registry files.
///
/// Relative paths are interpreted against the registry root directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The address objects file (`ADDRESSOBJECTS` / `OBJECT`).
    pub addresses: PathBuf,

    /// The administrative hierarchy file (`ITEMS` / `ITEM`).
    pub hierarchy: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addresses: default_addresses(),
            hierarchy: default_hierarchy(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Loads `address-registry.toml` from `root`, falling back to the defaults.
    ///
    /// A missing file is not an error. A file that cannot be read or parsed is
    /// reported as a warning and the defaults are used.
    #[must_use]
    pub fn load_or_default(root: &Path) -> Self {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            tracing::debug!("no config file at {}, using defaults", path.display());
            return Self::default();
        }

        Self::load(&path).unwrap_or_else(|e| {
            tracing::warn!("{e}; using default configuration");
            Self::default()
        })
    }

    /// Returns the address objects path, resolved against `root`.
    #[must_use]
    pub fn addresses_path(&self, root: &Path) -> PathBuf {
        root.join(&self.addresses)
    }

    /// Returns the hierarchy path, resolved against `root`.
    #[must_use]
    pub fn hierarchy_path(&self, root: &Path) -> PathBuf {
        root.join(&self.hierarchy)
    }
}

fn default_addresses() -> PathBuf {
    PathBuf::from("data/AS_ADDR_OBJ.XML")
}

fn default_hierarchy() -> PathBuf {
    PathBuf::from("data/AS_ADM_HIERARCHY.XML")
}

/// The serialized versions of the configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_addresses")]
        addresses: PathBuf,

        #[serde(default = "default_hierarchy")]
        hierarchy: PathBuf,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                addresses,
                hierarchy,
            } => Self {
                addresses,
                hierarchy,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            addresses: config.addresses,
            hierarchy: config.hierarchy,
        }
    }
}
