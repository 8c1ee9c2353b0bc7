// ⚙️ Loader Configuration - where the documents live and how strict to be
//
// Layered with figment (highest wins):
//   1. Environment: HOTEL_DATA_DIR → data_dir, HOTEL_DATA_PREFIX → prefix
//   2. JSON config file (optional)
//   3. Built-in defaults
//
// The data set lives in `<data_dir>/<prefix>/`. Prefixes are 3-10 lowercase
// ASCII letters.

use anyhow::{bail, Context, Result};
use figment::providers::{Env, Format, Json, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::documents::DirectorySource;
use crate::graph::HotelGraph;
use crate::loader::Loader;
use crate::validation::ValidationPolicy;

pub const DEFAULT_PREFIX: &str = "data";
pub const ENV_PREFIX: &str = "HOTEL_";
pub const ENV_DATA_DIR: &str = "HOTEL_DATA_DIR";
pub const ENV_DATA_PREFIX: &str = "HOTEL_DATA_PREFIX";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub data_dir: PathBuf,
    pub prefix: String,
    pub validation: ValidationPolicy,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig {
            data_dir: PathBuf::from("."),
            prefix: DEFAULT_PREFIX.to_string(),
            validation: ValidationPolicy::default(),
        }
    }
}

impl LoaderConfig {
    /// Build the provider chain: defaults, then the JSON file, then `HOTEL_*`
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = path {
            figment = figment.merge(Json::file(path));
        }

        figment.merge(
            Env::prefixed(ENV_PREFIX)
                .only(&["data_dir", "data_prefix"])
                .map(|key| {
                    if key.as_str() == "data_prefix" {
                        "prefix".into()
                    } else {
                        key.as_str().into()
                    }
                }),
        )
    }

    /// Optional config file, then environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            if !path.is_file() {
                bail!("Failed to read config file: {:?}", path);
            }
        }

        let config: LoaderConfig = Self::figment(path)
            .extract()
            .context("Failed to parse configuration")?;
        Ok(config)
    }

    /// Directory holding the three documents
    pub fn data_path(&self) -> PathBuf {
        self.data_dir.join(&self.prefix)
    }

    pub fn source(&self) -> Result<DirectorySource> {
        validate_prefix(&self.prefix)?;
        Ok(DirectorySource::new(self.data_path()))
    }

    pub fn loader(&self) -> Loader {
        Loader::with_policy(self.validation.clone())
    }

    /// Load the configured data set in one call
    pub fn load_graph(&self) -> Result<HotelGraph> {
        let source = self.source()?;
        let mut loader = self.loader();
        loader.load_from(&source)?;
        Ok(loader.into_graph()?)
    }
}

pub fn validate_prefix(prefix: &str) -> Result<()> {
    let valid = (3..=10).contains(&prefix.len()) && prefix.chars().all(|c| c.is_ascii_lowercase());
    if !valid {
        bail!("Data prefix '{}' is not valid (expected 3-10 lowercase letters)", prefix);
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
