//! Ultralytics `data.yaml` summary.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::layout::OutputLayout;
use crate::split::Split;

/// Training config consumed by the detector.
///
/// Fields are declared in alphabetical order so the emitted document has
/// sorted keys.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataYaml {
    pub names: Vec<String>,
    pub nc: usize,
    pub test: PathBuf,
    pub train: PathBuf,
    pub val: PathBuf,
}

impl DataYaml {
    /// Build the summary with split image paths anchored at `base`.
    ///
    /// A relative output root is joined onto `base`; an absolute one is used
    /// unchanged.
    pub fn new(base: &Path, output: &OutputLayout, names: Vec<String>) -> Self {
        let images = |split| base.join(output.images_dir(split));
        Self {
            nc: names.len(),
            names,
            test: images(Split::Test),
            train: images(Split::Train),
            val: images(Split::Val),
        }
    }

    /// Build the summary relative to the process working directory.
    pub fn from_current_dir(output: &OutputLayout, names: Vec<String>) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(ConfigError::CurrentDir)?;
        Ok(Self::new(&cwd, output, names))
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(ConfigError::Serialize)
    }

    pub fn write(&self, path: &Path) -> Result<(), ConfigError> {
        let yaml = self.to_yaml_string()?;
        fs::write(path, yaml).map_err(ConfigError::Write)
    }
}
