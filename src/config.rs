use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::colour::{IconColours, Rgb};
use crate::density::Density;

pub const DEFAULT_ICON_NAMES: [&str; 2] = ["ic_launcher", "ic_launcher_round"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),
}

/// Which icons to write and in what colours.
///
/// Every field carries `#[serde(default)]` so a file that only sets, say,
/// `background` still gets the remaining defaults instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconSetConfig {
    #[serde(default = "default_background")]
    pub background: Rgb,
    #[serde(default = "default_foreground")]
    pub foreground: Rgb,
    /// Paint the background colour in the centre and the foreground outside.
    #[serde(default)]
    pub swap_colours: bool,
    #[serde(default = "default_densities")]
    pub densities: Vec<Density>,
    #[serde(default = "default_names")]
    pub names: Vec<String>,
}

fn default_background() -> Rgb {
    Rgb::MATERIAL_BLUE
}

fn default_foreground() -> Rgb {
    Rgb::WHITE
}

fn default_densities() -> Vec<Density> {
    Density::ALL.to_vec()
}

fn default_names() -> Vec<String> {
    DEFAULT_ICON_NAMES.iter().map(|s| s.to_string()).collect()
}

impl Default for IconSetConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            foreground: default_foreground(),
            swap_colours: false,
            densities: default_densities(),
            names: default_names(),
        }
    }
}

impl IconSetConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn colours(&self) -> IconColours {
        let colours = IconColours::new(self.background, self.foreground);
        if self.swap_colours {
            colours.swapped()
        } else {
            colours
        }
    }
}
