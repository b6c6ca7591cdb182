use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Android screen density buckets for launcher icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Mdpi,
    Hdpi,
    Xhdpi,
    Xxhdpi,
    Xxxhdpi,
}

impl Density {
    pub const ALL: [Density; 5] = [
        Density::Mdpi,
        Density::Hdpi,
        Density::Xhdpi,
        Density::Xxhdpi,
        Density::Xxxhdpi,
    ];

    /// Icon side length in pixels.
    pub fn size(&self) -> u32 {
        match self {
            Density::Mdpi => 48,
            Density::Hdpi => 72,
            Density::Xhdpi => 96,
            Density::Xxhdpi => 144,
            Density::Xxxhdpi => 192,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Density::Mdpi => "mdpi",
            Density::Hdpi => "hdpi",
            Density::Xhdpi => "xhdpi",
            Density::Xxhdpi => "xxhdpi",
            Density::Xxxhdpi => "xxxhdpi",
        }
    }

    pub fn dir_name(&self) -> String {
        format!("mipmap-{}", self.name())
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug)]
#[error("unknown density {0:?}")]
pub struct ParseDensityError(String);

impl FromStr for Density {
    type Err = ParseDensityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Density::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseDensityError(s.to_owned()))
    }
}
