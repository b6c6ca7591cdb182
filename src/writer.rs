use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

use crate::config::IconSetConfig;
use crate::encoder::{encode_icon, EncodingError};

#[derive(Error, Debug)]
pub enum WriteError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error("failed to write {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Writes `res/mipmap-<density>/<name>.png` under `out_dir` for every
/// configured density and name. Returns the written paths.
pub fn write_icon_set(config: &IconSetConfig, out_dir: &Path) -> Result<Vec<PathBuf>, WriteError> {
    let colours = config.colours();
    let mut written = Vec::with_capacity(config.densities.len() * config.names.len());

    for density in &config.densities {
        // All names within one density share the same bytes.
        let png = encode_icon(density.size().into(), &colours)?;
        let dir = out_dir.join("res").join(density.dir_name());
        fs::create_dir_all(&dir).map_err(|source| WriteError::Io {
            path: dir.clone(),
            source,
        })?;

        for name in &config.names {
            let path = dir.join(format!("{name}.png"));
            fs::write(&path, &png).map_err(|source| WriteError::Io {
                path: path.clone(),
                source,
            })?;
            info!("Created {} ({}x{})", path.display(), density.size(), density.size());
            written.push(path);
        }
    }

    Ok(written)
}
