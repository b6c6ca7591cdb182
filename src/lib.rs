pub mod chunk;
pub mod colour;
pub mod config;
pub mod decoder;
pub mod density;
pub mod encoder;
pub mod writer;

use std::io::Write;

use log::LevelFilter;

pub use crate::chunk::Chunk;
pub use crate::colour::{ColourType, IconColours, Rgb};
pub use crate::config::{ConfigError, IconSetConfig};
pub use crate::decoder::{decode, DecodedImage, DecodingError};
pub use crate::density::Density;
pub use crate::encoder::{encode, encode_icon, EncodingError, SIGNATURE};
pub use crate::writer::{write_icon_set, WriteError};

/// Logs to stderr at `info` unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
