use std::io::{self, Write};

use libflate::zlib::Encoder;
use log::{debug, info};
use thiserror::Error;

use crate::chunk::{Chunk, IDAT, IEND, IHDR};
use crate::colour::{ColourType, IconColours, Rgb};

pub const SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

const BIT_DEPTH: u8 = 8;
const COLOUR_TYPE: ColourType = ColourType::RGBAlpha;
const BYTES_PER_PIXEL: usize = 4;

#[derive(Error, Debug)]
pub enum EncodingError {
    #[error("icon size must be a positive 32-bit dimension, got {0}")]
    InvalidDimension(i64),
    #[error("failed to compress pixel data")]
    CompressionFailure(#[source] io::Error),
}

/// Encodes a `size` x `size` RGBA PNG: a `foreground` square centered on a
/// `background` field.
pub fn encode(size: i64, background: Rgb, foreground: Rgb) -> Result<Vec<u8>, EncodingError> {
    encode_icon(size, &IconColours::new(background, foreground))
}

pub fn encode_icon(size: i64, colours: &IconColours) -> Result<Vec<u8>, EncodingError> {
    let side = u32::try_from(size)
        .ok()
        .filter(|&s| s > 0)
        .ok_or(EncodingError::InvalidDimension(size))?;
    let buffer_len = pixel_buffer_len(side).ok_or(EncodingError::InvalidDimension(size))?;
    info!(
        "Encoding {side}x{side} icon ({} on {})",
        colours.foreground, colours.background
    );

    let ihdr = Chunk::new(IHDR, header_data(side));
    let pixels = pixel_buffer(side, buffer_len, colours);
    let compressed = compress_block(&pixels)?;
    debug!(
        "Compressed {} bytes of pixel data into {}",
        pixels.len(),
        compressed.len()
    );
    let idat = Chunk::new(IDAT, compressed);
    let iend = Chunk::new(IEND, Vec::new());

    let mut out = Vec::with_capacity(
        SIGNATURE.len() + ihdr.chunk_size() + idat.chunk_size() + iend.chunk_size(),
    );
    out.extend_from_slice(&SIGNATURE);
    ihdr.write_to(&mut out);
    idat.write_to(&mut out);
    iend.write_to(&mut out);

    debug!("Encoded icon is {} bytes", out.len());
    Ok(out)
}

fn header_data(side: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity(13);
    data.extend_from_slice(&side.to_be_bytes());
    data.extend_from_slice(&side.to_be_bytes());
    data.push(BIT_DEPTH);
    data.push(COLOUR_TYPE.get_code());
    data.push(0); // Type 0 compression
    data.push(0); // Type 0 filtering
    data.push(0); // No interlacing
    data
}

/// Bytes in the unfiltered scanlines, or `None` if that overflows `usize`.
fn pixel_buffer_len(side: u32) -> Option<usize> {
    let side = usize::try_from(side).ok()?;
    side.checked_mul(BYTES_PER_PIXEL)?
        .checked_add(1)?
        .checked_mul(side)
}

fn pixel_buffer(side: u32, len: usize, colours: &IconColours) -> Vec<u8> {
    let side = side as usize;
    let inner = side / 4..3 * side / 4;
    let fg = colours.foreground.opaque();
    let bg = colours.background.opaque();

    let mut buffer = Vec::with_capacity(len);
    for y in 0..side {
        buffer.push(0x00); // No filter
        for x in 0..side {
            if inner.contains(&x) && inner.contains(&y) {
                buffer.extend_from_slice(&fg);
            } else {
                buffer.extend_from_slice(&bg);
            }
        }
    }
    buffer
}

fn compress_block(data: &[u8]) -> Result<Vec<u8>, EncodingError> {
    let mut encoder = Encoder::new(Vec::new()).map_err(EncodingError::CompressionFailure)?;
    encoder
        .write_all(data)
        .map_err(EncodingError::CompressionFailure)?;
    encoder
        .finish()
        .into_result()
        .map_err(EncodingError::CompressionFailure)
}
