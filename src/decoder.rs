use std::io::{self, Read};

use libflate::zlib::Decoder;
use log::debug;
use thiserror::Error;

use crate::chunk::{Chunk, IDAT, IEND, IHDR};
use crate::colour::ColourType;
use crate::encoder::SIGNATURE;

#[derive(Error, Debug)]
pub enum DecodingError {
    #[error("not a PNG: signature mismatch")]
    BadSignature,
    #[error("input ends before the IEND chunk")]
    Truncated,
    #[error("{0} bytes follow the IEND chunk")]
    TrailingData(usize),
    #[error("CRC mismatch in {kind} chunk")]
    CrcMismatch { kind: String },
    #[error("first chunk must be IHDR")]
    MissingHeader,
    #[error("malformed IHDR chunk")]
    BadHeader,
    #[error("unsupported image: {0}")]
    Unsupported(String),
    #[error("failed to inflate pixel data")]
    Decompression(#[source] io::Error),
    #[error("pixel data is {actual} bytes, expected {expected}")]
    BadPixelData { expected: usize, actual: usize },
}

/// An icon read back from PNG bytes. Scanline filter bytes are stripped
/// from `rgba`.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub colour_type: ColourType,
    pub chunks: Vec<Chunk>,
    pub rgba: Vec<u8>,
}

impl DecodedImage {
    /// RGBA bytes at (`x`, `y`), or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.rgba.get(i..i + 4)?.try_into().ok()
    }
}

/// Decodes the 8-bit RGBA, unfiltered, non-interlaced PNGs the encoder
/// writes. Every chunk CRC is checked.
pub fn decode(bytes: &[u8]) -> Result<DecodedImage, DecodingError> {
    if bytes.get(..SIGNATURE.len()) != Some(&SIGNATURE[..]) {
        return Err(DecodingError::BadSignature);
    }

    let chunks = read_chunks(&bytes[SIGNATURE.len()..])?;

    let ihdr = chunks.first().ok_or(DecodingError::MissingHeader)?;
    if ihdr.kind != IHDR {
        return Err(DecodingError::MissingHeader);
    }
    let header = ihdr.data();
    if header.len() != 13 {
        return Err(DecodingError::BadHeader);
    }
    let width = u32::from_be_bytes([header[0], header[1], header[2], header[3]]);
    let height = u32::from_be_bytes([header[4], header[5], header[6], header[7]]);
    let bit_depth = header[8];
    let colour_type = ColourType::from_code(header[9]).ok_or(DecodingError::BadHeader)?;
    if width == 0 || height == 0 || !colour_type.valid_bit_depth(bit_depth) {
        return Err(DecodingError::BadHeader);
    }
    if colour_type != ColourType::RGBAlpha || bit_depth != 8 {
        return Err(DecodingError::Unsupported(format!(
            "colour type {} at bit depth {}",
            colour_type.get_code(),
            bit_depth
        )));
    }
    if header[10..] != [0, 0, 0] {
        return Err(DecodingError::Unsupported(
            "non-default compression, filter or interlace method".to_owned(),
        ));
    }
    debug!("IHDR: {width}x{height}");

    // Scanline length and total inflated size; a forged header can claim
    // dimensions whose byte count does not fit in usize.
    let row_len = (width as usize)
        .checked_mul(4)
        .and_then(|n| n.checked_add(1))
        .ok_or(DecodingError::BadHeader)?;
    let expected = row_len
        .checked_mul(height as usize)
        .ok_or(DecodingError::BadHeader)?;

    let compressed: Vec<u8> = chunks
        .iter()
        .filter(|c| c.kind == IDAT)
        .flat_map(|c| c.data().iter().copied())
        .collect();
    let inflated = inflate(&compressed)?;

    if inflated.len() != expected {
        return Err(DecodingError::BadPixelData {
            expected,
            actual: inflated.len(),
        });
    }

    let mut rgba = Vec::with_capacity(expected - height as usize);
    for row in inflated.chunks(row_len) {
        if row[0] != 0 {
            return Err(DecodingError::Unsupported(format!(
                "scanline filter type {}",
                row[0]
            )));
        }
        rgba.extend_from_slice(&row[1..]);
    }

    Ok(DecodedImage {
        width,
        height,
        bit_depth,
        colour_type,
        chunks,
        rgba,
    })
}

/// Walks chunks up to and including IEND, verifying each CRC.
pub fn read_chunks(mut bytes: &[u8]) -> Result<Vec<Chunk>, DecodingError> {
    let mut chunks = Vec::new();
    loop {
        if bytes.is_empty() {
            return Err(DecodingError::Truncated);
        }
        let (chunk, consumed) = Chunk::parse(bytes)?;
        bytes = &bytes[consumed..];
        if !chunk.check_crc() {
            return Err(DecodingError::CrcMismatch {
                kind: chunk.kind_str(),
            });
        }
        let is_end = chunk.kind == IEND;
        chunks.push(chunk);
        if is_end {
            break;
        }
    }
    if !bytes.is_empty() {
        return Err(DecodingError::TrailingData(bytes.len()));
    }
    Ok(chunks)
}

fn inflate(data: &[u8]) -> Result<Vec<u8>, DecodingError> {
    let mut decoder = Decoder::new(data).map_err(DecodingError::Decompression)?;
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(DecodingError::Decompression)?;
    Ok(out)
}
