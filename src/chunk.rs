use std::fmt::{self, Debug};

use crate::decoder::DecodingError;

pub const IHDR: [u8; 4] = *b"IHDR";
pub const IDAT: [u8; 4] = *b"IDAT";
pub const IEND: [u8; 4] = *b"IEND";

/// Length, tag and CRC: the bytes a chunk adds around its data.
pub const CHUNK_OVERHEAD: usize = 12;

#[derive(Clone, PartialEq, Eq)]
pub struct Data {
    pub data: Vec<u8>,
}

impl Debug for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self
            .data
            .chunks(16)
            .map(|row| {
                format!(
                    "\t{}",
                    row.iter()
                        .map(|x| format!("0x{:02X}", x))
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
            .collect::<Vec<_>>()
            .join(",\n");
        write!(f, "[\n{}\n]", rows)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Chunk {
    pub size: u32,
    pub kind: [u8; 4],
    pub data: Data,
    pub crc: u32,
}

impl Debug for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Chunk {{
    Size:\t {}
    Kind:\t\"{}\"
    Data:\t{}
    CRC:\t{:08X}
}}",
            self.size,
            self.kind_str(),
            format!("{:?}", self.data).replace('\n', "\n\t\t"),
            self.crc
        )
    }
}

impl Chunk {
    pub fn crc(kind: &[u8; 4], data: &[u8]) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(kind);
        hasher.update(data);
        hasher.finalize()
    }

    pub fn new(kind: [u8; 4], data: Vec<u8>) -> Chunk {
        Chunk {
            size: data.len() as u32,
            crc: Chunk::crc(&kind, &data),
            kind,
            data: Data { data },
        }
    }

    pub fn check_crc(&self) -> bool {
        Chunk::crc(&self.kind, self.data()) == self.crc
    }

    pub fn data(&self) -> &[u8] {
        &self.data.data
    }

    pub fn kind_str(&self) -> String {
        self.kind.iter().map(|&b| b as char).collect()
    }

    /// Total encoded length including length, tag and CRC fields.
    pub fn chunk_size(&self) -> usize {
        self.size as usize + CHUNK_OVERHEAD
    }

    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.reserve(self.chunk_size());
        out.extend_from_slice(&self.size.to_be_bytes());
        out.extend_from_slice(&self.kind);
        out.extend_from_slice(self.data());
        out.extend_from_slice(&self.crc.to_be_bytes());
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut res = Vec::with_capacity(self.chunk_size());
        self.write_to(&mut res);
        res
    }

    /// Reads one chunk from the front of `bytes`, returning it with the
    /// number of bytes consumed. The CRC is read but not verified.
    pub fn parse(bytes: &[u8]) -> Result<(Chunk, usize), DecodingError> {
        let size = bytes_to_u32(take_bytes(bytes, 0, 4)?);
        let kind: [u8; 4] = take_bytes(bytes, 4, 4)?
            .try_into()
            .map_err(|_| DecodingError::Truncated)?;
        let data = take_bytes(bytes, 8, size as usize)?.to_vec();
        let crc = bytes_to_u32(take_bytes(bytes, 8 + size as usize, 4)?);

        let chunk = Chunk {
            size,
            kind,
            data: Data { data },
            crc,
        };
        let consumed = chunk.chunk_size();
        Ok((chunk, consumed))
    }
}

fn bytes_to_u32(bytes: &[u8]) -> u32 {
    bytes.iter().fold(0, |acc, &x| (acc << 8) | x as u32)
}

fn take_bytes(buffer: &[u8], start: usize, count: usize) -> Result<&[u8], DecodingError> {
    let end = start.checked_add(count).ok_or(DecodingError::Truncated)?;
    buffer.get(start..end).ok_or(DecodingError::Truncated)
}
