//! Response body decoding per `Content-Encoding`.

use std::fmt;
use std::io::{self, Read};

/// Content codings understood by the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    Identity,
    Gzip,
    /// zlib-wrapped deflate, as sent by HTTP servers.
    Deflate,
    Brotli,
    Zstd,
}

impl ContentEncoding {
    /// Map a header value to a coding. Unknown values are `Identity`.
    pub fn from_header(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return Self::Identity;
        };
        match value.trim().to_ascii_lowercase().as_str() {
            "gzip" | "x-gzip" => Self::Gzip,
            "deflate" => Self::Deflate,
            "br" => Self::Brotli,
            "zstd" => Self::Zstd,
            _ => Self::Identity,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Gzip => "gzip",
            Self::Deflate => "deflate",
            Self::Brotli => "br",
            Self::Zstd => "zstd",
        }
    }

    /// Decode a complete body. `Identity` returns the input unchanged.
    pub fn decode(self, body: Vec<u8>) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        match self {
            Self::Identity => return Ok(body),
            Self::Gzip => {
                flate2::read::MultiGzDecoder::new(body.as_slice()).read_to_end(&mut out)?;
            }
            Self::Deflate => {
                flate2::read::ZlibDecoder::new(body.as_slice()).read_to_end(&mut out)?;
            }
            Self::Brotli => {
                brotli::Decompressor::new(body.as_slice(), 4096).read_to_end(&mut out)?;
            }
            Self::Zstd => {
                zstd::stream::Decoder::new(body.as_slice())?.read_to_end(&mut out)?;
            }
        }
        Ok(out)
    }
}

impl fmt::Display for ContentEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
