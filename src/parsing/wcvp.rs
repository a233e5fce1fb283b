//! Reader for the WCVP checklist.
//!
//! The checklist is a pipe-delimited text file with one header line. It is
//! read as plain text, gzip or xz; compression is detected from the file's
//! magic bytes, not its extension. Other compressed formats are rejected.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use flate2::bufread::MultiGzDecoder;
use thiserror::Error;
use tracing::debug;
use xz2::bufread::XzDecoder;

use crate::catalog::builder::{BuildOptions, IndexBuilder};
use crate::catalog::index::SynonymyIndex;
use crate::parsing::tsv::lossy_lines;

/// First two bytes of every gzip member
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// First six bytes of every xz stream
const XZ_MAGIC: [u8; 6] = [0xfd, 0x37, 0x7a, 0x58, 0x5a, 0x00];

/// Compressed formats recognized but not decoded
const UNSUPPORTED_MAGIC: [(&str, &[u8]); 3] = [
    ("bzip2", b"BZh"),
    ("zstd", &[0x28, 0xb5, 0x2f, 0xfd]),
    ("zip", b"PK\x03\x04"),
];

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read {path}: {source}")]
    File { path: String, source: io::Error },

    #[error("{path} is {format} compressed; decompress it or recompress with gzip or xz")]
    UnsupportedCompression { path: String, format: &'static str },
}

/// Open a reference file, transparently decompressing gzip and xz
///
/// # Errors
///
/// Returns `ParseError::File` if the file cannot be opened or its first
/// bytes cannot be read, and `ParseError::UnsupportedCompression` for
/// compressed formats other than gzip and xz.
pub fn open_reference(path: &Path) -> Result<Box<dyn BufRead>, ParseError> {
    let file_error = |source| ParseError::File {
        path: path.display().to_string(),
        source,
    };

    let mut reader = File::open(path).map(BufReader::new).map_err(file_error)?;
    let head = reader.fill_buf().map_err(file_error)?;

    if head.starts_with(&GZIP_MAGIC) {
        debug!("{} is gzip compressed", path.display());
        return Ok(Box::new(BufReader::new(MultiGzDecoder::new(reader))));
    }
    if head.starts_with(&XZ_MAGIC) {
        debug!("{} is xz compressed", path.display());
        return Ok(Box::new(BufReader::new(XzDecoder::new_multi_decoder(reader))));
    }
    if let Some(&(format, _)) = UNSUPPORTED_MAGIC
        .iter()
        .find(|(_, magic)| head.starts_with(magic))
    {
        return Err(ParseError::UnsupportedCompression {
            path: path.display().to_string(),
            format,
        });
    }
    Ok(Box::new(reader))
}

/// Build a synonymy index from a reference file
///
/// # Errors
///
/// Returns `ParseError` if the file cannot be opened or read. Malformed rows
/// are skipped, not reported as errors.
pub fn build_index_from_file(
    path: &Path,
    options: BuildOptions,
) -> Result<SynonymyIndex, ParseError> {
    let reader = open_reference(path)?;
    build_index_from_reader(reader, options)
}

/// Build a synonymy index from checklist text, skipping the header line
///
/// # Errors
///
/// Returns `ParseError::Io` if reading fails or gzip data is corrupt.
pub fn build_index_from_reader<R: BufRead>(
    reader: R,
    options: BuildOptions,
) -> Result<SynonymyIndex, ParseError> {
    let mut builder = IndexBuilder::new(options);
    for line in lossy_lines(reader).skip(1) {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        builder.add_line(&line);
    }
    Ok(builder.finish())
}

/// Build a synonymy index from checklist text held in memory
#[must_use]
pub fn build_index_from_text(text: &str, options: BuildOptions) -> SynonymyIndex {
    let mut builder = IndexBuilder::new(options);
    for line in text.lines().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        builder.add_line(line);
    }
    builder.finish()
}
