//! Reading the violations table from a local file or an HTTP URL.

use std::io::Read;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use tracing::debug;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Downloads `url` with a blocking client, failing on non-success status.
pub fn fetch_bytes(url: &str) -> Result<Vec<u8>> {
    let resp = reqwest::blocking::get(url)
        .with_context(|| format!("request to {url} failed"))?
        .error_for_status()?;
    Ok(resp.bytes()?.to_vec())
}

/// Loads source bytes from a path or an `http(s)://` URL.
///
/// Gzip-compressed content is decompressed transparently.
#[tracing::instrument]
pub fn read_source(source: &str) -> Result<Vec<u8>> {
    let raw = if source.starts_with("http://") || source.starts_with("https://") {
        fetch_bytes(source)?
    } else {
        std::fs::read(source).with_context(|| format!("failed to read {source}"))?
    };

    debug!(bytes = raw.len(), "Source loaded");

    if raw.starts_with(&GZIP_MAGIC) {
        let mut decoded = Vec::new();
        MultiGzDecoder::new(raw.as_slice())
            .read_to_end(&mut decoded)
            .with_context(|| format!("failed to decompress {source}"))?;
        debug!(bytes = decoded.len(), "Source decompressed");
        Ok(decoded)
    } else {
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::env;
    use std::fs;
    use std::io::Write;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    #[test]
    fn test_read_plain_file() {
        let path = temp_path("violations_summary_test_plain.csv");
        fs::write(&path, b"State\nNY\n").unwrap();

        let bytes = read_source(&path).unwrap();
        assert_eq!(bytes, b"State\nNY\n");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_read_gzip_file() {
        let path = temp_path("violations_summary_test_gzip.csv.gz");
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"State\nNJ\n").unwrap();
        fs::write(&path, encoder.finish().unwrap()).unwrap();

        let bytes = read_source(&path).unwrap();
        assert_eq!(bytes, b"State\nNJ\n");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_is_error() {
        let path = temp_path("violations_summary_test_does_not_exist.csv");
        let err = read_source(&path).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
