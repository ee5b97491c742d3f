//! Inline Embedding - Files as `data:` URIs

use base64::Engine;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A file read fully into memory and base64-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedFile {
    pub file_name: String,
    pub mime: &'static str,
    pub base64: String,
}

impl EmbeddedFile {
    pub fn read(path: &Path) -> Result<Self, EmbedError> {
        let data = fs::read(path).map_err(|source| EmbedError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self {
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            mime: mime_for(path),
            base64: base64::engine::general_purpose::STANDARD.encode(&data),
        })
    }

    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.base64)
    }
}

pub fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("svg") => "image/svg+xml",
        Some("zip") => "application/zip",
        Some("html") => "text/html",
        _ => "application/octet-stream",
    }
}

pub(crate) fn write_page(path: &Path, html: &str) -> Result<(), EmbedError> {
    fs::write(path, html).map_err(|source| EmbedError::Write {
        path: path.display().to_string(),
        source,
    })
}
