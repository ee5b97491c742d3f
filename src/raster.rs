//! Raster Export
//!
//! Vector document -> square PNG with a transparent background. Whether
//! rasterising is possible is reported as an explicit capability, never
//! inferred by the caller from missing files.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse SVG {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid raster size: {0}")]
    InvalidSize(u32),

    #[error("Failed to encode PNG: {0}")]
    Encode(String),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RasterCapability {
    Available,
    Unavailable,
}

/// Result of one export call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    Written,
    Skipped,
}

pub trait RasterExporter {
    fn capability(&self) -> RasterCapability;

    /// Render `source` to a `size` x `size` PNG at `destination`.
    fn export(&self, source: &Path, destination: &Path, size: u32) -> Result<ExportOutcome, RasterError>;
}

/// Exporter used when no rasteriser is compiled in. Every call is a skip.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopExporter;

impl RasterExporter for NoopExporter {
    fn capability(&self) -> RasterCapability {
        RasterCapability::Unavailable
    }

    fn export(&self, _source: &Path, _destination: &Path, _size: u32) -> Result<ExportOutcome, RasterError> {
        Ok(ExportOutcome::Skipped)
    }
}

#[cfg(feature = "raster")]
pub use resvg_backend::ResvgExporter;

#[cfg(feature = "raster")]
mod resvg_backend {
    use super::{ExportOutcome, RasterCapability, RasterError, RasterExporter};
    use resvg::{tiny_skia, usvg};
    use std::fs;
    use std::path::Path;

    /// `resvg` rasteriser. System fonts are loaded once for captions.
    pub struct ResvgExporter {
        options: usvg::Options<'static>,
    }

    impl ResvgExporter {
        pub fn new() -> Self {
            let mut options = usvg::Options::default();
            options.fontdb_mut().load_system_fonts();
            Self { options }
        }
    }

    impl Default for ResvgExporter {
        fn default() -> Self {
            Self::new()
        }
    }

    impl RasterExporter for ResvgExporter {
        fn capability(&self) -> RasterCapability {
            RasterCapability::Available
        }

        fn export(&self, source: &Path, destination: &Path, size: u32) -> Result<ExportOutcome, RasterError> {
            let data = fs::read(source).map_err(|source_err| RasterError::Read {
                path: source.display().to_string(),
                source: source_err,
            })?;

            let tree = usvg::Tree::from_data(&data, &self.options).map_err(|e| RasterError::Parse {
                path: source.display().to_string(),
                message: e.to_string(),
            })?;

            // Pixmap starts fully transparent.
            let mut pixmap = tiny_skia::Pixmap::new(size, size).ok_or(RasterError::InvalidSize(size))?;
            let transform = tiny_skia::Transform::from_scale(
                size as f32 / tree.size().width(),
                size as f32 / tree.size().height(),
            );
            resvg::render(&tree, transform, &mut pixmap.as_mut());

            let png = pixmap.encode_png().map_err(|e| RasterError::Encode(e.to_string()))?;
            fs::write(destination, png).map_err(|source_err| RasterError::Write {
                path: destination.display().to_string(),
                source: source_err,
            })?;

            Ok(ExportOutcome::Written)
        }
    }
}

/// Best exporter this build supports.
pub fn detect_exporter() -> Box<dyn RasterExporter> {
    #[cfg(feature = "raster")]
    {
        Box::new(ResvgExporter::new())
    }
    #[cfg(not(feature = "raster"))]
    {
        Box::new(NoopExporter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_exporter_skips() {
        let dir = tempfile::tempdir().unwrap();
        let dst = dir.path().join("out.png");
        let outcome = NoopExporter.export(Path::new("missing.svg"), &dst, 512).unwrap();
        assert_eq!(outcome, ExportOutcome::Skipped);
        assert_eq!(NoopExporter.capability(), RasterCapability::Unavailable);
        assert!(!dst.exists());
    }

    #[cfg(feature = "raster")]
    #[test]
    fn test_resvg_renders_requested_size() {
        use crate::catalog::Catalog;
        use crate::scene::{assemble, CaptionMode};

        let dir = tempfile::tempdir().unwrap();
        let svg = dir.path().join("frank.svg");
        let png = dir.path().join("frank.png");
        let spec = Catalog::builtin().specs()[0].clone();
        std::fs::write(&svg, assemble(&spec, CaptionMode::Captioned).to_svg()).unwrap();

        let exporter = ResvgExporter::new();
        assert_eq!(exporter.capability(), RasterCapability::Available);
        assert_eq!(exporter.export(&svg, &png, 96).unwrap(), ExportOutcome::Written);

        let bytes = std::fs::read(&png).unwrap();
        let pixmap = resvg::tiny_skia::Pixmap::decode_png(&bytes).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (96, 96));
    }

    #[cfg(feature = "raster")]
    #[test]
    fn test_resvg_missing_source_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ResvgExporter::new()
            .export(&dir.path().join("nope.svg"), &dir.path().join("x.png"), 10)
            .unwrap_err();
        assert!(matches!(err, RasterError::Read { .. }));
    }
}
