//! Batch Pipeline - Catalog In, Files Out
//!
//! Strictly sequential: one document assembled, written and rasterised at a
//! time, in catalog order, captioned variant first. Every run overwrites.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, CatalogError};
use crate::config::{BuildConfig, ConfigError};
use crate::raster::{detect_exporter, ExportOutcome, RasterCapability, RasterError, RasterExporter};
use crate::scene::{assemble, CaptionMode};
use crate::{CANVAS_SIZE, ENGINE_VERSION};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Raster export failed: {0}")]
    Raster(#[from] RasterError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PipelineError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetFormat {
    Svg,
    Png,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedAsset {
    pub file_name: String,
    #[serde(skip)]
    pub path: PathBuf,
    pub slug: String,
    pub caption: CaptionMode,
    pub format: AssetFormat,
    /// Edge length: canvas units for SVG, pixels for PNG.
    pub size: u32,
    pub sha256: String,
}

impl GeneratedAsset {
    pub fn new(
        path: &Path,
        slug: &str,
        caption: CaptionMode,
        format: AssetFormat,
        size: u32,
        bytes: &[u8],
    ) -> Self {
        Self {
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path: path.to_path_buf(),
            slug: slug.to_string(),
            caption,
            format,
            size,
            sha256: sha256_hex(bytes),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildReport {
    pub engine_version: String,
    pub catalog_hash: String,
    pub raster: RasterCapability,
    pub documents: Vec<GeneratedAsset>,
    pub bitmaps: Vec<GeneratedAsset>,
    pub cover_icons: Vec<GeneratedAsset>,
    /// Covers everything above; timestamps excluded.
    pub manifest_hash: String,
}

impl BuildReport {
    /// Hash of the report's canonical JSON, minus the `manifestHash` field.
    pub fn content_hash(&self) -> Result<String, serde_json::Error> {
        let mut value = serde_json::to_value(self)?;
        if let Some(fields) = value.as_object_mut() {
            fields.remove("manifestHash");
        }
        // serde_json's default map is ordered, so `to_value` already sorts keys.
        Ok(sha256_hex(serde_json::to_string(&value)?.as_bytes()))
    }

    fn sealed(mut self) -> Result<Self, serde_json::Error> {
        self.manifest_hash = self.content_hash()?;
        Ok(self)
    }
}

/// sha256(canonical catalog JSON + ":" + engine version)
pub fn catalog_hash(catalog: &Catalog, engine_version: &str) -> Result<String, serde_json::Error> {
    let canonical = serde_json::to_string(&serde_json::to_value(catalog)?)?;
    Ok(sha256_hex(format!("{}:{}", canonical, engine_version).as_bytes()))
}

fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// `manifest.json` as written next to the assets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub report: BuildReport,
}

/// The batch driver. Catalog, paths and rasteriser are all injected.
pub struct StickerPipeline {
    catalog: Catalog,
    config: BuildConfig,
    exporter: Box<dyn RasterExporter>,
}

impl StickerPipeline {
    pub fn new(catalog: Catalog, config: BuildConfig, exporter: Box<dyn RasterExporter>) -> Self {
        Self { catalog, config, exporter }
    }

    /// Pipeline with the best rasteriser this build supports.
    pub fn with_detected_exporter(catalog: Catalog, config: BuildConfig) -> Self {
        Self::new(catalog, config, detect_exporter())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn raster_capability(&self) -> RasterCapability {
        self.exporter.capability()
    }

    pub fn run(&self) -> Result<BuildReport, PipelineError> {
        self.config.validate()?;
        let out = &self.config.output_dir;
        fs::create_dir_all(out).map_err(|e| PipelineError::io(out, e))?;

        let raster = self.exporter.capability();
        if raster == RasterCapability::Unavailable {
            warn!("raster export unavailable, writing SVG documents only");
        }
        info!(stickers = self.catalog.len(), output = %out.display(), "generating sticker pack");

        let mut documents = vec![];
        let mut bitmaps = vec![];

        for spec in self.catalog.specs() {
            for mode in CaptionMode::ALL {
                let svg_path = self.config.document_path(&spec.slug, mode);
                let svg = assemble(spec, mode).to_svg();
                fs::write(&svg_path, &svg).map_err(|e| PipelineError::io(&svg_path, e))?;
                debug!(path = %svg_path.display(), "wrote document");
                documents.push(GeneratedAsset::new(
                    &svg_path,
                    &spec.slug,
                    mode,
                    AssetFormat::Svg,
                    CANVAS_SIZE,
                    svg.as_bytes(),
                ));

                let png_path = self.config.bitmap_path(&spec.slug, mode);
                if let Some(bitmap) = self.rasterise(&svg_path, &png_path, self.config.raster_size, &spec.slug, mode)? {
                    bitmaps.push(bitmap);
                }
            }
        }

        let cover_icons = self.export_cover_icons()?;

        let report = BuildReport {
            engine_version: ENGINE_VERSION.to_string(),
            catalog_hash: catalog_hash(&self.catalog, ENGINE_VERSION)?,
            raster,
            documents,
            bitmaps,
            cover_icons,
            manifest_hash: String::new(),
        }
        .sealed()?;

        if self.config.write_manifest {
            self.write_manifest(&report)?;
        }

        info!(
            documents = report.documents.len(),
            bitmaps = report.bitmaps.len(),
            cover_icons = report.cover_icons.len(),
            "sticker pack generated"
        );
        Ok(report)
    }

    /// Cover icons are re-rendered from the first sticker's captioned SVG.
    fn export_cover_icons(&self) -> Result<Vec<GeneratedAsset>, PipelineError> {
        let mut icons = vec![];
        if self.exporter.capability() == RasterCapability::Unavailable {
            return Ok(icons);
        }
        let Some(first) = self.catalog.first() else {
            return Ok(icons);
        };

        let source = self.config.document_path(&first.slug, CaptionMode::Captioned);
        for &size in &self.config.cover_sizes {
            let destination = self.config.cover_icon_path(size);
            if let Some(icon) = self.rasterise(&source, &destination, size, &first.slug, CaptionMode::Captioned)? {
                icons.push(icon);
            }
        }
        Ok(icons)
    }

    fn rasterise(
        &self,
        source: &Path,
        destination: &Path,
        size: u32,
        slug: &str,
        mode: CaptionMode,
    ) -> Result<Option<GeneratedAsset>, PipelineError> {
        match self.exporter.export(source, destination, size)? {
            ExportOutcome::Skipped => Ok(None),
            ExportOutcome::Written => {
                let bytes = fs::read(destination).map_err(|e| PipelineError::io(destination, e))?;
                debug!(path = %destination.display(), size, "wrote bitmap");
                Ok(Some(GeneratedAsset::new(destination, slug, mode, AssetFormat::Png, size, &bytes)))
            }
        }
    }

    fn write_manifest(&self, report: &BuildReport) -> Result<(), PipelineError> {
        let manifest = Manifest {
            generated_at: Utc::now(),
            report: report.clone(),
        };
        let path = self.config.manifest_path();
        let json = serde_json::to_string_pretty(&manifest)?;
        fs::write(&path, json).map_err(|e| PipelineError::io(&path, e))?;
        debug!(path = %path.display(), "wrote manifest");
        Ok(())
    }
}
