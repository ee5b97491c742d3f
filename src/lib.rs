//! Frank Stickers - Procedural Sticker Pack
//!
//! # Layers
//! 1. Primitives draw shapes
//! 2. Character and accessories compose primitives
//! 3. Scenes compose a character with triggered accessories
//! 4. The pipeline writes scenes to disk and rasterises them
//! 5. Gallery and download pages embed the results

pub mod primitives;
pub mod character;
pub mod accessories;
pub mod catalog;
pub mod validation;
pub mod scene;
pub mod raster;
pub mod config;
pub mod pipeline;
pub mod embed;
pub mod gallery;
pub mod downloads;

pub use accessories::{Accessory, AccessoryKind};
pub use catalog::{Catalog, CatalogError, StickerSpec};
pub use character::{HeadTransform, Pose};
pub use config::{BuildConfig, DownloadConfig, GalleryConfig, ProjectConfig};
pub use primitives::Fragment;
pub use raster::{detect_exporter, ExportOutcome, NoopExporter, RasterCapability, RasterError, RasterExporter};
pub use scene::{assemble, CaptionMode, Document, LayerKind};
pub use validation::{ValidationResult, ValidationRule, ValidationViolation, ViolationSeverity};
pub use pipeline::{BuildReport, GeneratedAsset, PipelineError, StickerPipeline};
pub use embed::EmbedError;

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Square canvas edge in logical units.
pub const CANVAS_SIZE: u32 = 512;

/// Margin from the canvas edge for the caption baseline.
pub const PADDING: u32 = CANVAS_SIZE * 6 / 100;
