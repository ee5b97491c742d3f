//! Configuration - Explicit Values, No Process Globals
//!
//! Defaults reproduce the pack's standard layout. A JSON file may override
//! any subset; missing fields keep their defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::scene::CaptionMode;
use crate::CANVAS_SIZE;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    #[serde(default)]
    pub build: BuildConfig,
    #[serde(default)]
    pub gallery: GalleryConfig,
    #[serde(default)]
    pub downloads: DownloadConfig,
    /// Optional catalog file replacing the built-in pack.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
}

impl ProjectConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content)?;
        config.build.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_raster_size")]
    pub raster_size: u32,
    #[serde(default = "default_cover_sizes")]
    pub cover_sizes: Vec<u32>,
    #[serde(default = "default_true")]
    pub write_manifest: bool,
}

fn default_output_dir() -> PathBuf { PathBuf::from("output") }
fn default_raster_size() -> u32 { CANVAS_SIZE }
fn default_cover_sizes() -> Vec<u32> { vec![100, 96] }
fn default_true() -> bool { true }

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            raster_size: default_raster_size(),
            cover_sizes: default_cover_sizes(),
            write_manifest: true,
        }
    }
}

impl BuildConfig {
    /// Every bitmap edge must be at least one pixel.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.raster_size == 0 {
            return Err(ConfigError::Invalid("rasterSize must be greater than 0".to_string()));
        }
        if self.cover_sizes.contains(&0) {
            return Err(ConfigError::Invalid("coverSizes entries must be greater than 0".to_string()));
        }
        Ok(())
    }

    pub fn file_stem(slug: &str, mode: CaptionMode) -> String {
        format!("frank_{}{}", slug, mode.suffix())
    }

    pub fn document_path(&self, slug: &str, mode: CaptionMode) -> PathBuf {
        self.output_dir.join(format!("{}.svg", Self::file_stem(slug, mode)))
    }

    pub fn bitmap_path(&self, slug: &str, mode: CaptionMode) -> PathBuf {
        self.output_dir.join(format!("{}.png", Self::file_stem(slug, mode)))
    }

    pub fn cover_icon_path(&self, size: u32) -> PathBuf {
        self.output_dir.join(format!("cover_icon_{}.png", size))
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.output_dir.join("manifest.json")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryConfig {
    #[serde(default = "default_gallery_source")]
    pub source_dir: PathBuf,
    #[serde(default = "default_gallery_destination")]
    pub destination: PathBuf,
    /// File name -> card caption.
    #[serde(default = "default_titles")]
    pub titles: BTreeMap<String, String>,
}

fn default_gallery_source() -> PathBuf { PathBuf::from("output_12") }
fn default_gallery_destination() -> PathBuf { PathBuf::from("gallery_embedded.html") }
fn default_titles() -> BTreeMap<String, String> {
    [
        ("frank_01_hi.png", "01 — гав\u{2011}привет"),
        ("frank_02_stop.png", "02 — Остань, кожаная"),
        ("frank_03_hug.png", "03 — Хочу обнимашки"),
        ("frank_04_food.png", "04 — Сыпь корм и уходи"),
        ("frank_05_sleep.png", "05 — Работа идёт, работник спит"),
        ("frank_06_reflect.png", "06 — Сияю как зарплата"),
        ("frank_07_snow.png", "07 — Зима — норм"),
        ("frank_08_rope.png", "08 — За канат — до конца!"),
        ("frank_09_taxi.png", "09 — Уже подъезжаю"),
        ("frank_10_kiss.png", "10 — Чмок\u{2011}чмок!"),
        ("frank_11_yawn.png", "11 — Трудно быть лапочкой"),
        ("frank_12_business.png", "12 — Связи решают"),
    ]
    .into_iter()
    .map(|(file, title)| (file.to_string(), title.to_string()))
    .collect()
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            source_dir: default_gallery_source(),
            destination: default_gallery_destination(),
            titles: default_titles(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadLink {
    pub path: PathBuf,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadConfig {
    #[serde(default = "default_links")]
    pub links: Vec<DownloadLink>,
    #[serde(default = "default_download_destination")]
    pub destination: PathBuf,
}

fn default_links() -> Vec<DownloadLink> {
    vec![
        DownloadLink {
            path: PathBuf::from("frank_pack_12.zip"),
            label: "12 PNG с подписями".to_string(),
        },
        DownloadLink {
            path: PathBuf::from("../frank_all_assets.zip"),
            label: "Все материалы: PNG, SVG, без текста, галереи".to_string(),
        },
    ]
}

fn default_download_destination() -> PathBuf { PathBuf::from("download_links.html") }

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            links: default_links(),
            destination: default_download_destination(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names_follow_pack_convention() {
        let config = BuildConfig::default();
        assert_eq!(
            config.document_path("01_hi", CaptionMode::Plain),
            PathBuf::from("output/frank_01_hi_nt.svg")
        );
        assert_eq!(
            config.bitmap_path("01_hi", CaptionMode::Captioned),
            PathBuf::from("output/frank_01_hi.png")
        );
        assert_eq!(config.cover_icon_path(96), PathBuf::from("output/cover_icon_96.png"));
    }

    #[test]
    fn test_default_titles_cover_builtin_pack() {
        let titles = GalleryConfig::default().titles;
        assert_eq!(titles.len(), 12);
        assert_eq!(titles["frank_01_hi.png"], "01 \u{2014} гав\u{2011}привет");
        assert_eq!(titles["frank_10_kiss.png"], "10 \u{2014} Чмок\u{2011}чмок!");
        assert_eq!(titles["frank_12_business.png"], "12 — Связи решают");

        for spec in crate::catalog::Catalog::builtin().specs() {
            let file = format!("{}.png", BuildConfig::file_stem(&spec.slug, CaptionMode::Captioned));
            assert!(titles.contains_key(&file), "{}", file);
        }
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: ProjectConfig =
            serde_json::from_str(r#"{"build": {"rasterSize": 256}}"#).unwrap();
        assert_eq!(config.build.raster_size, 256);
        assert_eq!(config.build.cover_sizes, vec![100, 96]);
        assert_eq!(config.downloads.links.len(), 2);
        assert!(config.catalog.is_none());
    }

    #[test]
    fn test_zero_sizes_rejected() {
        assert!(BuildConfig::default().validate().is_ok());

        let flat = BuildConfig { raster_size: 0, ..BuildConfig::default() };
        assert!(matches!(flat.validate(), Err(ConfigError::Invalid(_))));

        let cover = BuildConfig { cover_sizes: vec![100, 0], ..BuildConfig::default() };
        assert!(matches!(cover.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_rejects_zero_raster_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frank.json");
        fs::write(&path, r#"{"build": {"rasterSize": 0}}"#).unwrap();
        assert!(matches!(
            ProjectConfig::load_from_file(&path),
            Err(ConfigError::Invalid(_))
        ));
    }
}
