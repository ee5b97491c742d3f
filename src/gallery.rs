//! Embedded Gallery Page
//!
//! Every PNG in the source directory becomes one card with the image inlined,
//! so the page opens without a server or network.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::GalleryConfig;
use crate::embed::{write_page, EmbedError, EmbeddedFile};
use crate::primitives::escape_markup;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryCard {
    pub image: EmbeddedFile,
    pub caption: String,
}

#[derive(Debug, Clone)]
pub struct GalleryReport {
    pub destination: PathBuf,
    pub cards: usize,
}

/// PNG files directly inside `dir`, sorted by file name.
pub fn discover_bitmaps(dir: &Path) -> Result<Vec<PathBuf>, EmbedError> {
    let read_err = |source: std::io::Error| EmbedError::Read {
        path: dir.display().to_string(),
        source,
    };

    let mut files = vec![];
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if path.is_file() && path.extension().map_or(false, |e| e == "png") {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Registered title, or the file name when none is registered.
pub fn card_for(path: &Path, titles: &BTreeMap<String, String>) -> Result<GalleryCard, EmbedError> {
    let image = EmbeddedFile::read(path)?;
    let caption = titles
        .get(&image.file_name)
        .cloned()
        .unwrap_or_else(|| image.file_name.clone());
    Ok(GalleryCard { image, caption })
}

pub fn render_gallery(cards: &[GalleryCard]) -> String {
    let cards_html = cards
        .iter()
        .map(|card| {
            format!(
                r#"<div class="card"><img src="{}" alt="{}"/><div class="name">{}</div></div>"#,
                card.image.data_uri(),
                escape_markup(&card.image.file_name),
                escape_markup(&card.caption)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<!DOCTYPE html>
<html lang="ru">
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width,initial-scale=1" />
<title>Стикерпак Фрэнк — галерея (вшитые изображения)</title>
<style>
  body {{ font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; margin: 24px; background:#f6f7f9; }}
  h1 {{ margin: 0 0 16px; }}
  .grid {{ display: grid; grid-template-columns: repeat(auto-fill, minmax(180px, 1fr)); gap: 16px; }}
  .card {{ background: #fff; border-radius: 12px; padding: 12px; box-shadow: 0 2px 8px rgba(0,0,0,0.06); text-align:center; }}
  .card img {{ width: 100%; height: auto; image-rendering: -webkit-optimize-contrast; }}
  .name {{ font-weight: 700; margin-top: 8px; font-size: 14px; color:#222; }}
  .hint {{ color:#666; font-size: 14px; margin-bottom: 16px; }}
</style>
</head>
<body>
  <h1>Стикерпак Фрэнк — {count} PNG</h1>
  <p class="hint">Этот файл самодостаточный: просто откройте его в браузере — интернет и сервер не нужны.</p>
  <div class="grid">{cards_html}</div>
</body>
</html>"#,
        count = cards.len(),
    )
}

pub fn build_gallery(config: &GalleryConfig) -> Result<GalleryReport, EmbedError> {
    let files = discover_bitmaps(&config.source_dir)?;
    let mut cards = Vec::with_capacity(files.len());
    for path in &files {
        debug!(path = %path.display(), "embedding bitmap");
        cards.push(card_for(path, &config.titles)?);
    }

    write_page(&config.destination, &render_gallery(&cards))?;
    info!(cards = cards.len(), destination = %config.destination.display(), "wrote gallery");

    Ok(GalleryReport {
        destination: config.destination.clone(),
        cards: cards.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discovery_ignores_other_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.png"), b"b").unwrap();
        fs::write(dir.path().join("a.png"), b"a").unwrap();
        fs::write(dir.path().join("a.svg"), b"<svg/>").unwrap();
        fs::create_dir(dir.path().join("nested.png")).unwrap();

        let found = discover_bitmaps(dir.path()).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.png", "b.png"]);
    }

    #[test]
    fn test_caption_falls_back_to_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extra.png");
        fs::write(&path, b"x").unwrap();

        let mut titles = BTreeMap::new();
        titles.insert("frank_01_hi.png".to_string(), "01 — гав-привет".to_string());
        assert_eq!(card_for(&path, &titles).unwrap().caption, "extra.png");

        titles.insert("extra.png".to_string(), "Extra".to_string());
        assert_eq!(card_for(&path, &titles).unwrap().caption, "Extra");
    }

    #[test]
    fn test_missing_source_dir_is_fatal() {
        let config = GalleryConfig {
            source_dir: PathBuf::from("/no/such/dir"),
            ..GalleryConfig::default()
        };
        assert!(matches!(build_gallery(&config), Err(EmbedError::Read { .. })));
    }
}
