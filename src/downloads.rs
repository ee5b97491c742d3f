//! Download Links Page
//!
//! Each configured archive is inlined into an anchor's `href` so the browser
//! can save it straight from the page.

use std::path::PathBuf;
use tracing::info;

use crate::config::{DownloadConfig, DownloadLink};
use crate::embed::{write_page, EmbedError, EmbeddedFile};
use crate::primitives::escape_markup;

#[derive(Debug, Clone)]
pub struct DownloadsReport {
    pub destination: PathBuf,
    pub links: usize,
}

pub fn render_link(file: &EmbeddedFile, label: &str) -> String {
    let name = escape_markup(&file.file_name);
    format!(
        r#"<p><a download="{name}" href="{}">Скачать — {} ({name})</a></p>"#,
        file.data_uri(),
        escape_markup(label)
    )
}

pub fn render_downloads(links: &[String]) -> String {
    format!(
        r#"<!doctype html>
<html lang="ru"><meta charset="utf-8"><title>Скачать стикеры Фрэнка</title>
<style>body{{font-family:system-ui,Arial,sans-serif;padding:24px;}} a{{display:inline-block;background:#222;color:#fff;padding:10px 14px;border-radius:8px;text-decoration:none;margin:8px 0;}}</style>
<h1>Скачать стикеры Фрэнка</h1>
{}
<p>Подсказка: если загрузка не начинается в превью редактора, кликните правой кнопкой по ссылке и выберите «Сохранить ссылку как…».</p>
"#,
        links.join("\n")
    )
}

/// Every input must exist; the first missing one aborts the page.
pub fn build_downloads(config: &DownloadConfig) -> Result<DownloadsReport, EmbedError> {
    let links = config
        .links
        .iter()
        .map(|DownloadLink { path, label }| {
            EmbeddedFile::read(path).map(|file| render_link(&file, label))
        })
        .collect::<Result<Vec<_>, _>>()?;

    write_page(&config.destination, &render_downloads(&links))?;
    info!(links = links.len(), destination = %config.destination.display(), "wrote download page");

    Ok(DownloadsReport {
        destination: config.destination.clone(),
        links: links.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_link_carries_filename_hint_and_payload() {
        let dir = tempfile::tempdir().unwrap();
        let zip = dir.path().join("frank_pack_12.zip");
        fs::write(&zip, b"PK\x03\x04").unwrap();
        let dest = dir.path().join("download_links.html");

        let config = DownloadConfig {
            links: vec![DownloadLink { path: zip, label: "12 PNG".to_string() }],
            destination: dest.clone(),
        };
        let report = build_downloads(&config).unwrap();
        assert_eq!(report.links, 1);

        let html = fs::read_to_string(dest).unwrap();
        assert!(html.contains(r#"download="frank_pack_12.zip""#));
        assert!(html.contains("href=\"data:application/zip;base64,UEsDBA==\""));
        assert!(html.contains("Скачать — 12 PNG (frank_pack_12.zip)"));
    }

    #[test]
    fn test_missing_archive_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.html");
        let config = DownloadConfig {
            links: vec![DownloadLink {
                path: dir.path().join("absent.zip"),
                label: "x".to_string(),
            }],
            destination: dest.clone(),
        };
        assert!(matches!(build_downloads(&config), Err(EmbedError::Read { .. })));
        assert!(!dest.exists());
    }
}
