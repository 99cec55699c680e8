//! Catalog icon fetching and decoding, run on the bridge worker.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use image::GenericImageView;
use url::Url;

use crate::controller::events::DecodedIcon;

pub const ICON_MAX_DIMENSION: u32 = 96;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconLocation {
    Remote(Url),
    File(PathBuf),
}

/// http(s) urls are fetched, `file://` urls and absolute paths are read as-is,
/// anything else is relative to `asset_root`.
pub fn resolve_icon_source(source: &str, asset_root: &Path) -> Result<IconLocation> {
    let source = source.trim();
    if source.is_empty() {
        bail!("icon path is empty");
    }
    if let Ok(url) = Url::parse(source) {
        match url.scheme() {
            "http" | "https" => return Ok(IconLocation::Remote(url)),
            "file" => {
                return url
                    .to_file_path()
                    .map(IconLocation::File)
                    .map_err(|_| anyhow!("file url '{source}' has no local path"));
            }
            // Windows drive letters parse as a one-letter scheme.
            _ => {}
        }
    }
    let path = Path::new(source);
    if path.is_absolute() {
        Ok(IconLocation::File(path.to_path_buf()))
    } else {
        Ok(IconLocation::File(asset_root.join(path)))
    }
}

pub async fn fetch_icon(http: &reqwest::Client, location: &IconLocation) -> Result<Vec<u8>> {
    match location {
        IconLocation::Remote(url) => {
            let bytes = http
                .get(url.clone())
                .send()
                .await?
                .error_for_status()?
                .bytes()
                .await?;
            Ok(bytes.to_vec())
        }
        IconLocation::File(path) => tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read icon '{}'", path.display())),
    }
}

pub fn decode_icon(source: &str, bytes: &[u8]) -> Result<DecodedIcon> {
    let decoded = image::load_from_memory(bytes)
        .with_context(|| format!("icon '{source}' is not a supported image"))?;
    let (orig_w, orig_h) = decoded.dimensions();
    let max_dimension = ICON_MAX_DIMENSION as f32;
    let scale = (max_dimension / (orig_w.max(orig_h).max(1) as f32)).min(1.0);
    let resized = if scale < 1.0 {
        decoded.resize(
            (orig_w as f32 * scale).max(1.0) as u32,
            (orig_h as f32 * scale).max(1.0) as u32,
            image::imageops::FilterType::Triangle,
        )
    } else {
        decoded
    };
    let rgba = resized.to_rgba8();
    Ok(DecodedIcon {
        source: source.to_string(),
        width: rgba.width() as usize,
        height: rgba.height() as usize,
        rgba: rgba.into_raw(),
    })
}

pub async fn load_icon(
    http: &reqwest::Client,
    asset_root: &Path,
    source: &str,
) -> Result<DecodedIcon> {
    let location = resolve_icon_source(source, asset_root)?;
    let bytes = fetch_icon(http, &location).await?;
    decode_icon(source, &bytes)
}

#[cfg(test)]
#[path = "tests/icons_tests.rs"]
mod tests;
