use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::content::AppDirs;
use crate::provider::sharing_authority;
use crate::storage::DEFAULT_BUFFER_BYTES;

const APP_PREFIX: &str = "uriresolve";

/// Global configuration loaded from `~/.config/uriresolve/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Application package name; the sharing authority is `<package_name>.provider`.
    pub package_name: String,
    /// Root of shared external storage. Defaults to `<data>/uriresolve/external`.
    #[serde(default)]
    pub external_storage_root: Option<PathBuf>,
    /// Private files directory copies are written to. Defaults to `<data>/uriresolve/files`.
    #[serde(default)]
    pub files_dir: Option<PathBuf>,
    /// External pictures directory served by the sharing authority. Defaults to `<data>/uriresolve/pictures`.
    #[serde(default)]
    pub pictures_dir: Option<PathBuf>,
    /// Directory mirroring content providers for the filesystem resolver. Defaults to `<data>/uriresolve/content`.
    #[serde(default)]
    pub content_root: Option<PathBuf>,
    /// Whether document-provider URIs are recognized.
    #[serde(default = "default_true")]
    pub document_uris: bool,
    /// Ask the provider for a backing `_data` path before copying.
    #[serde(default)]
    pub data_column_lookup: bool,
    /// Build `file://` URIs instead of sharing-authority URIs when sharing files.
    #[serde(default)]
    pub legacy_file_uris: bool,
    /// Copy buffer size in bytes.
    #[serde(default = "default_buffer_bytes")]
    pub copy_buffer_bytes: usize,
}

fn default_true() -> bool {
    true
}

fn default_buffer_bytes() -> usize {
    DEFAULT_BUFFER_BYTES
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            package_name: "com.example.exif".to_string(),
            external_storage_root: None,
            files_dir: None,
            pictures_dir: None,
            content_root: None,
            document_uris: true,
            data_column_lookup: false,
            legacy_file_uris: false,
            copy_buffer_bytes: DEFAULT_BUFFER_BYTES,
        }
    }
}

impl ResolverConfig {
    /// `<package_name>.provider`.
    pub fn sharing_authority(&self) -> String {
        sharing_authority(&self.package_name)
    }

    /// Directories with unset entries filled in under `data_home`.
    pub fn app_dirs_under(&self, data_home: &std::path::Path) -> AppDirs {
        AppDirs {
            external_storage_root: self
                .external_storage_root
                .clone()
                .unwrap_or_else(|| data_home.join("external")),
            files_dir: self
                .files_dir
                .clone()
                .unwrap_or_else(|| data_home.join("files")),
            pictures_dir: self
                .pictures_dir
                .clone()
                .unwrap_or_else(|| data_home.join("pictures")),
        }
    }

    /// Directories with unset entries defaulted under the XDG data dir.
    pub fn app_dirs(&self) -> Result<AppDirs> {
        match (&self.external_storage_root, &self.files_dir, &self.pictures_dir) {
            (Some(external_storage_root), Some(files_dir), Some(pictures_dir)) => Ok(AppDirs {
                external_storage_root: external_storage_root.clone(),
                files_dir: files_dir.clone(),
                pictures_dir: pictures_dir.clone(),
            }),
            _ => Ok(self.app_dirs_under(&data_home()?)),
        }
    }

    /// Content root for the filesystem resolver.
    pub fn content_root(&self) -> Result<PathBuf> {
        match &self.content_root {
            Some(root) => Ok(root.clone()),
            None => Ok(data_home()?.join("content")),
        }
    }
}

fn data_home() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix(APP_PREFIX)?;
    Ok(xdg_dirs.get_data_home())
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix(APP_PREFIX)?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ResolverConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ResolverConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg: ResolverConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
