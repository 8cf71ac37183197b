//! `uriresolve share <FILE>` – print the share URI for a file.

use anyhow::{Context, Result};
use std::path::Path;
use uriresolve_core::config::ResolverConfig;
use uriresolve_core::{FsContentResolver, UriResolver};

pub fn run_share(cfg: &ResolverConfig, path: &Path) -> Result<()> {
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    let resolver = UriResolver::from_config(FsContentResolver::new(cfg.content_root()?), cfg)?;
    let uri = resolver
        .share_uri_for_file(&path)
        .with_context(|| format!("share {}", path.display()))?;
    println!("{uri}");
    Ok(())
}
