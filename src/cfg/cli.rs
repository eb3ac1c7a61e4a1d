// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Environment variable that overrides the default config path.
pub const CONFIG_ENV: &str = "SCSI_TARGET_CONFIG";

pub fn resolve_config_path(rel: &str) -> Result<PathBuf> {
    let p = Path::new(rel);

    let abs = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()
            .context("cannot get current working dir")?
            .join(p)
    };

    let canon = abs
        .canonicalize()
        .with_context(|| format!("failed to canonicalize path {abs:?}"))?;

    Ok(canon)
}

/// Pick the config path: first command-line argument, then
/// [`CONFIG_ENV`], then `default`.
pub fn config_path_from<I>(args: I, default: &str) -> Result<PathBuf>
where I: IntoIterator<Item = String> {
    let chosen = args
        .into_iter()
        .nth(1)
        .or_else(|| std::env::var(CONFIG_ENV).ok())
        .unwrap_or_else(|| default.to_string());
    resolve_config_path(&chosen)
}
