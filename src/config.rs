// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Finboard", "finboard"));

pub const DB_ENV: &str = "FINBOARD_DB";
pub const LOG_ENV: &str = "FINBOARD_LOG";
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
}

impl Config {
    /// `FINBOARD_DB` wins; otherwise the platform data dir is used.
    pub fn load() -> Result<Self> {
        let db_path = match std::env::var_os(DB_ENV) {
            Some(p) if !p.is_empty() => PathBuf::from(p),
            _ => default_db_path()?,
        };
        Ok(Self::with_db_path(db_path))
    }

    pub fn with_db_path(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    pub fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(dir) = self.db_path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create {}", dir.display()))?;
            }
        }
        Ok(())
    }
}

fn default_db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    Ok(proj.data_dir().join("finboard.sqlite"))
}

pub fn init_logging() {
    let env = env_logger::Env::default().filter_or(LOG_ENV, DEFAULT_LOG_FILTER);
    // may already be initialised when embedded
    let _ = env_logger::Builder::from_env(env).try_init();
}
