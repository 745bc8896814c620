// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::config::Config;
use anyhow::{Context, Result, anyhow, bail};
use std::env::{self, VarError};
use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const LOG_FILTER_ENV: &str = "INVMAP_LOG";

/// Installs a file-backed subscriber when a log path is configured. The terminal belongs
/// to the TUI, so nothing is ever written to stdout or stderr.
pub fn init(config: &Config) -> Result<bool> {
    let Some(path) = config.log_path() else {
        return Ok(false);
    };
    let file = open_log_file(&path)?;
    let filter = build_filter(env_filter_directives()?, config.log_level())?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|error| anyhow!("install log subscriber: {error}"))?;
    Ok(true)
}

fn env_filter_directives() -> Result<Option<String>> {
    match env::var(LOG_FILTER_ENV) {
        Ok(directives) => Ok(Some(directives)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => bail!("{LOG_FILTER_ENV} is not valid UTF-8"),
    }
}

/// `INVMAP_LOG` directives win when set; the configured level applies only when unset.
fn build_filter(directives: Option<String>, level: &str) -> Result<EnvFilter> {
    match directives {
        Some(directives) => EnvFilter::try_new(&directives).with_context(|| {
            format!("invalid {LOG_FILTER_ENV} filter {directives:?}; unset it to use [log].level")
        }),
        None => EnvFilter::try_new(level).with_context(|| format!("invalid log level {level:?}")),
    }
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| {
            format!(
                "open log file {} -- set [log].path or INVMAP_LOG_PATH to a writable file",
                path.display()
            )
        })
}
