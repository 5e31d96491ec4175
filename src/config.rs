//! User configuration.
//!
//! Read from `config.yaml` inside the first of `$SAZED_CONFIG`,
//! `$XDG_CONFIG_HOME/sazed` or `~/.config/sazed`. A missing file is written
//! with the defaults on first start.

use crate::models::fs::ensure_dir;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const CONFIG_FILE: &str = "config.yaml";
const LOG_FILE: &str = "sazed.log";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct ConfigFile {
    root: String,
    filetype: String,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            root: String::from("~/.sazed"),
            filetype: String::from("go"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    dir: PathBuf,
    root: PathBuf,
    filetype: String,
}

impl Config {
    /// Loads the configuration from the standard location
    pub fn load() -> Result<Self> {
        let home = dirs::home_dir();
        let dir = config_dir(|key| std::env::var(key).ok(), home.as_deref())?;
        Self::load_from(&dir, home.as_deref())
    }

    pub fn load_from(dir: &Path, home: Option<&Path>) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);

        if !path.exists() {
            ensure_dir(dir)
                .with_context(|| format!("Failed to create config directory {}", dir.display()))?;
            let content = serde_yaml::to_string(&ConfigFile::default())
                .context("Failed to serialize default config")?;
            fs::write(&path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote default config");
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file: ConfigFile = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(Self {
            dir: dir.to_path_buf(),
            root: expand_home(&file.root, home),
            filetype: file.filetype,
        })
    }

    /// Directory holding the category directories
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File type of the default category
    pub fn filetype(&self) -> &str {
        &self.filetype
    }

    pub fn log_path(&self) -> PathBuf {
        self.dir.join(LOG_FILE)
    }

    pub fn default_category(&self) -> PathBuf {
        self.root.join(&self.filetype)
    }

    /// Creates the root and the default category so the navigator always has
    /// at least one category to show.
    pub fn bootstrap(&self) -> Result<()> {
        let category = self.default_category();
        ensure_dir(&category)
            .with_context(|| format!("Failed to create {}", category.display()))?;
        Ok(())
    }
}

fn config_dir(env: impl Fn(&str) -> Option<String>, home: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = env("SAZED_CONFIG") {
        return Ok(PathBuf::from(dir));
    }
    if let Some(xdg) = env("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("sazed"));
    }
    let home = home.context("Failed to get home directory")?;
    Ok(home.join(".config").join("sazed"))
}

fn expand_home(raw: &str, home: Option<&Path>) -> PathBuf {
    match (raw.strip_prefix('~'), home) {
        (Some(""), Some(home)) => home.to_path_buf(),
        (Some(rest), Some(home)) if rest.starts_with('/') => home.join(&rest[1..]),
        _ => PathBuf::from(raw),
    }
}
