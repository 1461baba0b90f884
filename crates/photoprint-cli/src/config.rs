//! Persisted print settings.
//!
//! Settings live in `settings.json` under the platform config directory.
//! A missing or unreadable file is never fatal: the CLI falls back to
//! defaults and says so in the log.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use photoprint_core::PrintSettings;

const FILE_NAME: &str = "settings.json";

/// Location of the settings file, plus the settings loaded from it.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    settings: PrintSettings,
}

impl ConfigStore {
    /// Open the store at `path`, or at the platform default when `None`.
    pub fn open(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => default_path()?,
        };
        let settings = load_from(&path);
        Ok(Self { path, settings })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> &PrintSettings {
        &self.settings
    }

    /// Change one setting from its textual form and save immediately.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.settings
            .set(key, value)
            .with_context(|| format!("cannot set '{key}'"))?;
        self.save()
    }

    /// Apply `change` and save if it modified anything.
    pub fn update(&mut self, change: impl FnOnce(&mut PrintSettings)) -> Result<()> {
        let before = self.settings.clone();
        change(&mut self.settings);
        if self.settings != before {
            self.save()?;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        save_to(&self.path, &self.settings)
    }
}

/// `settings.json` in the platform config directory for photoprint.
pub fn default_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "photoprint")
        .context("could not determine a configuration directory for this user")?;
    Ok(dirs.config_dir().join(FILE_NAME))
}

/// Load settings, falling back to defaults on any problem.
pub fn load_from(path: &Path) -> PrintSettings {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return PrintSettings::default();
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read settings, using defaults");
            return PrintSettings::default();
        }
    };

    match serde_json::from_str(&data) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "corrupted settings, using defaults");
            PrintSettings::default()
        }
    }
}

/// Write settings as pretty JSON, replacing the file atomically.
pub fn save_to(path: &Path, settings: &PrintSettings) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("cannot create config directory {}", dir.display()))?;
    }
    let data = serde_json::to_string_pretty(settings).context("cannot serialize settings")?;
    atomic_write(path, &data).with_context(|| format!("cannot write {}", path.display()))?;
    tracing::debug!(path = %path.display(), "saved settings");
    Ok(())
}

fn atomic_write(path: &Path, data: &str) -> io::Result<()> {
    let tmp_path = path.with_extension("json.tmp");
    {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(data.as_bytes())?;
        file.sync_all()?;
    }
    fs::rename(&tmp_path, path)
}
