//! Configuration file management for pddlgen.
//!
//! Provides a TOML-based config file at `~/.config/pddlgen/config.toml` and
//! a resolution chain: CLI flag > env var > config file > default. The API
//! key is deliberately resolved to an `Option`: its absence is not fatal
//! here -- the generation adapter turns it into a normal error the studio
//! can display.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use pddlgen_core::generate::DEFAULT_MODEL;

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigFile {
    pub gemini: GeminiSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiSection {
    /// Model identifier to request.
    pub model: Option<String>,
    /// API key. Usually left unset in favor of the GEMINI_API_KEY env var.
    pub api_key: Option<String>,
}

impl ConfigFile {
    /// Starter config written by `pddlgen init`.
    pub fn starter() -> Self {
        Self {
            gemini: GeminiSection {
                model: Some(DEFAULT_MODEL.to_string()),
                api_key: None,
            },
        }
    }
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the pddlgen config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/pddlgen` or `~/.config/pddlgen`.
/// We intentionally ignore the platform-specific `dirs::config_dir()`
/// (which returns `~/Library/Application Support` on macOS).
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("pddlgen");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("pddlgen")
}

/// Return the path to the pddlgen config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    let path = config_path();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents).context("failed to parse config file")?;
    Ok(config)
}

/// Serialize and write the config file, creating parent dirs as needed.
/// Sets file permissions to 0600 on Unix since the file may hold the key.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(&path, perms)
            .with_context(|| format!("failed to set permissions on {}", path.display()))?;
    }

    Ok(())
}

/// Write the starter config, refusing to clobber an existing file unless
/// `force` is set.
pub fn write_starter_config(force: bool) -> Result<PathBuf> {
    let path = config_path();
    if path.exists() && !force {
        bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }
    save_config(&ConfigFile::starter())?;
    Ok(path)
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready to hand to the generation adapter.
#[derive(Debug)]
pub struct ResolvedConfig {
    pub model: String,
    pub api_key: Option<String>,
}

impl ResolvedConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config
    /// file > default.
    ///
    /// - Model: `cli_model` > `PDDLGEN_MODEL` env > `config.gemini.model` > built-in default
    /// - API key: `GEMINI_API_KEY` env > `config.gemini.api_key` > absent
    pub fn resolve(cli_model: Option<&str>) -> Self {
        let file_config = load_config().ok();

        let model = if let Some(m) = cli_model {
            m.to_string()
        } else if let Ok(m) = std::env::var("PDDLGEN_MODEL") {
            m
        } else if let Some(m) = file_config.as_ref().and_then(|c| c.gemini.model.clone()) {
            m
        } else {
            DEFAULT_MODEL.to_string()
        };

        // Blank keys count as absent, whatever their source, so the adapter
        // reports the actionable missing-key message instead of an API error.
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| {
                file_config
                    .and_then(|c| c.gemini.api_key)
                    .filter(|k| !k.trim().is_empty())
            });

        Self { model, api_key }
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
