// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub(crate) static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Finboard", "finboard"));

pub const CURRENCIES: &[&str] = &["USD", "EUR", "GBP", "JPY", "MXN", "ARS", "COP", "CLP"];
pub const LANGUAGES: &[&str] = &["en", "es", "fr", "de", "pt"];
pub const THEMES: &[&str] = &["light", "dark", "system"];

pub(crate) fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific app dirs")
}

pub fn config_path() -> Result<PathBuf> {
    let proj = project_dirs()?;
    let dir = proj.config_dir();
    fs::create_dir_all(dir).context("Failed to create config dir")?;
    Ok(dir.join("settings.json"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Notifications {
    pub email: bool,
    pub push: bool,
    pub monthly_report: bool,
    pub new_features: bool,
    pub tips: bool,
}

impl Default for Notifications {
    fn default() -> Self {
        Self {
            email: true,
            push: true,
            monthly_report: true,
            new_features: true,
            tips: false,
        }
    }
}

/// User preferences. Missing keys in the file fall back to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub currency: String,
    pub language: String,
    pub theme: String,
    pub compact_mode: bool,
    pub notifications: Notifications,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: "USD".into(),
            language: "en".into(),
            theme: "dark".into(),
            compact_mode: false,
            notifications: Notifications::default(),
        }
    }
}

fn one_of(what: &str, value: &str, allowed: &[&str]) -> Result<String> {
    allowed
        .iter()
        .find(|a| a.eq_ignore_ascii_case(value.trim()))
        .map(|a| a.to_string())
        .ok_or_else(|| {
            anyhow!(
                "Unsupported {} '{}', expected one of {}",
                what,
                value.trim(),
                allowed.join("|")
            )
        })
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path)
            .with_context(|| format!("Read settings at {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("Parse settings at {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config dir")?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)
            .with_context(|| format!("Write settings at {}", path.display()))?;
        Ok(())
    }

    pub fn set_currency(&mut self, v: &str) -> Result<()> {
        self.currency = one_of("currency", v, CURRENCIES)?;
        Ok(())
    }

    pub fn set_language(&mut self, v: &str) -> Result<()> {
        self.language = one_of("language", v, LANGUAGES)?;
        Ok(())
    }

    pub fn set_theme(&mut self, v: &str) -> Result<()> {
        self.theme = one_of("theme", v, THEMES)?;
        Ok(())
    }

    /// Flips a notification switch by its key.
    pub fn set_notification(&mut self, key: &str, on: bool) -> Result<()> {
        let n = &mut self.notifications;
        let slot = match key.trim() {
            "email" => &mut n.email,
            "push" => &mut n.push,
            "monthly-report" | "monthly_report" => &mut n.monthly_report,
            "new-features" | "new_features" => &mut n.new_features,
            "tips" => &mut n.tips,
            other => return Err(anyhow!("Unknown notification '{}'", other)),
        };
        *slot = on;
        Ok(())
    }
}
