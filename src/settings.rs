use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::ocr::{FilterConfig, GroupingConfig};

const DEFAULT_SETTINGS_TOML: &str = include_str!("../settings.toml");

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub filter: FilterConfig,
    pub grouping: GroupingConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    filter: Option<FilterSettings>,
    grouping: Option<GroupingSettings>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FilterSettings {
    min_text_chars: Option<usize>,
    min_width: Option<i32>,
    min_height: Option<i32>,
    max_symbol_ratio: Option<f32>,
    min_vowel_ratio: Option<f32>,
    max_vowel_ratio: Option<f32>,
    max_consonant_run: Option<usize>,
    caps_ratio: Option<f32>,
    min_quality: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct GroupingSettings {
    vertical_gap_factor: Option<f32>,
    min_horizontal_overlap: Option<f32>,
    horizontal_gap_factor: Option<f32>,
}

/// Layers `settings.toml` / `settings.local.toml` from the working directory,
/// then from the home settings directory, then `extra_path`.
pub fn load_settings(extra_path: Option<&Path>) -> Result<Settings> {
    let mut settings = Settings::default();
    ensure_home_settings_file()?;

    let mut ordered_paths = Vec::new();
    ordered_paths.push(PathBuf::from("settings.toml"));
    ordered_paths.push(PathBuf::from("settings.local.toml"));

    if let Some(home) = home_dir() {
        ordered_paths.push(home.join("settings.toml"));
        ordered_paths.push(home.join("settings.local.toml"));
    }

    if let Some(extra) = extra_path {
        if !extra.exists() {
            return Err(anyhow!("settings file not found: {}", extra.display()));
        }
        ordered_paths.push(extra.to_path_buf());
    }

    for path in ordered_paths {
        if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("failed to read settings: {}", path.display()))?;
            let parsed: SettingsFile = toml::from_str(&content)
                .with_context(|| format!("failed to parse settings: {}", path.display()))?;
            settings.merge(parsed);
        }
    }

    Ok(settings)
}

impl Settings {
    fn merge(&mut self, incoming: SettingsFile) {
        if let Some(filter) = incoming.filter {
            let target = &mut self.filter;
            if let Some(chars) = filter.min_text_chars.filter(|value| *value > 0) {
                target.min_text_chars = chars;
            }
            if let Some(width) = filter.min_width.filter(|value| *value >= 0) {
                target.min_width = width;
            }
            if let Some(height) = filter.min_height.filter(|value| *value >= 0) {
                target.min_height = height;
            }
            if let Some(ratio) = unit_ratio(filter.max_symbol_ratio) {
                target.max_symbol_ratio = ratio;
            }
            if let Some(ratio) = unit_ratio(filter.min_vowel_ratio) {
                target.min_vowel_ratio = ratio;
            }
            if let Some(ratio) = unit_ratio(filter.max_vowel_ratio) {
                target.max_vowel_ratio = ratio;
            }
            if let Some(run) = filter.max_consonant_run.filter(|value| *value > 0) {
                target.max_consonant_run = run;
            }
            if let Some(ratio) = unit_ratio(filter.caps_ratio) {
                target.caps_ratio = ratio;
            }
            if let Some(ratio) = unit_ratio(filter.min_quality) {
                target.min_quality = ratio;
            }
        }
        if let Some(grouping) = incoming.grouping {
            let target = &mut self.grouping;
            if let Some(factor) = positive(grouping.vertical_gap_factor) {
                target.vertical_gap_factor = factor;
            }
            if let Some(ratio) = unit_ratio(grouping.min_horizontal_overlap) {
                target.min_horizontal_overlap = ratio;
            }
            if let Some(factor) = positive(grouping.horizontal_gap_factor) {
                target.horizontal_gap_factor = factor;
            }
        }
    }
}

fn unit_ratio(value: Option<f32>) -> Option<f32> {
    value.filter(|value| (0.0..=1.0).contains(value))
}

fn positive(value: Option<f32>) -> Option<f32> {
    value.filter(|value| value.is_finite() && *value > 0.0)
}

fn ensure_home_settings_file() -> Result<()> {
    let Some(home) = home_dir() else {
        return Ok(());
    };
    fs::create_dir_all(&home)
        .with_context(|| format!("failed to create settings directory: {}", home.display()))?;
    let path = home.join("settings.toml");
    if !path.exists() {
        fs::write(&path, DEFAULT_SETTINGS_TOML)
            .with_context(|| format!("failed to write settings: {}", path.display()))?;
    }
    Ok(())
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().and_then(|home| {
        let home = home.trim();
        if home.is_empty() {
            None
        } else {
            Some(Path::new(home).join(".camera-translator-rust"))
        }
    })
}
