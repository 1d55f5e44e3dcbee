//! `pan.toml` handling
//!
//! ```toml
//! [pager]
//! loop_mode = "bounded"
//! axis = "horizontal"
//! pulling_threshold = 0.28
//!
//! [demo]
//! pages = 5
//! lifecycle = "odd"
//! effect = "card_stack"
//! script = "drag:next release settle"
//!
//! [surface]
//! viewport = { width = 320.0, height = 480.0 }
//! snap_duration = 0.25
//! ```

use anyhow::{Context, Result};
use pan_core::PanConfig;
use pan_effects::EffectKind;
use pan_harness::SimConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default file name looked up in the working directory
pub const CONFIG_FILE: &str = "pan.toml";

/// Whole configuration file
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct PanToml {
    #[serde(default)]
    pub pager: PanConfig,
    #[serde(default)]
    pub demo: DemoConfig,
    #[serde(default)]
    pub surface: SimConfig,
}

/// Which demo pages receive lifecycle callbacks
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecyclePages {
    All,
    None,
    #[default]
    Odd,
    Even,
}

impl LifecyclePages {
    pub fn includes(self, index: usize) -> bool {
        match self {
            LifecyclePages::All => true,
            LifecyclePages::None => false,
            LifecyclePages::Odd => index % 2 == 1,
            LifecyclePages::Even => index % 2 == 0,
        }
    }
}

/// The `[demo]` table
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DemoConfig {
    #[serde(default = "default_pages")]
    pub pages: usize,
    #[serde(default)]
    pub lifecycle: LifecyclePages,
    #[serde(default)]
    pub effect: EffectKind,
    #[serde(default = "default_script")]
    pub script: String,
    /// Also print per-frame change notifications
    #[serde(default)]
    pub show_changes: bool,
}

fn default_pages() -> usize {
    5
}

fn default_script() -> String {
    "drag:next release settle jump-animated:3 settle drag:-40 release settle".to_string()
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            pages: default_pages(),
            lifecycle: LifecyclePages::default(),
            effect: EffectKind::default(),
            script: default_script(),
            show_changes: false,
        }
    }
}

impl PanToml {
    /// Parse a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Parse `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("{} not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pan_core::{LoopMode, ScrollAxis};

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = PanToml::parse("").unwrap();
        assert_eq!(config, PanToml::default());
        assert_eq!(config.demo.pages, 5);
        assert_eq!(config.pager.loop_mode, LoopMode::Loop);
    }

    #[test]
    fn test_partial_tables() {
        let config = PanToml::parse(
            r#"
            [pager]
            loop_mode = "bounded"
            axis = "vertical"

            [demo]
            pages = 8
            lifecycle = "all"
            effect = "flip"

            [surface]
            viewport = { width = 200.0, height = 100.0 }
            "#,
        )
        .unwrap();
        assert_eq!(config.pager.loop_mode, LoopMode::Bounded);
        assert_eq!(config.pager.axis, ScrollAxis::Vertical);
        assert_eq!(config.demo.pages, 8);
        assert_eq!(config.demo.effect, EffectKind::Flip);
        assert_eq!(config.demo.script, default_script());
        assert_eq!(config.surface.viewport.width, 200.0);
        assert_eq!(config.surface.snap_duration, SimConfig::default().snap_duration);
    }

    #[test]
    fn test_unknown_effect_is_rejected() {
        assert!(PanToml::parse("[demo]\neffect = \"wobble\"").is_err());
    }

    #[test]
    fn test_serialized_defaults_parse_back() {
        let text = PanToml::default().to_toml_string().unwrap();
        assert_eq!(PanToml::parse(&text).unwrap(), PanToml::default());
    }

    #[test]
    fn test_lifecycle_selection() {
        assert!(LifecyclePages::Odd.includes(3));
        assert!(!LifecyclePages::Odd.includes(2));
        assert!(LifecyclePages::Even.includes(0));
        assert!(!LifecyclePages::None.includes(1));
        assert!(LifecyclePages::All.includes(7));
    }
}
