//! Configuration handling for the portfolio

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_OWNER: &str = "Alex Morgan";
const DEFAULT_TAGLINE: &str = "Software engineer. I build quiet, dependable tools.";
const DEFAULT_SUBMIT_DELAY_MS: u64 = 1500;
const DEFAULT_REVEAL_THRESHOLD: f32 = 0.1;
const DEFAULT_REVEAL_STAGGER_MS: u64 = 100;
const DEFAULT_INDICATOR_THROTTLE_MS: u64 = 100;
const DEFAULT_INDICATOR_HIDE_AFTER: u16 = 3;
const DEFAULT_PARALLAX_SPEED: f32 = 0.05;

/// One block of page content, addressable as `#id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionConfig {
    pub id: String,
    pub title: String,
    pub body: String,
}

impl SectionConfig {
    fn new(id: &str, title: &str, body: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            body: body.to_string(),
        }
    }
}

/// User configuration for the portfolio
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FolioConfig {
    /// Name shown in the hero banner
    pub owner: Option<String>,
    /// Line under the name
    pub tagline: Option<String>,
    /// Page sections in display order
    pub sections: Option<Vec<SectionConfig>>,
    /// Simulated submission delay in milliseconds
    pub submit_delay_ms: Option<u64>,
    /// Visible fraction at which a section reveals
    pub reveal_threshold: Option<f32>,
    /// Delay between reveals that trigger together
    pub reveal_stagger_ms: Option<u64>,
    /// Scroll indicator throttle interval
    pub indicator_throttle_ms: Option<u64>,
    /// Scroll offset (lines) past which the indicator hides
    pub indicator_hide_after: Option<u16>,
    /// Parallax speed of the first background shape
    pub parallax_speed: Option<f32>,
}

impl FolioConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "folio", "folio-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the platform config directory
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from `path`; a missing file gives the defaults
    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: FolioConfig = serde_json::from_str(&content)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn owner(&self) -> &str {
        self.owner.as_deref().unwrap_or(DEFAULT_OWNER)
    }

    pub fn tagline(&self) -> &str {
        self.tagline.as_deref().unwrap_or(DEFAULT_TAGLINE)
    }

    pub fn sections(&self) -> Vec<SectionConfig> {
        match &self.sections {
            Some(sections) if !sections.is_empty() => sections.clone(),
            _ => default_sections(),
        }
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms.unwrap_or(DEFAULT_SUBMIT_DELAY_MS))
    }

    pub fn reveal_threshold(&self) -> f32 {
        self.reveal_threshold
            .unwrap_or(DEFAULT_REVEAL_THRESHOLD)
            .clamp(0.0, 1.0)
    }

    pub fn reveal_stagger(&self) -> Duration {
        Duration::from_millis(self.reveal_stagger_ms.unwrap_or(DEFAULT_REVEAL_STAGGER_MS))
    }

    pub fn indicator_throttle(&self) -> Duration {
        Duration::from_millis(
            self.indicator_throttle_ms
                .unwrap_or(DEFAULT_INDICATOR_THROTTLE_MS),
        )
    }

    pub fn indicator_hide_after(&self) -> u16 {
        self.indicator_hide_after
            .unwrap_or(DEFAULT_INDICATOR_HIDE_AFTER)
    }

    pub fn parallax_speed(&self) -> f32 {
        self.parallax_speed.unwrap_or(DEFAULT_PARALLAX_SPEED)
    }
}

fn default_sections() -> Vec<SectionConfig> {
    vec![
        SectionConfig::new(
            "about",
            "About",
            "I have spent the last decade building backend services and the \
             tooling around them. Lately that means Rust, terminals, and \
             making slow things fast.",
        ),
        SectionConfig::new(
            "projects",
            "Projects",
            "Ledger: an append-only event store with point-in-time queries.\n\
             Tidewatch: a log shipper that survives flaky networks.\n\
             Pebble: a tiny static site generator for notes.",
        ),
        SectionConfig::new(
            "experience",
            "Experience",
            "Staff Engineer, Northwind (2021 - present)\n\
             Senior Engineer, Contoso Labs (2017 - 2021)\n\
             Engineer, Fabrikam (2014 - 2017)",
        ),
        SectionConfig::new(
            "contact",
            "Contact",
            "Have a question or a project in mind? Press 'c' anywhere \
             to open the contact form.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Unique file in the system temp dir, never the user's config directory
    fn scratch_path() -> PathBuf {
        std::env::temp_dir().join(format!("folio-tui-{}.json", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_default_config() {
        let config = FolioConfig::default();
        assert!(config.owner.is_none());
        assert!(config.sections.is_none());
        assert!(config.submit_delay_ms.is_none());
        assert_eq!(config.submit_delay(), Duration::from_millis(1500));
        assert_eq!(config.reveal_threshold(), 0.1);
        assert_eq!(config.reveal_stagger(), Duration::from_millis(100));
        assert_eq!(config.indicator_throttle(), Duration::from_millis(100));
        assert_eq!(config.parallax_speed(), 0.05);
    }

    #[test]
    fn test_default_sections_include_contact() {
        let config = FolioConfig::default();
        let ids: Vec<String> = config.sections().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["about", "projects", "experience", "contact"]);
    }

    #[test]
    fn test_empty_sections_fall_back_to_defaults() {
        let config = FolioConfig {
            sections: Some(vec![]),
            ..Default::default()
        };
        assert_eq!(config.sections().len(), 4);
    }

    #[test]
    fn test_serialization() {
        let config = FolioConfig {
            owner: Some("Sam".to_string()),
            submit_delay_ms: Some(10),
            sections: Some(vec![SectionConfig::new("about", "About", "hi")]),
            ..Default::default()
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: FolioConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.owner(), "Sam");
        assert_eq!(parsed.submit_delay(), Duration::from_millis(10));
        assert_eq!(parsed.sections()[0].body, "hi");
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: FolioConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.owner(), DEFAULT_OWNER);
        assert_eq!(parsed.tagline(), DEFAULT_TAGLINE);
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"owner": "Sam", "unknown_field": "value"}"#;
        let parsed: FolioConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.owner(), "Sam");
    }

    #[test]
    fn test_reveal_threshold_is_clamped() {
        let config = FolioConfig {
            reveal_threshold: Some(3.0),
            ..Default::default()
        };
        assert_eq!(config.reveal_threshold(), 1.0);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let path = scratch_path();
        let config = FolioConfig::load_from(&path).unwrap();
        assert!(config.owner.is_none());
        assert_eq!(config.submit_delay(), Duration::from_millis(1500));
    }

    #[test]
    fn test_load_reads_file() {
        let path = scratch_path();
        fs::write(&path, r#"{"owner": "Sam", "submit_delay_ms": 10}"#).unwrap();
        let loaded = FolioConfig::load_from(&path);
        fs::remove_file(&path).unwrap();

        let config = loaded.unwrap();
        assert_eq!(config.owner(), "Sam");
        assert_eq!(config.submit_delay(), Duration::from_millis(10));
    }

    #[test]
    fn test_load_malformed_file_is_an_error() {
        let path = scratch_path();
        fs::write(&path, "{ not json").unwrap();
        let loaded = FolioConfig::load_from(&path);
        fs::remove_file(&path).unwrap();

        assert!(loaded.is_err());
    }
}
