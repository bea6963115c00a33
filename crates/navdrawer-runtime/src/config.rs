#![forbid(unsafe_code)]

//! Drawer configuration as data.
//!
//! [`DrawerConfig`] captures every element id, class name, and delay the
//! drawer uses. It can be loaded from TOML or JSON at startup when the
//! `config` feature is enabled.
//!
//! # Loading
//!
//! ```toml
//! # navdrawer.toml
//! drawer_id = "siteNav"
//! header_padding_px = 16.0
//!
//! [delays]
//! backdrop_grace_ms = 250
//! ```
//!
//! ```rust,ignore
//! let config = DrawerConfig::from_toml_file("navdrawer.toml")?;
//! let config = DrawerConfig::from_json_str(json)?;
//! ```
//!
//! # Defaults
//!
//! `DrawerConfig::default()` matches the markup contract of the standard
//! page: `menuToggle`, `siteNav`, `closeMenu`, `backdrop`, `year`, and a
//! `.site-header` with 12 px of extra scroll offset.

#[cfg(feature = "config")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

/// Element ids, classes, and timing for one drawer instance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct DrawerConfig {
    /// Id of the control that toggles the drawer.
    pub toggle_id: String,
    /// Id of the drawer container.
    pub drawer_id: String,
    /// Id of the dedicated close control inside the drawer.
    pub close_id: String,
    /// Id of the backdrop overlay.
    pub backdrop_id: String,
    /// Id of the element that receives the current year. Optional on the page.
    pub year_id: String,
    /// Selector of the sticky header used for the scroll offset.
    pub header_selector: String,
    /// Extra spacing added below the header, in CSS pixels.
    pub header_padding_px: f64,
    /// Class marking the backdrop as visible.
    pub shown_class: String,
    /// Class marking the drawer as open.
    pub open_class: String,
    /// Deferred-work delays.
    pub delays: DelayConfig,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            toggle_id: "menuToggle".to_string(),
            drawer_id: "siteNav".to_string(),
            close_id: "closeMenu".to_string(),
            backdrop_id: "backdrop".to_string(),
            year_id: "year".to_string(),
            header_selector: ".site-header".to_string(),
            header_padding_px: 12.0,
            shown_class: "show".to_string(),
            open_class: "open".to_string(),
            delays: DelayConfig::default(),
        }
    }
}

impl DrawerConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Serialize to a pretty TOML document.
    #[cfg(feature = "config")]
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(vec![e.to_string()]))
    }

    /// Return `self` if it validates, otherwise the collected problems.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }

    /// Validate all parameters.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("toggle_id", &self.toggle_id),
            ("drawer_id", &self.drawer_id),
            ("close_id", &self.close_id),
            ("backdrop_id", &self.backdrop_id),
            ("shown_class", &self.shown_class),
            ("open_class", &self.open_class),
            ("header_selector", &self.header_selector),
        ] {
            if value.trim().is_empty() {
                errors.push(format!("{field} must not be empty"));
            } else if value.chars().any(char::is_whitespace) {
                errors.push(format!("{field} must not contain whitespace, got {value:?}"));
            }
        }

        let ids = [&self.toggle_id, &self.drawer_id, &self.close_id, &self.backdrop_id];
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                if a == b && !a.is_empty() {
                    errors.push(format!("element id {a:?} is used for more than one role"));
                }
            }
        }

        if !self.header_padding_px.is_finite() || self.header_padding_px < 0.0 {
            errors.push(format!(
                "header_padding_px must be a finite non-negative number, got {}",
                self.header_padding_px
            ));
        }

        errors.extend(self.delays.validate());
        errors
    }
}

/// Delays for deferred drawer work, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct DelayConfig {
    /// Time the backdrop stays in the tree after closing so its fade-out can
    /// run. Default: 200.
    pub backdrop_grace_ms: u64,
    /// Quiet period after the last resize before the drawer closes.
    /// Default: 120.
    pub resize_debounce_ms: u64,
    /// Delay between closing the drawer from a link and scrolling.
    /// Default: 150.
    pub link_scroll_ms: u64,
    /// Delay between closing the drawer from a link and navigating away.
    /// Default: 100.
    pub navigate_ms: u64,
    /// Delay before correcting the scroll position after load or hash
    /// change. Default: 50.
    pub settle_ms: u64,
}

/// Upper bound for any single delay.
pub const MAX_DELAY_MS: u64 = 10_000;

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            backdrop_grace_ms: 200,
            resize_debounce_ms: 120,
            link_scroll_ms: 150,
            navigate_ms: 100,
            settle_ms: 50,
        }
    }
}

impl DelayConfig {
    /// Backdrop fade-out grace period.
    #[must_use]
    pub const fn backdrop_grace(&self) -> Duration {
        Duration::from_millis(self.backdrop_grace_ms)
    }

    /// Resize debounce window.
    #[must_use]
    pub const fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    /// Link-to-scroll delay.
    #[must_use]
    pub const fn link_scroll(&self) -> Duration {
        Duration::from_millis(self.link_scroll_ms)
    }

    /// Link-to-navigation delay.
    #[must_use]
    pub const fn navigate(&self) -> Duration {
        Duration::from_millis(self.navigate_ms)
    }

    /// Load/hash-change settle delay.
    #[must_use]
    pub const fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        for (field, value) in [
            ("delays.backdrop_grace_ms", self.backdrop_grace_ms),
            ("delays.resize_debounce_ms", self.resize_debounce_ms),
            ("delays.link_scroll_ms", self.link_scroll_ms),
            ("delays.navigate_ms", self.navigate_ms),
            ("delays.settle_ms", self.settle_ms),
        ] {
            if value > MAX_DELAY_MS {
                errors.push(format!("{field} must be <= {MAX_DELAY_MS}, got {value}"));
            }
        }
        if self.resize_debounce_ms == 0 {
            errors.push("delays.resize_debounce_ms must be > 0".to_string());
        }
        errors
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a drawer configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Invalid(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Invalid(errors) => write!(f, "invalid drawer config: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_validates_clean() {
        let errors = DrawerConfig::default().validate();
        assert!(errors.is_empty(), "default should validate: {errors:?}");
    }

    #[test]
    fn default_delays() {
        let delays = DelayConfig::default();
        assert_eq!(delays.backdrop_grace(), Duration::from_millis(200));
        assert_eq!(delays.resize_debounce(), Duration::from_millis(120));
        assert_eq!(delays.link_scroll(), Duration::from_millis(150));
        assert_eq!(delays.navigate(), Duration::from_millis(100));
        assert_eq!(delays.settle(), Duration::from_millis(50));
    }

    #[test]
    fn validate_catches_empty_id() {
        let config = DrawerConfig {
            drawer_id: String::new(),
            ..DrawerConfig::default()
        };
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.contains("drawer_id")));
    }

    #[test]
    fn validate_catches_whitespace_class() {
        let config = DrawerConfig {
            shown_class: "is shown".into(),
            ..DrawerConfig::default()
        };
        assert!(config.validate().iter().any(|e| e.contains("shown_class")));
    }

    #[test]
    fn validate_catches_shared_id() {
        let config = DrawerConfig {
            close_id: "menuToggle".into(),
            ..DrawerConfig::default()
        };
        assert!(config.validate().iter().any(|e| e.contains("more than one role")));
    }

    #[test]
    fn validate_catches_negative_padding() {
        let config = DrawerConfig {
            header_padding_px: -1.0,
            ..DrawerConfig::default()
        };
        assert!(config.validate().iter().any(|e| e.contains("header_padding_px")));

        let config = DrawerConfig {
            header_padding_px: f64::NAN,
            ..DrawerConfig::default()
        };
        assert!(config.validate().iter().any(|e| e.contains("header_padding_px")));
    }

    #[test]
    fn validate_catches_delay_bounds() {
        let mut config = DrawerConfig::default();
        config.delays.navigate_ms = MAX_DELAY_MS + 1;
        config.delays.resize_debounce_ms = 0;
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.contains("delays.navigate_ms")));
        assert!(errors.iter().any(|e| e.contains("delays.resize_debounce_ms")));
    }

    #[test]
    fn validated_wraps_errors() {
        let config = DrawerConfig {
            toggle_id: " ".into(),
            ..DrawerConfig::default()
        };
        match config.validated() {
            Err(ConfigError::Invalid(errors)) => assert!(!errors.is_empty()),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn error_display() {
        let err = ConfigError::Invalid(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "invalid drawer config: a; b");
    }

    #[cfg(feature = "config")]
    mod serde_tests {
        use super::*;

        #[test]
        fn partial_toml_keeps_defaults() {
            let config = DrawerConfig::from_toml_str(
                "drawer_id = \"mainNav\"\n\n[delays]\nbackdrop_grace_ms = 300\n",
            )
            .expect("valid toml");
            assert_eq!(config.drawer_id, "mainNav");
            assert_eq!(config.toggle_id, "menuToggle");
            assert_eq!(config.delays.backdrop_grace_ms, 300);
            assert_eq!(config.delays.resize_debounce_ms, 120);
        }

        #[test]
        fn json_round_trip_of_defaults() {
            let json = serde_json::to_string(&DrawerConfig::default()).expect("serialize");
            let config = DrawerConfig::from_json_str(&json).expect("parse");
            assert_eq!(config, DrawerConfig::default());
        }

        #[test]
        fn invalid_values_are_rejected_on_load() {
            let err = DrawerConfig::from_json_str(r#"{"header_padding_px": -4.0}"#)
                .expect_err("negative padding");
            assert!(matches!(err, ConfigError::Invalid(_)));
        }

        #[test]
        fn malformed_toml_reports_parse_error() {
            let err = DrawerConfig::from_toml_str("drawer_id = ").expect_err("malformed");
            assert!(matches!(err, ConfigError::Toml(_)));
        }

        #[test]
        fn missing_file_reports_io_error() {
            let err = DrawerConfig::from_toml_file("/definitely/not/here/navdrawer.toml")
                .expect_err("missing");
            assert!(matches!(err, ConfigError::Io(_)));
        }

        #[test]
        fn toml_output_parses_back() {
            let text = DrawerConfig::default().to_toml_string().expect("serialize");
            let config = DrawerConfig::from_toml_str(&text).expect("parse");
            assert_eq!(config, DrawerConfig::default());
        }
    }
}
