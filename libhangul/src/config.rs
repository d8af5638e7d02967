//! Configuration for the Hangul engine.

use serde::{Deserialize, Serialize};

/// Keyboard layouts the engine can resolve keys with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Standard 2-set layout
    #[default]
    Dubeolsik,
}

/// Hangul-specific configuration that extends the base `Config` from core.
///
/// This configuration includes:
/// - All generic options from `libhangul_core::Config` (flattened via serde)
/// - The keyboard layout used to resolve keys
///
/// # Example
///
/// ```rust
/// use libhangul::HangulConfig;
///
/// let config = HangulConfig::from_toml_str("start_active = true\nlayout = \"dubeolsik\"\n").unwrap();
/// assert!(config.base().start_active);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HangulConfig {
    /// Base configuration fields (toggle shortcut, start mode, ...)
    #[serde(flatten)]
    pub base: libhangul_core::Config,

    /// Keyboard layout
    pub layout: Layout,
}

impl HangulConfig {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Get a reference to the base config
    pub fn base(&self) -> &libhangul_core::Config {
        &self.base
    }

    /// Get a mutable reference to the base config
    pub fn base_mut(&mut self) -> &mut libhangul_core::Config {
        &mut self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HangulConfig::default();
        assert_eq!(config.layout, Layout::Dubeolsik);
        assert_eq!(config.base().toggle_shortcut, "Ctrl+Space");
        assert!(!config.base().start_active);
    }

    #[test]
    fn test_flattened_toml() {
        let config = HangulConfig::from_toml_str(
            "toggle_shortcut = \"Alt+Space\"\nreset_on_pointer_down = false\n",
        )
        .unwrap();
        assert_eq!(config.base().toggle_shortcut, "Alt+Space");
        assert!(!config.base().reset_on_pointer_down);
        assert_eq!(config.layout, Layout::Dubeolsik);

        let text = config.to_toml_string().unwrap();
        assert!(text.contains("layout = \"dubeolsik\""));
        assert_eq!(HangulConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_unknown_layout_is_rejected() {
        assert!(HangulConfig::from_toml_str("layout = \"sebeolsik\"\n").is_err());
    }
}
