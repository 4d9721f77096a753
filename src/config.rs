//! Application configuration
//!
//! Read from an optional `config.toml` in the data directory; a missing file
//! means defaults, and a malformed file is logged and ignored rather than
//! failing startup.

use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Override the deck store location
    pub data_dir: Option<PathBuf>,
    pub tts: TtsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TtsConfig {
    pub backend: BackendChoice,
    /// Environment variable holding the cloud TTS API key
    pub api_key_env: String,
    /// Language spoken for card fronts
    pub word_language: String,
    /// Language spoken for card backs
    pub meaning_language: String,
    pub word_voice: Option<String>,
    pub meaning_voice: Option<String>,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            backend: BackendChoice::Auto,
            api_key_env: "GOOGLE_TTS_API_KEY".to_string(),
            word_language: "en-US".to_string(),
            meaning_language: "ko-KR".to_string(),
            word_voice: None,
            meaning_voice: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendChoice {
    /// Probe platform, then cloud, then espeak
    #[default]
    Auto,
    Platform,
    Cloud,
    Espeak,
}

impl Config {
    /// Load `config.toml` from the data directory
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("config.toml");
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => return Self::default(),
        };

        match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("ignoring malformed {:?}: {}", path, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load(temp.path());
        assert_eq!(config.tts.backend, BackendChoice::Auto);
        assert_eq!(config.tts.word_language, "en-US");
        assert_eq!(config.tts.meaning_language, "ko-KR");
    }

    #[test]
    fn test_parse_partial_config() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("config.toml"),
            r#"
[tts]
backend = "espeak"
meaning_language = "fr-FR"
"#,
        )
        .unwrap();

        let config = Config::load(temp.path());
        assert_eq!(config.tts.backend, BackendChoice::Espeak);
        assert_eq!(config.tts.meaning_language, "fr-FR");
        // Unset keys keep their defaults
        assert_eq!(config.tts.word_language, "en-US");
        assert_eq!(config.tts.api_key_env, "GOOGLE_TTS_API_KEY");
    }

    #[test]
    fn test_malformed_config_ignored() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("config.toml"), "tts = 3").unwrap();
        let config = Config::load(temp.path());
        assert_eq!(config.tts.backend, BackendChoice::Auto);
    }
}
