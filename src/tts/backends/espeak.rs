//! Local espeak fallback
//!
//! Used when neither the platform engine nor the cloud client is available.
//! Synthesizes WAV to stdout via an `espeak-ng` (or `espeak`) subprocess.
//! Voice selection is ignored; only the 2-letter language prefix is used.

use std::process::{Command, Stdio};
use std::sync::atomic::AtomicBool;

use super::SpeechBackend;
use crate::tts::{playback, TtsError};

/// Truncate a language tag to its 2-letter prefix (`ko-KR` → `ko`)
pub(crate) fn lang_code(language: &str) -> &str {
    language.get(..2).filter(|p| p.is_ascii()).unwrap_or("en")
}

pub struct EspeakBackend {
    program: &'static str,
}

impl EspeakBackend {
    pub fn new() -> Self {
        let program = if Command::new("espeak-ng")
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
        {
            "espeak-ng"
        } else {
            "espeak"
        };
        Self { program }
    }

    fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, TtsError> {
        let output = Command::new(self.program)
            .args(["--stdout", "-v", lang_code(language)])
            .arg(text)
            .stderr(Stdio::null())
            .output()?;

        if !output.status.success() {
            return Err(TtsError::Engine(format!(
                "{} exited with {}",
                self.program, output.status
            )));
        }
        Ok(output.stdout)
    }
}

impl Default for EspeakBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechBackend for EspeakBackend {
    fn name(&self) -> &'static str {
        "espeak"
    }

    fn speak(
        &self,
        text: &str,
        language: &str,
        _voice: Option<&str>,
        cancel: &AtomicBool,
    ) -> Result<(), TtsError> {
        let audio = self.synthesize(text, language)?;
        playback::play_bytes(&audio, cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_truncated_to_prefix() {
        assert_eq!(lang_code("ko-KR"), "ko");
        assert_eq!(lang_code("en-US"), "en");
        assert_eq!(lang_code("fr"), "fr");
    }

    #[test]
    fn test_short_or_odd_tags_default_to_english() {
        assert_eq!(lang_code("k"), "en");
        assert_eq!(lang_code(""), "en");
        assert_eq!(lang_code("한국어-KR"), "en");
    }
}
