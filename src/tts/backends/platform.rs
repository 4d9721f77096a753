//! On-device platform speech engine
//!
//! Drives the native speech command of the host OS (`say` on macOS,
//! `spd-say` where speech-dispatcher is installed). The engine speaks
//! directly to the audio device, so there is no temp file or player here;
//! completion is the child process exiting, and cancellation kills it.

use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use super::SpeechBackend;
use crate::tts::TtsError;

const WAIT_POLL: Duration = Duration::from_millis(50);

/// Locale recognized by the engine. Only Korean is mapped explicitly;
/// every other tag falls back to American English.
pub(crate) fn locale_for(language: &str) -> (&'static str, &'static str) {
    if language == "ko-KR" {
        ("ko", "KR")
    } else {
        ("en", "US")
    }
}

pub struct PlatformBackend {
    program: &'static str,
}

impl PlatformBackend {
    /// Probe for a usable native speech command
    pub fn probe() -> Option<Self> {
        for program in ["say", "spd-say"] {
            let found = Command::new(program)
                .arg("--version")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .is_ok();
            if found {
                log::debug!("platform speech engine: {}", program);
                return Some(Self { program });
            }
        }
        None
    }

    fn spawn(&self, text: &str, language: &str) -> std::io::Result<Child> {
        let (lang, region) = locale_for(language);
        let mut cmd = Command::new(self.program);
        match self.program {
            "say" => {
                // macOS `say` selects the engine voice per locale
                let voice = if lang == "ko" { "Yuna" } else { "Samantha" };
                cmd.args(["-v", voice]).arg(text);
            }
            _ => {
                cmd.args(["-l", lang, "-w"]).arg(text);
                let _ = region; // spd-say takes the bare language code
            }
        }
        cmd.stdout(Stdio::null()).stderr(Stdio::null()).spawn()
    }
}

impl SpeechBackend for PlatformBackend {
    fn name(&self) -> &'static str {
        "platform"
    }

    fn speak(
        &self,
        text: &str,
        language: &str,
        _voice: Option<&str>,
        cancel: &AtomicBool,
    ) -> Result<(), TtsError> {
        let mut child = self.spawn(text, language)?;

        loop {
            if cancel.load(Ordering::Relaxed) {
                let _ = child.kill();
                let _ = child.wait();
                return Ok(());
            }
            match child.try_wait()? {
                Some(status) if status.success() => return Ok(()),
                Some(status) => {
                    return Err(TtsError::Engine(format!(
                        "{} exited with {}",
                        self.program, status
                    )))
                }
                None => thread::sleep(WAIT_POLL),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_korean_locale_recognized() {
        assert_eq!(locale_for("ko-KR"), ("ko", "KR"));
    }

    #[test]
    fn test_unrecognized_tags_fall_back_to_english() {
        assert_eq!(locale_for("fr-FR"), ("en", "US"));
        assert_eq!(locale_for("en-US"), ("en", "US"));
        assert_eq!(locale_for(""), ("en", "US"));
    }
}
