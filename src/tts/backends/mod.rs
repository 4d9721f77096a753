//! Speech synthesis backends
//!
//! Three mutually exclusive strategies behind one trait: the on-device
//! platform engine, the cloud synthesis API, and the local espeak fallback.
//! Which one is used is decided once at startup (see [`crate::tts::select_backend`]),
//! not re-probed per utterance.

pub mod cloud;
pub mod espeak;
pub mod platform;

pub use cloud::CloudBackend;
pub use espeak::EspeakBackend;
pub use platform::PlatformBackend;

use std::sync::atomic::AtomicBool;

use super::TtsError;

/// Trait that all speech synthesis backends must implement.
pub trait SpeechBackend: Send + Sync {
    fn name(&self) -> &'static str;

    /// Speak one utterance, blocking until it finishes or `cancel` is set.
    ///
    /// `voice` is a backend-specific voice name; backends that cannot select
    /// a voice ignore it.
    fn speak(
        &self,
        text: &str,
        language: &str,
        voice: Option<&str>,
        cancel: &AtomicBool,
    ) -> Result<(), TtsError>;
}
