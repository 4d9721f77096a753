//! Text-to-speech layer
//!
//! One `speak(text, language, voice)` surface over three mutually exclusive
//! backends. The backend is selected once at startup; each utterance runs on
//! its own background thread and is addressed through an [`UtteranceHandle`]
//! carrying a cancellation flag and a generation number, so a finishing old
//! utterance can never clobber the state of a newer one.

pub mod backends;
pub mod playback;

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use thiserror::Error;

use crate::config::{BackendChoice, TtsConfig};
pub use backends::{CloudBackend, EspeakBackend, PlatformBackend, SpeechBackend};

/// Pause inserted between the two parts of a word/meaning utterance
pub const INTER_UTTERANCE_PAUSE: Duration = Duration::from_millis(1500);

#[derive(Error, Debug)]
pub enum TtsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Cloud TTS error: {0}")]
    Api(String),

    #[error("Audio decode error: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Audio playback error: {0}")]
    Audio(String),

    #[error("Speech engine error: {0}")]
    Engine(String),
}

/// Per-language voice catalog for the cloud backend
pub fn voice_options() -> &'static [(&'static str, &'static [&'static str])] {
    &[
        (
            "ko-KR",
            &["ko-KR-Neural2-A", "ko-KR-Neural2-B", "ko-KR-Neural2-C"],
        ),
        (
            "en-US",
            &["en-US-Neural2-A", "en-US-Standard-B", "en-US-Neural2-C"],
        ),
        (
            "fr-FR",
            &["fr-FR-Standard-A", "fr-FR-Standard-B", "fr-FR-Standard-C"],
        ),
        ("es-ES", &["es-ES-Standard-A", "es-ES-Standard-B"]),
        ("de-DE", &["de-DE-Standard-A", "de-DE-Standard-B"]),
    ]
}

/// First catalog voice for a language, if the language is known
pub fn default_voice(language: &str) -> Option<&'static str> {
    voice_options()
        .iter()
        .find(|(lang, _)| *lang == language)
        .and_then(|(_, voices)| voices.first().copied())
}

/// Pick the speech backend once, in priority order: platform engine, cloud
/// client, espeak fallback. An explicit preference skips the probing chain.
pub fn select_backend(config: &TtsConfig) -> Arc<dyn SpeechBackend> {
    let cloud = || -> Option<Arc<dyn SpeechBackend>> {
        let key = std::env::var(&config.api_key_env).ok()?;
        match CloudBackend::new(key) {
            Ok(backend) => Some(Arc::new(backend)),
            Err(e) => {
                log::warn!("cloud TTS client unavailable: {}", e);
                None
            }
        }
    };

    let selected: Arc<dyn SpeechBackend> = match config.backend {
        BackendChoice::Platform => PlatformBackend::probe()
            .map(|b| Arc::new(b) as Arc<dyn SpeechBackend>)
            .unwrap_or_else(|| {
                log::warn!("platform speech engine not found, falling back to espeak");
                Arc::new(EspeakBackend::new())
            }),
        BackendChoice::Cloud => cloud().unwrap_or_else(|| Arc::new(EspeakBackend::new())),
        BackendChoice::Espeak => Arc::new(EspeakBackend::new()),
        BackendChoice::Auto => PlatformBackend::probe()
            .map(|b| Arc::new(b) as Arc<dyn SpeechBackend>)
            .or_else(cloud)
            .unwrap_or_else(|| Arc::new(EspeakBackend::new())),
    };

    log::info!("TTS backend: {}", selected.name());
    selected
}

/// One utterance request
#[derive(Debug, Clone)]
pub struct Utterance {
    pub text: String,
    pub language: String,
    pub voice: Option<String>,
}

impl Utterance {
    pub fn new(text: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: language.into(),
            voice: None,
        }
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }
}

/// Handle to an in-flight utterance
#[derive(Clone)]
pub struct UtteranceHandle {
    generation: u64,
    cancel: Arc<AtomicBool>,
    thread: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl UtteranceHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    /// Block until the utterance's background thread finishes
    pub fn wait(&self) {
        let handle = self.thread.lock().unwrap().take();
        if let Some(handle) = handle {
            let _ = handle.join();
        }
    }
}

/// Fire-and-forget speech dispatcher over the selected backend.
///
/// Only one utterance is in flight at a time: starting a new one cancels the
/// previous. Backend failures are logged and swallowed; speech never blocks
/// navigation or card operations.
pub struct Speaker {
    backend: Arc<dyn SpeechBackend>,
    current: Arc<Mutex<Option<UtteranceHandle>>>,
    generation: AtomicU64,
    pause: Duration,
}

impl Speaker {
    pub fn new(backend: Arc<dyn SpeechBackend>) -> Self {
        Self {
            backend,
            current: Arc::new(Mutex::new(None)),
            generation: AtomicU64::new(0),
            pause: INTER_UTTERANCE_PAUSE,
        }
    }

    /// Override the pause between the parts of a sequential utterance
    pub fn set_pause(&mut self, pause: Duration) {
        self.pause = pause;
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Speak a single utterance in the background
    pub fn speak(&self, utterance: Utterance) -> UtteranceHandle {
        self.spawn(vec![utterance])
    }

    /// Speak a word, pause, then its meaning, as one cancellable sequence
    pub fn speak_pair(&self, word: Utterance, meaning: Utterance) -> UtteranceHandle {
        self.spawn(vec![word, meaning])
    }

    /// Cancel whatever is currently playing
    pub fn stop(&self) {
        if let Some(handle) = self.current.lock().unwrap().take() {
            handle.cancel();
        }
    }

    fn spawn(&self, utterances: Vec<Utterance>) -> UtteranceHandle {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let handle = UtteranceHandle {
            generation,
            cancel: Arc::new(AtomicBool::new(false)),
            thread: Arc::new(Mutex::new(None)),
        };

        // Preempt the previous utterance and take its slot before the new
        // thread starts, so the old task cannot null out the new state.
        {
            let mut slot = self.current.lock().unwrap();
            if let Some(prev) = slot.take() {
                prev.cancel();
            }
            *slot = Some(handle.clone());
        }

        let backend = Arc::clone(&self.backend);
        let current = Arc::clone(&self.current);
        let cancel = Arc::clone(&handle.cancel);
        let pause = self.pause;

        let join = thread::spawn(move || {
            'sequence: for (i, utt) in utterances.iter().enumerate() {
                if i > 0 {
                    // Fixed inter-utterance pause, interruptible by cancel
                    let mut waited = Duration::ZERO;
                    while waited < pause {
                        if cancel.load(Ordering::Relaxed) {
                            break 'sequence;
                        }
                        thread::sleep(playback::POLL_INTERVAL);
                        waited += playback::POLL_INTERVAL;
                    }
                }
                if cancel.load(Ordering::Relaxed) {
                    break;
                }
                if let Err(e) =
                    backend.speak(&utt.text, &utt.language, utt.voice.as_deref(), &cancel)
                {
                    log::warn!("TTS playback failed: {}", e);
                    break;
                }
            }

            // Clear the slot only if this utterance still owns it; a newer
            // generation may have replaced it mid-flight.
            let mut slot = current.lock().unwrap();
            if slot.as_ref().map(|h| h.generation) == Some(generation) {
                *slot = None;
            }
        });

        *handle.thread.lock().unwrap() = Some(join);
        handle
    }
}
