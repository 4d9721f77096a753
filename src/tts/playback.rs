//! Playback of synthesized audio buffers
//!
//! Shared by the cloud and espeak backends: the buffer goes to a temp file,
//! plays through an audio sink, and a fixed-interval poll watches for either
//! the sink draining or the cancel flag. The temp file is removed on every
//! exit path; removal failure is logged, never propagated.

use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use super::TtsError;

/// How often the playback loop checks for completion or cancellation
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Play an audio buffer (MP3 or WAV), blocking until it finishes or
/// `cancel` is set.
pub fn play_bytes(audio: &[u8], cancel: &AtomicBool) -> Result<(), TtsError> {
    let mut tmp = tempfile::Builder::new()
        .prefix("wordbook-tts-")
        .suffix(".audio")
        .tempfile()?;
    tmp.write_all(audio)?;

    let result = play_file(tmp.path(), cancel);

    if let Err(e) = tmp.close() {
        log::warn!("failed to remove temp audio file: {}", e);
    }
    result
}

fn play_file(path: &Path, cancel: &AtomicBool) -> Result<(), TtsError> {
    let (_stream, handle) =
        rodio::OutputStream::try_default().map_err(|e| TtsError::Audio(e.to_string()))?;
    let sink = rodio::Sink::try_new(&handle).map_err(|e| TtsError::Audio(e.to_string()))?;

    let file = std::fs::File::open(path)?;
    let source =
        rodio::Decoder::new(std::io::BufReader::new(file)).map_err(|e| TtsError::Audio(e.to_string()))?;
    sink.append(source);

    while !sink.empty() {
        if cancel.load(Ordering::Relaxed) {
            sink.stop();
            break;
        }
        thread::sleep(POLL_INTERVAL);
    }
    Ok(())
}
