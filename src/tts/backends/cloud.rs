//! Cloud speech synthesis via the Google Cloud Text-to-Speech REST API
//!
//! Synthesizes an MP3 buffer with an explicit `(language, voice)` pair and
//! hands it to the shared playback path (temp file + audio sink + poll).

use std::sync::atomic::AtomicBool;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Deserialize;

use super::SpeechBackend;
use crate::tts::{default_voice, playback, TtsError};

const ENDPOINT: &str = "https://texttospeech.googleapis.com/v1/text:synthesize";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub struct CloudBackend {
    client: reqwest::blocking::Client,
    api_key: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: String,
}

/// Build the synthesis request body. The voice name is omitted when neither
/// the caller nor the catalog knows one for the language; the API then picks
/// a default voice for the language code.
pub(crate) fn request_body(text: &str, language: &str, voice: Option<&str>) -> serde_json::Value {
    let mut voice_params = serde_json::json!({ "languageCode": language });
    if let Some(name) = voice.or_else(|| default_voice(language)) {
        voice_params["name"] = serde_json::Value::String(name.to_string());
    }

    serde_json::json!({
        "input": { "text": text },
        "voice": voice_params,
        "audioConfig": { "audioEncoding": "MP3" },
    })
}

impl CloudBackend {
    pub fn new(api_key: String) -> Result<Self, TtsError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client, api_key })
    }

    fn synthesize(
        &self,
        text: &str,
        language: &str,
        voice: Option<&str>,
    ) -> Result<Vec<u8>, TtsError> {
        let response = self
            .client
            .post(ENDPOINT)
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body(text, language, voice))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(TtsError::Api(format!("{}: {}", status, detail)));
        }

        let payload: SynthesizeResponse = response.json()?;
        Ok(BASE64.decode(payload.audio_content)?)
    }
}

impl SpeechBackend for CloudBackend {
    fn name(&self) -> &'static str {
        "cloud"
    }

    fn speak(
        &self,
        text: &str,
        language: &str,
        voice: Option<&str>,
        cancel: &AtomicBool,
    ) -> Result<(), TtsError> {
        let audio = self.synthesize(text, language, voice)?;
        playback::play_bytes(&audio, cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_with_explicit_voice() {
        let body = request_body("물", "ko-KR", Some("ko-KR-Neural2-B"));
        assert_eq!(body["input"]["text"], "물");
        assert_eq!(body["voice"]["languageCode"], "ko-KR");
        assert_eq!(body["voice"]["name"], "ko-KR-Neural2-B");
        assert_eq!(body["audioConfig"]["audioEncoding"], "MP3");
    }

    #[test]
    fn test_request_body_falls_back_to_catalog_voice() {
        let body = request_body("water", "en-US", None);
        assert_eq!(body["voice"]["name"], "en-US-Neural2-A");
    }

    #[test]
    fn test_request_body_unknown_language_omits_voice_name() {
        let body = request_body("acqua", "it-IT", None);
        assert!(body["voice"].get("name").is_none());
        assert_eq!(body["voice"]["languageCode"], "it-IT");
    }
}
