use anyhow::{Context, Result};

use wordbook::tts::Utterance;

use crate::app::App;

/// Speak free text through the selected backend
pub fn run_text(app: &App, text: &str, language: Option<&str>, voice: Option<&str>) -> Result<()> {
    let tts = &app.ctx.config.tts;
    let language = language.unwrap_or(&tts.word_language);

    let mut utterance = Utterance::new(text, language);
    utterance.voice = voice
        .map(str::to_string)
        .or_else(|| tts.word_voice.clone());

    // The CLI process must outlive the background playback
    app.ctx.speaker.speak(utterance).wait();
    Ok(())
}

/// Speak a card: its front, or front then back with the standard pause
pub fn run_card(app: &mut App, title: &str, deck: &str, index: usize, both: bool) -> Result<()> {
    app.open_deck(title, deck);
    let coll = app.ctx.collection().context("No deck selected")?;
    let card = coll
        .cards()
        .get(index)
        .with_context(|| format!("No card at index {}", index))?
        .clone();

    let tts = &app.ctx.config.tts;
    let mut word = Utterance::new(card.front, &tts.word_language);
    word.voice = tts.word_voice.clone();

    let handle = if both {
        let mut meaning = Utterance::new(card.back, &tts.meaning_language);
        meaning.voice = tts.meaning_voice.clone();
        app.ctx.speaker.speak_pair(word, meaning)
    } else {
        app.ctx.speaker.speak(word)
    };

    handle.wait();
    Ok(())
}
