//! Chat message rendering (Telegram HTML parse mode).
//!
//! Everything coming from the model is escaped; only the template adds tags.

use std::fmt::Write;

use milon_types::{PollPayload, QuizCard, QuizItem, VocabularyItem};

use crate::error::FormatError;
use crate::language::Labels;

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn field(name: &'static str, value: &str) -> Result<String, FormatError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FormatError::MissingField(name));
    }
    Ok(escape_html(value))
}

/// Render the daily digest as one message
pub fn format_daily(items: &[VocabularyItem], labels: &Labels) -> Result<String, FormatError> {
    if items.is_empty() {
        return Err(FormatError::Empty);
    }

    let mut message = format!("📚 <b>{}</b>\n\n", escape_html(&labels.digest_title));

    for (i, item) in items.iter().enumerate() {
        let word = field("word", &item.word)?;
        let transliteration = field("transliteration", &item.transliteration)?;
        let part_of_speech = field("part_of_speech", &item.part_of_speech)?;
        let definition = field("definition", &item.definition)?;
        let source = field("example_hebrew", &item.example.source)?;
        let example_translit = field("example_transliteration", &item.example.transliteration)?;
        let translation = field("example_translation", &item.example.translation)?;

        // writing into a String cannot fail
        let _ = write!(
            message,
            "{n}. <i>{transliteration}</i> (<b>{word}</b>)\n\
             🏷️ <i>{pos_label}:</i> {part_of_speech}\n\n\
             📖 <b>{def_label}:</b>\n{definition}\n\n\
             🗣️ <b>{ex_label}:</b>\n\
             {src} {source}\n\
             {tr} {example_translit}\n\
             {tl} {translation}\n\n\
             {sep}\n\n",
            n = i + 1,
            pos_label = labels.part_of_speech,
            def_label = labels.definition,
            ex_label = labels.example,
            src = labels.source_marker,
            tr = labels.transliteration_marker,
            tl = labels.translation_marker,
            sep = labels.separator,
        );
    }

    Ok(message)
}

/// Poll payload for one quiz item; the correct index is found after any
/// local reshuffle of the options.
pub fn format_poll(item: &QuizItem) -> Result<PollPayload, FormatError> {
    let question = item.question.trim();
    if question.is_empty() {
        return Err(FormatError::MissingField("question"));
    }
    let correct = item.correct_option.trim();
    if correct.is_empty() {
        return Err(FormatError::MissingField("correct_option"));
    }

    let options: Vec<String> = item.options.iter().map(|o| o.trim().to_string()).collect();
    if options.iter().any(|o| o.is_empty()) {
        return Err(FormatError::MissingField("options"));
    }
    let correct_option_id = options
        .iter()
        .position(|o| o == correct)
        .ok_or_else(|| FormatError::CorrectOptionMissing {
            correct: correct.to_string(),
        })?;

    Ok(PollPayload {
        question: question.to_string(),
        options,
        correct_option_id,
    })
}

/// Answer card with the study material hidden behind a spoiler
pub fn format_spoiler(word: &str, card: &QuizCard, labels: &Labels) -> Result<String, FormatError> {
    let word = field("word", word)?;
    let transliteration = field("card.transliteration", &card.transliteration)?;
    let part_of_speech = field("card.part_of_speech", &card.part_of_speech)?;
    let definition = field("card.definition", &card.definition)?;
    let example = field("card.example_hebrew", &card.example_hebrew)?;
    let translation = field("card.example_translation", &card.example_translation)?;

    Ok(format!(
        "💡 <b>{answer}: {word}</b>\n\
         <tg-spoiler><i>{transliteration}</i> · {part_of_speech}\n\
         {definition}\n\n\
         {src} {example}\n\
         {tl} {translation}</tg-spoiler>",
        answer = escape_html(&labels.answer),
        src = labels.source_marker,
        tl = labels.translation_marker,
    ))
}
