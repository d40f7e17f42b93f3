use std::fmt::Write;

use dictionary::{Entry, Meaning};

use crate::view::{Outcome, ViewState};

pub fn render(state: &ViewState) -> String {
    match &state.outcome {
        Outcome::Idle => String::new(),
        Outcome::Error(message) => message.clone(),
        Outcome::Found(result) => {
            let mut out = String::new();
            for (index, entry) in result.iter().enumerate() {
                if index != 0 {
                    out.push_str("----------------------------------------\n");
                }
                render_entry(&mut out, entry);
            }
            out
        }
    }
}

/// Pretty JSON of the looked up entries, or the error as `{"error": ...}`.
pub fn render_json(state: &ViewState) -> serde_json::Result<String> {
    match &state.outcome {
        Outcome::Idle => Ok(String::new()),
        Outcome::Error(message) => {
            serde_json::to_string_pretty(&serde_json::json!({ "error": message }))
        }
        Outcome::Found(result) => serde_json::to_string_pretty(result),
    }
}

/// Text or JSON output, whichever the user asked for.
pub fn render_as(state: &ViewState, json: bool) -> serde_json::Result<String> {
    if json {
        render_json(state)
    } else {
        Ok(render(state))
    }
}

// writing into a String never fails
fn render_entry(out: &mut String, entry: &Entry) {
    let _ = writeln!(out, "{}", entry.word);
    if let Some(phonetic) = entry.display_phonetic() {
        let _ = writeln!(out, "  {phonetic}");
    }
    for meaning in &entry.meanings {
        render_meaning(out, meaning);
    }
    if !entry.source_urls.is_empty() {
        let _ = writeln!(out, "  source: {}", entry.source_urls.join(", "));
    }
    if let Some(license) = &entry.license {
        let _ = writeln!(out, "  license: {} ({})", license.name, license.url);
    }
}

fn render_meaning(out: &mut String, meaning: &Meaning) {
    let _ = writeln!(out, "    {}:", meaning.part_of_speech);
    for (index, definition) in meaning.definitions.iter().enumerate() {
        let _ = writeln!(out, "        {}. {}", index + 1, definition.definition);
        if let Some(example) = &definition.example {
            let _ = writeln!(out, "           \"{example}\"");
        }
        if !definition.synonyms.is_empty() {
            let _ = writeln!(out, "           synonyms: {}", definition.synonyms.join(", "));
        }
        if !definition.antonyms.is_empty() {
            let _ = writeln!(out, "           antonyms: {}", definition.antonyms.join(", "));
        }
    }
    if !meaning.synonyms.is_empty() {
        let _ = writeln!(out, "      synonyms: {}", meaning.synonyms.join(", "));
    }
    if !meaning.antonyms.is_empty() {
        let _ = writeln!(out, "      antonyms: {}", meaning.antonyms.join(", "));
    }
}
