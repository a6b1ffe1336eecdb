use crate::error::CaptionError;
use crate::types::ScriptLine;

const MATCH_PUNCTUATION: [char; 4] = ['.', ',', '!', '?'];

/// Splits a speaker-tagged script into lines of word tokens.
///
/// Lines of the form `[Name] text` carry `Name` as speaker. A line that opens a
/// tag without closing it, or that has no words after its tag, is skipped.
pub fn tokenize_script(script: &str) -> Result<Vec<ScriptLine>, CaptionError> {
    let mut lines = Vec::new();
    for raw_line in script.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let (speaker, content) = match split_speaker_tag(line) {
            Some(parts) => parts,
            None => {
                tracing::debug!(line, "tokenizer: skipping line with unterminated speaker tag");
                continue;
            }
        };

        let words: Vec<String> = content.split_whitespace().map(str::to_string).collect();
        if words.is_empty() {
            continue;
        }
        lines.push(ScriptLine { speaker, words });
    }

    if lines.is_empty() {
        return Err(CaptionError::EmptyScript);
    }
    Ok(lines)
}

/// Returns `None` when the line opens a tag that never closes.
fn split_speaker_tag(line: &str) -> Option<(Option<String>, &str)> {
    let Some(rest) = line.strip_prefix('[') else {
        return Some((None, line));
    };
    let close = rest.find(']')?;
    let name = rest[..close].trim();
    let speaker = (!name.is_empty()).then(|| name.to_string());
    Some((speaker, rest[close + 1..].trim()))
}

/// Normalized form of a script word used only for transcript lookup.
pub fn normalize_for_match(word: &str) -> String {
    word.to_lowercase()
        .trim_matches(MATCH_PUNCTUATION.as_slice())
        .to_string()
}

/// Normalized form of a recognized word as emitted by a transcription backend.
pub fn normalize_transcribed_text(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .trim_end_matches(MATCH_PUNCTUATION.as_slice())
        .to_string()
}

pub fn total_word_count(lines: &[ScriptLine]) -> usize {
    lines.iter().map(|line| line.words.len()).sum()
}
