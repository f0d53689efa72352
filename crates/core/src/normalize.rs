//! Text normalization.
//!
//! First pipeline stage: turns raw extracted text into a stable form the
//! segmenter and extractors can index into. Total and deterministic, and a
//! fixed point — normalizing already-normalized text returns it unchanged.

use std::sync::LazyLock;

use regex::Regex;

// A wrapped name: line ends in a non-space character, next line starts with
// a 2+-letter uppercase run.
static LINE_WRAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\S)\n([A-ZÁÉÍÓÚÑÜ]{2,})").unwrap());

// An uppercase word hyphenated across a line break.
static HYPHEN_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-ZÁÉÍÓÚÑÜ])-\n([A-ZÁÉÍÓÚÑÜ])").unwrap());

static SPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").unwrap());

static NEWLINE_PAD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" *\n+ *").unwrap());

static UPPER_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-ZÁÉÍÓÚÑÜ]{2,}").unwrap());

/// Normalizes raw document text.
///
/// Rules, in order: strip control characters (keeping newlines), map
/// NBSP/tab/form-feed to spaces, drop junk lines (shorter than 3 characters
/// with no uppercase run), rejoin uppercase words hyphenated across a line
/// break, join lines wrapped mid-name, collapse space runs, trim space
/// around newlines.
///
/// Each rule only removes characters or replaces a newline with a space, so
/// iterating the pass to a fixed point terminates and makes the whole
/// function idempotent.
pub fn normalize_text(raw: &str) -> String {
    let mut text = strip_controls(raw);
    loop {
        let next = normalize_pass(&text);
        if next == text {
            return next;
        }
        text = next;
    }
}

fn strip_controls(raw: &str) -> String {
    raw.chars()
        .filter_map(|c| match c {
            '\n' => Some('\n'),
            '\r' => None,
            '\t' | '\u{000C}' | '\u{00A0}' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

fn normalize_pass(text: &str) -> String {
    // Junk lines go first, before the wrap join can glue them onto a real
    // line.
    let text = text
        .lines()
        .map(str::trim)
        .filter(|line| line.len() >= 3 || UPPER_RUN.is_match(line))
        .collect::<Vec<_>>()
        .join("\n");
    let text = HYPHEN_SPLIT.replace_all(&text, "${1}${2}");
    let text = LINE_WRAP.replace_all(&text, "${1} ${2}");
    let text = SPACE_RUN.replace_all(&text, " ");
    let text = NEWLINE_PAD.replace_all(&text, "\n");
    text.trim().to_string()
}
