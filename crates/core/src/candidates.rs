//! Name-candidate extraction and cleaning.
//!
//! Scans a section window for name-like token runs, reconstructs lines the
//! upstream text extraction split mid-name, and filters boilerplate. All
//! output is bounded: candidate lists are capped and every regex is free of
//! nested quantifiers, so adversarial windows cannot blow up time or space.

use itertools::Itertools;
use rustc_hash::FxHashSet;

use crate::params::PipelineParams;
use crate::patterns::{
    self, CORPORATE_MARKERS, NAME_RUN, REPRESENTATIVE_ANCHOR, SINGLE_WORD, STOP_WORDS,
    TRAILING_NOISE,
};
use crate::person::merge_connector_chunks;

/// Extracts cleaned name candidates from a section window.
///
/// `strict` selects the tightened path: the 0.3 stop-word ratio and the
/// longer minimum length. The legacy path (0.4 ratio, shorter minimum) is
/// what the tabular reconstructor and permissive callers use.
pub fn extract_candidates(window: &str, params: &PipelineParams, strict: bool) -> Vec<String> {
    let text = reconstruct_fragments(window, params);
    let upper = text.to_uppercase();

    let runs: Vec<(usize, usize)> = NAME_RUN
        .find_iter(&upper)
        .map(|m| (m.start(), m.end()))
        .collect();
    let mut raw: Vec<String> = runs
        .iter()
        .map(|&(s, e)| upper[s..e].to_string())
        .collect();

    // Words the primary pattern left orphaned, e.g. name parts the source
    // split one per line. Adjacent pairs and triples become supplementary
    // candidates.
    let singles: Vec<&str> = SINGLE_WORD
        .find_iter(&upper)
        .filter(|m| !runs.iter().any(|&(s, e)| m.start() >= s && m.end() <= e))
        .map(|m| m.as_str())
        .filter(|w| !STOP_WORDS.contains(patterns::fold(w).as_str()))
        .collect();
    for pair in singles.windows(2) {
        raw.push(pair.join(" "));
    }
    for triple in singles.windows(3) {
        raw.push(triple.join(" "));
    }

    let min_len = if strict {
        params.strict_candidate_len
    } else {
        params.min_candidate_len
    };
    let max_ratio = if strict {
        params.stop_ratio_tight
    } else {
        params.stop_ratio_legacy
    };

    let mut seen = FxHashSet::default();
    let mut cleaned: Vec<String> = raw
        .iter()
        .filter_map(|c| clean_candidate(c, min_len, max_ratio))
        .filter(|c| seen.insert(c.clone()))
        .collect();

    cleaned.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    cleaned.truncate(params.max_candidates.min(params.max_candidates_cap));
    cleaned
}

/// Natural-person names found in the local "represented by" window of a
/// section, attached later as representatives of juridical grantors.
pub fn extract_representatives(window: &str, params: &PipelineParams) -> Vec<String> {
    let Some(m) = REPRESENTATIVE_ANCHOR.find(window) else {
        return Vec::new();
    };
    let tail = &window[m.end()..];
    let end = tail
        .char_indices()
        .find(|&(i, c)| c == '\n' || i >= 120)
        .map(|(i, _)| i)
        .unwrap_or(tail.len());
    extract_candidates(&tail[..end], params, false)
}

/// Rejoins lines the source split mid-name: a short all-letter line with few
/// words absorbs the following line when that line is itself name-like.
pub fn reconstruct_fragments(text: &str, params: &PipelineParams) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i].trim();
        if i + 1 < lines.len() {
            let next = lines[i + 1].trim();
            if is_fragment(line, params) && next.len() < params.fragment_next_max && NAME_RUN.is_match(next)
            {
                out.push(format!("{line} {next}"));
                i += 2;
                continue;
            }
        }
        out.push(line.to_string());
        i += 1;
    }
    out.join("\n")
}

fn is_fragment(line: &str, params: &PipelineParams) -> bool {
    !line.is_empty()
        && line.len() < params.fragment_line_max
        && line.split_whitespace().count() <= params.fragment_max_words
        && line.chars().all(|c| c.is_alphabetic() && c.is_uppercase() || c == ' ')
}

/// Cleans one raw candidate. Returns `None` when the candidate is noise.
fn clean_candidate(raw: &str, min_len: usize, max_stop_ratio: f64) -> Option<String> {
    let corporate = CORPORATE_MARKERS.is_match(&patterns::fold(raw));

    let mut tokens: Vec<&str> = raw.split_whitespace().collect();
    strip_trailing_noise(&mut tokens);

    // Leading and trailing stop words are labels bleeding into the match.
    while tokens
        .first()
        .is_some_and(|t| STOP_WORDS.contains(patterns::fold(t).as_str()))
    {
        tokens.remove(0);
    }
    while tokens
        .last()
        .is_some_and(|t| STOP_WORDS.contains(patterns::fold(t).as_str()))
    {
        tokens.pop();
    }
    if tokens.is_empty() {
        return None;
    }

    // Ratio over connector-merged chunks: "DE LA TORRE" is one legitimate
    // chunk, not three stop words.
    let chunks = merge_connector_chunks(&tokens);
    let stop_chunks = chunks
        .iter()
        .filter(|c| STOP_WORDS.contains(patterns::fold(c).as_str()))
        .count();
    let ratio = stop_chunks as f64 / chunks.len() as f64;
    if ratio > max_stop_ratio && !corporate {
        return None;
    }

    let non_trivial = tokens.iter().filter(|t| t.chars().count() >= 2).count();
    if non_trivial < 2 {
        return None;
    }

    let cleaned = tokens.iter().join(" ");
    if cleaned.chars().count() < min_len {
        return None;
    }
    Some(cleaned)
}

fn strip_trailing_noise(tokens: &mut Vec<&str>) {
    'outer: loop {
        for phrase in TRAILING_NOISE {
            let words: Vec<&str> = phrase.split_whitespace().collect();
            if tokens.len() >= words.len() {
                let tail = &tokens[tokens.len() - words.len()..];
                if tail
                    .iter()
                    .zip(&words)
                    .all(|(t, w)| patterns::fold(t) == *w)
                {
                    tokens.truncate(tokens.len() - words.len());
                    continue 'outer;
                }
            }
        }
        return;
    }
}
