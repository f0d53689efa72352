//! Role-section segmentation.
//!
//! Resolves a window of the normalized text for each role. Externally
//! supplied hints win; otherwise ordered label patterns are tried per role
//! and the first pattern whose window carries real content is kept. A role
//! with no match simply has no window.

use tracing::debug;

use crate::model::{Role, SectionHints, SectionMap, SectionWindow};
use crate::params::PipelineParams;
use crate::patterns::{
    BENEFICIARY_ANCHORS, BENEFICIARY_TERMINATORS, GRANTOR_ANCHORS, GRANTOR_TERMINATORS,
    NAME_RUN, NOTARY_ANCHORS, NOTARY_TERMINATORS,
};

/// Segments `text` into role windows.
///
/// Hinted offsets are consulted first; a hint that is inverted, out of
/// bounds, or off a character boundary is dropped in favor of pattern
/// search, never an error.
pub fn segment(text: &str, hints: &SectionHints, params: &PipelineParams) -> SectionMap {
    let mut map = SectionMap::default();
    for role in Role::ALL {
        let window = hinted_window(text, role, hints)
            .or_else(|| pattern_window(text, role, params));
        if let Some(w) = window {
            debug!(role = role.key(), start = w.start, end = w.end, "section window resolved");
            map.insert(w);
        } else {
            debug!(role = role.key(), "no section window");
        }
    }
    map
}

fn hinted_window(text: &str, role: Role, hints: &SectionHints) -> Option<SectionWindow> {
    let (start, end) = hints.get(role)?;
    let end = end.min(text.len());
    if start >= end || !text.is_char_boundary(start) || !text.is_char_boundary(end) {
        debug!(role = role.key(), start, end, "dropping unusable section hint");
        return None;
    }
    Some(SectionWindow { role, start, end })
}

fn pattern_window(text: &str, role: Role, params: &PipelineParams) -> Option<SectionWindow> {
    let (anchors, terminators) = match role {
        Role::Grantors => (&*GRANTOR_ANCHORS, &*GRANTOR_TERMINATORS),
        Role::Beneficiaries => (&*BENEFICIARY_ANCHORS, &*BENEFICIARY_TERMINATORS),
        Role::Notary => (&*NOTARY_ANCHORS, &*NOTARY_TERMINATORS),
    };
    for anchor in anchors {
        let Some(m) = anchor.find(text) else { continue };
        let start = m.end();
        let end = terminators
            .find(&text[start..])
            .map(|t| start + t.start())
            .unwrap_or(text.len());
        let slice = &text[start..end];
        // Short windows still count when they hold an actual name run, so
        // a terse "A FAVOR DE JANE ROE" resolves while "X." does not.
        let non_space = slice.chars().filter(|c| !c.is_whitespace()).count();
        if non_space > params.min_window_chars || NAME_RUN.is_match(&slice.to_uppercase()) {
            return Some(SectionWindow { role, start, end });
        }
    }
    None
}

/// Counts anchor-vocabulary occurrences for the grantor and beneficiary
/// roles across the whole document. Feeds the advisory multiple-acts flag:
/// repeated anchors suggest several acts bundled in one instrument.
pub fn role_anchor_counts(text: &str) -> (usize, usize) {
    let grantor = GRANTOR_ANCHORS.iter().map(|a| a.find_iter(text).count()).sum();
    let beneficiary = BENEFICIARY_ANCHORS.iter().map(|a| a.find_iter(text).count()).sum();
    (grantor, beneficiary)
}
