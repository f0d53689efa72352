//! The extraction pipeline.
//!
//! Wires the stages together for one document: normalize, segment, extract
//! and classify candidates per role, profile the act, score and validate.
//! The tabular reconstructor runs as a corrective branch when the linear
//! path comes up empty or the document shows a tabular layout. Only the
//! minimum-text gate can fail; every optional stage degrades to its
//! default.


use tracing::{debug, warn};

use crate::candidates::{extract_candidates, extract_representatives};
use crate::classify::classify;
use crate::error::{ExtractError, Result};
use crate::model::{
    Act, DateInfo, DebugBundle, DocumentText, Entity, EntityKind, NameOrder, NotaryInfo,
    PageGeometry, Role, SectionHints, SectionMap, ValidationResult,
};
use crate::normalize::normalize_text;
use crate::params::PipelineParams;
use crate::patterns::{self, DATE_PATTERNS, NAME_RUN, NOTARY_TITLE_PREFIX};
use crate::person::split_person_name;
use crate::profile::build_profile;
use crate::score::{name_quality, score_act};
use crate::segment::{role_anchor_counts, segment};
use crate::tabular::{reconstruct, TabularOutcome};
use crate::validate::validate;

/// Per-call inputs beyond the document text itself.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Role-window offsets from an external recognizer, consulted first by
    /// the segmenter.
    pub hints: SectionHints,
    /// Page geometry for the tabular fallback. Empty means the fallback
    /// resolves to `Unavailable`.
    pub geometry: Vec<PageGeometry>,
    pub params: PipelineParams,
    /// Attach a `DebugBundle` to the result.
    pub collect_debug: bool,
}

/// A successful extraction: the act plus optional diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub act: Act,
    pub debug: Option<DebugBundle>,
}

/// Runs the full pipeline over one document.
///
/// Fails only when the document carries no processable text; everything
/// else resolves to a best-effort act with confidence signals.
pub fn extract_act(doc: &DocumentText, opts: &ExtractOptions) -> Result<Extraction> {
    if doc.text.trim().is_empty() {
        return Err(ExtractError::EmptyDocument);
    }
    let params = &opts.params;
    let text = normalize_text(&doc.text);
    let len = text.chars().count();
    if len < params.min_text_len {
        return Err(ExtractError::TextTooShort { len, min: params.min_text_len });
    }
    debug!(chars = len, pages = doc.pages_read, "normalized document text");

    let sections = segment(&text, &opts.hints, params);
    let folded = patterns::fold(&text);

    let mut grantors = role_entities(&sections, Role::Grantors, &text, params);
    let mut beneficiaries = role_entities(&sections, Role::Beneficiaries, &text, params);

    let mut tabular_applied = false;
    if grantors.is_empty() && beneficiaries.is_empty() || tabular_layout(&folded) {
        match reconstruct(&opts.geometry, params) {
            TabularOutcome::Applied { grantors: g, beneficiaries: b } => {
                debug!(grantors = g.len(), beneficiaries = b.len(), "tabular path replaced linear lists");
                grantors = g;
                beneficiaries = b;
                tabular_applied = true;
            }
            TabularOutcome::Unavailable => {
                warn!("tabular path unavailable, keeping linear result");
            }
        }
    }

    dedup_entities(&mut grantors);
    dedup_entities(&mut beneficiaries);

    let notary = sections.slice(Role::Notary, &text).and_then(notary_info);
    let granted_on = extract_date(&text);

    let (grantor_anchors, beneficiary_anchors) = role_anchor_counts(&text);
    let profile = build_profile(
        &folded,
        sections.slice(Role::Beneficiaries, &text),
        grantor_anchors,
        beneficiary_anchors,
    );

    let act_type = profile.detected_type.clone();
    let (score, field_confidence) = score_act(
        &act_type,
        &grantors,
        &beneficiaries,
        notary.as_ref(),
        granted_on.as_ref(),
        &profile,
    );
    let issues = validate(&act_type, &grantors, &beneficiaries, &profile);

    let debug = opts.collect_debug.then(|| DebugBundle {
        pages_read: doc.pages_read,
        method: doc.method.clone(),
        raw_preview: preview(&doc.text),
        normalized_preview: preview(&text),
        windows: sections.windows().to_vec(),
        section_slices: sections
            .windows()
            .iter()
            .map(|w| (w.role.key().to_string(), w.slice(&text).to_string()))
            .collect(),
        tabular_applied,
    });

    Ok(Extraction {
        act: Act {
            act_type,
            grantors,
            beneficiaries,
            notary,
            granted_on,
            profile,
            validation: ValidationResult { score, field_confidence, issues },
        },
        debug,
    })
}

fn role_entities(
    sections: &SectionMap,
    role: Role,
    text: &str,
    params: &PipelineParams,
) -> Vec<Entity> {
    let Some(window) = sections.slice(role, text) else {
        return Vec::new();
    };
    let representatives: Vec<Entity> = extract_representatives(window, params)
        .into_iter()
        .filter(|name| classify(name) == EntityKind::Natural)
        .map(|name| build_entity(name, params, &[]))
        .collect();
    extract_candidates(window, params, true)
        .into_iter()
        .filter(|name| !representatives.iter().any(|r| r.name == *name))
        .map(|name| build_entity(name, params, &representatives))
        .collect()
}

fn build_entity(name: String, params: &PipelineParams, representatives: &[Entity]) -> Entity {
    let kind = classify(&name);
    let confidence = name_quality(&name);
    let (surname, given_names, detected_order, representatives) = match kind {
        EntityKind::Natural => {
            let parts = split_person_name(&name, params.name_order);
            (parts.surname, parts.given_names, parts.order, Vec::new())
        }
        EntityKind::Juridica => {
            (String::new(), String::new(), NameOrder::Unknown, representatives.to_vec())
        }
    };
    Entity {
        name,
        kind,
        representatives,
        surname,
        given_names,
        detected_order,
        confidence,
    }
}

fn dedup_entities(entities: &mut Vec<Entity>) {
    let mut seen = rustc_hash::FxHashSet::default();
    entities.retain(|e| seen.insert(patterns::dedup_key(&e.name)));
}

/// A names header next to a corporate-name header signals a layout the
/// linear path misreads.
fn tabular_layout(folded: &str) -> bool {
    folded.contains("NOMBRES") && folded.contains("RAZON SOCIAL")
}

fn notary_info(window: &str) -> Option<NotaryInfo> {
    let trimmed = window.trim();
    let stripped = NOTARY_TITLE_PREFIX.replace(trimmed, "");
    let name = NAME_RUN
        .find(&stripped.to_uppercase())
        .map(|m| m.as_str().trim_matches(['.', ' ']).to_string())?;
    if name.is_empty() {
        return None;
    }
    Some(NotaryInfo {
        name,
        raw_text: trimmed.to_string(),
    })
}

fn extract_date(text: &str) -> Option<DateInfo> {
    DATE_PATTERNS.iter().find_map(|p| {
        p.captures(text)
            .map(|c| DateInfo { raw: c[1].trim().to_string() })
    })
}

fn preview(text: &str) -> String {
    const MAX: usize = 400;
    if text.chars().count() <= MAX {
        text.to_string()
    } else {
        text.chars().take(MAX).collect()
    }
}
