//! Field-level and overall confidence scoring.
//!
//! The formulas and weights are calibrated against reviewed extractions;
//! they are reproduced exactly and must not be re-derived. Scoring is a
//! pure function of the act record: the same record always produces the
//! same scores.

use std::collections::BTreeMap;

use crate::model::{ActProfile, DateInfo, Entity, NotaryInfo};
use crate::patterns::{fold, SUSPICIOUS_FRAGMENTS};
use crate::profile::round2;

const SPECIFIC_TYPE_KEYWORDS: &[&str] = &[
    "PODER", "POWER", "COMPRAVENTA", "SALE", "DONACION", "DONATION", "TESTAMENTO", "TESTAMENT",
];

const WEIGHT_TYPE: f64 = 0.25;
const WEIGHT_GRANTORS: f64 = 0.35;
const WEIGHT_BENEFICIARIES: f64 = 0.25;
const WEIGHT_NOTARY: f64 = 0.10;
const WEIGHT_DATE: f64 = 0.05;

/// Scores how name-like a cleaned string is, in [0, 1].
pub fn name_quality(name: &str) -> f64 {
    if name.is_empty() {
        return 0.0;
    }
    let tokens: Vec<&str> = name.split_whitespace().collect();
    let mut score = 0.3;
    score += (tokens.len() as f64 * 0.05).min(0.2);
    if (8..=50).contains(&name.chars().count()) {
        score += 0.15;
    }
    if tokens.len() >= 2 {
        score += 0.1;
    }
    let folded = fold(name);
    if SUSPICIOUS_FRAGMENTS.iter().any(|f| folded.contains(f)) {
        score -= 0.15;
    }
    if tokens.len() >= 2 && tokens.iter().all(|t| t.chars().count() >= 2) {
        score += 0.1;
    }
    score.clamp(0.0, 1.0)
}

fn entities_quality(entities: &[Entity]) -> f64 {
    if entities.is_empty() {
        return 0.0;
    }
    let total: f64 = entities
        .iter()
        .map(|e| name_quality(&e.name) * 0.7 + e.confidence * 0.3)
        .sum();
    total / entities.len() as f64
}

/// Computes per-field confidences and the weighted overall score for an
/// act, rounded to 2 decimals.
pub fn score_act(
    act_type: &str,
    grantors: &[Entity],
    beneficiaries: &[Entity],
    notary: Option<&NotaryInfo>,
    granted_on: Option<&DateInfo>,
    profile: &ActProfile,
) -> (f64, BTreeMap<String, f64>) {
    let mut conf = BTreeMap::new();

    let tipo = act_type.trim();
    let tipo_conf = if tipo.is_empty() {
        0.0
    } else if tipo.chars().count() >= 3 {
        let folded = fold(tipo);
        if SPECIFIC_TYPE_KEYWORDS.iter().any(|k| folded.contains(k)) {
            0.95
        } else {
            0.7
        }
    } else {
        0.2
    };
    conf.insert("tipo_acto".to_string(), tipo_conf);

    let grantors_conf = if grantors.is_empty() {
        0.0
    } else {
        let base = (0.2 + 0.1 * grantors.len() as f64).min(0.5);
        (base + entities_quality(grantors) * 0.45).min(0.95)
    };
    conf.insert("otorgantes".to_string(), grantors_conf);

    let beneficiaries_conf = if beneficiaries.is_empty() {
        if profile.requires_beneficiary { 0.0 } else { 0.05 }
    } else {
        let base = (0.15 + 0.08 * beneficiaries.len() as f64).min(0.4);
        (base + entities_quality(beneficiaries) * 0.5).min(0.9)
    };
    conf.insert("beneficiarios".to_string(), beneficiaries_conf);

    let notary_conf = match notary {
        Some(n) if !n.name.is_empty() => 0.5 + name_quality(&n.name) * 0.4,
        _ => 0.1,
    };
    conf.insert("notario".to_string(), notary_conf);

    let date_conf = match granted_on {
        Some(d) if !d.raw.is_empty() => 0.88,
        _ => 0.1,
    };
    conf.insert("fecha".to_string(), date_conf);

    let score = round2(
        conf["tipo_acto"] * WEIGHT_TYPE
            + conf["otorgantes"] * WEIGHT_GRANTORS
            + conf["beneficiarios"] * WEIGHT_BENEFICIARIES
            + conf["notario"] * WEIGHT_NOTARY
            + conf["fecha"] * WEIGHT_DATE,
    );
    (score, conf)
}
