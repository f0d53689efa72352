//! Act semantic profiling.
//!
//! Infers the document's act type from keyword evidence and decides whether
//! the act structurally requires beneficiaries. Detection is ordered and
//! first-match-wins; the requirement decision runs over the act-type STRING
//! so callers can profile externally supplied labels too.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::ActProfile;
use crate::patterns::fold;

/// Canonical act types, in detection priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActType {
    RevocationOfPower,
    Sale,
    JudicialProcuration,
    GeneralPower,
    SpecialPower,
    Will,
    Donation,
    Generic,
}

impl ActType {
    /// The canonical uppercase document label.
    pub fn label(self) -> &'static str {
        match self {
            ActType::RevocationOfPower => "REVOCATORIA DE PODER",
            ActType::Sale => "COMPRAVENTA",
            ActType::JudicialProcuration => "PROCURACION JUDICIAL",
            ActType::GeneralPower => "PODER GENERAL",
            ActType::SpecialPower => "PODER ESPECIAL",
            ActType::Will => "TESTAMENTO",
            ActType::Donation => "DONACION",
            ActType::Generic => "ACTO_GENERICO",
        }
    }
}

static SALE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:COMPRAVENTA|COMPRA\s*-\s*VENTA|SALE)\b").unwrap());
static REVOCATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:REVOCATORIA|REVOCATION)\b").unwrap());
static POWER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:PODER|POWER)\b").unwrap());
static PROCURATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:PROCURACION|PROCURATION|JUDICIAL\s+PROXY)\b").unwrap());
static GENERAL_POWER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:PODER\s+GENERAL|GENERAL\s+POWER(?:\s+OF\s+ATTORNEY)?)\b").unwrap()
});
static SPECIAL_POWER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:PODER\s+ESPECIAL|SPECIAL\s+POWER(?:\s+OF\s+ATTORNEY)?)\b").unwrap()
});
static WILL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:TESTAMENTO|TESTAMENT|WILL)\b").unwrap());
static DONATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:DONACION|DONATION)\b").unwrap());

const REQUIRE_KEYWORDS: &[&str] = &[
    "PODER", "POWER", "COMPRAVENTA", "SALE", "AUTORIZACION", "AUTHORIZATION", "MANDATO",
    "MANDATE", "PROCURACION", "PROCURATION",
];

const NO_REQUIRE_KEYWORDS: &[&str] = &[
    "DECLARACION", "DECLARATION", "ACTA", "DILIGENCIA", "PROCEEDING", "CUANTIA INDETERMINADA",
    "INDETERMINATE VALUE", "UNDETERMINED VALUE",
];

/// Detects the act type over the accent-folded document text.
pub fn detect_act_type(folded_text: &str) -> ActType {
    if REVOCATION.is_match(folded_text) && POWER.is_match(folded_text) {
        ActType::RevocationOfPower
    } else if SALE.is_match(folded_text) {
        ActType::Sale
    } else if PROCURATION.is_match(folded_text) {
        ActType::JudicialProcuration
    } else if GENERAL_POWER.is_match(folded_text) {
        ActType::GeneralPower
    } else if SPECIAL_POWER.is_match(folded_text) || POWER.is_match(folded_text) {
        ActType::SpecialPower
    } else if WILL.is_match(folded_text) {
        ActType::Will
    } else if DONATION.is_match(folded_text) {
        ActType::Donation
    } else {
        ActType::Generic
    }
}

/// Decides whether `act_type` structurally requires beneficiaries, given
/// the raw content of the beneficiary section when one was found.
///
/// Returns the decision and its confidence, rounded to 2 decimals.
pub fn infer_beneficiary_requirement(act_type: &str, beneficiary_text: Option<&str>) -> (bool, f64) {
    let tipo = fold(act_type);
    let valid_content = beneficiary_text.is_some_and(|t| t.trim().chars().count() > 10);

    if NO_REQUIRE_KEYWORDS.iter().any(|k| tipo.contains(k)) {
        let conf = if valid_content { 0.70 } else { 0.85 };
        return (false, conf);
    }
    if REQUIRE_KEYWORDS.iter().any(|k| tipo.contains(k)) {
        let conf: f64 = if valid_content { 0.75 + 0.15 } else { 0.75 - 0.15 };
        let conf = round2(conf.clamp(0.40, 0.95));
        return (conf >= 0.55, conf);
    }
    let conf = round2(0.7 * 0.5 + 0.3 * if valid_content { 1.0 } else { 0.0 });
    (conf >= 0.55, conf)
}

/// Builds the full semantic profile for a document.
///
/// `grantor_anchors`/`beneficiary_anchors` are the document-wide anchor
/// counts from the segmenter; both roles present plus repeated vocabulary
/// raises the advisory multiple-acts flag.
pub fn build_profile(
    folded_text: &str,
    beneficiary_text: Option<&str>,
    grantor_anchors: usize,
    beneficiary_anchors: usize,
) -> ActProfile {
    let act_type = detect_act_type(folded_text);
    let (requires, confidence) = infer_beneficiary_requirement(act_type.label(), beneficiary_text);
    let is_generic = act_type == ActType::Generic
        || (POWER.is_match(folded_text)
            && !SALE.is_match(folded_text)
            && !REVOCATION.is_match(folded_text)
            && !DONATION.is_match(folded_text)
            && !WILL.is_match(folded_text));
    let possible_multiple_acts = grantor_anchors >= 1
        && beneficiary_anchors >= 1
        && (grantor_anchors >= 2 || beneficiary_anchors >= 2);
    ActProfile {
        detected_type: act_type.label().to_string(),
        requires_beneficiary: requires,
        beneficiary_confidence: confidence,
        is_generic,
        possible_multiple_acts,
    }
}

pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
