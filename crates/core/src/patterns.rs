//! Compiled pattern tables and token sets.
//!
//! Process-wide immutable configuration: every regex and word set used by
//! the pipeline is compiled or built once behind a `LazyLock` and never
//! mutated. Patterns are written with bounded repetition and word-boundary
//! anchors so adversarial input cannot trigger pathological matching.
//!
//! Section anchors run directly over the normalized text (case-insensitive,
//! with accent alternatives spelled out) so that match offsets stay valid
//! indices into it. Keyword containment checks that need no offsets run
//! over an accent-folded uppercase copy instead.

use std::sync::LazyLock;

use regex::Regex;
use rustc_hash::FxHashSet;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Uppercases and strips combining marks so "Compañía" compares as
/// "COMPANIA".
pub fn fold(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_uppercase()
}

/// Case/space-normalized key for deduplicating entity names.
pub fn dedup_key(name: &str) -> String {
    fold(name).split_whitespace().collect::<Vec<_>>().join(" ")
}

// ---------------------------------------------------------------------------
// Section anchors and terminators
// ---------------------------------------------------------------------------

/// Ordered grantor-section label patterns. First accepted window wins.
pub static GRANTOR_ANCHORS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)(?:OTORGAD[OA]S?\s+POR|GRANTED\s+BY)\s*[:\-]?",
        r"(?i)(?:OTORGANTES?|GRANTORS?)\s*[:\-]?",
        r"(?i)(?:COMPARECIENTES?|PARTIES)\s*[:\-]?",
        r"(?i)(?:NOMBRES|NAMES)\s*/?\s*(?:RAZ[OÓ]N\s+SOCIAL|CORPORATE\s+NAME)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Ordered beneficiary-section label patterns.
pub static BENEFICIARY_ANCHORS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)(?:OTORGADO\s+)?(?:A\s+FAVOR\s+DE|IN\s+FAVOR\s+OF)\s*[:\-]?",
        r"(?i)BENEFICIARI[OA]S?(?:\s*\(\s*A\s*\))?\s*[:\-]?",
        r"(?i)BENEFICIARIES\s*[:\-]?",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Ordered notary-section label patterns.
pub static NOTARY_ANCHORS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)NOTARI[OA](?:\s*\(\s*A\s*\))?\s*[:\-]",
        r"(?i)NOTARY\s*[:\-]?",
        r"(?i)(?:ANTE\s+M[IÍ]|BEFORE\s+ME)\s*[:\-]?",
        r"(?i)NOTARIO\s+",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Terminators that close a grantor window.
pub static GRANTOR_TERMINATORS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:OTORGADO\s+A\s+FAVOR|A\s+FAVOR\s+DE|IN\s+FAVOR\s+OF|BENEFICIARI[OA]S?\b|BENEFICIARIES\b|NOTARI[OA]\b|NOTARY\b|ANTE\s+M[IÍ]\b|BEFORE\s+ME\b|CUANT[IÍ]A\b|UBICACI[OÓ]N\b|ESCROW\b|EXTRACTO\b|ESCRITURA\b)",
    )
    .unwrap()
});

/// Terminators that close a beneficiary window.
pub static BENEFICIARY_TERMINATORS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:NOTARI[OA]\b|NOTARY\b|ANTE\s+M[IÍ]\b|BEFORE\s+ME\b|CUANT[IÍ]A\b|UBICACI[OÓ]N\b|OBSERVACIONES\b|ESCROW\b|EXTRACTO\b|ESCRITURA\b)",
    )
    .unwrap()
});

/// Terminators that close a notary window. Notary attributions are
/// single-line, so a newline also terminates.
pub static NOTARY_TERMINATORS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:\n|NOTAR[IÍ]A\b|UBICACI[OÓ]N\b|CUANT[IÍ]A\b|PROVINCIA\b|FECHA\b)").unwrap()
});

// ---------------------------------------------------------------------------
// Name candidates
// ---------------------------------------------------------------------------

/// Primary candidate pattern: a run of 2 to 7 uppercase tokens separated by
/// spaces, dots or hyphens. Particle tokens (DE, LA, ...) are ordinary
/// 2+-letter tokens here and ride along inside the run.
pub static NAME_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-ZÁÉÍÓÚÑÜ]{2,}(?:[ \.\-]+[A-ZÁÉÍÓÚÑÜ]{2,}){1,6}").unwrap()
});

/// Supplementary pattern: isolated capitalized words, combined into
/// pair/triple candidates for names the OCR split across lines.
pub static SINGLE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-ZÁÉÍÓÚÑÜ]{3,}\b").unwrap());

/// Tokens that are field labels, boilerplate or connectors, never name
/// words on their own. Stored accent-folded.
pub static STOP_WORDS: LazyLock<FxHashSet<&'static str>> = LazyLock::new(|| {
    [
        // table / form labels
        "PERSONA", "NATURAL", "JURIDICA", "DOCUMENTO", "IDENTIDAD", "IDENTIFICACION",
        "NACIONALIDAD", "CALIDAD", "TIPO", "INTERVINIENTE", "RUC", "CEDULA", "PASAPORTE",
        "NOMBRES", "RAZON", "SOCIAL", "NO",
        // role labels
        "OTORGADO", "OTORGANTE", "OTORGANTES", "COMPARECIENTE", "COMPARECIENTES",
        "BENEFICIARIO", "BENEFICIARIOS", "BENEFICIARIA", "REPRESENTADO", "REPRESENTANTE",
        "REPRESENTA", "MANDANTE", "MANDATARIO",
        // document boilerplate
        "ACTO", "CONTRATO", "ESCRITURA", "EXTRACTO", "NOTARIO", "NOTARIA", "CUANTIA",
        "UBICACION", "PROVINCIA", "CANTON", "PARROQUIA", "OBJETO", "OBSERVACIONES",
        "FECHA", "VALOR", "DERECHOS", "PROPIOS", "SUS",
        // nationalities that leak into name columns
        "ECUATORIANA", "ECUATORIANO", "COLOMBIANA", "COLOMBIANO", "PERUANA", "PERUANO",
        // connectors in isolation
        "DE", "DEL", "LA", "LAS", "LOS", "EL", "EN", "POR", "A", "Y", "E", "O",
        // English variants
        "GRANTED", "GRANTORS", "GRANTOR", "BENEFICIARIES", "BENEFICIARY", "NOTARY",
        "PARTIES", "NAMES", "CORPORATE", "DOCUMENT", "NATIONALITY", "FAVOR", "BY", "OF",
        "THE", "IN",
    ]
    .into_iter()
    .collect()
});

/// Trailing phrases that describe capacity, not identity. Checked folded.
pub const TRAILING_NOISE: &[&str] = &[
    "POR SUS PROPIOS DERECHOS",
    "POR SUS PROPIOS",
    "POR DERECHO PROPIO",
    "BY HIS OWN RIGHT",
    "BY HER OWN RIGHT",
    "QUIEN COMPARECE",
];

/// Connector particles that must stay attached to the following name token.
pub static PARTICLES: LazyLock<FxHashSet<&'static str>> = LazyLock::new(|| {
    ["DE", "DEL", "LA", "LAS", "LOS", "SAN", "SANTA", "VAN", "VON", "OF", "THE"]
        .into_iter()
        .collect()
});

/// Articles that extend a two-token particle into a three-token one
/// ("DE LA TORRE").
pub static PARTICLE_ARTICLES: LazyLock<FxHashSet<&'static str>> =
    LazyLock::new(|| ["LA", "LAS", "LOS"].into_iter().collect());

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Corporate/institutional markers, matched as whole words over folded
/// text. Word boundaries are mandatory: PATRICIA must not match CIA.
pub static CORPORATE_MARKERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)\b(?:
            S\.?A\.?S?\b | LTDA\.? | CIA\.? | CORP\.? | INC\.? |
            COMPANIA | COMPANY | CORPORACION | CORPORATION |
            FUNDACION | FOUNDATION | ASOCIACION | ASSOCIATION |
            BANCO | BANK | COOPERATIVA | COOPERATIVE |
            UNIVERSIDAD | UNIVERSITY | MUNICIPIO | MUNICIPALITY |
            EMPRESA | ENTERPRISE | FIDEICOMISO | CONSTRUCTORA | GAD | EP
        )\b",
    )
    .unwrap()
});

/// Curated common given names used by the strict name-order heuristic.
pub static GIVEN_NAMES: LazyLock<FxHashSet<&'static str>> = LazyLock::new(|| {
    [
        "MARIA", "ANA", "ROSA", "ELENA", "FERNANDA", "LUISA", "VALERIA", "CAMILA",
        "GABRIELA", "SOFIA", "ISABEL", "PATRICIA", "VERONICA", "CRISTINA", "CARMEN",
        "LUCIA", "PAOLA", "DANIELA", "ANDREA", "JUAN", "JOSE", "LUIS", "CARLOS",
        "JORGE", "PEDRO", "DIEGO", "ANDRES", "FERNANDO", "DAVID", "DANIEL", "MIGUEL",
        "PABLO", "PATRICIO", "ALEJANDRO", "SANTIAGO", "FRANCISCO", "EDUARDO", "MARCO",
        "JOHN", "JANE", "MARY", "JAMES", "ROBERT", "MICHAEL", "WILLIAM", "RICHARD",
        "CARL", "JOSEPH", "THOMAS",
    ]
    .into_iter()
    .collect()
});

/// Fragments whose presence in a name suggests leaked table text.
/// Substring match, preserved from the calibrated scorer.
pub const SUSPICIOUS_FRAGMENTS: &[&str] =
    &["IDENTIFICACION", "REPRESENTA", "MANDANTE", "DERECHOS", "NA", "LE"];

/// Column-header tokens stripped from table rows before name recovery.
pub static HEADER_TOKENS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        "PERSONA", "NOMBRES", "RAZON", "SOCIAL", "TIPO", "INTERVINIENTE", "DOCUMENTO",
        "IDENTIDAD", "IDENTIFICACION", "NACIONALIDAD", "CALIDAD", "REPRESENTA",
        "UBICACION", "PROVINCIA", "CANTON", "PARROQUIA", "DESCRIPCION", "CUANTIA",
        "NATURAL", "JURIDICA", "NAMES", "CORPORATE", "TYPE", "DOCUMENT", "NATIONALITY",
    ]
    .iter()
    .map(|h| Regex::new(&format!(r"\b{h}\b")).unwrap())
    .collect()
});

// ---------------------------------------------------------------------------
// Representatives, notary, date
// ---------------------------------------------------------------------------

/// Opens the local representative window inside a grantor section.
pub static REPRESENTATIVE_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:REPRESENTAD[OA]\s+POR|PERSONA\s+QUE\s+LE\s+REPRESENTA|REPRESENTED\s+BY)\s*[:\-]?")
        .unwrap()
});

/// Leading titles stripped from notary candidates: "(A)", "AB.", "ABG.",
/// "DR.", "DRA.".
pub static NOTARY_TITLE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:\(\s*A\s*\)\s*|ABG?\.?\s+|DRA?\.?\s+)+").unwrap());

/// Granting-date patterns: long-form Spanish dates after their labels.
pub static DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)FECHA\s+DE\s+OTORGAMIENTO\s*:?\s*([0-9]{1,2}\s+DE\s+[A-ZÁÉÍÓÚÑÜa-záéíóúñü]+\s+DE(?:L)?\s+[0-9]{4}(?:\s*,\s*\([0-9]{1,2}:[0-9]{2}\))?)",
        r"(?i)OTORGADO\s+EL\s*:?\s*([0-9]{1,2}\s+DE\s+[A-ZÁÉÍÓÚÑÜa-záéíóúñü]+\s+DE(?:L)?\s+[0-9]{4}(?:\s*,\s*\([0-9]{1,2}:[0-9]{2}\))?)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});
