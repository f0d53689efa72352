//! Data model for extracted notarial acts.
//!
//! All records are immutable value objects created fresh per extraction
//! call; nothing here is shared or mutated across documents.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The role a text section is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Grantors,
    Beneficiaries,
    Notary,
}

impl Role {
    /// All roles in segmentation order.
    pub const ALL: [Role; 3] = [Role::Grantors, Role::Beneficiaries, Role::Notary];

    /// Stable lowercase key used in maps and debug output.
    pub fn key(self) -> &'static str {
        match self {
            Role::Grantors => "otorgantes",
            Role::Beneficiaries => "beneficiarios",
            Role::Notary => "notario",
        }
    }
}

/// A contiguous span of the normalized text attributed to one role.
///
/// Offsets are byte indices into the normalized text and always fall on
/// character boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionWindow {
    pub role: Role,
    pub start: usize,
    pub end: usize,
}

impl SectionWindow {
    /// The window's slice of `text`.
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

/// Resolved section windows for a document, at most one per role.
#[derive(Debug, Clone, Default)]
pub struct SectionMap {
    windows: Vec<SectionWindow>,
}

impl SectionMap {
    pub fn insert(&mut self, window: SectionWindow) {
        self.windows.retain(|w| w.role != window.role);
        self.windows.push(window);
    }

    pub fn get(&self, role: Role) -> Option<&SectionWindow> {
        self.windows.iter().find(|w| w.role == role)
    }

    /// The role's slice of `text`, if a window was resolved.
    pub fn slice<'a>(&self, role: Role, text: &'a str) -> Option<&'a str> {
        self.get(role).map(|w| w.slice(text))
    }

    pub fn windows(&self) -> &[SectionWindow] {
        &self.windows
    }
}

/// Legal nature of an extracted party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    /// An individual person.
    Natural,
    /// A company or institution.
    Juridica,
}

/// Token ordering detected in a natural person's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NameOrder {
    SurnameFirst,
    GivenFirst,
    #[default]
    Unknown,
}

/// One extracted party.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Cleaned full name, uppercase, single-spaced.
    pub name: String,
    #[serde(rename = "tipo")]
    pub kind: EntityKind,
    /// Natural-person representatives; populated only for `Juridica`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub representatives: Vec<Entity>,
    /// Surname portion of the name; empty for juridical entities and
    /// single-token names.
    #[serde(default)]
    pub surname: String,
    /// Given-name portion of the name; empty for juridical entities.
    #[serde(default)]
    pub given_names: String,
    #[serde(default)]
    pub detected_order: NameOrder,
    /// Per-entity extraction confidence in [0, 1].
    pub confidence: f64,
}

/// Semantic profile inferred for the document's act.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActProfile {
    /// Canonical uppercase act-type label, e.g. "PODER ESPECIAL".
    pub detected_type: String,
    /// Whether the act structurally requires beneficiaries.
    pub requires_beneficiary: bool,
    /// Confidence of the beneficiary-requirement decision in [0, 1].
    pub beneficiary_confidence: f64,
    /// True when no specific act keyword anchored the detection.
    pub is_generic: bool,
    /// Advisory flag: the document may bundle more than one act.
    pub possible_multiple_acts: bool,
}

/// Notary attribution for an act.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotaryInfo {
    pub name: String,
    /// Raw notary-section slice, kept for host-side review.
    pub raw_text: String,
}

/// Granting date as matched in the source text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateInfo {
    pub raw: String,
}

/// One rule-based quality finding. Advisory data, never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub confidence: f64,
}

/// Aggregate validation outcome for an act.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Weighted overall confidence in [0, 1], rounded to 2 decimals.
    pub score: f64,
    /// Per-field confidence, keyed by field name.
    pub field_confidence: BTreeMap<String, f64>,
    pub issues: Vec<ValidationIssue>,
}

/// The extracted act record. One per document in the base pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Act {
    #[serde(rename = "tipo_acto")]
    pub act_type: String,
    #[serde(rename = "otorgantes")]
    pub grantors: Vec<Entity>,
    #[serde(rename = "beneficiarios")]
    pub beneficiaries: Vec<Entity>,
    #[serde(rename = "notario", skip_serializing_if = "Option::is_none")]
    pub notary: Option<NotaryInfo>,
    #[serde(rename = "fecha_otorgamiento", skip_serializing_if = "Option::is_none")]
    pub granted_on: Option<DateInfo>,
    #[serde(rename = "perfil_acto")]
    pub profile: ActProfile,
    #[serde(rename = "validacion")]
    pub validation: ValidationResult,
}

/// Diagnostic bundle accompanying an extraction. Never required for
/// correctness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugBundle {
    pub pages_read: usize,
    /// Label of the upstream text-extraction method.
    pub method: String,
    pub raw_preview: String,
    pub normalized_preview: String,
    pub windows: Vec<SectionWindow>,
    /// Raw per-section slices keyed by role.
    pub section_slices: BTreeMap<String, String>,
    /// Whether the tabular fallback replaced the linear party lists.
    pub tabular_applied: bool,
}

/// Plain text of a document as produced by the external PDF-text capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentText {
    pub text: String,
    #[serde(default = "default_pages")]
    pub pages_read: usize,
    /// Advisory label of the extraction method used upstream.
    #[serde(default)]
    pub method: String,
}

fn default_pages() -> usize {
    1
}

impl DocumentText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pages_read: 1,
            method: String::new(),
        }
    }
}

/// Optional role-window hints from an external recognizer.
///
/// Offsets refer to the normalized text. Invalid or inverted ranges are
/// dropped, not errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionHints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grantors: Option<(usize, usize)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beneficiaries: Option<(usize, usize)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notary: Option<(usize, usize)>,
}

impl SectionHints {
    pub fn get(&self, role: Role) -> Option<(usize, usize)> {
        match role {
            Role::Grantors => self.grantors,
            Role::Beneficiaries => self.beneficiaries,
            Role::Notary => self.notary,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.grantors.is_none() && self.beneficiaries.is_none() && self.notary.is_none()
    }
}

/// One positioned text span on a page, as supplied by the external PDF
/// capability for the tabular fallback path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    pub text: String,
    pub x0: f64,
    pub top: f64,
    pub x1: f64,
    pub bottom: f64,
}

/// Positioned spans for one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub page: usize,
    pub spans: Vec<TextSpan>,
}
