//! extracto - heuristic party extraction from notarial act text.
//!
//! Takes noisy plain text from scanned notarial instruments and produces a
//! confidence-scored [`Act`]: grantors, beneficiaries, notary, granting
//! date, a semantic profile of the act and rule-based validation issues.
//! The entry point is [`extract_act`]; the stages underneath are usable on
//! their own.

pub mod candidates;
pub mod classify;
pub mod error;
pub mod model;
pub mod normalize;
pub mod params;
pub mod patterns;
pub mod person;
pub mod pipeline;
pub mod profile;
pub mod score;
pub mod segment;
pub mod tabular;
pub mod validate;

pub use error::{ExtractError, Result};
pub use model::{
    Act, ActProfile, DateInfo, DebugBundle, DocumentText, Entity, EntityKind, NameOrder,
    NotaryInfo, PageGeometry, Role, SectionHints, SectionMap, SectionWindow, TextSpan,
    ValidationIssue, ValidationResult,
};
pub use params::PipelineParams;
pub use person::NameOrderStrategy;
pub use pipeline::{extract_act, ExtractOptions, Extraction};
pub use profile::ActType;
pub use tabular::TabularOutcome;
